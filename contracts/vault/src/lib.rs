//! Custody vault for a single token lock.
//!
//! The locker contract instantiates one vault per lock. The vault's cw20
//! balance is the locked amount; nothing leaves it except on command of
//! the controller (the locker) via [`msg::ExecuteMsg::Release`].

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
