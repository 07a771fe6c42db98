//! Time-locking escrow for cw20 tokens.
//!
//! Each lock escrows one cw20 token in its own custody vault contract
//! (see `cw-lock-vault`) until a chosen unlock time:
//! 1. The owner grants this contract a cw20 allowance and calls `Lock`
//! 2. The locker instantiates a fresh vault and moves the tokens into it
//! 3. Until maturity the owner may extend the unlock time, top the lock
//!    up, or hand it to a new owner
//! 4. After maturity the owner withdraws, partially or in full; an empty
//!    vault closes the lock
//!
//! The locked amount is never stored. It is always the vault's live cw20
//! balance, so tokens sent straight to a vault address count towards the
//! lock without any call to this contract.

pub mod contract;
pub mod error;
pub mod index;
mod mock;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
