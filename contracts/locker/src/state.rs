use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Deployment-time configuration, immutable after instantiate.
#[cw_serde]
pub struct Config {
    /// Floor on `unlock_time - now` when creating a lock, in seconds.
    /// Not re-checked after creation.
    pub min_lock_time: u64,
    /// Code id the per-lock custody vaults are instantiated from.
    pub vault_code_id: u64,
}

/// Registry record for one lock, keyed by its vault address.
///
/// The locked amount is never stored: it is always read as the live cw20
/// balance of the vault, so tokens sent straight to the vault by third
/// parties count towards the lock.
#[cw_serde]
pub struct Lock {
    /// cw20 token held by the vault. Immutable.
    pub token: Addr,
    /// Unix timestamp in seconds after which withdrawal is permitted.
    /// Only ever moves forward.
    pub unlock_time: u64,
    /// Address allowed to extend, top up, withdraw and transfer the lock.
    pub owner: Addr,
}

/// Lock data staged between the `Lock` call and the vault-instantiation
/// reply that completes it. Lives for a single transaction.
#[cw_serde]
pub struct PendingLock {
    /// Caller funding the lock; the cw20 transfer is pulled from here.
    pub creator: Addr,
    pub token: Addr,
    pub amount: Uint128,
    pub unlock_time: u64,
    pub owner: Addr,
}

/// Unlock times at or above this look like milliseconds, not seconds.
pub const MAX_UNLOCK_TIMESTAMP: u64 = 10_000_000_000;

pub const CONFIG: Item<Config> = Item::new("config");

/// Lock registry. A missing entry is the "no active lock" state.
pub const LOCKS: Map<&Addr, Lock> = Map::new("locks");

/// Counter labelling each vault instantiation. Never rewound, so no
/// label is ever minted twice.
pub const LOCK_NONCE: Item<u64> = Item::new("lock_nonce");

/// In-flight lock creation, consumed by the instantiation reply.
pub const PENDING_LOCK: Item<PendingLock> = Item::new("pending_lock");
