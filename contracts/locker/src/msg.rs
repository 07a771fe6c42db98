use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Minimum lock duration in seconds, checked at creation only
    pub min_lock_time: u64,
    /// Code id used to instantiate one custody vault per lock
    pub vault_code_id: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Lock `amount` of a cw20 `token` until `unlock_time` (unix seconds),
    /// managed by `withdrawer`. Requires a prior cw20 allowance for this
    /// contract covering `amount`.
    Lock {
        token: String,
        amount: Uint128,
        unlock_time: u64,
        withdrawer: String,
    },
    /// Move the unlock time of a lock further into the future
    ExtendLock { vault: String, unlock_time: u64 },
    /// Add tokens to a lock. Requires a prior cw20 allowance.
    IncreaseLockAmount { vault: String, amount: Uint128 },
    /// Withdraw part of a matured lock; closes it if nothing remains
    PartialWithdraw { vault: String, amount: Uint128 },
    /// Withdraw a matured lock in full and close it
    Withdraw { vault: String },
    /// Hand control of a lock to another address
    TransferLock { vault: String, new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Current state of a lock; the zeroed view when no lock exists at `vault`
    #[returns(LockDetailsResponse)]
    LockDetails { vault: String },
    /// Seconds until a lock matures; 0 once matured or absent
    #[returns(RemainingTimeResponse)]
    RemainingTime { vault: String },
    /// Number of locks managed by `owner`
    #[returns(LocksLengthResponse)]
    UserLocksLength { owner: String },
    /// Vault address at `index` in `owner`'s lock list
    #[returns(LockAtResponse)]
    UserLockAt { owner: String, index: u64 },
    /// Number of locks holding `token`
    #[returns(LocksLengthResponse)]
    TokenLocksLength { token: String },
    /// Vault address at `index` in `token`'s lock list
    #[returns(LockAtResponse)]
    TokenLockAt { token: String, index: u64 },
    /// Configured minimum lock duration in seconds
    #[returns(MinLockTimeResponse)]
    MinLockTime {},
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct MigrateMsg {}

/// Live view of a lock. `amount` is the vault's current cw20 balance,
/// so it reflects tokens sent to the vault from anywhere.
#[cw_serde]
#[derive(Default)]
pub struct LockDetailsResponse {
    pub token: String,
    pub owner: String,
    pub unlock_time: u64,
    pub amount: Uint128,
}

#[cw_serde]
pub struct RemainingTimeResponse {
    pub remaining_time: u64,
}

#[cw_serde]
pub struct LocksLengthResponse {
    pub length: u64,
}

#[cw_serde]
pub struct LockAtResponse {
    pub vault: Addr,
}

#[cw_serde]
pub struct MinLockTimeResponse {
    pub min_lock_time: u64,
}

#[cw_serde]
pub struct ConfigResponse {
    pub min_lock_time: u64,
    pub vault_code_id: u64,
}
