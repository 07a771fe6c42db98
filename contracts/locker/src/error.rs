use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Amount must be greater than zero")]
    ZeroAmount {},

    #[error("Token address cannot be empty")]
    ZeroToken {},

    #[error("Withdrawer address cannot be empty")]
    ZeroWithdrawer {},

    #[error("Unlock time must be at least {min_lock_time} seconds from now")]
    LockTooShort { min_lock_time: u64 },

    #[error("Unlock time {unlock_time} is not a unix timestamp in seconds")]
    TimestampNotSeconds { unlock_time: u64 },

    #[error("No active lock at this address for this caller")]
    NoActiveLockOrNotOwner {},

    #[error("New unlock time must be greater than the current one")]
    LocktimeNotIncreased {},

    #[error("New unlock time is in the past")]
    UnlockTimeInPast {},

    #[error("Lock cannot be withdrawn before {unlock_time}")]
    NotUnlockedYet { unlock_time: u64 },

    #[error("Requested {requested} but only {available} is locked")]
    AmountExceedsLocked {
        requested: Uint128,
        available: Uint128,
    },

    #[error("List index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds { index: u64, length: u64 },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
