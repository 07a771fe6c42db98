#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response,
    StdError, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};

use crate::error::ContractError;
use crate::index::{TOKEN_LOCKS, USER_LOCKS};
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, LockAtResponse, LockDetailsResponse,
    LocksLengthResponse, MigrateMsg, MinLockTimeResponse, QueryMsg, RemainingTimeResponse,
};
use crate::state::{
    Config, Lock, PendingLock, CONFIG, LOCKS, LOCK_NONCE, MAX_UNLOCK_TIMESTAMP, PENDING_LOCK,
};

use cw2::set_contract_version;
use cw20::{Cw20Contract, Cw20ExecuteMsg};
use cw_lock_vault::msg::{ExecuteMsg as VaultExecuteMsg, InstantiateMsg as VaultInstantiateMsg};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-token-locker";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for the vault instantiated by `Lock`.
pub const INSTANTIATE_VAULT_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        min_lock_time: msg.min_lock_time,
        vault_code_id: msg.vault_code_id,
    };
    CONFIG.save(deps.storage, &config)?;
    LOCK_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("min_lock_time", msg.min_lock_time.to_string())
        .add_attribute("vault_code_id", msg.vault_code_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Lock {
            token,
            amount,
            unlock_time,
            withdrawer,
        } => try_lock(deps, env, info, token, amount, unlock_time, withdrawer),
        ExecuteMsg::ExtendLock { vault, unlock_time } => {
            try_extend_lock(deps, env, info, vault, unlock_time)
        }
        ExecuteMsg::IncreaseLockAmount { vault, amount } => {
            try_increase_lock_amount(deps, info, vault, amount)
        }
        ExecuteMsg::PartialWithdraw { vault, amount } => {
            try_withdraw(deps, env, info, vault, Some(amount))
        }
        ExecuteMsg::Withdraw { vault } => try_withdraw(deps, env, info, vault, None),
        ExecuteMsg::TransferLock { vault, new_owner } => {
            try_transfer_lock(deps, info, vault, new_owner)
        }
    }
}

/// Validates the new lock and instantiates its custody vault. The
/// registry write and the token transfer happen in the reply, once the
/// vault address is known.
pub fn try_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    unlock_time: u64,
    withdrawer: String,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if token.is_empty() {
        return Err(ContractError::ZeroToken {});
    }
    if withdrawer.is_empty() {
        return Err(ContractError::ZeroWithdrawer {});
    }
    if unlock_time >= MAX_UNLOCK_TIMESTAMP {
        return Err(ContractError::TimestampNotSeconds { unlock_time });
    }

    let config = CONFIG.load(deps.storage)?;
    if unlock_time < env.block.time.seconds() + config.min_lock_time {
        return Err(ContractError::LockTooShort {
            min_lock_time: config.min_lock_time,
        });
    }

    let token = deps.api.addr_validate(&token)?;
    let owner = deps.api.addr_validate(&withdrawer)?;

    // fresh label per lock; the counter never repeats
    let nonce = LOCK_NONCE.load(deps.storage)?;
    LOCK_NONCE.save(deps.storage, &(nonce + 1))?;

    PENDING_LOCK.save(
        deps.storage,
        &PendingLock {
            creator: info.sender.clone(),
            token,
            amount,
            unlock_time,
            owner,
        },
    )?;

    let instantiate_vault = SubMsg::reply_on_success(
        WasmMsg::Instantiate {
            admin: None,
            code_id: config.vault_code_id,
            label: format!("lock-vault-{}", nonce),
            msg: to_json_binary(&VaultInstantiateMsg {})?,
            funds: vec![],
        },
        INSTANTIATE_VAULT_REPLY_ID,
    );

    Ok(Response::new()
        .add_submessage(instantiate_vault)
        .add_attribute("action", "lock")
        .add_attribute("sender", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_VAULT_REPLY_ID => reply_vault_instantiated(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

/// Completes the lock creation started in [`try_lock`]: records the lock
/// under the freshly instantiated vault address, indexes it and pulls the
/// tokens in. A failing transfer (e.g. missing allowance) unwinds all of
/// it, so no half-created lock survives.
fn reply_vault_instantiated(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let pending = PENDING_LOCK.load(deps.storage)?;
    PENDING_LOCK.remove(deps.storage);

    let vault = instantiated_contract_address(&msg)?;
    let vault = deps.api.addr_validate(&vault)?;

    let lock = Lock {
        token: pending.token.clone(),
        unlock_time: pending.unlock_time,
        owner: pending.owner.clone(),
    };
    LOCKS.save(deps.storage, &vault, &lock)?;
    USER_LOCKS.append(deps.storage, &pending.owner, &vault)?;
    TOKEN_LOCKS.append(deps.storage, &pending.token, &vault)?;

    let fund_vault = WasmMsg::Execute {
        contract_addr: pending.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: pending.creator.to_string(),
            recipient: vault.to_string(),
            amount: pending.amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(fund_vault)
        .add_event(
            Event::new("lock_created")
                .add_attribute("vault", vault)
                .add_attribute("token", pending.token)
                .add_attribute("amount", pending.amount)
                .add_attribute("unlock_time", pending.unlock_time.to_string())
                .add_attribute("owner", pending.owner),
        ))
}

fn instantiated_contract_address(msg: &Reply) -> Result<String, ContractError> {
    let response = msg
        .result
        .clone()
        .into_result()
        .map_err(StdError::generic_err)?;
    response
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| &event.attributes)
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| attr.value.clone())
        .ok_or_else(|| StdError::generic_err("instantiate reply carries no contract address").into())
}

pub fn try_extend_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vault: String,
    unlock_time: u64,
) -> Result<Response, ContractError> {
    let vault = deps.api.addr_validate(&vault)?;
    let mut lock = assert_owner(deps.storage, &vault, &info.sender)?;

    if unlock_time >= MAX_UNLOCK_TIMESTAMP {
        return Err(ContractError::TimestampNotSeconds { unlock_time });
    }
    if unlock_time <= lock.unlock_time {
        return Err(ContractError::LocktimeNotIncreased {});
    }
    if unlock_time < env.block.time.seconds() {
        return Err(ContractError::UnlockTimeInPast {});
    }

    lock.unlock_time = unlock_time;
    LOCKS.save(deps.storage, &vault, &lock)?;

    Ok(Response::new()
        .add_attribute("action", "extend_lock")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("lock_duration_increased")
                .add_attribute("vault", vault)
                .add_attribute("unlock_time", unlock_time.to_string()),
        ))
}

pub fn try_increase_lock_amount(
    deps: DepsMut,
    info: MessageInfo,
    vault: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let vault = deps.api.addr_validate(&vault)?;
    let lock = assert_owner(deps.storage, &vault, &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    // no record mutation: the lock's amount is the vault balance
    let fund_vault = WasmMsg::Execute {
        contract_addr: lock.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: vault.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(fund_vault)
        .add_attribute("action", "increase_lock_amount")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("lock_amount_increased")
                .add_attribute("vault", vault)
                .add_attribute("amount", amount),
        ))
}

/// Shared by `Withdraw` (`requested == None`, take everything) and
/// `PartialWithdraw`. Erases the lock and both index entries once the
/// vault is empty.
pub fn try_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vault: String,
    requested: Option<Uint128>,
) -> Result<Response, ContractError> {
    let vault = deps.api.addr_validate(&vault)?;
    let lock = assert_owner(deps.storage, &vault, &info.sender)?;

    if env.block.time.seconds() < lock.unlock_time {
        return Err(ContractError::NotUnlockedYet {
            unlock_time: lock.unlock_time,
        });
    }

    let available = derived_amount(deps.as_ref(), &lock.token, &vault)?;
    let amount = requested.unwrap_or(available);
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if amount > available {
        return Err(ContractError::AmountExceedsLocked {
            requested: amount,
            available,
        });
    }

    let release = WasmMsg::Execute {
        contract_addr: vault.to_string(),
        msg: to_json_binary(&VaultExecuteMsg::Release {
            token: lock.token.to_string(),
            recipient: lock.owner.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    let action = if requested.is_some() {
        "partial_withdraw"
    } else {
        "withdraw"
    };
    let mut response = Response::new()
        .add_message(release)
        .add_attribute("action", action)
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("tokens_withdrawn")
                .add_attribute("vault", vault.clone())
                .add_attribute("amount", amount),
        );

    if amount == available {
        LOCKS.remove(deps.storage, &vault);
        USER_LOCKS.remove(deps.storage, &lock.owner, &vault)?;
        TOKEN_LOCKS.remove(deps.storage, &lock.token, &vault)?;
        response = response.add_event(Event::new("lock_closed").add_attribute("vault", vault));
    }

    Ok(response)
}

pub fn try_transfer_lock(
    deps: DepsMut,
    info: MessageInfo,
    vault: String,
    new_owner: String,
) -> Result<Response, ContractError> {
    let vault = deps.api.addr_validate(&vault)?;
    let mut lock = assert_owner(deps.storage, &vault, &info.sender)?;

    if new_owner.is_empty() {
        return Err(ContractError::ZeroWithdrawer {});
    }
    let new_owner = deps.api.addr_validate(&new_owner)?;

    USER_LOCKS.remove(deps.storage, &lock.owner, &vault)?;
    USER_LOCKS.append(deps.storage, &new_owner, &vault)?;
    lock.owner = new_owner.clone();
    LOCKS.save(deps.storage, &vault, &lock)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_lock")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("lock_ownership_transferred")
                .add_attribute("vault", vault)
                .add_attribute("new_owner", new_owner),
        ))
}

/// A missing record and a foreign record fail identically, so callers
/// cannot probe which vault addresses hold other owners' locks.
fn assert_owner(
    storage: &dyn Storage,
    vault: &Addr,
    caller: &Addr,
) -> Result<Lock, ContractError> {
    match LOCKS.may_load(storage, vault)? {
        Some(lock) if lock.owner == *caller => Ok(lock),
        _ => Err(ContractError::NoActiveLockOrNotOwner {}),
    }
}

fn derived_amount(deps: Deps, token: &Addr, vault: &Addr) -> StdResult<Uint128> {
    Cw20Contract(token.clone()).balance(&deps.querier, vault.clone())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::LockDetails { vault } => Ok(to_json_binary(&query_lock_details(deps, vault)?)?),
        QueryMsg::RemainingTime { vault } => {
            Ok(to_json_binary(&query_remaining_time(deps, env, vault)?)?)
        }
        QueryMsg::UserLocksLength { owner } => {
            let owner = deps.api.addr_validate(&owner)?;
            Ok(to_json_binary(&LocksLengthResponse {
                length: USER_LOCKS.len(deps.storage, &owner)?,
            })?)
        }
        QueryMsg::UserLockAt { owner, index } => {
            let owner = deps.api.addr_validate(&owner)?;
            Ok(to_json_binary(&LockAtResponse {
                vault: USER_LOCKS.get(deps.storage, &owner, index)?,
            })?)
        }
        QueryMsg::TokenLocksLength { token } => {
            let token = deps.api.addr_validate(&token)?;
            Ok(to_json_binary(&LocksLengthResponse {
                length: TOKEN_LOCKS.len(deps.storage, &token)?,
            })?)
        }
        QueryMsg::TokenLockAt { token, index } => {
            let token = deps.api.addr_validate(&token)?;
            Ok(to_json_binary(&LockAtResponse {
                vault: TOKEN_LOCKS.get(deps.storage, &token, index)?,
            })?)
        }
        QueryMsg::MinLockTime {} => {
            let config = CONFIG.load(deps.storage)?;
            Ok(to_json_binary(&MinLockTimeResponse {
                min_lock_time: config.min_lock_time,
            })?)
        }
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            Ok(to_json_binary(&ConfigResponse {
                min_lock_time: config.min_lock_time,
                vault_code_id: config.vault_code_id,
            })?)
        }
    }
}

fn query_lock_details(deps: Deps, vault: String) -> Result<LockDetailsResponse, ContractError> {
    let vault = deps.api.addr_validate(&vault)?;
    let lock = match LOCKS.may_load(deps.storage, &vault)? {
        Some(lock) => lock,
        None => return Ok(LockDetailsResponse::default()),
    };
    let amount = derived_amount(deps, &lock.token, &vault)?;

    Ok(LockDetailsResponse {
        token: lock.token.into_string(),
        owner: lock.owner.into_string(),
        unlock_time: lock.unlock_time,
        amount,
    })
}

fn query_remaining_time(
    deps: Deps,
    env: Env,
    vault: String,
) -> Result<RemainingTimeResponse, ContractError> {
    let vault = deps.api.addr_validate(&vault)?;
    let unlock_time = LOCKS
        .may_load(deps.storage, &vault)?
        .map(|lock| lock.unlock_time)
        .unwrap_or(0);

    Ok(RemainingTimeResponse {
        remaining_time: unlock_time.saturating_sub(env.block.time.seconds()),
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
