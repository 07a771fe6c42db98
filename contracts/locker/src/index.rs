use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;

/// Ordered list of vault addresses per key (an owner or a token), stored
/// as positional entries next to a logical length.
///
/// Removal swaps the last element into the vacated slot, so positions are
/// not stable across removals.
pub struct LockIndex<'a> {
    entries: Map<'a, (Addr, u64), Addr>,
    lengths: Map<'a, Addr, u64>,
}

/// Locks managed by each owner.
pub const USER_LOCKS: LockIndex = LockIndex::new("user_locks", "user_locks_len");

/// Locks holding each token.
pub const TOKEN_LOCKS: LockIndex = LockIndex::new("token_locks", "token_locks_len");

impl<'a> LockIndex<'a> {
    pub const fn new(entries_ns: &'a str, lengths_ns: &'a str) -> Self {
        LockIndex {
            entries: Map::new(entries_ns),
            lengths: Map::new(lengths_ns),
        }
    }

    pub fn len(&self, storage: &dyn Storage, key: &Addr) -> StdResult<u64> {
        Ok(self.lengths.may_load(storage, key.clone())?.unwrap_or(0))
    }

    /// Positional read. Fails once `index` reaches the logical length.
    pub fn get(
        &self,
        storage: &dyn Storage,
        key: &Addr,
        index: u64,
    ) -> Result<Addr, ContractError> {
        let length = self.len(storage, key)?;
        if index >= length {
            return Err(ContractError::IndexOutOfBounds { index, length });
        }
        Ok(self.entries.load(storage, (key.clone(), index))?)
    }

    /// Appends `vault` at the end. Callers must not append duplicates.
    pub fn append(&self, storage: &mut dyn Storage, key: &Addr, vault: &Addr) -> StdResult<()> {
        let length = self.len(storage, key)?;
        self.entries.save(storage, (key.clone(), length), vault)?;
        self.lengths.save(storage, key.clone(), &(length + 1))
    }

    /// Removes `vault` by overwriting its slot with the last element and
    /// shrinking the length by one. A miss means the registry and this
    /// index disagree, which no sequence of operations produces.
    pub fn remove(
        &self,
        storage: &mut dyn Storage,
        key: &Addr,
        vault: &Addr,
    ) -> Result<(), ContractError> {
        let length = self.len(storage, key)?;
        let mut position = None;
        for i in 0..length {
            if self.entries.load(storage, (key.clone(), i))? == *vault {
                position = Some(i);
                break;
            }
        }
        let position = position.ok_or(ContractError::IndexOutOfBounds {
            index: length,
            length,
        })?;

        let last = length - 1;
        if position != last {
            let tail = self.entries.load(storage, (key.clone(), last))?;
            self.entries.save(storage, (key.clone(), position), &tail)?;
        }
        self.entries.remove(storage, (key.clone(), last));
        if last == 0 {
            self.lengths.remove(storage, key.clone());
        } else {
            self.lengths.save(storage, key.clone(), &last)?;
        }
        Ok(())
    }
}
