use cosmwasm_std::Addr;
use cw_storage_plus::Item;

/// Contract that instantiated this vault. The only address allowed to
/// release funds, set once and never changed.
pub const CONTROLLER: Item<Addr> = Item::new("controller");
