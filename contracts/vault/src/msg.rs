use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Send `amount` of the cw20 `token` held by this vault to `recipient`.
    /// Only the controller may call this.
    Release {
        token: String,
        recipient: String,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the locker contract controlling this vault
    #[returns(ControllerResponse)]
    Controller {},
}

#[cw_serde]
pub struct ControllerResponse {
    pub controller: Addr,
}
