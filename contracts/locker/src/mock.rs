#![cfg(test)]

use std::marker::PhantomData;

use cosmwasm_std::testing::{MockApi, MockStorage};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Empty, OwnedDeps, Querier, QuerierResult, QueryRequest,
    SystemError, SystemResult, Uint128, WasmQuery,
};
use cw20::{BalanceResponse, Cw20QueryMsg};

/// Test dependencies whose querier answers cw20 balance queries from a
/// fixed `(token, holder, amount)` table.
pub fn mock_dependencies_with_cw20_balances(
    balances: &[(&str, &str, u128)],
) -> OwnedDeps<MockStorage, MockApi, Cw20BalanceQuerier> {
    OwnedDeps {
        storage: MockStorage::default(),
        api: MockApi::default(),
        querier: Cw20BalanceQuerier {
            balances: balances
                .iter()
                .map(|(token, holder, amount)| {
                    (token.to_string(), holder.to_string(), Uint128::new(*amount))
                })
                .collect(),
        },
        custom_query_type: PhantomData,
    }
}

pub struct Cw20BalanceQuerier {
    balances: Vec<(String, String, Uint128)>,
}

impl Querier for Cw20BalanceQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_json(bin_request) {
            Ok(request) => request,
            Err(err) => {
                return SystemResult::Err(SystemError::InvalidRequest {
                    error: err.to_string(),
                    request: bin_request.into(),
                })
            }
        };

        match request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg }) => {
                match from_json(&msg) {
                    Ok(Cw20QueryMsg::Balance { address }) => {
                        let balance = self
                            .balances
                            .iter()
                            .find(|(token, holder, _)| {
                                *token == contract_addr && *holder == address
                            })
                            .map(|(_, _, amount)| *amount)
                            .unwrap_or_default();
                        SystemResult::Ok(to_json_binary(&BalanceResponse { balance }).into())
                    }
                    _ => SystemResult::Err(SystemError::UnsupportedRequest {
                        kind: "non-balance smart query".into(),
                    }),
                }
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "only wasm smart queries are mocked".into(),
            }),
        }
    }
}

/// Shorthand used across the contract unit tests.
pub fn addr(s: &str) -> Addr {
    Addr::unchecked(s)
}
