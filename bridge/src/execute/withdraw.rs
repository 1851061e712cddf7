//! Timelocked balance withdrawals.
//!
//! Both handlers sweep the contract's entire balance of the asset to the
//! given recipient. On the home chain the CW20 sweep includes locked
//! liquidity backing remote supply.

use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, DepsMut, Env, MessageInfo, QuerierWrapper, Response,
    StdResult, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::auth::{assert_not_paused, assert_timelock_owner};
use crate::error::ContractError;
use crate::state::{CONFIG, WITHDRAW_NATIVE_REPLY_ID};

/// Transfer the bridge's whole CW20 balance to `recipient`.
pub fn execute_withdraw_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    assert_timelock_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    assert_not_paused(&config)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    let balance = query_cw20_balance(&deps.querier, &config.token, &env.contract.address)?;
    if balance.is_zero() {
        return Err(ContractError::NothingToWithdraw);
    }

    let msg = WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount: balance,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "withdrawal_executed")
        .add_attribute("asset", "token")
        .add_attribute("recipient", recipient)
        .add_attribute("amount", balance.to_string()))
}

/// Transfer the bridge's whole `fee_denom` balance to `recipient`.
///
/// A rejected bank send surfaces as `NativeTransferFailed` through the reply.
pub fn execute_withdraw_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    assert_timelock_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    assert_not_paused(&config)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.fee_denom)?;
    if balance.amount.is_zero() {
        return Err(ContractError::NothingToWithdraw);
    }
    let amount = balance.amount;

    let send = SubMsg::reply_on_error(
        BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![balance],
        },
        WITHDRAW_NATIVE_REPLY_ID,
    );

    Ok(Response::new()
        .add_submessage(send)
        .add_attribute("action", "withdrawal_executed")
        .add_attribute("asset", "native")
        .add_attribute("denom", config.fee_denom)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string()))
}

fn query_cw20_balance(
    querier: &QuerierWrapper,
    token: &Addr,
    account: &Addr,
) -> StdResult<Uint128> {
    let response: cw20::BalanceResponse = querier.query_wasm_smart(
        token,
        &cw20::Cw20QueryMsg::Balance {
            address: account.to_string(),
        },
    )?;
    Ok(response.balance)
}
