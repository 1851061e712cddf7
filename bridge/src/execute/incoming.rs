//! Inbound settlement handlers.
//!
//! Transport deliveries and operator submissions are validated against
//! different registry entries (non-custom vs custom source) but converge on
//! [`settle`].

use common::{InboundMessage, TransferPayload};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response,
    StdResult, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use super::is_zero_recipient;
use crate::auth::{assert_not_paused, assert_owner};
use crate::chain_registry::validate_chain;
use crate::error::ContractError;
use crate::hash::{bridge_address_hash, to_hex};
use crate::rate_limiter::{self, RateLimitDirection};
use crate::replay_guard::guard_once;
use crate::state::{Config, CONFIG};

/// Validated settlement instruction
struct TokenAmount {
    recipient: Addr,
    amount: Uint128,
}

// ============================================================================
// Transport Callback
// ============================================================================

/// Settle a transfer delivered by the router.
///
/// Deduplication is left to the transport; this path has no replay guard.
pub fn execute_receive_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: InboundMessage,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.router {
        return Err(ContractError::UnauthorizedRouter);
    }
    assert_not_paused(&config)?;

    validate_chain(
        deps.storage,
        message.source_chain_selector,
        &bridge_address_hash(&message.sender),
        true,
        false,
    )?;

    let payload: TransferPayload = from_json(&message.data)?;
    let (transfer, messages) = settle(deps, &env, &config, &payload.recipient, payload.amount)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "settlement_executed")
        .add_attribute("path", "transport")
        .add_attribute("message_id", to_hex(&message.message_id))
        .add_attribute(
            "source_chain_selector",
            message.source_chain_selector.to_string(),
        )
        .add_attribute("recipient", transfer.recipient)
        .add_attribute("amount", transfer.amount.to_string()))
}

// ============================================================================
// Operator Path
// ============================================================================

/// Settle a custom-path transfer submitted by the owner.
///
/// The request id is marked before the route is validated and the tokens are
/// released. Any failure after the mark aborts the whole call, which rolls
/// the mark back with it.
#[allow(clippy::too_many_arguments)]
pub fn execute_manual_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: Binary,
    source_chain_selector: u64,
    sender_bridge: Binary,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    assert_not_paused(&config)?;

    let request_id: [u8; 32] =
        request_id
            .to_vec()
            .try_into()
            .map_err(|_| ContractError::InvalidRequestIdLength {
                got: request_id.len(),
            })?;
    guard_once(deps.storage, &request_id)?;

    validate_chain(
        deps.storage,
        source_chain_selector,
        &bridge_address_hash(&sender_bridge),
        true,
        true,
    )?;

    let (transfer, messages) = settle(deps, &env, &config, &recipient, amount)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "settlement_executed")
        .add_attribute("path", "manual")
        .add_attribute("request_id", to_hex(&request_id))
        .add_attribute("source_chain_selector", source_chain_selector.to_string())
        .add_attribute("recipient", transfer.recipient)
        .add_attribute("amount", transfer.amount.to_string()))
}

// ============================================================================
// Common Settlement
// ============================================================================

/// Consume inbound capacity and build the release messages.
///
/// Remote chains mint into the bridge first; the home chain pays out of the
/// locked balance.
fn settle(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    recipient: &str,
    amount: Uint128,
) -> Result<(TokenAmount, Vec<CosmosMsg>), ContractError> {
    if is_zero_recipient(recipient) {
        return Err(ContractError::ZeroRecipientAddress);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = deps.api.addr_validate(recipient)?;

    rate_limiter::consume(
        deps.storage,
        RateLimitDirection::Inbound,
        amount,
        env.block.time.seconds(),
    )?;

    let transfer = TokenAmount { recipient, amount };
    let messages = release_msgs(config, &env.contract.address, &transfer)?;
    Ok((transfer, messages))
}

fn release_msgs(
    config: &Config,
    bridge: &Addr,
    transfer: &TokenAmount,
) -> StdResult<Vec<CosmosMsg>> {
    let mut messages: Vec<CosmosMsg> = vec![];
    if !config.is_home_chain {
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                recipient: bridge.to_string(),
                amount: transfer.amount,
            })?,
            funds: vec![],
        }));
    }
    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: transfer.recipient.to_string(),
            amount: transfer.amount,
        })?,
        funds: vec![],
    }));
    Ok(messages)
}
