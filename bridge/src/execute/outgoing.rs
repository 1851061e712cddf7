//! Outbound transfer handlers.
//!
//! Both paths run the same admission sequence before any value moves:
//! amount/recipient checks, route validation, outbound rate limit, fee check.
//! Only then are the token messages emitted (pull, and burn on remote
//! chains), followed by the transport dispatch or the custom-path
//! announcement, and finally the best-effort refund of excess fee.

use common::{RouterExecuteMsg, RouterQueryMsg, TransferPayload, TransportMessage};
use cosmwasm_std::{
    coins, to_json_binary, Addr, BankMsg, Binary, CosmosMsg, DepsMut, Env, MessageInfo,
    Response, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use super::is_zero_recipient;
use crate::auth::assert_not_paused;
use crate::chain_registry::validate_chain;
use crate::error::ContractError;
use crate::hash::{bridge_address_hash, to_hex};
use crate::rate_limiter::{self, RateLimitDirection};
use crate::request_id::{next_request_id, RequestIdInput};
use crate::state::{
    Config, PendingDispatch, PendingRefund, CONFIG, DISPATCH_REPLY_ID, PENDING_DISPATCH,
    PENDING_REFUND, REFUND_REPLY_ID,
};

// ============================================================================
// Transport Path
// ============================================================================

/// Send tokens through the messaging transport.
pub fn execute_transfer_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dest_chain_selector: u64,
    receiver_bridge: Binary,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_not_paused(&config)?;
    validate_transfer(&recipient, amount)?;
    assert_fee_denom_only(&info, &config.fee_denom)?;

    validate_chain(
        deps.storage,
        dest_chain_selector,
        &bridge_address_hash(&receiver_bridge),
        false,
        false,
    )?;
    rate_limiter::consume(
        deps.storage,
        RateLimitDirection::Outbound,
        amount,
        env.block.time.seconds(),
    )?;

    let message = build_transport_message(&config, &receiver_bridge, &recipient, amount)?;
    let fee = deps
        .querier
        .query_wasm_smart::<common::FeeResponse>(
            &config.router,
            &RouterQueryMsg::GetFee {
                dest_chain_selector,
                message: message.clone(),
            },
        )?
        .fee;
    let attached = attached_fee(&info, &config.fee_denom);
    if attached < fee {
        return Err(ContractError::NotEnoughFees {
            required: fee,
            provided: attached,
        });
    }

    let token_msgs = pull_tokens_msgs(&config, &info.sender, &env.contract.address, amount)?;

    let dispatch = SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: config.router.to_string(),
            msg: to_json_binary(&RouterExecuteMsg::Send {
                dest_chain_selector,
                message,
            })?,
            funds: if fee.is_zero() {
                vec![]
            } else {
                coins(fee.u128(), &config.fee_denom)
            },
        },
        DISPATCH_REPLY_ID,
    );
    PENDING_DISPATCH.save(
        deps.storage,
        &PendingDispatch {
            sender: info.sender.clone(),
            dest_chain_selector,
            receiver_bridge: receiver_bridge.clone(),
            recipient: recipient.clone(),
            amount,
            fee,
        },
    )?;

    let refund = refund_submsg(deps.storage, &config, &info.sender, attached - fee)?;

    Ok(Response::new()
        .add_messages(token_msgs)
        .add_submessage(dispatch)
        .add_submessages(refund)
        .add_attribute("action", "transfer_tokens")
        .add_attribute("sender", info.sender)
        .add_attribute("dest_chain_selector", dest_chain_selector.to_string())
        .add_attribute("receiver_bridge", to_hex(&receiver_bridge))
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", fee.to_string()))
}

// ============================================================================
// Custom Path
// ============================================================================

/// Send tokens to a chain settled by an off-chain operator.
///
/// The response announces the transfer with a locally generated request id;
/// the operator submits it on the destination side.
pub fn execute_transfer_tokens_custom(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dest_chain_selector: u64,
    receiver_bridge: Binary,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_not_paused(&config)?;
    validate_transfer(&recipient, amount)?;
    assert_fee_denom_only(&info, &config.fee_denom)?;

    let chain = validate_chain(
        deps.storage,
        dest_chain_selector,
        &bridge_address_hash(&receiver_bridge),
        false,
        true,
    )?;
    rate_limiter::consume(
        deps.storage,
        RateLimitDirection::Outbound,
        amount,
        env.block.time.seconds(),
    )?;

    let fee = chain.fees;
    let attached = attached_fee(&info, &config.fee_denom);
    if attached < fee {
        return Err(ContractError::NotEnoughFees {
            required: fee,
            provided: attached,
        });
    }

    let token_msgs = pull_tokens_msgs(&config, &info.sender, &env.contract.address, amount)?;

    let (request_id, nonce) = next_request_id(
        deps.storage,
        deps.api,
        &env,
        &RequestIdInput {
            dest_chain_selector,
            amount,
            receiver_bridge: &receiver_bridge,
            recipient: &recipient,
        },
    )?;

    let refund = refund_submsg(deps.storage, &config, &info.sender, attached - fee)?;

    Ok(Response::new()
        .add_messages(token_msgs)
        .add_submessages(refund)
        .add_attribute("action", "custom_transfer_initiated")
        .add_attribute("request_id", to_hex(&request_id))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("sender", info.sender)
        .add_attribute("dest_chain_selector", dest_chain_selector.to_string())
        .add_attribute("receiver_bridge", to_hex(&receiver_bridge))
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", fee.to_string()))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn validate_transfer(recipient: &str, amount: Uint128) -> Result<(), ContractError> {
    if is_zero_recipient(recipient) {
        return Err(ContractError::ZeroRecipientAddress);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    Ok(())
}

/// Only `fee_denom` is counted towards the fee or refunded, so any other
/// denom would be stranded in the contract.
fn assert_fee_denom_only(info: &MessageInfo, fee_denom: &str) -> Result<(), ContractError> {
    match info.funds.iter().find(|c| c.denom != fee_denom) {
        Some(coin) => Err(ContractError::UnsupportedFundsDenom {
            denom: coin.denom.clone(),
        }),
        None => Ok(()),
    }
}

fn attached_fee(info: &MessageInfo, fee_denom: &str) -> Uint128 {
    info.funds
        .iter()
        .find(|c| c.denom == fee_denom)
        .map(|c| c.amount)
        .unwrap_or_default()
}

pub(crate) fn build_transport_message(
    config: &Config,
    receiver_bridge: &Binary,
    recipient: &str,
    amount: Uint128,
) -> StdResult<TransportMessage> {
    Ok(TransportMessage {
        receiver: receiver_bridge.clone(),
        data: to_json_binary(&TransferPayload {
            recipient: recipient.to_string(),
            amount,
        })?,
        fee_denom: config.fee_denom.clone(),
    })
}

/// Pull `amount` from the sender into the bridge, burning it unless this is
/// the token's home chain.
fn pull_tokens_msgs(
    config: &Config,
    sender: &Addr,
    bridge: &Addr,
    amount: Uint128,
) -> StdResult<Vec<CosmosMsg>> {
    let mut messages: Vec<CosmosMsg> = vec![CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: sender.to_string(),
            recipient: bridge.to_string(),
            amount,
        })?,
        funds: vec![],
    })];

    if !config.is_home_chain {
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Burn { amount })?,
            funds: vec![],
        }));
    }
    Ok(messages)
}

/// Best-effort refund of `excess` to `to`.
///
/// The reply swallows a failed send, so the excess stays in the contract and
/// the transfer itself still succeeds.
fn refund_submsg(
    storage: &mut dyn Storage,
    config: &Config,
    to: &Addr,
    excess: Uint128,
) -> StdResult<Vec<SubMsg>> {
    if excess.is_zero() {
        return Ok(vec![]);
    }
    PENDING_REFUND.save(
        storage,
        &PendingRefund {
            to: to.clone(),
            amount: excess,
        },
    )?;
    Ok(vec![SubMsg::reply_always(
        BankMsg::Send {
            to_address: to.to_string(),
            amount: coins(excess.u128(), &config.fee_denom),
        },
        REFUND_REPLY_ID,
    )])
}
