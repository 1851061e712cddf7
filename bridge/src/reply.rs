//! Submessage reply handlers.
//!
//! - Router dispatch: reads the transport message id and announces the transfer
//! - Excess fee refund: best-effort, failures are swallowed
//! - Native withdrawal: failures surface as `NativeTransferFailed`

use common::MESSAGE_ID_ATTRIBUTE;
use cosmwasm_std::{DepsMut, Event, Reply, Response, StdError, SubMsgResult};

use crate::error::ContractError;
use crate::hash::to_hex;
use crate::state::{
    DISPATCH_REPLY_ID, PENDING_DISPATCH, PENDING_REFUND, REFUND_REPLY_ID,
    WITHDRAW_NATIVE_REPLY_ID,
};

pub fn handle_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DISPATCH_REPLY_ID => reply_dispatch(deps, msg.result),
        REFUND_REPLY_ID => reply_refund(deps, msg.result),
        WITHDRAW_NATIVE_REPLY_ID => reply_withdraw_native(msg.result),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

fn reply_dispatch(deps: DepsMut, result: SubMsgResult) -> Result<Response, ContractError> {
    let response = result.into_result().map_err(StdError::generic_err)?;
    let pending = PENDING_DISPATCH.load(deps.storage)?;
    PENDING_DISPATCH.remove(deps.storage);

    let message_id = find_message_id(&response.events).ok_or_else(|| {
        StdError::generic_err("router response did not include a message id")
    })?;

    Ok(Response::new()
        .add_attribute("action", "transfer_initiated")
        .add_attribute("message_id", message_id)
        .add_attribute("sender", pending.sender)
        .add_attribute(
            "dest_chain_selector",
            pending.dest_chain_selector.to_string(),
        )
        .add_attribute("receiver_bridge", to_hex(&pending.receiver_bridge))
        .add_attribute("recipient", pending.recipient)
        .add_attribute("amount", pending.amount.to_string())
        .add_attribute("fee", pending.fee.to_string()))
}

fn reply_refund(deps: DepsMut, result: SubMsgResult) -> Result<Response, ContractError> {
    let pending = PENDING_REFUND.load(deps.storage)?;
    PENDING_REFUND.remove(deps.storage);

    match result {
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("action", "excess_fee_refunded")
            .add_attribute("to", pending.to)
            .add_attribute("amount", pending.amount.to_string())),
        SubMsgResult::Err(err) => {
            deps.api.debug(&format!(
                "excess fee refund of {} to {} failed: {}",
                pending.amount, pending.to, err
            ));
            Ok(Response::new())
        }
    }
}

fn reply_withdraw_native(result: SubMsgResult) -> Result<Response, ContractError> {
    match result {
        SubMsgResult::Ok(_) => Ok(Response::new()),
        SubMsgResult::Err(reason) => Err(ContractError::NativeTransferFailed { reason }),
    }
}

/// First `message_id` attribute emitted by the router's wasm event.
fn find_message_id(events: &[Event]) -> Option<String> {
    events
        .iter()
        .filter(|e| e.ty == "wasm")
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == MESSAGE_ID_ATTRIBUTE)
        .map(|a| a.value.clone())
}
