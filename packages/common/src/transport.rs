//! Messaging transport interface.
//!
//! The router quotes a fee for a message, accepts the message together with
//! the fee in native funds, and reports the id it assigned through the
//! `message_id` attribute of its wasm event. Inbound messages are delivered
//! by the router calling the bridge's receive entry point with an
//! [`InboundMessage`].

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

/// Attribute key under which the router reports the assigned message id (hex)
pub const MESSAGE_ID_ATTRIBUTE: &str = "message_id";

/// Outbound message handed to the router
#[cw_serde]
pub struct TransportMessage {
    /// Bridge endpoint on the destination chain (raw address bytes)
    pub receiver: Binary,
    /// Opaque payload, a JSON encoded [`TransferPayload`] for token transfers
    pub data: Binary,
    /// Native denom the fee is paid in
    pub fee_denom: String,
}

/// Message delivered by the router to the destination bridge
#[cw_serde]
pub struct InboundMessage {
    /// Router-assigned message id
    pub message_id: Binary,
    /// Selector of the chain the message originates from
    pub source_chain_selector: u64,
    /// Bridge endpoint on the source chain (raw address bytes)
    pub sender: Binary,
    /// Opaque payload
    pub data: Binary,
}

/// Token transfer payload carried inside transport messages
#[cw_serde]
pub struct TransferPayload {
    /// Recipient on the destination chain, in that chain's textual format
    pub recipient: String,
    /// Amount in the token's smallest unit (no decimal scaling)
    pub amount: Uint128,
}

#[cw_serde]
pub enum RouterExecuteMsg {
    /// Dispatch a message; the quoted fee must be attached
    Send {
        dest_chain_selector: u64,
        message: TransportMessage,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RouterQueryMsg {
    #[returns(FeeResponse)]
    GetFee {
        dest_chain_selector: u64,
        message: TransportMessage,
    },
}

#[cw_serde]
pub struct FeeResponse {
    pub fee: Uint128,
}
