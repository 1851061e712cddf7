//! Common - Shared Types for the Token Bridge Contracts
//!
//! This package defines the interface between the bridge and the cross-chain
//! messaging transport (the "router"). Both the bridge contract and the
//! router mocks used in tests depend on it.

pub mod transport;

pub use transport::{
    FeeResponse, InboundMessage, RouterExecuteMsg, RouterQueryMsg, TransferPayload,
    TransportMessage, MESSAGE_ID_ATTRIBUTE,
};
