//! Error types for the token bridge contract
//!
//! Every failure aborts the triggering call; the host rolls back all state
//! written during it. [`ContractError::kind`] groups the variants into the
//! bridge's error taxonomy.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

/// Coarse classification of [`ContractError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid rate/capacity relationship, invalid chain route, bad input encoding
    Configuration,
    /// Wrong owner tier, chain validation mismatch, paused state
    Authorization,
    /// Rate limit exceeded, insufficient fee attached
    Admission,
    /// Replay guard rejection
    DuplicateRequest,
    /// Zero recipient, zero amount, nothing to withdraw
    Value,
    /// Native or token transfer failure
    TransferFailure,
}

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only timelock owner can perform this action")]
    UnauthorizedTimelock,

    #[error("Unauthorized: only the router can deliver messages")]
    UnauthorizedRouter,

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Chain validation failed for selector {chain_selector}")]
    ChainValidationFailed { chain_selector: u64 },

    #[error("Token ownership cannot be transferred on the home chain")]
    TokenOwnershipLocked,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid rate limit config: rate {rate} must be non-zero and below capacity {capacity}")]
    InvalidConfig { capacity: Uint128, rate: Uint128 },

    #[error("Chains already initialized")]
    AlreadyInitialized,

    #[error("Invalid bridge address: endpoint identifier must not be empty")]
    InvalidBridgeAddress,

    #[error("Invalid fee for custom destination chain {chain_selector}")]
    InvalidFee { chain_selector: u64 },

    #[error("Invalid request id length: expected 32 bytes, got {got}")]
    InvalidRequestIdLength { got: usize },

    // ========================================================================
    // Admission Errors
    // ========================================================================

    #[error("Rate limit exceeded: {direction} available {available}, requested {requested}")]
    RateLimitExceeded {
        direction: String,
        available: Uint128,
        requested: Uint128,
    },

    #[error("Not enough fees: required {required}, provided {provided}")]
    NotEnoughFees { required: Uint128, provided: Uint128 },

    #[error("Unsupported funds denom: {denom}")]
    UnsupportedFundsDenom { denom: String },

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("Request id already processed: {request_id}")]
    RequestIdAlreadyProcessed { request_id: String },

    // ========================================================================
    // Value Errors
    // ========================================================================

    #[error("Recipient address must not be zero")]
    ZeroRecipientAddress,

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Native transfer failed: {reason}")]
    NativeTransferFailed { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Unauthorized
            | ContractError::UnauthorizedTimelock
            | ContractError::UnauthorizedRouter
            | ContractError::BridgePaused
            | ContractError::ChainValidationFailed { .. }
            | ContractError::TokenOwnershipLocked => ErrorKind::Authorization,

            ContractError::Std(_)
            | ContractError::InvalidConfig { .. }
            | ContractError::AlreadyInitialized
            | ContractError::InvalidBridgeAddress
            | ContractError::InvalidFee { .. }
            | ContractError::InvalidRequestIdLength { .. }
            | ContractError::UnknownReplyId { .. } => ErrorKind::Configuration,

            ContractError::RateLimitExceeded { .. }
            | ContractError::NotEnoughFees { .. }
            | ContractError::UnsupportedFundsDenom { .. } => ErrorKind::Admission,

            ContractError::RequestIdAlreadyProcessed { .. } => ErrorKind::DuplicateRequest,

            ContractError::ZeroRecipientAddress
            | ContractError::ZeroAmount
            | ContractError::NothingToWithdraw => ErrorKind::Value,

            ContractError::NativeTransferFailed { .. } => ErrorKind::TransferFailure,
        }
    }
}
