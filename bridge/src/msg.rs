//! Message types for the token bridge contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use common::InboundMessage;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::chain_registry::ChainSetup;
use crate::rate_limiter::{RateLimitConfig, RateLimitDirection};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Immediate owner for day-to-day administration
    pub owner: String,
    /// Time-locked owner for sensitive operations
    pub timelock_owner: String,
    /// CW20 token being bridged
    pub token: String,
    /// Messaging transport router
    pub router: String,
    /// Native denom in which fees are paid
    pub fee_denom: String,
    /// Whether this is the token's home chain (lock/release instead of burn/mint)
    pub is_home_chain: bool,
    /// Inbound (settlement) rate limit
    pub inbound_rate_limit: RateLimitConfig,
    /// Outbound (initiation) rate limit
    pub outbound_rate_limit: RateLimitConfig,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound Transfers
    // ========================================================================
    /// Send tokens to a transport-connected chain.
    ///
    /// Authorization: Anyone (requires CW20 allowance for `amount`)
    ///
    /// The transport fee is paid in `fee_denom` funds attached to this
    /// message; any excess is refunded on a best-effort basis.
    TransferTokens {
        dest_chain_selector: u64,
        /// Bridge endpoint on the destination chain
        receiver_bridge: Binary,
        /// Recipient on the destination chain
        recipient: String,
        amount: Uint128,
    },

    /// Send tokens to a custom (operator-settled) chain.
    ///
    /// Authorization: Anyone (requires CW20 allowance for `amount`)
    ///
    /// The fee is the registry's fixed fee for the destination. The transfer
    /// is announced through the response attributes only.
    TransferTokensCustom {
        dest_chain_selector: u64,
        receiver_bridge: Binary,
        recipient: String,
        amount: Uint128,
    },

    // ========================================================================
    // Inbound Settlement
    // ========================================================================
    /// Transport delivery callback
    ///
    /// Authorization: Router only
    ReceiveMessage(InboundMessage),

    /// Operator settlement of a custom-path transfer
    ///
    /// Authorization: Owner only
    ExecuteManualTransfer {
        /// 32-byte request id announced on the source chain
        request_id: Binary,
        source_chain_selector: u64,
        /// Bridge endpoint on the source chain
        sender_bridge: Binary,
        /// Local recipient address
        recipient: String,
        amount: Uint128,
    },

    // ========================================================================
    // Chain Registry
    // ========================================================================
    /// One-time bulk registration
    ///
    /// Authorization: Owner only
    SetupChains { chains: Vec<ChainSetup> },

    /// Create or overwrite a route
    ///
    /// Authorization: Owner only
    UpdateChain { chain: ChainSetup },

    /// Remove a route
    ///
    /// Authorization: Owner only
    DeleteChain { chain_selector: u64 },

    /// Reprice a custom destination route
    ///
    /// Authorization: Owner only
    UpdateChainFees {
        chain_selector: u64,
        bridge_address: Binary,
        fees: Uint128,
    },

    // ========================================================================
    // Timelocked Configuration
    // ========================================================================
    /// Authorization: Timelock owner only
    UpdateRateLimitConfig {
        direction: RateLimitDirection,
        config: RateLimitConfig,
    },

    /// Authorization: Timelock owner only
    UpdateRouter { router: String },

    /// Withdraw the bridge's whole CW20 balance
    ///
    /// Authorization: Timelock owner only
    WithdrawToken { recipient: String },

    /// Withdraw the bridge's whole `fee_denom` balance
    ///
    /// Authorization: Timelock owner only
    WithdrawNative { recipient: String },

    /// Hand the CW20 minter role to another address (remote chains only)
    ///
    /// Authorization: Timelock owner only
    TransferTokenOwnership { new_owner: String },

    // ========================================================================
    // Ownership & Pause
    // ========================================================================
    /// Authorization: Timelock owner only
    TransferOwnership { new_owner: String },

    /// Authorization: Timelock owner only
    TransferTimelockOwnership { new_timelock_owner: String },

    /// Authorization: Timelock owner only
    RenounceOwnership {},

    /// Authorization: Timelock owner only
    RenounceTimelockOwnership {},

    /// Authorization: Owner only
    Pause {},

    /// Authorization: Owner only
    Unpause {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(OwnershipResponse)]
    Ownership {},

    /// Route for a selector (zeroed when unregistered)
    #[returns(ChainResponse)]
    Chain { chain_selector: u64 },

    #[returns(ChainsResponse)]
    Chains {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Bucket state and currently available capacity
    #[returns(RateLimitResponse)]
    RateLimit { direction: RateLimitDirection },

    #[returns(RequestProcessedResponse)]
    IsRequestProcessed { request_id: Binary },

    /// Last nonce used for a custom-path request id
    #[returns(NonceResponse)]
    CurrentNonce {},

    /// Fee an outbound transfer would require
    #[returns(QuoteFeeResponse)]
    QuoteFee {
        dest_chain_selector: u64,
        receiver_bridge: Binary,
        recipient: String,
        amount: Uint128,
    },

    /// 20-byte fingerprint the registry stores for an endpoint identifier
    #[returns(BridgeAddressHashResponse)]
    BridgeAddressHash { bridge_address: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub router: Addr,
    pub fee_denom: String,
    pub is_home_chain: bool,
    pub paused: bool,
}

#[cw_serde]
pub struct OwnershipResponse {
    pub owner: Option<Addr>,
    pub timelock_owner: Option<Addr>,
}

#[cw_serde]
pub struct ChainResponse {
    pub chain_selector: u64,
    pub bridge_address_hash: Binary,
    pub fees: Uint128,
    pub is_source: bool,
    pub is_destination: bool,
    pub is_custom: bool,
}

#[cw_serde]
pub struct ChainsResponse {
    pub chains: Vec<ChainResponse>,
}

#[cw_serde]
pub struct RateLimitResponse {
    pub direction: RateLimitDirection,
    pub tokens: Uint128,
    pub available: Uint128,
    pub last_updated: u64,
    pub capacity: Uint128,
    pub rate: Uint128,
    pub is_disabled: bool,
}

#[cw_serde]
pub struct RequestProcessedResponse {
    pub processed: bool,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct QuoteFeeResponse {
    pub fee: Uint128,
    pub denom: String,
    pub is_custom: bool,
}

#[cw_serde]
pub struct BridgeAddressHashResponse {
    pub hash: Binary,
}
