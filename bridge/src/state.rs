//! State definitions for the token bridge contract
//!
//! Storage is split per component: configuration and ownership here, the
//! rate-limit buckets, chain registry, replay set and nonce alongside the
//! modules that own them.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::Item;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// CW20 token being bridged
    pub token: Addr,
    /// Messaging transport router
    pub router: Addr,
    /// Native denom in which transport and custom-path fees are paid
    pub fee_denom: String,
    /// Whether this instance lives on the token's home chain (lock/release)
    /// rather than a remote chain (burn/mint)
    pub is_home_chain: bool,
    /// Whether the bridge is currently paused
    pub paused: bool,
}

/// Two-tier ownership
///
/// `owner` handles day-to-day administration. `timelock_owner` is expected to
/// be a delay-enforcing contract and is the only slot allowed to reassign
/// either role. `None` means the slot was renounced.
#[cw_serde]
pub struct Ownership {
    pub owner: Option<Addr>,
    pub timelock_owner: Option<Addr>,
}

/// Outbound transfer awaiting the router's message id
#[cw_serde]
pub struct PendingDispatch {
    pub sender: Addr,
    pub dest_chain_selector: u64,
    pub receiver_bridge: Binary,
    pub recipient: String,
    pub amount: Uint128,
    pub fee: Uint128,
}

/// Excess fee refund awaiting its bank transfer result
#[cw_serde]
pub struct PendingRefund {
    pub to: Addr,
    pub amount: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:token-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id for the router dispatch submessage
pub const DISPATCH_REPLY_ID: u64 = 1;

/// Reply id for the best-effort excess fee refund
pub const REFUND_REPLY_ID: u64 = 2;

/// Reply id for the native balance withdrawal
pub const WITHDRAW_NATIVE_REPLY_ID: u64 = 3;

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Owner slots
pub const OWNERSHIP: Item<Ownership> = Item::new("ownership");

/// Outbound transfer context handed from `execute` to the dispatch reply
pub const PENDING_DISPATCH: Item<PendingDispatch> = Item::new("pending_dispatch");

/// Refund context handed from `execute` to the refund reply
pub const PENDING_REFUND: Item<PendingRefund> = Item::new("pending_refund");
