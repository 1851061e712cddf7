//! Token Bridge Contract - Cross-Chain CW20 Bridging
//!
//! Moves a single CW20 token between chains over two paths:
//!
//! # Transport Path
//! 1. User calls `TransferTokens` with the router fee attached
//! 2. The bridge pulls (and on remote chains burns) the tokens, then hands a
//!    message to the router
//! 3. On the destination, the router delivers it through `ReceiveMessage`
//!    and the bridge releases (or mints) the tokens
//!
//! # Custom Path
//! 1. User calls `TransferTokensCustom` and pays the registry's fixed fee
//! 2. The bridge announces a request id derived from a local nonce
//! 3. The owner settles it on the destination with `ExecuteManualTransfer`,
//!    guarded against replay by the request id
//!
//! # Safety
//! - Chain registry check on every transfer, in either direction
//! - Token bucket rate limits per direction
//! - Two-tier ownership (immediate owner and time-locked owner)
//! - Emergency pause

pub mod auth;
pub mod chain_registry;
pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod rate_limiter;
pub mod replay_guard;
mod reply;
pub mod request_id;
pub mod state;

pub use crate::error::{ContractError, ErrorKind};
pub use crate::hash::{bridge_address_hash, keccak256};
