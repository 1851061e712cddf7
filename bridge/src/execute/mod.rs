//! Execute handlers for the token bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - TransferTokens and TransferTokensCustom
//! - `incoming` - ReceiveMessage and ExecuteManualTransfer settlement
//! - `config` - Chain registry, rate limit and router management
//! - `withdraw` - Timelocked balance withdrawals
//! - `admin` - Pause, ownership and token minter handover

mod admin;
mod config;
mod incoming;
mod outgoing;
mod withdraw;

pub use admin::*;
pub use config::*;
pub use incoming::*;
pub use outgoing::*;
pub use withdraw::*;

use crate::hash::from_hex;

/// Empty strings and all-zero hex addresses (`0x000...0`) are zero recipients.
pub(crate) fn is_zero_recipient(recipient: &str) -> bool {
    let trimmed = recipient.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.starts_with("0x") {
        if let Ok(bytes) = from_hex(trimmed) {
            return bytes.iter().all(|b| *b == 0);
        }
    }
    false
}
