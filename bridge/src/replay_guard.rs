//! One-shot gate for operator-submitted settlements.
//!
//! Once a request id is marked it stays marked for the lifetime of the
//! contract. The mark is written before the guarded settlement runs.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::hash::to_hex;

/// Processed request ids
pub const PROCESSED_REQUESTS: Map<&[u8], bool> = Map::new("processed_requests");

/// Mark `request_id` as processed, failing if it already was.
pub fn guard_once(storage: &mut dyn Storage, request_id: &[u8; 32]) -> Result<(), ContractError> {
    if is_processed(storage, request_id)? {
        return Err(ContractError::RequestIdAlreadyProcessed {
            request_id: to_hex(request_id),
        });
    }
    PROCESSED_REQUESTS.save(storage, request_id, &true)?;
    Ok(())
}

pub fn is_processed(storage: &dyn Storage, request_id: &[u8]) -> StdResult<bool> {
    Ok(PROCESSED_REQUESTS
        .may_load(storage, request_id)?
        .unwrap_or(false))
}
