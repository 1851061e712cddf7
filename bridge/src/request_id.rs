//! Request id derivation for transfers that bypass the transport.
//!
//! # Byte Layout (256 bytes total, eight 32-byte words)
//! - nonce (uint256, left-padded)
//! - keccak256(local chain id)
//! - block time in nanoseconds (uint256, left-padded)
//! - canonical contract address (left-padded)
//! - destination chain selector (uint256, left-padded)
//! - keccak256(receiver bridge)
//! - amount (uint256, left-padded)
//! - keccak256(recipient)
//!
//! The nonce increases by exactly one per id, so two calls with identical
//! parameters in the same block still produce different ids.

use cosmwasm_std::{
    Api, Env, OverflowError, OverflowOperation, StdError, StdResult, Storage, Uint128,
};
use cw_storage_plus::Item;

use crate::error::ContractError;
use crate::hash::{bytes_word, keccak256, u128_word, u64_word};

/// Last nonce handed out (0 before the first id)
pub const REQUEST_NONCE: Item<u64> = Item::new("request_nonce");

/// Inputs describing the transfer an id is generated for
pub struct RequestIdInput<'a> {
    pub dest_chain_selector: u64,
    pub amount: Uint128,
    pub receiver_bridge: &'a [u8],
    pub recipient: &'a str,
}

pub fn current_nonce(storage: &dyn Storage) -> StdResult<u64> {
    Ok(REQUEST_NONCE.may_load(storage)?.unwrap_or(0))
}

/// Advance the nonce and derive the id for `input`.
pub fn next_request_id(
    storage: &mut dyn Storage,
    api: &dyn Api,
    env: &Env,
    input: &RequestIdInput,
) -> Result<([u8; 32], u64), ContractError> {
    let current = current_nonce(storage)?;
    let nonce = current.checked_add(1).ok_or_else(|| {
        StdError::overflow(OverflowError::new(OverflowOperation::Add, current, 1))
    })?;
    REQUEST_NONCE.save(storage, &nonce)?;

    let contract = api.addr_canonicalize(env.contract.address.as_str())?;
    let id = compute_request_id(
        nonce,
        &env.block.chain_id,
        env.block.time.nanos(),
        contract.as_slice(),
        input,
    );
    Ok((id, nonce))
}

pub fn compute_request_id(
    nonce: u64,
    chain_id: &str,
    timestamp_nanos: u64,
    contract: &[u8],
    input: &RequestIdInput,
) -> [u8; 32] {
    let words = [
        u64_word(nonce),
        keccak256(chain_id.as_bytes()),
        u64_word(timestamp_nanos),
        bytes_word(contract),
        u64_word(input.dest_chain_selector),
        keccak256(input.receiver_bridge),
        u128_word(input.amount.u128()),
        keccak256(input.recipient.as_bytes()),
    ];

    let mut data = [0u8; 256];
    for (i, word) in words.iter().enumerate() {
        data[i * 32..(i + 1) * 32].copy_from_slice(word);
    }
    keccak256(&data)
}
