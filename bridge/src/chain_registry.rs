//! Chain registry.
//!
//! Maps a remote chain selector to the fingerprint of the bridge endpoint on
//! that chain, the fixed fee charged on the custom path, and the route flags.
//! [`validate_chain`] is the single authorization gate every transfer passes,
//! in either direction.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Bound, Item, Map};

use crate::error::ContractError;
use crate::hash::bridge_address_hash;

/// Stored route for one remote chain
#[cw_serde]
#[derive(Default)]
pub struct Chain {
    /// `keccak256(bridge_address)[12..32]`
    pub bridge_address_hash: [u8; 20],
    /// Fixed fee (fee denom) for the custom path
    pub fees: Uint128,
    /// Transfers may arrive from this chain
    pub is_source: bool,
    /// Transfers may be sent to this chain
    pub is_destination: bool,
    /// Reached through the operator path instead of the transport
    pub is_custom: bool,
}

/// Route registration input
#[cw_serde]
pub struct ChainSetup {
    pub chain_selector: u64,
    /// Full bridge endpoint identifier on the remote chain
    pub bridge_address: Binary,
    pub fees: Uint128,
    pub is_source: bool,
    pub is_destination: bool,
    pub is_custom: bool,
}

/// Routes keyed by chain selector
pub const CHAINS: Map<u64, Chain> = Map::new("chains");

/// Set once `setup_chains` has run
pub const CHAINS_INITIALIZED: Item<bool> = Item::new("chains_initialized");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

/// Bulk-register routes. Callable once per contract instance.
///
/// Entries are applied in order; an invalid entry fails the whole call and
/// the host discards the earlier writes.
pub fn setup_chains(
    storage: &mut dyn Storage,
    chains: &[ChainSetup],
) -> Result<(), ContractError> {
    if CHAINS_INITIALIZED.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::AlreadyInitialized);
    }
    CHAINS_INITIALIZED.save(storage, &true)?;

    for setup in chains {
        update_chain(storage, setup)?;
    }
    Ok(())
}

/// Create or overwrite the route for `setup.chain_selector`.
pub fn update_chain(
    storage: &mut dyn Storage,
    setup: &ChainSetup,
) -> Result<Chain, ContractError> {
    if setup.bridge_address.is_empty() {
        return Err(ContractError::InvalidBridgeAddress);
    }
    if setup.is_custom && setup.is_destination && setup.fees.is_zero() {
        return Err(ContractError::InvalidFee {
            chain_selector: setup.chain_selector,
        });
    }

    let chain = Chain {
        bridge_address_hash: bridge_address_hash(&setup.bridge_address),
        fees: setup.fees,
        is_source: setup.is_source,
        is_destination: setup.is_destination,
        is_custom: setup.is_custom,
    };
    CHAINS.save(storage, setup.chain_selector, &chain)?;
    Ok(chain)
}

pub fn delete_chain(storage: &mut dyn Storage, chain_selector: u64) {
    CHAINS.remove(storage, chain_selector);
}

/// Stored route, or the zeroed default when none is registered.
pub fn get_chain(storage: &dyn Storage, chain_selector: u64) -> StdResult<Chain> {
    Ok(CHAINS
        .may_load(storage, chain_selector)?
        .unwrap_or_default())
}

/// Check that `chain_selector` is registered for the requested direction and
/// path with the given endpoint fingerprint.
pub fn validate_chain(
    storage: &dyn Storage,
    chain_selector: u64,
    endpoint_hash: &[u8; 20],
    expect_source: bool,
    expect_custom: bool,
) -> Result<Chain, ContractError> {
    let chain = get_chain(storage, chain_selector)?;

    let direction_ok = if expect_source {
        chain.is_source
    } else {
        chain.is_destination
    };

    if &chain.bridge_address_hash != endpoint_hash
        || !direction_ok
        || chain.is_custom != expect_custom
    {
        return Err(ContractError::ChainValidationFailed { chain_selector });
    }
    Ok(chain)
}

/// Reprice a custom destination route.
///
/// The caller must re-supply the endpoint identifier, and the route must be
/// flagged both destination and custom.
pub fn update_chain_fees(
    storage: &mut dyn Storage,
    chain_selector: u64,
    bridge_address: &[u8],
    fees: Uint128,
) -> Result<Chain, ContractError> {
    let mut chain = validate_chain(
        storage,
        chain_selector,
        &bridge_address_hash(bridge_address),
        false,
        true,
    )?;
    if fees.is_zero() {
        return Err(ContractError::InvalidFee { chain_selector });
    }

    chain.fees = fees;
    CHAINS.save(storage, chain_selector, &chain)?;
    Ok(chain)
}

pub fn list_chains(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, Chain)>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);
    CHAINS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}
