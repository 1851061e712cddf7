//! Configuration management handlers.
//!
//! This module handles:
//! - Chain registry (setup/update/delete, custom fee repricing)
//! - Rate limit configuration per direction
//! - Transport router changes

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Uint128};

use crate::auth::{assert_not_paused, assert_owner, assert_timelock_owner};
use crate::chain_registry::{self, ChainSetup};
use crate::error::ContractError;
use crate::hash::to_hex;
use crate::rate_limiter::{update_bucket_config, RateLimitConfig, RateLimitDirection};
use crate::state::CONFIG;

// ============================================================================
// Chain Registry
// ============================================================================

/// Register the initial set of routes (one-time).
pub fn execute_setup_chains(
    deps: DepsMut,
    info: MessageInfo,
    chains: Vec<ChainSetup>,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    assert_not_paused(&CONFIG.load(deps.storage)?)?;

    chain_registry::setup_chains(deps.storage, &chains)?;

    let mut response = Response::new()
        .add_attribute("action", "setup_chains")
        .add_attribute("count", chains.len().to_string());
    for setup in &chains {
        response = response.add_attribute("chain_updated", setup.chain_selector.to_string());
    }
    Ok(response)
}

/// Create or overwrite a route.
pub fn execute_update_chain(
    deps: DepsMut,
    info: MessageInfo,
    setup: ChainSetup,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    assert_not_paused(&CONFIG.load(deps.storage)?)?;

    let chain = chain_registry::update_chain(deps.storage, &setup)?;

    Ok(Response::new()
        .add_attribute("action", "chain_updated")
        .add_attribute("chain_selector", setup.chain_selector.to_string())
        .add_attribute("bridge_address", to_hex(&setup.bridge_address))
        .add_attribute("bridge_address_hash", to_hex(&chain.bridge_address_hash))
        .add_attribute("fees", chain.fees.to_string())
        .add_attribute("is_source", chain.is_source.to_string())
        .add_attribute("is_destination", chain.is_destination.to_string())
        .add_attribute("is_custom", chain.is_custom.to_string()))
}

/// Remove a route.
pub fn execute_delete_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_selector: u64,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    assert_not_paused(&CONFIG.load(deps.storage)?)?;

    chain_registry::delete_chain(deps.storage, chain_selector);

    Ok(Response::new()
        .add_attribute("action", "chain_deleted")
        .add_attribute("chain_selector", chain_selector.to_string()))
}

/// Reprice a custom destination route.
pub fn execute_update_chain_fees(
    deps: DepsMut,
    info: MessageInfo,
    chain_selector: u64,
    bridge_address: Binary,
    fees: Uint128,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;
    assert_not_paused(&CONFIG.load(deps.storage)?)?;

    let chain =
        chain_registry::update_chain_fees(deps.storage, chain_selector, &bridge_address, fees)?;

    Ok(Response::new()
        .add_attribute("action", "chain_fees_updated")
        .add_attribute("chain_selector", chain_selector.to_string())
        .add_attribute("fees", chain.fees.to_string()))
}

// ============================================================================
// Rate Limit Configuration
// ============================================================================

/// Reconfigure one direction's bucket.
pub fn execute_update_rate_limit_config(
    deps: DepsMut,
    info: MessageInfo,
    direction: RateLimitDirection,
    config: RateLimitConfig,
) -> Result<Response, ContractError> {
    assert_timelock_owner(deps.storage, &info.sender)?;

    let bucket = update_bucket_config(deps.storage, direction, &config)?;

    Ok(Response::new()
        .add_attribute("action", "rate_limit_config_updated")
        .add_attribute("direction", direction.as_str())
        .add_attribute("capacity", bucket.capacity.to_string())
        .add_attribute("rate", bucket.rate.to_string())
        .add_attribute("is_disabled", bucket.is_disabled.to_string()))
}

// ============================================================================
// Transport
// ============================================================================

/// Point the bridge at a different router.
pub fn execute_update_router(
    deps: DepsMut,
    info: MessageInfo,
    router: String,
) -> Result<Response, ContractError> {
    assert_timelock_owner(deps.storage, &info.sender)?;

    let router = deps.api.addr_validate(&router)?;
    let mut config = CONFIG.load(deps.storage)?;
    let previous = std::mem::replace(&mut config.router, router.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "router_updated")
        .add_attribute("previous_router", previous)
        .add_attribute("router", router))
}
