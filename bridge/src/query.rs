//! Query handlers for the token bridge contract.

use common::{FeeResponse, RouterQueryMsg};
use cosmwasm_std::{Binary, Deps, Env, StdResult, Uint128};

use crate::chain_registry::{get_chain, list_chains, Chain};
use crate::execute::build_transport_message;
use crate::hash::bridge_address_hash;
use crate::msg::{
    BridgeAddressHashResponse, ChainResponse, ChainsResponse, ConfigResponse, NonceResponse,
    OwnershipResponse, QuoteFeeResponse, RateLimitResponse, RequestProcessedResponse,
};
use crate::rate_limiter::{load_bucket, RateLimitDirection};
use crate::replay_guard::is_processed;
use crate::request_id::current_nonce;
use crate::state::{CONFIG, OWNERSHIP};

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        router: config.router,
        fee_denom: config.fee_denom,
        is_home_chain: config.is_home_chain,
        paused: config.paused,
    })
}

pub fn query_ownership(deps: Deps) -> StdResult<OwnershipResponse> {
    let ownership = OWNERSHIP.load(deps.storage)?;
    Ok(OwnershipResponse {
        owner: ownership.owner,
        timelock_owner: ownership.timelock_owner,
    })
}

// ============================================================================
// Chain Registry Queries
// ============================================================================

fn chain_response(chain_selector: u64, chain: Chain) -> ChainResponse {
    ChainResponse {
        chain_selector,
        bridge_address_hash: Binary::from(chain.bridge_address_hash.as_slice()),
        fees: chain.fees,
        is_source: chain.is_source,
        is_destination: chain.is_destination,
        is_custom: chain.is_custom,
    }
}

/// Route for `chain_selector`; unregistered selectors return a zeroed route.
pub fn query_chain(deps: Deps, chain_selector: u64) -> StdResult<ChainResponse> {
    let chain = get_chain(deps.storage, chain_selector)?;
    Ok(chain_response(chain_selector, chain))
}

pub fn query_chains(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ChainsResponse> {
    let chains = list_chains(deps.storage, start_after, limit)?
        .into_iter()
        .map(|(selector, chain)| chain_response(selector, chain))
        .collect();
    Ok(ChainsResponse { chains })
}

pub fn query_bridge_address_hash(bridge_address: Binary) -> BridgeAddressHashResponse {
    BridgeAddressHashResponse {
        hash: Binary::from(bridge_address_hash(&bridge_address).as_slice()),
    }
}

// ============================================================================
// Rate Limit Queries
// ============================================================================

/// Stored bucket state plus the capacity available at the current block.
pub fn query_rate_limit(
    deps: Deps,
    env: Env,
    direction: RateLimitDirection,
) -> StdResult<RateLimitResponse> {
    let bucket = load_bucket(deps.storage, direction)?;
    Ok(RateLimitResponse {
        direction,
        tokens: bucket.tokens,
        available: bucket.available_tokens(env.block.time.seconds()),
        last_updated: bucket.last_updated,
        capacity: bucket.capacity,
        rate: bucket.rate,
        is_disabled: bucket.is_disabled,
    })
}

// ============================================================================
// Request Queries
// ============================================================================

pub fn query_is_request_processed(
    deps: Deps,
    request_id: Binary,
) -> StdResult<RequestProcessedResponse> {
    Ok(RequestProcessedResponse {
        processed: is_processed(deps.storage, &request_id)?,
    })
}

pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        nonce: current_nonce(deps.storage)?,
    })
}

// ============================================================================
// Fee Queries
// ============================================================================

/// Fee an outbound transfer to `dest_chain_selector` would require.
///
/// Custom routes charge the registry's fixed fee; every other selector is
/// quoted by the router for the exact message the transfer would send.
pub fn query_quote_fee(
    deps: Deps,
    dest_chain_selector: u64,
    receiver_bridge: Binary,
    recipient: String,
    amount: Uint128,
) -> StdResult<QuoteFeeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let chain = get_chain(deps.storage, dest_chain_selector)?;

    let fee = if chain.is_custom {
        chain.fees
    } else {
        let message = build_transport_message(&config, &receiver_bridge, &recipient, amount)?;
        let response: FeeResponse = deps.querier.query_wasm_smart(
            &config.router,
            &RouterQueryMsg::GetFee {
                dest_chain_selector,
                message,
            },
        )?;
        response.fee
    };

    Ok(QuoteFeeResponse {
        fee,
        denom: config.fee_denom,
        is_custom: chain.is_custom,
    })
}
