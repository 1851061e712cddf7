//! Token Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `reply` - Submessage reply handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_delete_chain, execute_manual_transfer, execute_pause, execute_receive_message,
    execute_set_owner, execute_setup_chains, execute_transfer_token_ownership,
    execute_transfer_tokens, execute_transfer_tokens_custom, execute_unpause,
    execute_update_chain, execute_update_chain_fees, execute_update_rate_limit_config,
    execute_update_router, execute_withdraw_native, execute_withdraw_token, OwnerSlot,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_bridge_address_hash, query_chain, query_chains, query_config, query_current_nonce,
    query_is_request_processed, query_ownership, query_quote_fee, query_rate_limit,
};
use crate::rate_limiter::{init_bucket, RateLimitDirection};
use crate::reply::handle_reply;
use crate::request_id::REQUEST_NONCE;
use crate::state::{Config, Ownership, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, OWNERSHIP};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let timelock_owner = deps.api.addr_validate(&msg.timelock_owner)?;
    let token = deps.api.addr_validate(&msg.token)?;
    let router = deps.api.addr_validate(&msg.router)?;

    let now = env.block.time.seconds();
    init_bucket(
        deps.storage,
        RateLimitDirection::Inbound,
        &msg.inbound_rate_limit,
        now,
    )?;
    init_bucket(
        deps.storage,
        RateLimitDirection::Outbound,
        &msg.outbound_rate_limit,
        now,
    )?;

    let config = Config {
        token: token.clone(),
        router: router.clone(),
        fee_denom: msg.fee_denom,
        is_home_chain: msg.is_home_chain,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: Some(owner.clone()),
            timelock_owner: Some(timelock_owner.clone()),
        },
    )?;
    REQUEST_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("timelock_owner", timelock_owner)
        .add_attribute("token", token)
        .add_attribute("router", router)
        .add_attribute("is_home_chain", config.is_home_chain.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound
        ExecuteMsg::TransferTokens {
            dest_chain_selector,
            receiver_bridge,
            recipient,
            amount,
        } => execute_transfer_tokens(
            deps,
            env,
            info,
            dest_chain_selector,
            receiver_bridge,
            recipient,
            amount,
        ),
        ExecuteMsg::TransferTokensCustom {
            dest_chain_selector,
            receiver_bridge,
            recipient,
            amount,
        } => execute_transfer_tokens_custom(
            deps,
            env,
            info,
            dest_chain_selector,
            receiver_bridge,
            recipient,
            amount,
        ),

        // Inbound
        ExecuteMsg::ReceiveMessage(message) => execute_receive_message(deps, env, info, message),
        ExecuteMsg::ExecuteManualTransfer {
            request_id,
            source_chain_selector,
            sender_bridge,
            recipient,
            amount,
        } => execute_manual_transfer(
            deps,
            env,
            info,
            request_id,
            source_chain_selector,
            sender_bridge,
            recipient,
            amount,
        ),

        // Chain registry
        ExecuteMsg::SetupChains { chains } => execute_setup_chains(deps, info, chains),
        ExecuteMsg::UpdateChain { chain } => execute_update_chain(deps, info, chain),
        ExecuteMsg::DeleteChain { chain_selector } => {
            execute_delete_chain(deps, info, chain_selector)
        }
        ExecuteMsg::UpdateChainFees {
            chain_selector,
            bridge_address,
            fees,
        } => execute_update_chain_fees(deps, info, chain_selector, bridge_address, fees),

        // Timelocked configuration
        ExecuteMsg::UpdateRateLimitConfig { direction, config } => {
            execute_update_rate_limit_config(deps, info, direction, config)
        }
        ExecuteMsg::UpdateRouter { router } => execute_update_router(deps, info, router),
        ExecuteMsg::WithdrawToken { recipient } => {
            execute_withdraw_token(deps, env, info, recipient)
        }
        ExecuteMsg::WithdrawNative { recipient } => {
            execute_withdraw_native(deps, env, info, recipient)
        }
        ExecuteMsg::TransferTokenOwnership { new_owner } => {
            execute_transfer_token_ownership(deps, info, new_owner)
        }

        // Ownership & pause
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_set_owner(deps, info, OwnerSlot::Owner, Some(new_owner))
        }
        ExecuteMsg::TransferTimelockOwnership { new_timelock_owner } => {
            execute_set_owner(deps, info, OwnerSlot::Timelock, Some(new_timelock_owner))
        }
        ExecuteMsg::RenounceOwnership {} => execute_set_owner(deps, info, OwnerSlot::Owner, None),
        ExecuteMsg::RenounceTimelockOwnership {} => {
            execute_set_owner(deps, info, OwnerSlot::Timelock, None)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_reply(deps, msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Ownership {} => to_json_binary(&query_ownership(deps)?),
        QueryMsg::Chain { chain_selector } => to_json_binary(&query_chain(deps, chain_selector)?),
        QueryMsg::Chains { start_after, limit } => {
            to_json_binary(&query_chains(deps, start_after, limit)?)
        }
        QueryMsg::RateLimit { direction } => {
            to_json_binary(&query_rate_limit(deps, env, direction)?)
        }
        QueryMsg::IsRequestProcessed { request_id } => {
            to_json_binary(&query_is_request_processed(deps, request_id)?)
        }
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::QuoteFee {
            dest_chain_selector,
            receiver_bridge,
            recipient,
            amount,
        } => to_json_binary(&query_quote_fee(
            deps,
            dest_chain_selector,
            receiver_bridge,
            recipient,
            amount,
        )?),
        QueryMsg::BridgeAddressHash { bridge_address } => {
            to_json_binary(&query_bridge_address_hash(bridge_address))
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
