//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause contract
//! - Ownership transfer and renouncement for both owner slots
//! - Handing the token's minter role away (remote chains only)

use cosmwasm_std::{to_json_binary, DepsMut, MessageInfo, Response, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::auth::{assert_owner, assert_timelock_owner};
use crate::error::ContractError;
use crate::state::{CONFIG, OWNERSHIP};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the contract (stops transfers, settlements and registry changes).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

/// Unpause the contract.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

// ============================================================================
// Ownership
// ============================================================================

/// Which owner slot an ownership change targets
#[derive(Clone, Copy)]
pub enum OwnerSlot {
    Owner,
    Timelock,
}

impl OwnerSlot {
    fn as_str(&self) -> &'static str {
        match self {
            OwnerSlot::Owner => "owner",
            OwnerSlot::Timelock => "timelock_owner",
        }
    }
}

/// Assign (`Some`) or renounce (`None`) an owner slot.
pub fn execute_set_owner(
    deps: DepsMut,
    info: MessageInfo,
    slot: OwnerSlot,
    new_owner: Option<String>,
) -> Result<Response, ContractError> {
    assert_timelock_owner(deps.storage, &info.sender)?;

    let new_owner = new_owner
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let mut ownership = OWNERSHIP.load(deps.storage)?;
    let previous = match slot {
        OwnerSlot::Owner => std::mem::replace(&mut ownership.owner, new_owner.clone()),
        OwnerSlot::Timelock => std::mem::replace(&mut ownership.timelock_owner, new_owner.clone()),
    };
    OWNERSHIP.save(deps.storage, &ownership)?;

    Ok(Response::new()
        .add_attribute("action", "ownership_transferred")
        .add_attribute("role", slot.as_str())
        .add_attribute(
            "previous_owner",
            previous.map(String::from).unwrap_or_default(),
        )
        .add_attribute("new_owner", new_owner.map(String::from).unwrap_or_default()))
}

// ============================================================================
// Token Ownership
// ============================================================================

/// Hand the CW20 minter role to `new_owner`.
///
/// Refused on the home chain: the canonical token's control never leaves the
/// bridge there.
pub fn execute_transfer_token_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    assert_timelock_owner(deps.storage, &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    if config.is_home_chain {
        return Err(ContractError::TokenOwnershipLocked);
    }
    let new_owner = deps.api.addr_validate(&new_owner)?;

    let msg = WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::UpdateMinter {
            new_minter: Some(new_owner.to_string()),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "token_ownership_transferred")
        .add_attribute("token", config.token)
        .add_attribute("new_owner", new_owner))
}
