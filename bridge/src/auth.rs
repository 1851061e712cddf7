//! Guard checks called at the top of each handler.

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::{Config, OWNERSHIP};

/// Sender must hold the immediate owner slot.
pub fn assert_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    let ownership = OWNERSHIP.load(storage)?;
    if ownership.owner.as_ref() != Some(sender) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Sender must hold the time-locked owner slot.
pub fn assert_timelock_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    let ownership = OWNERSHIP.load(storage)?;
    if ownership.timelock_owner.as_ref() != Some(sender) {
        return Err(ContractError::UnauthorizedTimelock);
    }
    Ok(())
}

pub fn assert_not_paused(config: &Config) -> Result<(), ContractError> {
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    Ok(())
}
