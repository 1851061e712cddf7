//! Token bucket rate limiter.
//!
//! Refill is computed lazily from elapsed block time on every read, so no
//! background timer is needed. Every consuming write moves `last_updated` to
//! the current time; a stale timestamp would count the same elapsed time
//! twice on the next read.
//!
//! Two independent buckets live in storage, one per [`RateLimitDirection`].

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

/// Flow direction a bucket limits
#[cw_serde]
#[derive(Copy)]
pub enum RateLimitDirection {
    Inbound,
    Outbound,
}

impl RateLimitDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitDirection::Inbound => "inbound",
            RateLimitDirection::Outbound => "outbound",
        }
    }
}

/// Rate limit parameters supplied at instantiation and on reconfiguration
#[cw_serde]
pub struct RateLimitConfig {
    /// Maximum tokens the bucket can hold
    pub capacity: Uint128,
    /// Tokens refilled per second
    pub rate: Uint128,
    /// Whether consumption is skipped entirely
    pub is_disabled: bool,
}

#[cw_serde]
pub struct TokenBucket {
    /// Balance at `last_updated`
    pub tokens: Uint128,
    /// Block time (seconds) of the last consuming write
    pub last_updated: u64,
    pub capacity: Uint128,
    pub rate: Uint128,
    pub is_disabled: bool,
}

/// Inbound (settlement) bucket
pub const INBOUND_BUCKET: Item<TokenBucket> = Item::new("inbound_bucket");

/// Outbound (initiation) bucket
pub const OUTBOUND_BUCKET: Item<TokenBucket> = Item::new("outbound_bucket");

fn validate_config(capacity: Uint128, rate: Uint128) -> Result<(), ContractError> {
    if rate.is_zero() || rate >= capacity {
        return Err(ContractError::InvalidConfig { capacity, rate });
    }
    Ok(())
}

impl TokenBucket {
    /// Create a full bucket.
    pub fn new(config: &RateLimitConfig, now: u64) -> Result<Self, ContractError> {
        validate_config(config.capacity, config.rate)?;
        Ok(Self {
            tokens: config.capacity,
            last_updated: now,
            capacity: config.capacity,
            rate: config.rate,
            is_disabled: config.is_disabled,
        })
    }

    /// Tokens available at `now`, capped at capacity.
    pub fn available_tokens(&self, now: u64) -> Uint128 {
        if now <= self.last_updated {
            return self.tokens.min(self.capacity);
        }
        let elapsed = Uint128::from(now - self.last_updated);
        let refilled = self
            .tokens
            .saturating_add(elapsed.saturating_mul(self.rate));
        refilled.min(self.capacity)
    }

    /// Take `amount` tokens out of the bucket.
    ///
    /// Leaves the bucket untouched on failure.
    pub fn consume(
        &mut self,
        direction: RateLimitDirection,
        amount: Uint128,
        now: u64,
    ) -> Result<(), ContractError> {
        if amount.is_zero() || self.is_disabled {
            return Ok(());
        }

        let available = self.available_tokens(now);
        if available < amount {
            return Err(ContractError::RateLimitExceeded {
                direction: direction.as_str().to_string(),
                available,
                requested: amount,
            });
        }

        self.tokens = available - amount;
        self.last_updated = now;
        Ok(())
    }

    /// Replace capacity, rate and the disabled flag.
    ///
    /// The rate/capacity relationship is checked even when disabling, so a
    /// bucket cannot later be re-enabled with an invalid config. Balance and
    /// timestamp are left as they are.
    pub fn update_config(&mut self, config: &RateLimitConfig) -> Result<(), ContractError> {
        validate_config(config.capacity, config.rate)?;
        self.capacity = config.capacity;
        self.rate = config.rate;
        self.is_disabled = config.is_disabled;
        Ok(())
    }
}

fn bucket_item(direction: RateLimitDirection) -> Item<'static, TokenBucket> {
    match direction {
        RateLimitDirection::Inbound => INBOUND_BUCKET,
        RateLimitDirection::Outbound => OUTBOUND_BUCKET,
    }
}

pub fn load_bucket(
    storage: &dyn Storage,
    direction: RateLimitDirection,
) -> StdResult<TokenBucket> {
    bucket_item(direction).load(storage)
}

pub fn init_bucket(
    storage: &mut dyn Storage,
    direction: RateLimitDirection,
    config: &RateLimitConfig,
    now: u64,
) -> Result<(), ContractError> {
    let bucket = TokenBucket::new(config, now)?;
    bucket_item(direction).save(storage, &bucket)?;
    Ok(())
}

/// Consume capacity from the stored bucket for `direction`.
pub fn consume(
    storage: &mut dyn Storage,
    direction: RateLimitDirection,
    amount: Uint128,
    now: u64,
) -> Result<(), ContractError> {
    let item = bucket_item(direction);
    let mut bucket = item.load(storage)?;
    bucket.consume(direction, amount, now)?;
    item.save(storage, &bucket)?;
    Ok(())
}

pub fn update_bucket_config(
    storage: &mut dyn Storage,
    direction: RateLimitDirection,
    config: &RateLimitConfig,
) -> Result<TokenBucket, ContractError> {
    let item = bucket_item(direction);
    let mut bucket = item.load(storage)?;
    bucket.update_config(config)?;
    item.save(storage, &bucket)?;
    Ok(bucket)
}
