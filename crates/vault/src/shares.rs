//! Share accounting.
//!
//! Converts between assets and shares with proportional math over the share
//! supply. Deposits and mints are priced against `total_assets`, which
//! includes profit that is still locked; withdrawals and redemptions are
//! priced against `free_assets`, which excludes it. Rounding always favors
//! the vault:
//!
//! | Operation | Denominator    | Rounds |
//! |-----------|----------------|--------|
//! | deposit   | total assets   | shares down |
//! | mint      | total assets   | assets up   |
//! | withdraw  | free assets    | shares up   |
//! | redeem    | free assets    | assets down |
//!
//! An empty share supply converts 1:1.

use alloy_primitives::U256;

use crate::error::{Result, VaultError};
use crate::math::{mul_div, RoundingDirection};

/// Point-in-time view of the figures share math depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareAccounting {
    pub total_supply: U256,
    pub total_assets: U256,
    pub free_assets: U256,
}

impl ShareAccounting {
    pub fn new(total_supply: U256, total_assets: U256, free_assets: U256) -> Self {
        Self {
            total_supply,
            total_assets,
            free_assets,
        }
    }

    /// Shares `assets` is worth at the deposit price
    pub fn convert_to_shares(&self, assets: U256) -> Result<U256> {
        self.to_shares(assets, self.total_assets, RoundingDirection::Down)
    }

    /// Assets `shares` can be redeemed for
    pub fn convert_to_assets(&self, shares: U256) -> Result<U256> {
        self.to_assets(shares, self.free_assets, RoundingDirection::Down)
    }

    /// Shares minted for depositing `assets`
    pub fn preview_deposit(&self, assets: U256) -> Result<U256> {
        self.to_shares(assets, self.total_assets, RoundingDirection::Down)
    }

    /// Assets pulled for minting `shares`
    pub fn preview_mint(&self, shares: U256) -> Result<U256> {
        self.to_assets(shares, self.total_assets, RoundingDirection::Up)
    }

    /// Shares burned for withdrawing `assets`
    pub fn preview_withdraw(&self, assets: U256) -> Result<U256> {
        self.to_shares(assets, self.free_assets, RoundingDirection::Up)
    }

    /// Assets paid out for redeeming `shares`
    pub fn preview_redeem(&self, shares: U256) -> Result<U256> {
        self.to_assets(shares, self.free_assets, RoundingDirection::Down)
    }

    fn to_shares(&self, assets: U256, denominator: U256, rounding: RoundingDirection) -> Result<U256> {
        if self.total_supply.is_zero() {
            return Ok(assets);
        }
        if denominator.is_zero() {
            return Err(VaultError::DivisionByZero);
        }
        Ok(mul_div(assets, self.total_supply, denominator, rounding))
    }

    fn to_assets(&self, shares: U256, numerator: U256, rounding: RoundingDirection) -> Result<U256> {
        if self.total_supply.is_zero() {
            return Ok(shares);
        }
        Ok(mul_div(shares, numerator, self.total_supply, rounding))
    }
}
