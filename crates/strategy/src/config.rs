//! Strategy configuration.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yvault_rs_vault::{Result, VaultError, MAX_BPS};

/// Default slippage bound: at least 99% of the quoted output must come back.
pub const DEFAULT_SLIP: u64 = 9_900;

/// Highest performance fee a strategy may charge on harvested rewards, in bps.
pub const MAX_FEE: u64 = 5_000;

fn default_slip() -> u64 {
    DEFAULT_SLIP
}

/// Construction parameters for a [`crate::BaseStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Address the strategy holds funds under.
    pub address: Address,
    /// The vault the strategy reports to.
    pub vault: Address,
    /// Base asset, must match the vault's.
    pub asset: Address,
    /// Holder of the admin role.
    pub admin: Address,
    /// Receiver of the performance fee.
    pub treasury: Address,
    /// Minimum share of a quoted output accepted on invest and withdraw, in bps.
    #[serde(default = "default_slip")]
    pub slip: u64,
    /// Share of harvested proceeds sent to the treasury, in bps.
    #[serde(default)]
    pub fee: u64,
}

impl StrategyConfig {
    /// Config with the default slippage bound, no fee and the admin as treasury.
    pub fn new(address: Address, vault: Address, asset: Address, admin: Address) -> Self {
        Self {
            address,
            vault,
            asset,
            admin,
            treasury: admin,
            slip: DEFAULT_SLIP,
            fee: 0,
        }
    }

    /// Check every field against its bounds.
    pub fn validate(&self) -> Result<()> {
        if self.address.is_zero() || self.vault.is_zero() || self.asset.is_zero() {
            return Err(VaultError::Zero);
        }
        if self.treasury.is_zero() {
            return Err(VaultError::Zero);
        }
        validate_slip(self.slip)?;
        validate_fee(self.fee)
    }

    /// Slippage bound as a fraction, e.g. 0.99.
    pub fn slip_ratio(&self) -> Decimal {
        bps_to_decimal(self.slip)
    }

    /// Performance fee as a fraction, e.g. 0.1.
    pub fn fee_ratio(&self) -> Decimal {
        bps_to_decimal(self.fee)
    }
}

pub(crate) fn validate_slip(slip: u64) -> Result<()> {
    if slip > MAX_BPS {
        return Err(VaultError::InvalidValue(U256::from(slip)));
    }
    Ok(())
}

pub(crate) fn validate_fee(fee: u64) -> Result<()> {
    if fee > MAX_FEE {
        return Err(VaultError::AboveMaximum {
            value: U256::from(fee),
            max: U256::from(MAX_FEE),
        });
    }
    Ok(())
}

/// Convert basis points to a decimal fraction (10_000 bps = 1).
pub fn bps_to_decimal(bps: u64) -> Decimal {
    Decimal::from(bps) / Decimal::from(MAX_BPS)
}
