//! Serializable view of the vault's persisted state.
//!
//! Everything migration or monitoring tooling needs: the per-strategy
//! records in queue order and the global accounting figures.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::registry::StrategyRecord;

/// Persisted state of a vault at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
    pub address: Address,
    pub asset: Address,
    pub timestamp: u64,
    pub paused: bool,
    pub total_supply: U256,
    pub idle_assets: U256,
    pub total_assets: U256,
    pub free_assets: U256,
    pub locked_profit: U256,
    /// Raw locked amount as of `last_report`
    pub raw_locked_profit: U256,
    pub last_report: u64,
    pub locked_profit_duration: u64,
    pub total_debt: U256,
    pub total_debt_ratio: u64,
    /// Strategies in withdrawal priority order
    pub strategies: Vec<StrategyRecord>,
}

impl VaultSnapshot {
    /// Free assets per share, scaled by `scale`; `None` when no shares exist
    pub fn share_price(&self, scale: U256) -> Option<U256> {
        if self.total_supply.is_zero() {
            return None;
        }
        Some(self.free_assets * scale / self.total_supply)
    }
}
