//! Strategy registry.
//!
//! An ordered withdrawal queue of strategies plus per-strategy debt and debt
//! ratio bookkeeping. Queue order is draw-down priority: withdrawals pull from
//! the head first, new strategies join at the tail.
//!
//! Invariants maintained by every method:
//! - `total_debt_ratio` equals the sum of the registered strategies' ratios
//! - `total_debt_ratio <= MAX_TOTAL_DEBT_RATIO`
//! - `total_debt` equals the sum of the registered strategies' debt
//! - `queue.len() <= MAX_QUEUE_LENGTH`, and every queued address has an entry

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};
use crate::math::min;
use crate::strategy::Strategy;

/// Upper bound on the sum of all debt ratios
pub const MAX_TOTAL_DEBT_RATIO: u64 = 3600;

/// Maximum number of strategies in the queue
pub const MAX_QUEUE_LENGTH: usize = 20;

/// A registered strategy and the vault's bookkeeping for it
#[derive(Debug, Clone)]
pub struct StrategyEntry {
    pub strategy: Box<dyn Strategy>,
    /// Value the strategy reported at its last reconciliation, adjusted by lends and collects
    pub debt: U256,
    /// Target share of total vault assets, relative to the total debt ratio
    pub debt_ratio: u64,
}

/// Read-only view of a strategy's bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRecord {
    pub strategy: Address,
    pub added: bool,
    pub debt: U256,
    pub debt_ratio: u64,
}

/// Ordered strategy queue with debt bookkeeping
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    queue: Vec<Address>,
    entries: HashMap<Address, StrategyEntry>,
    total_debt: U256,
    total_debt_ratio: u64,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strategies in withdrawal priority order
    pub fn queue(&self) -> &[Address] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn total_debt(&self) -> U256 {
        self.total_debt
    }

    pub fn total_debt_ratio(&self) -> u64 {
        self.total_debt_ratio
    }

    pub fn contains(&self, strategy: Address) -> bool {
        self.entries.contains_key(&strategy)
    }

    pub fn get(&self, strategy: Address) -> Result<&StrategyEntry> {
        self.entries
            .get(&strategy)
            .ok_or(VaultError::NotStrategy { strategy })
    }

    pub fn get_mut(&mut self, strategy: Address) -> Result<&mut StrategyEntry> {
        self.entries
            .get_mut(&strategy)
            .ok_or(VaultError::NotStrategy { strategy })
    }

    /// Bookkeeping for `strategy`; unregistered strategies read as not added
    pub fn record(&self, strategy: Address) -> StrategyRecord {
        match self.entries.get(&strategy) {
            Some(entry) => StrategyRecord {
                strategy,
                added: true,
                debt: entry.debt,
                debt_ratio: entry.debt_ratio,
            },
            None => StrategyRecord {
                strategy,
                added: false,
                debt: U256::ZERO,
                debt_ratio: 0,
            },
        }
    }

    /// Records for every queued strategy, in queue order
    pub fn records(&self) -> Vec<StrategyRecord> {
        self.queue.iter().map(|s| self.record(*s)).collect()
    }

    /// Append a strategy to the tail of the queue.
    ///
    /// The strategy must point back at `vault` and share its `asset`.
    pub fn add(
        &mut self,
        strategy: Box<dyn Strategy>,
        debt_ratio: u64,
        vault: Address,
        asset: Address,
    ) -> Result<()> {
        let address = strategy.address();
        if strategy.vault() != vault {
            return Err(VaultError::StrategyDoesNotBelongToQueue { strategy: address });
        }
        if strategy.asset() != asset {
            return Err(VaultError::AssetMismatch {
                expected: asset,
                actual: strategy.asset(),
            });
        }
        if self.contains(address) {
            return Err(VaultError::AlreadyStrategy { strategy: address });
        }
        if self.queue.len() >= MAX_QUEUE_LENGTH {
            return Err(VaultError::StrategyQueueFull {
                max: MAX_QUEUE_LENGTH,
            });
        }
        let total = check_total_debt_ratio(self.total_debt_ratio, debt_ratio)?;

        self.queue.push(address);
        self.entries.insert(
            address,
            StrategyEntry {
                strategy,
                debt: U256::ZERO,
                debt_ratio,
            },
        );
        self.total_debt_ratio = total;
        Ok(())
    }

    /// Delete a strategy, shifting the rest of the queue left.
    ///
    /// Any remaining debt is written off from `total_debt`; callers collect
    /// it first.
    pub fn remove(&mut self, strategy: Address) -> Result<StrategyEntry> {
        let entry = self
            .entries
            .remove(&strategy)
            .ok_or(VaultError::NotStrategy { strategy })?;
        self.queue.retain(|s| *s != strategy);
        self.total_debt_ratio -= entry.debt_ratio;
        self.total_debt = self.total_debt.saturating_sub(entry.debt);
        Ok(entry)
    }

    /// Change a strategy's debt ratio
    pub fn set_debt_ratio(&mut self, strategy: Address, debt_ratio: u64) -> Result<()> {
        let current = self.get(strategy)?.debt_ratio;
        if current == debt_ratio {
            return Err(VaultError::AlreadyValue);
        }
        let total = check_total_debt_ratio(self.total_debt_ratio - current, debt_ratio)?;
        self.get_mut(strategy)?.debt_ratio = debt_ratio;
        self.total_debt_ratio = total;
        Ok(())
    }

    /// Swap two positions in the withdrawal queue
    pub fn swap_positions(&mut self, i: usize, j: usize) -> Result<()> {
        let len = self.queue.len();
        for index in [i, j] {
            if index >= len {
                return Err(VaultError::QueueIndexOutOfBounds { index, len });
            }
        }
        self.queue.swap(i, j);
        Ok(())
    }

    /// Replace a strategy's recorded debt with its reported value.
    ///
    /// Returns `(gain, loss)` relative to the previous record.
    pub fn record_debt(&mut self, strategy: Address, assets: U256) -> Result<(U256, U256)> {
        let entry = self.get_mut(strategy)?;
        let debt = entry.debt;
        entry.debt = assets;

        if assets > debt {
            let gain = assets - debt;
            self.total_debt += gain;
            Ok((gain, U256::ZERO))
        } else {
            let loss = debt - assets;
            self.total_debt -= loss;
            Ok((U256::ZERO, loss))
        }
    }

    /// Add lent assets to a strategy's debt
    pub fn increase_debt(&mut self, strategy: Address, amount: U256) -> Result<()> {
        self.get_mut(strategy)?.debt += amount;
        self.total_debt += amount;
        Ok(())
    }

    /// Reduce a strategy's debt by what it paid back, never below zero.
    ///
    /// Returns the amount actually written down.
    pub fn decrease_debt(&mut self, strategy: Address, amount: U256) -> Result<U256> {
        let entry = self.get_mut(strategy)?;
        let repaid = min(entry.debt, amount);
        entry.debt -= repaid;
        self.total_debt -= repaid;
        Ok(repaid)
    }
}

fn check_total_debt_ratio(base: u64, added: u64) -> Result<u64> {
    let total = base.saturating_add(added);
    if total > MAX_TOTAL_DEBT_RATIO {
        return Err(VaultError::AboveMaximum {
            value: U256::from(total),
            max: U256::from(MAX_TOTAL_DEBT_RATIO),
        });
    }
    Ok(total)
}
