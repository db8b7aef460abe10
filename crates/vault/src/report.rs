//! Report engine: reconciliation and rebalancing of strategies.
//!
//! A report compares a strategy's live value with the debt the vault has on
//! record for it:
//!
//! 1. `assets = strategy.total_assets()`, `debt = recorded debt`
//! 2. the recorded debt becomes `assets`
//! 3. a gain (`assets > debt`) is added to total debt and locked
//! 4. a loss (`debt > assets`) is removed from total debt and eats into the
//!    locked buffer, floored at zero
//! 5. the target allocation is `total_assets * debt_ratio / total_debt_ratio`
//! 6. the difference to the target is lent to or collected from the strategy
//!
//! Batch operations checkpoint the locked-profit clock once, before the
//! loop, so every strategy in the batch is reconciled against the same tick.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::events::VaultEvent;
use crate::ledger::Ledger;
use crate::math::mul_div_down;
use crate::vault::Vault;

/// What a single report did to one strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub strategy: Address,
    pub gain: U256,
    pub loss: U256,
    /// Target allocation computed from the debt ratio
    pub target: U256,
    /// Assets moved from the vault into the strategy
    pub lent: U256,
    /// Assets pulled back from the strategy
    pub collected: U256,
    /// Recorded debt after rebalancing
    pub debt: U256,
}

impl Vault {
    /// Reconcile and rebalance one strategy
    pub fn report(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        strategy: Address,
        timestamp: u64,
    ) -> Result<ReportOutcome> {
        self.transact(ledger, |vault, ledger| {
            vault.ensure_keeper(caller)?;
            vault.locked_profit.checkpoint(timestamp);
            vault.report_one(ledger, strategy, timestamp)
        })
    }

    /// Reconcile and rebalance every strategy in queue order
    pub fn report_all(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        timestamp: u64,
    ) -> Result<Vec<ReportOutcome>> {
        self.transact(ledger, |vault, ledger| {
            vault.ensure_keeper(caller)?;
            vault.locked_profit.checkpoint(timestamp);
            vault
                .registry
                .queue()
                .to_vec()
                .into_iter()
                .map(|strategy| vault.report_one(ledger, strategy, timestamp))
                .collect()
        })
    }

    /// Harvest one strategy's rewards, then report it
    pub fn harvest(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        strategy: Address,
        timestamp: u64,
    ) -> Result<ReportOutcome> {
        self.transact(ledger, |vault, ledger| {
            vault.ensure_keeper(caller)?;
            vault.locked_profit.checkpoint(timestamp);
            vault.harvest_one(ledger, strategy, timestamp)?;
            vault.report_one(ledger, strategy, timestamp)
        })
    }

    /// Harvest and report every strategy in queue order
    pub fn harvest_all(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        timestamp: u64,
    ) -> Result<Vec<ReportOutcome>> {
        self.transact(ledger, |vault, ledger| {
            vault.ensure_keeper(caller)?;
            vault.locked_profit.checkpoint(timestamp);
            let mut outcomes = Vec::with_capacity(vault.registry.len());
            for strategy in vault.registry.queue().to_vec() {
                vault.harvest_one(ledger, strategy, timestamp)?;
                outcomes.push(vault.report_one(ledger, strategy, timestamp)?);
            }
            Ok(outcomes)
        })
    }

    /// Set a strategy's ratio to zero and report it, draining it back to the vault.
    ///
    /// The strategy stays in the queue until it is removed. A strategy whose
    /// ratio is already zero is simply drained.
    pub fn suspend_strategy(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        strategy: Address,
        timestamp: u64,
    ) -> Result<ReportOutcome> {
        self.transact(ledger, |vault, ledger| {
            vault.ensure_admin(caller)?;
            if vault.registry.get(strategy)?.debt_ratio != 0 {
                vault.set_debt_ratio(caller, strategy, 0)?;
            }
            vault.locked_profit.checkpoint(timestamp);
            vault.report_one(ledger, strategy, timestamp)
        })
    }

    /// Run the strategy's harvest and lock whatever it swept into the vault
    fn harvest_one(&mut self, ledger: &mut Ledger, strategy: Address, timestamp: u64) -> Result<U256> {
        let vault = self.address();
        let before = self.idle_assets(ledger);
        self.registry
            .get_mut(strategy)?
            .strategy
            .harvest(ledger, vault)?;
        let proceeds = self.idle_assets(ledger).saturating_sub(before);

        if !proceeds.is_zero() {
            self.locked_profit.record_gain(proceeds, timestamp);
        }
        info!(%vault, %strategy, %proceeds, "harvest");
        self.emit(VaultEvent::Harvest { strategy, proceeds });
        Ok(proceeds)
    }

    fn report_one(
        &mut self,
        ledger: &mut Ledger,
        strategy: Address,
        timestamp: u64,
    ) -> Result<ReportOutcome> {
        let assets = self.registry.get(strategy)?.strategy.total_assets(ledger);
        let (gain, loss) = self.registry.record_debt(strategy, assets)?;

        if !gain.is_zero() {
            self.locked_profit.record_gain(gain, timestamp);
        } else if !loss.is_zero() {
            self.locked_profit.record_loss(loss, timestamp);
        }

        let target = self.target_debt(ledger, strategy)?;
        let mut outcome = ReportOutcome {
            strategy,
            gain,
            loss,
            target,
            ..Default::default()
        };

        if target > assets {
            outcome.lent = self.lend(ledger, strategy, target - assets)?;
        } else if assets > target {
            let vault = self.address();
            outcome.collected = self.collect(ledger, strategy, assets - target, vault)?.received;
        }
        outcome.debt = self.registry.get(strategy)?.debt;

        info!(
            vault = %self.address(),
            %strategy,
            %gain,
            %loss,
            %target,
            lent = %outcome.lent,
            collected = %outcome.collected,
            "report"
        );
        self.emit(VaultEvent::Report {
            strategy,
            gain,
            loss,
        });
        Ok(outcome)
    }

    /// `total_assets * debt_ratio / total_debt_ratio`, zero when no ratio is set
    fn target_debt(&self, ledger: &Ledger, strategy: Address) -> Result<U256> {
        let total_debt_ratio = self.registry.total_debt_ratio();
        if total_debt_ratio == 0 {
            return Ok(U256::ZERO);
        }
        let debt_ratio = self.registry.get(strategy)?.debt_ratio;
        Ok(mul_div_down(
            self.total_assets(ledger),
            U256::from(debt_ratio),
            U256::from(total_debt_ratio),
        ))
    }
}
