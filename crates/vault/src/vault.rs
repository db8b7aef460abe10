//! The vault facade.
//!
//! A [`Vault`] custodies a single asset, issues shares against it and
//! allocates capital to a queue of strategies. It owns all of its accounting
//! state (strategy registry and debt, locked profit, keepers, pause
//! flag); token balances live in the [`Ledger`] passed to each call.
//!
//! # Atomicity
//!
//! Every state-changing entry point runs through [`Vault::transact`]: the
//! vault (including its strategies) and the ledger are snapshotted first and
//! restored if the operation fails, so a failed call leaves no trace.
//!
//! # Example
//!
//! ```rust,ignore
//! use yvault_rs_vault::{Ledger, Vault, VaultConfig};
//!
//! let mut ledger = Ledger::new();
//! let mut vault = Vault::new(config, now)?;
//!
//! ledger.mint(asset, alice, U256::from(1000));
//! let shares = vault.deposit(&mut ledger, alice, U256::from(1000), alice, now)?;
//! vault.add_strategy(admin, Box::new(strategy), 3600)?;
//! vault.report_all(&mut ledger, admin, now)?;
//! ```

use std::collections::HashSet;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, VaultError};
use crate::events::VaultEvent;
use crate::ledger::Ledger;
use crate::locked_profit::{LockedProfit, DEFAULT_LOCKED_PROFIT_DURATION};
use crate::math::{min, zero_floor_sub};
use crate::registry::{StrategyRecord, StrategyRegistry};
use crate::shares::ShareAccounting;
use crate::snapshot::VaultSnapshot;
use crate::strategy::{Strategy, Withdrawal};

fn default_locked_profit_duration() -> u64 {
    DEFAULT_LOCKED_PROFIT_DURATION
}

/// Construction parameters for a [`Vault`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Address the vault holds assets under; also the share token's address
    pub address: Address,
    /// The single asset the vault custodies
    pub asset: Address,
    /// Holder of the admin role
    pub admin: Address,
    /// Profit unlock window in seconds
    #[serde(default = "default_locked_profit_duration")]
    pub locked_profit_duration: u64,
}

impl VaultConfig {
    pub fn new(address: Address, asset: Address, admin: Address) -> Self {
        Self {
            address,
            asset,
            admin,
            locked_profit_duration: DEFAULT_LOCKED_PROFIT_DURATION,
        }
    }
}

/// Outcome of a withdraw or redeem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    /// Shares burned
    pub shares: U256,
    /// Assets the shares were worth
    pub assets: U256,
    /// Assets that reached the receiver
    pub delivered: U256,
    /// `assets - delivered`: what idle funds and the strategy queue could not cover
    pub shortfall: U256,
}

/// Multi-strategy vault
#[derive(Debug, Clone)]
pub struct Vault {
    address: Address,
    asset: Address,
    admin: Address,
    keepers: HashSet<Address>,
    paused: bool,
    pub(crate) registry: StrategyRegistry,
    pub(crate) locked_profit: LockedProfit,
    events: Vec<VaultEvent>,
}

impl Vault {
    /// Create a vault whose profit clock starts at `timestamp`
    pub fn new(config: VaultConfig, timestamp: u64) -> Result<Self> {
        if config.address.is_zero() || config.asset.is_zero() {
            return Err(VaultError::Zero);
        }
        let locked_profit = LockedProfit::new(config.locked_profit_duration, timestamp)?;
        info!(
            vault = %config.address,
            asset = %config.asset,
            duration = config.locked_profit_duration,
            "vault created"
        );
        Ok(Self {
            address: config.address,
            asset: config.asset,
            admin: config.admin,
            keepers: HashSet::new(),
            paused: false,
            registry: StrategyRegistry::new(),
            locked_profit,
            events: Vec::new(),
        })
    }

    // ==================== Transactions ====================

    /// Run `op` atomically: on error, the vault and the ledger are restored
    pub(crate) fn transact<T>(
        &mut self,
        ledger: &mut Ledger,
        op: impl FnOnce(&mut Self, &mut Ledger) -> Result<T>,
    ) -> Result<T> {
        let vault = self.clone();
        let book = ledger.clone();
        match op(self, ledger) {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!(vault = %self.address, error = %err, "rolling back");
                *self = vault;
                *ledger = book;
                Err(err)
            }
        }
    }

    pub(crate) fn emit(&mut self, event: VaultEvent) {
        self.events.push(event);
    }

    pub(crate) fn ensure_admin(&self, caller: Address) -> Result<()> {
        if caller != self.admin {
            return Err(VaultError::Unauthorized { caller });
        }
        Ok(())
    }

    pub(crate) fn ensure_keeper(&self, caller: Address) -> Result<()> {
        if caller != self.admin && !self.keepers.contains(&caller) {
            return Err(VaultError::Unauthorized { caller });
        }
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<()> {
        if self.paused {
            return Err(VaultError::Paused);
        }
        Ok(())
    }

    // ==================== Views ====================

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn asset(&self) -> Address {
        self.asset
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn is_keeper(&self, account: Address) -> bool {
        account == self.admin || self.keepers.contains(&account)
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Strategies in withdrawal priority order
    pub fn queue(&self) -> &[Address] {
        self.registry.queue()
    }

    pub fn strategy_record(&self, strategy: Address) -> StrategyRecord {
        self.registry.record(strategy)
    }

    pub fn total_debt(&self) -> U256 {
        self.registry.total_debt()
    }

    pub fn total_debt_ratio(&self) -> u64 {
        self.registry.total_debt_ratio()
    }

    pub fn last_report(&self) -> u64 {
        self.locked_profit.last_report()
    }

    pub fn locked_profit_duration(&self) -> u64 {
        self.locked_profit.duration()
    }

    /// Locked amount as of the last report, before decay
    pub fn raw_locked_profit(&self) -> U256 {
        self.locked_profit.raw()
    }

    /// Profit still locked at `timestamp`
    pub fn locked_profit(&self, timestamp: u64) -> U256 {
        self.locked_profit.locked_at(timestamp)
    }

    /// Assets held by the vault itself
    pub fn idle_assets(&self, ledger: &Ledger) -> U256 {
        ledger.balance_of(self.asset, self.address)
    }

    /// Idle assets plus the debt recorded against strategies
    pub fn total_assets(&self, ledger: &Ledger) -> U256 {
        self.idle_assets(ledger) + self.registry.total_debt()
    }

    /// Total assets minus what is still locked
    pub fn free_assets(&self, ledger: &Ledger, timestamp: u64) -> U256 {
        zero_floor_sub(self.total_assets(ledger), self.locked_profit(timestamp))
    }

    pub fn total_supply(&self, ledger: &Ledger) -> U256 {
        ledger.total_supply(self.address)
    }

    /// Shares held by `owner`
    pub fn balance_of(&self, ledger: &Ledger, owner: Address) -> U256 {
        ledger.balance_of(self.address, owner)
    }

    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.events)
    }

    /// Persisted state at `timestamp`
    pub fn snapshot(&self, ledger: &Ledger, timestamp: u64) -> VaultSnapshot {
        VaultSnapshot {
            address: self.address,
            asset: self.asset,
            timestamp,
            paused: self.paused,
            total_supply: self.total_supply(ledger),
            idle_assets: self.idle_assets(ledger),
            total_assets: self.total_assets(ledger),
            free_assets: self.free_assets(ledger, timestamp),
            locked_profit: self.locked_profit(timestamp),
            raw_locked_profit: self.locked_profit.raw(),
            last_report: self.locked_profit.last_report(),
            locked_profit_duration: self.locked_profit.duration(),
            total_debt: self.registry.total_debt(),
            total_debt_ratio: self.registry.total_debt_ratio(),
            strategies: self.registry.records(),
        }
    }

    // ==================== Share accounting ====================

    fn accounting(&self, ledger: &Ledger, timestamp: u64) -> ShareAccounting {
        ShareAccounting::new(
            self.total_supply(ledger),
            self.total_assets(ledger),
            self.free_assets(ledger, timestamp),
        )
    }

    pub fn convert_to_shares(&self, ledger: &Ledger, assets: U256, timestamp: u64) -> Result<U256> {
        self.accounting(ledger, timestamp).convert_to_shares(assets)
    }

    pub fn convert_to_assets(&self, ledger: &Ledger, shares: U256, timestamp: u64) -> Result<U256> {
        self.accounting(ledger, timestamp).convert_to_assets(shares)
    }

    pub fn preview_deposit(&self, ledger: &Ledger, assets: U256, timestamp: u64) -> Result<U256> {
        self.accounting(ledger, timestamp).preview_deposit(assets)
    }

    pub fn preview_mint(&self, ledger: &Ledger, shares: U256, timestamp: u64) -> Result<U256> {
        self.accounting(ledger, timestamp).preview_mint(shares)
    }

    pub fn preview_withdraw(&self, ledger: &Ledger, assets: U256, timestamp: u64) -> Result<U256> {
        self.accounting(ledger, timestamp).preview_withdraw(assets)
    }

    pub fn preview_redeem(&self, ledger: &Ledger, shares: U256, timestamp: u64) -> Result<U256> {
        self.accounting(ledger, timestamp).preview_redeem(shares)
    }

    pub fn max_deposit(&self) -> U256 {
        if self.paused {
            U256::ZERO
        } else {
            U256::MAX
        }
    }

    pub fn max_mint(&self) -> U256 {
        self.max_deposit()
    }

    /// Assets `owner` could withdraw by redeeming every share
    pub fn max_withdraw(&self, ledger: &Ledger, owner: Address, timestamp: u64) -> Result<U256> {
        if self.paused {
            return Ok(U256::ZERO);
        }
        self.preview_redeem(ledger, self.balance_of(ledger, owner), timestamp)
    }

    pub fn max_redeem(&self, ledger: &Ledger, owner: Address) -> U256 {
        if self.paused {
            return U256::ZERO;
        }
        self.balance_of(ledger, owner)
    }

    // ==================== Deposit / withdraw ====================

    /// Deposit `assets` from `caller`, minting shares to `receiver`
    pub fn deposit(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
        receiver: Address,
        timestamp: u64,
    ) -> Result<U256> {
        self.transact(ledger, |vault, ledger| {
            vault.deposit_inner(ledger, caller, assets, receiver, timestamp)
        })
    }

    /// Mint exactly `shares` to `receiver`, pulling the required assets from `caller`
    pub fn mint(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        shares: U256,
        receiver: Address,
        timestamp: u64,
    ) -> Result<U256> {
        self.transact(ledger, |vault, ledger| {
            vault.mint_inner(ledger, caller, shares, receiver, timestamp)
        })
    }

    /// Withdraw `assets` worth of `owner`'s shares to `receiver`
    pub fn withdraw(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
        timestamp: u64,
    ) -> Result<WithdrawReceipt> {
        self.transact(ledger, |vault, ledger| {
            vault.withdraw_inner(ledger, caller, assets, receiver, owner, timestamp)
        })
    }

    /// Redeem `shares` of `owner` for assets sent to `receiver`
    pub fn redeem(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
        timestamp: u64,
    ) -> Result<WithdrawReceipt> {
        self.transact(ledger, |vault, ledger| {
            vault.redeem_inner(ledger, caller, shares, receiver, owner, timestamp)
        })
    }

    /// [`Vault::deposit`] that fails unless at least `min_shares` are minted
    pub fn safe_deposit(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
        receiver: Address,
        min_shares: U256,
        timestamp: u64,
    ) -> Result<U256> {
        self.transact(ledger, |vault, ledger| {
            let shares = vault.deposit_inner(ledger, caller, assets, receiver, timestamp)?;
            if shares < min_shares {
                return Err(VaultError::BelowMinimum {
                    value: shares,
                    min: min_shares,
                });
            }
            Ok(shares)
        })
    }

    /// [`Vault::mint`] that fails if more than `max_assets` are pulled
    pub fn safe_mint(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        shares: U256,
        receiver: Address,
        max_assets: U256,
        timestamp: u64,
    ) -> Result<U256> {
        self.transact(ledger, |vault, ledger| {
            let assets = vault.mint_inner(ledger, caller, shares, receiver, timestamp)?;
            if assets > max_assets {
                return Err(VaultError::AboveMaximum {
                    value: assets,
                    max: max_assets,
                });
            }
            Ok(assets)
        })
    }

    /// [`Vault::withdraw`] that fails if more than `max_shares` are burned or
    /// the full amount is not delivered
    #[expect(clippy::too_many_arguments)]
    pub fn safe_withdraw(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
        max_shares: U256,
        timestamp: u64,
    ) -> Result<WithdrawReceipt> {
        self.transact(ledger, |vault, ledger| {
            let receipt =
                vault.withdraw_inner(ledger, caller, assets, receiver, owner, timestamp)?;
            if receipt.shares > max_shares {
                return Err(VaultError::AboveMaximum {
                    value: receipt.shares,
                    max: max_shares,
                });
            }
            if receipt.delivered < assets {
                return Err(VaultError::BelowMinimum {
                    value: receipt.delivered,
                    min: assets,
                });
            }
            Ok(receipt)
        })
    }

    /// [`Vault::redeem`] that fails unless at least `min_assets` are delivered
    #[expect(clippy::too_many_arguments)]
    pub fn safe_redeem(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
        min_assets: U256,
        timestamp: u64,
    ) -> Result<WithdrawReceipt> {
        self.transact(ledger, |vault, ledger| {
            let receipt = vault.redeem_inner(ledger, caller, shares, receiver, owner, timestamp)?;
            if receipt.delivered < min_assets {
                return Err(VaultError::BelowMinimum {
                    value: receipt.delivered,
                    min: min_assets,
                });
            }
            Ok(receipt)
        })
    }

    fn deposit_inner(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
        receiver: Address,
        timestamp: u64,
    ) -> Result<U256> {
        self.ensure_not_paused()?;
        let shares = self.preview_deposit(ledger, assets, timestamp)?;
        if shares.is_zero() {
            return Err(VaultError::Zero);
        }
        self.issue(ledger, caller, receiver, assets, shares)?;
        Ok(shares)
    }

    fn mint_inner(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        shares: U256,
        receiver: Address,
        timestamp: u64,
    ) -> Result<U256> {
        self.ensure_not_paused()?;
        let assets = self.preview_mint(ledger, shares, timestamp)?;
        if assets.is_zero() || shares.is_zero() {
            return Err(VaultError::Zero);
        }
        self.issue(ledger, caller, receiver, assets, shares)?;
        Ok(assets)
    }

    fn withdraw_inner(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
        timestamp: u64,
    ) -> Result<WithdrawReceipt> {
        self.ensure_not_paused()?;
        let shares = self.preview_withdraw(ledger, assets, timestamp)?;
        if shares.is_zero() || assets.is_zero() {
            return Err(VaultError::Zero);
        }
        self.settle(ledger, caller, receiver, owner, assets, shares)
    }

    fn redeem_inner(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
        timestamp: u64,
    ) -> Result<WithdrawReceipt> {
        self.ensure_not_paused()?;
        let assets = self.preview_redeem(ledger, shares, timestamp)?;
        if assets.is_zero() {
            return Err(VaultError::Zero);
        }
        self.settle(ledger, caller, receiver, owner, assets, shares)
    }

    fn issue(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        receiver: Address,
        assets: U256,
        shares: U256,
    ) -> Result<()> {
        ledger.transfer(self.asset, caller, self.address, assets)?;
        ledger.mint(self.address, receiver, shares);

        debug!(vault = %self.address, %caller, %receiver, %assets, %shares, "deposit");
        self.emit(VaultEvent::Deposit {
            caller,
            owner: receiver,
            assets,
            shares,
        });
        Ok(())
    }

    /// Burn shares, then pay out from idle funds and the strategy queue
    fn settle(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        receiver: Address,
        owner: Address,
        assets: U256,
        shares: U256,
    ) -> Result<WithdrawReceipt> {
        if caller != owner {
            ledger.spend_allowance(self.address, owner, caller, shares)?;
        }
        ledger.burn(self.address, owner, shares)?;

        let delivered = self.pay_out(ledger, assets, receiver)?;
        let shortfall = assets - delivered;
        if !shortfall.is_zero() {
            warn!(
                vault = %self.address,
                %assets,
                %delivered,
                %shortfall,
                "withdrawal only partially fulfilled"
            );
        }

        debug!(vault = %self.address, %caller, %receiver, %owner, %assets, %shares, "withdraw");
        self.emit(VaultEvent::Withdraw {
            caller,
            receiver,
            owner,
            assets,
            shares,
            shortfall,
        });
        Ok(WithdrawReceipt {
            shares,
            assets,
            delivered,
            shortfall,
        })
    }

    /// Deliver up to `assets` to `receiver`: idle balance first, then each
    /// strategy in queue order. Returns what was delivered.
    fn pay_out(&mut self, ledger: &mut Ledger, assets: U256, receiver: Address) -> Result<U256> {
        let from_idle = min(self.idle_assets(ledger), assets);
        ledger.transfer(self.asset, self.address, receiver, from_idle)?;
        let mut delivered = from_idle;

        for strategy in self.registry.queue().to_vec() {
            if delivered >= assets {
                break;
            }
            if self.registry.get(strategy)?.strategy.total_assets(ledger).is_zero() {
                continue;
            }
            let withdrawal = self.collect(ledger, strategy, assets - delivered, receiver)?;
            delivered += withdrawal.received;
        }

        Ok(delivered)
    }

    // ==================== Lend / collect ====================

    /// Move up to `assets` of idle funds into `strategy` and invest them.
    ///
    /// Lends less when idle funds are short. Returns the amount lent.
    pub(crate) fn lend(
        &mut self,
        ledger: &mut Ledger,
        strategy: Address,
        assets: U256,
    ) -> Result<U256> {
        let idle = self.idle_assets(ledger);
        let amount = min(assets, idle);
        if amount.is_zero() {
            return Ok(U256::ZERO);
        }
        if amount < assets {
            warn!(vault = %self.address, %strategy, requested = %assets, %amount, "lending less than target");
        }

        ledger.transfer(self.asset, self.address, strategy, amount)?;
        self.registry.increase_debt(strategy, amount)?;
        let vault = self.address;
        self.registry
            .get_mut(strategy)?
            .strategy
            .invest(ledger, vault)?;

        debug!(vault = %self.address, %strategy, %amount, "lend");
        self.emit(VaultEvent::Lend {
            strategy,
            assets: amount,
        });
        Ok(amount)
    }

    /// Ask `strategy` for `assets`, writing its debt down by what it returns.
    ///
    /// Proceeds land in the vault and are forwarded when `receiver` is
    /// someone else.
    pub(crate) fn collect(
        &mut self,
        ledger: &mut Ledger,
        strategy: Address,
        assets: U256,
        receiver: Address,
    ) -> Result<Withdrawal> {
        let vault = self.address;
        let withdrawal = self
            .registry
            .get_mut(strategy)?
            .strategy
            .withdraw(ledger, vault, assets)?;
        self.registry.decrease_debt(strategy, withdrawal.received)?;
        if receiver != vault {
            ledger.transfer(self.asset, vault, receiver, withdrawal.received)?;
        }

        debug!(
            vault = %self.address,
            %strategy,
            requested = %assets,
            received = %withdrawal.received,
            slippage = %withdrawal.slippage,
            bonus = %withdrawal.bonus,
            "collect"
        );
        self.emit(VaultEvent::Collect {
            strategy,
            requested: assets,
            withdrawal,
        });
        Ok(withdrawal)
    }

    // ==================== Shares as a token ====================

    /// Transfer shares from `caller` to `to`
    pub fn transfer_shares(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        to: Address,
        shares: U256,
    ) -> Result<()> {
        ledger.transfer(self.address, caller, to, shares)
    }

    /// Move `owner`'s shares to `to`, spending `caller`'s allowance unless
    /// `caller` is the owner
    pub fn transfer_shares_from(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        owner: Address,
        to: Address,
        shares: U256,
    ) -> Result<()> {
        ledger.transfer_from(self.address, caller, owner, to, shares)
    }

    /// Allow `spender` to withdraw or redeem up to `shares` of `caller`'s shares
    pub fn approve_shares(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        spender: Address,
        shares: U256,
    ) {
        ledger.approve(self.address, caller, spender, shares);
    }

    // ==================== Administration ====================

    /// Append `strategy` to the queue with the given debt ratio
    pub fn add_strategy(
        &mut self,
        caller: Address,
        strategy: Box<dyn Strategy>,
        debt_ratio: u64,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let address = strategy.address();
        self.registry
            .add(strategy, debt_ratio, self.address, self.asset)?;

        info!(vault = %self.address, strategy = %address, debt_ratio, "strategy added");
        self.emit(VaultEvent::StrategyAdded {
            strategy: address,
            debt_ratio,
        });
        Ok(())
    }

    /// Pull everything out of `strategy` and delete it.
    ///
    /// Fails if less than `min_received` comes back. Debt the strategy could
    /// not repay is realized as a loss. Returns the assets received.
    pub fn remove_strategy(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        strategy: Address,
        min_received: U256,
        timestamp: u64,
    ) -> Result<U256> {
        self.transact(ledger, |vault, ledger| {
            vault.ensure_admin(caller)?;
            let live = vault.registry.get(strategy)?.strategy.total_assets(ledger);

            let received = if live.is_zero() {
                U256::ZERO
            } else {
                vault.collect(ledger, strategy, live, vault.address)?.received
            };
            if received < min_received {
                return Err(VaultError::BelowMinimum {
                    value: received,
                    min: min_received,
                });
            }

            let entry = vault.registry.remove(strategy)?;
            if !entry.debt.is_zero() {
                vault.locked_profit.record_loss(entry.debt, timestamp);
            }

            info!(vault = %vault.address, %strategy, %received, written_off = %entry.debt, "strategy removed");
            vault.emit(VaultEvent::StrategyRemoved { strategy, received });
            Ok(received)
        })
    }

    /// Change a strategy's share of the allocation; takes effect on its next report
    pub fn set_debt_ratio(
        &mut self,
        caller: Address,
        strategy: Address,
        debt_ratio: u64,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        self.registry.set_debt_ratio(strategy, debt_ratio)?;

        info!(vault = %self.address, %strategy, debt_ratio, "debt ratio set");
        self.emit(VaultEvent::DebtRatioSet {
            strategy,
            debt_ratio,
        });
        Ok(())
    }

    /// Swap two strategies' withdrawal priority
    pub fn swap_queue_positions(&mut self, caller: Address, i: usize, j: usize) -> Result<()> {
        self.ensure_admin(caller)?;
        self.registry.swap_positions(i, j)?;
        self.emit(VaultEvent::QueuePositionsSwapped { i, j });
        Ok(())
    }

    /// Change the unlock window. Profit still locked at `timestamp` unlocks
    /// over the new window; nothing already released is locked again.
    pub fn set_locked_profit_duration(
        &mut self,
        caller: Address,
        duration: u64,
        timestamp: u64,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        self.locked_profit.set_duration(duration, timestamp)?;

        info!(vault = %self.address, duration, "locked profit duration set");
        self.emit(VaultEvent::LockedProfitDurationSet { duration });
        Ok(())
    }

    /// Grant or revoke the right to report and harvest
    pub fn set_keeper(&mut self, caller: Address, keeper: Address, enabled: bool) -> Result<()> {
        self.ensure_admin(caller)?;
        let changed = if enabled {
            self.keepers.insert(keeper)
        } else {
            self.keepers.remove(&keeper)
        };
        if !changed {
            return Err(VaultError::AlreadyValue);
        }
        self.emit(VaultEvent::KeeperSet { keeper, enabled });
        Ok(())
    }

    /// Stop deposits and withdrawals. Reports and harvests keep working.
    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.paused {
            return Err(VaultError::AlreadyValue);
        }
        self.paused = true;
        info!(vault = %self.address, "paused");
        self.emit(VaultEvent::Paused);
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if !self.paused {
            return Err(VaultError::AlreadyValue);
        }
        self.paused = false;
        info!(vault = %self.address, "unpaused");
        self.emit(VaultEvent::Unpaused);
        Ok(())
    }
}
