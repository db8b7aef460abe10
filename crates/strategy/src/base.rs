//! Strategy base lifecycle.
//!
//! [`BaseStrategy`] implements the vault's [`Strategy`] contract on top of an
//! [`Adapter`]. It owns the parts every strategy shares:
//!
//! - **Access control**: `withdraw` is vault-only; `invest` and `harvest`
//!   accept the vault or the strategy admin; setters are admin-only
//! - **Withdraw accounting**: the request is clamped to `total_assets`, the
//!   adapter frees funds, and any shortfall is reported as slippage (bounded
//!   by `slip`) while any excess is reported as bonus and left behind
//! - **Harvest**: the adapter's proceeds are split between the treasury
//!   (`fee` bps) and the vault
//!
//! # Example
//!
//! ```rust,ignore
//! use yvault_rs_strategy::{BaseStrategy, LendingAdapter, StrategyConfig, SwapRouter};
//!
//! let config = StrategyConfig::new(strategy, vault, asset, admin);
//! let adapter = LendingAdapter::new(pool, reward, router);
//! let strategy = BaseStrategy::new(config, adapter)?;
//! vault.add_strategy(admin, Box::new(strategy), 1800)?;
//! ```

use alloy_primitives::{Address, U256};
use tracing::{debug, info};
use yvault_rs_vault::math::{bps_of, min};
use yvault_rs_vault::{Ledger, Result, Strategy, VaultError, Withdrawal};

use crate::adapters::{Adapter, AdapterContext};
use crate::config::{validate_fee, validate_slip, StrategyConfig};

/// A vault strategy driving one yield source adapter.
#[derive(Debug, Clone)]
pub struct BaseStrategy<A> {
    config: StrategyConfig,
    adapter: A,
}

impl<A: Adapter> BaseStrategy<A> {
    pub fn new(config: StrategyConfig, adapter: A) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, adapter })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    fn ctx(&self) -> AdapterContext {
        AdapterContext {
            strategy: self.config.address,
            asset: self.config.asset,
            slip: self.config.slip,
        }
    }

    /// Base asset held by the strategy and not yet deployed.
    pub fn idle(&self, ledger: &Ledger) -> U256 {
        ledger.balance_of(self.config.asset, self.config.address)
    }

    /// Least output accepted for `amount` under the slippage bound.
    pub fn calculate_slippage(&self, amount: U256) -> U256 {
        bps_of(amount, self.config.slip)
    }

    fn only_vault(&self, caller: Address) -> Result<()> {
        if caller != self.config.vault {
            return Err(VaultError::NotVault { caller });
        }
        Ok(())
    }

    fn only_vault_or_admin(&self, caller: Address) -> Result<()> {
        if caller != self.config.vault && caller != self.config.admin {
            return Err(VaultError::Unauthorized { caller });
        }
        Ok(())
    }

    fn only_admin(&self, caller: Address) -> Result<()> {
        if caller != self.config.admin {
            return Err(VaultError::Unauthorized { caller });
        }
        Ok(())
    }

    // ==================== Admin ====================

    pub fn set_slip(&mut self, caller: Address, slip: u64) -> Result<()> {
        self.only_admin(caller)?;
        validate_slip(slip)?;
        if slip == self.config.slip {
            return Err(VaultError::AlreadyValue);
        }
        self.config.slip = slip;
        info!(strategy = %self.config.address, slip, "slip set");
        Ok(())
    }

    pub fn set_fee(&mut self, caller: Address, fee: u64) -> Result<()> {
        self.only_admin(caller)?;
        validate_fee(fee)?;
        if fee == self.config.fee {
            return Err(VaultError::AlreadyValue);
        }
        self.config.fee = fee;
        info!(strategy = %self.config.address, fee, "fee set");
        Ok(())
    }

    pub fn set_treasury(&mut self, caller: Address, treasury: Address) -> Result<()> {
        self.only_admin(caller)?;
        if treasury.is_zero() {
            return Err(VaultError::Zero);
        }
        if treasury == self.config.treasury {
            return Err(VaultError::AlreadyValue);
        }
        self.config.treasury = treasury;
        info!(strategy = %self.config.address, %treasury, "treasury set");
        Ok(())
    }
}

impl<A: Adapter> Strategy for BaseStrategy<A> {
    fn address(&self) -> Address {
        self.config.address
    }

    fn vault(&self) -> Address {
        self.config.vault
    }

    fn asset(&self) -> Address {
        self.config.asset
    }

    fn total_assets(&self, ledger: &Ledger) -> U256 {
        self.idle(ledger) + self.adapter.deployed(ledger, &self.ctx())
    }

    fn invest(&mut self, ledger: &mut Ledger, caller: Address) -> Result<()> {
        self.only_vault_or_admin(caller)?;
        let amount = self.idle(ledger);
        if amount.is_zero() {
            return Err(VaultError::NothingToInvest);
        }
        let min_out = self.calculate_slippage(amount);
        let ctx = self.ctx();
        self.adapter.invest(ledger, &ctx, amount, min_out)?;

        debug!(
            strategy = %self.config.address,
            adapter = self.adapter.name(),
            %amount,
            %min_out,
            "invest"
        );
        Ok(())
    }

    fn withdraw(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        assets: U256,
    ) -> Result<Withdrawal> {
        self.only_vault(caller)?;
        let requested = min(assets, self.total_assets(ledger));
        if requested.is_zero() {
            return Ok(Withdrawal::default());
        }

        let idle = self.idle(ledger);
        let mut withdrawal = Withdrawal::default();
        if requested <= idle {
            withdrawal.received = requested;
        } else {
            let needed = requested - idle;
            let ctx = self.ctx();
            let freed = self.adapter.withdraw(ledger, &ctx, needed)?;
            if freed < needed {
                let available = idle + freed;
                let floor = self.calculate_slippage(requested);
                if available < floor {
                    return Err(VaultError::BelowMinimum {
                        value: available,
                        min: floor,
                    });
                }
                withdrawal.slippage = needed - freed;
                withdrawal.received = available;
            } else {
                // Excess freed by the adapter stays in the strategy for the next report
                withdrawal.bonus = freed - needed;
                withdrawal.received = requested;
            }
        }

        ledger.transfer(
            self.config.asset,
            self.config.address,
            self.config.vault,
            withdrawal.received,
        )?;
        debug!(
            strategy = %self.config.address,
            %requested,
            received = %withdrawal.received,
            slippage = %withdrawal.slippage,
            bonus = %withdrawal.bonus,
            "withdraw"
        );
        Ok(withdrawal)
    }

    fn harvest(&mut self, ledger: &mut Ledger, caller: Address) -> Result<()> {
        self.only_vault_or_admin(caller)?;
        let ctx = self.ctx();
        let proceeds = self.adapter.harvest(ledger, &ctx)?;
        if proceeds.is_zero() {
            return Ok(());
        }

        let fee = bps_of(proceeds, self.config.fee);
        ledger.transfer(
            self.config.asset,
            self.config.address,
            self.config.treasury,
            fee,
        )?;
        ledger.transfer(
            self.config.asset,
            self.config.address,
            self.config.vault,
            proceeds - fee,
        )?;

        info!(
            strategy = %self.config.address,
            adapter = self.adapter.name(),
            %proceeds,
            %fee,
            "harvest"
        );
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{IdleAdapter, LendingAdapter};
    use crate::swap::SwapRouter;
    use yvault_rs_vault::WAD;

    const STRATEGY: Address = Address::repeat_byte(0x01);
    const VAULT: Address = Address::repeat_byte(0xee);
    const ASSET: Address = Address::repeat_byte(0xaa);
    const ADMIN: Address = Address::repeat_byte(0xad);
    const TREASURY: Address = Address::repeat_byte(0x7e);
    const STRANGER: Address = Address::repeat_byte(0x55);
    const POOL: Address = Address::repeat_byte(0x70);
    const REWARD: Address = Address::repeat_byte(0x0f);
    const ROUTER: Address = Address::repeat_byte(0x5a);

    fn config() -> StrategyConfig {
        StrategyConfig::new(STRATEGY, VAULT, ASSET, ADMIN)
    }

    fn idle_strategy() -> BaseStrategy<IdleAdapter> {
        BaseStrategy::new(config(), IdleAdapter).unwrap()
    }

    fn lending_strategy() -> BaseStrategy<LendingAdapter<SwapRouter>> {
        let mut router = SwapRouter::new(ROUTER);
        router.set_rate(REWARD, ASSET, WAD).unwrap();
        let mut config = config();
        config.treasury = TREASURY;
        BaseStrategy::new(config, LendingAdapter::new(POOL, REWARD, router)).unwrap()
    }

    #[test]
    fn test_new_validates_config() {
        let mut bad = config();
        bad.fee = 9_000;
        assert!(matches!(
            BaseStrategy::new(bad, IdleAdapter),
            Err(VaultError::AboveMaximum { .. })
        ));
    }

    #[test]
    fn test_access_control() {
        let mut strategy = idle_strategy();
        let mut ledger = Ledger::new();
        ledger.mint(ASSET, STRATEGY, U256::from(10));

        assert_eq!(
            strategy.withdraw(&mut ledger, ADMIN, U256::from(1)),
            Err(VaultError::NotVault { caller: ADMIN })
        );
        assert_eq!(
            strategy.invest(&mut ledger, STRANGER),
            Err(VaultError::Unauthorized { caller: STRANGER })
        );
        assert_eq!(
            strategy.harvest(&mut ledger, STRANGER),
            Err(VaultError::Unauthorized { caller: STRANGER })
        );
        assert!(strategy.invest(&mut ledger, ADMIN).is_ok());
        assert!(strategy.harvest(&mut ledger, VAULT).is_ok());
    }

    #[test]
    fn test_invest_with_nothing_idle() {
        let mut strategy = idle_strategy();
        let mut ledger = Ledger::new();
        assert_eq!(
            strategy.invest(&mut ledger, VAULT),
            Err(VaultError::NothingToInvest)
        );
    }

    #[test]
    fn test_calculate_slippage() {
        let strategy = idle_strategy();
        assert_eq!(strategy.calculate_slippage(U256::from(1_000)), U256::from(990));
    }

    #[test]
    fn test_withdraw_clamps_to_total_assets() {
        let mut strategy = idle_strategy();
        let mut ledger = Ledger::new();
        ledger.mint(ASSET, STRATEGY, U256::from(300));

        let withdrawal = strategy
            .withdraw(&mut ledger, VAULT, U256::from(1_000))
            .unwrap();

        assert_eq!(withdrawal.received, U256::from(300));
        assert!(withdrawal.slippage.is_zero());
        assert_eq!(ledger.balance_of(ASSET, VAULT), U256::from(300));
    }

    #[test]
    fn test_withdraw_from_idle_has_no_bonus() {
        let mut strategy = idle_strategy();
        let mut ledger = Ledger::new();
        ledger.mint(ASSET, STRATEGY, U256::from(300));

        let withdrawal = strategy
            .withdraw(&mut ledger, VAULT, U256::from(100))
            .unwrap();

        assert_eq!(withdrawal.received, U256::from(100));
        assert!(withdrawal.slippage.is_zero());
        assert!(withdrawal.bonus.is_zero());
        assert_eq!(ledger.balance_of(ASSET, STRATEGY), U256::from(200));
        assert_eq!(ledger.balance_of(ASSET, VAULT), U256::from(100));
    }

    #[test]
    fn test_withdraw_bonus_counts_only_adapter_excess() {
        let mut strategy = lending_strategy();
        let mut ledger = Ledger::new();
        ledger.mint(ASSET, STRATEGY, U256::from(3));
        strategy.invest(&mut ledger, VAULT).unwrap();
        ledger.mint(ASSET, POOL, U256::from(7));
        // 5 idle on top of the pool position
        ledger.mint(ASSET, STRATEGY, U256::from(5));

        // 5 from idle, 2 more from the pool which frees 3
        let withdrawal = strategy
            .withdraw(&mut ledger, VAULT, U256::from(7))
            .unwrap();

        assert_eq!(withdrawal.received, U256::from(7));
        assert_eq!(withdrawal.bonus, U256::from(1));
        assert_eq!(ledger.balance_of(ASSET, STRATEGY), U256::from(1));
    }

    #[test]
    fn test_withdraw_bonus_stays_in_strategy() {
        let mut strategy = lending_strategy();
        let mut ledger = Ledger::new();
        ledger.mint(ASSET, STRATEGY, U256::from(3));
        strategy.invest(&mut ledger, VAULT).unwrap();
        // Pool worth 10 against 3 receipts: one receipt frees 3, the request is 2
        ledger.mint(ASSET, POOL, U256::from(7));

        let withdrawal = strategy
            .withdraw(&mut ledger, VAULT, U256::from(2))
            .unwrap();

        assert_eq!(withdrawal.received, U256::from(2));
        assert_eq!(withdrawal.bonus, U256::from(1));
        assert_eq!(ledger.balance_of(ASSET, STRATEGY), U256::from(1));
        assert_eq!(ledger.balance_of(ASSET, VAULT), U256::from(2));
    }

    #[test]
    fn test_harvest_splits_fee() {
        let mut strategy = lending_strategy();
        strategy.set_fee(ADMIN, 1_000).unwrap();
        let mut ledger = Ledger::new();
        ledger.mint(REWARD, STRATEGY, U256::from(200));
        ledger.mint(ASSET, ROUTER, U256::from(1_000));

        strategy.harvest(&mut ledger, VAULT).unwrap();

        assert_eq!(ledger.balance_of(ASSET, TREASURY), U256::from(20));
        assert_eq!(ledger.balance_of(ASSET, VAULT), U256::from(180));
        assert!(ledger.balance_of(ASSET, STRATEGY).is_zero());
    }

    #[test]
    fn test_harvest_leaves_idle_balance_alone() {
        let mut strategy = lending_strategy();
        let mut ledger = Ledger::new();
        ledger.mint(ASSET, STRATEGY, U256::from(50));
        ledger.mint(REWARD, STRATEGY, U256::from(10));
        ledger.mint(ASSET, ROUTER, U256::from(1_000));

        strategy.harvest(&mut ledger, ADMIN).unwrap();

        assert_eq!(ledger.balance_of(ASSET, STRATEGY), U256::from(50));
        assert_eq!(ledger.balance_of(ASSET, VAULT), U256::from(10));
    }

    #[test]
    fn test_setters() {
        let mut strategy = idle_strategy();

        assert_eq!(
            strategy.set_slip(STRANGER, 9_500),
            Err(VaultError::Unauthorized { caller: STRANGER })
        );
        assert_eq!(
            strategy.set_slip(ADMIN, 10_001),
            Err(VaultError::InvalidValue(U256::from(10_001)))
        );
        assert_eq!(strategy.set_slip(ADMIN, 9_900), Err(VaultError::AlreadyValue));
        strategy.set_slip(ADMIN, 9_500).unwrap();
        assert_eq!(strategy.config().slip, 9_500);

        assert!(matches!(
            strategy.set_fee(ADMIN, 5_001),
            Err(VaultError::AboveMaximum { .. })
        ));
        strategy.set_fee(ADMIN, 5_000).unwrap();

        assert_eq!(strategy.set_treasury(ADMIN, Address::ZERO), Err(VaultError::Zero));
        assert_eq!(strategy.set_treasury(ADMIN, ADMIN), Err(VaultError::AlreadyValue));
        strategy.set_treasury(ADMIN, TREASURY).unwrap();
        assert_eq!(strategy.config().treasury, TREASURY);
    }
}
