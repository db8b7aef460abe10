//! Lending pool adapter.
//!
//! The pool holds the base asset under its own address and issues receipt
//! tokens, keyed in the ledger by the pool address, in proportion to the
//! assets supplied. Interest accrues by the pool's asset balance growing,
//! which raises the value of every receipt. Rewards are paid in a separate
//! token and sold for the base asset through a [`Swap`].

use alloy_primitives::{Address, U256};
use tracing::debug;
use yvault_rs_vault::math::{bps_of, min, mul_div, mul_div_down, RoundingDirection};
use yvault_rs_vault::{Ledger, Result, VaultError};

use super::{Adapter, AdapterContext};
use crate::swap::Swap;

/// Supplies the base asset to a lending pool and sells reward tokens.
#[derive(Debug, Clone)]
pub struct LendingAdapter<S> {
    pool: Address,
    reward_token: Address,
    swap: S,
}

impl<S: Swap> LendingAdapter<S> {
    pub fn new(pool: Address, reward_token: Address, swap: S) -> Self {
        Self {
            pool,
            reward_token,
            swap,
        }
    }

    pub fn pool(&self) -> Address {
        self.pool
    }

    pub fn reward_token(&self) -> Address {
        self.reward_token
    }

    pub fn swap(&self) -> &S {
        &self.swap
    }

    /// Pool receipts held by the strategy.
    pub fn receipts(&self, ledger: &Ledger, ctx: &AdapterContext) -> U256 {
        ledger.balance_of(self.pool, ctx.strategy)
    }

    fn pool_assets(&self, ledger: &Ledger, ctx: &AdapterContext) -> U256 {
        ledger.balance_of(ctx.asset, self.pool)
    }

    fn to_receipts(
        &self,
        ledger: &Ledger,
        ctx: &AdapterContext,
        assets: U256,
        rounding: RoundingDirection,
    ) -> Result<U256> {
        let supply = ledger.total_supply(self.pool);
        if supply.is_zero() {
            return Ok(assets);
        }
        let pool_assets = self.pool_assets(ledger, ctx);
        if pool_assets.is_zero() {
            return Err(VaultError::DivisionByZero);
        }
        Ok(mul_div(assets, supply, pool_assets, rounding))
    }

    fn to_assets(&self, ledger: &Ledger, ctx: &AdapterContext, receipts: U256) -> U256 {
        let supply = ledger.total_supply(self.pool);
        if supply.is_zero() {
            return U256::ZERO;
        }
        mul_div_down(receipts, self.pool_assets(ledger, ctx), supply)
    }
}

impl<S: Swap + 'static> Adapter for LendingAdapter<S> {
    fn name(&self) -> &'static str {
        "lending"
    }

    fn deployed(&self, ledger: &Ledger, ctx: &AdapterContext) -> U256 {
        self.to_assets(ledger, ctx, self.receipts(ledger, ctx))
    }

    fn invest(
        &mut self,
        ledger: &mut Ledger,
        ctx: &AdapterContext,
        amount: U256,
        min_out: U256,
    ) -> Result<()> {
        let receipts = self.to_receipts(ledger, ctx, amount, RoundingDirection::Down)?;
        let supply_after = ledger.total_supply(self.pool) + receipts;
        let value = if supply_after.is_zero() {
            U256::ZERO
        } else {
            mul_div_down(
                receipts,
                self.pool_assets(ledger, ctx) + amount,
                supply_after,
            )
        };
        if value < min_out {
            return Err(VaultError::BelowMinimum {
                value,
                min: min_out,
            });
        }

        ledger.transfer(ctx.asset, ctx.strategy, self.pool, amount)?;
        ledger.mint(self.pool, ctx.strategy, receipts);
        debug!(pool = %self.pool, strategy = %ctx.strategy, %amount, %receipts, "supplied");
        Ok(())
    }

    fn withdraw(
        &mut self,
        ledger: &mut Ledger,
        ctx: &AdapterContext,
        amount: U256,
    ) -> Result<U256> {
        let held = self.receipts(ledger, ctx);
        if held.is_zero() || amount.is_zero() {
            return Ok(U256::ZERO);
        }
        let receipts = min(
            self.to_receipts(ledger, ctx, amount, RoundingDirection::Up)?,
            held,
        );
        let freed = self.to_assets(ledger, ctx, receipts);

        ledger.burn(self.pool, ctx.strategy, receipts)?;
        ledger.transfer(ctx.asset, self.pool, ctx.strategy, freed)?;
        debug!(pool = %self.pool, strategy = %ctx.strategy, %receipts, %freed, "redeemed");
        Ok(freed)
    }

    fn harvest(&mut self, ledger: &mut Ledger, ctx: &AdapterContext) -> Result<U256> {
        let rewards = ledger.balance_of(self.reward_token, ctx.strategy);
        if rewards.is_zero() {
            return Err(VaultError::NoRewards);
        }
        let quoted = self.swap.quote(self.reward_token, ctx.asset, rewards)?;
        let min_received = bps_of(quoted, ctx.slip);
        self.swap.swap_tokens(
            ledger,
            ctx.strategy,
            self.reward_token,
            ctx.asset,
            rewards,
            min_received,
        )
    }
}
