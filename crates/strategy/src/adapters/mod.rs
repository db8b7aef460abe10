//! Yield source adapters.
//!
//! An [`Adapter`] knows how to move a strategy's base asset into and out of
//! one yield source. [`crate::BaseStrategy`] handles access control,
//! clamping, slippage accounting and the transfers to and from the vault.

mod idle;
mod lending;

pub use idle::IdleAdapter;
pub use lending::LendingAdapter;

use std::fmt;

use alloy_primitives::{Address, U256};
use yvault_rs_vault::{Ledger, Result};

/// What an adapter needs to know about the strategy driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterContext {
    /// Address the strategy holds funds under.
    pub strategy: Address,
    /// Base asset.
    pub asset: Address,
    /// Slippage bound in bps, applied to reward swaps.
    pub slip: u64,
}

/// A yield source behind a [`crate::BaseStrategy`].
pub trait Adapter: fmt::Debug + Clone + 'static {
    /// Short name for display.
    fn name(&self) -> &'static str;

    /// Base-asset value currently deployed, excluding the strategy's idle balance.
    fn deployed(&self, ledger: &Ledger, ctx: &AdapterContext) -> U256;

    /// Deploy `amount` of the strategy's idle balance. Fails with
    /// `BelowMinimum` if the position is worth less than `min_out`.
    fn invest(
        &mut self,
        ledger: &mut Ledger,
        ctx: &AdapterContext,
        amount: U256,
        min_out: U256,
    ) -> Result<()>;

    /// Free about `amount` of the base asset into the strategy's balance.
    /// Returns what was actually freed.
    fn withdraw(&mut self, ledger: &mut Ledger, ctx: &AdapterContext, amount: U256)
        -> Result<U256>;

    /// Claim rewards and convert them into the base asset held by the
    /// strategy. Returns the base-asset proceeds.
    fn harvest(&mut self, ledger: &mut Ledger, ctx: &AdapterContext) -> Result<U256>;
}
