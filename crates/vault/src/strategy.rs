//! Capability contract between the vault and its yield strategies.
//!
//! The vault only needs four things from a strategy: a live valuation, a way
//! to deploy idle funds, a way to pull funds back and a way to realize
//! rewards. Concrete adapters live in the `yvault-rs-strategy` crate.

use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ledger::Ledger;

/// Result of a strategy withdrawal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Assets transferred to the vault
    pub received: U256,
    /// Shortfall against the (clamped) request
    pub slippage: U256,
    /// Excess freed above the request, left in the strategy
    pub bonus: U256,
}

/// A yield source the vault can allocate capital to.
///
/// Strategies receive the ledger by mutable reference but never a handle to
/// the vault, so a strategy cannot re-enter the vault while it is mid-call.
pub trait Strategy: fmt::Debug {
    /// Address the strategy holds funds under
    fn address(&self) -> Address;

    /// The only vault allowed to call [`Strategy::withdraw`]
    fn vault(&self) -> Address;

    /// Token the strategy is denominated in
    fn asset(&self) -> Address;

    /// Current value managed by the strategy, computed fresh on every call
    fn total_assets(&self, ledger: &Ledger) -> U256;

    /// Deploy the strategy's idle balance into its yield source
    fn invest(&mut self, ledger: &mut Ledger, caller: Address) -> Result<()>;

    /// Free up to `assets` and transfer them to the vault
    fn withdraw(&mut self, ledger: &mut Ledger, caller: Address, assets: U256)
        -> Result<Withdrawal>;

    /// Claim rewards, convert them to the asset and sweep them to the vault
    fn harvest(&mut self, ledger: &mut Ledger, caller: Address) -> Result<()>;

    /// Clone into a new box; used to snapshot the vault for rollback
    fn clone_box(&self) -> Box<dyn Strategy>;
}

impl Clone for Box<dyn Strategy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
