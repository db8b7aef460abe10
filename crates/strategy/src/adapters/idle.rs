use alloy_primitives::U256;
use yvault_rs_vault::{Ledger, Result};

use super::{Adapter, AdapterContext};

/// Keeps the asset in the strategy. Earns nothing and has nothing to claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleAdapter;

impl Adapter for IdleAdapter {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn deployed(&self, _ledger: &Ledger, _ctx: &AdapterContext) -> U256 {
        U256::ZERO
    }

    fn invest(
        &mut self,
        _ledger: &mut Ledger,
        _ctx: &AdapterContext,
        _amount: U256,
        _min_out: U256,
    ) -> Result<()> {
        Ok(())
    }

    fn withdraw(
        &mut self,
        _ledger: &mut Ledger,
        _ctx: &AdapterContext,
        _amount: U256,
    ) -> Result<U256> {
        Ok(U256::ZERO)
    }

    fn harvest(&mut self, _ledger: &mut Ledger, _ctx: &AdapterContext) -> Result<U256> {
        Ok(U256::ZERO)
    }
}
