//! Shared fixtures for vault integration tests.

use alloy_primitives::{Address, U256};
use yvault_rs_vault::{Ledger, Result, Strategy, Vault, VaultConfig, VaultError, Withdrawal, MAX_BPS};

pub const T0: u64 = 1_700_000_000;
pub const VAULT: Address = Address::repeat_byte(0xee);
pub const ASSET: Address = Address::repeat_byte(0xaa);
pub const ADMIN: Address = Address::repeat_byte(0xad);
pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const BOB: Address = Address::repeat_byte(0xb0);
/// Token the mock strategy mints to record what it observed mid-call
pub const PROBE: Address = Address::repeat_byte(0x9b);

/// Strategy that parks invested funds at a pool address.
///
/// Gains and losses are simulated by minting to or burning from the pool;
/// rewards by minting the asset to the rewards account.
#[derive(Debug, Clone)]
pub struct MockStrategy {
    pub address: Address,
    pub vault: Address,
    pub asset: Address,
    pub pool: Address,
    pub rewards: Address,
    /// Portion of every withdrawal lost on the way out, in bps
    pub haircut_bps: u64,
    pub fail_invest: bool,
}

impl MockStrategy {
    pub fn new(id: u8) -> Self {
        Self {
            address: Address::repeat_byte(id),
            vault: VAULT,
            asset: ASSET,
            pool: Address::repeat_byte(id.wrapping_add(0x40)),
            rewards: Address::repeat_byte(id.wrapping_add(0x80)),
            haircut_bps: 0,
            fail_invest: false,
        }
    }

    pub fn boxed(self) -> Box<dyn Strategy> {
        Box::new(self)
    }
}

impl Strategy for MockStrategy {
    fn address(&self) -> Address {
        self.address
    }

    fn vault(&self) -> Address {
        self.vault
    }

    fn asset(&self) -> Address {
        self.asset
    }

    fn total_assets(&self, ledger: &Ledger) -> U256 {
        ledger.balance_of(self.asset, self.address) + ledger.balance_of(self.asset, self.pool)
    }

    fn invest(&mut self, ledger: &mut Ledger, caller: Address) -> Result<()> {
        if caller != self.vault {
            return Err(VaultError::NotVault { caller });
        }
        if self.fail_invest {
            return Err(VaultError::NothingToInvest);
        }
        let idle = ledger.balance_of(self.asset, self.address);
        ledger.transfer(self.asset, self.address, self.pool, idle)
    }

    fn withdraw(&mut self, ledger: &mut Ledger, caller: Address, assets: U256) -> Result<Withdrawal> {
        if caller != self.vault {
            return Err(VaultError::NotVault { caller });
        }
        ledger.mint(PROBE, self.address, ledger.total_supply(self.vault));

        let requested = assets.min(self.total_assets(ledger));
        let idle = ledger.balance_of(self.asset, self.address);
        if requested > idle {
            ledger.transfer(self.asset, self.pool, self.address, requested - idle)?;
        }
        let lost = requested * U256::from(self.haircut_bps) / U256::from(MAX_BPS);
        ledger.burn(self.asset, self.address, lost)?;
        let received = requested - lost;
        ledger.transfer(self.asset, self.address, self.vault, received)?;

        Ok(Withdrawal {
            received,
            slippage: lost,
            bonus: U256::ZERO,
        })
    }

    fn harvest(&mut self, ledger: &mut Ledger, caller: Address) -> Result<()> {
        if caller != self.vault {
            return Err(VaultError::NotVault { caller });
        }
        let rewards = ledger.balance_of(self.asset, self.rewards);
        ledger.transfer(self.asset, self.rewards, self.vault, rewards)
    }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

pub fn setup() -> (Vault, Ledger) {
    let vault = Vault::new(VaultConfig::new(VAULT, ASSET, ADMIN), T0).unwrap();
    let mut ledger = Ledger::new();
    ledger.mint(ASSET, ALICE, U256::from(1_000_000));
    ledger.mint(ASSET, BOB, U256::from(1_000_000));
    (vault, ledger)
}

pub fn units(n: u64) -> U256 {
    U256::from(n)
}
