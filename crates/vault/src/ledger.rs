//! Token balance book.
//!
//! The [`Ledger`] stands in for every ERC20 the vault touches: the asset it
//! custodies, the vault's own share token (keyed by the vault address), the
//! receipt tokens of yield sources and reward tokens. Balances, supplies and
//! allowances follow ERC20 semantics, including the unlimited-allowance
//! sentinel (`U256::MAX` is never decremented).

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use crate::error::{Result, VaultError};

/// Multi-token balance book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    balances: HashMap<Address, HashMap<Address, U256>>,
    supplies: HashMap<Address, U256>,
    allowances: HashMap<Address, HashMap<(Address, Address), U256>>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `holder` in `token`
    pub fn balance_of(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&token)
            .and_then(|book| book.get(&holder))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Total supply of `token`
    pub fn total_supply(&self, token: Address) -> U256 {
        self.supplies.get(&token).copied().unwrap_or(U256::ZERO)
    }

    /// Allowance granted by `owner` to `spender` in `token`
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&token)
            .and_then(|book| book.get(&(owner, spender)))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Create `amount` of `token` for `to`
    pub fn mint(&mut self, token: Address, to: Address, amount: U256) {
        *self.balance_entry(token, to) += amount;
        *self.supplies.entry(token).or_insert(U256::ZERO) += amount;
    }

    /// Destroy `amount` of `token` held by `from`
    pub fn burn(&mut self, token: Address, from: Address, amount: U256) -> Result<()> {
        self.debit(token, from, amount)?;
        let supply = self.supplies.entry(token).or_insert(U256::ZERO);
        *supply = supply.saturating_sub(amount);
        Ok(())
    }

    /// Move `amount` of `token` from `from` to `to`
    pub fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        if amount.is_zero() || from == to {
            return Ok(());
        }
        self.debit(token, from, amount)?;
        *self.balance_entry(token, to) += amount;
        Ok(())
    }

    /// Set the allowance of `spender` over `owner`'s `token`
    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.allowances
            .entry(token)
            .or_default()
            .insert((owner, spender), amount);
    }

    /// Consume `amount` of allowance; `U256::MAX` means unlimited and is left untouched
    pub fn spend_allowance(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<()> {
        let current = self.allowance(token, owner, spender);
        if current == U256::MAX {
            return Ok(());
        }
        if current < amount {
            return Err(VaultError::InsufficientAllowance {
                owner,
                spender,
                have: current,
                need: amount,
            });
        }
        self.approve(token, owner, spender, current - amount);
        Ok(())
    }

    /// Move `amount` of `owner`'s `token` to `to` on behalf of `spender`
    pub fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        if spender != owner {
            self.spend_allowance(token, owner, spender, amount)?;
        }
        self.transfer(token, owner, to, amount)
    }

    fn debit(&mut self, token: Address, holder: Address, amount: U256) -> Result<()> {
        let have = self.balance_of(token, holder);
        if have < amount {
            return Err(VaultError::InsufficientBalance {
                token,
                holder,
                have,
                need: amount,
            });
        }
        *self.balance_entry(token, holder) = have - amount;
        Ok(())
    }

    fn balance_entry(&mut self, token: Address, holder: Address) -> &mut U256 {
        self.balances
            .entry(token)
            .or_default()
            .entry(holder)
            .or_insert(U256::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: Address = Address::repeat_byte(0x01);
    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);

    #[test]
    fn test_mint_and_burn_track_supply() {
        let mut ledger = Ledger::new();
        ledger.mint(TOKEN, ALICE, U256::from(100));
        assert_eq!(ledger.total_supply(TOKEN), U256::from(100));

        ledger.burn(TOKEN, ALICE, U256::from(40)).unwrap();
        assert_eq!(ledger.balance_of(TOKEN, ALICE), U256::from(60));
        assert_eq!(ledger.total_supply(TOKEN), U256::from(60));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = Ledger::new();
        ledger.mint(TOKEN, ALICE, U256::from(10));

        let result = ledger.transfer(TOKEN, ALICE, BOB, U256::from(11));
        assert!(matches!(
            result,
            Err(VaultError::InsufficientBalance { need, .. }) if need == U256::from(11)
        ));
        assert_eq!(ledger.balance_of(TOKEN, ALICE), U256::from(10));
    }

    #[test]
    fn test_spend_allowance_decrements() {
        let mut ledger = Ledger::new();
        ledger.approve(TOKEN, ALICE, BOB, U256::from(50));
        ledger.spend_allowance(TOKEN, ALICE, BOB, U256::from(20)).unwrap();
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), U256::from(30));
    }

    #[test]
    fn test_unlimited_allowance_is_not_decremented() {
        let mut ledger = Ledger::new();
        ledger.approve(TOKEN, ALICE, BOB, U256::MAX);
        ledger.spend_allowance(TOKEN, ALICE, BOB, U256::from(20)).unwrap();
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), U256::MAX);
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let mut ledger = Ledger::new();
        ledger.mint(TOKEN, ALICE, U256::from(10));

        let result = ledger.transfer_from(TOKEN, BOB, ALICE, BOB, U256::from(5));
        assert!(matches!(result, Err(VaultError::InsufficientAllowance { .. })));

        ledger.approve(TOKEN, ALICE, BOB, U256::from(5));
        ledger
            .transfer_from(TOKEN, BOB, ALICE, BOB, U256::from(5))
            .unwrap();
        assert_eq!(ledger.balance_of(TOKEN, BOB), U256::from(5));
    }
}
