//! Multi-strategy vault engine
//!
//! This crate implements the accounting core of an ERC-4626 style yield
//! vault: a single-asset vault that issues shares to depositors, allocates
//! capital across a bounded queue of pluggable strategies according to debt
//! ratios, and periodically reconciles each strategy's reported value with
//! its recorded debt.
//!
//! # Overview
//!
//! - **Share accounting**: proportional asset/share conversion, rounding in
//!   the vault's favor on every path
//! - **Locked profit**: realized gains unlock linearly, so deposits cannot
//!   sandwich a report
//! - **Strategy registry**: an ordered withdrawal queue with per-strategy
//!   debt and debt ratio bookkeeping
//! - **Report engine**: gain/loss realization and lend/collect rebalancing
//! - **Vault facade**: deposit, mint, withdraw, redeem (plus slippage-bounded
//!   variants) and administration
//!
//! Token balances are kept in a [`Ledger`] that callers own and pass to every
//! operation. Strategies implement the [`Strategy`] trait; reference
//! adapters live in the `yvault-rs-strategy` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use yvault_rs_vault::{Ledger, Vault, VaultConfig};
//! use alloy_primitives::U256;
//!
//! let mut ledger = Ledger::new();
//! let mut vault = Vault::new(VaultConfig::new(vault_address, asset, admin), now)?;
//!
//! ledger.mint(asset, alice, U256::from(1_000));
//! vault.deposit(&mut ledger, alice, U256::from(1_000), alice, now)?;
//!
//! vault.add_strategy(admin, Box::new(strategy), 3600)?;
//! let outcomes = vault.report_all(&mut ledger, admin, now)?;
//! ```

pub mod error;
pub mod events;
pub mod ledger;
pub mod locked_profit;
pub mod math;
pub mod registry;
pub mod report;
pub mod shares;
pub mod snapshot;
pub mod strategy;
pub mod vault;

// Re-export commonly used types
pub use error::{Result, VaultError};
pub use events::VaultEvent;
pub use ledger::Ledger;
pub use locked_profit::{LockedProfit, DEFAULT_LOCKED_PROFIT_DURATION, MAX_LOCKED_PROFIT_DURATION};
pub use math::{RoundingDirection, MAX_BPS, WAD};
pub use registry::{
    StrategyEntry, StrategyRecord, StrategyRegistry, MAX_QUEUE_LENGTH, MAX_TOTAL_DEBT_RATIO,
};
pub use report::ReportOutcome;
pub use shares::ShareAccounting;
pub use snapshot::VaultSnapshot;
pub use strategy::{Strategy, Withdrawal};
pub use vault::{Vault, VaultConfig, WithdrawReceipt};
