//! Strategies for yvault-rs vaults.
//!
//! This crate provides the shared strategy lifecycle ([`BaseStrategy`]), the
//! [`Adapter`] trait that plugs a yield source into it, two reference
//! adapters and a multi-route [`SwapRouter`] used to sell reward tokens.
//!
//! Every failure is a [`yvault_rs_vault::VaultError`], so errors raised inside
//! an adapter or a swap reach the vault caller unchanged.

pub mod adapters;
mod base;
mod config;
pub mod swap;

pub use adapters::{Adapter, AdapterContext, IdleAdapter, LendingAdapter};
pub use base::BaseStrategy;
pub use config::{bps_to_decimal, StrategyConfig, DEFAULT_SLIP, MAX_FEE};
pub use swap::{Route, Swap, SwapRouter};
