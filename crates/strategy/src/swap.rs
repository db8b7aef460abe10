//! Token swaps used by adapters to convert rewards into the base asset.
//!
//! # Overview
//!
//! [`Swap`] is the capability an adapter needs: quote and execute an
//! exact-input swap with a minimum output. [`SwapRouter`] is a rate-table
//! implementation that settles against its own inventory in the ledger.
//! It considers the direct pair and every one-hop route through an
//! intermediate token, and executes the one with the best output.
//!
//! Rates are WAD-scaled: a rate of `2e18` from `A` to `B` pays two units of
//! `B` per unit of `A`.
//!
//! # Example
//!
//! ```rust,ignore
//! use yvault_rs_strategy::{Swap, SwapRouter};
//!
//! let mut router = SwapRouter::new(router_address);
//! router.set_rate(reward, weth, rate_a)?;
//! router.set_rate(weth, asset, rate_b)?;
//! ledger.mint(asset, router_address, inventory);
//!
//! let out = router.swap_tokens(&mut ledger, strategy, reward, asset, amount, min_out)?;
//! ```

use std::collections::BTreeMap;
use std::fmt;

use alloy_primitives::{Address, U256};
use tracing::debug;
use yvault_rs_vault::{math::mul_div_down, Ledger, Result, VaultError, WAD};

/// Exact-input token swap.
pub trait Swap: fmt::Debug + Clone {
    /// Output `amount` of `token_in` would buy right now.
    fn quote(&self, token_in: Address, token_out: Address, amount: U256) -> Result<U256>;

    /// Sell `amount` of `token_in` held by `caller` for at least `min_received`
    /// of `token_out`. Returns the amount received.
    fn swap_tokens(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        token_in: Address,
        token_out: Address,
        amount: U256,
        min_received: U256,
    ) -> Result<U256>;
}

/// A priced path from one token to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Tokens visited in order, starting with the input token.
    pub path: Vec<Address>,
    /// Output for the quoted input.
    pub amount_out: U256,
}

/// Rate-table router with direct and one-hop routing.
#[derive(Debug, Clone, Default)]
pub struct SwapRouter {
    address: Address,
    rates: BTreeMap<Address, BTreeMap<Address, U256>>,
}

impl SwapRouter {
    /// Create a router that holds its inventory under `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            rates: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Set the WAD-scaled rate for selling `token_in` into `token_out`.
    pub fn set_rate(&mut self, token_in: Address, token_out: Address, rate: U256) -> Result<()> {
        if rate.is_zero() {
            return Err(VaultError::Zero);
        }
        if token_in == token_out {
            return Err(VaultError::NoRoute {
                token_in,
                token_out,
            });
        }
        self.rates.entry(token_in).or_default().insert(token_out, rate);
        Ok(())
    }

    /// WAD-scaled rate of the direct pair, if one is listed.
    pub fn rate(&self, token_in: Address, token_out: Address) -> Option<U256> {
        self.rates.get(&token_in)?.get(&token_out).copied()
    }

    /// Every direct and one-hop route from `token_in` to `token_out`.
    pub fn routes(&self, token_in: Address, token_out: Address, amount: U256) -> Vec<Route> {
        let Some(hops) = self.rates.get(&token_in) else {
            return Vec::new();
        };

        let mut routes = Vec::new();
        for (&mid, &rate) in hops {
            let first = mul_div_down(amount, rate, WAD);
            if mid == token_out {
                routes.push(Route {
                    path: vec![token_in, token_out],
                    amount_out: first,
                });
            } else if let Some(second) = self.rate(mid, token_out) {
                routes.push(Route {
                    path: vec![token_in, mid, token_out],
                    amount_out: mul_div_down(first, second, WAD),
                });
            }
        }
        routes
    }

    /// The route with the highest output; on a tie the shorter path wins.
    pub fn best_route(&self, token_in: Address, token_out: Address, amount: U256) -> Result<Route> {
        self.routes(token_in, token_out, amount)
            .into_iter()
            .max_by(|a, b| {
                a.amount_out
                    .cmp(&b.amount_out)
                    .then(b.path.len().cmp(&a.path.len()))
            })
            .ok_or(VaultError::NoRoute {
                token_in,
                token_out,
            })
    }
}

impl Swap for SwapRouter {
    fn quote(&self, token_in: Address, token_out: Address, amount: U256) -> Result<U256> {
        Ok(self.best_route(token_in, token_out, amount)?.amount_out)
    }

    fn swap_tokens(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        token_in: Address,
        token_out: Address,
        amount: U256,
        min_received: U256,
    ) -> Result<U256> {
        if amount.is_zero() {
            return Err(VaultError::Zero);
        }
        let route = self.best_route(token_in, token_out, amount)?;
        if route.amount_out < min_received {
            return Err(VaultError::BelowMinimum {
                value: route.amount_out,
                min: min_received,
            });
        }

        ledger.transfer(token_in, caller, self.address, amount)?;
        ledger.transfer(token_out, self.address, caller, route.amount_out)?;

        debug!(
            router = %self.address,
            %caller,
            %token_in,
            %token_out,
            %amount,
            received = %route.amount_out,
            hops = route.path.len() - 1,
            "swap"
        );
        Ok(route.amount_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTER: Address = Address::repeat_byte(0x5a);
    const CALLER: Address = Address::repeat_byte(0xc0);
    const REWARD: Address = Address::repeat_byte(0x0f);
    const WETH: Address = Address::repeat_byte(0xe7);
    const ASSET: Address = Address::repeat_byte(0xaa);

    fn wad(n: u64) -> U256 {
        U256::from(n) * WAD
    }

    /// 1 REWARD = 2 ASSET direct, or 1 REWARD = 0.5 WETH = 2.5 ASSET via WETH
    fn router() -> SwapRouter {
        let mut router = SwapRouter::new(ROUTER);
        router.set_rate(REWARD, ASSET, wad(2)).unwrap();
        router.set_rate(REWARD, WETH, WAD / U256::from(2)).unwrap();
        router.set_rate(WETH, ASSET, wad(5)).unwrap();
        router
    }

    #[test]
    fn test_best_route_prefers_higher_output() {
        let route = router().best_route(REWARD, ASSET, U256::from(100)).unwrap();
        assert_eq!(route.path, vec![REWARD, WETH, ASSET]);
        assert_eq!(route.amount_out, U256::from(250));
    }

    #[test]
    fn test_direct_route_only() {
        let mut router = SwapRouter::new(ROUTER);
        router.set_rate(REWARD, ASSET, wad(3)).unwrap();
        assert_eq!(router.quote(REWARD, ASSET, U256::from(10)).unwrap(), U256::from(30));
    }

    #[test]
    fn test_no_route() {
        let err = router().best_route(ASSET, REWARD, U256::from(1)).unwrap_err();
        assert_eq!(
            err,
            VaultError::NoRoute {
                token_in: ASSET,
                token_out: REWARD
            }
        );
    }

    #[test]
    fn test_set_rate_validation() {
        let mut router = SwapRouter::new(ROUTER);
        assert_eq!(router.set_rate(REWARD, ASSET, U256::ZERO), Err(VaultError::Zero));
        assert!(matches!(
            router.set_rate(ASSET, ASSET, WAD),
            Err(VaultError::NoRoute { .. })
        ));
    }

    #[test]
    fn test_swap_settles_against_inventory() {
        let router = router();
        let mut ledger = Ledger::new();
        ledger.mint(REWARD, CALLER, U256::from(100));
        ledger.mint(ASSET, ROUTER, U256::from(1_000));

        let out = router
            .swap_tokens(&mut ledger, CALLER, REWARD, ASSET, U256::from(100), U256::from(250))
            .unwrap();

        assert_eq!(out, U256::from(250));
        assert_eq!(ledger.balance_of(ASSET, CALLER), U256::from(250));
        assert_eq!(ledger.balance_of(REWARD, ROUTER), U256::from(100));
        assert_eq!(ledger.balance_of(ASSET, ROUTER), U256::from(750));
    }

    #[test]
    fn test_swap_below_minimum() {
        let router = router();
        let mut ledger = Ledger::new();
        ledger.mint(REWARD, CALLER, U256::from(100));
        ledger.mint(ASSET, ROUTER, U256::from(1_000));

        let err = router
            .swap_tokens(&mut ledger, CALLER, REWARD, ASSET, U256::from(100), U256::from(251))
            .unwrap_err();
        assert!(matches!(err, VaultError::BelowMinimum { .. }));
        assert_eq!(ledger.balance_of(REWARD, CALLER), U256::from(100));
    }

    #[test]
    fn test_swap_without_inventory_fails() {
        let router = router();
        let mut ledger = Ledger::new();
        ledger.mint(REWARD, CALLER, U256::from(100));

        let err = router
            .swap_tokens(&mut ledger, CALLER, REWARD, ASSET, U256::from(100), U256::ZERO)
            .unwrap_err();
        assert!(matches!(err, VaultError::InsufficientBalance { .. }));
    }
}
