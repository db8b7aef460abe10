//! Events recorded by the vault.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::strategy::Withdrawal;

/// A state change observable by off-chain monitoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VaultEvent {
    Deposit {
        caller: Address,
        owner: Address,
        assets: U256,
        shares: U256,
    },
    Withdraw {
        caller: Address,
        receiver: Address,
        owner: Address,
        assets: U256,
        shares: U256,
        /// Part of `assets` the vault could not deliver
        shortfall: U256,
    },
    StrategyAdded {
        strategy: Address,
        debt_ratio: u64,
    },
    StrategyRemoved {
        strategy: Address,
        received: U256,
    },
    DebtRatioSet {
        strategy: Address,
        debt_ratio: u64,
    },
    QueuePositionsSwapped {
        i: usize,
        j: usize,
    },
    Lend {
        strategy: Address,
        assets: U256,
    },
    Collect {
        strategy: Address,
        requested: U256,
        withdrawal: Withdrawal,
    },
    Harvest {
        strategy: Address,
        proceeds: U256,
    },
    Report {
        strategy: Address,
        gain: U256,
        loss: U256,
    },
    LockedProfitDurationSet {
        duration: u64,
    },
    KeeperSet {
        keeper: Address,
        enabled: bool,
    },
    Paused,
    Unpaused,
}
