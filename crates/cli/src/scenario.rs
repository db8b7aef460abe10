//! Scenario file format.
//!
//! A scenario describes a vault, the strategies and swap routers it can use,
//! the starting token balances and a list of steps to execute in order.
//! Amounts may be JSON numbers or decimal/hex strings.
//!
//! ```json
//! {
//!   "vault": { "address": "0xee..", "asset": "0xaa..", "admin": "0xad.." },
//!   "start": 1700000000,
//!   "balances": [{ "token": "0xaa..", "holder": "0xa1..", "amount": 1000 }],
//!   "strategies": [{ "config": { ... }, "adapter": { "kind": "idle" } }],
//!   "steps": [
//!     { "action": "deposit", "caller": "0xa1..", "assets": 1000 },
//!     { "action": "add_strategy", "strategy": "0x01..", "debt_ratio": 3600 },
//!     { "action": "report_all" }
//!   ]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Deserializer};
use yvault_rs_strategy::StrategyConfig;
use yvault_rs_vault::VaultConfig;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(u64),
    Text(String),
}

fn amount<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => Ok(U256::from(n)),
        RawAmount::Text(s) => U256::from_str(s.trim()).map_err(serde::de::Error::custom),
    }
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer)?
        .map(|raw| match raw {
            RawAmount::Number(n) => Ok(U256::from(n)),
            RawAmount::Text(s) => U256::from_str(s.trim()).map_err(serde::de::Error::custom),
        })
        .transpose()
}

/// A complete scenario.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub vault: VaultConfig,
    /// Unix timestamp the clock starts at
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub routers: Vec<RouterSpec>,
    #[serde(default)]
    pub strategies: Vec<StrategySpec>,
    #[serde(default)]
    pub keepers: Vec<Address>,
    pub steps: Vec<Step>,
}

/// Tokens minted before the first step.
#[derive(Debug, Deserialize)]
pub struct Balance {
    pub token: Address,
    pub holder: Address,
    #[serde(deserialize_with = "amount")]
    pub amount: U256,
}

/// A swap router and its rate table.
#[derive(Debug, Deserialize)]
pub struct RouterSpec {
    pub address: Address,
    pub routes: Vec<RateSpec>,
}

/// WAD-scaled rate for one direction of a pair.
#[derive(Debug, Deserialize)]
pub struct RateSpec {
    pub token_in: Address,
    pub token_out: Address,
    #[serde(deserialize_with = "amount")]
    pub rate: U256,
}

/// A strategy that `add_strategy` steps can refer to by address.
#[derive(Debug, Deserialize)]
pub struct StrategySpec {
    pub config: StrategyConfig,
    pub adapter: AdapterSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdapterSpec {
    Idle,
    Lending {
        pool: Address,
        reward_token: Address,
        router: Address,
    },
}

/// One step; `expect_error` turns it into an assertion that the step fails
/// with a message containing the given text.
#[derive(Debug, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub action: Action,
    #[serde(default)]
    pub expect_error: Option<String>,
}

/// Operations a step can perform. Admin and keeper operations default the
/// caller to the vault admin.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Deposit {
        caller: Address,
        #[serde(deserialize_with = "amount")]
        assets: U256,
        receiver: Option<Address>,
        #[serde(default, deserialize_with = "optional_amount")]
        min_shares: Option<U256>,
    },
    Mint {
        caller: Address,
        #[serde(deserialize_with = "amount")]
        shares: U256,
        receiver: Option<Address>,
        #[serde(default, deserialize_with = "optional_amount")]
        max_assets: Option<U256>,
    },
    Withdraw {
        caller: Address,
        #[serde(deserialize_with = "amount")]
        assets: U256,
        receiver: Option<Address>,
        owner: Option<Address>,
        #[serde(default, deserialize_with = "optional_amount")]
        max_shares: Option<U256>,
    },
    Redeem {
        caller: Address,
        #[serde(deserialize_with = "amount")]
        shares: U256,
        receiver: Option<Address>,
        owner: Option<Address>,
        #[serde(default, deserialize_with = "optional_amount")]
        min_assets: Option<U256>,
    },
    Approve {
        owner: Address,
        spender: Address,
        #[serde(deserialize_with = "amount")]
        shares: U256,
    },
    AddStrategy {
        caller: Option<Address>,
        strategy: Address,
        debt_ratio: u64,
    },
    RemoveStrategy {
        caller: Option<Address>,
        strategy: Address,
        #[serde(default, deserialize_with = "optional_amount")]
        min_received: Option<U256>,
    },
    SetDebtRatio {
        caller: Option<Address>,
        strategy: Address,
        debt_ratio: u64,
    },
    SuspendStrategy {
        caller: Option<Address>,
        strategy: Address,
    },
    SwapQueue {
        caller: Option<Address>,
        i: usize,
        j: usize,
    },
    Report {
        caller: Option<Address>,
        strategy: Address,
    },
    ReportAll {
        caller: Option<Address>,
    },
    Harvest {
        caller: Option<Address>,
        strategy: Address,
    },
    HarvestAll {
        caller: Option<Address>,
    },
    /// Interest: mint the vault asset into a pool
    Accrue {
        pool: Address,
        #[serde(deserialize_with = "amount")]
        amount: U256,
    },
    /// Loss: burn the vault asset from a pool
    Slash {
        pool: Address,
        #[serde(deserialize_with = "amount")]
        amount: U256,
    },
    /// Mint any token, typically a reward token to a strategy
    Reward {
        token: Address,
        to: Address,
        #[serde(deserialize_with = "amount")]
        amount: U256,
    },
    Advance {
        seconds: u64,
    },
    Pause {
        caller: Option<Address>,
    },
    Unpause {
        caller: Option<Address>,
    },
    SetLockedProfitDuration {
        caller: Option<Address>,
        duration: u64,
    },
    SetKeeper {
        caller: Option<Address>,
        keeper: Address,
        enabled: bool,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Deposit { .. } => "deposit",
            Action::Mint { .. } => "mint",
            Action::Withdraw { .. } => "withdraw",
            Action::Redeem { .. } => "redeem",
            Action::Approve { .. } => "approve",
            Action::AddStrategy { .. } => "add_strategy",
            Action::RemoveStrategy { .. } => "remove_strategy",
            Action::SetDebtRatio { .. } => "set_debt_ratio",
            Action::SuspendStrategy { .. } => "suspend_strategy",
            Action::SwapQueue { .. } => "swap_queue",
            Action::Report { .. } => "report",
            Action::ReportAll { .. } => "report_all",
            Action::Harvest { .. } => "harvest",
            Action::HarvestAll { .. } => "harvest_all",
            Action::Accrue { .. } => "accrue",
            Action::Slash { .. } => "slash",
            Action::Reward { .. } => "reward",
            Action::Advance { .. } => "advance",
            Action::Pause { .. } => "pause",
            Action::Unpause { .. } => "unpause",
            Action::SetLockedProfitDuration { .. } => "set_locked_profit_duration",
            Action::SetKeeper { .. } => "set_keeper",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
