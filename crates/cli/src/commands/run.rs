//! Scenario runner.

use std::collections::HashMap;
use std::fs;

use alloy_primitives::{Address, U256};
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use yvault_rs_strategy::{BaseStrategy, IdleAdapter, LendingAdapter, SwapRouter};
use yvault_rs_vault::{Ledger, Strategy, Vault, VaultError, VaultEvent, VaultSnapshot};

use crate::cli::{OutputFormat, RunArgs};
use crate::output::{
    format_events_table, format_steps_table, format_strategies_table, format_vault_detail,
};
use crate::scenario::{Action, AdapterSpec, Scenario, Step};

/// What happened at one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub action: &'static str,
    pub timestamp: u64,
    /// `true` when the step failed as the scenario expected
    pub failed: bool,
    pub detail: String,
}

/// Final state after all steps ran.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepRecord>,
    pub snapshot: VaultSnapshot,
    pub events: Vec<VaultEvent>,
}

/// A vault plus everything it interacts with.
struct Simulation {
    vault: Vault,
    ledger: Ledger,
    now: u64,
    strategies: HashMap<Address, Box<dyn Strategy>>,
}

impl Simulation {
    fn build(scenario: &Scenario) -> Result<Self> {
        let vault = Vault::new(scenario.vault.clone(), scenario.start)
            .context("Invalid vault configuration")?;
        let mut ledger = Ledger::new();
        for balance in &scenario.balances {
            ledger.mint(balance.token, balance.holder, balance.amount);
        }

        let mut routers = HashMap::new();
        for spec in &scenario.routers {
            let mut router = SwapRouter::new(spec.address);
            for rate in &spec.routes {
                router
                    .set_rate(rate.token_in, rate.token_out, rate.rate)
                    .with_context(|| format!("Invalid rate on router {}", spec.address))?;
            }
            routers.insert(spec.address, router);
        }

        let mut strategies: HashMap<Address, Box<dyn Strategy>> = HashMap::new();
        for spec in &scenario.strategies {
            let address = spec.config.address;
            let strategy: Box<dyn Strategy> = match &spec.adapter {
                AdapterSpec::Idle => Box::new(
                    BaseStrategy::new(spec.config.clone(), IdleAdapter)
                        .with_context(|| format!("Invalid strategy {address}"))?,
                ),
                AdapterSpec::Lending {
                    pool,
                    reward_token,
                    router,
                } => {
                    let router = routers
                        .get(router)
                        .cloned()
                        .ok_or_else(|| anyhow!("Strategy {address} uses unknown router {router}"))?;
                    let adapter = LendingAdapter::new(*pool, *reward_token, router);
                    Box::new(
                        BaseStrategy::new(spec.config.clone(), adapter)
                            .with_context(|| format!("Invalid strategy {address}"))?,
                    )
                }
            };
            if strategies.insert(address, strategy).is_some() {
                bail!("Strategy {address} is defined twice");
            }
        }

        let mut simulation = Self {
            vault,
            ledger,
            now: scenario.start,
            strategies,
        };
        let admin = simulation.vault.admin();
        for keeper in &scenario.keepers {
            simulation
                .vault
                .set_keeper(admin, *keeper, true)
                .with_context(|| format!("Cannot add keeper {keeper}"))?;
        }
        Ok(simulation)
    }

    /// Execute one action and describe its effect.
    fn apply(&mut self, action: &Action) -> std::result::Result<String, VaultError> {
        let now = self.now;
        let admin = self.vault.admin();
        let ledger = &mut self.ledger;
        let detail = match *action {
            Action::Deposit {
                caller,
                assets,
                receiver,
                min_shares,
            } => {
                let receiver = receiver.unwrap_or(caller);
                let shares = match min_shares {
                    Some(min) => self
                        .vault
                        .safe_deposit(ledger, caller, assets, receiver, min, now)?,
                    None => self.vault.deposit(ledger, caller, assets, receiver, now)?,
                };
                format!("{assets} assets -> {shares} shares")
            }
            Action::Mint {
                caller,
                shares,
                receiver,
                max_assets,
            } => {
                let receiver = receiver.unwrap_or(caller);
                let assets = match max_assets {
                    Some(max) => self
                        .vault
                        .safe_mint(ledger, caller, shares, receiver, max, now)?,
                    None => self.vault.mint(ledger, caller, shares, receiver, now)?,
                };
                format!("{shares} shares for {assets} assets")
            }
            Action::Withdraw {
                caller,
                assets,
                receiver,
                owner,
                max_shares,
            } => {
                let receiver = receiver.unwrap_or(caller);
                let owner = owner.unwrap_or(caller);
                let receipt = match max_shares {
                    Some(max) => self
                        .vault
                        .safe_withdraw(ledger, caller, assets, receiver, owner, max, now)?,
                    None => self
                        .vault
                        .withdraw(ledger, caller, assets, receiver, owner, now)?,
                };
                format!(
                    "{} shares burned, {} delivered, {} short",
                    receipt.shares, receipt.delivered, receipt.shortfall
                )
            }
            Action::Redeem {
                caller,
                shares,
                receiver,
                owner,
                min_assets,
            } => {
                let receiver = receiver.unwrap_or(caller);
                let owner = owner.unwrap_or(caller);
                let receipt = match min_assets {
                    Some(min) => self
                        .vault
                        .safe_redeem(ledger, caller, shares, receiver, owner, min, now)?,
                    None => self
                        .vault
                        .redeem(ledger, caller, shares, receiver, owner, now)?,
                };
                format!(
                    "{} shares -> {} delivered, {} short",
                    receipt.shares, receipt.delivered, receipt.shortfall
                )
            }
            Action::Approve {
                owner,
                spender,
                shares,
            } => {
                self.vault.approve_shares(ledger, owner, spender, shares);
                format!("{spender} may spend {shares} shares of {owner}")
            }
            Action::AddStrategy {
                caller,
                strategy,
                debt_ratio,
            } => {
                let caller = caller.unwrap_or(admin);
                let boxed = self
                    .strategies
                    .get(&strategy)
                    .cloned()
                    .ok_or(VaultError::NotStrategy { strategy })?;
                self.vault.add_strategy(caller, boxed, debt_ratio)?;
                format!("{strategy} at ratio {debt_ratio}")
            }
            Action::RemoveStrategy {
                caller,
                strategy,
                min_received,
            } => {
                let caller = caller.unwrap_or(admin);
                let received = self.vault.remove_strategy(
                    ledger,
                    caller,
                    strategy,
                    min_received.unwrap_or(U256::ZERO),
                    now,
                )?;
                format!("{strategy} removed, {received} received")
            }
            Action::SetDebtRatio {
                caller,
                strategy,
                debt_ratio,
            } => {
                let caller = caller.unwrap_or(admin);
                self.vault.set_debt_ratio(caller, strategy, debt_ratio)?;
                format!("{strategy} ratio {debt_ratio}")
            }
            Action::SuspendStrategy { caller, strategy } => {
                let caller = caller.unwrap_or(admin);
                let outcome = self.vault.suspend_strategy(ledger, caller, strategy, now)?;
                format!("{strategy} suspended, {} collected", outcome.collected)
            }
            Action::SwapQueue { caller, i, j } => {
                let caller = caller.unwrap_or(admin);
                self.vault.swap_queue_positions(caller, i, j)?;
                format!("positions {i} and {j} swapped")
            }
            Action::Report { caller, strategy } => {
                let caller = caller.unwrap_or(admin);
                let outcome = self.vault.report(ledger, caller, strategy, now)?;
                describe_outcome(&outcome)
            }
            Action::ReportAll { caller } => {
                let caller = caller.unwrap_or(admin);
                let outcomes = self.vault.report_all(ledger, caller, now)?;
                outcomes
                    .iter()
                    .map(describe_outcome)
                    .collect::<Vec<_>>()
                    .join("; ")
            }
            Action::Harvest { caller, strategy } => {
                let caller = caller.unwrap_or(admin);
                let outcome = self.vault.harvest(ledger, caller, strategy, now)?;
                describe_outcome(&outcome)
            }
            Action::HarvestAll { caller } => {
                let caller = caller.unwrap_or(admin);
                let outcomes = self.vault.harvest_all(ledger, caller, now)?;
                outcomes
                    .iter()
                    .map(describe_outcome)
                    .collect::<Vec<_>>()
                    .join("; ")
            }
            Action::Accrue { pool, amount } => {
                ledger.mint(self.vault.asset(), pool, amount);
                format!("{pool} +{amount}")
            }
            Action::Slash { pool, amount } => {
                ledger.burn(self.vault.asset(), pool, amount)?;
                format!("{pool} -{amount}")
            }
            Action::Reward { token, to, amount } => {
                ledger.mint(token, to, amount);
                format!("{to} +{amount} of {token}")
            }
            Action::Advance { seconds } => {
                self.now = now.saturating_add(seconds);
                format!("clock at {}", self.now)
            }
            Action::Pause { caller } => {
                let caller = caller.unwrap_or(admin);
                self.vault.pause(caller)?;
                "paused".to_string()
            }
            Action::Unpause { caller } => {
                let caller = caller.unwrap_or(admin);
                self.vault.unpause(caller)?;
                "unpaused".to_string()
            }
            Action::SetLockedProfitDuration { caller, duration } => {
                let caller = caller.unwrap_or(admin);
                self.vault.set_locked_profit_duration(caller, duration, now)?;
                format!("{duration}s")
            }
            Action::SetKeeper {
                caller,
                keeper,
                enabled,
            } => {
                let caller = caller.unwrap_or(admin);
                self.vault.set_keeper(caller, keeper, enabled)?;
                format!("{keeper} {}", if enabled { "enabled" } else { "disabled" })
            }
        };
        Ok(detail)
    }

    fn step(&mut self, index: usize, step: &Step) -> Result<StepRecord> {
        let action = step.action.name();
        let result = self.apply(&step.action);
        debug!(index, action, ok = result.is_ok(), "step");

        let (failed, detail) = match (result, &step.expect_error) {
            (Ok(detail), None) => (false, detail),
            (Ok(_), Some(expected)) => {
                bail!("Step {index} ({action}) succeeded but was expected to fail with \"{expected}\"")
            }
            (Err(err), None) => {
                return Err(anyhow!(err).context(format!("Step {index} ({action}) failed")));
            }
            (Err(err), Some(expected)) => {
                let message = err.to_string();
                if !message.contains(expected.as_str()) {
                    bail!("Step {index} ({action}) failed with \"{message}\", expected \"{expected}\"");
                }
                (true, message)
            }
        };

        Ok(StepRecord {
            index,
            action,
            timestamp: self.now,
            failed,
            detail,
        })
    }
}

fn describe_outcome(outcome: &yvault_rs_vault::ReportOutcome) -> String {
    format!(
        "{}: gain {}, loss {}, lent {}, collected {}, debt {}",
        outcome.strategy, outcome.gain, outcome.loss, outcome.lent, outcome.collected, outcome.debt
    )
}

/// Load a scenario and execute every step.
pub fn run_scenario_file(args: &RunArgs) -> Result<RunReport> {
    let raw = fs::read_to_string(&args.scenario)
        .with_context(|| format!("Failed to read scenario {}", args.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse scenario {}", args.scenario.display()))?;
    execute(&scenario)
}

/// Execute a parsed scenario.
pub fn execute(scenario: &Scenario) -> Result<RunReport> {
    let mut simulation = Simulation::build(scenario)?;
    let steps = scenario
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| simulation.step(index + 1, step))
        .collect::<Result<Vec<_>>>()?;

    info!(steps = steps.len(), "scenario complete");
    Ok(RunReport {
        steps,
        snapshot: simulation.vault.snapshot(&simulation.ledger, simulation.now),
        events: simulation.vault.drain_events(),
    })
}

pub fn run_scenario(args: &RunArgs, format: OutputFormat) -> Result<()> {
    let report = run_scenario_file(args)?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_steps_table(&report.steps));
            println!();
            println!("{}", format_vault_detail(&report.snapshot));
            println!("{}", format_strategies_table(&report.snapshot));
            if args.events {
                println!();
                println!("{}", format_events_table(&report.events));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}
