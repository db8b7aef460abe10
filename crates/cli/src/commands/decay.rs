//! Locked-profit decay curve.

use alloy_primitives::U256;
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use yvault_rs_vault::math::mul_div_down;
use yvault_rs_vault::LockedProfit;

use crate::cli::{DecayArgs, OutputFormat};
use crate::output::format_decay_table;

/// Locked and released amounts at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct DecayPoint {
    /// Seconds since the report that locked the profit
    pub elapsed: u64,
    pub locked: U256,
    pub released: U256,
    /// Released share of the original amount, in percent
    pub released_pct: Decimal,
}

/// Sample `points + 1` evenly spaced points from the report to full release.
pub fn decay_curve(locked: U256, duration: u64, points: u64) -> Result<Vec<DecayPoint>> {
    if points == 0 {
        bail!("--points must be at least 1");
    }
    let mut profit =
        LockedProfit::new(duration, 0).context("Invalid locked profit duration")?;
    profit.record_gain(locked, 0);

    let curve = (0..=points)
        .map(|i| {
            let elapsed = duration * i / points;
            let still_locked = profit.locked_at(elapsed);
            let released = locked - still_locked;
            DecayPoint {
                elapsed,
                locked: still_locked,
                released,
                released_pct: percent(released, locked),
            }
        })
        .collect();
    Ok(curve)
}

/// `part / whole` in percent with two decimals, rounded down
fn percent(part: U256, whole: U256) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    let hundredths = mul_div_down(part, U256::from(10_000), whole);
    u64::try_from(hundredths).map_or(Decimal::ZERO, |h| Decimal::from(h) / Decimal::ONE_HUNDRED)
}

pub fn run_decay(args: &DecayArgs, format: OutputFormat) -> Result<()> {
    let curve = decay_curve(U256::from(args.locked), args.duration, args.points)?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_decay_table(&curve));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&curve)?;
            println!("{}", json);
        }
    }

    Ok(())
}
