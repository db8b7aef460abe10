//! Detailed output formatting for the final vault state.

use alloy_primitives::U256;
use colored::Colorize;
use rust_decimal::Decimal;
use yvault_rs_vault::{VaultSnapshot, WAD};

/// Share price with up to 6 decimals, or "-" before the first deposit.
fn format_share_price(snapshot: &VaultSnapshot) -> String {
    snapshot
        .share_price(WAD)
        .and_then(|price| u128::try_from(price).ok())
        .and_then(|price| i128::try_from(price).ok())
        .and_then(|price| Decimal::try_from_i128_with_scale(price, 18).ok())
        .map(|price| price.round_dp(6).normalize().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_duration(seconds: u64) -> String {
    if seconds % 3600 == 0 {
        format!("{}h", seconds / 3600)
    } else if seconds % 60 == 0 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}s", seconds)
    }
}

fn format_locked(snapshot: &VaultSnapshot) -> String {
    if snapshot.locked_profit == U256::ZERO {
        "0".to_string()
    } else {
        format!(
            "{} (of {} at last report)",
            snapshot.locked_profit, snapshot.raw_locked_profit
        )
    }
}

pub fn format_vault_detail(snapshot: &VaultSnapshot) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", format!("Vault {}", snapshot.address).bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    // Basic Info
    output.push_str(&format!("{}\n", "Basic Info".cyan().bold()));
    output.push_str(&format!("  Asset:        {}\n", snapshot.asset));
    output.push_str(&format!("  Timestamp:    {}\n", snapshot.timestamp));
    output.push_str(&format!(
        "  Paused:       {}\n\n",
        if snapshot.paused { "Yes".red().to_string() } else { "No".to_string() }
    ));

    // Accounting
    output.push_str(&format!("{}\n", "Accounting".cyan().bold()));
    output.push_str(&format!("  Total Supply: {}\n", snapshot.total_supply));
    output.push_str(&format!("  Total Assets: {}\n", snapshot.total_assets));
    output.push_str(&format!("  Free Assets:  {}\n", snapshot.free_assets));
    output.push_str(&format!("  Idle Assets:  {}\n", snapshot.idle_assets));
    output.push_str(&format!("  Share Price:  {}\n\n", format_share_price(snapshot)));

    // Locked profit
    output.push_str(&format!("{}\n", "Locked Profit".cyan().bold()));
    output.push_str(&format!("  Locked:       {}\n", format_locked(snapshot)));
    output.push_str(&format!("  Last Report:  {}\n", snapshot.last_report));
    output.push_str(&format!(
        "  Unlock Over:  {}\n\n",
        format_duration(snapshot.locked_profit_duration)
    ));

    // Debt
    output.push_str(&format!("{}\n", "Debt".cyan().bold()));
    output.push_str(&format!("  Total Debt:   {}\n", snapshot.total_debt));
    output.push_str(&format!("  Debt Ratio:   {}\n", snapshot.total_debt_ratio));
    output.push_str(&format!("  Strategies:   {}\n", snapshot.strategies.len()));

    output
}
