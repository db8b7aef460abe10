//! Table formatting for steps, strategies, events and decay curves.

use rust_decimal::Decimal;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use yvault_rs_vault::{VaultEvent, VaultSnapshot};

use crate::commands::decay::DecayPoint;
use crate::commands::run::StepRecord;

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Time")]
    timestamp: u64,
    #[tabled(rename = "Result")]
    result: String,
}

#[derive(Tabled)]
struct StrategyRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Strategy")]
    address: String,
    #[tabled(rename = "Debt Ratio")]
    debt_ratio: u64,
    #[tabled(rename = "Allocation")]
    allocation: String,
    #[tabled(rename = "Debt")]
    debt: String,
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Event")]
    event: String,
}

#[derive(Tabled)]
struct DecayRow {
    #[tabled(rename = "Elapsed (s)")]
    elapsed: u64,
    #[tabled(rename = "Locked")]
    locked: String,
    #[tabled(rename = "Released")]
    released: String,
    #[tabled(rename = "Released %")]
    released_pct: String,
}

pub(crate) fn truncate_address(addr: &str) -> String {
    if addr.len() > 10 {
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    } else {
        addr.to_string()
    }
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let kept: String = text.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

pub(crate) fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value)
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));
    table.to_string()
}

pub fn format_steps_table(steps: &[StepRecord]) -> String {
    if steps.is_empty() {
        return "No steps executed.".to_string();
    }

    let rows: Vec<StepRow> = steps
        .iter()
        .map(|s| StepRow {
            index: s.index,
            action: if s.failed {
                format!("{} (failed)", s.action)
            } else {
                s.action.to_string()
            },
            timestamp: s.timestamp,
            result: truncate_text(&s.detail, 80),
        })
        .collect();

    render(rows)
}

pub fn format_strategies_table(snapshot: &VaultSnapshot) -> String {
    if snapshot.strategies.is_empty() {
        return "No strategies in queue.".to_string();
    }

    let rows: Vec<StrategyRow> = snapshot
        .strategies
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let allocation = if snapshot.total_debt_ratio == 0 {
                "-".to_string()
            } else {
                format_pct(
                    Decimal::from(s.debt_ratio) * Decimal::ONE_HUNDRED
                        / Decimal::from(snapshot.total_debt_ratio),
                )
            };
            StrategyRow {
                position: i,
                address: truncate_address(&format!("{}", s.strategy)),
                debt_ratio: s.debt_ratio,
                allocation,
                debt: s.debt.to_string(),
            }
        })
        .collect();

    render(rows)
}

pub fn format_events_table(events: &[VaultEvent]) -> String {
    if events.is_empty() {
        return "No events.".to_string();
    }

    let rows: Vec<EventRow> = events
        .iter()
        .enumerate()
        .map(|(i, e)| EventRow {
            index: i + 1,
            event: truncate_text(&format!("{:?}", e), 100),
        })
        .collect();

    render(rows)
}

pub fn format_decay_table(curve: &[DecayPoint]) -> String {
    let rows: Vec<DecayRow> = curve
        .iter()
        .map(|p| DecayRow {
            elapsed: p.elapsed,
            locked: p.locked.to_string(),
            released: p.released.to_string(),
            released_pct: format_pct(p.released_pct),
        })
        .collect();

    render(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            "0xaaaa...aaaa"
        );
        assert_eq!(truncate_address("0x1234"), "0x1234");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a long step description", 10), "a long ...");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(Decimal::from(50)), "50.00%");
    }
}
