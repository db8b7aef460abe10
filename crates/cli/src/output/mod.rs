//! Output formatting for CLI results.

pub mod detail;
pub mod table;

pub use detail::format_vault_detail;
pub use table::{
    format_decay_table, format_events_table, format_steps_table, format_strategies_table,
};
