// UI and formatting module

pub mod console;
pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use console::{format_alert_line, format_change_line, ConsoleSink, ALERT_PREFIX};
pub use formatters::{format_details, format_ms, format_percent, format_signal, format_summary_line};
