// Platform-specific code module

pub mod elevation;
pub mod interfaces;
pub mod probes;

// Re-exports for cleaner imports
pub use elevation::{ensure_probe_authorized, is_elevated};
pub use interfaces::{default_wireless_interface, FALLBACK_INTERFACE};
pub use probes::SystemProbes;
