pub mod notifier;
pub mod signal_cycle;
