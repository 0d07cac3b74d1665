// Core business logic module

pub mod config;
pub mod dashboard;

// Re-export commonly used items
pub use config::{CpuScale, DashboardConfig};
pub use dashboard::{Dashboard, DashboardSnapshot, SharedState};
