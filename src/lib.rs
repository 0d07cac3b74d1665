// hwdash library - Public API

// Re-export error types
pub mod error;
pub use error::{DashError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::DashboardConfig;

// Initialize logging
pub fn init_logging() {
    use std::io::Write;

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<8} {}",
                chrono::Local::now().format(LOG_TIME_FORMAT),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Timestamp layout of every log line
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
