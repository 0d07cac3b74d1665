//! Startup precondition command handler.

use anyhow::Result;

use crate::platform::{check_preconditions, PreconditionPaths, SysinfoSource};

/// Run the startup checks against this host.
pub fn verify() -> Result<()> {
    let source = SysinfoSource::new();
    check_preconditions(&PreconditionPaths::default(), source.has_temperature_sensors())?;
    Ok(())
}

/// Execute the check command
pub fn execute() -> Result<()> {
    verify()?;
    println!("All startup checks passed");
    Ok(())
}
