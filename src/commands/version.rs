use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("hwdash version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
