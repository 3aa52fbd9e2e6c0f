use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("wifimon version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
