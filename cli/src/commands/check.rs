//! Check command - print the resolved ports without binding anything.

use anyhow::Result;
use testapp_core::PortSpec;

pub fn run(spec: &PortSpec, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(spec)?);
        return Ok(());
    }

    println!("{:<12} {}", "FRONT PORT", spec.front_port());
    println!("{:<12} {}", "APP PORT", spec.app_port());
    println!("{:<12} {}", "OFFSET", spec.offset());
    println!(
        "{:<12} {}",
        "PROXY",
        if spec.needs_proxy() { "yes" } else { "no" }
    );
    Ok(())
}
