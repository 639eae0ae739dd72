//! Plan command - register build targets and print the resulting plan

use super::EnvArgs;
use anyhow::{Context, Result};

pub fn run(args: &EnvArgs, json: bool) -> Result<()> {
    let mut builder = args.builder()?;
    builder
        .setup()
        .context("Failed to register build targets")?;
    let descriptor = builder
        .artifact()
        .context("Failed to derive artifact name")?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "artifact": descriptor,
                "registry": builder.registry(),
            })
        );
        return Ok(());
    }

    println!("Artifact:    {}", descriptor.filename);
    println!("Destination: {}", descriptor.destination.display());

    let registry = builder.registry();
    for rule in registry.rewrites() {
        println!(
            "Rewrite:     {} ({}) -> {}",
            rule.scope,
            rule.suffix,
            rule.replacement.display()
        );
    }
    for command in registry.commands() {
        println!(
            "Command:     {} <- {} input(s)",
            command.output.display(),
            command.inputs.len()
        );
    }
    for (name, destination) in registry.aliases() {
        println!("Alias:       {} -> {}", name, destination.display());
    }
    Ok(())
}
