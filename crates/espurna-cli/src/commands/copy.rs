//! Copy command - store the built firmware at its destination

use super::EnvArgs;
use anyhow::{Context, Result};

pub fn run(args: &EnvArgs) -> Result<()> {
    let mut builder = args.builder()?;
    builder
        .setup()
        .context("Failed to register build targets")?;
    let destination = builder
        .copy_artifact()
        .context("Failed to store the firmware image")?;
    println!("Stored {}", destination.display());
    Ok(())
}
