//! Merge command - materialize the synthetic single source

use super::EnvArgs;
use anyhow::{Context, Result};

pub fn run(args: &EnvArgs) -> Result<()> {
    let builder = args.builder()?;
    let synthetic = builder.aggregate().context("Failed to merge sources")?;
    println!("Merged sources into {}", synthetic.display());
    Ok(())
}
