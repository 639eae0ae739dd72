//! Generate command - run re2c for requested generated-file targets

use super::EnvArgs;
use anyhow::{Context, Result};
use espurna_build::{select_generated_targets, CodegenOutcome, Re2c};
use std::path::PathBuf;

pub fn run(args: &EnvArgs, targets: &[PathBuf], program: &str) -> Result<()> {
    let builder = args.builder()?;
    let generator = Re2c::new().with_program(program);

    match builder
        .run_codegen(targets, &generator)
        .context("Generation failed")?
    {
        CodegenOutcome::HaltAfterGeneration => {
            let count = select_generated_targets(targets).len();
            println!(
                "Generated {} file(s); re-run the build to pick them up",
                count
            );
        }
        CodegenOutcome::Continue => {
            println!("No generated-file targets requested");
        }
    }
    Ok(())
}
