use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::EnvArgs;

/// ESPurna firmware build helper.
///
/// Wires single-source aggregation, artifact naming, and the
/// build-and-copy target around the project build engine, and drives re2c
/// for scanner files that still need regeneration.
///
/// EXAMPLES:
///     espurna-build plan -e nodemcu            Show the build plan
///     espurna-build merge -e nodemcu           Merge sources into one unit
///     espurna-build generate -e nodemcu espurna/utils.re.cpp.inc
///     espurna-build copy -e nodemcu            Store the built firmware
///
/// ENVIRONMENT VARIABLES:
///     ESPURNA_VERSION            Release version used for artifact names
///     ESPURNA_BUILD_NAME         Build-name override for artifact names
///     ESPURNA_BUILD_DESTINATION  Destination-directory override
#[derive(Parser)]
#[command(name = "espurna-build")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register build targets and print the resulting plan
    Plan {
        #[command(flatten)]
        env: EnvArgs,
        /// Output the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge the firmware sources into the synthetic single source
    Merge {
        #[command(flatten)]
        env: EnvArgs,
    },

    /// Generate requested .re.cpp.inc targets, then stop
    ///
    /// Generation runs on its own and the invocation ends right after it;
    /// re-run the build to pick up the generated files.
    Generate {
        #[command(flatten)]
        env: EnvArgs,
        /// Requested target paths
        targets: Vec<PathBuf>,
        /// Generator program to invoke
        #[arg(long, default_value = "re2c")]
        re2c: String,
    },

    /// Copy the built firmware image to its destination
    Copy {
        #[command(flatten)]
        env: EnvArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan { env, json } => commands::plan::run(&env, json),
        Commands::Merge { env } => commands::merge::run(&env),
        Commands::Generate { env, targets, re2c } => commands::generate::run(&env, &targets, &re2c),
        Commands::Copy { env } => commands::copy::run(&env),
    }
}
