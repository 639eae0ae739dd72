//! CLI subcommand implementations

pub mod copy;
pub mod generate;
pub mod merge;
pub mod plan;

use anyhow::{Context, Result};
use clap::Args;
use espurna_build::{
    BuildEnvironment, Builder, EnvironmentVersion, OutputMode, StaticVersion, VersionProvider,
};
use std::path::PathBuf;

/// Build environment options shared by every subcommand
#[derive(Args, Debug)]
pub struct EnvArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Build output directory (defaults to <project>/.pio/build/<environment>)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Environment identifier
    #[arg(long, short = 'e')]
    pub environment: String,

    /// Base name of the primary firmware image
    #[arg(long, default_value = "firmware")]
    pub prog_name: String,

    /// Build-name override for artifact naming
    #[arg(long, env = "ESPURNA_BUILD_NAME")]
    pub build_name: Option<String>,

    /// Destination-directory override for stored artifacts
    #[arg(long, env = "ESPURNA_BUILD_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Release version used for artifact naming
    #[arg(long, env = "ESPURNA_VERSION")]
    pub release_version: Option<String>,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl EnvArgs {
    /// Build the library-side environment from the parsed flags
    fn to_environment(&self) -> BuildEnvironment {
        let build_dir = self.build_dir.clone().unwrap_or_else(|| {
            self.project_dir
                .join(".pio")
                .join("build")
                .join(&self.environment)
        });
        let mut env = BuildEnvironment::new(&self.project_dir, build_dir, &self.environment)
            .with_prog_name(&self.prog_name);
        if let Some(build_name) = &self.build_name {
            env = env.with_build_name(build_name);
        }
        if let Some(destination) = &self.destination {
            env = env.with_destination(destination);
        }
        env
    }

    fn version_provider(&self) -> Box<dyn VersionProvider> {
        match &self.release_version {
            Some(version) => Box::new(StaticVersion::new(version)),
            None => Box::new(EnvironmentVersion),
        }
    }

    fn output_mode(&self) -> OutputMode {
        if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }

    /// Create a builder for these flags
    pub fn builder(&self) -> Result<Builder> {
        let builder = Builder::new(self.to_environment(), self.version_provider())
            .context("Invalid build environment")?;
        Ok(builder.with_output(self.output_mode()))
    }
}
