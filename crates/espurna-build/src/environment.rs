//! Build environment configuration
//!
//! One `BuildEnvironment` per configured engine environment. The external
//! engine owns the values; this crate only reads them. Fallback semantics
//! for the optional overrides live in the accessors so every component
//! resolves them the same way.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, BuildResult};

/// Default name of the primary firmware image
pub const DEFAULT_PROG_NAME: &str = "firmware";

/// Configuration for a single build environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEnvironment {
    /// Project root directory
    pub project_dir: PathBuf,
    /// Build output directory
    pub build_dir: PathBuf,
    /// Base name of the primary firmware image
    pub prog_name: String,
    /// Identifier of this environment
    pub env_id: String,
    /// Optional build-name override for artifact naming
    #[serde(default)]
    pub build_name: Option<String>,
    /// Optional destination-directory override for stored artifacts
    #[serde(default)]
    pub destination: Option<PathBuf>,
}

impl BuildEnvironment {
    /// Create a new environment with default program name and no overrides
    pub fn new(
        project_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
        env_id: impl Into<String>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            build_dir: build_dir.into(),
            prog_name: DEFAULT_PROG_NAME.to_string(),
            env_id: env_id.into(),
            build_name: None,
            destination: None,
        }
    }

    /// Set the primary program name
    pub fn with_prog_name(mut self, prog_name: impl Into<String>) -> Self {
        self.prog_name = prog_name.into();
        self
    }

    /// Set the build-name override
    pub fn with_build_name(mut self, build_name: impl Into<String>) -> Self {
        self.build_name = Some(build_name.into());
        self
    }

    /// Set the destination-directory override
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Build name for artifact naming, falling back to the environment
    /// identifier when the override is absent or empty
    pub fn build_name_or_env(&self) -> &str {
        match &self.build_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.env_id,
        }
    }

    /// Destination directory for stored artifacts, falling back to the
    /// project directory when the override is absent or empty
    pub fn destination_or_project(&self) -> &Path {
        match &self.destination {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => &self.project_dir,
        }
    }

    /// Directory holding the firmware source files
    pub fn source_dir(&self) -> PathBuf {
        self.project_dir.join("espurna")
    }

    /// Umbrella header included first in the synthetic source
    pub fn umbrella_header(&self) -> PathBuf {
        self.source_dir().join("espurna.h")
    }

    /// Location of the synthetic single source inside the build directory
    pub fn single_source(&self) -> PathBuf {
        self.build_dir
            .join("espurna_single_source")
            .join("src")
            .join("main.cpp")
    }

    /// Primary firmware artifact produced by the engine
    pub fn primary_artifact(&self) -> PathBuf {
        self.build_dir.join(format!("{}.bin", self.prog_name))
    }

    /// Validate that every required value is present
    pub fn validate(&self) -> BuildResult<()> {
        if self.project_dir.as_os_str().is_empty() {
            return Err(BuildError::MissingEnvValue { key: "project_dir" });
        }
        if self.build_dir.as_os_str().is_empty() {
            return Err(BuildError::MissingEnvValue { key: "build_dir" });
        }
        if self.prog_name.is_empty() {
            return Err(BuildError::MissingEnvValue { key: "prog_name" });
        }
        if self.env_id.is_empty() {
            return Err(BuildError::MissingEnvValue { key: "env_id" });
        }
        Ok(())
    }
}
