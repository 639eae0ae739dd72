//! Copy-to-destination target registration
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::artifact::ArtifactDescriptor;
use crate::environment::BuildEnvironment;
use crate::error::{BuildError, BuildResult};
use crate::graph::GraphRegistry;

/// Name of the build-and-copy target and its alias
pub const BUILD_AND_COPY: &str = "build-and-copy";

/// Secondary target copying the primary artifact to its destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyTarget {
    /// Target name
    pub name: String,
    /// Human-readable title
    pub title: String,
    /// Human-readable description
    pub description: String,
    /// Primary artifact the copy depends on
    pub source: PathBuf,
    /// Destination path
    pub destination: PathBuf,
}

impl CopyTarget {
    /// Copy the primary artifact to the destination, creating parent
    /// directories as needed. The primary artifact must already exist.
    pub fn execute(&self) -> BuildResult<()> {
        if !self.source.is_file() {
            return Err(BuildError::PrimaryArtifactMissing {
                path: self.source.clone(),
            });
        }
        if let Some(parent) = self.destination.parent() {
            fs::create_dir_all(parent).map_err(|error| BuildError::io(parent, error))?;
        }
        fs::copy(&self.source, &self.destination).map_err(|error| BuildError::CopyFailed {
            from: self.source.clone(),
            to: self.destination.clone(),
            error,
        })?;
        Ok(())
    }
}

/// Register the build-and-copy target and its alias for this environment
///
/// The destination comes verbatim from the descriptor; no naming logic
/// lives here. Idempotent: identical re-registration is a no-op.
pub fn register_build_and_copy(
    registry: &mut GraphRegistry,
    env: &BuildEnvironment,
    descriptor: &ArtifactDescriptor,
) -> BuildResult<()> {
    let target = CopyTarget {
        name: BUILD_AND_COPY.to_string(),
        title: "Build firmware.bin and store a copy".to_string(),
        description: "Build and store firmware.bin as \
                      <destination>/espurna-<version>/espurna-<version>-<build name>.bin \
                      (default destination is the project directory)"
            .to_string(),
        source: env.primary_artifact(),
        destination: descriptor.destination.clone(),
    };
    registry.register_copy_target(target)?;
    registry.bind_alias(BUILD_AND_COPY, descriptor.destination.clone())
}
