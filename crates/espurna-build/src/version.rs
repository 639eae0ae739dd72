//! Version provider seam
//!
//! The full application version is computed outside this crate. Components
//! that need it receive a `VersionProvider` so tests can substitute fakes.

use crate::environment::BuildEnvironment;
use crate::error::{BuildError, BuildResult};

/// Process environment variable consulted by [`EnvironmentVersion`]
pub const VERSION_VAR: &str = "ESPURNA_VERSION";

/// Supplies the application version for a build environment
pub trait VersionProvider {
    /// Version string used for artifact naming
    fn version(&self, env: &BuildEnvironment) -> BuildResult<String>;
}

/// Fixed version string
#[derive(Debug, Clone)]
pub struct StaticVersion(String);

impl StaticVersion {
    /// Create a provider that always returns the given version
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl VersionProvider for StaticVersion {
    fn version(&self, _env: &BuildEnvironment) -> BuildResult<String> {
        Ok(self.0.clone())
    }
}

/// Reads the version from the `ESPURNA_VERSION` process environment variable
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentVersion;

impl VersionProvider for EnvironmentVersion {
    fn version(&self, _env: &BuildEnvironment) -> BuildResult<String> {
        match std::env::var(VERSION_VAR) {
            Ok(version) if !version.is_empty() => Ok(version),
            _ => Err(BuildError::MissingEnvValue { key: VERSION_VAR }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_env() -> BuildEnvironment {
        BuildEnvironment::new("/project", "/build", "nodemcu")
    }

    #[test]
    fn test_static_version() {
        let provider = StaticVersion::new("1.15.0");
        assert_eq!(provider.version(&test_env()).unwrap(), "1.15.0");
    }

    #[test]
    fn test_static_version_is_stable_across_calls() {
        let provider = StaticVersion::new("1.15.0-dev");
        let env = test_env();
        assert_eq!(
            provider.version(&env).unwrap(),
            provider.version(&env).unwrap()
        );
    }
}
