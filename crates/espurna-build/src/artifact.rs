//! Firmware artifact naming
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::environment::BuildEnvironment;

/// Canonical name and destination for a firmware build artifact
///
/// Derived, never stored: the same version and environment always produce
/// the same descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// Version-derived artifact prefix (`espurna-<version>`)
    pub prefix: String,
    /// Full artifact file name
    pub filename: String,
    /// Destination path for the stored copy
    pub destination: PathBuf,
}

impl ArtifactDescriptor {
    /// Derive the descriptor for a version and environment. Pure: no I/O,
    /// deterministic for equal inputs.
    pub fn derive(version: &str, env: &BuildEnvironment) -> Self {
        let prefix = format!("espurna-{}", version);
        let suffix = format!("{}.bin", env.build_name_or_env());
        let filename = format!("{}-{}", prefix, suffix);
        let destination = env.destination_or_project().join(&prefix).join(&filename);
        Self {
            prefix,
            filename,
            destination,
        }
    }
}

impl fmt::Display for ArtifactDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_env() -> BuildEnvironment {
        BuildEnvironment::new("/project", "/build", "nodemcu")
    }

    #[rstest]
    #[case("1.15.0", None, "espurna-1.15.0-nodemcu.bin")]
    #[case("1.15.0", Some("nightly"), "espurna-1.15.0-nightly.bin")]
    #[case("1.15.0", Some(""), "espurna-1.15.0-nodemcu.bin")]
    #[case("1.16.0-dev", None, "espurna-1.16.0-dev-nodemcu.bin")]
    fn test_filename_format(
        #[case] version: &str,
        #[case] build_name: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut env = test_env();
        if let Some(name) = build_name {
            env = env.with_build_name(name);
        }
        assert_eq!(ArtifactDescriptor::derive(version, &env).filename, expected);
    }

    #[test]
    fn test_destination_defaults_to_project_dir() {
        let descriptor = ArtifactDescriptor::derive("1.15.0", &test_env());
        assert_eq!(
            descriptor.destination,
            PathBuf::from("/project/espurna-1.15.0/espurna-1.15.0-nodemcu.bin")
        );
    }

    #[test]
    fn test_destination_honors_override() {
        let env = test_env().with_destination("/srv/firmware");
        let descriptor = ArtifactDescriptor::derive("1.15.0", &env);
        assert_eq!(
            descriptor.destination,
            PathBuf::from("/srv/firmware/espurna-1.15.0/espurna-1.15.0-nodemcu.bin")
        );
    }

    #[test]
    fn test_derive_is_deterministic() {
        let env = test_env().with_build_name("nightly");
        assert_eq!(
            ArtifactDescriptor::derive("1.15.0", &env),
            ArtifactDescriptor::derive("1.15.0", &env)
        );
    }

    #[test]
    fn test_distinct_inputs_do_not_collide() {
        let env = test_env();
        let a = ArtifactDescriptor::derive("1.15.0", &env);
        let b = ArtifactDescriptor::derive("1.15.1", &env);
        assert_ne!(a.filename, b.filename);

        let c = ArtifactDescriptor::derive("1.15.0", &env.clone().with_build_name("nightly"));
        assert_ne!(a.filename, c.filename);
    }
}
