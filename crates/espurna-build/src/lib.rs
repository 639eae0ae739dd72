//! ESPurna firmware build orchestration
//!
//! Sits between the firmware source tree and the external build engine:
//! - Single-source aggregation with entry-point substitution
//! - Version-derived artifact naming
//! - Build-and-copy target and alias registration
//! - re2c generation for requested `.re.cpp.inc` targets
//!
//! The engine itself, the version computation, and the re2c binary are
//! external collaborators reached through narrow seams (`GraphRegistry`,
//! `VersionProvider`, `Generator`).

pub mod aggregate;
pub mod artifact;
pub mod builder;
pub mod codegen;
pub mod environment;
pub mod error;
pub mod graph;
pub mod output;
pub mod targets;
pub mod version;

// Re-export main types
pub use aggregate::{discover_sources, merge_sources, register_single_source, DISCLAIMER};
pub use artifact::ArtifactDescriptor;
pub use builder::Builder;
pub use codegen::{
    select_generated_targets, CodegenInjector, CodegenOutcome, GeneratedFileTarget, Generator,
    Re2c, DEFAULT_GENERATOR, GENERATED_SUFFIX, GENERATOR_FLAGS,
};
pub use environment::{BuildEnvironment, DEFAULT_PROG_NAME};
pub use error::{BuildError, BuildResult};
pub use graph::{CommandRule, GraphRegistry, RewriteRule};
pub use output::OutputMode;
pub use targets::{register_build_and_copy, CopyTarget, BUILD_AND_COPY};
pub use version::{EnvironmentVersion, StaticVersion, VersionProvider, VERSION_VAR};
