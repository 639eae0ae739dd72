//! Build environment setup and invocation driver
use std::path::PathBuf;

use crate::aggregate;
use crate::artifact::ArtifactDescriptor;
use crate::codegen::{CodegenInjector, CodegenOutcome, Generator};
use crate::environment::BuildEnvironment;
use crate::error::{BuildError, BuildResult};
use crate::graph::GraphRegistry;
use crate::output::OutputMode;
use crate::targets::{self, BUILD_AND_COPY};
use crate::version::VersionProvider;

/// Orchestrates per-environment registrations and per-invocation passes
///
/// Owns the environment and its registration table; the version provider
/// and the generator stay injected so tests can substitute fakes.
pub struct Builder {
    env: BuildEnvironment,
    registry: GraphRegistry,
    version: Box<dyn VersionProvider>,
    output: OutputMode,
}

impl Builder {
    /// Create a builder for a validated environment
    pub fn new(env: BuildEnvironment, version: Box<dyn VersionProvider>) -> BuildResult<Self> {
        env.validate()?;
        Ok(Self {
            env,
            registry: GraphRegistry::new(),
            version,
            output: OutputMode::default(),
        })
    }

    /// Set the output mode
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Environment this builder was configured with
    pub fn environment(&self) -> &BuildEnvironment {
        &self.env
    }

    /// Registrations made so far, for the engine to consume
    pub fn registry(&self) -> &GraphRegistry {
        &self.registry
    }

    /// Perform the once-per-environment registrations: the single-source
    /// substitution and the build-and-copy target. Idempotent.
    pub fn setup(&mut self) -> BuildResult<()> {
        let synthetic = aggregate::register_single_source(&self.env, &mut self.registry)?;
        self.output
            .detail(format!("Single source registered at {}", synthetic.display()));

        let descriptor = self.artifact()?;
        targets::register_build_and_copy(&mut self.registry, &self.env, &descriptor)?;
        self.output
            .detail(format!("Copy target bound to {}", descriptor.destination.display()));
        Ok(())
    }

    /// Resolve the version and derive the artifact descriptor
    pub fn artifact(&self) -> BuildResult<ArtifactDescriptor> {
        let version = self.version.version(&self.env)?;
        Ok(ArtifactDescriptor::derive(&version, &self.env))
    }

    /// Materialize the synthetic single source now
    ///
    /// This is the action behind the registered command rule: discover the
    /// sources and merge them into the synthetic translation unit.
    pub fn aggregate(&self) -> BuildResult<PathBuf> {
        let sources = aggregate::discover_sources(&self.env.source_dir())?;
        let synthetic = self.env.single_source();
        aggregate::merge_sources(&self.env.umbrella_header(), &sources, &synthetic)?;
        self.output.detail(format!(
            "Merged {} sources into {}",
            sources.len(),
            synthetic.display()
        ));
        Ok(synthetic)
    }

    /// Run the codegen injection pass for the requested targets
    ///
    /// On `HaltAfterGeneration` the caller must end the invocation; no
    /// process exit happens here.
    pub fn run_codegen(
        &self,
        requested: &[PathBuf],
        generator: &dyn Generator,
    ) -> BuildResult<CodegenOutcome> {
        CodegenInjector::new(generator)
            .with_output(self.output)
            .inject(requested)
    }

    /// Execute the registered build-and-copy target
    pub fn copy_artifact(&self) -> BuildResult<PathBuf> {
        let target = self
            .registry
            .copy_targets()
            .iter()
            .find(|target| target.name == BUILD_AND_COPY)
            .ok_or_else(|| BuildError::TargetNotRegistered {
                name: BUILD_AND_COPY.to_string(),
            })?;
        target.execute()?;
        Ok(target.destination.clone())
    }
}
