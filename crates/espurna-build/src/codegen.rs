//! re2c target injection
//!
//! Generated `.re.cpp.inc` files are produced by a separate, blocking
//! invocation that halts the build afterwards. Splicing generation into the
//! same graph evaluation is unsafe: the engine may have recorded a stale
//! dependency snapshot at scan time, a parallel compilation job may read
//! the file mid-write, and re-registering the rule inside a shared graph
//! cache can leak across concurrently configured environments. The invoker
//! re-runs the build to pick up the generated files.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{BuildError, BuildResult};
use crate::output::OutputMode;

/// Marker suffix identifying generator outputs among requested targets
pub const GENERATED_SUFFIX: &str = ".re.cpp.inc";

/// Output token stripped from a target name to recover its source
const OUTPUT_TOKEN: &str = ".cpp.inc";

/// Flags passed to every generator invocation: deterministic output,
/// strict-error mode
pub const GENERATOR_FLAGS: [&str; 4] = ["--no-generation-date", "--case-ranges", "-W", "-Werror"];

/// Default generator program
pub const DEFAULT_GENERATOR: &str = "re2c";

/// A requested target recognized as generator output, with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFileTarget {
    /// Requested output path
    pub target: PathBuf,
    /// Source path, the target name with the output token stripped
    pub source: PathBuf,
}

/// Select generated-file targets from the requested paths, in request order
pub fn select_generated_targets(requested: &[PathBuf]) -> Vec<GeneratedFileTarget> {
    requested
        .iter()
        .filter_map(|target| {
            let name = target.file_name()?.to_str()?;
            if !name.ends_with(GENERATED_SUFFIX) {
                return None;
            }
            let source_name = name.strip_suffix(OUTPUT_TOKEN)?;
            Some(GeneratedFileTarget {
                target: target.clone(),
                source: target.with_file_name(source_name),
            })
        })
        .collect()
}

/// External code generator seam
pub trait Generator {
    /// Produce `target` from `source`. Non-zero exit is an error.
    fn generate(&self, source: &Path, target: &Path) -> BuildResult<()>;
}

/// re2c invocation with fixed safety flags and explicit output redirection
#[derive(Debug, Clone)]
pub struct Re2c {
    program: String,
}

impl Re2c {
    /// Create a runner for the default `re2c` program
    pub fn new() -> Self {
        Self {
            program: DEFAULT_GENERATOR.to_string(),
        }
    }

    /// Override the generator program
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Rendered command line for the given pair
    pub fn command_line(&self, source: &Path, target: &Path) -> String {
        format!(
            "{} {} -o {} {}",
            self.program,
            GENERATOR_FLAGS.join(" "),
            target.display(),
            source.display()
        )
    }
}

impl Default for Re2c {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for Re2c {
    fn generate(&self, source: &Path, target: &Path) -> BuildResult<()> {
        let output = Command::new(&self.program)
            .args(GENERATOR_FLAGS)
            .arg("-o")
            .arg(target)
            .arg(source)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| BuildError::GeneratorSpawn {
                program: self.program.clone(),
                error,
            })?
            .wait_with_output()
            .map_err(|error| BuildError::GeneratorSpawn {
                program: self.program.clone(),
                error,
            })?;

        if !output.status.success() {
            return Err(BuildError::GeneratorFailed {
                command: self.command_line(source, target),
                exit_code: output.status.code().unwrap_or(1),
                output: combined_output(&output.stdout, &output.stderr),
            });
        }
        Ok(())
    }
}

fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::new();
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    if !stdout.is_empty() {
        combined.push_str("STDOUT:\n");
        combined.push_str(&stdout);
    }
    if !stderr.is_empty() {
        combined.push_str("STDERR:\n");
        combined.push_str(&stderr);
    }
    combined
}

/// Outcome of a codegen injection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenOutcome {
    /// No generated-file targets were requested; the build proceeds
    Continue,
    /// Files were generated; the driver must end the invocation and the
    /// caller re-runs the build to pick them up
    HaltAfterGeneration,
}

/// Runs the generator for requested generated-file targets
pub struct CodegenInjector<'a> {
    generator: &'a dyn Generator,
    output: OutputMode,
}

impl<'a> CodegenInjector<'a> {
    /// Create an injector around the given generator
    pub fn new(generator: &'a dyn Generator) -> Self {
        Self {
            generator,
            output: OutputMode::default(),
        }
    }

    /// Set the output mode
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Process requested targets strictly in selection order
    ///
    /// Each source must exist before its generator run, and each run is
    /// exit-checked before the next starts. The first failure aborts the
    /// pass.
    pub fn inject(&self, requested: &[PathBuf]) -> BuildResult<CodegenOutcome> {
        let selected = select_generated_targets(requested);
        if selected.is_empty() {
            return Ok(CodegenOutcome::Continue);
        }

        for pair in &selected {
            if !pair.source.is_file() {
                return Err(BuildError::GeneratorSourceMissing {
                    target: pair.target.clone(),
                    source_path: pair.source.clone(),
                });
            }
            self.output.action(format!("Generating {}", display_name(&pair.target)));
            self.generator.generate(&pair.source, &pair.target)?;
        }

        Ok(CodegenOutcome::HaltAfterGeneration)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
