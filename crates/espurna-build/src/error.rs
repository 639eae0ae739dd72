//! Build orchestration error types
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Missing build environment value: {key}")]
    MissingEnvValue { key: &'static str },

    #[error("Umbrella header not found: {path}")]
    UmbrellaHeaderNotFound { path: PathBuf },

    #[error("No source files found in {dir}")]
    EmptySourceSet { dir: PathBuf },

    #[error("Source file not readable: {path}: {error}")]
    SourceUnreadable {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {error}")]
    InvalidGlob {
        pattern: String,
        error: globset::Error,
    },

    #[error("Generator source not found for target '{target}': {source_path}")]
    GeneratorSourceMissing {
        target: PathBuf,
        source_path: PathBuf,
    },

    #[error("Failed to spawn generator '{program}': {error}")]
    GeneratorSpawn {
        program: String,
        error: std::io::Error,
    },

    #[error("Generator failed with exit code {exit_code}: {command}\n{output}")]
    GeneratorFailed {
        command: String,
        exit_code: i32,
        output: String,
    },

    #[error("Primary artifact not found: {path}")]
    PrimaryArtifactMissing { path: PathBuf },

    #[error("Failed to copy {from} to {to}: {error}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        error: std::io::Error,
    },

    #[error("Conflicting {kind} registration for '{key}'")]
    ConflictingRegistration { kind: &'static str, key: String },

    #[error("Target not registered: {name}")]
    TargetNotRegistered { name: String },

    #[error("I/O error at {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create an unreadable-source error
    pub fn source_unreadable(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            error,
        }
    }

    /// Create a conflicting-registration error
    pub fn conflicting(kind: &'static str, key: impl Into<String>) -> Self {
        Self::ConflictingRegistration {
            kind,
            key: key.into(),
        }
    }
}
