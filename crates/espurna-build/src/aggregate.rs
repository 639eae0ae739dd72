//! Single-source aggregation
//!
//! Emulates the `.ino` concatenation trick: every firmware compilation unit
//! is folded into one synthetic translation unit via textual inclusion, and
//! a rewrite rule reroutes the entry-point node to the synthetic source at
//! graph-construction time. The synthetic source lives in the build
//! directory, so no extra clean-up is needed.

use globset::Glob;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::environment::BuildEnvironment;
use crate::error::{BuildError, BuildResult};
use crate::graph::{CommandRule, GraphRegistry, RewriteRule};

/// Disclaimer emitted as the first line of the synthetic source
pub const DISCLAIMER: &str = "// !!! Automatically generated file; DO NOT EDIT !!! \n";

/// Glob matching aggregatable compilation units
const SOURCE_GLOB: &str = "*.cpp";

/// File-name suffix of the entry point replaced by the synthetic source
const ENTRY_POINT: &str = "main.cpp";

/// Discover aggregatable sources directly under `dir`, sorted by file name
/// so repeated discovery yields the same order
pub fn discover_sources(dir: &Path) -> BuildResult<Vec<PathBuf>> {
    let matcher = Glob::new(SOURCE_GLOB)
        .map_err(|error| BuildError::InvalidGlob {
            pattern: SOURCE_GLOB.to_string(),
            error,
        })?
        .compile_matcher();

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            sources.push(entry.path().to_path_buf());
        }
    }
    sources.sort();

    if sources.is_empty() {
        return Err(BuildError::EmptySourceSet {
            dir: dir.to_path_buf(),
        });
    }
    Ok(sources)
}

/// Merge the sources into a synthetic source at `target`
///
/// The content is the disclaimer line, one include of the umbrella header,
/// then one include per source in input order, all UTF-8. It is assembled
/// in a buffer and persisted over the target in a single rename, so a
/// concurrent reader never observes a partially written file.
pub fn merge_sources(umbrella: &Path, sources: &[PathBuf], target: &Path) -> BuildResult<()> {
    let umbrella = umbrella
        .canonicalize()
        .map_err(|_| BuildError::UmbrellaHeaderNotFound {
            path: umbrella.to_path_buf(),
        })?;

    let mut buffer = Vec::new();
    buffer.extend_from_slice(DISCLAIMER.as_bytes());
    buffer.extend_from_slice(include_line(&umbrella).as_bytes());
    for source in sources {
        let resolved = source
            .canonicalize()
            .map_err(|error| BuildError::source_unreadable(source, error))?;
        File::open(&resolved).map_err(|error| BuildError::source_unreadable(source, error))?;
        buffer.extend_from_slice(include_line(&resolved).as_bytes());
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|error| BuildError::io(parent, error))?;
    }
    let mut staged = NamedTempFile::new_in(target.parent().unwrap_or_else(|| Path::new(".")))?;
    staged.write_all(&buffer)?;
    staged
        .persist(target)
        .map_err(|error| BuildError::io(target, error.error))?;
    Ok(())
}

/// Register the single-source substitution for this environment
///
/// Registers the rewrite rule replacing the entry-point node with the
/// synthetic source, and the command rule producing the synthetic source
/// from the discovered inputs. The original entry point stays on disk
/// untouched. Returns the synthetic source path. Idempotent.
pub fn register_single_source(
    env: &BuildEnvironment,
    registry: &mut GraphRegistry,
) -> BuildResult<PathBuf> {
    let synthetic = env.single_source();
    let source_dir = env.source_dir();

    let scope = format!("{}/{}", source_dir.display(), SOURCE_GLOB);
    registry.register_rewrite(RewriteRule::new(scope, ENTRY_POINT, synthetic.clone())?)?;

    let sources = discover_sources(&source_dir)?;
    registry.register_command(CommandRule {
        output: synthetic.clone(),
        inputs: sources,
    })?;

    Ok(synthetic)
}

fn include_line(path: &Path) -> String {
    format!("#include \"{}\"\n", path.display())
}
