//! Build graph registrations owned by a single environment
//!
//! The external engine consults this table when it constructs its
//! dependency graph: rewrite rules substitute nodes, command rules declare
//! output-from-inputs edges, copy targets and aliases expose invokable
//! secondary targets. The table is owned by the build configuration, never
//! shared between environments, so independently configured environments
//! cannot interfere with each other.

use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, BuildResult};
use crate::targets::CopyTarget;

/// Substitution rule consulted at graph-construction time
///
/// A node is rewritten when its path matches the scope glob and its file
/// name ends with the suffix. The original file stays on disk untouched.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteRule {
    /// Glob limiting the rule to a set of candidate nodes
    pub scope: String,
    /// File-name suffix selecting the node to replace
    pub suffix: String,
    /// Replacement node path
    pub replacement: PathBuf,
    #[serde(skip)]
    matcher: GlobMatcher,
}

impl RewriteRule {
    /// Create a rewrite rule from a scope glob, a file-name suffix, and the
    /// replacement node path
    pub fn new(
        scope: impl Into<String>,
        suffix: impl Into<String>,
        replacement: impl Into<PathBuf>,
    ) -> BuildResult<Self> {
        let scope = scope.into();
        // * must not cross directory boundaries; the scope is one level deep
        let matcher = GlobBuilder::new(&scope)
            .literal_separator(true)
            .build()
            .map_err(|error| BuildError::InvalidGlob {
                pattern: scope.clone(),
                error,
            })?
            .compile_matcher();
        Ok(Self {
            scope,
            suffix: suffix.into(),
            replacement: replacement.into(),
            matcher,
        })
    }

    /// Whether this rule applies to the given node path
    pub fn matches(&self, node: &Path) -> bool {
        self.matcher.is_match(node)
            && node
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(&self.suffix))
                .unwrap_or(false)
    }
}

impl PartialEq for RewriteRule {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope
            && self.suffix == other.suffix
            && self.replacement == other.replacement
    }
}

impl Eq for RewriteRule {}

/// Command rule: one output node produced from ordered inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRule {
    /// Output node path
    pub output: PathBuf,
    /// Input node paths, in dependency order
    pub inputs: Vec<PathBuf>,
}

/// Registration table for one build environment
#[derive(Debug, Default, Serialize)]
pub struct GraphRegistry {
    rewrites: Vec<RewriteRule>,
    commands: Vec<CommandRule>,
    copy_targets: Vec<CopyTarget>,
    aliases: BTreeMap<String, PathBuf>,
}

impl GraphRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rewrite rule
    ///
    /// Re-registering an identical rule is a no-op; a different rule for
    /// the same scope and suffix is a conflict.
    pub fn register_rewrite(&mut self, rule: RewriteRule) -> BuildResult<()> {
        if let Some(existing) = self
            .rewrites
            .iter()
            .find(|r| r.scope == rule.scope && r.suffix == rule.suffix)
        {
            if *existing == rule {
                return Ok(());
            }
            return Err(BuildError::conflicting(
                "rewrite",
                format!("{}:{}", rule.scope, rule.suffix),
            ));
        }
        self.rewrites.push(rule);
        Ok(())
    }

    /// Register a command rule, keyed by its output node
    pub fn register_command(&mut self, rule: CommandRule) -> BuildResult<()> {
        if let Some(existing) = self.commands.iter().find(|c| c.output == rule.output) {
            if *existing == rule {
                return Ok(());
            }
            return Err(BuildError::conflicting(
                "command",
                rule.output.display().to_string(),
            ));
        }
        self.commands.push(rule);
        Ok(())
    }

    /// Register a copy target, keyed by its name
    pub fn register_copy_target(&mut self, target: CopyTarget) -> BuildResult<()> {
        if let Some(existing) = self.copy_targets.iter().find(|t| t.name == target.name) {
            if *existing == target {
                return Ok(());
            }
            return Err(BuildError::conflicting("target", target.name));
        }
        self.copy_targets.push(target);
        Ok(())
    }

    /// Bind an alias name to a destination path
    pub fn bind_alias(
        &mut self,
        name: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> BuildResult<()> {
        let name = name.into();
        let destination = destination.into();
        if let Some(existing) = self.aliases.get(&name) {
            if *existing == destination {
                return Ok(());
            }
            return Err(BuildError::conflicting("alias", name));
        }
        self.aliases.insert(name, destination);
        Ok(())
    }

    /// Replacement node for the given path, if any rule applies
    pub fn rewrite(&self, node: &Path) -> Option<&Path> {
        self.rewrites
            .iter()
            .find(|rule| rule.matches(node))
            .map(|rule| rule.replacement.as_path())
    }

    /// Destination bound to the given alias name
    pub fn alias(&self, name: &str) -> Option<&Path> {
        self.aliases.get(name).map(PathBuf::as_path)
    }

    /// Registered rewrite rules
    pub fn rewrites(&self) -> &[RewriteRule] {
        &self.rewrites
    }

    /// Registered command rules
    pub fn commands(&self) -> &[CommandRule] {
        &self.commands
    }

    /// Registered copy targets
    pub fn copy_targets(&self) -> &[CopyTarget] {
        &self.copy_targets
    }

    /// Registered aliases
    pub fn aliases(&self) -> &BTreeMap<String, PathBuf> {
        &self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_cpp_rule() -> RewriteRule {
        RewriteRule::new(
            "/project/espurna/*.cpp",
            "main.cpp",
            "/build/espurna_single_source/src/main.cpp",
        )
        .unwrap()
    }

    #[test]
    fn test_rewrite_rule_matches_entry_point_only() {
        let rule = main_cpp_rule();
        assert!(rule.matches(Path::new("/project/espurna/main.cpp")));
        assert!(!rule.matches(Path::new("/project/espurna/telnet.cpp")));
        assert!(!rule.matches(Path::new("/elsewhere/main.cpp")));
    }

    #[test]
    fn test_rewrite_rule_does_not_cross_directories() {
        let rule = main_cpp_rule();
        assert!(!rule.matches(Path::new("/project/espurna/libs/main.cpp")));
    }

    #[test]
    fn test_rewrite_lookup_returns_replacement() {
        let mut registry = GraphRegistry::new();
        registry.register_rewrite(main_cpp_rule()).unwrap();

        assert_eq!(
            registry.rewrite(Path::new("/project/espurna/main.cpp")),
            Some(Path::new("/build/espurna_single_source/src/main.cpp"))
        );
        assert_eq!(registry.rewrite(Path::new("/project/espurna/wifi.cpp")), None);
    }

    #[test]
    fn test_identical_rewrite_registration_is_noop() {
        let mut registry = GraphRegistry::new();
        registry.register_rewrite(main_cpp_rule()).unwrap();
        registry.register_rewrite(main_cpp_rule()).unwrap();
        assert_eq!(registry.rewrites().len(), 1);
    }

    #[test]
    fn test_conflicting_rewrite_registration_fails() {
        let mut registry = GraphRegistry::new();
        registry.register_rewrite(main_cpp_rule()).unwrap();

        let conflicting = RewriteRule::new(
            "/project/espurna/*.cpp",
            "main.cpp",
            "/elsewhere/main.cpp",
        )
        .unwrap();
        assert!(matches!(
            registry.register_rewrite(conflicting),
            Err(BuildError::ConflictingRegistration { kind: "rewrite", .. })
        ));
    }

    #[test]
    fn test_command_registration_keyed_by_output() {
        let mut registry = GraphRegistry::new();
        let rule = CommandRule {
            output: PathBuf::from("/build/out.cpp"),
            inputs: vec![PathBuf::from("/project/a.cpp")],
        };
        registry.register_command(rule.clone()).unwrap();
        registry.register_command(rule).unwrap();
        assert_eq!(registry.commands().len(), 1);

        let conflicting = CommandRule {
            output: PathBuf::from("/build/out.cpp"),
            inputs: vec![PathBuf::from("/project/b.cpp")],
        };
        assert!(registry.register_command(conflicting).is_err());
    }

    #[test]
    fn test_alias_binding_is_idempotent() {
        let mut registry = GraphRegistry::new();
        registry.bind_alias("build-and-copy", "/dest/fw.bin").unwrap();
        registry.bind_alias("build-and-copy", "/dest/fw.bin").unwrap();
        assert_eq!(registry.aliases().len(), 1);
        assert_eq!(
            registry.alias("build-and-copy"),
            Some(Path::new("/dest/fw.bin"))
        );
    }

    #[test]
    fn test_alias_rebinding_to_other_path_fails() {
        let mut registry = GraphRegistry::new();
        registry.bind_alias("build-and-copy", "/dest/fw.bin").unwrap();
        assert!(matches!(
            registry.bind_alias("build-and-copy", "/other/fw.bin"),
            Err(BuildError::ConflictingRegistration { kind: "alias", .. })
        ));
    }
}
