//! Output modes for user-visible build actions

/// Verbosity for build action reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Errors only
    Quiet,
    /// Action labels
    #[default]
    Normal,
    /// Action labels plus per-step detail
    Verbose,
}

impl OutputMode {
    /// Whether per-step detail is printed
    pub fn is_verbose(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether all non-error output is suppressed
    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Print a user-visible action label
    pub fn action(&self, label: impl AsRef<str>) {
        if !self.is_quiet() {
            println!("{}", label.as_ref());
        }
    }

    /// Print per-step detail
    pub fn detail(&self, message: impl AsRef<str>) {
        if self.is_verbose() {
            println!("{}", message.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn test_mode_predicates() {
        assert!(OutputMode::Verbose.is_verbose());
        assert!(!OutputMode::Normal.is_verbose());
        assert!(OutputMode::Quiet.is_quiet());
        assert!(!OutputMode::Verbose.is_quiet());
    }
}
