//! Command-style detection.
//!
//! Decides whether a blob of assistant output shows POSIX-shell idioms, native
//! Windows idioms, both, or neither. Detection is advisory telemetry for the
//! run report: incidental substring matches (the word "top" in prose, say)
//! are accepted false positives.

mod patterns;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::config::PatternConfig;
use crate::error::ConfigError;

pub use patterns::{DEFAULT_POSIX_PATTERNS, DEFAULT_WINDOWS_PATTERNS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleVerdict {
    pub posix: bool,
    pub windows: bool,
}

impl StyleVerdict {
    pub fn merge(self, other: StyleVerdict) -> StyleVerdict {
        StyleVerdict {
            posix: self.posix || other.posix,
            windows: self.windows || other.windows,
        }
    }

    pub fn is_mixed(&self) -> bool {
        self.posix && self.windows
    }

    /// Short label for progress output, e.g. `bash/windows`.
    pub fn label(&self) -> Option<&'static str> {
        match (self.posix, self.windows) {
            (true, true) => Some("bash/windows"),
            (true, false) => Some("bash"),
            (false, true) => Some("windows"),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyleClassifier {
    posix: Vec<Regex>,
    windows: Vec<Regex>,
}

impl Default for StyleClassifier {
    fn default() -> Self {
        // The built-in lists are covered by tests, so compiling them cannot fail.
        Self::from_patterns(DEFAULT_POSIX_PATTERNS, DEFAULT_WINDOWS_PATTERNS)
            .expect("built-in style patterns compile")
    }
}

impl StyleClassifier {
    pub fn from_patterns<S: AsRef<str>>(posix: &[S], windows: &[S]) -> Result<Self, ConfigError> {
        Ok(Self {
            posix: compile_set("posix", posix)?,
            windows: compile_set("windows", windows)?,
        })
    }

    pub fn from_config(cfg: &PatternConfig) -> Result<Self, ConfigError> {
        Self::from_patterns(&cfg.posix, &cfg.windows)
    }

    /// Total over any input: never fails, empty text yields `(false, false)`.
    pub fn classify(&self, text: &str) -> StyleVerdict {
        StyleVerdict {
            posix: self.posix.iter().any(|re| re.is_match(text)),
            windows: self.windows.iter().any(|re| re.is_match(text)),
        }
    }
}

fn compile_set<S: AsRef<str>>(set: &'static str, patterns: &[S]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p.as_ref())
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    set,
                    pattern: p.as_ref().to_string(),
                    source,
                })
        })
        .collect()
}

lazy_static! {
    static ref DEFAULT_CLASSIFIER: StyleClassifier = StyleClassifier::default();
}

/// Classifies `text` with the built-in pattern lists.
pub fn classify(text: &str) -> StyleVerdict {
    DEFAULT_CLASSIFIER.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSIX_ONLY: StyleVerdict = StyleVerdict { posix: true, windows: false };
    const WINDOWS_ONLY: StyleVerdict = StyleVerdict { posix: false, windows: true };
    const MIXED: StyleVerdict = StyleVerdict { posix: true, windows: true };
    const NEITHER: StyleVerdict = StyleVerdict { posix: false, windows: false };

    #[test]
    fn cmdlet_is_windows_only() {
        assert_eq!(classify("Get-ChildItem -Path ."), WINDOWS_ONLY);
    }

    #[test]
    fn ls_on_etc_is_posix_only() {
        assert_eq!(classify("ls -la /etc/passwd"), POSIX_ONLY);
    }

    #[test]
    fn mixed_output_sets_both() {
        let v = classify("Get-ChildItem; cat file");
        assert_eq!(v, MIXED);
        assert!(v.is_mixed());
        assert_eq!(v.label(), Some("bash/windows"));
    }

    #[test]
    fn empty_and_plain_prose_match_nothing() {
        assert_eq!(classify(""), NEITHER);
        assert_eq!(classify("Here is a summary of your disk usage."), NEITHER);
        assert_eq!(NEITHER.label(), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("get-childitem"), WINDOWS_ONLY);
        assert_eq!(classify("GREP -r foo ."), POSIX_ONLY);
    }

    #[test]
    fn env_var_syntaxes_are_windows() {
        assert_eq!(classify("echo %USERPROFILE%"), WINDOWS_ONLY);
        assert_eq!(classify("Write-Output $env:PATH"), WINDOWS_ONLY);
    }

    #[test]
    fn piped_bare_ls_is_not_posix() {
        assert_eq!(classify("ls | more"), NEITHER);
        assert_eq!(classify("ls"), POSIX_ONLY);
        assert_eq!(classify("ls|wc"), POSIX_ONLY);
    }

    #[test]
    fn incidental_words_are_tolerated_false_positives() {
        // Prose that merely mentions an idiom still counts; detection is advisory.
        assert_eq!(classify("The process list is shown at the top."), POSIX_ONLY);
        assert_eq!(classify("Pick a type for the column"), WINDOWS_ONLY);
    }

    #[test]
    fn merge_is_logical_or() {
        assert_eq!(POSIX_ONLY.merge(WINDOWS_ONLY), MIXED);
        assert_eq!(NEITHER.merge(NEITHER), NEITHER);
        assert_eq!(WINDOWS_ONLY.merge(NEITHER), WINDOWS_ONLY);
    }

    #[test]
    fn custom_patterns_replace_builtins() {
        let c = StyleClassifier::from_patterns(&["\\bzsh\\b"], &["\\bcmd\\.exe\\b"]).unwrap();
        assert_eq!(c.classify("ls -la"), NEITHER);
        assert_eq!(c.classify("run it in CMD.EXE"), WINDOWS_ONLY);
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let err = StyleClassifier::from_patterns(&["(unclosed"], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { set: "posix", .. }));
    }
}
