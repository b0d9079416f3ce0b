use crate::config::PatternConfig;

/// Literal failure phrases looked for in raw assistant output, independent of
/// structured error events.
pub const DEFAULT_FAILURE_SIGNATURES: &[&str] = &[
    "command not found",
    "not recognized",
    "No such file",
    "cannot access",
    "extglob",
    "Exit code",
];

pub const PATTERN_PREFIX: &str = "Pattern detected: ";

#[derive(Debug, Clone)]
pub struct FailureSignatures {
    signatures: Vec<String>,
}

impl Default for FailureSignatures {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_SIGNATURES.iter().copied())
    }
}

impl FailureSignatures {
    pub fn new<I, S>(signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signatures: signatures
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.trim().is_empty())
                .collect(),
        }
    }

    pub fn from_config(cfg: &PatternConfig) -> Self {
        Self::new(cfg.failure_signatures.iter().cloned())
    }

    /// Signatures occurring (case-insensitively) anywhere in `text`.
    pub fn detect<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let lower = text.to_lowercase();
        self.signatures
            .iter()
            .filter(|sig| lower.contains(&sig.to_lowercase()))
            .map(String::as_str)
            .collect()
    }

    /// Appends `Pattern detected: <sig>` for each detected signature that no
    /// existing error already mentions. Returns how many entries were added.
    pub fn annotate(&self, text: &str, errors: &mut Vec<String>) -> usize {
        let mut added = 0;
        for sig in self.detect(text) {
            let needle = sig.to_lowercase();
            if errors.iter().any(|e| e.to_lowercase().contains(&needle)) {
                continue;
            }
            errors.push(format!("{PATTERN_PREFIX}{sig}"));
            added += 1;
        }
        added
    }
}
