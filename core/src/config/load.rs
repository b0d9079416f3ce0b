use std::path::Path;

use anyhow::anyhow;

use super::types::AppConfig;
use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "shellbench.toml";

/// Loads `shellbench.toml` from the working directory when present, then applies env overrides.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let cfg = if Path::new(CONFIG_FILE_NAME).exists() {
        read_file(Path::new(CONFIG_FILE_NAME))?
    } else {
        AppConfig::default()
    };
    finish(cfg)
}

/// Loads an explicitly requested config file; a missing file is an error here.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    finish(read_file(path)?)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(ConfigError::Parse)
}

fn finish(mut cfg: AppConfig) -> Result<AppConfig, ConfigError> {
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    cfg.validate()?;
    crate::style::StyleClassifier::from_config(&cfg.patterns)?;
    tracing::debug!(
        target: "shellbench.config",
        assistant = %cfg.assistant.bin,
        timeout_secs = cfg.assistant.timeout_secs,
        results_dir = %cfg.paths.results_dir,
        "config loaded"
    );
    Ok(cfg)
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, get: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = get("SHELLBENCH_ASSISTANT_BIN") {
        if !v.trim().is_empty() {
            cfg.assistant.bin = v;
        }
    }
    if let Some(v) = get("SHELLBENCH_TIMEOUT_SECS") {
        if !v.trim().is_empty() {
            cfg.assistant.timeout_secs =
                v.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::EnvInvalid {
                        key: "SHELLBENCH_TIMEOUT_SECS".to_string(),
                        source: anyhow!(e),
                    })?;
        }
    }
    if let Some(v) = get("SHELLBENCH_RESULTS_DIR") {
        if !v.trim().is_empty() {
            cfg.paths.results_dir = v;
        }
    }
    if let Some(v) = get("SHELLBENCH_PROMPTS") {
        if !v.trim().is_empty() {
            cfg.paths.prompts = v;
        }
    }
    Ok(())
}

/// Expands `~` and `$VAR` in a configured path, falling back to the raw string.
pub fn expand_path(raw: &str) -> std::path::PathBuf {
    match shellexpand::full(raw) {
        Ok(s) => std::path::PathBuf::from(s.as_ref()),
        Err(e) => {
            tracing::warn!(target: "shellbench.config", path = raw, error = %e, "path expansion failed");
            std::path::PathBuf::from(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_apply() {
        let vars = env(&[
            ("SHELLBENCH_ASSISTANT_BIN", "/opt/claude"),
            ("SHELLBENCH_TIMEOUT_SECS", "45"),
            ("SHELLBENCH_RESULTS_DIR", "out"),
        ]);
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, |k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.assistant.bin, "/opt/claude");
        assert_eq!(cfg.assistant.timeout_secs, 45);
        assert_eq!(cfg.paths.results_dir, "out");
        assert_eq!(cfg.paths.prompts, "prompts.json");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let vars = env(&[("SHELLBENCH_ASSISTANT_BIN", "  ")]);
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, |k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.assistant.bin, "claude");
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let vars = env(&[("SHELLBENCH_TIMEOUT_SECS", "soon")]);
        let mut cfg = AppConfig::default();
        let err = apply_env_overrides(&mut cfg, |k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::EnvInvalid { ref key, .. } if key == "SHELLBENCH_TIMEOUT_SECS"));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let err = load_from_path(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn bad_pattern_in_file_fails_at_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[patterns]\nwindows = [\"Get-(\"]\n").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { set: "windows", .. }));
    }
}
