use std::path::{Path, PathBuf};

use faultline_error::{ExitCodes, PropagationPolicy};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Runtime configuration.
///
/// Sources, later ones winning: built-in defaults, `faultline.toml` in the working
/// directory (optional), the file passed with `--config` (required when given), then
/// `FAULTLINE_*` environment variables (`__` separates nested keys, e.g.
/// `FAULTLINE_PROPAGATION__TOLERATE_DEFECTS=true`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory the file store is rooted at.
    pub root: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// When set, logs are also written to a daily rolling file here.
    pub log_dir: Option<PathBuf>,
    /// How many names `read` tries before giving up.
    pub max_attempts: usize,
    pub propagation: PropagationPolicy,
    pub exit_codes: ExitCodes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            log_filter: "info,faultline=debug".to_string(),
            log_dir: None,
            max_attempts: 3,
            propagation: PropagationPolicy::default(),
            exit_codes: ExitCodes::default(),
        }
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("faultline").required(false));
        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix("FAULTLINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Config>()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
root = "/srv/records"
max_attempts = 5

[propagation]
tolerate_defects = true

[exit_codes]
external = 2
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/records"));
        assert_eq!(config.max_attempts, 5);
        assert!(config.propagation.tolerate_defects);
        assert_eq!(config.exit_codes.external, 2);
        assert_eq!(config.exit_codes.defect, ExitCodes::default().defect);
        assert_eq!(config.log_filter, Config::default().log_filter);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "max_attempts = \"many\"\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
