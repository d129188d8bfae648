//! Application configuration.
//!
//! Values come from environment variables, falling back to the settings
//! file, and may be overridden on the command line.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::utils::Settings;

/// Names the document bucket. Required.
pub const BUCKET_ENV: &str = "BUCKET_NAME";

/// Project label shown in listings. Defaults to the bucket name.
pub const PROJECT_ENV: &str = "PROJECT_NAME";

/// Export destination. Defaults to [`DEFAULT_OUTPUT_DIR`].
pub const OUTPUT_DIR_ENV: &str = "OUTPUT_DIR";

/// Export destination when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No bucket was configured.
    #[error("{BUCKET_ENV} environment variable is required (or pass --bucket)")]
    MissingBucket,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Directory acting as the document bucket.
    pub bucket: PathBuf,
    /// Project label.
    pub project_name: String,
    /// Directory exports are written to.
    pub output_dir: PathBuf,
}

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Bucket directory.
    pub bucket: Option<PathBuf>,
    /// Export directory.
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from overrides, the environment and `settings`.
    pub fn resolve(settings: &Settings, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(|key| settings.get_env_var(key), overrides)
    }

    /// Resolves configuration using `lookup` for variable values.
    pub fn resolve_with(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bucket = overrides
            .bucket
            .clone()
            .or_else(|| non_empty(BUCKET_ENV).map(PathBuf::from))
            .ok_or(ConfigError::MissingBucket)?;

        let project_name = non_empty(PROJECT_ENV).unwrap_or_else(|| {
            bucket
                .file_name()
                .map_or_else(|| bucket.display().to_string(), |n| n.to_string_lossy().into_owned())
        });

        let output_dir = overrides
            .output_dir
            .clone()
            .or_else(|| non_empty(OUTPUT_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            bucket,
            project_name,
            output_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn bucket_is_required() {
        let result = AppConfig::resolve_with(lookup(&[]), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingBucket)));
    }

    #[test]
    fn blank_bucket_counts_as_missing() {
        let result = AppConfig::resolve_with(lookup(&[(BUCKET_ENV, "  ")]), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::MissingBucket)));
    }

    #[test]
    fn defaults_follow_bucket() -> anyhow::Result<()> {
        let config = AppConfig::resolve_with(
            lookup(&[(BUCKET_ENV, "/srv/docs-bucket")]),
            &ConfigOverrides::default(),
        )?;
        assert_eq!(config.bucket, PathBuf::from("/srv/docs-bucket"));
        assert_eq!(config.project_name, "docs-bucket");
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        Ok(())
    }

    #[test]
    fn explicit_values_win() -> anyhow::Result<()> {
        let overrides = ConfigOverrides {
            bucket: Some(PathBuf::from("/cli/bucket")),
            output_dir: Some(PathBuf::from("/cli/out")),
        };
        let config = AppConfig::resolve_with(
            lookup(&[
                (BUCKET_ENV, "/env/bucket"),
                (PROJECT_ENV, "Catalog"),
                (OUTPUT_DIR_ENV, "/env/out"),
            ]),
            &overrides,
        )?;
        assert_eq!(config.bucket, PathBuf::from("/cli/bucket"));
        assert_eq!(config.project_name, "Catalog");
        assert_eq!(config.output_dir, PathBuf::from("/cli/out"));
        Ok(())
    }
}
