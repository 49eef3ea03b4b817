use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RatelensError;

/// Top-level configuration loaded from `.ratelens.toml`.
///
/// Supports layered resolution: CLI flags > `--config` file > local config > defaults.
///
/// # Examples
///
/// ```
/// use ratelens_core::RatelensConfig;
///
/// let config = RatelensConfig::default();
/// assert!(config.batch.fail_fast);
/// assert!(config.sentiment.lexicon.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatelensConfig {
    /// Scoring capability settings.
    #[serde(default)]
    pub sentiment: SentimentConfig,
    /// Batch driving settings.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl RatelensConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RatelensError::Io`] if the file cannot be read, or
    /// [`RatelensError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ratelens_core::RatelensConfig;
    /// use std::path::Path;
    ///
    /// let config = RatelensConfig::from_file(Path::new(".ratelens.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, RatelensError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`RatelensError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratelens_core::RatelensConfig;
    ///
    /// let toml = r#"
    /// [batch]
    /// fail_fast = false
    /// "#;
    /// let config = RatelensConfig::from_toml(toml).unwrap();
    /// assert!(!config.batch.fail_fast);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, RatelensError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Settings for the sentiment scoring capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Path to a VADER-format lexicon. When unset, `vader_lexicon.txt` is looked
    /// for in the working directory and the NLTK data directories.
    pub lexicon: Option<PathBuf>,
}

/// Batch driving configuration.
///
/// # Examples
///
/// ```
/// use ratelens_core::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert!(config.fail_fast);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Abort the batch on the first failing identifier (default: true).
    ///
    /// When `false`, failures are recorded per identifier and the batch continues.
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,
}

fn default_fail_fast() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fail_fast: default_fail_fast(),
        }
    }
}
