use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DevstatsError;

/// Top-level configuration loaded from `.devstats.toml`.
///
/// Supports layered resolution: CLI flags > config file > defaults.
///
/// # Examples
///
/// ```
/// use devstats_core::DevstatsConfig;
///
/// let config = DevstatsConfig::default();
/// assert_eq!(config.analysis.top_n, 5);
/// assert_eq!(config.analysis.city, "Paris");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevstatsConfig {
    /// Where the two tables live.
    #[serde(default)]
    pub input: InputConfig,
    /// Filters and thresholds used by the questions.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl DevstatsConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DevstatsError::Io`] if the file cannot be read,
    /// [`DevstatsError::Toml`] if the content is not valid TOML, or
    /// [`DevstatsError::Config`] if a value is out of range.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devstats_core::DevstatsConfig;
    /// use std::path::Path;
    ///
    /// let config = DevstatsConfig::from_file(Path::new(".devstats.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, DevstatsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`DevstatsError::Toml`] if parsing fails and
    /// [`DevstatsError::Config`] if validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use devstats_core::DevstatsConfig;
    ///
    /// let toml = r#"
    /// [analysis]
    /// city = "Berlin"
    /// top_n = 10
    /// "#;
    /// let config = DevstatsConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.analysis.city, "Berlin");
    /// assert_eq!(config.analysis.top_n, 10);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, DevstatsError> {
        let config: Self = toml::from_str(content)?;
        config.analysis.validate()?;
        Ok(config)
    }
}

/// Locations of the users and repositories tables.
///
/// # Examples
///
/// ```
/// use devstats_core::InputConfig;
/// use std::path::PathBuf;
///
/// let input = InputConfig::default();
/// assert_eq!(input.users, PathBuf::from("users.csv"));
/// assert_eq!(input.repositories, PathBuf::from("repositories.csv"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Users CSV (default: `users.csv`).
    #[serde(default = "default_users")]
    pub users: PathBuf,
    /// Repositories CSV (default: `repositories.csv`).
    #[serde(default = "default_repositories")]
    pub repositories: PathBuf,
}

fn default_users() -> PathBuf {
    PathBuf::from("users.csv")
}

fn default_repositories() -> PathBuf {
    PathBuf::from("repositories.csv")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            repositories: default_repositories(),
        }
    }
}

/// Filters and thresholds shared by the sixteen questions.
///
/// # Examples
///
/// ```
/// use devstats_core::AnalysisConfig;
/// use chrono::NaiveDate;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.min_followers, 200);
/// assert_eq!(config.top_licenses, 3);
/// assert_eq!(config.joined_after, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// assert!(config.include_blank_company);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Case-insensitive substring matched against `location` (default: `"Paris"`).
    #[serde(default = "default_city")]
    pub city: String,
    /// Users must have strictly more followers than this for question 1 (default: 200).
    #[serde(default = "default_min_followers")]
    pub min_followers: u64,
    /// Cutoff for "recent" users in question 6, exclusive (default: 2020-01-01).
    #[serde(default = "default_joined_after")]
    pub joined_after: NaiveDate,
    /// Size of every top-N ranking (default: 5).
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// How many licenses question 3 lists (default: 3).
    #[serde(default = "default_top_licenses")]
    pub top_licenses: usize,
    /// Whether users without a company count as a `""` bucket in question 4 (default: true).
    #[serde(default = "default_include_blank_company")]
    pub include_blank_company: bool,
}

fn default_city() -> String {
    "Paris".into()
}

fn default_min_followers() -> u64 {
    200
}

fn default_joined_after() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

fn default_top_n() -> usize {
    5
}

fn default_top_licenses() -> usize {
    3
}

fn default_include_blank_company() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            min_followers: default_min_followers(),
            joined_after: default_joined_after(),
            top_n: default_top_n(),
            top_licenses: default_top_licenses(),
            include_blank_company: default_include_blank_company(),
        }
    }
}

impl AnalysisConfig {
    /// Reject values that would make every ranking empty.
    ///
    /// # Errors
    ///
    /// Returns [`DevstatsError::Config`] naming the offending key.
    pub fn validate(&self) -> Result<(), DevstatsError> {
        if self.city.trim().is_empty() {
            return Err(DevstatsError::Config("analysis.city must not be empty".into()));
        }
        if self.top_n == 0 {
            return Err(DevstatsError::Config("analysis.top_n must be at least 1".into()));
        }
        if self.top_licenses == 0 {
            return Err(DevstatsError::Config(
                "analysis.top_licenses must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
