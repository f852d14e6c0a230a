use std::path::PathBuf;

/// Errors that can occur while loading the tables or answering a question.
///
/// Library crates use this type directly; the binary converts to a
/// `miette` diagnostic at the boundary.
///
/// # Examples
///
/// ```
/// use devstats_core::DevstatsError;
///
/// let err = DevstatsError::MissingColumn { table: "users", column: "followers".into() };
/// assert!(err.to_string().contains("followers"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DevstatsError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required input file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column needed by a computation is absent from the header row.
    #[error("{table} table has no `{column}` column")]
    MissingColumn {
        /// Which table was searched (`users` or `repositories`).
        table: &'static str,
        /// The column name.
        column: String,
    },

    /// Not enough usable data for a statistic.
    #[error("statistics error: {0}")]
    Stats(String),

    /// JSON serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let err: DevstatsError = io_err.into();
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn missing_column_names_table_and_column() {
        let err = DevstatsError::MissingColumn {
            table: "repositories",
            column: "license_name".into(),
        };
        assert_eq!(
            err.to_string(),
            "repositories table has no `license_name` column"
        );
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = DevstatsError::FileNotFound(PathBuf::from("/tmp/users.csv"));
        assert!(err.to_string().contains("/tmp/users.csv"));
    }
}
