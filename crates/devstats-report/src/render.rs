//! Writing a [`Report`] out as text, JSON or Markdown.

use std::str::FromStr;

use devstats_core::DevstatsError;

use crate::report::Report;

/// Output format of `devstats report`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One labelled line per question, regressions as an indented block.
    #[default]
    Text,
    /// Pretty-printed JSON with camelCase keys.
    Json,
    /// A heading per question.
    Markdown,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// Render `report`; the result always ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns [`DevstatsError::Serialization`] if JSON encoding fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use devstats_report::{OutputFormat, Report};
    ///
    /// let empty = Report { users: 0, repositories: 0, findings: vec![] };
    /// let json = OutputFormat::Json.render(&empty).unwrap();
    /// assert!(json.contains("\"findings\": []"));
    /// assert_eq!(OutputFormat::Text.render(&empty).unwrap(), "");
    /// ```
    pub fn render(self, report: &Report) -> Result<String, DevstatsError> {
        Ok(match self {
            OutputFormat::Text => report.to_string(),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(report)?;
                json.push('\n');
                json
            }
            OutputFormat::Markdown => report.to_markdown(),
        })
    }
}

impl FromStr for OutputFormat {
    type Err = DevstatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(DevstatsError::Config(format!(
                "unknown output format `{other}` (expected text, json or markdown)"
            ))),
        }
    }
}
