//! Evaluating the questions and rendering the report.

use std::fmt;

use devstats_core::{AnalysisConfig, DevstatsError};
use devstats_table::Dataset;
use serde::Serialize;

use crate::questions::{answer, title, Answer, QUESTION_COUNT};

/// What a question produced: an answer, or the reason it could not be answered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Answer(Answer),
    Error(String),
}

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Question number, 1-based.
    pub id: u8,
    pub title: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Finding {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// The answers to the selected questions, in question order.
///
/// # Examples
///
/// ```
/// use devstats_core::AnalysisConfig;
/// use devstats_report::run_report;
/// use devstats_table::{Dataset, Table};
///
/// let data = Dataset {
///     users: Table::from_rows(&["login", "followers", "following"], vec![]),
///     repositories: Table::from_rows(&["login"], vec![]),
/// };
/// let report = run_report(&data, &AnalysisConfig::default(), &[8, 3]).unwrap();
/// assert_eq!(report.findings.len(), 2);
/// assert_eq!(report.findings[0].id, 3);
/// assert!(report.findings[0].is_error()); // no license_name column
/// assert!(!report.findings[1].is_error());
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Rows in the users table.
    pub users: usize,
    /// Rows in the repositories table.
    pub repositories: usize,
    pub findings: Vec<Finding>,
}

/// Answer the questions in `selection` (all of them when empty).
///
/// Questions run sequentially in ascending order; duplicates are ignored. A
/// question that fails is recorded as [`Outcome::Error`] and does not stop
/// the rest.
///
/// # Errors
///
/// Returns [`DevstatsError::Config`] if `selection` names a question that
/// does not exist.
pub fn run_report(
    data: &Dataset,
    config: &AnalysisConfig,
    selection: &[u8],
) -> Result<Report, DevstatsError> {
    let mut ids: Vec<u8> = if selection.is_empty() {
        (1..=QUESTION_COUNT).collect()
    } else {
        selection.to_vec()
    };
    ids.sort_unstable();
    ids.dedup();

    if let Some(bad) = ids.iter().find(|id| !(1..=QUESTION_COUNT).contains(*id)) {
        return Err(DevstatsError::Config(format!(
            "question {bad} does not exist (valid: 1-{QUESTION_COUNT})"
        )));
    }

    let findings = ids
        .into_iter()
        .map(|id| Finding {
            id,
            title: title(id, config),
            outcome: match answer(id, data, config) {
                Ok(answer) => Outcome::Answer(answer),
                Err(e) => Outcome::Error(e.to_string()),
            },
        })
        .collect();

    Ok(Report {
        users: data.users.len(),
        repositories: data.repositories.len(),
        findings,
    })
}

impl Report {
    /// Number of questions that could not be answered.
    pub fn failures(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Developer Statistics\n\n");
        out.push_str(&format!(
            "**Users:** {} · **Repositories:** {}\n\n",
            self.users, self.repositories
        ));

        for finding in &self.findings {
            out.push_str(&format!("## {}. {}\n\n", finding.id, finding.title));
            match &finding.outcome {
                Outcome::Answer(Answer::Regression(summary)) => {
                    out.push_str(&summary.to_markdown());
                }
                Outcome::Answer(Answer::Logins(logins)) if !logins.is_empty() => {
                    for login in logins {
                        out.push_str(&format!("- `{login}`\n"));
                    }
                }
                Outcome::Answer(Answer::Counted(counts)) if !counts.is_empty() => {
                    out.push_str("| Login | Repositories |\n");
                    out.push_str("|-------|--------------|\n");
                    for c in counts {
                        out.push_str(&format!("| `{}` | {} |\n", c.key, c.count));
                    }
                }
                Outcome::Answer(other) => out.push_str(&format!("{other}\n")),
                Outcome::Error(message) => out.push_str(&format!("> **Error:** {message}\n")),
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Answer(answer) => write!(f, "{}: {answer}", self.title),
            Outcome::Error(message) => write!(f, "{}: error: {message}", self.title),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devstats_table::{Repository, Table, User};

    fn tiny() -> Dataset {
        let users = vec![
            User {
                login: "alice".into(),
                location: Some("Paris".into()),
                followers: Some(900),
                following: Some(2),
                ..User::default()
            },
            User {
                login: "bob".into(),
                followers: Some(10),
                following: Some(9),
                ..User::default()
            },
        ];
        let repos = vec![Repository {
            login: "alice".into(),
            language: Some("Rust".into()),
            ..Repository::default()
        }];
        Dataset {
            users: Table::from_rows(&["login", "location", "followers", "following"], users),
            repositories: Table::from_rows(&["login", "language"], repos),
        }
    }

    #[test]
    fn all_questions_when_selection_is_empty() {
        let report = run_report(&tiny(), &AnalysisConfig::default(), &[]).unwrap();
        let ids: Vec<u8> = report.findings.iter().map(|f| f.id).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<u8>>());
        assert_eq!(report.users, 2);
        assert_eq!(report.repositories, 1);
    }

    #[test]
    fn failures_are_isolated() {
        let report = run_report(&tiny(), &AnalysisConfig::default(), &[]).unwrap();
        // Only questions 1, 5 and 8 have every column they need.
        let answered: Vec<u8> = report
            .findings
            .iter()
            .filter(|f| !f.is_error())
            .map(|f| f.id)
            .collect();
        assert_eq!(answered, vec![1, 5, 8]);
        assert_eq!(report.failures(), 13);
    }

    #[test]
    fn selection_is_sorted_and_deduplicated() {
        let report = run_report(&tiny(), &AnalysisConfig::default(), &[8, 1, 8]).unwrap();
        let ids: Vec<u8> = report.findings.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 8]);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let err = run_report(&tiny(), &AnalysisConfig::default(), &[17]).unwrap_err();
        assert!(err.to_string().contains("question 17"));
    }

    #[test]
    fn text_has_one_labelled_line_per_simple_question() {
        let report = run_report(&tiny(), &AnalysisConfig::default(), &[1, 5, 8]).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Top 5 users in Paris by followers: alice",
                "Most popular programming language: Rust",
                "Top 5 users by leader strength: alice, bob",
            ]
        );
    }

    #[test]
    fn json_flattens_outcome() {
        let report = run_report(&tiny(), &AnalysisConfig::default(), &[5, 9]).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let findings = json["findings"].as_array().unwrap();
        assert_eq!(findings[0]["answer"]["kind"], "label");
        assert_eq!(findings[0]["answer"]["value"], "Rust");
        assert!(findings[1]["error"]
            .as_str()
            .unwrap()
            .contains("public_repos"));
    }

    #[test]
    fn markdown_has_a_section_per_question() {
        let md = run_report(&tiny(), &AnalysisConfig::default(), &[1, 3])
            .unwrap()
            .to_markdown();
        assert!(md.starts_with("# Developer Statistics"));
        assert!(md.contains("## 1. Top 5 users in Paris by followers"));
        assert!(md.contains("- `alice`"));
        assert!(md.contains("> **Error:**"));
    }
}
