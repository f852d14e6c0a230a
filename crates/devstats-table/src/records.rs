//! Row types for the two tables and their derived columns.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::Deserialize;

use crate::company::deserialize_company;
use crate::parse::{deserialize_count, deserialize_flag, deserialize_text, deserialize_timestamp};

/// A row of the users table.
///
/// Only `login` is required; every other cell is `None` when it is empty,
/// malformed, or its column is missing from the file.
///
/// # Examples
///
/// ```
/// use devstats_table::User;
///
/// let user = User {
///     login: "octocat".into(),
///     followers: Some(300),
///     following: Some(2),
///     ..User::default()
/// };
/// assert_eq!(user.leader_strength(), Some(100.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct User {
    /// Unique account name.
    pub login: String,
    /// Normalized company (`""` when missing).
    #[serde(default, deserialize_with = "deserialize_company")]
    pub company: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub followers: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub following: Option<u64>,
    /// Account creation time in UTC.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub hireable: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    /// Display name.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub public_repos: Option<u64>,
}

impl User {
    /// Whether `location` contains `city`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use devstats_table::User;
    ///
    /// let user = User { location: Some("paris-based".into()), ..User::default() };
    /// assert!(user.lives_in("Paris"));
    /// assert!(!User::default().lives_in("Paris"));
    /// ```
    pub fn lives_in(&self, city: &str) -> bool {
        let needle = city.to_lowercase();
        self.location
            .as_deref()
            .is_some_and(|loc| loc.to_lowercase().contains(&needle))
    }

    /// `followers / (1 + following)`; `None` when either count is missing.
    ///
    /// Always finite and non-negative since the denominator is at least one.
    pub fn leader_strength(&self) -> Option<f64> {
        let followers = self.followers? as f64;
        let following = self.following? as f64;
        Some(followers / (1.0 + following))
    }

    /// Number of whitespace-separated words in the bio, 0 without a bio.
    pub fn bio_word_count(&self) -> usize {
        self.bio
            .as_deref()
            .map_or(0, |bio| bio.split_whitespace().count())
    }

    /// Last word of a name made of at least two words.
    ///
    /// # Examples
    ///
    /// ```
    /// use devstats_table::User;
    ///
    /// let user = User { name: Some("Ada  King Lovelace".into()), ..User::default() };
    /// assert_eq!(user.surname(), Some("Lovelace"));
    ///
    /// let mononym = User { name: Some("Cher".into()), ..User::default() };
    /// assert_eq!(mononym.surname(), None);
    /// ```
    pub fn surname(&self) -> Option<&str> {
        let mut words = self.name.as_deref()?.split_whitespace();
        words.next()?;
        words.last()
    }

    /// Whether the account was created strictly after `cutoff`.
    ///
    /// Users without a parseable creation date never qualify.
    pub fn joined_after(&self, cutoff: NaiveDateTime) -> bool {
        self.created_at.is_some_and(|created| created > cutoff)
    }

    pub fn is_hireable(&self) -> bool {
        self.hireable == Some(true)
    }
}

/// A row of the repositories table.
///
/// # Examples
///
/// ```
/// use devstats_table::Repository;
/// use devstats_table::parse::parse_timestamp;
///
/// let repo = Repository {
///     login: "octocat".into(),
///     created_at: parse_timestamp("2024-06-01T10:00:00Z"),
///     ..Repository::default()
/// };
/// assert!(repo.created_on_weekend());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Repository {
    /// Owner account; refers to [`User::login`].
    pub login: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub license_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub stargazers_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_projects: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_wiki: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Repository {
    /// Day of the week the repository was created, in UTC.
    pub fn weekday(&self) -> Option<Weekday> {
        self.created_at.map(|ts| ts.weekday())
    }

    /// Created on a Saturday or Sunday. `false` without a creation date.
    pub fn created_on_weekend(&self) -> bool {
        matches!(self.weekday(), Some(Weekday::Sat | Weekday::Sun))
    }
}
