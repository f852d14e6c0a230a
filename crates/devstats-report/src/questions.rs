//! One function per question.
//!
//! Every function checks the columns it reads up front and fails with
//! [`DevstatsError::MissingColumn`] when one is absent. Rows with an absent
//! value in a needed cell are skipped by that question only.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use devstats_core::{AnalysisConfig, DevstatsError};
use devstats_stats::{
    bottom_n_by, mode, ols, pearson, tied_for_max, top_n_by, value_counts, RegressionSummary,
};
use devstats_table::{Dataset, User};
use serde::Serialize;

/// Number of questions in the report; ids run from 1 to this value.
pub const QUESTION_COUNT: u8 = 16;

/// A key with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub key: String,
    pub count: usize,
}

/// The answer to one question.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Answer {
    /// Ranked account logins.
    Logins(Vec<String>),
    /// Ranked category labels (licenses).
    Labels(Vec<String>),
    /// A single label; `None` when no row qualified.
    Label(Option<String>),
    /// A single statistic; `None` when undefined (rendered as NaN).
    Scalar(Option<f64>),
    /// A statistic for hireable users and for everybody else.
    Split {
        hireable: Option<f64>,
        other: Option<f64>,
    },
    /// Ranked keys with their counts.
    Counted(Vec<RankedCount>),
    /// A regression summary.
    Regression(Box<RegressionSummary>),
    /// Surnames tied for the highest frequency, and that frequency.
    Surnames { names: Vec<String>, count: usize },
}

fn fmt_scalar(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".into(),
    }
}

fn fmt_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".into()
    } else {
        items.join(", ")
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Logins(items) | Answer::Labels(items) => write!(f, "{}", fmt_list(items)),
            Answer::Label(Some(label)) if label.is_empty() => write!(f, "(blank)"),
            Answer::Label(Some(label)) => write!(f, "{label}"),
            Answer::Label(None) => write!(f, "n/a"),
            Answer::Scalar(value) => write!(f, "{}", fmt_scalar(*value)),
            Answer::Split { hireable, other } => write!(
                f,
                "hireable {}, others {}",
                fmt_scalar(*hireable),
                fmt_scalar(*other)
            ),
            Answer::Counted(counts) if counts.is_empty() => write!(f, "(none)"),
            Answer::Counted(counts) => {
                let parts: Vec<String> = counts
                    .iter()
                    .map(|c| format!("{} ({})", c.key, c.count))
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
            Answer::Regression(summary) => write!(f, "\n{summary}"),
            Answer::Surnames { names, count } => {
                write!(f, "{} (count: {count})", fmt_list(names))
            }
        }
    }
}

/// Human-readable label of question `id`.
///
/// # Examples
///
/// ```
/// use devstats_core::AnalysisConfig;
/// use devstats_report::title;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(title(1, &config), "Top 5 users in Paris by followers");
/// ```
pub fn title(id: u8, config: &AnalysisConfig) -> String {
    let n = config.top_n;
    let city = &config.city;
    match id {
        1 => format!("Top {n} users in {city} by followers"),
        2 => format!("{n} earliest registered users in {city}"),
        3 => format!("Top {} popular licenses", config.top_licenses),
        4 => "Most common company".into(),
        5 => "Most popular programming language".into(),
        6 => format!(
            "Second most popular language for users who joined after {}",
            config.joined_after
        ),
        7 => "Language with highest average stars per repo".into(),
        8 => format!("Top {n} users by leader strength"),
        9 => "Correlation between followers and public repos".into(),
        10 => "Regression of followers on public repos".into(),
        11 => "Correlation between projects and wiki enabled".into(),
        12 => "Average following by hireable status".into(),
        13 => "Regression of followers on bio word count".into(),
        14 => format!("Top {n} users creating most repos on weekends"),
        15 => "Email sharing rate by hireable status".into(),
        16 => "Most common surname(s)".into(),
        _ => format!("Unknown question {id}"),
    }
}

/// Compute the answer to question `id`.
///
/// # Errors
///
/// Returns [`DevstatsError::Config`] for an id outside `1..=16`, and
/// whatever the question itself fails with (missing column, too little data
/// for a regression).
pub fn answer(id: u8, data: &Dataset, config: &AnalysisConfig) -> Result<Answer, DevstatsError> {
    match id {
        1 => top_city_users_by_followers(data, config),
        2 => earliest_city_users(data, config),
        3 => popular_licenses(data, config),
        4 => most_common_company(data, config),
        5 => most_popular_language(data),
        6 => second_language_of_recent_users(data, config),
        7 => language_with_highest_average_stars(data),
        8 => top_leader_strength(data, config),
        9 => followers_repos_correlation(data),
        10 => followers_on_public_repos(data),
        11 => projects_wiki_correlation(data),
        12 => following_by_hireable(data),
        13 => followers_on_bio_length(data),
        14 => top_weekend_creators(data, config),
        15 => email_sharing_by_hireable(data),
        16 => most_common_surnames(data),
        _ => Err(DevstatsError::Config(format!(
            "question {id} does not exist (valid: 1-{QUESTION_COUNT})"
        ))),
    }
}

fn logins(users: Vec<&User>) -> Answer {
    Answer::Logins(users.into_iter().map(|u| u.login.clone()).collect())
}

/// Q1: users in the city with more than `min_followers`, most followed first.
pub fn top_city_users_by_followers(
    data: &Dataset,
    config: &AnalysisConfig,
) -> Result<Answer, DevstatsError> {
    data.users.require(&["location", "followers"])?;
    let candidates: Vec<&User> = data
        .users
        .rows()
        .iter()
        .filter(|u| u.lives_in(&config.city))
        .filter(|u| u.followers.is_some_and(|f| f > config.min_followers))
        .collect();
    let top = top_n_by(&candidates, config.top_n, |u| u.followers);
    Ok(logins(top.into_iter().copied().collect()))
}

/// Q2: users in the city with the oldest accounts; undated users are left out.
pub fn earliest_city_users(
    data: &Dataset,
    config: &AnalysisConfig,
) -> Result<Answer, DevstatsError> {
    data.users.require(&["location", "created_at"])?;
    let candidates: Vec<&User> = data
        .users
        .rows()
        .iter()
        .filter(|u| u.lives_in(&config.city))
        .collect();
    let earliest = bottom_n_by(&candidates, config.top_n, |u| u.created_at);
    Ok(logins(earliest.into_iter().copied().collect()))
}

/// Q3: most frequent license names.
pub fn popular_licenses(data: &Dataset, config: &AnalysisConfig) -> Result<Answer, DevstatsError> {
    data.repositories.require(&["license_name"])?;
    let counts = value_counts(
        data.repositories
            .rows()
            .iter()
            .filter_map(|r| r.license_name.as_deref()),
    );
    Ok(Answer::Labels(
        counts
            .into_iter()
            .take(config.top_licenses)
            .map(|(license, _)| license.to_string())
            .collect(),
    ))
}

/// Q4: mode of the normalized company, blank included unless configured otherwise.
pub fn most_common_company(
    data: &Dataset,
    config: &AnalysisConfig,
) -> Result<Answer, DevstatsError> {
    data.users.require(&["company"])?;
    let company = mode(
        data.users
            .rows()
            .iter()
            .map(|u| u.company.as_str())
            .filter(|c| config.include_blank_company || !c.is_empty()),
    );
    Ok(Answer::Label(company.map(str::to_string)))
}

/// Q5: mode of the repository language.
pub fn most_popular_language(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.repositories.require(&["language"])?;
    let language = mode(
        data.repositories
            .rows()
            .iter()
            .filter_map(|r| r.language.as_deref()),
    );
    Ok(Answer::Label(language.map(str::to_string)))
}

/// Q6: runner-up language among repositories owned by recently joined users.
///
/// Of the two most frequent languages, the one with the smaller count wins.
/// When they tie, or only one language occurs, the most frequent one is
/// returned.
pub fn second_language_of_recent_users(
    data: &Dataset,
    config: &AnalysisConfig,
) -> Result<Answer, DevstatsError> {
    data.users.require(&["created_at"])?;
    data.repositories.require(&["language"])?;

    let cutoff = config.joined_after.and_time(chrono::NaiveTime::MIN);
    let recent: HashSet<&str> = data
        .users
        .rows()
        .iter()
        .filter(|u| u.joined_after(cutoff))
        .map(|u| u.login.as_str())
        .collect();

    let counts = value_counts(
        data.repositories
            .rows()
            .iter()
            .filter(|r| recent.contains(r.login.as_str()))
            .filter_map(|r| r.language.as_deref()),
    );
    // The less frequent of the two leaders; a tie, or a single language,
    // keeps the first one.
    let runner_up = match counts.as_slice() {
        [] => None,
        [(only, _)] => Some(*only),
        [(first, top), (second, next), ..] => Some(if next < top { *second } else { *first }),
    };
    Ok(Answer::Label(runner_up.map(str::to_string)))
}

/// Q7: language whose repositories average the most stars.
///
/// Languages are visited in sorted order and only a strictly larger mean
/// replaces the leader, so ties go to the alphabetically first language.
pub fn language_with_highest_average_stars(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.repositories
        .require(&["language", "stargazers_count"])?;

    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for repo in data.repositories.rows() {
        if let (Some(language), Some(stars)) = (repo.language.as_deref(), repo.stargazers_count) {
            let entry = totals.entry(language).or_default();
            entry.0 += stars as f64;
            entry.1 += 1;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (language, (sum, count)) in totals {
        let mean = sum / count as f64;
        if best.map_or(true, |(_, top)| mean > top) {
            best = Some((language, mean));
        }
    }
    Ok(Answer::Label(best.map(|(language, _)| language.to_string())))
}

/// Q8: users with the highest `followers / (1 + following)`.
pub fn top_leader_strength(
    data: &Dataset,
    config: &AnalysisConfig,
) -> Result<Answer, DevstatsError> {
    data.users.require(&["followers", "following"])?;
    let top = top_n_by(data.users.rows(), config.top_n, User::leader_strength);
    Ok(logins(top))
}

fn followers_and_repos(data: &Dataset) -> Result<Vec<(f64, f64)>, DevstatsError> {
    data.users.require(&["followers", "public_repos"])?;
    Ok(data
        .users
        .rows()
        .iter()
        .filter_map(|u| Some((u.public_repos? as f64, u.followers? as f64)))
        .collect())
}

/// Q9: Pearson correlation of followers with public repositories.
pub fn followers_repos_correlation(data: &Dataset) -> Result<Answer, DevstatsError> {
    let pairs = followers_and_repos(data)?;
    Ok(Answer::Scalar(pearson(pairs)))
}

/// Q10: OLS of followers on public repositories.
pub fn followers_on_public_repos(data: &Dataset) -> Result<Answer, DevstatsError> {
    let pairs = followers_and_repos(data)?;
    let fit = ols("followers", "public_repos", pairs)?;
    Ok(Answer::Regression(Box::new(fit)))
}

/// Q11: correlation of the projects and wiki flags, read as 0/1.
pub fn projects_wiki_correlation(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.repositories.require(&["has_projects", "has_wiki"])?;
    let as_unit = |flag: bool| if flag { 1.0 } else { 0.0 };
    let pairs = data
        .repositories
        .rows()
        .iter()
        .filter_map(|r| Some((as_unit(r.has_projects?), as_unit(r.has_wiki?))));
    Ok(Answer::Scalar(pearson(pairs)))
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Q12: mean `following` for hireable users and for everybody else.
pub fn following_by_hireable(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.users.require(&["hireable", "following"])?;
    let following = |hireable: bool| {
        mean(
            data.users
                .rows()
                .iter()
                .filter(move |u| u.is_hireable() == hireable)
                .filter_map(|u| u.following.map(|f| f as f64)),
        )
    };
    Ok(Answer::Split {
        hireable: following(true),
        other: following(false),
    })
}

/// Q13: OLS of followers on bio word count, users with a non-empty bio only.
pub fn followers_on_bio_length(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.users.require(&["bio", "followers"])?;
    let pairs = data.users.rows().iter().filter_map(|u| {
        let words = u.bio_word_count();
        (words > 0).then_some((words as f64, u.followers? as f64))
    });
    let fit = ols("followers", "bio_word_count", pairs)?;
    Ok(Answer::Regression(Box::new(fit)))
}

/// Q14: accounts that created the most repositories on Saturdays and Sundays.
pub fn top_weekend_creators(
    data: &Dataset,
    config: &AnalysisConfig,
) -> Result<Answer, DevstatsError> {
    data.repositories.require(&["created_at"])?;
    let counts = value_counts(
        data.repositories
            .rows()
            .iter()
            .filter(|r| r.created_on_weekend())
            .map(|r| r.login.as_str()),
    );
    Ok(Answer::Counted(
        counts
            .into_iter()
            .take(config.top_n)
            .map(|(login, count)| RankedCount {
                key: login.to_string(),
                count,
            })
            .collect(),
    ))
}

/// Q15: share of users with a public email, hireable vs everybody else.
///
/// An empty group yields 0 rather than a division by zero.
pub fn email_sharing_by_hireable(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.users.require(&["hireable", "email"])?;
    let share = |hireable: bool| {
        let (total, with_email) = data
            .users
            .rows()
            .iter()
            .filter(|u| u.is_hireable() == hireable)
            .fold((0usize, 0usize), |(t, e), u| {
                (t + 1, e + usize::from(u.email.is_some()))
            });
        if total > 0 {
            with_email as f64 / total as f64
        } else {
            0.0
        }
    };
    Ok(Answer::Split {
        hireable: Some(share(true)),
        other: Some(share(false)),
    })
}

/// Q16: surnames shared by the most users.
pub fn most_common_surnames(data: &Dataset) -> Result<Answer, DevstatsError> {
    data.users.require(&["name"])?;
    let surnames = data.users.rows().iter().filter_map(User::surname);
    let (names, count): (Vec<String>, usize) = tied_for_max(surnames)
        .map(|(names, count)| (names.into_iter().map(str::to_string).collect(), count))
        .unwrap_or_default();
    Ok(Answer::Surnames { names, count })
}
