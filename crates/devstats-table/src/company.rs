//! Company name normalization.

use serde::{Deserialize, Deserializer};

/// Normalize a free-text company name so variants of the same employer
/// land in one bucket.
///
/// Trims whitespace, drops the leading `@` handle marker(s) and
/// upper-cases. A missing company becomes the empty string, which is its
/// own bucket when companies are counted.
///
/// # Examples
///
/// ```
/// use devstats_table::normalize_company;
///
/// assert_eq!(normalize_company(Some("@Acme ")), "ACME");
/// assert_eq!(normalize_company(Some("acme")), "ACME");
/// assert_eq!(normalize_company(None), "");
/// ```
pub fn normalize_company(company: Option<&str>) -> String {
    match company {
        Some(raw) => raw
            .trim()
            .trim_start_matches('@')
            .trim()
            .to_uppercase(),
        None => String::new(),
    }
}

/// `deserialize_with` adapter that normalizes the `company` cell on load.
pub(crate) fn deserialize_company<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_company(raw.as_deref()))
}
