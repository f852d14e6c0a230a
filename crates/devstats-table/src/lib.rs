//! Loading of the users and repositories tables.
//!
//! Reads the two CSV exports with `csv` + `serde`, coerces malformed cells
//! to absent values, normalizes company names and exposes the derived
//! columns (leader strength, bio word count, surname, weekday) the report
//! questions are computed over.

pub mod company;
pub mod loader;
pub mod parse;
pub mod records;

pub use company::normalize_company;
pub use loader::{load_repositories, load_users, Dataset, Table};
pub use records::{Repository, User};
