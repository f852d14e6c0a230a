//! Descriptive statistics used by the report.
//!
//! Value counts and modes, stable top-N selection, Pearson correlation and
//! a two-parameter ordinary least squares fit with its summary table.

pub mod correlation;
pub mod counts;
pub mod rank;
pub mod regression;

pub use correlation::pearson;
pub use counts::{mode, tied_for_max, value_counts};
pub use rank::{bottom_n_by, top_n_by};
pub use regression::{ols, Coefficient, RegressionSummary};
