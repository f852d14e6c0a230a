//! The sixteen report questions and their renderings.
//!
//! Each question is a pure function of the loaded [`Dataset`] and the
//! [`AnalysisConfig`]; [`run_report`] evaluates the selected ones in order
//! and keeps going when one of them fails, so a single unusable column never
//! hides the other answers.
//!
//! [`Dataset`]: devstats_table::Dataset
//! [`AnalysisConfig`]: devstats_core::AnalysisConfig

pub mod questions;
pub mod render;
pub mod report;

pub use questions::{answer, title, Answer, RankedCount, QUESTION_COUNT};
pub use render::OutputFormat;
pub use report::{run_report, Finding, Outcome, Report};
