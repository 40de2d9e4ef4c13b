//! gradebook-core — Grade resolution, transcript aggregation, and records.
//!
//! This crate defines the data model, the mark-to-grade mapping, and the
//! credit-weighted transcript fold that the rest of gradebook builds on.

pub mod config;
pub mod error;
pub mod grade;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod store;
pub mod transcript;

pub use error::GradebookError;
pub use grade::{resolve, resolve_mark, Grade, GradeBand, GRADE_BANDS};
pub use model::{Course, CourseCredit, LetterGrade, Mark, ResultRecord, Student};
pub use store::Gradebook;
pub use transcript::{build_transcript, summarize, CreditedGrade, Transcript, TranscriptSummary};
