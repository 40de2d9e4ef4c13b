//! Credit-weighted transcript aggregation.
//!
//! `summarize` folds a student's graded results into course count, total
//! credits and CGPA. `build_transcript` joins results with their courses
//! first, so each line carries the credit weight the fold needs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Course, LetterGrade, ResultRecord, Student};

/// Anything that carries a grade-point and an optional credit weight.
///
/// A missing credit counts as zero: the item still counts as a course but
/// adds nothing to the credit total or the weighted grade-points.
pub trait CreditedGrade {
    fn grade_point(&self) -> f64;
    fn credit(&self) -> Option<u32>;
}

impl<T: CreditedGrade + ?Sized> CreditedGrade for &T {
    fn grade_point(&self) -> f64 {
        (**self).grade_point()
    }

    fn credit(&self) -> Option<u32> {
        (**self).credit()
    }
}

impl CreditedGrade for (f64, Option<u32>) {
    fn grade_point(&self) -> f64 {
        self.0
    }

    fn credit(&self) -> Option<u32> {
        self.1
    }
}

/// Summary statistics over one student's results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSummary {
    pub course_count: usize,
    pub total_credits: u32,
    /// Credit-weighted mean grade-point, at full precision.
    pub cgpa: f64,
    /// `cgpa` rounded to two decimal places.
    pub cgpa_display: f64,
}

impl TranscriptSummary {
    pub fn new(course_count: usize, total_credits: u32, cgpa: f64) -> Self {
        Self {
            course_count,
            total_credits,
            cgpa,
            cgpa_display: round_2dp(cgpa),
        }
    }

    /// The summary of a student with no results.
    pub fn empty() -> Self {
        Self::new(0, 0, 0.0)
    }

    pub fn display_cgpa(&self) -> f64 {
        round_2dp(self.cgpa)
    }
}

impl Default for TranscriptSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Round to two decimal places for presentation.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fold graded results into a transcript summary.
///
/// CGPA = Σ(grade_point × credit) / Σ credit, or 0 when no credits were
/// attempted. Never fails.
pub fn summarize<I>(results: I) -> TranscriptSummary
where
    I: IntoIterator,
    I::Item: CreditedGrade,
{
    let (course_count, total_credits, weighted_points) = results.into_iter().fold(
        (0usize, 0u32, 0.0f64),
        |(count, credits, points), result| {
            let credit = result.credit().unwrap_or(0);
            (
                count + 1,
                credits.saturating_add(credit),
                points + result.grade_point() * f64::from(credit),
            )
        },
    );

    let cgpa = if total_credits > 0 {
        weighted_points / f64::from(total_credits)
    } else {
        0.0
    };

    TranscriptSummary::new(course_count, total_credits, cgpa)
}

/// One course on a student's transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub result_id: u32,
    pub course_id: u32,
    pub course_code: String,
    pub course_name: String,
    /// `None` when the course has no credit value or could not be found.
    pub credits: Option<u32>,
    pub marks: f64,
    pub grade: LetterGrade,
    pub grade_point: f64,
}

impl CreditedGrade for TranscriptLine {
    fn grade_point(&self) -> f64 {
        self.grade_point
    }

    fn credit(&self) -> Option<u32> {
        self.credits
    }
}

/// A student's full transcript: one line per result plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub student: Student,
    pub lines: Vec<TranscriptLine>,
    pub summary: TranscriptSummary,
}

/// Build a student's transcript from a snapshot of courses and results.
///
/// Results belonging to other students are ignored. A result whose course
/// is missing still appears, with no credit and a placeholder label.
pub fn build_transcript(
    student: &Student,
    courses: &[Course],
    results: &[ResultRecord],
) -> Transcript {
    let courses_by_id: HashMap<u32, &Course> = courses.iter().map(|c| (c.id, c)).collect();

    let lines: Vec<TranscriptLine> = results
        .iter()
        .filter(|r| r.student_id() == student.id)
        .map(|r| {
            let (course_code, course_name, credits) = match courses_by_id.get(&r.course_id()) {
                Some(course) => (
                    course.code.clone(),
                    course.name.clone(),
                    course.credits.map(u32::from),
                ),
                None => {
                    tracing::warn!(
                        "result {} references unknown course {}, counting zero credits",
                        r.id(),
                        r.course_id()
                    );
                    (
                        format!("#{}", r.course_id()),
                        "Unknown course".to_string(),
                        None,
                    )
                }
            };
            TranscriptLine {
                result_id: r.id(),
                course_id: r.course_id(),
                course_code,
                course_name,
                credits,
                marks: r.marks().value(),
                grade: r.grade(),
                grade_point: r.grade_point(),
            }
        })
        .collect();

    let summary = summarize(&lines);

    Transcript {
        student: student.clone(),
        lines,
        summary,
    }
}
