//! Dashboard statistics across all students.
//!
//! Per-student CGPA is defined precisely by [`crate::transcript::summarize`].
//! How to average across students is a policy choice, so both readings are
//! offered through [`AverageGpaPolicy`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grade::GRADE_BANDS;
use crate::model::{Course, LetterGrade, ResultRecord, Student};
use crate::transcript::{round_2dp, summarize};

/// How the dashboard's average GPA is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AverageGpaPolicy {
    /// Plain mean of every result's grade-point, ignoring credits.
    Pooled,
    /// Mean of each student's credit-weighted CGPA.
    #[default]
    PerStudent,
}

impl fmt::Display for AverageGpaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageGpaPolicy::Pooled => write!(f, "pooled"),
            AverageGpaPolicy::PerStudent => write!(f, "per-student"),
        }
    }
}

impl FromStr for AverageGpaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pooled" => Ok(AverageGpaPolicy::Pooled),
            "per-student" | "per_student" | "student" => Ok(AverageGpaPolicy::PerStudent),
            other => Err(format!("unknown average GPA policy: {other}")),
        }
    }
}

/// Number of results that received one letter grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCount {
    pub grade: LetterGrade,
    pub count: usize,
}

/// Headline numbers for the records dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_results: usize,
    /// Average GPA under `policy`, at full precision.
    pub average_gpa: f64,
    /// `average_gpa` rounded to two decimal places.
    pub average_gpa_display: f64,
    pub policy: AverageGpaPolicy,
    /// Result count per letter grade, highest grade first.
    pub grade_distribution: Vec<GradeCount>,
}

/// Compute dashboard statistics from a snapshot of the records.
pub fn compute_dashboard(
    students: &[Student],
    courses: &[Course],
    results: &[ResultRecord],
    policy: AverageGpaPolicy,
) -> DashboardStats {
    let average_gpa = match policy {
        AverageGpaPolicy::Pooled => pooled_average(results),
        AverageGpaPolicy::PerStudent => per_student_average(courses, results),
    };

    DashboardStats {
        total_students: students.len(),
        total_courses: courses.len(),
        total_results: results.len(),
        average_gpa,
        average_gpa_display: round_2dp(average_gpa),
        policy,
        grade_distribution: grade_distribution(results),
    }
}

fn pooled_average(results: &[ResultRecord]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.grade_point()).sum::<f64>() / results.len() as f64
}

/// Mean CGPA over students with at least one credited result.
///
/// Students whose results carry no credits have no defined CGPA and are
/// left out rather than counted as zero.
fn per_student_average(courses: &[Course], results: &[ResultRecord]) -> f64 {
    let credits: HashMap<u32, Option<u32>> = courses
        .iter()
        .map(|c| (c.id, c.credits.map(u32::from)))
        .collect();

    let mut per_student: BTreeMap<u32, Vec<(f64, Option<u32>)>> = BTreeMap::new();
    for r in results {
        let credit = credits.get(&r.course_id()).copied().flatten();
        per_student
            .entry(r.student_id())
            .or_default()
            .push((r.grade_point(), credit));
    }

    let cgpas: Vec<f64> = per_student
        .values()
        .map(summarize)
        .filter(|summary| summary.total_credits > 0)
        .map(|summary| summary.cgpa)
        .collect();

    if cgpas.is_empty() {
        0.0
    } else {
        cgpas.iter().sum::<f64>() / cgpas.len() as f64
    }
}

/// Count results per letter grade, in band order.
pub fn grade_distribution(results: &[ResultRecord]) -> Vec<GradeCount> {
    let mut counts: HashMap<LetterGrade, usize> = HashMap::new();
    for r in results {
        *counts.entry(r.grade()).or_default() += 1;
    }

    GRADE_BANDS
        .iter()
        .map(|band| GradeCount {
            grade: band.letter,
            count: counts.get(&band.letter).copied().unwrap_or(0),
        })
        .collect()
}
