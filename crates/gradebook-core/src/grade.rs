//! Mark to letter-grade resolution.
//!
//! The scale is a fixed table of ten bands with inclusive lower bounds,
//! ordered by descending threshold. The last band has a threshold of zero
//! and catches every mark below the ones above it, so every mark in
//! [0, 100] maps to exactly one band.

use serde::{Deserialize, Serialize};

use crate::model::{LetterGrade, Mark};

/// One row of the grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBand {
    /// Lowest mark (inclusive) that earns this band.
    pub min_mark: f64,
    pub letter: LetterGrade,
    pub grade_point: f64,
}

const BAND_COUNT: usize = 10;

/// The grading scale, highest band first.
pub static GRADE_BANDS: [GradeBand; BAND_COUNT] = [
    band(90.0, LetterGrade::APlus, 4.0),
    band(85.0, LetterGrade::A, 4.0),
    band(80.0, LetterGrade::AMinus, 3.7),
    band(75.0, LetterGrade::BPlus, 3.5),
    band(70.0, LetterGrade::B, 3.0),
    band(65.0, LetterGrade::BMinus, 2.7),
    band(60.0, LetterGrade::CPlus, 2.5),
    band(55.0, LetterGrade::C, 2.0),
    band(50.0, LetterGrade::CMinus, 1.7),
    band(0.0, LetterGrade::F, 0.0),
];

/// Index of the lowest band, which every unmatched mark falls into.
const CATCH_ALL: usize = BAND_COUNT - 1;

const fn band(min_mark: f64, letter: LetterGrade, grade_point: f64) -> GradeBand {
    GradeBand {
        min_mark,
        letter,
        grade_point,
    }
}

/// The grade a mark resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub letter: LetterGrade,
    pub grade_point: f64,
}

impl From<&GradeBand> for Grade {
    fn from(band: &GradeBand) -> Self {
        Self {
            letter: band.letter,
            grade_point: band.grade_point,
        }
    }
}

/// Resolve a raw mark to its letter grade and grade-point.
///
/// Callers are expected to pass a mark already validated to lie in
/// [0, 100]. Anything below the lowest threshold, including NaN, falls
/// through to the catch-all band.
pub fn resolve(mark: f64) -> Grade {
    GRADE_BANDS[..CATCH_ALL]
        .iter()
        .find(|band| mark >= band.min_mark)
        .unwrap_or(&GRADE_BANDS[CATCH_ALL])
        .into()
}

/// Resolve a validated mark.
pub fn resolve_mark(mark: Mark) -> Grade {
    resolve(mark.value())
}

/// Look up the band for a letter grade.
pub fn band_for(letter: LetterGrade) -> &'static GradeBand {
    GRADE_BANDS
        .iter()
        .find(|band| band.letter == letter)
        .unwrap_or(&GRADE_BANDS[CATCH_ALL])
}
