//! Core data model types for gradebook.
//!
//! Students, courses, and per-course results, plus the validated scalar
//! types (`Mark`, `CourseCredit`) that guard their ranges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GradebookError;
use crate::grade::{resolve_mark, Grade};

/// A raw course mark in the inclusive range [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Mark(f64);

impl Mark {
    /// Upper bound of the mark scale.
    pub const MAX: f64 = 100.0;

    /// Validate a raw number as a mark.
    pub fn new(value: f64) -> Result<Self, GradebookError> {
        if !value.is_finite() {
            return Err(GradebookError::NonFiniteMark);
        }
        if !(0.0..=Self::MAX).contains(&value) {
            return Err(GradebookError::MarkOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Mark {
    type Error = GradebookError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Mark::new(value)
    }
}

impl From<Mark> for f64 {
    fn from(mark: Mark) -> Self {
        mark.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid mark: {s}"))?;
        Mark::new(value).map_err(|e| e.to_string())
    }
}

/// A course's credit weight, between 1 and 6 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CourseCredit(u32);

impl CourseCredit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 6;

    /// Validate a raw credit weight.
    pub fn new(value: u32) -> Result<Self, GradebookError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GradebookError::CreditOutOfRange(value))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for CourseCredit {
    type Error = GradebookError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CourseCredit::new(value)
    }
}

impl From<CourseCredit> for u32 {
    fn from(credit: CourseCredit) -> Self {
        credit.0
    }
}

/// Letter grades on the fixed ten-band scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::F => "F",
        }
    }

    /// The leading letter, without any `+`/`-` modifier.
    pub fn family(self) -> char {
        match self {
            LetterGrade::APlus | LetterGrade::A | LetterGrade::AMinus => 'A',
            LetterGrade::BPlus | LetterGrade::B | LetterGrade::BMinus => 'B',
            LetterGrade::CPlus | LetterGrade::C | LetterGrade::CMinus => 'C',
            LetterGrade::F => 'F',
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Ok(LetterGrade::APlus),
            "A" => Ok(LetterGrade::A),
            "A-" => Ok(LetterGrade::AMinus),
            "B+" => Ok(LetterGrade::BPlus),
            "B" => Ok(LetterGrade::B),
            "B-" => Ok(LetterGrade::BMinus),
            "C+" => Ok(LetterGrade::CPlus),
            "C" => Ok(LetterGrade::C),
            "C-" => Ok(LetterGrade::CMinus),
            "F" => Ok(LetterGrade::F),
            other => Err(format!("unknown letter grade: {other}")),
        }
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    /// Institution-issued roll number, unique across students.
    pub roll_no: String,
    pub name: String,
    /// Contact email, unique across students.
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// A course students can receive results in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    /// Short course code (e.g. "CS101"), unique across courses.
    pub code: String,
    pub name: String,
    /// Credit weight; a course without one aggregates as zero credits.
    #[serde(default)]
    pub credits: Option<CourseCredit>,
}

/// One student's mark in one course, annotated with its grade.
///
/// The letter and grade-point are always the resolver's output for the
/// stored mark. They are recomputed whenever the mark changes and are
/// re-derived on deserialization rather than trusted from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResultRecordData")]
pub struct ResultRecord {
    id: u32,
    student_id: u32,
    course_id: u32,
    marks: Mark,
    grade: LetterGrade,
    grade_point: f64,
}

impl ResultRecord {
    pub fn new(id: u32, student_id: u32, course_id: u32, marks: Mark) -> Self {
        let Grade {
            letter,
            grade_point,
        } = resolve_mark(marks);
        Self {
            id,
            student_id,
            course_id,
            marks,
            grade: letter,
            grade_point,
        }
    }

    /// Replace the mark and re-resolve the grade.
    pub fn set_mark(&mut self, marks: Mark) {
        let grade = resolve_mark(marks);
        self.marks = marks;
        self.grade = grade.letter;
        self.grade_point = grade.grade_point;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn student_id(&self) -> u32 {
        self.student_id
    }

    pub fn course_id(&self) -> u32 {
        self.course_id
    }

    pub fn marks(&self) -> Mark {
        self.marks
    }

    pub fn grade(&self) -> LetterGrade {
        self.grade
    }

    pub fn grade_point(&self) -> f64 {
        self.grade_point
    }
}

/// Wire shape of a result; any stored grade fields are ignored.
#[derive(Deserialize)]
struct ResultRecordData {
    id: u32,
    student_id: u32,
    course_id: u32,
    marks: Mark,
}

impl From<ResultRecordData> for ResultRecord {
    fn from(data: ResultRecordData) -> Self {
        ResultRecord::new(data.id, data.student_id, data.course_id, data.marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_range_validation() {
        assert!(Mark::new(0.0).is_ok());
        assert!(Mark::new(100.0).is_ok());
        assert!(Mark::new(72.25).is_ok());
        assert_eq!(
            Mark::new(100.01),
            Err(GradebookError::MarkOutOfRange(100.01))
        );
        assert_eq!(Mark::new(-1.0), Err(GradebookError::MarkOutOfRange(-1.0)));
        assert_eq!(Mark::new(f64::NAN), Err(GradebookError::NonFiniteMark));
    }

    #[test]
    fn mark_parse() {
        assert_eq!("85".parse::<Mark>().unwrap().value(), 85.0);
        assert!("abc".parse::<Mark>().is_err());
        assert!("101".parse::<Mark>().is_err());
    }

    #[test]
    fn credit_range_validation() {
        assert!(CourseCredit::new(1).is_ok());
        assert!(CourseCredit::new(6).is_ok());
        assert_eq!(
            CourseCredit::new(0),
            Err(GradebookError::CreditOutOfRange(0))
        );
        assert_eq!(
            CourseCredit::new(7),
            Err(GradebookError::CreditOutOfRange(7))
        );
    }

    #[test]
    fn letter_grade_display_and_parse() {
        assert_eq!(LetterGrade::APlus.to_string(), "A+");
        assert_eq!(LetterGrade::CMinus.to_string(), "C-");
        assert_eq!("b+".parse::<LetterGrade>().unwrap(), LetterGrade::BPlus);
        assert_eq!("F".parse::<LetterGrade>().unwrap(), LetterGrade::F);
        assert!("E".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn letter_grade_family() {
        assert_eq!(LetterGrade::AMinus.family(), 'A');
        assert_eq!(LetterGrade::BPlus.family(), 'B');
        assert_eq!(LetterGrade::C.family(), 'C');
        assert_eq!(LetterGrade::F.family(), 'F');
    }

    #[test]
    fn result_record_derives_grade() {
        let record = ResultRecord::new(1, 1, 1, Mark::new(85.0).unwrap());
        assert_eq!(record.grade(), LetterGrade::A);
        assert_eq!(record.grade_point(), 4.0);
    }

    #[test]
    fn set_mark_recomputes_grade() {
        let mut record = ResultRecord::new(1, 1, 1, Mark::new(92.0).unwrap());
        record.set_mark(Mark::new(49.5).unwrap());
        assert_eq!(record.marks().value(), 49.5);
        assert_eq!(record.grade(), LetterGrade::F);
        assert_eq!(record.grade_point(), 0.0);
    }

    #[test]
    fn deserialize_ignores_stored_grade() {
        let json = r#"{"id":3,"student_id":1,"course_id":2,"marks":78.0,"grade":"A+","grade_point":4.0}"#;
        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.grade(), LetterGrade::BPlus);
        assert_eq!(record.grade_point(), 3.5);
    }

    #[test]
    fn deserialize_rejects_out_of_range_mark() {
        let json = r#"{"id":3,"student_id":1,"course_id":2,"marks":120.0}"#;
        assert!(serde_json::from_str::<ResultRecord>(json).is_err());
    }

    #[test]
    fn result_record_serializes_derived_fields() {
        let record = ResultRecord::new(7, 2, 3, Mark::new(66.0).unwrap());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["grade"], "B-");
        assert_eq!(value["grade_point"], 2.7);
        assert_eq!(value["marks"], 66.0);
    }

    #[test]
    fn course_without_credits_deserializes() {
        let course: Course =
            serde_json::from_str(r#"{"id":1,"code":"CS101","name":"Intro"}"#).unwrap();
        assert!(course.credits.is_none());
    }
}
