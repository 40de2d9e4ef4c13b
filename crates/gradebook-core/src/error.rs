//! Record validation errors.
//!
//! The grade resolver and transcript aggregator never fail. These errors
//! belong to the layers that feed them: mark and credit validation, and the
//! integrity rules of the record store.

use thiserror::Error;

/// Errors raised when a record would violate the gradebook's invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// A mark outside the inclusive range [0, 100].
    #[error("mark {0} is outside the range 0-100")]
    MarkOutOfRange(f64),

    /// A mark that is NaN or infinite.
    #[error("mark is not a finite number")]
    NonFiniteMark,

    /// A course credit weight outside 1-6.
    #[error("course credit {0} is outside the range 1-6")]
    CreditOutOfRange(u32),

    /// No student with this id.
    #[error("student not found: {0}")]
    StudentNotFound(u32),

    /// No course with this id.
    #[error("course not found: {0}")]
    CourseNotFound(u32),

    /// No result with this id.
    #[error("result not found: {0}")]
    ResultNotFound(u32),

    /// Another student already uses this roll number.
    #[error("roll number already registered: {0}")]
    DuplicateRollNo(String),

    /// Another student already uses this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Another course already uses this code.
    #[error("course code already exists: {0}")]
    DuplicateCourseCode(String),

    /// An id was supplied twice for the same kind of record.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    /// Every id up to `u32::MAX` is taken, so none can be assigned.
    #[error("no {kind} id left to assign")]
    IdSpaceExhausted { kind: &'static str },

    /// The student already has a result for this course.
    #[error("result already exists for student {student_id} in course {course_id}")]
    DuplicateResult { student_id: u32, course_id: u32 },
}

impl GradebookError {
    /// Returns `true` if the error names a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GradebookError::StudentNotFound(_)
                | GradebookError::CourseNotFound(_)
                | GradebookError::ResultNotFound(_)
        )
    }
}
