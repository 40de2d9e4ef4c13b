//! In-memory record store.
//!
//! `Gradebook` owns students, courses and results and enforces the
//! integrity rules every write must satisfy: unique roll numbers, emails
//! and course codes, one result per student per course, and no result
//! pointing at a missing student or course. Every result it stores was
//! graded by the resolver on the way in.

use serde::Deserialize;

use crate::error::GradebookError;
use crate::model::{Course, CourseCredit, Mark, ResultRecord, Student};
use crate::statistics::{compute_dashboard, AverageGpaPolicy, DashboardStats};
use crate::transcript::{build_transcript, Transcript};

/// Fields for registering or updating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    /// Explicit id; assigned sequentially when absent.
    #[serde(default)]
    pub id: Option<u32>,
    pub roll_no: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Fields for defining or updating a course.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    #[serde(default)]
    pub id: Option<u32>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub credits: Option<CourseCredit>,
}

/// Fields for entering a mark.
#[derive(Debug, Clone, Deserialize)]
pub struct NewResult {
    #[serde(default)]
    pub id: Option<u32>,
    pub student_id: u32,
    pub course_id: u32,
    pub marks: Mark,
}

/// The full set of academic records.
#[derive(Debug, Clone, Default)]
pub struct Gradebook {
    students: Vec<Student>,
    courses: Vec<Course>,
    results: Vec<ResultRecord>,
}

fn next_id(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<u32, GradebookError> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or(GradebookError::IdSpaceExhausted { kind }),
    }
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn student(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn student_by_roll_no(&self, roll_no: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.roll_no == roll_no)
    }

    pub fn course(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    pub fn result(&self, id: u32) -> Option<&ResultRecord> {
        self.results.iter().find(|r| r.id() == id)
    }

    /// All results recorded for one student, in entry order.
    pub fn results_for(&self, student_id: u32) -> impl Iterator<Item = &ResultRecord> {
        self.results
            .iter()
            .filter(move |r| r.student_id() == student_id)
    }

    // -----------------------------------------------------------------------
    // Students
    // -----------------------------------------------------------------------

    /// Register a student.
    pub fn add_student(&mut self, new: NewStudent) -> Result<&Student, GradebookError> {
        let id = match new.id {
            Some(id) if self.student(id).is_some() => {
                return Err(GradebookError::DuplicateId {
                    kind: "student",
                    id,
                })
            }
            Some(id) => id,
            None => next_id("student", self.students.iter().map(|s| s.id))?,
        };
        self.check_student_unique(&new, None)?;

        tracing::debug!("registering student {id} ({})", new.roll_no);
        self.students.push(Student {
            id,
            roll_no: new.roll_no,
            name: new.name,
            email: new.email,
            phone: new.phone,
        });
        Ok(&self.students[self.students.len() - 1])
    }

    /// Replace a student's details, keeping their id and results.
    pub fn update_student(
        &mut self,
        id: u32,
        new: NewStudent,
    ) -> Result<&Student, GradebookError> {
        self.check_student_unique(&new, Some(id))?;
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(GradebookError::StudentNotFound(id))?;
        student.roll_no = new.roll_no;
        student.name = new.name;
        student.email = new.email;
        student.phone = new.phone;
        Ok(student)
    }

    /// Remove a student together with all of their results.
    pub fn remove_student(&mut self, id: u32) -> Result<Student, GradebookError> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(GradebookError::StudentNotFound(id))?;
        self.results.retain(|r| r.student_id() != id);
        Ok(self.students.remove(index))
    }

    fn check_student_unique(
        &self,
        new: &NewStudent,
        existing: Option<u32>,
    ) -> Result<(), GradebookError> {
        let others = self.students.iter().filter(|s| Some(s.id) != existing);
        for other in others {
            if other.roll_no == new.roll_no {
                return Err(GradebookError::DuplicateRollNo(new.roll_no.clone()));
            }
            if other.email.eq_ignore_ascii_case(&new.email) {
                return Err(GradebookError::DuplicateEmail(new.email.clone()));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Courses
    // -----------------------------------------------------------------------

    /// Define a course.
    pub fn add_course(&mut self, new: NewCourse) -> Result<&Course, GradebookError> {
        let id = match new.id {
            Some(id) if self.course(id).is_some() => {
                return Err(GradebookError::DuplicateId { kind: "course", id })
            }
            Some(id) => id,
            None => next_id("course", self.courses.iter().map(|c| c.id))?,
        };
        self.check_course_unique(&new, None)?;

        tracing::debug!("defining course {id} ({})", new.code);
        self.courses.push(Course {
            id,
            code: new.code,
            name: new.name,
            credits: new.credits,
        });
        Ok(&self.courses[self.courses.len() - 1])
    }

    /// Replace a course's details. Existing results keep their grades; only
    /// the credit weight used by transcripts changes.
    pub fn update_course(&mut self, id: u32, new: NewCourse) -> Result<&Course, GradebookError> {
        self.check_course_unique(&new, Some(id))?;
        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(GradebookError::CourseNotFound(id))?;
        course.code = new.code;
        course.name = new.name;
        course.credits = new.credits;
        Ok(course)
    }

    /// Remove a course together with every result recorded in it.
    pub fn remove_course(&mut self, id: u32) -> Result<Course, GradebookError> {
        let index = self
            .courses
            .iter()
            .position(|c| c.id == id)
            .ok_or(GradebookError::CourseNotFound(id))?;
        self.results.retain(|r| r.course_id() != id);
        Ok(self.courses.remove(index))
    }

    fn check_course_unique(
        &self,
        new: &NewCourse,
        existing: Option<u32>,
    ) -> Result<(), GradebookError> {
        let duplicate = self
            .courses
            .iter()
            .any(|c| Some(c.id) != existing && c.code == new.code);
        if duplicate {
            return Err(GradebookError::DuplicateCourseCode(new.code.clone()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Enter a student's mark for a course; the grade is resolved here.
    pub fn record_result(
        &mut self,
        student_id: u32,
        course_id: u32,
        marks: Mark,
    ) -> Result<&ResultRecord, GradebookError> {
        self.insert_result(NewResult {
            id: None,
            student_id,
            course_id,
            marks,
        })
    }

    /// Enter a result, honouring an explicit id when one is given.
    pub fn insert_result(&mut self, new: NewResult) -> Result<&ResultRecord, GradebookError> {
        if self.student(new.student_id).is_none() {
            return Err(GradebookError::StudentNotFound(new.student_id));
        }
        if self.course(new.course_id).is_none() {
            return Err(GradebookError::CourseNotFound(new.course_id));
        }
        let already_graded = self
            .results
            .iter()
            .any(|r| r.student_id() == new.student_id && r.course_id() == new.course_id);
        if already_graded {
            return Err(GradebookError::DuplicateResult {
                student_id: new.student_id,
                course_id: new.course_id,
            });
        }
        let id = match new.id {
            Some(id) if self.result(id).is_some() => {
                return Err(GradebookError::DuplicateId { kind: "result", id })
            }
            Some(id) => id,
            None => next_id("result", self.results.iter().map(|r| r.id()))?,
        };

        let record = ResultRecord::new(id, new.student_id, new.course_id, new.marks);
        tracing::debug!(
            "recorded result {id}: student {} course {} -> {} ({})",
            new.student_id,
            new.course_id,
            record.grade(),
            record.grade_point()
        );
        self.results.push(record);
        Ok(&self.results[self.results.len() - 1])
    }

    /// Change a recorded mark; the grade is re-resolved from scratch.
    pub fn update_mark(
        &mut self,
        result_id: u32,
        marks: Mark,
    ) -> Result<&ResultRecord, GradebookError> {
        let record = self
            .results
            .iter_mut()
            .find(|r| r.id() == result_id)
            .ok_or(GradebookError::ResultNotFound(result_id))?;
        record.set_mark(marks);
        Ok(record)
    }

    pub fn remove_result(&mut self, result_id: u32) -> Result<ResultRecord, GradebookError> {
        let index = self
            .results
            .iter()
            .position(|r| r.id() == result_id)
            .ok_or(GradebookError::ResultNotFound(result_id))?;
        Ok(self.results.remove(index))
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Build a student's transcript from the current records.
    pub fn transcript(&self, student_id: u32) -> Result<Transcript, GradebookError> {
        let student = self
            .student(student_id)
            .ok_or(GradebookError::StudentNotFound(student_id))?;
        Ok(build_transcript(student, &self.courses, &self.results))
    }

    pub fn dashboard(&self, policy: AverageGpaPolicy) -> DashboardStats {
        compute_dashboard(&self.students, &self.courses, &self.results, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LetterGrade;

    fn new_student(roll_no: &str, email: &str) -> NewStudent {
        NewStudent {
            id: None,
            roll_no: roll_no.into(),
            name: format!("Student {roll_no}"),
            email: email.into(),
            phone: String::new(),
        }
    }

    fn new_course(code: &str, credits: u32) -> NewCourse {
        NewCourse {
            id: None,
            code: code.into(),
            name: format!("{code} course"),
            credits: Some(CourseCredit::new(credits).unwrap()),
        }
    }

    fn mark(value: f64) -> Mark {
        Mark::new(value).unwrap()
    }

    fn seeded() -> Gradebook {
        let mut book = Gradebook::new();
        book.add_student(new_student("2024001", "alice@example.edu")).unwrap();
        book.add_student(new_student("2024002", "bob@example.edu")).unwrap();
        book.add_course(new_course("CS101", 4)).unwrap();
        book.add_course(new_course("CS102", 4)).unwrap();
        book.add_course(new_course("MATH101", 3)).unwrap();
        book
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let book = seeded();
        let ids: Vec<u32> = book.students().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(book.course_by_code("MATH101").unwrap().id, 3);
    }

    #[test]
    fn duplicate_roll_no_rejected() {
        let mut book = seeded();
        let err = book
            .add_student(new_student("2024001", "carol@example.edu"))
            .unwrap_err();
        assert_eq!(err, GradebookError::DuplicateRollNo("2024001".into()));
    }

    #[test]
    fn duplicate_email_rejected_case_insensitively() {
        let mut book = seeded();
        let err = book
            .add_student(new_student("2024003", "Alice@Example.edu"))
            .unwrap_err();
        assert!(matches!(err, GradebookError::DuplicateEmail(_)));
    }

    #[test]
    fn duplicate_course_code_rejected() {
        let mut book = seeded();
        let err = book.add_course(new_course("CS101", 3)).unwrap_err();
        assert_eq!(err, GradebookError::DuplicateCourseCode("CS101".into()));
    }

    #[test]
    fn explicit_duplicate_id_rejected() {
        let mut book = seeded();
        let mut student = new_student("2024009", "dave@example.edu");
        student.id = Some(2);
        assert_eq!(
            book.add_student(student).unwrap_err(),
            GradebookError::DuplicateId {
                kind: "student",
                id: 2
            }
        );
    }

    #[test]
    fn record_result_resolves_grade() {
        let mut book = seeded();
        let record = book.record_result(1, 1, mark(85.0)).unwrap();
        assert_eq!(record.id(), 1);
        assert_eq!(record.grade(), LetterGrade::A);
        assert_eq!(record.grade_point(), 4.0);
    }

    #[test]
    fn record_result_checks_references() {
        let mut book = seeded();
        assert_eq!(
            book.record_result(42, 1, mark(70.0)).unwrap_err(),
            GradebookError::StudentNotFound(42)
        );
        assert_eq!(
            book.record_result(1, 42, mark(70.0)).unwrap_err(),
            GradebookError::CourseNotFound(42)
        );
    }

    #[test]
    fn second_result_for_same_course_rejected() {
        let mut book = seeded();
        book.record_result(1, 1, mark(60.0)).unwrap();
        let err = book.record_result(1, 1, mark(90.0)).unwrap_err();
        assert_eq!(
            err,
            GradebookError::DuplicateResult {
                student_id: 1,
                course_id: 1
            }
        );
    }

    #[test]
    fn update_mark_recomputes_grade() {
        let mut book = seeded();
        let id = book.record_result(1, 1, mark(92.0)).unwrap().id();
        let updated = book.update_mark(id, mark(64.0)).unwrap();
        assert_eq!(updated.grade(), LetterGrade::BMinus);
        assert_eq!(updated.grade_point(), 2.7);
        assert!(book.update_mark(99, mark(50.0)).unwrap_err().is_not_found());
    }

    #[test]
    fn removing_student_cascades_results() {
        let mut book = seeded();
        book.record_result(1, 1, mark(80.0)).unwrap();
        book.record_result(2, 1, mark(80.0)).unwrap();
        book.remove_student(1).unwrap();
        assert_eq!(book.results().len(), 1);
        assert_eq!(book.results()[0].student_id(), 2);
    }

    #[test]
    fn removing_course_cascades_results() {
        let mut book = seeded();
        book.record_result(1, 1, mark(80.0)).unwrap();
        book.record_result(1, 2, mark(80.0)).unwrap();
        book.remove_course(1).unwrap();
        assert_eq!(book.results().len(), 1);
        assert_eq!(book.results()[0].course_id(), 2);
    }

    #[test]
    fn update_student_keeps_uniqueness() {
        let mut book = seeded();
        let err = book
            .update_student(2, new_student("2024001", "bob@example.edu"))
            .unwrap_err();
        assert!(matches!(err, GradebookError::DuplicateRollNo(_)));

        let updated = book
            .update_student(2, new_student("2024002", "robert@example.edu"))
            .unwrap();
        assert_eq!(updated.email, "robert@example.edu");
    }

    #[test]
    fn course_credit_change_flows_into_transcript() {
        let mut book = seeded();
        book.record_result(1, 1, mark(95.0)).unwrap();
        book.record_result(1, 3, mark(72.0)).unwrap();
        assert_eq!(book.transcript(1).unwrap().summary.total_credits, 7);

        book.update_course(3, new_course("MATH101", 1)).unwrap();
        let transcript = book.transcript(1).unwrap();
        assert_eq!(transcript.summary.total_credits, 5);
        // (4.0 * 4 + 3.0 * 1) / 5
        assert!((transcript.summary.cgpa - 3.8).abs() < 1e-12);
    }

    #[test]
    fn transcript_for_missing_student_is_an_error() {
        let book = seeded();
        assert_eq!(
            book.transcript(7).unwrap_err(),
            GradebookError::StudentNotFound(7)
        );
    }

    #[test]
    fn dashboard_counts_records() {
        let mut book = seeded();
        book.record_result(1, 1, mark(85.0)).unwrap();
        book.record_result(2, 2, mark(78.0)).unwrap();
        let stats = book.dashboard(AverageGpaPolicy::Pooled);
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_courses, 3);
        assert_eq!(stats.total_results, 2);
        assert!((stats.average_gpa - 3.75).abs() < 1e-12);
    }

    #[test]
    fn results_for_filters_by_student() {
        let mut book = seeded();
        book.record_result(1, 1, mark(85.0)).unwrap();
        book.record_result(2, 1, mark(72.0)).unwrap();
        book.record_result(1, 3, mark(61.0)).unwrap();

        let ids: Vec<u32> = book.results_for(1).map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(book.results_for(2).count(), 1);
        assert_eq!(book.results_for(99).count(), 0);
    }

    #[test]
    fn remove_result_deletes_one_record() {
        let mut book = seeded();
        book.record_result(1, 1, mark(85.0)).unwrap();
        book.record_result(1, 2, mark(78.0)).unwrap();

        let removed = book.remove_result(1).unwrap();
        assert_eq!(removed.course_id(), 1);
        assert_eq!(book.results().len(), 1);
        assert!(book.result(1).is_none());
        assert_eq!(book.transcript(1).unwrap().summary.course_count, 1);

        let err = book.remove_result(1).unwrap_err();
        assert_eq!(err, GradebookError::ResultNotFound(1));
        assert!(err.is_not_found());
    }

    #[test]
    fn id_assignment_stops_at_max_id() {
        let mut book = Gradebook::new();
        book.add_student(NewStudent {
            id: Some(u32::MAX),
            ..new_student("2024001", "alice@example.edu")
        })
        .unwrap();
        let err = book
            .add_student(new_student("2024002", "bob@example.edu"))
            .unwrap_err();
        assert_eq!(err, GradebookError::IdSpaceExhausted { kind: "student" });
        assert_eq!(book.students().len(), 1);

        book.add_course(NewCourse {
            id: Some(u32::MAX),
            ..new_course("CS101", 4)
        })
        .unwrap();
        assert_eq!(
            book.add_course(new_course("CS102", 4)).unwrap_err(),
            GradebookError::IdSpaceExhausted { kind: "course" }
        );

        book.insert_result(NewResult {
            id: Some(u32::MAX),
            student_id: u32::MAX,
            course_id: u32::MAX,
            marks: mark(70.0),
        })
        .unwrap();
        book.add_course(NewCourse {
            id: Some(1),
            ..new_course("MATH101", 3)
        })
        .unwrap();
        assert_eq!(
            book.record_result(u32::MAX, 1, mark(60.0)).unwrap_err(),
            GradebookError::IdSpaceExhausted { kind: "result" }
        );
    }
}
