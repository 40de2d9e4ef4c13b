//! Record-keeping integration tests.
//!
//! Drives the store from entry to export: marks are graded on the way in,
//! edits and deletions flow through to transcripts, and saved reports
//! load back unchanged.

use gradebook_core::model::{CourseCredit, LetterGrade, Mark};
use gradebook_core::report::TranscriptReport;
use gradebook_core::statistics::AverageGpaPolicy;
use gradebook_core::store::{NewCourse, NewStudent};
use gradebook_core::Gradebook;

fn student(roll_no: &str, name: &str) -> NewStudent {
    NewStudent {
        id: None,
        roll_no: roll_no.into(),
        name: name.into(),
        email: format!("{}@university.edu", roll_no),
        phone: String::new(),
    }
}

fn course(code: &str, credits: Option<u32>) -> NewCourse {
    NewCourse {
        id: None,
        code: code.into(),
        name: format!("{code} course"),
        credits: credits.map(|c| CourseCredit::new(c).unwrap()),
    }
}

fn mark(value: f64) -> Mark {
    Mark::new(value).unwrap()
}

fn seeded() -> Gradebook {
    let mut book = Gradebook::new();
    book.add_student(student("2024001", "Alice Johnson")).unwrap();
    book.add_student(student("2024002", "Bob Smith")).unwrap();
    book.add_course(course("CS101", Some(4))).unwrap();
    book.add_course(course("CS102", Some(4))).unwrap();
    book.add_course(course("MATH101", Some(3))).unwrap();
    book.record_result(1, 1, mark(85.0)).unwrap();
    book.record_result(1, 2, mark(78.0)).unwrap();
    book.record_result(1, 3, mark(66.0)).unwrap();
    book.record_result(2, 1, mark(92.0)).unwrap();
    book.record_result(2, 3, mark(48.0)).unwrap();
    book
}

#[test]
fn entered_marks_produce_expected_cgpa() {
    let book = seeded();

    let alice = book.transcript(1).unwrap();
    assert_eq!(alice.summary.course_count, 3);
    assert_eq!(alice.summary.total_credits, 11);
    assert!((alice.summary.cgpa - 38.1 / 11.0).abs() < 1e-9);
    assert_eq!(alice.summary.cgpa_display, 3.46);

    let bob = book.transcript(2).unwrap();
    assert_eq!(bob.lines[1].grade, LetterGrade::F);
    assert_eq!(bob.summary.cgpa_display, 2.29);
}

#[test]
fn mark_edit_regrades_and_updates_transcript() {
    let mut book = seeded();

    // Bob's calculus result moves from F to C-.
    let updated = book.update_mark(5, mark(50.0)).unwrap();
    assert_eq!(updated.grade(), LetterGrade::CMinus);
    assert_eq!(updated.grade_point(), 1.7);

    let bob = book.transcript(2).unwrap();
    // (4.0 * 4 + 1.7 * 3) / 7 = 3.0142...
    assert_eq!(bob.summary.cgpa_display, 3.01);
}

#[test]
fn uncredited_course_counts_zero_credits() {
    let mut book = seeded();
    book.add_course(course("SEM100", None)).unwrap();
    book.record_result(1, 4, mark(95.0)).unwrap();

    let alice = book.transcript(1).unwrap();
    assert_eq!(alice.summary.course_count, 4);
    assert_eq!(alice.summary.total_credits, 11);
    assert_eq!(alice.summary.cgpa_display, 3.46);
}

#[test]
fn removing_a_course_drops_its_results() {
    let mut book = seeded();
    book.remove_course(1).unwrap();

    assert_eq!(book.results().len(), 3);
    let bob = book.transcript(2).unwrap();
    assert_eq!(bob.summary.course_count, 1);
    assert_eq!(bob.summary.total_credits, 3);
    assert_eq!(bob.summary.cgpa, 0.0);
}

#[test]
fn removing_a_student_drops_their_results() {
    let mut book = seeded();
    book.remove_student(1).unwrap();

    assert_eq!(book.results().len(), 2);
    assert!(book.transcript(1).unwrap_err().is_not_found());

    let stats = book.dashboard(AverageGpaPolicy::Pooled);
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.average_gpa, 2.0);
}

#[test]
fn student_without_results_has_empty_transcript() {
    let mut book = seeded();
    book.add_student(student("2024003", "Carol Davis")).unwrap();

    let carol = book.transcript(3).unwrap();
    assert!(carol.lines.is_empty());
    assert_eq!(carol.summary.course_count, 0);
    assert_eq!(carol.summary.total_credits, 0);
    assert_eq!(carol.summary.cgpa, 0.0);

    // Carol has no credits, so she does not pull the per-student mean down.
    let per_student = book.dashboard(AverageGpaPolicy::PerStudent);
    let alice = book.transcript(1).unwrap().summary.cgpa;
    let bob = book.transcript(2).unwrap().summary.cgpa;
    assert!((per_student.average_gpa - (alice + bob) / 2.0).abs() < 1e-9);
}

#[test]
fn saved_report_loads_back() {
    let book = seeded();
    let transcript = book.transcript(1).unwrap();
    let report = TranscriptReport::new("Test University", transcript.clone());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("alice.json");
    report.save_json(&path).unwrap();

    let loaded = TranscriptReport::load_json(&path).unwrap();
    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.institution, "Test University");
    assert_eq!(loaded.transcript, transcript);
}
