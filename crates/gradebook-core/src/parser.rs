//! TOML gradebook parser.
//!
//! Loads records from TOML data files and directories, and checks them for
//! issues that are worth reporting but do not prevent grading.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::{Gradebook, NewCourse, NewResult, NewStudent};

/// Intermediate TOML structure for parsing gradebook files.
#[derive(Debug, Deserialize)]
struct TomlGradebookFile {
    #[serde(default)]
    students: Vec<NewStudent>,
    #[serde(default)]
    courses: Vec<NewCourse>,
    #[serde(default)]
    results: Vec<NewResult>,
}

/// Parse a single TOML file into a `Gradebook`.
pub fn parse_gradebook(path: &Path) -> Result<Gradebook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read gradebook file: {}", path.display()))?;

    parse_gradebook_str(&content, path)
}

/// Parse a TOML string into a `Gradebook` (useful for testing).
///
/// Records go through the store's integrity checks in file order: students,
/// then courses, then results.
pub fn parse_gradebook_str(content: &str, source_path: &Path) -> Result<Gradebook> {
    let parsed: TomlGradebookFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut book = Gradebook::new();

    for student in parsed.students {
        let roll_no = student.roll_no.clone();
        book.add_student(student)
            .with_context(|| format!("invalid student {roll_no}"))?;
    }

    for course in parsed.courses {
        let code = course.code.clone();
        book.add_course(course)
            .with_context(|| format!("invalid course {code}"))?;
    }

    for result in parsed.results {
        let (student_id, course_id) = (result.student_id, result.course_id);
        book.insert_result(result).with_context(|| {
            format!("invalid result for student {student_id} in course {course_id}")
        })?;
    }

    tracing::debug!(
        "loaded {} students, {} courses, {} results from {}",
        book.students().len(),
        book.courses().len(),
        book.results().len(),
        source_path.display()
    );

    Ok(book)
}

/// Recursively load all `.toml` gradebook files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_gradebook_directory(dir: &Path) -> Result<Vec<(String, Gradebook)>> {
    let mut books = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            books.extend(load_gradebook_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_gradebook(&path) {
                Ok(book) => books.push((path.display().to_string(), book)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(books)
}

/// A warning from gradebook validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The record the warning is about, e.g. "student 2024001".
    pub record: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a gradebook for issues the store accepts but staff should see.
pub fn validate_gradebook(book: &Gradebook) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Courses without credits drop out of CGPA
    for course in book.courses() {
        if course.credits.is_none() {
            warnings.push(ValidationWarning {
                record: Some(format!("course {}", course.code)),
                message: "no credit value; results will count zero credits".into(),
            });
        }
    }

    let graded_students: HashSet<u32> = book.results().iter().map(|r| r.student_id()).collect();
    let graded_courses: HashSet<u32> = book.results().iter().map(|r| r.course_id()).collect();

    for student in book.students() {
        if !graded_students.contains(&student.id) {
            warnings.push(ValidationWarning {
                record: Some(format!("student {}", student.roll_no)),
                message: "no results recorded".into(),
            });
        }
        if !looks_like_email(&student.email) {
            warnings.push(ValidationWarning {
                record: Some(format!("student {}", student.roll_no)),
                message: format!("malformed email: {}", student.email),
            });
        }
    }

    for course in book.courses() {
        if !graded_courses.contains(&course.id) {
            warnings.push(ValidationWarning {
                record: Some(format!("course {}", course.code)),
                message: "no results recorded".into(),
            });
        }
    }

    warnings
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    }
}
