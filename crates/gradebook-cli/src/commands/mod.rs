pub mod dashboard;
pub mod init;
pub mod resolve;
pub mod transcript;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradebook_core::config::GradebookConfig;
use gradebook_core::model::Student;
use gradebook_core::parser::parse_gradebook;
use gradebook_core::Gradebook;

/// Load the gradebook named by `--data`, falling back to the configured file.
pub fn load_records(data: Option<PathBuf>, config: &GradebookConfig) -> Result<Gradebook> {
    let path = data.unwrap_or_else(|| config.data_file.clone());
    tracing::debug!("reading records from {}", path.display());
    parse_gradebook(&path)
}

/// Find a student by roll number, then by numeric id.
pub fn find_student<'a>(book: &'a Gradebook, key: &str) -> Result<&'a Student> {
    if let Some(student) = book.student_by_roll_no(key) {
        return Ok(student);
    }
    let by_id = key.parse::<u32>().ok().and_then(|id| book.student(id));
    by_id.with_context(|| format!("no student with roll number or id '{key}'"))
}

/// Create the parent directory of an output file if needed.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
