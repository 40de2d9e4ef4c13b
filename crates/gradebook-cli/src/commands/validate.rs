//! The `gradebook validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::parser::{load_gradebook_directory, parse_gradebook, validate_gradebook};

pub fn execute(data_path: PathBuf) -> Result<()> {
    let books = if data_path.is_dir() {
        load_gradebook_directory(&data_path)?
    } else {
        vec![(
            data_path.display().to_string(),
            parse_gradebook(&data_path)?,
        )]
    };

    let mut total_warnings = 0;

    for (source, book) in &books {
        println!(
            "Gradebook: {} ({} students, {} courses, {} results)",
            source,
            book.students().len(),
            book.courses().len(),
            book.results().len()
        );

        let warnings = validate_gradebook(book);
        for w in &warnings {
            let prefix = w
                .record
                .as_ref()
                .map(|record| format!("  [{record}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if books.is_empty() {
        println!("No gradebooks found.");
    } else if total_warnings == 0 {
        println!("All gradebooks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
