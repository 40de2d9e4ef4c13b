//! The `gradebook transcript` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::config::load_config_from;
use gradebook_core::report::TranscriptReport;
use gradebook_report::html::write_html_report;

use super::{ensure_parent, find_student, load_records};

pub fn execute(
    student_key: String,
    data: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let book = load_records(data, &config)?;

    let student = find_student(&book, &student_key)?;
    let transcript = book.transcript(student.id)?;
    let report = TranscriptReport::new(config.institution.clone(), transcript);

    match format.as_str() {
        "json" => match &output {
            Some(path) => {
                report.save_json(path)?;
                eprintln!("Transcript saved to: {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&report)?),
        },
        "markdown" | "md" => {
            let md = report.to_markdown();
            match &output {
                Some(path) => {
                    ensure_parent(path)?;
                    std::fs::write(path, md)?;
                    eprintln!("Transcript saved to: {}", path.display());
                }
                None => println!("{md}"),
            }
        }
        "html" => {
            let path = output.unwrap_or_else(|| {
                let timestamp = report.generated_at.format("%Y-%m-%dT%H%M%S");
                config.output_dir.join(format!(
                    "transcript-{}-{timestamp}.html",
                    report.transcript.student.roll_no
                ))
            });
            write_html_report(&report, &path)?;
            eprintln!("HTML transcript: {}", path.display());
        }
        _ => print_transcript(&report),
    }

    Ok(())
}

fn print_transcript(report: &TranscriptReport) {
    let student = &report.transcript.student;
    let summary = &report.transcript.summary;

    println!("{} ({})", student.name, student.roll_no);
    println!("{}", student.email);
    println!();

    if report.transcript.lines.is_empty() {
        println!("No results recorded.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            "Code",
            "Course",
            "Credits",
            "Marks",
            "Grade",
            "Grade Point",
        ]);
        for line in &report.transcript.lines {
            table.add_row(vec![
                Cell::new(&line.course_code),
                Cell::new(&line.course_name),
                Cell::new(line.credits.map_or_else(|| "-".to_string(), |c| c.to_string())),
                Cell::new(line.marks),
                Cell::new(line.grade),
                Cell::new(format!("{:.1}", line.grade_point)),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!(
        "Courses: {}  Total Credits: {}  CGPA: {:.2}",
        summary.course_count,
        summary.total_credits,
        summary.display_cgpa()
    );
}
