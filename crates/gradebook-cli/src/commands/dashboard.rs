//! The `gradebook dashboard` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradebook_core::config::load_config_from;
use gradebook_core::statistics::AverageGpaPolicy;

use super::load_records;

pub fn execute(
    data: Option<PathBuf>,
    policy: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let policy = match policy {
        Some(p) => p
            .parse::<AverageGpaPolicy>()
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        None => config.average_gpa_policy,
    };

    let book = load_records(data, &config)?;
    let stats = book.dashboard(policy);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        _ => {
            println!("Students:    {}", stats.total_students);
            println!("Courses:     {}", stats.total_courses);
            println!("Results:     {}", stats.total_results);
            println!(
                "Average GPA: {:.2} ({})",
                stats.average_gpa_display, stats.policy
            );

            let mut table = Table::new();
            table.set_header(vec!["Grade", "Results"]);
            for entry in stats.grade_distribution.iter().filter(|g| g.count > 0) {
                table.add_row(vec![Cell::new(entry.grade), Cell::new(entry.count)]);
            }
            if stats.total_results > 0 {
                println!("\n{table}");
            }
        }
    }

    Ok(())
}
