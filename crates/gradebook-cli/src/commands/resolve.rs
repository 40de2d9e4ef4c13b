//! The `gradebook resolve` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use gradebook_core::grade::resolve_mark;
use gradebook_core::model::{LetterGrade, Mark};

#[derive(Serialize)]
struct ResolvedMark {
    marks: f64,
    grade: LetterGrade,
    grade_point: f64,
}

pub fn execute(marks: Vec<f64>, format: String) -> Result<()> {
    let resolved = marks
        .into_iter()
        .map(|value| -> Result<ResolvedMark> {
            let mark = Mark::new(value)?;
            let grade = resolve_mark(mark);
            Ok(ResolvedMark {
                marks: mark.value(),
                grade: grade.letter,
                grade_point: grade.grade_point,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        _ => {
            let mut table = Table::new();
            table.set_header(vec!["Marks", "Grade", "Grade Point"]);
            for r in &resolved {
                table.add_row(vec![
                    Cell::new(r.marks),
                    Cell::new(r.grade),
                    Cell::new(format!("{:.1}", r.grade_point)),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
