//! HTML transcript generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use gradebook_core::grade::GRADE_BANDS;
use gradebook_core::model::LetterGrade;
use gradebook_core::report::TranscriptReport;
use gradebook_core::transcript::TranscriptLine;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// CSS class for a letter grade badge.
fn badge_class(grade: LetterGrade) -> String {
    format!("grade-{}", grade.family().to_ascii_lowercase())
}

/// Generate an HTML transcript from a transcript report.
pub fn generate_html(report: &TranscriptReport) -> String {
    let student = &report.transcript.student;
    let summary = &report.transcript.summary;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Transcript — {} ({})</title>\n",
        html_escape(&student.name),
        html_escape(&student.roll_no)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.institution)));
    html.push_str("<p class=\"subtitle\">Official Academic Transcript</p>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Issued {} | Report {}</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id
    ));
    html.push_str("<button class=\"no-print\" onclick=\"window.print()\">Print</button>\n");
    html.push_str("</header>\n");

    // Student details
    html.push_str("<section class=\"student\">\n");
    html.push_str("<h2>Student</h2>\n");
    html.push_str("<dl>\n");
    html.push_str(&format!(
        "<dt>Name</dt><dd>{}</dd>\n",
        html_escape(&student.name)
    ));
    html.push_str(&format!(
        "<dt>Roll No</dt><dd>{}</dd>\n",
        html_escape(&student.roll_no)
    ));
    html.push_str(&format!(
        "<dt>Email</dt><dd>{}</dd>\n",
        html_escape(&student.email)
    ));
    if !student.phone.is_empty() {
        html.push_str(&format!(
            "<dt>Phone</dt><dd>{}</dd>\n",
            html_escape(&student.phone)
        ));
    }
    html.push_str("</dl>\n");
    html.push_str("</section>\n");

    // Course results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Course Results</h2>\n");
    if report.transcript.lines.is_empty() {
        html.push_str("<p class=\"empty\">No results recorded.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\" id=\"results\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Code</th><th onclick=\"sortTable(1)\">Course</th><th class=\"center\">Credits</th><th class=\"center\">Marks</th><th class=\"center\">Grade</th><th class=\"center\">Grade Point</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for line in &report.transcript.lines {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"center\">{}</td><td class=\"center\">{}</td><td class=\"center\"><span class=\"badge {}\">{}</span></td><td class=\"center\">{:.1}</td></tr>\n",
                html_escape(&line.course_code),
                html_escape(&line.course_name),
                line.credits.map_or_else(|| "-".to_string(), |c| c.to_string()),
                line.marks,
                badge_class(line.grade),
                line.grade,
                line.grade_point,
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_bar_chart(&report.transcript.lines));
    }
    html.push_str("</section>\n");

    // Summary
    html.push_str("<section class=\"summary\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<div class=\"cards\">\n");
    html.push_str(&format!(
        "<div class=\"card\"><label>Courses</label><value>{}</value></div>\n",
        summary.course_count
    ));
    html.push_str(&format!(
        "<div class=\"card\"><label>Total Credits</label><value>{}</value></div>\n",
        summary.total_credits
    ));
    html.push_str(&format!(
        "<div class=\"card\"><label>CGPA</label><value>{:.2}</value></div>\n",
        summary.display_cgpa()
    ));
    html.push_str("</div>\n");
    html.push_str("</section>\n");

    // Grading scale
    html.push_str("<section class=\"scale\">\n");
    html.push_str("<h2>Grading Scale</h2>\n");
    html.push_str("<table class=\"scale-table\">\n");
    html.push_str("<thead><tr><th>Marks</th><th>Grade</th><th>Grade Point</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    let mut upper: Option<f64> = None;
    for band in &GRADE_BANDS {
        let range = match upper {
            None => format!("{}–100", band.min_mark),
            Some(next) => format!("{}–&lt;{}", band.min_mark, next),
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td><span class=\"badge {}\">{}</span></td><td>{:.1}</td></tr>\n",
            range,
            badge_class(band.letter),
            band.letter,
            band.grade_point
        ));
        upper = Some(band.min_mark);
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data no-print\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML transcript to a file.
pub fn write_html_report(report: &TranscriptReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal bars of grade-point per course, on the 0–4 scale.
fn generate_bar_chart(lines: &[TranscriptLine]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 120;
    let max_point = GRADE_BANDS[0].grade_point;

    let total_height = lines.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg class=\"no-print\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, line) in lines.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (line.grade_point / max_point * max_width as f64) as usize;

        let color = match line.grade.family() {
            'A' => "#22c55e",
            'B' => "#3b82f6",
            'C' => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&line.course_code)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            line.grade_point
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --muted: #6b7280; --border: #e5e7eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; padding: 2rem; max-width: 960px; background: var(--bg); color: var(--fg); }
header { text-align: center; border-bottom: 3px solid #9333ea; padding-bottom: 1rem; }
h1, h2 { margin-top: 2rem; }
.subtitle { font-size: 1.2rem; font-weight: 600; }
.meta, .empty { color: var(--muted); }
dl { display: grid; grid-template-columns: max-content auto; gap: 0.25rem 1rem; }
dt { font-weight: 600; }
dd { margin: 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.center { text-align: center; }
.badge { display: inline-block; padding: 0.15rem 0.6rem; border-radius: 999px; font-weight: 700; }
.grade-a { background: #d1fae5; color: #065f46; }
.grade-b { background: #dbeafe; color: #1e40af; }
.grade-c { background: #fef3c7; color: #92400e; }
.grade-f { background: #fee2e2; color: #991b1b; }
.cards { display: flex; gap: 1rem; }
.card { flex: 1; border: 1px solid var(--border); border-radius: 8px; padding: 1rem; text-align: center; }
.card label { display: block; color: var(--muted); font-size: 0.85rem; text-transform: uppercase; }
.card value { display: block; font-size: 2rem; font-weight: 700; color: #9333ea; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
@media print {
  .no-print { display: none; }
  body { padding: 0; }
}
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
