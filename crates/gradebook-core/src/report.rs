//! Transcript reports with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grade::GRADE_BANDS;
use crate::transcript::Transcript;

/// A generated transcript, stamped for issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Issuing institution.
    pub institution: String,
    pub transcript: Transcript,
}

impl TranscriptReport {
    pub fn new(institution: impl Into<String>, transcript: Transcript) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            institution: institution.into(),
            transcript,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: TranscriptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the transcript as markdown.
    pub fn to_markdown(&self) -> String {
        let student = &self.transcript.student;
        let summary = &self.transcript.summary;
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", self.institution));
        md.push_str("## Academic Transcript\n\n");
        md.push_str(&format!(
            "**Student:** {} ({})  \n**Email:** {}  \n**Issued:** {}\n\n",
            student.name,
            student.roll_no,
            student.email,
            self.generated_at.format("%Y-%m-%d")
        ));

        if self.transcript.lines.is_empty() {
            md.push_str("_No results recorded._\n\n");
        } else {
            md.push_str("| Code | Course | Credits | Marks | Grade | Grade Point |\n");
            md.push_str("|------|--------|---------|-------|-------|-------------|\n");
            for line in &self.transcript.lines {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {:.1} |\n",
                    line.course_code,
                    line.course_name,
                    line.credits.map_or_else(|| "-".to_string(), |c| c.to_string()),
                    line.marks,
                    line.grade,
                    line.grade_point
                ));
            }
            md.push('\n');
        }

        md.push_str(&format!(
            "**Courses:** {} | **Total Credits:** {} | **CGPA:** {:.2}\n\n",
            summary.course_count,
            summary.total_credits,
            summary.display_cgpa()
        ));

        md.push_str("### Grading Scale\n\n");
        md.push_str("| Marks | Grade | Grade Point |\n");
        md.push_str("|-------|-------|-------------|\n");
        for band in &GRADE_BANDS {
            md.push_str(&format!(
                "| {}+ | {} | {:.1} |\n",
                band.min_mark, band.letter, band.grade_point
            ));
        }

        md
    }
}
