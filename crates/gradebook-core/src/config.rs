//! Gradebook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::statistics::AverageGpaPolicy;

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Records file read when no `--data` is given.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Directory transcript reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// How the dashboard averages GPA across students.
    #[serde(default)]
    pub average_gpa_policy: AverageGpaPolicy,
    /// Institution name printed on transcripts.
    #[serde(default = "default_institution")]
    pub institution: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/gradebook.toml")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./transcripts")
}
fn default_institution() -> String {
    "Student Result Management System".to_string()
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            output_dir: default_output_dir(),
            average_gpa_policy: AverageGpaPolicy::default(),
            institution: default_institution(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
        cursor = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// `GRADEBOOK_DATA` overrides the configured data file.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(data) = std::env::var("GRADEBOOK_DATA") {
        config.data_file = PathBuf::from(data);
    }

    Ok(config)
}

/// Parse a config document and expand `${VAR}` references in its values.
pub fn parse_config_str(content: &str) -> Result<GradebookConfig> {
    let mut config: GradebookConfig = toml::from_str(content)?;
    config.data_file = resolve_path(&config.data_file);
    config.output_dir = resolve_path(&config.output_dir);
    config.institution = resolve_env_vars(&config.institution);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
