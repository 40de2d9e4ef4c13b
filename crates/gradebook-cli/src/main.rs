//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Student result management: grades, transcripts and CGPA"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve marks to letter grades and grade-points
    Resolve {
        /// Marks between 0 and 100
        #[arg(required = true, allow_negative_numbers = true)]
        marks: Vec<f64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show or export a student's transcript
    Transcript {
        /// Student roll number or numeric id
        #[arg(long)]
        student: String,

        /// Gradebook data file (defaults to the configured data_file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the transcript to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show dashboard statistics across all students
    Dashboard {
        /// Gradebook data file (defaults to the configured data_file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Average GPA policy: pooled, per-student
        #[arg(long)]
        policy: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate gradebook TOML files
    Validate {
        /// Path to gradebook file or directory
        #[arg(long)]
        data: PathBuf,
    },

    /// Create starter config and example gradebook
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gradebook=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve { marks, format } => commands::resolve::execute(marks, format),
        Commands::Transcript {
            student,
            data,
            format,
            output,
            config,
        } => commands::transcript::execute(student, data, format, output, config),
        Commands::Dashboard {
            data,
            policy,
            format,
            config,
        } => commands::dashboard::execute(data, policy, format, config),
        Commands::Validate { data } => commands::validate::execute(data),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
