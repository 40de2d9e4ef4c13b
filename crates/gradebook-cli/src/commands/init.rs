//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gradebook.toml
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    // Create example records
    std::fs::create_dir_all("data")?;
    let example_path = std::path::Path::new("data/gradebook.toml");
    if example_path.exists() {
        println!("data/gradebook.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_GRADEBOOK)?;
        println!("Created data/gradebook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradebook.toml with your institution name");
    println!("  2. Run: gradebook validate --data data/gradebook.toml");
    println!("  3. Run: gradebook transcript --student 2024001");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

data_file = "data/gradebook.toml"
output_dir = "./transcripts"
institution = "Student Result Management System"

# How the dashboard averages GPA across students:
#   per-student  mean of each student's credit-weighted CGPA
#   pooled       plain mean of every result's grade-point
average_gpa_policy = "per-student"
"#;

const EXAMPLE_GRADEBOOK: &str = r#"# Students, courses and marks.
# Grades are derived from marks; they are never entered by hand.

[[students]]
id = 1
roll_no = "2024001"
name = "Alice Johnson"
email = "alice@university.edu"
phone = "+1-555-0101"

[[students]]
id = 2
roll_no = "2024002"
name = "Bob Smith"
email = "bob@university.edu"
phone = "+1-555-0102"

[[students]]
id = 3
roll_no = "2024003"
name = "Carol Davis"
email = "carol@university.edu"

[[courses]]
id = 1
code = "CS101"
name = "Programming Fundamentals"
credits = 4

[[courses]]
id = 2
code = "CS102"
name = "Data Structures"
credits = 4

[[courses]]
id = 3
code = "MATH101"
name = "Calculus I"
credits = 3

[[results]]
student_id = 1
course_id = 1
marks = 85

[[results]]
student_id = 1
course_id = 2
marks = 78

[[results]]
student_id = 1
course_id = 3
marks = 66

[[results]]
student_id = 2
course_id = 1
marks = 92

[[results]]
student_id = 2
course_id = 3
marks = 48

[[results]]
student_id = 3
course_id = 2
marks = 71
"#;
