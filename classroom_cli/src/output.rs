use anyhow::Result;
use classroom_lib::items::{Attempt, Course, Lecture, Quiz};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct CourseRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Instructor")]
    #[serde(rename = "Instructor")]
    instructor: String,
    #[tabled(rename = "Level")]
    #[serde(rename = "Level")]
    level: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Students")]
    #[serde(rename = "Students")]
    students: i64,
    #[tabled(rename = "Published")]
    #[serde(rename = "Published")]
    published: String,
}

#[derive(Tabled, Serialize)]
struct LectureRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Course")]
    #[serde(rename = "Course")]
    course: String,
    #[tabled(rename = "Lecture")]
    #[serde(rename = "Lecture")]
    label: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    lecture_type: String,
    #[tabled(rename = "Free")]
    #[serde(rename = "Free")]
    free: String,
    #[tabled(rename = "Duration")]
    #[serde(rename = "Duration")]
    duration: String,
}

#[derive(Tabled, Serialize)]
struct QuizRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Passing Grade")]
    #[serde(rename = "Passing Grade")]
    passing_grade: String,
    #[tabled(rename = "Attempts")]
    #[serde(rename = "Attempts")]
    max_attempts: i64,
    #[tabled(rename = "Time Limit")]
    #[serde(rename = "Time Limit")]
    time_limit: String,
}

#[derive(Tabled, Serialize)]
struct AttemptRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Student")]
    #[serde(rename = "Student")]
    student: String,
    #[tabled(rename = "Score")]
    #[serde(rename = "Score")]
    score: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Submitted")]
    #[serde(rename = "Submitted")]
    submitted: String,
}

// -- Row builders --

fn build_course_rows(courses: &[Course]) -> Vec<CourseRow> {
    courses
        .iter()
        .map(|c| CourseRow {
            id: c.id,
            title: c.title.clone(),
            instructor: c.instructor.clone(),
            level: c.grade_text.clone(),
            category: c.category_text.clone(),
            status: c.status.clone(),
            price: format_price(c.price, c.price_locked),
            students: c.students_count,
            published: c.date.clone(),
        })
        .collect()
}

fn build_lecture_rows(lectures: &[Lecture]) -> Vec<LectureRow> {
    lectures
        .iter()
        .map(|l| LectureRow {
            id: l.id,
            course: l.course_id.map(|id| id.to_string()).unwrap_or_default(),
            label: l.label.clone(),
            lecture_type: l.lecture_type.clone(),
            free: if l.is_free { "yes" } else { "no" }.to_string(),
            duration: format_minutes(l.duration_minutes),
        })
        .collect()
}

fn build_quiz_rows(quizzes: &[Quiz]) -> Vec<QuizRow> {
    quizzes
        .iter()
        .map(|q| QuizRow {
            id: q.id,
            title: q.title.clone(),
            status: q.status.clone(),
            passing_grade: format!("{:.0}%", q.passing_grade),
            max_attempts: q.max_attempts,
            time_limit: format_minutes(q.time_limit_minutes),
        })
        .collect()
}

fn build_attempt_rows(attempts: &[Attempt]) -> Vec<AttemptRow> {
    attempts
        .iter()
        .map(|a| AttemptRow {
            id: a.id,
            student: a.student_name.clone(),
            score: format!("{:.1}", a.score),
            status: a.status.clone(),
            submitted: a.submitted.clone(),
        })
        .collect()
}

// -- Dispatch --

pub fn print_courses(courses: &[Course], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&courses);
            Ok(())
        }
        _ => print_rows(build_course_rows(courses), format),
    }
}

pub fn print_lectures(lectures: &[Lecture], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&lectures);
            Ok(())
        }
        _ => print_rows(build_lecture_rows(lectures), format),
    }
}

pub fn print_quizzes(quizzes: &[Quiz], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&quizzes);
            Ok(())
        }
        _ => print_rows(build_quiz_rows(quizzes), format),
    }
}

pub fn print_attempts(attempts: &[Attempt], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&attempts);
            Ok(())
        }
        _ => print_rows(build_attempt_rows(attempts), format),
    }
}

fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => print_csv(&rows),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", Table::new(rows));
            Ok(())
        }
    }
}

// -- CSV output --

fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(price: f64, locked: bool) -> String {
    let text = if price == 0.0 {
        "Free".to_string()
    } else {
        format!("{:.2}", price)
    };
    if locked {
        format!("{} (locked)", text)
    } else {
        text
    }
}

fn format_minutes(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m >= 60 => format!("{}h {:02}m", m / 60, m % 60),
        Some(m) => format!("{}m", m),
        None => "-".to_string(),
    }
}
