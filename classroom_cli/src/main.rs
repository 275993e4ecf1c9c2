mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use classroom_lib::ClientConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "classroom")]
#[command(about = "Manage courses, lectures and quizzes on the classroom platform")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or moderate courses
    Courses(commands::courses::CoursesArgs),
    /// List lectures
    Lectures(commands::lectures::LecturesArgs),
    /// List or publish quizzes
    Quizzes(commands::quizzes::QuizzesArgs),
    /// List attempts made on a quiz
    Attempts(commands::attempts::AttemptsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("classroom=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = ClientConfig::from_env();
    let session = config.session();
    let client = config.build_client(session)?;

    match &cli.command {
        Commands::Courses(args) => commands::courses::run(args, &client, &format).await?,
        Commands::Lectures(args) => commands::lectures::run(args, &client, &format).await?,
        Commands::Quizzes(args) => commands::quizzes::run(args, &client, &format).await?,
        Commands::Attempts(args) => commands::attempts::run(args, &client, &format).await?,
    }

    Ok(())
}
