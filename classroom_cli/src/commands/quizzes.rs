use anyhow::Result;
use clap::{Args, Subcommand};
use classroom_lib::classroom_api::QUIZZES_PATH;
use classroom_lib::items::map_quiz;
use classroom_lib::{validation, Client, CollectionFetcher, Query, QuizQuery};

use crate::output::{print_json, print_quizzes, OutputFormat};

use super::{fetch_failed, report_page};

#[derive(Args)]
pub struct QuizzesArgs {
    #[command(subcommand)]
    pub action: QuizAction,
}

#[derive(Subcommand)]
pub enum QuizAction {
    /// List quizzes
    List {
        /// Only quizzes of this course
        #[arg(long)]
        course: Option<i64>,

        /// Filter by status: draft or published
        #[arg(long)]
        status: Option<String>,

        /// Page number
        #[arg(long, default_value = "1")]
        page: i64,
    },
    /// Make a quiz visible to students
    Publish { id: i64 },
    /// Hide a quiz from students
    Unpublish { id: i64 },
    /// Delete a quiz
    Delete { id: i64 },
}

pub async fn run(args: &QuizzesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.action {
        QuizAction::List {
            course,
            status,
            page,
        } => {
            let mut query = QuizQuery::default().with_page(validation::validate_page(*page)?);
            if let Some(course) = course {
                query = query.with_course(validation::validate_id(*course)?);
            }
            if let Some(status) = status {
                query = query.with_status(&validation::validate_quiz_status(status)?);
            }

            let fetcher = CollectionFetcher::new(client.clone(), QUIZZES_PATH, map_quiz);
            let outcome = fetcher.fetch_page_sized(&query, 0).await.map_err(fetch_failed)?;

            report_page(&outcome, "quizzes");
            print_quizzes(&outcome.view.items, format)
        }
        QuizAction::Publish { id } => {
            print_json(&client.publish_quiz(validation::validate_id(*id)?).await?);
            Ok(())
        }
        QuizAction::Unpublish { id } => {
            print_json(&client.unpublish_quiz(validation::validate_id(*id)?).await?);
            Ok(())
        }
        QuizAction::Delete { id } => {
            client.delete_quiz(validation::validate_id(*id)?).await?;
            eprintln!("Deleted quiz {}", id);
            Ok(())
        }
    }
}
