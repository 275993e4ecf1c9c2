use anyhow::Result;
use clap::{Args, Subcommand};
use classroom_lib::classroom_api::COURSES_PATH;
use classroom_lib::items::map_course;
use classroom_lib::{validation, Client, CollectionFetcher, CourseQuery, Query};

use crate::output::{print_courses, print_json, OutputFormat};

use super::{fetch_failed, report_page};

#[derive(Args)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub action: CourseAction,
}

#[derive(Subcommand)]
pub enum CourseAction {
    /// List courses
    List(ListArgs),
    /// Approve a pending course
    Approve { id: i64 },
    /// Reject a pending course
    Reject {
        id: i64,
        /// Reason shown to the instructor
        #[arg(long)]
        reason: String,
    },
    /// Delete a course
    Delete { id: i64 },
    /// Freeze a course's price
    LockPrice { id: i64 },
    /// Unfreeze a course's price
    UnlockPrice { id: i64 },
}

#[derive(Args)]
pub struct ListArgs {
    /// Search by title or description
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status: draft, pending, published, rejected, archived
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &CoursesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.action {
        CourseAction::List(list) => list_courses(list, client, format).await,
        CourseAction::Approve { id } => {
            let resp = client.approve_course(validation::validate_id(*id)?).await?;
            print_json(&resp);
            Ok(())
        }
        CourseAction::Reject { id, reason } => {
            let id = validation::validate_id(*id)?;
            let reason = validation::validate_reason(reason)?;
            let resp = client.reject_course(id, &reason).await?;
            print_json(&resp);
            Ok(())
        }
        CourseAction::Delete { id } => {
            client.delete_course(validation::validate_id(*id)?).await?;
            eprintln!("Deleted course {}", id);
            Ok(())
        }
        CourseAction::LockPrice { id } => {
            let resp = client.lock_course_price(validation::validate_id(*id)?).await?;
            print_json(&resp);
            Ok(())
        }
        CourseAction::UnlockPrice { id } => {
            let resp = client
                .unlock_course_price(validation::validate_id(*id)?)
                .await?;
            print_json(&resp);
            Ok(())
        }
    }
}

async fn list_courses(args: &ListArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut query = CourseQuery::default().with_page(validation::validate_page(args.page)?);

    if let Some(ref search) = args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(ref status) = args.status {
        query = query.with_status(&validation::validate_course_status(status)?);
    }
    if let Some(ref category) = args.category {
        query = query.with_category(&validation::validate_search(category)?);
    }

    let fetcher = CollectionFetcher::new(client.clone(), COURSES_PATH, map_course);
    let outcome = fetcher.fetch_page_sized(&query, 0).await.map_err(fetch_failed)?;

    report_page(&outcome, "courses");
    print_courses(&outcome.view.items, format)
}
