use anyhow::Result;
use clap::Args;
use classroom_lib::filter::{AttemptFilter, LocalFilter};
use classroom_lib::items::map_attempt;
use classroom_lib::{validation, Client, CollectionFetcher, PageQuery, Query};

use crate::output::{print_attempts, OutputFormat};

use super::{fetch_failed, report_page};

#[derive(Args)]
pub struct AttemptsArgs {
    /// Quiz whose attempts to list
    pub quiz_id: i64,

    /// Only attempts by students whose name contains this text
    #[arg(long)]
    pub student: Option<String>,

    /// Only attempts with this status (e.g. submitted, graded)
    #[arg(long)]
    pub status: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &AttemptsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let quiz_id = validation::validate_id(args.quiz_id)?;
    let query = PageQuery::default().with_page(validation::validate_page(args.page)?);
    let filter = AttemptFilter {
        student_name: args
            .student
            .as_deref()
            .map(validation::validate_search)
            .transpose()?,
        status: args.status.as_ref().map(|s| s.trim().to_lowercase()),
    };

    let fetcher =
        CollectionFetcher::new(client.clone(), Client::quiz_attempts_path(quiz_id), map_attempt);
    let outcome = fetcher.fetch_page_sized(&query, 0).await.map_err(fetch_failed)?;

    report_page(&outcome, "attempts");
    print_attempts(&filter.apply(&outcome.view.items), format)
}
