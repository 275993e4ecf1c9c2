use anyhow::Result;
use clap::Args;
use classroom_lib::classroom_api::LECTURES_PATH;
use classroom_lib::filter::{LectureFilter, LocalFilter};
use classroom_lib::items::map_lecture;
use classroom_lib::{validation, Client, CollectionFetcher, PageQuery, Query};

use crate::output::{print_lectures, OutputFormat};

use super::{fetch_failed, report_page};

#[derive(Args)]
pub struct LecturesArgs {
    /// Only show lectures of this course (applied to the fetched page)
    #[arg(long)]
    pub course: Option<i64>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &LecturesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = PageQuery::default().with_page(validation::validate_page(args.page)?);
    let filter = LectureFilter {
        course_id: args.course.map(validation::validate_id).transpose()?,
    };

    let fetcher = CollectionFetcher::new(client.clone(), LECTURES_PATH, map_lecture);
    let outcome = fetcher.fetch_page_sized(&query, 0).await.map_err(fetch_failed)?;

    report_page(&outcome, "lectures");
    print_lectures(&filter.apply(&outcome.view.items), format)
}
