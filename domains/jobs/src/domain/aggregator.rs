//! Paginated job aggregation
//!
//! Walks the `jobs` connection page by page until `hasNextPage` is false.
//! Pages are strictly sequential: each cursor comes from the previous page.

use jobsheet_jobber::{JobRecord, JobsApi, JobsQuery};

use super::error::JobsError;

/// Fetch every job in the query window.
///
/// All-or-nothing: any failing page discards what was collected so far.
/// Stops with `PaginationLimitExceeded` instead of requesting more than
/// `max_pages` pages.
pub async fn fetch_all_jobs(
    api: &dyn JobsApi,
    access_token: &str,
    query: &JobsQuery,
    max_pages: u32,
) -> Result<Vec<JobRecord>, JobsError> {
    let mut jobs = Vec::new();
    let mut after: Option<String> = None;
    let mut pages: u32 = 0;

    loop {
        if pages >= max_pages {
            tracing::warn!(max_pages, collected = jobs.len(), "Jobs pagination limit reached");
            return Err(JobsError::PaginationLimitExceeded { max_pages });
        }

        let page = api
            .fetch_jobs_page(access_token, query, after.as_deref())
            .await?;
        pages += 1;
        jobs.extend(page.nodes);

        if !page.has_next_page {
            break;
        }

        // A next page without a cursor would re-request the first page forever.
        match page.end_cursor.filter(|c| !c.is_empty()) {
            Some(cursor) => after = Some(cursor),
            None => {
                return Err(JobsError::UpstreamProtocol(
                    "hasNextPage is true but endCursor is missing".to_string(),
                ))
            }
        }
    }

    tracing::info!(pages, jobs = jobs.len(), "Jobs aggregated");
    Ok(jobs)
}
