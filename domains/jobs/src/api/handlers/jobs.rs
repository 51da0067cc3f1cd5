//! Jobs API handler

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jobsheet_auth::Session;
use jobsheet_common::ValidatedJson;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::JobsState;
use crate::domain::aggregator::fetch_all_jobs;
use crate::domain::dates::parse_date_range;
use crate::domain::error::JobsError;
use crate::domain::flatten::{flatten_jobs, FlatJobRow};

/// Request body for `POST /jobs`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobsRequest {
    #[validate(required, length(min = 1))]
    pub start_date: Option<String>,
    #[validate(required, length(min = 1))]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub data: Vec<FlatJobRow>,
}

/// Fetch and flatten every job completed within the requested window.
///
/// The refresh guard runs before the first GraphQL call. A refreshed token
/// pair is written back to the cookies even when the fetch fails.
pub async fn fetch_jobs(
    State(state): State<JobsState>,
    Session(credentials): Session,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<JobsRequest>,
) -> Result<Response, JobsError> {
    let query = parse_date_range(
        request.start_date.as_deref().unwrap_or_default(),
        request.end_date.as_deref().unwrap_or_default(),
    )?;

    let outcome = state.tokens.ensure_fresh(credentials).await?;
    let jar = state.store.apply(jar, &outcome, Utc::now());

    let records =
        match fetch_all_jobs(state.jobs.as_ref(), outcome.access_token(), &query, state.max_pages)
            .await
        {
            Ok(records) => records,
            Err(e) => return Ok((jar, e).into_response()),
        };

    let data = flatten_jobs(records);
    tracing::info!(
        rows = data.len(),
        refreshed = outcome.was_refreshed(),
        start = %query.start_param(),
        end = %query.end_param(),
        "Jobs fetched"
    );

    Ok((jar, Json(JobsResponse { data })).into_response())
}
