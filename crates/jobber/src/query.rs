//! Jobs GraphQL query and response envelope

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::JobRecord;
use crate::JobberError;

/// Nodes requested per page
pub const JOBS_PAGE_SIZE: u32 = 20;

/// Inclusive `completedAt` window for the jobs query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobsQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl JobsQuery {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// RFC 3339 UTC with millisecond precision, e.g. `2024-03-01T00:00:00.000Z`
    pub fn start_param(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn end_param(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// GraphQL document for one page. The date bounds are inlined; the
    /// cursor is the only variable.
    pub fn document(&self) -> String {
        format!(
            r#"query Jobs($after: String) {{
  jobs(
    filter: {{ completedAt: {{ after: "{start}", before: "{end}" }} }},
    first: {page_size},
    after: $after
  ) {{
    totalCount
    pageInfo {{ hasNextPage endCursor }}
    nodes {{
      id jobNumber title jobStatus jobType
      total invoicedTotal uninvoicedTotal
      completedAt createdAt startAt endAt updatedAt
      client {{
        id name firstName lastName companyName title isCompany updatedAt
        billingAddress {{ street1 street2 street city province postalCode country name }}
      }}
      property {{
        address {{ street1 street2 street city province postalCode country }}
      }}
    }}
  }}
}}"#,
            start = self.start_param(),
            end = self.end_param(),
            page_size = JOBS_PAGE_SIZE,
        )
    }
}

/// POST body sent to the GraphQL endpoint
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: String,
    pub variables: PageVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct PageVariables<'a> {
    pub after: Option<&'a str>,
}

impl<'a> GraphqlRequest<'a> {
    pub fn jobs_page(query: &JobsQuery, after: Option<&'a str>) -> Self {
        Self {
            query: query.document(),
            variables: PageVariables { after },
        }
    }
}

/// One decoded page of the `jobs` connection
#[derive(Debug, Clone, PartialEq)]
pub struct JobsPage {
    pub nodes: Vec<JobRecord>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
    pub total_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobsConnection {
    #[serde(default)]
    total_count: Option<i64>,
    page_info: PageInfo,
    nodes: Vec<JobRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

fn mentions_unauthorized(message: &str) -> bool {
    message.to_ascii_lowercase().contains("unauthorized")
}

/// Classify a GraphQL HTTP response.
///
/// Unauthorized wins over every other failure: a 401 status or any error
/// message mentioning "unauthorized". Then non-2xx, an undecodable body, a
/// non-empty error list or a missing `data.jobs` are protocol errors.
pub fn interpret_response(status: u16, body: &str) -> Result<JobsPage, JobberError> {
    if status == 401 {
        return Err(JobberError::Unauthorized);
    }

    let envelope: Option<Envelope> = serde_json::from_str(body).ok();
    let errors = envelope
        .as_ref()
        .and_then(|e| e.errors.as_deref())
        .unwrap_or_default();

    if errors.iter().any(|e| mentions_unauthorized(&e.message)) {
        return Err(JobberError::Unauthorized);
    }

    if !(200..300).contains(&status) {
        let detail = errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| format!("GraphQL endpoint returned status {}", status));
        return Err(JobberError::UpstreamProtocol(detail));
    }

    if let Some(first) = errors.first() {
        let message = if first.message.is_empty() {
            "GraphQL error".to_string()
        } else {
            first.message.clone()
        };
        return Err(JobberError::UpstreamProtocol(message));
    }

    let envelope = envelope.ok_or_else(|| {
        JobberError::UpstreamProtocol("GraphQL response body is not valid JSON".to_string())
    })?;

    let jobs = envelope
        .data
        .and_then(|mut data| data.get_mut("jobs").map(serde_json::Value::take))
        .filter(|jobs| !jobs.is_null())
        .ok_or_else(|| {
            JobberError::UpstreamProtocol("Malformed GraphQL response: missing data.jobs".to_string())
        })?;

    let connection: JobsConnection = serde_json::from_value(jobs).map_err(|e| {
        JobberError::UpstreamProtocol(format!("Failed to decode jobs page: {}", e))
    })?;

    Ok(JobsPage {
        nodes: connection.nodes,
        has_next_page: connection.page_info.has_next_page,
        end_cursor: connection.page_info.end_cursor,
        total_count: connection.total_count,
    })
}
