//! Flat table rows built from nested job records

use chrono::{DateTime, FixedOffset};
use jobsheet_jobber::JobRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerType {
    Commercial,
    Residential,
}

impl CustomerType {
    /// Only an explicit `true` is commercial; `false` and absent are residential.
    pub fn from_flag(is_company: Option<bool>) -> Self {
        if is_company == Some(true) {
            CustomerType::Commercial
        } else {
            CustomerType::Residential
        }
    }
}

/// One table row per job, keyed by the table's column fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatJobRow {
    pub id: String,
    pub job_number: Option<i64>,
    pub title: Option<String>,
    pub job_status: Option<String>,
    pub job_type: Option<String>,
    /// `M/D/YYYY`, or empty when the job is not completed
    pub completed_at: String,
    pub total: Option<f64>,
    pub invoiced_total: Option<f64>,
    pub uninvoiced_total: Option<f64>,
    pub location_street: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_zip: Option<String>,
    pub location_country: Option<String>,
    pub customer_id: String,
    pub name: Option<String>,
    pub customer_type: CustomerType,
    pub customer_street: String,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zip: Option<String>,
}

/// Date-only `M/D/YYYY` in the timestamp's own offset.
pub fn format_completion_date(completed_at: Option<&DateTime<FixedOffset>>) -> String {
    completed_at
        .map(|at| at.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

impl From<JobRecord> for FlatJobRow {
    fn from(job: JobRecord) -> Self {
        let location = job.property.address;
        let client = job.client;
        let billing = client.billing_address;

        Self {
            completed_at: format_completion_date(job.completed_at.as_ref()),
            id: job.id,
            job_number: job.job_number,
            title: job.title,
            job_status: job.job_status,
            job_type: job.job_type,
            total: job.total,
            invoiced_total: job.invoiced_total,
            uninvoiced_total: job.uninvoiced_total,
            location_street: location.street_line(),
            location_city: location.city,
            location_state: location.province,
            location_zip: location.postal_code,
            location_country: location.country,
            customer_type: CustomerType::from_flag(client.is_company),
            customer_id: client.id,
            name: client.name,
            customer_street: billing.street_line(),
            customer_city: billing.city,
            customer_state: billing.province,
            customer_zip: billing.postal_code,
        }
    }
}

pub fn flatten_jobs(jobs: Vec<JobRecord>) -> Vec<FlatJobRow> {
    jobs.into_iter().map(FlatJobRow::from).collect()
}
