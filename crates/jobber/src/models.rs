//! Job records as returned by the Jobber GraphQL API

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Postal address on a property or a client's billing details.
///
/// `street1` is required; a record without it fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street1: String,
    #[serde(default)]
    pub street2: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Address {
    /// `street1`, followed by `", " + street2` when the second line is
    /// non-blank after trimming. The trimmed second line is appended.
    pub fn street_line(&self) -> String {
        match self.street2.as_deref().map(str::trim) {
            Some(second) if !second.is_empty() => format!("{}, {}", self.street1, second),
            _ => self.street1.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Only an explicit `true` marks a commercial client. Non-boolean
    /// values decode as `None` instead of failing the page.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_company: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub billing_address: Address,
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Bool(flag)) => Some(flag),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub address: Address,
}

/// One job node from the `jobs` connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    #[serde(default)]
    pub job_number: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub job_status: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub invoiced_total: Option<f64>,
    #[serde(default)]
    pub uninvoiced_total: Option<f64>,
    #[serde(default)]
    pub completed_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub start_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub client: Client,
    pub property: Property,
}
