//! Request date parsing for the jobs window

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use jobsheet_common::Error;
use jobsheet_jobber::JobsQuery;

/// Parse the `[start, end]` window from request strings.
///
/// Accepts RFC 3339 timestamps (any offset, converted to UTC) or plain
/// `YYYY-MM-DD` dates. A plain start date means the start of that day in UTC;
/// a plain end date means the last millisecond of that day, so the end date
/// itself is included.
pub fn parse_date_range(start: &str, end: &str) -> Result<JobsQuery, Error> {
    let start_at = parse_bound(start, NaiveTime::MIN)
        .ok_or_else(|| Error::Validation(format!("Invalid startDate: {:?}", start)))?;
    let end_at = parse_bound(end, end_of_day())
        .ok_or_else(|| Error::Validation(format!("Invalid endDate: {:?}", end)))?;

    if start_at > end_at {
        return Err(Error::Validation(
            "startDate must not be after endDate".to_string(),
        ));
    }

    Ok(JobsQuery::new(start_at, end_at))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

fn parse_bound(raw: &str, time_of_day: NaiveTime) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(time_of_day).and_utc())
}
