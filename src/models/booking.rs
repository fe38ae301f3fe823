use crate::DbPool;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::facility::FacilityId;

// Offsets without a colon (`+0530`), which RFC 3339 parsing rejects.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub court_id: i64,
    pub user_id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// Parses a stored booking timestamp into its wall-clock value.
///
/// Offsets are accepted but not applied: `2024-03-01T23:30:00-05:00` yields
/// 23:30 on March 1st, not the equivalent UTC instant. A bare date is taken
/// as midnight.
pub fn parse_timestamp(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .with_context(|| format!("unrecognised booking timestamp {:?}", raw))
}

/// Streams the start time of every booking on the facility's courts into `f`.
/// Returns the number of rows seen.
pub fn for_each_start_time<F>(pool: &DbPool, facility_id: FacilityId, mut f: F) -> anyhow::Result<u64>
where
    F: FnMut(NaiveDateTime),
{
    let conn = pool.get().context("acquiring database connection")?;
    let mut stmt = conn.prepare(
        r#"
        SELECT b.booking_start_time
        FROM bookings b
        JOIN courts c ON b.court_id = c.id
        WHERE c.facility_id = ?1
        "#,
    )?;

    let mut rows = stmt.query([facility_id.0])?;
    let mut seen = 0;
    while let Some(row) = rows.next()? {
        let raw: String = row.get(0)?;
        f(parse_timestamp(&raw)?);
        seen += 1;
    }

    Ok(seen)
}

pub fn insert_batch(pool: &DbPool, bookings: &[NewBooking]) -> anyhow::Result<usize> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO bookings
            (court_id, user_id, booking_start_time, booking_end_time, total_price, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )?;

        for booking in bookings {
            stmt.execute((
                booking.court_id,
                booking.user_id,
                booking.start.format("%Y-%m-%d %H:%M:%S").to_string(),
                booking.end.format("%Y-%m-%d %H:%M:%S").to_string(),
                booking.total_price,
                booking.status.as_str(),
            ))?;
        }
    }

    tx.commit()?;
    Ok(bookings.len())
}
