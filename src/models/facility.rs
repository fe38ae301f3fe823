use crate::DbPool;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a facility as stored in `facilities.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub i64);

impl FacilityId {
    /// Accepts a JSON integer, a whole-valued float (`1.0`) or a string
    /// holding an integer. Fractions, null, booleans and non-numeric strings
    /// yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                n.as_i64().or_else(|| n.as_f64().and_then(whole_i64)).map(Self)
            }
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

fn whole_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl FromStr for FacilityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub address: String,
    pub status: String,
    pub venue_type: String,
}

#[derive(Debug, Clone)]
pub struct NewFacility {
    pub name: String,
    pub address: String,
    pub venue_type: String,
}

/// Headline numbers for a facility's owner dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityKpis {
    pub total_bookings: i64,
    pub total_earnings: f64,
    pub active_courts: i64,
}

pub fn insert(pool: &DbPool, facility: &NewFacility) -> anyhow::Result<FacilityId> {
    let conn = pool.get()?;
    conn.execute(
        "INSERT INTO facilities (name, address, status, venue_type) VALUES (?1, ?2, 'approved', ?3)",
        (&facility.name, &facility.address, &facility.venue_type),
    )?;
    Ok(FacilityId(conn.last_insert_rowid()))
}

pub fn list(pool: &DbPool) -> anyhow::Result<Vec<Facility>> {
    let conn = pool.get()?;
    let mut stmt =
        conn.prepare("SELECT id, name, address, status, venue_type FROM facilities ORDER BY id")?;

    let facilities = stmt
        .query_map([], |row| {
            Ok(Facility {
                id: FacilityId(row.get(0)?),
                name: row.get(1)?,
                address: row.get(2)?,
                status: row.get(3)?,
                venue_type: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(facilities)
}

/// Court count plus booking count and revenue across those courts.
/// Revenue is 0 when nothing has been booked.
pub fn kpis(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<FacilityKpis> {
    let conn = pool.get().context("acquiring database connection")?;
    let kpis = conn
        .query_row(
            r#"
            SELECT
                (SELECT COUNT(*) FROM courts WHERE facility_id = ?1),
                COUNT(b.id),
                COALESCE(SUM(b.total_price), 0.0)
            FROM bookings b
            JOIN courts c ON b.court_id = c.id
            WHERE c.facility_id = ?1
            "#,
            [facility_id.0],
            |row| {
                Ok(FacilityKpis {
                    active_courts: row.get(0)?,
                    total_bookings: row.get(1)?,
                    total_earnings: row.get(2)?,
                })
            },
        )
        .context("reading facility KPIs")?;

    Ok(kpis)
}
