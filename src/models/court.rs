use crate::DbPool;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::facility::FacilityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    pub id: i64,
    pub facility_id: FacilityId,
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: f64,
}

#[derive(Debug, Clone)]
pub struct NewCourt {
    pub name: String,
    pub sport_type: String,
    pub price_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtEarnings {
    pub court_id: i64,
    pub name: String,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportActivity {
    pub sport_type: String,
    pub booking_count: i64,
}

pub fn insert(pool: &DbPool, facility_id: FacilityId, court: &NewCourt) -> anyhow::Result<i64> {
    let conn = pool.get()?;
    conn.execute(
        "INSERT INTO courts (facility_id, name, sport_type, price_per_hour) VALUES (?1, ?2, ?3, ?4)",
        (facility_id.0, &court.name, &court.sport_type, court.price_per_hour),
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_for_facility(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<Vec<Court>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, facility_id, name, sport_type, price_per_hour
         FROM courts WHERE facility_id = ?1 ORDER BY id",
    )?;

    let courts = stmt
        .query_map([facility_id.0], |row| {
            Ok(Court {
                id: row.get(0)?,
                facility_id: FacilityId(row.get(1)?),
                name: row.get(2)?,
                sport_type: row.get(3)?,
                price_per_hour: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(courts)
}

/// Summed booking revenue per court, skipping courts that earned nothing.
pub fn earnings_for_facility(
    pool: &DbPool,
    facility_id: FacilityId,
) -> anyhow::Result<Vec<CourtEarnings>> {
    let conn = pool.get().context("acquiring database connection")?;
    let mut stmt = conn.prepare(
        r#"
        SELECT c.id, c.name, SUM(b.total_price) AS total_earnings
        FROM courts c
        JOIN bookings b ON b.court_id = c.id
        WHERE c.facility_id = ?1
        GROUP BY c.id, c.name
        HAVING total_earnings > 0
        ORDER BY c.id
        "#,
    )?;

    let earnings = stmt
        .query_map([facility_id.0], |row| {
            Ok(CourtEarnings {
                court_id: row.get(0)?,
                name: row.get(1)?,
                total_earnings: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .context("reading court earnings")?;

    Ok(earnings)
}

/// Booking counts per sport across the facility's courts, busiest first.
/// Equal counts are ordered by sport name.
pub fn bookings_by_sport(
    pool: &DbPool,
    facility_id: FacilityId,
) -> anyhow::Result<Vec<SportActivity>> {
    let conn = pool.get().context("acquiring database connection")?;
    let mut stmt = conn.prepare(
        r#"
        SELECT c.sport_type, COUNT(b.id) AS booking_count
        FROM courts c
        JOIN bookings b ON b.court_id = c.id
        WHERE c.facility_id = ?1
        GROUP BY c.sport_type
        ORDER BY booking_count DESC, c.sport_type ASC
        "#,
    )?;

    let sports = stmt
        .query_map([facility_id.0], |row| {
            Ok(SportActivity {
                sport_type: row.get(0)?,
                booking_count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .context("reading bookings by sport")?;

    Ok(sports)
}
