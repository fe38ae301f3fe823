//! Fixture helpers shared by store-backed tests.

use crate::DbPool;

use super::court::{self, NewCourt};
use super::facility::{self, FacilityId, NewFacility};

pub fn facility(pool: &DbPool, name: &str) -> FacilityId {
    facility::insert(
        pool,
        &NewFacility {
            name: name.to_string(),
            address: format!("{} street", name),
            venue_type: "Indoor".to_string(),
        },
    )
    .unwrap()
}

pub fn court(pool: &DbPool, facility_id: FacilityId, name: &str) -> i64 {
    sport_court(pool, facility_id, name, "Badminton")
}

pub fn sport_court(pool: &DbPool, facility_id: FacilityId, name: &str, sport: &str) -> i64 {
    court::insert(
        pool,
        facility_id,
        &NewCourt {
            name: name.to_string(),
            sport_type: sport.to_string(),
            price_per_hour: 15.0,
        },
    )
    .unwrap()
}

/// Inserts raw start-time strings as-is, so tests can store malformed values.
pub fn bookings(pool: &DbPool, court_id: i64, rows: &[(&str, f64)]) {
    let conn = pool.get().unwrap();
    for (start, price) in rows {
        conn.execute(
            "INSERT INTO bookings (court_id, booking_start_time, booking_end_time, total_price)
             VALUES (?1, ?2, ?2, ?3)",
            (court_id, start, price),
        )
        .unwrap();
    }
}

pub fn court_with_start_times(pool: &DbPool, facility_id: FacilityId, starts: &[&str]) -> i64 {
    let court_id = court(pool, facility_id, "Court");
    let rows: Vec<(&str, f64)> = starts.iter().map(|s| (*s, 10.0)).collect();
    bookings(pool, court_id, &rows);
    court_id
}

/// A facility whose bookings start at the given hours on 2024-01-01.
pub fn facility_with_hours(pool: &DbPool, hours: &[u32]) -> FacilityId {
    let id = facility(pool, "Hours");
    let starts: Vec<String> = hours
        .iter()
        .map(|h| format!("2024-01-01 {:02}:00:00", h))
        .collect();
    let starts: Vec<&str> = starts.iter().map(String::as_str).collect();
    court_with_start_times(pool, id, &starts);
    id
}
