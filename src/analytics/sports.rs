use super::Analysis;
use crate::{
    models::{court, FacilityId, SportActivity},
    DbPool,
};

pub fn analyze(
    pool: &DbPool,
    facility_id: FacilityId,
) -> anyhow::Result<Analysis<Vec<SportActivity>>> {
    let sports = court::bookings_by_sport(pool, facility_id)?;
    if sports.is_empty() {
        return Ok(Analysis::NoData);
    }
    Ok(Analysis::Ready(sports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{bookings, facility, sport_court};

    #[test]
    fn test_groups_courts_by_sport() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Sports");
        let tennis_one = sport_court(&pool, id, "Court 1", "Tennis");
        let tennis_two = sport_court(&pool, id, "Court 2", "Tennis");
        let squash = sport_court(&pool, id, "Court 3", "Squash");
        let badminton = sport_court(&pool, id, "Court 4", "Badminton");
        sport_court(&pool, id, "Court 5", "Pickleball");
        bookings(&pool, tennis_one, &[("2024-01-01 08:00:00", 20.0)]);
        bookings(&pool, tennis_two, &[("2024-01-01 09:00:00", 20.0), ("2024-01-01 10:00:00", 20.0)]);
        bookings(&pool, squash, &[("2024-01-01 11:00:00", 10.0)]);
        bookings(&pool, badminton, &[("2024-01-01 12:00:00", 10.0)]);

        let sports = analyze(&pool, id).unwrap().ready().unwrap();
        let rows: Vec<(&str, i64)> = sports
            .iter()
            .map(|s| (s.sport_type.as_str(), s.booking_count))
            .collect();
        assert_eq!(rows, vec![("Tennis", 3), ("Badminton", 1), ("Squash", 1)]);
        assert_eq!(
            serde_json::to_value(&sports[0]).unwrap(),
            serde_json::json!({"sportType": "Tennis", "bookingCount": 3})
        );
    }

    #[test]
    fn test_no_bookings_is_no_data() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Idle");
        sport_court(&pool, id, "Court 1", "Tennis");
        assert!(analyze(&pool, id).unwrap().is_no_data());
    }
}
