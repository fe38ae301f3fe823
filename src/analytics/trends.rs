use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Analysis;
use crate::{models::booking, models::FacilityId, DbPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Bookings per calendar day of their start time, oldest day first.
pub fn analyze(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<Analysis<Vec<DailyCount>>> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    booking::for_each_start_time(pool, facility_id, |ts| {
        *per_day.entry(ts.date()).or_insert(0) += 1;
    })?;

    if per_day.is_empty() {
        return Ok(Analysis::NoData);
    }

    Ok(Analysis::Ready(
        per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{court_with_start_times, facility};

    #[test]
    fn test_groups_by_day_ascending() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Trends");
        court_with_start_times(
            &pool,
            id,
            &[
                "2024-02-03 10:00:00",
                "2024-02-01 09:00:00",
                "2024-02-03 18:00:00",
                "2024-02-01T23:59:00-08:00",
            ],
        );

        let days = analyze(&pool, id).unwrap().ready().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(days[0].count, 2);
        assert_eq!(days[1].count, 2);

        let json = serde_json::to_value(&days).unwrap();
        assert_eq!(json[1], serde_json::json!({"date": "2024-02-03", "count": 2}));
    }

    #[test]
    fn test_empty_facility() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Nothing");
        assert!(analyze(&pool, id).unwrap().is_no_data());
    }
}
