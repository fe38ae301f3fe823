use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{histogram, Analysis, HourBucket, HourHistogram};
use crate::{models::FacilityId, DbPool};

pub const TOP_HOURS: usize = 3;

/// The busiest hours of a facility, highest count first.
///
/// Serializes as a JSON object keyed by hour (`{"8": 3, "14": 2}`), with keys
/// emitted in ranking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakHours(Vec<HourBucket>);

impl PeakHours {
    pub fn from_histogram(histogram: &HourHistogram) -> Self {
        Self(histogram.top(TOP_HOURS))
    }

    pub fn buckets(&self) -> &[HourBucket] {
        &self.0
    }
}

impl Serialize for PeakHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for bucket in &self.0 {
            map.serialize_entry(&bucket.hour.to_string(), &bucket.count)?;
        }
        map.end()
    }
}

pub fn summarize(histogram: &HourHistogram) -> Analysis<PeakHours> {
    if histogram.is_empty() {
        Analysis::NoData
    } else {
        Analysis::Ready(PeakHours::from_histogram(histogram))
    }
}

pub fn analyze(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<Analysis<PeakHours>> {
    let histogram = histogram::for_facility(pool, facility_id)?;
    Ok(summarize(&histogram))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{court_with_start_times, facility, facility_with_hours};

    #[test]
    fn test_scenario_three_distinct_hours() {
        let pool = crate::db::test_pool();
        let id = facility_with_hours(&pool, &[8, 8, 8, 14, 14, 20]);

        let peaks = analyze(&pool, id).unwrap().ready().unwrap();
        assert_eq!(
            peaks.buckets(),
            &[
                HourBucket { hour: 8, count: 3 },
                HourBucket { hour: 14, count: 2 },
                HourBucket { hour: 20, count: 1 },
            ]
        );
        assert_eq!(serde_json::to_string(&peaks).unwrap(), r#"{"8":3,"14":2,"20":1}"#);
    }

    #[test]
    fn test_no_bookings_is_no_data() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Empty");
        assert!(analyze(&pool, id).unwrap().is_no_data());
    }

    #[test]
    fn test_unknown_facility_is_no_data() {
        let pool = crate::db::test_pool();
        assert!(analyze(&pool, FacilityId(404)).unwrap().is_no_data());
    }

    #[test]
    fn test_truncates_to_three() {
        let pool = crate::db::test_pool();
        let id = facility_with_hours(&pool, &[6, 7, 7, 8, 8, 8, 9, 9, 9, 9, 10]);

        let peaks = analyze(&pool, id).unwrap().ready().unwrap();
        let hours: Vec<u8> = peaks.buckets().iter().map(|b| b.hour).collect();
        assert_eq!(hours, vec![9, 8, 7]);
    }

    #[test]
    fn test_ties_resolved_by_ascending_hour() {
        let pool = crate::db::test_pool();
        let id = facility_with_hours(&pool, &[13, 13, 9, 9, 5, 5, 21]);

        let peaks = analyze(&pool, id).unwrap().ready().unwrap();
        assert_eq!(serde_json::to_string(&peaks).unwrap(), r#"{"5":2,"9":2,"13":2}"#);
    }

    #[test]
    fn test_idempotent() {
        let pool = crate::db::test_pool();
        let id = facility_with_hours(&pool, &[10, 11, 11, 12, 12, 12, 23]);

        let first = analyze(&pool, id).unwrap();
        let second = analyze(&pool, id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invariants_hold() {
        let pool = crate::db::test_pool();
        let hours: Vec<u32> = (0..200).map(|i| (i * 7 % 24) as u32).collect();
        let id = facility_with_hours(&pool, &hours);

        let peaks = analyze(&pool, id).unwrap().ready().unwrap();
        let buckets = peaks.buckets();
        assert!(buckets.len() <= TOP_HOURS);
        assert!(buckets.iter().all(|b| b.hour < 24 && b.count > 0));
        assert!(buckets.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_offset_timestamps_bucket_by_wall_clock() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Offsets");
        court_with_start_times(
            &pool,
            id,
            &["2024-03-01T23:30:00-05:00", "2024-03-02T23:10:00+09:00", "2024-03-02 07:00:00"],
        );

        let peaks = analyze(&pool, id).unwrap().ready().unwrap();
        assert_eq!(peaks.buckets()[0], HourBucket { hour: 23, count: 2 });
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        let pool = crate::db::test_pool();
        let id = facility(&pool, "Bad");
        court_with_start_times(&pool, id, &["2024-01-01 08:00:00", "garbage"]);
        assert!(analyze(&pool, id).is_err());
    }
}
