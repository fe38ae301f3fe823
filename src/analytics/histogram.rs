use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::{models::booking, models::FacilityId, DbPool};

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u8,
    pub count: u64,
}

/// Booking counts per hour-of-day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourHistogram {
    slots: [u64; HOURS_PER_DAY],
}

impl HourHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one booking at `hour`. Hours outside 0..24 are ignored.
    pub fn record(&mut self, hour: u32) {
        if let Some(slot) = self.slots.get_mut(hour as usize) {
            *slot += 1;
        }
    }

    pub fn record_time(&mut self, ts: &NaiveDateTime) {
        self.record(ts.hour());
    }

    pub fn total(&self) -> u64 {
        self.slots.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn count(&self, hour: u32) -> u64 {
        self.slots.get(hour as usize).copied().unwrap_or(0)
    }

    /// Non-empty buckets in ascending hour order.
    pub fn buckets(&self) -> impl Iterator<Item = HourBucket> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(hour, &count)| HourBucket {
                hour: hour as u8,
                count,
            })
    }

    /// The `n` busiest hours, highest count first. Equal counts are ordered by
    /// ascending hour so the selection is stable across runs.
    pub fn top(&self, n: usize) -> Vec<HourBucket> {
        let mut buckets: Vec<HourBucket> = self.buckets().collect();
        buckets.sort_by_key(|b| (Reverse(b.count), b.hour));
        buckets.truncate(n);
        buckets
    }
}

impl FromIterator<u32> for HourHistogram {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for hour in iter {
            histogram.record(hour);
        }
        histogram
    }
}

/// Folds every booking start time of the facility into a histogram without
/// holding the rows in memory.
pub fn for_facility(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<HourHistogram> {
    let mut histogram = HourHistogram::new();
    booking::for_each_start_time(pool, facility_id, |ts| histogram.record_time(&ts))?;
    Ok(histogram)
}
