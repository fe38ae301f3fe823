use super::{histogram, Analysis, HourBucket};
use crate::{models::FacilityId, DbPool};

/// Every hour with at least one booking, ascending by hour.
pub fn analyze(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<Analysis<Vec<HourBucket>>> {
    let histogram = histogram::for_facility(pool, facility_id)?;
    if histogram.is_empty() {
        return Ok(Analysis::NoData);
    }
    Ok(Analysis::Ready(histogram.buckets().collect()))
}
