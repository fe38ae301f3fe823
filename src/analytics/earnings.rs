use super::Analysis;
use crate::{
    models::{court, CourtEarnings, FacilityId},
    DbPool,
};

pub fn analyze(pool: &DbPool, facility_id: FacilityId) -> anyhow::Result<Analysis<Vec<CourtEarnings>>> {
    let earnings = court::earnings_for_facility(pool, facility_id)?;
    if earnings.is_empty() {
        return Ok(Analysis::NoData);
    }
    Ok(Analysis::Ready(earnings))
}
