use super::Analysis;
use crate::{
    models::{facility, FacilityId, FacilityKpis},
    DbPool,
};

/// Dashboard KPIs. A facility without courts (or an unknown id) has nothing
/// to report; one with courts but no bookings reports zeros.
pub fn analyze(
    pool: &DbPool,
    facility_id: FacilityId,
) -> anyhow::Result<Analysis<FacilityKpis>> {
    let kpis = facility::kpis(pool, facility_id)?;
    if kpis.active_courts == 0 {
        return Ok(Analysis::NoData);
    }
    Ok(Analysis::Ready(kpis))
}
