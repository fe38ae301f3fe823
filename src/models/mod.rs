pub mod booking;
pub mod court;
pub mod facility;

#[cfg(test)]
pub(crate) mod testing;

pub use booking::{BookingStatus, NewBooking};
pub use court::{Court, CourtEarnings, NewCourt, SportActivity};
pub use facility::{Facility, FacilityId, FacilityKpis, NewFacility};
