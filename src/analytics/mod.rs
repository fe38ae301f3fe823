pub mod earnings;
pub mod histogram;
pub mod hourly;
pub mod peak_hours;
pub mod sports;
pub mod summary;
pub mod trends;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use histogram::{HourBucket, HourHistogram};
pub use peak_hours::PeakHours;

pub const NO_DATA_MESSAGE: &str = "No booking data found.";

/// Result of an analysis over a facility's bookings.
///
/// An empty result is a distinct outcome rather than an empty collection, and
/// serializes as `{"message": "No booking data found."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis<T> {
    NoData,
    Ready(T),
}

impl<T> Analysis<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Analysis::NoData)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Analysis::Ready(value) => Some(value),
            Analysis::NoData => None,
        }
    }
}

impl<T: Serialize> Serialize for Analysis<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Analysis::Ready(value) => value.serialize(serializer),
            Analysis::NoData => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", NO_DATA_MESSAGE)?;
                map.end()
            }
        }
    }
}
