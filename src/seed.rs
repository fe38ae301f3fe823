use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::models::{
    booking, court, facility, BookingStatus, FacilityId, NewBooking, NewCourt, NewFacility,
};
use crate::DbPool;

// Hour-of-day demand (after-work evenings peak, early mornings second)
const HOURLY_DEMAND: [f64; 24] = [
    0.0, 0.0, 0.0, 0.0,  // 0-3
    0.0, 0.1, 0.6, 0.9,  // 4-7
    0.8, 0.5, 0.4, 0.4,  // 8-11
    0.5, 0.4, 0.3, 0.4,  // 12-15
    0.7, 1.1, 1.4, 1.5,  // 16-19
    1.3, 0.9, 0.5, 0.1,  // 20-23
];

const SPORTS: [(&str, f64); 4] = [
    ("Badminton", 12.0),
    ("Tennis", 25.0),
    ("Table Tennis", 8.0),
    ("Turf Cricket", 40.0),
];

const VENUE_TYPES: [&str; 3] = ["Indoor", "Outdoor", "Mixed"];

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub facilities: u32,
    pub courts_per_facility: u32,
    pub bookings_per_facility: u32,
    pub days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub facilities: Vec<FacilityId>,
    pub courts: usize,
    pub bookings: usize,
}

/// Inserts demo facilities with courts and bookings spread over the last
/// `days` days, ending yesterday.
pub fn run<R: Rng>(pool: &DbPool, options: &SeedOptions, rng: &mut R) -> anyhow::Result<SeedSummary> {
    let today = Utc::now().date_naive();
    run_until(pool, options, today, rng)
}

pub fn run_until<R: Rng>(
    pool: &DbPool,
    options: &SeedOptions,
    today: NaiveDate,
    rng: &mut R,
) -> anyhow::Result<SeedSummary> {
    if options.courts_per_facility == 0 && options.bookings_per_facility > 0 {
        anyhow::bail!("cannot seed bookings for facilities without courts");
    }

    let hours = WeightedIndex::new(HOURLY_DEMAND)?;
    let days = options.days.max(1) as i64;
    let mut summary = SeedSummary::default();

    for n in 1..=options.facilities {
        let facility_id = facility::insert(
            pool,
            &NewFacility {
                name: format!("Demo Sports Hub {}", n),
                address: format!("{} Demo Avenue", n * 10),
                venue_type: VENUE_TYPES[rng.gen_range(0..VENUE_TYPES.len())].to_string(),
            },
        )?;

        let mut courts = Vec::new();
        for c in 1..=options.courts_per_facility {
            let (sport, price) = SPORTS[rng.gen_range(0..SPORTS.len())];
            let court = NewCourt {
                name: format!("Court {}", c),
                sport_type: sport.to_string(),
                price_per_hour: price,
            };
            courts.push((court::insert(pool, facility_id, &court)?, price));
        }

        let mut bookings = Vec::with_capacity(options.bookings_per_facility as usize);
        for _ in 0..options.bookings_per_facility {
            let (court_id, price) = courts[rng.gen_range(0..courts.len())];
            let day = today - Duration::days(rng.gen_range(1..=days));
            let hour = hours.sample(rng) as u32;
            let duration_hours = rng.gen_range(1..=2);

            let start = NaiveDateTime::new(
                day,
                NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default(),
            );
            let status = match rng.gen_range(0..10) {
                0 => BookingStatus::Cancelled,
                1..=5 => BookingStatus::Completed,
                _ => BookingStatus::Confirmed,
            };

            bookings.push(NewBooking {
                court_id,
                user_id: Some(rng.gen_range(1..=200)),
                start,
                end: start + Duration::hours(duration_hours),
                total_price: price * duration_hours as f64,
                status,
            });
        }

        summary.bookings += booking::insert_batch(pool, &bookings)?;
        summary.courts += courts.len();
        summary.facilities.push(facility_id);

        tracing::debug!(
            "Seeded facility {} with {} courts and {} bookings",
            facility_id,
            courts.len(),
            bookings.len()
        );
    }

    Ok(summary)
}
