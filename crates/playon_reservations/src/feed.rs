// --- File: crates/playon_reservations/src/feed.rs ---
use playon_common::models::{BookingRecord, BookingSearch, Gym};
use playon_common::services::{BookingDirectory, FacilityDirectory};
use playon_common::PlayonError;

use crate::degrade::or_empty;

/// What the home screen shows: open reservations and every gym.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub bookings: Vec<BookingRecord>,
    pub gyms: Vec<Gym>,
}

/// Fetches both lists at once; either one may come back empty on failure.
pub async fn load_home(
    bookings: &dyn BookingDirectory,
    facilities: &dyn FacilityDirectory,
) -> Result<HomeFeed, PlayonError> {
    let everything = BookingSearch::default();
    let (booking_result, gym_result) =
        futures::join!(bookings.search_bookings(&everything), facilities.list_gyms());
    Ok(HomeFeed {
        bookings: or_empty(booking_result, "reservations")?,
        gyms: or_empty(gym_result, "gyms")?,
    })
}
