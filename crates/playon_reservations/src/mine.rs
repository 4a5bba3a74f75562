// --- File: crates/playon_reservations/src/mine.rs ---
use playon_common::models::BookingRecord;
use playon_common::services::{BookingDirectory, SessionSource};
use playon_common::PlayonError;

use crate::degrade::or_empty;

/// Reservations the signed-in user created or joined; empty when signed out.
pub async fn my_bookings(
    bookings: &dyn BookingDirectory,
    session: &dyn SessionSource,
) -> Result<Vec<BookingRecord>, PlayonError> {
    let Some(user) = session.current_user() else {
        return Ok(Vec::new());
    };
    or_empty(
        bookings.bookings_for_user(user.id).await,
        &format!("bookings of user {}", user.id),
    )
}
