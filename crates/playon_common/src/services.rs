// --- File: crates/playon_common/src/services.rs ---
//! Collaborator abstractions for the PlayOn REST API.
//!
//! The client never talks to HTTP directly from its view logic; it goes
//! through these traits. `playon-api` implements all of them against the
//! real server, and tests substitute in-memory mocks.

use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

use crate::error::PlayonError;
use crate::models::{
    BookingRecord, BookingSearch, Court, Gym, NewBooking, Player, Registration, Sport, User,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E = PlayonError> =
    Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Lists facilities and what can be played there.
pub trait FacilityDirectory: Send + Sync {
    /// Every gym, each with its operating hours when published.
    fn list_gyms(&self) -> BoxFuture<'_, Vec<Gym>>;

    /// Sports available on a court.
    fn sports_for_court(&self, court_id: i64) -> BoxFuture<'_, Vec<Sport>>;
}

/// Lists the courts of a gym.
pub trait CourtDirectory: Send + Sync {
    fn courts_for_gym(&self, gym_id: i64) -> BoxFuture<'_, Vec<Court>>;
}

/// Read access to reservations.
pub trait BookingDirectory: Send + Sync {
    /// Reservations of one court on one day.
    fn bookings_for_day(&self, court_id: i64, date: NaiveDate)
        -> BoxFuture<'_, Vec<BookingRecord>>;

    /// A single reservation.
    fn booking_by_id(&self, booking_id: i64) -> BoxFuture<'_, BookingRecord>;

    /// Reservations the user created or joined.
    fn bookings_for_user(&self, user_id: i64) -> BoxFuture<'_, Vec<BookingRecord>>;

    /// Public reservations matching the filters; an empty search lists everything.
    fn search_bookings(&self, search: &BookingSearch) -> BoxFuture<'_, Vec<BookingRecord>>;
}

/// Creates reservations.
pub trait BookingCreator: Send + Sync {
    /// Creates the booking and returns its id when the server reports one.
    fn create_booking(&self, booking: NewBooking) -> BoxFuture<'_, Option<i64>>;
}

/// Manages who plays in a reservation.
pub trait ParticipantService: Send + Sync {
    fn players(&self, booking_id: i64) -> BoxFuture<'_, Vec<Player>>;

    /// Returns whether the server accepted the user into the reservation.
    fn join(&self, booking_id: i64, user_id: i64) -> BoxFuture<'_, bool>;

    fn leave(&self, booking_id: i64, user_id: i64) -> BoxFuture<'_, ()>;
}

/// Account endpoints.
pub trait AuthService: Send + Sync {
    fn login(&self, email: &str, password: &str) -> BoxFuture<'_, User>;

    /// Emails a verification code and returns it, as the API does.
    fn send_email_code(&self, email: &str) -> BoxFuture<'_, String>;

    fn register(&self, registration: Registration) -> BoxFuture<'_, User>;
}

/// Read side of the session, for screens that only need the signed-in user.
pub trait SessionSource: Send + Sync {
    fn current_user(&self) -> Option<User>;
}
