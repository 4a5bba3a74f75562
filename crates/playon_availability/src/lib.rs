// --- File: crates/playon_availability/src/lib.rs ---
// Declare modules within this crate
pub mod calendar;
pub mod clock;
pub mod controller;
#[cfg(test)]
mod controller_test;
pub mod day_view;
pub mod logic;
#[cfg(test)]
mod logic_proptest;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{BookingDetails, DayViewController};
pub use day_view::{DayView, DayViewState, PendingBooking, RequestToken};
pub use logic::{
    compute_free_slots, is_contiguous_extension, to_booking_range, AvailabilityError,
    BookingRange, BookingWindow, OperatingHours, Selection, Slot, Toggle,
};
