// --- File: crates/playon_reservations/src/lib.rs ---
pub mod catalog;
pub mod detail;
pub mod explore;
pub mod feed;
pub mod mine;

mod degrade;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
mod detail_test;

pub use catalog::{operating_hours, Catalog};
pub use detail::ReservationDetail;
pub use explore::{unique_sports, Explorer};
pub use feed::{load_home, HomeFeed};
pub use mine::my_bookings;
