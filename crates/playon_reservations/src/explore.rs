// --- File: crates/playon_reservations/src/explore.rs ---
use playon_common::models::{BookingRecord, BookingSearch, Sport};
use playon_common::services::BookingDirectory;
use playon_common::PlayonError;
use std::collections::HashSet;
use std::sync::Arc;

use crate::degrade::or_empty;

/// Distinct sports of `bookings`, in the order they first appear.
/// Bookings without both a sport id and a sport name are skipped.
pub fn unique_sports(bookings: &[BookingRecord]) -> Vec<Sport> {
    let mut seen = HashSet::new();
    bookings
        .iter()
        .filter_map(|booking| match (booking.sport_id, booking.sport_name.as_deref()) {
            (Some(id), Some(name)) if !name.trim().is_empty() => Some(Sport {
                id,
                name: name.to_string(),
            }),
            _ => None,
        })
        .filter(|sport| seen.insert(sport.id))
        .collect()
}

/// Search screen: runs searches and keeps the sport filter options.
pub struct Explorer {
    bookings: Arc<dyn BookingDirectory>,
    sports: Vec<Sport>,
}

impl Explorer {
    pub fn new(bookings: Arc<dyn BookingDirectory>) -> Self {
        Self {
            bookings,
            sports: Vec::new(),
        }
    }

    /// Sport options gathered from the results seen so far.
    pub fn sports(&self) -> &[Sport] {
        &self.sports
    }

    /// Runs a search. The sport options are rebuilt from non-empty results,
    /// so filtering down to nothing keeps the previous options.
    pub async fn search(&mut self, search: &BookingSearch) -> Result<Vec<BookingRecord>, PlayonError> {
        let results = or_empty(self.bookings.search_bookings(search).await, "search results")?;
        if self.sports.is_empty() || !results.is_empty() {
            self.sports = unique_sports(&results);
        }
        Ok(results)
    }
}
