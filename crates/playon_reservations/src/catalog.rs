// --- File: crates/playon_reservations/src/catalog.rs ---
use futures::future::join_all;
use playon_availability::OperatingHours;
use playon_common::models::{Court, Gym, Sport};
use playon_common::services::{CourtDirectory, FacilityDirectory};
use playon_common::{not_found, PlayonError};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::degrade::or_empty;

/// Gyms, their courts and what can be played on them.
pub struct Catalog {
    facilities: Arc<dyn FacilityDirectory>,
    courts: Arc<dyn CourtDirectory>,
}

impl Catalog {
    pub fn new(facilities: Arc<dyn FacilityDirectory>, courts: Arc<dyn CourtDirectory>) -> Self {
        Self { facilities, courts }
    }

    pub async fn gyms(&self) -> Result<Vec<Gym>, PlayonError> {
        or_empty(self.facilities.list_gyms().await, "gyms")
    }

    /// The API has no single-gym endpoint; the gym is looked up in the full list.
    pub async fn gym(&self, gym_id: i64) -> Result<Gym, PlayonError> {
        self.facilities
            .list_gyms()
            .await?
            .into_iter()
            .find(|gym| gym.id == gym_id)
            .ok_or_else(|| not_found(format!("gym {}", gym_id)))
    }

    pub async fn courts(&self, gym_id: i64) -> Result<Vec<Court>, PlayonError> {
        or_empty(
            self.courts.courts_for_gym(gym_id).await,
            &format!("courts of gym {}", gym_id),
        )
    }

    /// Courts of several gyms, looked up concurrently.
    ///
    /// Every lookup is awaited. A gym whose lookup fails gets no courts
    /// rather than failing the batch.
    pub async fn courts_for_gyms(&self, gym_ids: &[i64]) -> Vec<(i64, Vec<Court>)> {
        let lookups = gym_ids.iter().map(|&gym_id| async move {
            let courts = self
                .courts
                .courts_for_gym(gym_id)
                .await
                .unwrap_or_else(|err| {
                    warn!("Could not load courts of gym {}: {}", gym_id, err);
                    Vec::new()
                });
            (gym_id, courts)
        });
        let results = join_all(lookups).await;
        debug!("Loaded courts of {} gyms", results.len());
        results
    }

    pub async fn sports_for_court(&self, court_id: i64) -> Result<Vec<Sport>, PlayonError> {
        or_empty(
            self.facilities.sports_for_court(court_id).await,
            &format!("sports of court {}", court_id),
        )
    }
}

/// The hours a gym's courts can be booked, with `defaults` filling in
/// whatever the gym does not publish.
pub fn operating_hours(gym: &Gym, defaults: OperatingHours) -> OperatingHours {
    OperatingHours::for_facility(
        gym.opening_time.as_deref(),
        gym.closing_time.as_deref(),
        defaults,
    )
}
