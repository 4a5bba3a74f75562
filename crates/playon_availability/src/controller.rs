// --- File: crates/playon_availability/src/controller.rs ---
use chrono::NaiveDate;
use playon_common::models::{NewBooking, DATE_FORMAT};
use playon_common::services::{BookingCreator, BookingDirectory, SessionSource};
use playon_common::PlayonError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::day_view::{DayView, DayViewState, PendingBooking, RequestToken};
use crate::logic::{BookingWindow, OperatingHours, Slot, Toggle};

/// What the user fills in next to the slot picker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDetails {
    pub sport_id: i64,
    pub notes: String,
    pub private: bool,
}

impl PendingBooking {
    /// The `registerBooking` body for this booking on `court_id`.
    pub fn to_new_booking(&self, court_id: i64, details: &BookingDetails) -> NewBooking {
        NewBooking {
            user_id: self.user_id,
            court_id,
            date: self.date.format(DATE_FORMAT).to_string(),
            start_time: self.range.start_time(),
            end_time: self.range.end_time(),
            notes: details.notes.clone(),
            private: u8::from(details.private),
            sport_id: details.sport_id,
        }
    }
}

/// Drives a [`DayView`] for one court against the booking collaborators.
///
/// The state machine sits behind a mutex that is never held across a
/// network call, so overlapping `select_date` calls are fine: each takes a
/// token, fetches, and only the latest token's response is applied.
pub struct DayViewController {
    court_id: i64,
    view: Mutex<DayView>,
    bookings: Arc<dyn BookingDirectory>,
    creator: Arc<dyn BookingCreator>,
    session: Arc<dyn SessionSource>,
    clock: Arc<dyn Clock>,
}

impl DayViewController {
    pub fn new(
        court_id: i64,
        hours: OperatingHours,
        bookings: Arc<dyn BookingDirectory>,
        creator: Arc<dyn BookingCreator>,
        session: Arc<dyn SessionSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            court_id,
            view: Mutex::new(DayView::new(hours)),
            bookings,
            creator,
            session,
            clock,
        }
    }

    pub fn court_id(&self) -> i64 {
        self.court_id
    }

    /// Current state, for rendering.
    pub async fn snapshot(&self) -> DayViewState {
        self.view.lock().await.state().clone()
    }

    pub async fn select_date(&self, date: NaiveDate) -> Result<DayViewState, PlayonError> {
        let token = self
            .view
            .lock()
            .await
            .select_date(date, self.clock.today())?;
        self.load(token, date).await
    }

    /// Refetches the bookings of the selected date.
    pub async fn refresh(&self) -> Result<DayViewState, PlayonError> {
        let refresh = self.view.lock().await.refresh();
        match refresh {
            Some((token, date)) => self.load(token, date).await,
            None => Ok(self.snapshot().await),
        }
    }

    pub async fn toggle_slot(&self, slot: Slot) -> Result<Toggle, PlayonError> {
        let toggled = self.view.lock().await.toggle_slot(slot)?;
        debug!("Slot {} {:?} on court {}", slot, toggled, self.court_id);
        Ok(toggled)
    }

    /// Books the selected hours and returns the new booking id, if the
    /// server sent one back.
    ///
    /// On success the selection is cleared and the day is refetched; a
    /// failed refetch is only logged. On failure the view shows the error
    /// and keeps the selection for a retry.
    pub async fn submit(&self, details: &BookingDetails) -> Result<Option<i64>, PlayonError> {
        let user_id = self.session.current_user().map(|user| user.id);
        let pending = self
            .view
            .lock()
            .await
            .begin_submit(self.clock.now(), user_id)?;
        let request = pending.to_new_booking(self.court_id, details);

        match self.creator.create_booking(request).await {
            Ok(booking_id) => {
                info!(
                    "Booked court {} on {} {} (booking {:?})",
                    self.court_id, pending.date, pending.range, booking_id
                );
                let refetch = self.view.lock().await.submit_succeeded();
                // The booking exists from here on; refetch errors are only logged
                if let Some((token, date)) = refetch {
                    if let Err(err) = self.load(token, date).await {
                        warn!(
                            "Booked court {} but could not reload {}: {}",
                            self.court_id, date, err
                        );
                    }
                }
                Ok(booking_id)
            }
            Err(err) => {
                error!(
                    "Booking court {} on {} {} failed: {}",
                    self.court_id, pending.date, pending.range, err
                );
                self.view.lock().await.submit_failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn load(&self, token: RequestToken, date: NaiveDate) -> Result<DayViewState, PlayonError> {
        let windows = self.fetch_windows(date).await?;
        let mut view = self.view.lock().await;
        if !view.bookings_loaded(token, &windows) {
            debug!("Bookings for court {} on {} arrived late, ignored", self.court_id, date);
        }
        Ok(view.state().clone())
    }

    /// The day's booking windows. Network and decoding failures read as an
    /// empty day; unreadable records are skipped.
    async fn fetch_windows(&self, date: NaiveDate) -> Result<Vec<BookingWindow>, PlayonError> {
        let records = match self.bookings.bookings_for_day(self.court_id, date).await {
            Ok(records) => records,
            Err(err) if err.degrades_to_empty() => {
                warn!(
                    "Could not load bookings for court {} on {}: {}",
                    self.court_id, date, err
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let mut windows = Vec::with_capacity(records.len());
        for record in &records {
            match BookingWindow::from_record(record) {
                Ok(window) if window.is_empty() => warn!(
                    "Booking {:?} on court {} ends before it starts ({} - {}), ignored",
                    record.id, self.court_id, record.start_time, record.end_time
                ),
                Ok(window) => windows.push(window),
                Err(err) => warn!("Skipping booking {:?}: {}", record.id, err),
            }
        }
        Ok(windows)
    }
}
