// --- File: crates/playon_availability/src/day_view.rs ---
//! The booking screen of one court, as a synchronous state machine.
//!
//! ```text
//! NoDateSelected --select_date--> Loading --bookings_loaded--> Ready
//! Ready --toggle_slot--> Ready
//! Ready --begin_submit--> Submitting --submit_succeeded--> Ready (refetching)
//!                                    --submit_failed----> SubmitError
//! SubmitError --toggle_slot / begin_submit--> Ready / Submitting
//! ```
//!
//! Every fetch of the day's bookings is tagged with a [`RequestToken`]; only
//! the response to the most recently issued token is applied.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use crate::calendar::is_past_date;
use crate::logic::{
    compute_free_slots, to_booking_range, AvailabilityError, BookingRange, BookingWindow,
    OperatingHours, Selection, Slot, Toggle,
};

/// Identifies one bookings fetch. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum DayViewState {
    NoDateSelected,
    Loading {
        date: NaiveDate,
    },
    Ready {
        date: NaiveDate,
        free_slots: Vec<Slot>,
        selection: Selection,
    },
    Submitting {
        date: NaiveDate,
        free_slots: Vec<Slot>,
        selection: Selection,
    },
    SubmitError {
        date: NaiveDate,
        free_slots: Vec<Slot>,
        selection: Selection,
        message: String,
    },
}

impl DayViewState {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayViewState::NoDateSelected => None,
            DayViewState::Loading { date }
            | DayViewState::Ready { date, .. }
            | DayViewState::Submitting { date, .. }
            | DayViewState::SubmitError { date, .. } => Some(*date),
        }
    }

    pub fn free_slots(&self) -> &[Slot] {
        match self {
            DayViewState::Ready { free_slots, .. }
            | DayViewState::Submitting { free_slots, .. }
            | DayViewState::SubmitError { free_slots, .. } => free_slots,
            _ => &[],
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            DayViewState::Ready { selection, .. }
            | DayViewState::Submitting { selection, .. }
            | DayViewState::SubmitError { selection, .. } => Some(selection),
            _ => None,
        }
    }
}

/// A validated booking about to be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingBooking {
    pub date: NaiveDate,
    pub range: BookingRange,
    pub user_id: i64,
}

#[derive(Debug)]
pub struct DayView {
    hours: OperatingHours,
    state: DayViewState,
    last_issued: u64,
}

impl DayView {
    pub fn new(hours: OperatingHours) -> Self {
        DayView {
            hours,
            state: DayViewState::NoDateSelected,
            last_issued: 0,
        }
    }

    pub fn hours(&self) -> OperatingHours {
        self.hours
    }

    pub fn state(&self) -> &DayViewState {
        &self.state
    }

    fn issue_token(&mut self) -> RequestToken {
        self.last_issued += 1;
        RequestToken(self.last_issued)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.last_issued
    }

    /// Moves to `Loading` for `date` and returns the token its bookings
    /// fetch must carry. Past dates are rejected before any fetch.
    pub fn select_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<RequestToken, AvailabilityError> {
        if is_past_date(date, today) {
            return Err(AvailabilityError::PastDate { date });
        }
        if matches!(self.state, DayViewState::Submitting { .. }) {
            return Err(AvailabilityError::SubmissionInProgress);
        }
        self.state = DayViewState::Loading { date };
        Ok(self.issue_token())
    }

    /// Issues a new token for the current date without leaving the current state.
    pub fn refresh(&mut self) -> Option<(RequestToken, NaiveDate)> {
        if matches!(self.state, DayViewState::Submitting { .. }) {
            return None;
        }
        let date = self.state.date()?;
        Some((self.issue_token(), date))
    }

    /// Applies a bookings response. Returns false if it was discarded,
    /// either because a newer fetch was issued or a submission is running.
    ///
    /// A fresh date starts with an empty selection. A refresh of the shown
    /// date keeps the selection, and a pending submit error, as long as every
    /// selected hour is still free.
    pub fn bookings_loaded(&mut self, token: RequestToken, bookings: &[BookingWindow]) -> bool {
        if !self.is_latest(token) {
            debug!("Discarding stale bookings response {:?}", token);
            return false;
        }
        let free_slots = compute_free_slots(self.hours, bookings);
        let next = match &mut self.state {
            DayViewState::Loading { date } => DayViewState::Ready {
                date: *date,
                free_slots,
                selection: Selection::new(),
            },
            DayViewState::Ready {
                date, selection, ..
            } => DayViewState::Ready {
                date: *date,
                selection: still_free(std::mem::take(selection), &free_slots),
                free_slots,
            },
            DayViewState::SubmitError {
                date,
                selection,
                message,
                ..
            } => {
                let selection = still_free(std::mem::take(selection), &free_slots);
                if selection.is_empty() {
                    DayViewState::Ready {
                        date: *date,
                        free_slots,
                        selection,
                    }
                } else {
                    DayViewState::SubmitError {
                        date: *date,
                        free_slots,
                        selection,
                        message: std::mem::take(message),
                    }
                }
            }
            DayViewState::NoDateSelected | DayViewState::Submitting { .. } => return false,
        };
        self.state = next;
        true
    }

    /// Toggles a slot in `Ready`. In `SubmitError` the toggle also dismisses
    /// the error. A rejected toggle changes nothing.
    pub fn toggle_slot(&mut self, slot: Slot) -> Result<Toggle, AvailabilityError> {
        match &mut self.state {
            DayViewState::Ready {
                free_slots,
                selection,
                ..
            } => selection.toggle(slot, free_slots),
            DayViewState::SubmitError {
                date,
                free_slots,
                selection,
                ..
            } => {
                let toggled = selection.toggle(slot, free_slots)?;
                self.state = DayViewState::Ready {
                    date: *date,
                    free_slots: std::mem::take(free_slots),
                    selection: std::mem::take(selection),
                };
                Ok(toggled)
            }
            DayViewState::Submitting { .. } => Err(AvailabilityError::SubmissionInProgress),
            DayViewState::NoDateSelected | DayViewState::Loading { .. } => {
                Err(AvailabilityError::NoDateSelected)
            }
        }
    }

    /// Validates the selection and moves to `Submitting`.
    ///
    /// Checks, in order: something is selected, the hours are consecutive,
    /// a user is signed in, the date is not past, and on today's date the
    /// first hour has not started yet.
    pub fn begin_submit(
        &mut self,
        now: NaiveDateTime,
        user_id: Option<i64>,
    ) -> Result<PendingBooking, AvailabilityError> {
        let (date, free_slots, selection) = match &mut self.state {
            DayViewState::Ready {
                date,
                free_slots,
                selection,
            }
            | DayViewState::SubmitError {
                date,
                free_slots,
                selection,
                ..
            } => (*date, free_slots, selection),
            DayViewState::Submitting { .. } => {
                return Err(AvailabilityError::SubmissionInProgress)
            }
            _ => return Err(AvailabilityError::NoDateSelected),
        };

        let range = to_booking_range(selection)?;
        let user_id = user_id.ok_or(AvailabilityError::NotSignedIn)?;
        let today = now.date();
        if is_past_date(date, today) {
            return Err(AvailabilityError::PastDate { date });
        }
        if let Some(slot) = selection
            .first()
            .filter(|first| date == today && u32::from(first.hour()) < now.hour())
        {
            return Err(AvailabilityError::PastHour { slot });
        }

        self.state = DayViewState::Submitting {
            date,
            free_slots: std::mem::take(free_slots),
            selection: std::mem::take(selection),
        };
        Ok(PendingBooking {
            date,
            range,
            user_id,
        })
    }

    /// The booking was created: the booked hours leave the free list, the
    /// selection is cleared and a refetch token is returned.
    pub fn submit_succeeded(&mut self) -> Option<(RequestToken, NaiveDate)> {
        let DayViewState::Submitting {
            date,
            free_slots,
            selection,
        } = &mut self.state
        else {
            return None;
        };
        let date = *date;
        let free_slots = std::mem::take(free_slots)
            .into_iter()
            .filter(|slot| !selection.contains(*slot))
            .collect();
        self.state = DayViewState::Ready {
            date,
            free_slots,
            selection: Selection::new(),
        };
        Some((self.issue_token(), date))
    }

    /// The booking failed; the selection is kept so the user can retry.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if let DayViewState::Submitting {
            date,
            free_slots,
            selection,
        } = &mut self.state
        {
            self.state = DayViewState::SubmitError {
                date: *date,
                free_slots: std::mem::take(free_slots),
                selection: std::mem::take(selection),
                message: message.into(),
            };
        }
    }
}

/// `selection` if all of it is still free, else an empty selection.
fn still_free(selection: Selection, free_slots: &[Slot]) -> Selection {
    if selection.iter().all(|slot| free_slots.contains(&slot)) {
        selection
    } else {
        debug!("Selected hours were booked meanwhile, selection cleared");
        Selection::new()
    }
}
