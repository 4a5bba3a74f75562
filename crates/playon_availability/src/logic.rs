// --- File: crates/playon_availability/src/logic.rs ---
use playon_common::models::BookingRecord;
use playon_common::PlayonError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Select at least one hour")]
    EmptySelection,
    #[error("The selected hours are not consecutive")]
    NonContiguous,
    #[error("{slot} does not continue the selected hours")]
    NotAnExtension { slot: Slot },
    #[error("{slot} is in the middle of the selection; remove hours from either end")]
    InteriorRemoval { slot: Slot },
    #[error("{slot} is not available")]
    SlotUnavailable { slot: Slot },
    #[error("{date} has already passed")]
    PastDate { date: chrono::NaiveDate },
    #[error("{slot} has already started")]
    PastHour { slot: Slot },
    #[error("Invalid operating hours: {open}h to {close}h")]
    InvalidHours { open: u8, close: u8 },
    #[error("Unreadable time value: {0:?}")]
    MalformedTime(String),
    #[error("Sign in to book a court")]
    NotSignedIn,
    #[error("Pick a date first")]
    NoDateSelected,
    #[error("A booking is already being submitted")]
    SubmissionInProgress,
}

impl From<AvailabilityError> for PlayonError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::MalformedTime(_) => PlayonError::MalformedResponse(err.to_string()),
            AvailabilityError::NotSignedIn => PlayonError::AuthError(err.to_string()),
            other => PlayonError::ValidationError(other.to_string()),
        }
    }
}

pub const HOURS_PER_DAY: u8 = 24;

// --- Data Structures ---

/// One bookable hour of the day, displayed as "HH:00".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    /// Returns `None` for hours outside 0..24.
    pub fn new(hour: u8) -> Option<Slot> {
        (hour < HOURS_PER_DAY).then_some(Slot(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for Slot {
    type Err = AvailabilityError;

    /// Accepts "HH", "HH:MM" or "HH:MM:SS"; minutes are ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let hour = parse_hour(text)?;
        Slot::new(hour).ok_or_else(|| AvailabilityError::MalformedTime(text.to_string()))
    }
}

/// Opening hours of a facility for one day. `close` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingHours {
    open: u8,
    close: u8,
}

impl OperatingHours {
    /// Used when a gym publishes no hours of its own.
    pub const FALLBACK: OperatingHours = OperatingHours { open: 8, close: 23 };

    /// Requires `open < close <= 24`.
    pub fn new(open: u8, close: u8) -> Result<Self, AvailabilityError> {
        if open < close && close <= HOURS_PER_DAY {
            Ok(OperatingHours { open, close })
        } else {
            Err(AvailabilityError::InvalidHours { open, close })
        }
    }

    /// Hours from the configured schedule defaults, or `FALLBACK` if they are unusable.
    pub fn from_schedule(schedule: &playon_config::ScheduleConfig) -> Self {
        Self::new(schedule.default_open_hour, schedule.default_close_hour).unwrap_or_else(|err| {
            warn!("{} in schedule config, using {}", err, Self::FALLBACK);
            Self::FALLBACK
        })
    }

    /// Reads a gym's `hora_abertura` / `hora_fechamento`.
    ///
    /// A missing value takes the matching `defaults` hour. If the result is
    /// unreadable or not a valid range, `defaults` is used as a whole.
    pub fn for_facility(opening: Option<&str>, closing: Option<&str>, defaults: Self) -> Self {
        let open = opening.map(parse_hour).transpose();
        let close = closing.map(parse_hour).transpose();
        let hours = match (open, close) {
            (Ok(open), Ok(close)) => Self::new(
                open.unwrap_or(defaults.open),
                close.unwrap_or(defaults.close),
            ),
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        hours.unwrap_or_else(|err| {
            warn!("Facility hours rejected ({}), using {}", err, defaults);
            defaults
        })
    }

    pub fn open(&self) -> u8 {
        self.open
    }

    pub fn close(&self) -> u8 {
        self.close
    }

    /// Every slot in `[open, close)`, ascending.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        (self.open..self.close).map(Slot)
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.open, self.close)
    }
}

/// The hours an existing booking occupies: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: u8,
    pub end: u8,
}

impl BookingWindow {
    pub fn new(start: u8, end: u8) -> Self {
        BookingWindow { start, end }
    }

    /// Parses "HH:MM:SS" start and end strings.
    pub fn from_times(start: &str, end: &str) -> Result<Self, AvailabilityError> {
        Ok(BookingWindow {
            start: parse_hour(start)?,
            end: parse_hour(end)?,
        })
    }

    pub fn from_record(record: &BookingRecord) -> Result<Self, AvailabilityError> {
        Self::from_times(&record.start_time, &record.end_time)
    }

    /// A window whose end is not after its start covers nothing.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn covers(&self, slot: Slot) -> bool {
        self.start <= slot.0 && slot.0 < self.end
    }
}

/// Reads the hour from the leading digits (at most two) of "HH:MM[:SS]".
///
/// An empty string reads as hour 0.
pub fn parse_hour(text: &str) -> Result<u8, AvailabilityError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).take(2).collect();
    digits
        .parse::<u8>()
        .map_err(|_| AvailabilityError::MalformedTime(text.to_string()))
}

// --- Availability Logic ---

/// All hours in `[open, close)` not covered by any booking, ascending.
pub fn compute_free_slots(hours: OperatingHours, bookings: &[BookingWindow]) -> Vec<Slot> {
    let mut taken = [false; HOURS_PER_DAY as usize];
    for booking in bookings.iter().filter(|b| !b.is_empty()) {
        for hour in booking.start..booking.end.min(HOURS_PER_DAY) {
            taken[hour as usize] = true;
        }
    }
    hours.slots().filter(|slot| !taken[slot.0 as usize]).collect()
}

/// True if `candidate` may be added to `current`: the selection is empty, or
/// the candidate is the hour right after the latest selected one.
pub fn is_contiguous_extension(current: &Selection, candidate: Slot) -> bool {
    match current.last() {
        None => true,
        Some(last) => candidate.0 == last.0 + 1,
    }
}

/// The booking a selection stands for: `[earliest, latest + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRange {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl BookingRange {
    /// `hora_inicio` as sent to the API: "HH:00:00".
    pub fn start_time(&self) -> String {
        format!("{:02}:00:00", self.start_hour)
    }

    /// `hora_fim` as sent to the API: "HH:00".
    pub fn end_time(&self) -> String {
        format!("{:02}:00", self.end_hour)
    }

    pub fn hours(&self) -> u8 {
        self.end_hour - self.start_hour
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.start_hour <= slot.0 && slot.0 < self.end_hour
    }
}

impl fmt::Display for BookingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start_hour, self.end_hour)
    }
}

pub fn to_booking_range(selection: &Selection) -> Result<BookingRange, AvailabilityError> {
    let (first, last) = match (selection.first(), selection.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AvailabilityError::EmptySelection),
    };
    if !selection.is_contiguous() {
        return Err(AvailabilityError::NonContiguous);
    }
    Ok(BookingRange {
        start_hour: first.0,
        end_hour: last.0 + 1,
    })
}

// --- Selection ---

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Ordered, deduplicated set of selected slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    slots: BTreeSet<Slot>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    pub fn first(&self) -> Option<Slot> {
        self.slots.first().copied()
    }

    pub fn last(&self) -> Option<Slot> {
        self.slots.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.iter().copied()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Consecutive elements differ by exactly one hour.
    pub fn is_contiguous(&self) -> bool {
        self.slots
            .iter()
            .zip(self.slots.iter().skip(1))
            .all(|(a, b)| b.0 == a.0 + 1)
    }

    /// Adds or removes `slot`.
    ///
    /// Adding needs a free slot that extends the run; removing is only
    /// allowed at either end so the run never splits. A rejected toggle
    /// leaves the selection unchanged.
    pub fn toggle(&mut self, slot: Slot, free: &[Slot]) -> Result<Toggle, AvailabilityError> {
        if self.contains(slot) {
            if Some(slot) != self.first() && Some(slot) != self.last() {
                return Err(AvailabilityError::InteriorRemoval { slot });
            }
            self.slots.remove(&slot);
            return Ok(Toggle::Removed);
        }
        if !free.contains(&slot) {
            return Err(AvailabilityError::SlotUnavailable { slot });
        }
        if !is_contiguous_extension(self, slot) {
            return Err(AvailabilityError::NotAnExtension { slot });
        }
        self.slots.insert(slot);
        Ok(Toggle::Added)
    }
}

impl FromIterator<Slot> for Selection {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Selection {
            slots: iter.into_iter().collect(),
        }
    }
}
