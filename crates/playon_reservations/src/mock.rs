// --- File: crates/playon_reservations/src/mock.rs ---

// In-memory collaborators for the reservation tests.

use chrono::NaiveDate;
use playon_common::models::{BookingRecord, BookingSearch, Court, Gym, Player, Sport, User};
use playon_common::services::{
    BookingDirectory, BoxFuture, CourtDirectory, FacilityDirectory, ParticipantService,
    SessionSource,
};
use playon_common::{network_error, not_found, PlayonError};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn gym(id: i64, name: &str) -> Gym {
    Gym {
        id,
        name: name.to_string(),
        opening_time: None,
        closing_time: None,
        address: None,
        city: None,
        state: None,
    }
}

pub fn court(id: i64, gym_id: i64) -> Court {
    Court {
        id,
        name: None,
        number: Some(id),
        gym_id: Some(gym_id),
    }
}

pub fn booking(id: i64, sport: Option<(i64, &str)>) -> BookingRecord {
    BookingRecord {
        id: Some(id),
        court_id: Some(3),
        date: "2026-10-20".to_string(),
        start_time: "18:00:00".to_string(),
        end_time: "20:00:00".to_string(),
        price: Some(120.0),
        status: Some("aberta".to_string()),
        sport_id: sport.map(|(id, _)| id),
        sport_name: sport.map(|(_, name)| name.to_string()),
        court_name: None,
        gym_name: None,
        notes: None,
        private: false,
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        phone: String::new(),
        status: String::new(),
    }
}

#[derive(Default)]
pub struct MockFacilities {
    pub gyms: Vec<Gym>,
    pub sports: HashMap<i64, Vec<Sport>>,
    pub failing: bool,
}

impl FacilityDirectory for MockFacilities {
    fn list_gyms(&self) -> BoxFuture<'_, Vec<Gym>> {
        let result = if self.failing {
            Err(network_error("HTTP 500: down"))
        } else {
            Ok(self.gyms.clone())
        };
        Box::pin(async move { result })
    }

    fn sports_for_court(&self, court_id: i64) -> BoxFuture<'_, Vec<Sport>> {
        let sports = self.sports.get(&court_id).cloned().unwrap_or_default();
        Box::pin(async move { Ok(sports) })
    }
}

/// Courts per gym; gyms listed in `failing` answer with a network error.
#[derive(Default)]
pub struct MockCourts {
    pub courts: HashMap<i64, Vec<Court>>,
    pub failing: Vec<i64>,
    pub calls: Mutex<Vec<i64>>,
}

impl CourtDirectory for MockCourts {
    fn courts_for_gym(&self, gym_id: i64) -> BoxFuture<'_, Vec<Court>> {
        self.calls.lock().unwrap().push(gym_id);
        let result = if self.failing.contains(&gym_id) {
            Err(network_error(format!("HTTP 502: gym {}", gym_id)))
        } else {
            Ok(self.courts.get(&gym_id).cloned().unwrap_or_default())
        };
        Box::pin(async move { result })
    }
}

#[derive(Default)]
pub struct MockBookings {
    pub bookings: Vec<BookingRecord>,
    pub by_user: HashMap<i64, Vec<BookingRecord>>,
    pub searches: Mutex<Vec<BookingSearch>>,
    pub failing: bool,
}

impl MockBookings {
    fn failure<T>(&self) -> Option<Result<T, PlayonError>> {
        self.failing.then(|| Err(network_error("HTTP 504: timeout")))
    }
}

impl BookingDirectory for MockBookings {
    fn bookings_for_day(&self, court_id: i64, date: NaiveDate) -> BoxFuture<'_, Vec<BookingRecord>> {
        let day = date.format("%Y-%m-%d").to_string();
        let result = self.failure().unwrap_or_else(|| {
            Ok(self
                .bookings
                .iter()
                .filter(|b| b.court_id == Some(court_id) && b.date == day)
                .cloned()
                .collect())
        });
        Box::pin(async move { result })
    }

    fn booking_by_id(&self, booking_id: i64) -> BoxFuture<'_, BookingRecord> {
        let result = self.failure().unwrap_or_else(|| {
            self.bookings
                .iter()
                .find(|b| b.id == Some(booking_id))
                .cloned()
                .ok_or_else(|| not_found(format!("reservation {}", booking_id)))
        });
        Box::pin(async move { result })
    }

    fn bookings_for_user(&self, user_id: i64) -> BoxFuture<'_, Vec<BookingRecord>> {
        let result = self
            .failure()
            .unwrap_or_else(|| Ok(self.by_user.get(&user_id).cloned().unwrap_or_default()));
        Box::pin(async move { result })
    }

    /// Only the sport filter is applied.
    fn search_bookings(&self, search: &BookingSearch) -> BoxFuture<'_, Vec<BookingRecord>> {
        self.searches.lock().unwrap().push(search.clone());
        let sport_id = search.sport_id;
        let result = self.failure().unwrap_or_else(|| {
            Ok(self
                .bookings
                .iter()
                .filter(|b| sport_id.is_none() || b.sport_id == sport_id)
                .cloned()
                .collect())
        });
        Box::pin(async move { result })
    }
}

/// Players per reservation. `join` succeeds unless `reject_joins` is set.
#[derive(Default)]
pub struct MockParticipants {
    pub players: Mutex<HashMap<i64, Vec<Player>>>,
    pub reject_joins: bool,
    pub player_reads: Mutex<usize>,
}

impl ParticipantService for MockParticipants {
    fn players(&self, booking_id: i64) -> BoxFuture<'_, Vec<Player>> {
        *self.player_reads.lock().unwrap() += 1;
        let players = self
            .players
            .lock()
            .unwrap()
            .get(&booking_id)
            .cloned()
            .unwrap_or_default();
        Box::pin(async move { Ok(players) })
    }

    fn join(&self, booking_id: i64, user_id: i64) -> BoxFuture<'_, bool> {
        if !self.reject_joins {
            self.players
                .lock()
                .unwrap()
                .entry(booking_id)
                .or_default()
                .push(Player { id: user_id, name: format!("User {}", user_id) });
        }
        let joined = !self.reject_joins;
        Box::pin(async move { Ok(joined) })
    }

    fn leave(&self, booking_id: i64, user_id: i64) -> BoxFuture<'_, ()> {
        if let Some(players) = self.players.lock().unwrap().get_mut(&booking_id) {
            players.retain(|p| p.id != user_id);
        }
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
pub struct MockSession {
    pub user: Option<User>,
}

impl SessionSource for MockSession {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}
