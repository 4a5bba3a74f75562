// --- File: crates/playon_reservations/src/detail.rs ---
use chrono::NaiveDateTime;
use playon_common::models::{BookingRecord, Player, User};
use playon_common::services::{BookingDirectory, ParticipantService, SessionSource};
use playon_common::{auth_error, PlayonError};
use std::sync::Arc;
use tracing::{error, info};

use crate::degrade::or_empty;

/// One reservation with its players, plus joining and leaving it.
pub struct ReservationDetail {
    booking: BookingRecord,
    booking_id: i64,
    players: Vec<Player>,
    participants: Arc<dyn ParticipantService>,
    session: Arc<dyn SessionSource>,
}

impl ReservationDetail {
    pub async fn load(
        booking_id: i64,
        bookings: &dyn BookingDirectory,
        participants: Arc<dyn ParticipantService>,
        session: Arc<dyn SessionSource>,
    ) -> Result<Self, PlayonError> {
        let (booking, players) = futures::join!(
            bookings.booking_by_id(booking_id),
            participants.players(booking_id)
        );
        let booking = booking?;
        let players = or_empty(players, &format!("players of reservation {}", booking_id))?;
        Ok(Self {
            booking,
            booking_id,
            players,
            participants,
            session,
        })
    }

    pub fn booking(&self) -> &BookingRecord {
        &self.booking
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_participant(&self, user: &User) -> bool {
        self.players.iter().any(|player| player.id == user.id)
    }

    /// The reservation price split evenly between its players.
    pub fn cost_per_player(&self) -> f64 {
        match self.booking.price {
            Some(price) if !self.players.is_empty() => price / self.players.len() as f64,
            _ => 0.0,
        }
    }

    /// False while the end time is unknown.
    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        self.booking.ends_at().is_some_and(|end| end < now)
    }

    /// Adds the signed-in user to the players. Returns whether the server
    /// accepted; the player list is reloaded either way.
    pub async fn join(&mut self) -> Result<bool, PlayonError> {
        let user = self.signed_in()?;
        let joined = self
            .participants
            .join(self.booking_id, user.id)
            .await
            .inspect_err(|err| {
                error!("User {} could not join reservation {}: {}", user.id, self.booking_id, err)
            })?;
        if joined {
            info!("User {} joined reservation {}", user.id, self.booking_id);
        }
        self.reload_players().await?;
        Ok(joined)
    }

    pub async fn leave(&mut self) -> Result<(), PlayonError> {
        let user = self.signed_in()?;
        self.participants
            .leave(self.booking_id, user.id)
            .await
            .inspect_err(|err| {
                error!("User {} could not leave reservation {}: {}", user.id, self.booking_id, err)
            })?;
        info!("User {} left reservation {}", user.id, self.booking_id);
        self.reload_players().await
    }

    fn signed_in(&self) -> Result<User, PlayonError> {
        self.session
            .current_user()
            .ok_or_else(|| auth_error("Sign in to take part in a reservation"))
    }

    async fn reload_players(&mut self) -> Result<(), PlayonError> {
        self.players = or_empty(
            self.participants.players(self.booking_id).await,
            &format!("players of reservation {}", self.booking_id),
        )?;
        Ok(())
    }
}
