// --- File: crates/playon_common/src/models.rs ---

// JSON records exchanged with the PlayOn API. Field names on the wire are the
// API's (Portuguese) names; the Rust side uses English names via serde renames.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::de;

/// Wire format of booking dates (`data`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A signed-in user as returned by login/registration and kept in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(default)]
    pub status: String,
}

/// A sports facility ("ginásio").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gym {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Opening time as "HH:MM:SS", absent when the gym does not publish one
    #[serde(rename = "hora_abertura", default)]
    pub opening_time: Option<String>,
    /// Closing time as "HH:MM:SS" (exclusive)
    #[serde(rename = "hora_fechamento", default)]
    pub closing_time: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "cidade", default)]
    pub city: Option<String>,
    #[serde(rename = "uf", default)]
    pub state: Option<String>,
}

/// A bookable court ("quadra") inside a gym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "numero", default, deserialize_with = "de::opt_id")]
    pub number: Option<i64>,
    #[serde(rename = "id_ginasio", default, deserialize_with = "de::opt_id")]
    pub gym_id: Option<i64>,
}

impl Court {
    /// Name for display: the court's name, else "Quadra <number>", else "Quadra <id>".
    pub fn label(&self) -> String {
        match (&self.name, self.number) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(number)) => format!("Quadra {}", number),
            _ => format!("Quadra {}", self.id),
        }
    }
}

/// A reservation ("reserva") as listed by any booking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<i64>,
    #[serde(rename = "id_quadra", default, deserialize_with = "de::opt_id")]
    pub court_id: Option<i64>,
    /// "YYYY-MM-DD"
    #[serde(rename = "data", default)]
    pub date: String,
    /// "HH:MM:SS"
    #[serde(rename = "hora_inicio", default)]
    pub start_time: String,
    /// "HH:MM:SS", exclusive
    #[serde(rename = "hora_fim", default)]
    pub end_time: String,
    /// Total price of the reservation
    #[serde(rename = "valor", default, deserialize_with = "de::opt_decimal")]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "id_esporte", default, deserialize_with = "de::opt_id")]
    pub sport_id: Option<i64>,
    #[serde(rename = "nome_esporte", default)]
    pub sport_name: Option<String>,
    #[serde(rename = "nome_quadra", default)]
    pub court_name: Option<String>,
    #[serde(rename = "nome_ginasio", default)]
    pub gym_name: Option<String>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "privada", default, deserialize_with = "de::flag")]
    pub private: bool,
}

impl BookingRecord {
    /// The booking day, if `data` is a valid date.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// The moment the booking ends, if both `data` and `hora_fim` parse.
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        let day = self.day()?;
        let time = parse_time_of_day(&self.end_time)?;
        Some(day.and_time(time))
    }
}

/// Parses "HH:MM" or "HH:MM:SS".
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

/// Shortens "HH:MM:SS" to "HH:MM" for display.
pub fn short_time(text: &str) -> &str {
    text.get(..5).unwrap_or(text)
}

/// A participant of a reservation ("jogador").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
}

/// A sport ("esporte") that can be played on a court.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sport {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(rename = "nome", default)]
    pub name: String,
}

/// Body of `registerBooking`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    #[serde(rename = "id_usuario")]
    pub user_id: i64,
    #[serde(rename = "id_quadra")]
    pub court_id: i64,
    /// "YYYY-MM-DD"
    #[serde(rename = "data")]
    pub date: String,
    /// "HH:00:00"
    #[serde(rename = "hora_inicio")]
    pub start_time: String,
    /// "HH:00"
    #[serde(rename = "hora_fim")]
    pub end_time: String,
    #[serde(rename = "observacoes")]
    pub notes: String,
    /// 0 = open to other players, 1 = private
    #[serde(rename = "privada")]
    pub private: u8,
    #[serde(rename = "id_esporte")]
    pub sport_id: i64,
}

/// Body of `registerPlayersBooking` / `deletePlayersBooking`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Participation {
    #[serde(rename = "id_usuario")]
    pub user_id: i64,
    #[serde(rename = "id_reserva")]
    pub booking_id: i64,
}

/// Body of `registerUser`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

/// Filters for `getBookingAll`. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSearch {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub sport_id: Option<i64>,
    pub court_id: Option<i64>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl BookingSearch {
    /// Form fields in the order the API documents them, skipping blanks.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_trimmed(&mut fields, "search", &self.search);
        if let Some(date) = self.date {
            fields.push(("data", date.format(DATE_FORMAT).to_string()));
        }
        push_trimmed(&mut fields, "status", &self.status);
        if let Some(sport_id) = self.sport_id {
            fields.push(("id_esporte", sport_id.to_string()));
        }
        if let Some(court_id) = self.court_id {
            fields.push(("id_quadra", court_id.to_string()));
        }
        push_trimmed(&mut fields, "cidade", &self.city);
        push_trimmed(&mut fields, "uf", &self.state);
        fields
    }
}

fn push_trimmed(fields: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(text) = value.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        fields.push((key, text.to_string()));
    }
}
