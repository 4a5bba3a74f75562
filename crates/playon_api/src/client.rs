//! Client for the PlayOn REST API.
//!
//! `PlayonClient` implements every collaborator trait of
//! `playon_common::services` against the server. Endpoint paths are relative
//! to `api.base_url`. The API mixes transports: reads are mostly GET with
//! query strings, login-style calls are form-encoded POSTs and writes are
//! JSON PUT/DELETE bodies.

use chrono::NaiveDate;
use playon_common::models::{
    BookingRecord, BookingSearch, Court, Gym, NewBooking, Participation, Player, Registration,
    Sport, User, DATE_FORMAT,
};
use playon_common::services::{
    AuthService, BookingCreator, BookingDirectory, BoxFuture, CourtDirectory, FacilityDirectory,
    ParticipantService,
};
use playon_common::http::client::DEFAULT_TIMEOUT_SECS;
use playon_common::{
    config_error, create_client, network_error, read_json, read_json_list, PlayonError,
    HTTP_CLIENT,
};
use playon_config::ApiConfig;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::responses;

pub struct PlayonClient {
    /// HTTP client shared by every request
    client: Client,

    /// API root without a trailing slash
    base_url: String,
}

impl PlayonClient {
    /// Builds a client with the configured timeout. The shared
    /// `HTTP_CLIENT` is reused when the timeout is the default one.
    pub fn new(config: &ApiConfig) -> Result<Self, PlayonError> {
        if config.timeout_secs == DEFAULT_TIMEOUT_SECS {
            return Ok(Self::with_client(HTTP_CLIENT.clone(), &config.base_url));
        }
        let client = create_client(config.timeout_secs, true)
            .map_err(|err| config_error(format!("cannot build HTTP client: {}", err)))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Uses an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlayonError> {
        let response = self.request(Method::GET, endpoint).query(query).send().await?;
        read_json(response).await
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, PlayonError> {
        let response = self.request(Method::GET, endpoint).query(query).send().await?;
        read_json_list(response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<T, PlayonError> {
        let response = self.request(Method::POST, endpoint).form(form).send().await?;
        read_json(response).await
    }

    async fn post_form_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<Vec<T>, PlayonError> {
        let response = self.request(Method::POST, endpoint).form(form).send().await?;
        read_json_list(response).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, PlayonError> {
        let response = self.request(method, endpoint).json(body).send().await?;
        read_json(response).await
    }

    // --- Facilities ---

    async fn fetch_gyms(&self) -> Result<Vec<Gym>, PlayonError> {
        self.post_form_list("load-gym-all", &[]).await
    }

    async fn fetch_sports(&self, court_id: i64) -> Result<Vec<Sport>, PlayonError> {
        self.get_list("getSportsByGym", &[("id", court_id.to_string())])
            .await
    }

    async fn fetch_courts(&self, gym_id: i64) -> Result<Vec<Court>, PlayonError> {
        self.get_list("getCourtByGym", &[("id", gym_id.to_string())])
            .await
    }

    // --- Bookings ---

    async fn fetch_bookings_for_day(
        &self,
        court_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<BookingRecord>, PlayonError> {
        let query = [
            ("gym", court_id.to_string()),
            ("date", date.format(DATE_FORMAT).to_string()),
        ];
        let records: Vec<BookingRecord> = self.get_list("getBookingByDate", &query).await?;
        // The endpoint may answer with other courts' bookings as well. Records
        // without a court id are kept: counting an unknown booking as taken
        // only hides a free hour, dropping it could offer a booked one.
        let total = records.len();
        let own: Vec<BookingRecord> = records
            .into_iter()
            .filter(|record| record.court_id.map_or(true, |id| id == court_id))
            .collect();
        if own.len() != total {
            debug!(
                "Dropped {} bookings of other courts for court {}",
                total - own.len(),
                court_id
            );
        }
        Ok(own)
    }

    async fn fetch_booking(&self, booking_id: i64) -> Result<BookingRecord, PlayonError> {
        let value: Value = self
            .get("getBookingById", &[("id", booking_id.to_string())])
            .await?;
        responses::single_booking(value, booking_id)
    }

    async fn fetch_user_bookings(&self, user_id: i64) -> Result<Vec<BookingRecord>, PlayonError> {
        self.get_list("getBookingByUserId", &[("id", user_id.to_string())])
            .await
    }

    async fn fetch_search(
        &self,
        form: Vec<(&'static str, String)>,
    ) -> Result<Vec<BookingRecord>, PlayonError> {
        self.post_form_list("getBookingAll", &form).await
    }

    async fn register_booking(&self, booking: NewBooking) -> Result<Option<i64>, PlayonError> {
        let value = self
            .send_json(Method::PUT, "registerBooking", &booking)
            .await?;
        let id = responses::created_booking_id(&value);
        match id {
            Some(id) => info!("Created booking {} on court {}", id, booking.court_id),
            None => warn!(
                "registerBooking answered without a booking id: {}",
                value
            ),
        }
        Ok(id)
    }

    // --- Participants ---

    async fn fetch_players(&self, booking_id: i64) -> Result<Vec<Player>, PlayonError> {
        self.get_list("getPlayersBookingById", &[("id", booking_id.to_string())])
            .await
    }

    async fn join_booking(&self, participation: Participation) -> Result<bool, PlayonError> {
        let value = self
            .send_json(Method::PUT, "registerPlayersBooking", &participation)
            .await?;
        let accepted = responses::is_confirmation(&value);
        if !accepted {
            warn!(
                "registerPlayersBooking refused user {} for booking {}: {}",
                participation.user_id, participation.booking_id, value
            );
        }
        Ok(accepted)
    }

    async fn leave_booking(&self, participation: Participation) -> Result<(), PlayonError> {
        let response = self
            .request(Method::DELETE, "deletePlayersBooking")
            .json(&participation)
            .send()
            .await?;
        // Only the status matters; the body is not always JSON
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(network_error(format!("HTTP {}: {}", status.as_u16(), body)));
        }
        Ok(())
    }

    // --- Accounts ---

    async fn start_session(&self, email: String, password: String) -> Result<User, PlayonError> {
        let value: Value = self
            .post_form("startSessionUser", &[("email", email), ("senha", password)])
            .await?;
        responses::user(value)
    }

    async fn request_email_code(&self, email: String) -> Result<String, PlayonError> {
        let value: Value = self
            .post_form("sendEmailTokenUser", &[("email", email)])
            .await?;
        responses::email_code(&value)
    }

    async fn register_user(&self, registration: Registration) -> Result<User, PlayonError> {
        let value = self
            .send_json(Method::PUT, "registerUser", &registration)
            .await?;
        responses::user(value)
    }
}

impl FacilityDirectory for PlayonClient {
    fn list_gyms(&self) -> BoxFuture<'_, Vec<Gym>> {
        Box::pin(self.fetch_gyms())
    }

    fn sports_for_court(&self, court_id: i64) -> BoxFuture<'_, Vec<Sport>> {
        Box::pin(self.fetch_sports(court_id))
    }
}

impl CourtDirectory for PlayonClient {
    fn courts_for_gym(&self, gym_id: i64) -> BoxFuture<'_, Vec<Court>> {
        Box::pin(self.fetch_courts(gym_id))
    }
}

impl BookingDirectory for PlayonClient {
    fn bookings_for_day(
        &self,
        court_id: i64,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<BookingRecord>> {
        Box::pin(self.fetch_bookings_for_day(court_id, date))
    }

    fn booking_by_id(&self, booking_id: i64) -> BoxFuture<'_, BookingRecord> {
        Box::pin(self.fetch_booking(booking_id))
    }

    fn bookings_for_user(&self, user_id: i64) -> BoxFuture<'_, Vec<BookingRecord>> {
        Box::pin(self.fetch_user_bookings(user_id))
    }

    fn search_bookings(&self, search: &BookingSearch) -> BoxFuture<'_, Vec<BookingRecord>> {
        Box::pin(self.fetch_search(search.form_fields()))
    }
}

impl BookingCreator for PlayonClient {
    fn create_booking(&self, booking: NewBooking) -> BoxFuture<'_, Option<i64>> {
        Box::pin(self.register_booking(booking))
    }
}

impl ParticipantService for PlayonClient {
    fn players(&self, booking_id: i64) -> BoxFuture<'_, Vec<Player>> {
        Box::pin(self.fetch_players(booking_id))
    }

    fn join(&self, booking_id: i64, user_id: i64) -> BoxFuture<'_, bool> {
        Box::pin(self.join_booking(Participation {
            user_id,
            booking_id,
        }))
    }

    fn leave(&self, booking_id: i64, user_id: i64) -> BoxFuture<'_, ()> {
        Box::pin(self.leave_booking(Participation {
            user_id,
            booking_id,
        }))
    }
}

impl AuthService for PlayonClient {
    fn login(&self, email: &str, password: &str) -> BoxFuture<'_, User> {
        Box::pin(self.start_session(email.trim().to_string(), password.to_string()))
    }

    fn send_email_code(&self, email: &str) -> BoxFuture<'_, String> {
        Box::pin(self.request_email_code(email.trim().to_string()))
    }

    fn register(&self, registration: Registration) -> BoxFuture<'_, User> {
        Box::pin(self.register_user(registration))
    }
}
