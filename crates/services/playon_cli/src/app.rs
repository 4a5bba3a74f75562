// --- File: crates/services/playon_cli/src/app.rs ---
use playon_api::PlayonClient;
use playon_availability::{Clock, OperatingHours, SystemClock};
use playon_config::AppConfig;
use playon_common::PlayonError;
use playon_session::{AuthFlow, FileSessionStorage, SessionStore};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs, built once from the configuration.
pub struct App {
    pub client: Arc<PlayonClient>,
    pub session: Arc<SessionStore>,
    pub clock: Arc<dyn Clock>,
    pub default_hours: OperatingHours,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, PlayonError> {
        let client = Arc::new(PlayonClient::new(&config.api)?);
        let storage = FileSessionStorage::from_config(&config.session);
        debug!("Session stored in {}", storage.path().display());
        let session = Arc::new(SessionStore::load(Arc::new(storage)));
        Ok(Self {
            client,
            session,
            clock: Arc::new(SystemClock::from_config(&config.schedule)),
            default_hours: OperatingHours::from_schedule(&config.schedule),
        })
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(self.client.clone(), self.session.clone())
    }
}
