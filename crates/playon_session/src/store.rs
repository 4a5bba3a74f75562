// --- File: crates/playon_session/src/store.rs ---
use playon_common::models::User;
use playon_common::services::SessionSource;
use playon_common::PlayonError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::storage::{decode_stored_user, SessionStorage};

/// The single owner of "who is signed in".
///
/// The user is read from storage once, when the store is built. Every change
/// is written to storage first and then published to subscribers. A
/// subscription is a `watch::Receiver`; dropping it unsubscribes.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    sender: watch::Sender<Option<User>>,
}

impl SessionStore {
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let user = match storage.load() {
            Ok(content) => content.as_deref().and_then(decode_stored_user),
            Err(err) => {
                warn!("Could not read stored session, starting signed out: {}", err);
                None
            }
        };
        if let Some(user) = &user {
            info!("Restored session of user {}", user.id);
        }
        let (sender, _) = watch::channel(user);
        Self { storage, sender }
    }

    pub fn current_user(&self) -> Option<User> {
        self.sender.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Persists `user` and makes it the current user.
    pub fn set_user(&self, user: User) -> Result<(), PlayonError> {
        let content = serde_json::to_string(&user)?;
        self.storage.save(&content)?;
        info!("User {} signed in", user.id);
        self.sender.send_replace(Some(user));
        Ok(())
    }

    /// Signs out: removes the stored user, then notifies subscribers.
    pub fn clear(&self) -> Result<(), PlayonError> {
        self.storage.clear()?;
        if let Some(previous) = self.sender.send_replace(None) {
            info!("User {} signed out", previous.id);
        }
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.sender.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl SessionSource for SessionStore {
    fn current_user(&self) -> Option<User> {
        SessionStore::current_user(self)
    }
}
