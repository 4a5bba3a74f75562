// --- File: crates/playon_session/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod guard;
pub mod storage;
pub mod store;
pub mod validation;

pub use auth::{AuthFlow, SignUpStep, SignUpWizard};
pub use guard::{landing_route, login_redirect, Route};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::SessionStore;
pub use validation::{FormError, LoginForm, RegistrationForm};
