// --- File: crates/playon_session/src/guard.rs ---
use crate::store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

/// Where the app opens: Home when signed in, else Login.
pub fn landing_route(session: &SessionStore) -> Route {
    if session.is_authenticated() {
        Route::Home
    } else {
        Route::Login
    }
}

/// The login screen is only for signed-out users; the others go Home.
pub fn login_redirect(session: &SessionStore) -> Option<Route> {
    session.is_authenticated().then_some(Route::Home)
}
