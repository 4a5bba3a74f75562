// --- File: crates/playon_reservations/src/degrade.rs ---
use playon_common::PlayonError;
use tracing::warn;

/// Read paths show an empty list when the server is unreachable or answers
/// garbage. Other errors still surface.
pub(crate) fn or_empty<T>(
    result: Result<Vec<T>, PlayonError>,
    what: &str,
) -> Result<Vec<T>, PlayonError> {
    match result {
        Ok(items) => Ok(items),
        Err(err) if err.degrades_to_empty() => {
            warn!("Could not load {}: {}", what, err);
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}
