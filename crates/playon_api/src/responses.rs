// --- File: crates/playon_api/src/responses.rs ---
//! Interpretation of the endpoints that do not answer with a plain record.

use playon_common::de::scalar_to_string;
use playon_common::models::{BookingRecord, User};
use playon_common::{malformed_response, not_found, PlayonError};
use serde_json::Value;

/// `registerBooking` answers `{"id": n}`, a bare `n` or `"n"`, or nothing useful.
pub fn created_booking_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Object(map) => map.get("id")?,
        other => other,
    };
    match id {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `sendEmailTokenUser` answers the code itself, either bare or under
/// `codigo`, `token` or `code`.
pub fn email_code(value: &Value) -> Result<String, PlayonError> {
    let field = match value {
        Value::Object(map) => ["codigo", "token", "code"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(scalar_to_string),
        other => scalar_to_string(other),
    };
    field
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| malformed_response("verification code missing from response"))
}

/// `registerPlayersBooking` signals success with `true` or `"true"` only.
pub fn is_confirmation(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim() == "true",
        _ => false,
    }
}

/// A user record from login or registration; without an id it is no user at all.
pub fn user(value: Value) -> Result<User, PlayonError> {
    let has_id = value
        .get("id")
        .map(|id| !id.is_null() && id.as_str().map(str::trim) != Some(""))
        .unwrap_or(false);
    if !has_id {
        return Err(malformed_response("response carries no user id"));
    }
    Ok(serde_json::from_value(value)?)
}

/// `getBookingById` answers the record, a one-element list, or null.
pub fn single_booking(value: Value, booking_id: i64) -> Result<BookingRecord, PlayonError> {
    let record = match value {
        Value::Array(items) => items.into_iter().next(),
        Value::Null => None,
        other => Some(other),
    };
    let record = record.ok_or_else(|| not_found(format!("booking {}", booking_id)))?;
    Ok(serde_json::from_value(record)?)
}
