// --- File: crates/playon_common/src/http.rs ---
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::PlayonError;

// Include the client module
pub mod client;

/// Reads a response body as JSON.
///
/// A non-success status becomes `NetworkError("HTTP <status>: <body>")` and
/// a body that is not the expected JSON becomes `MalformedResponse`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PlayonError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;
    debug!("{} answered {} with {} bytes", url, status, body.len());
    decode_body(status, &body)
}

/// Reads a JSON list; a `null` or empty body is an empty list.
pub async fn read_json_list<T: DeserializeOwned>(
    response: Response,
) -> Result<Vec<T>, PlayonError> {
    let list: Option<Vec<T>> = read_json(response).await?;
    Ok(list.unwrap_or_default())
}

/// Decodes an already-read body. Split out from `read_json` so it can be
/// tested without a server.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, PlayonError> {
    if !status.is_success() {
        return Err(PlayonError::NetworkError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body
        )));
    }

    // An empty body is treated like JSON null so Option/list targets still work
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text)
        .map_err(|err| PlayonError::MalformedResponse(format!("response is not valid JSON: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_decode_success() {
        let item: Item = decode_body(StatusCode::OK, r#"{"id": 7}"#).unwrap();
        assert_eq!(item, Item { id: 7 });
    }

    #[test]
    fn test_non_success_status_is_network_error() {
        let err = decode_body::<Item>(StatusCode::INTERNAL_SERVER_ERROR, "oops").unwrap_err();
        match err {
            PlayonError::NetworkError(message) => assert_eq!(message, "HTTP 500: oops"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = decode_body::<Item>(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, PlayonError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let list: Option<Vec<Item>> = decode_body(StatusCode::OK, "").unwrap();
        assert!(list.is_none());
        let list: Option<Vec<Item>> = decode_body(StatusCode::OK, "null").unwrap();
        assert!(list.is_none());
    }
}
