// --- File: crates/playon_common/src/lib.rs ---

// Declare modules within this crate
pub mod de;        // Lenient serde helpers for API payloads
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod logging;   // Logging utilities
pub mod models;    // Wire records shared by every crate
pub mod services;  // Collaborator abstractions

// Re-export error types and utilities for easier access
pub use error::{
    PlayonError,
    Context,
    config_error,
    validation_error,
    not_found,
    malformed_response,
    network_error,
    auth_error,
    internal_error,
};

// Re-export HTTP utilities for easier access
pub use http::{
    read_json,
    read_json_list,
    client::{
        HTTP_CLIENT,
        create_client,
    },
};

// Re-export logging utilities for easier access
pub use logging::{
    init,
    init_with_level,
    init_with_file,
    log_error,
    log_result,
};

// This crate provides the pieces every PlayOn crate shares: the error type,
// tracing setup, the HTTP response helpers, the JSON records served by the
// API and the collaborator traits the client talks through.
