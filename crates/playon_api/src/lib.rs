// --- File: crates/playon_api/src/lib.rs ---
// Declare modules within this crate
pub mod client;
pub mod responses;

pub use client::PlayonClient;

// This crate talks HTTP to the PlayOn server. Everything else in the
// workspace only sees the collaborator traits it implements.
