//! Library crate for luck-center-back, exposing modules for binaries and integration tests.

/// Runtime configuration.
pub mod config;
/// Preference persistence.
pub mod dao;
/// Request, response and event payloads.
pub mod dto;
mod error;
/// HTTP routes.
pub mod routes;
/// Use cases behind the routes.
pub mod services;
/// Shared session state and the domain engines.
pub mod state;
