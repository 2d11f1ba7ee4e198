//! Core library for the groundgame campaign field-operations backend.
//!
//! The `geo` module holds the pure geofence-membership math; `campaign`
//! holds the domain modules (voters, canvassing, events, geofences,
//! analytics, notifications) that the API service composes into an HTTP
//! surface.

pub mod campaign;
pub mod config;
pub mod error;
pub mod geo;
pub mod telemetry;
