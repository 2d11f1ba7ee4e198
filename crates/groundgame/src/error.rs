use crate::campaign::analytics::AnalyticsError;
use crate::campaign::canvassing::CanvassServiceError;
use crate::campaign::events::EventServiceError;
use crate::campaign::geofences::GeofenceServiceError;
use crate::campaign::voters::VoterServiceError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Voters(VoterServiceError),
    Canvassing(CanvassServiceError),
    Events(EventServiceError),
    Geofences(GeofenceServiceError),
    Analytics(AnalyticsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Voters(err) => write!(f, "voter roster error: {}", err),
            AppError::Canvassing(err) => write!(f, "canvassing error: {}", err),
            AppError::Events(err) => write!(f, "calendar error: {}", err),
            AppError::Geofences(err) => write!(f, "geofence error: {}", err),
            AppError::Analytics(err) => write!(f, "analytics error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Voters(err) => Some(err),
            AppError::Canvassing(err) => Some(err),
            AppError::Events(err) => Some(err),
            AppError::Geofences(err) => Some(err),
            AppError::Analytics(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Voters(_)
            | AppError::Canvassing(_)
            | AppError::Events(_)
            | AppError::Geofences(_)
            | AppError::Analytics(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<VoterServiceError> for AppError {
    fn from(value: VoterServiceError) -> Self {
        Self::Voters(value)
    }
}

impl From<CanvassServiceError> for AppError {
    fn from(value: CanvassServiceError) -> Self {
        Self::Canvassing(value)
    }
}

impl From<EventServiceError> for AppError {
    fn from(value: EventServiceError) -> Self {
        Self::Events(value)
    }
}

impl From<GeofenceServiceError> for AppError {
    fn from(value: GeofenceServiceError) -> Self {
        Self::Geofences(value)
    }
}

impl From<AnalyticsError> for AppError {
    fn from(value: AnalyticsError) -> Self {
        Self::Analytics(value)
    }
}
