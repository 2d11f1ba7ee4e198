//! Campaign domain modules composed by the API service.

pub mod analytics;
pub mod canvassing;
pub mod events;
pub mod geofences;
pub mod notifications;
pub(crate) mod validate;
pub mod voters;

/// Error enumeration shared by the storage traits in this module tree.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
