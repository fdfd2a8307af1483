mod http;
mod sqlite;

use thiserror::Error;

use crate::models::Movie;

pub use http::HttpMovieService;
pub use sqlite::SqliteMovieService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("movie {0} not found")]
    NotFound(i64),
    #[error("movie rejected by the record service: {0}")]
    Validation(String),
    #[error("record service unavailable: {0}")]
    Network(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Record service backing the registration form.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    async fn lookup(&self, id: i64) -> Result<Movie, ServiceError>;

    /// Stores a new record. Any identifier on `movie` is ignored.
    async fn create(&self, movie: &Movie) -> Result<(), ServiceError>;

    /// Replaces the whole record identified by `movie.id`.
    async fn update(&self, movie: &Movie) -> Result<(), ServiceError>;

    async fn list(&self) -> Result<Vec<Movie>, ServiceError>;
}

fn require_id(movie: &Movie) -> Result<i64, ServiceError> {
    movie.id.ok_or_else(|| ServiceError::Validation("update without an identifier".to_string()))
}
