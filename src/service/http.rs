use reqwest::{Response, StatusCode};

use super::{MovieService, ServiceError, require_id};
use crate::models::Movie;

/// JSON REST client for a remote movie backend exposing `/movies`.
#[derive(Clone)]
pub struct HttpMovieService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMovieService {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/movies{}", self.base_url, path)
    }
}

async fn check(resp: Response, id: Option<i64>) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => ServiceError::NotFound(id),
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            ServiceError::Validation(body)
        }
        _ => ServiceError::Network(format!("{status}: {body}")),
    })
}

#[async_trait::async_trait]
impl MovieService for HttpMovieService {
    async fn lookup(&self, id: i64) -> Result<Movie, ServiceError> {
        tracing::debug!(id, "GET movie");
        let resp = self.http.get(self.url(&format!("/{id}"))).send().await?;
        let mut movie: Movie = check(resp, Some(id)).await?.json().await?;
        movie.id = movie.id.or(Some(id));
        Ok(movie)
    }

    async fn create(&self, movie: &Movie) -> Result<(), ServiceError> {
        tracing::debug!(title = %movie.title, "POST movie");
        let body = Movie { id: None, ..movie.clone() };
        let resp = self.http.post(self.url("")).json(&body).send().await?;
        check(resp, None).await?;
        Ok(())
    }

    async fn update(&self, movie: &Movie) -> Result<(), ServiceError> {
        let id = require_id(movie)?;
        tracing::debug!(id, "PUT movie");
        let resp = self.http.put(self.url(&format!("/{id}"))).json(movie).send().await?;
        check(resp, Some(id)).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
        let resp = self.http.get(self.url("")).send().await?;
        Ok(check(resp, None).await?.json().await?)
    }
}
