pub mod config;
pub mod controller;
pub mod db;
pub mod dialog;
pub mod entities;
pub mod error;
pub mod form;
pub mod models;
pub mod routes;
pub mod service;
pub mod templates;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::service::MovieService;

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieService>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/movies", get(routes::list))
        .route("/movies/new", get(routes::new_form).post(routes::create))
        .route("/movies/{id}/edit", get(routes::edit_form).post(routes::update))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
