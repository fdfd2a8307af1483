use std::{sync::Arc, time::Duration};

use reelbook::{
    AppState,
    config::{Backend, Config},
    db,
    service::{HttpMovieService, MovieService, SqliteMovieService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelbook=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let movies: Arc<dyn MovieService> = match config.backend {
        Backend::Sqlite => {
            let db = db::connect_and_migrate(&config.database_url).await?;
            Arc::new(SqliteMovieService::new(db))
        }
        Backend::Http => {
            let http = reqwest::Client::builder()
                .user_agent("reelbook/0.1")
                .timeout(Duration::from_secs(config.http_timeout_secs))
                .build()?;
            Arc::new(HttpMovieService::new(http, config.api_url.clone()))
        }
    };
    tracing::info!(backend = ?config.backend, "record service ready");

    let app = reelbook::router(Arc::new(AppState { movies }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
