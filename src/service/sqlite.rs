use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use super::{MovieService, ServiceError, require_id};
use crate::{entities::movie, models::Movie};

#[derive(Clone)]
pub struct SqliteMovieService {
    db: DatabaseConnection,
}

impl SqliteMovieService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl MovieService for SqliteMovieService {
    async fn lookup(&self, id: i64) -> Result<Movie, ServiceError> {
        let row = movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        from_row(row)
    }

    async fn create(&self, movie: &Movie) -> Result<(), ServiceError> {
        let res = movie::Entity::insert(active_model(movie)).exec(&self.db).await?;
        tracing::debug!(id = res.last_insert_id, title = %movie.title, "movie inserted");
        Ok(())
    }

    async fn update(&self, movie: &Movie) -> Result<(), ServiceError> {
        let id = require_id(movie)?;

        let res = movie::Entity::update_many()
            .set(active_model(movie))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound(id));
        }
        tracing::debug!(id, "movie updated");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
        movie::Entity::find()
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }
}

fn active_model(movie: &Movie) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        title: Set(movie.title.clone()),
        photo_url: Set(movie.photo_url.clone()),
        release_date: Set(movie.release_date.to_string()),
        description: Set(movie.description.clone()),
        rating: Set(movie.rating),
        reference_url: Set(movie.reference_url.clone()),
        genre: Set(movie.genre.label().to_string()),
    }
}

fn from_row(row: movie::Model) -> Result<Movie, ServiceError> {
    let release_date = row.release_date.parse().map_err(|e: jiff::Error| {
        ServiceError::Network(format!("movie {}: stored release date: {e}", row.id))
    })?;
    let genre = row
        .genre
        .parse()
        .map_err(|e| ServiceError::Network(format!("movie {}: stored genre: {e}", row.id)))?;

    Ok(Movie {
        id: Some(row.id),
        title: row.title,
        photo_url: row.photo_url,
        release_date,
        description: row.description,
        rating: row.rating,
        reference_url: row.reference_url,
        genre,
    })
}
