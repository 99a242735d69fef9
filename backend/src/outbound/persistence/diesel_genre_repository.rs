//! PostgreSQL-backed `GenreRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::film::Genre;
use crate::domain::ports::{GenreRepository, ReferenceStoreError};

use super::diesel_error_mapping::{map_pool_error, map_read_diesel_error};
use super::models::GenreRow;
use super::pool::{DbPool, PoolError};
use super::schema::genres;

/// Diesel-backed implementation of the `GenreRepository` port.
#[derive(Clone)]
pub struct DieselGenreRepository {
    pool: DbPool,
}

impl DieselGenreRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ReferenceStoreError {
    map_pool_error(error, |message| ReferenceStoreError::connection(message))
}

fn map_read(error: diesel::result::Error) -> ReferenceStoreError {
    map_read_diesel_error(
        error,
        |message| ReferenceStoreError::query(message),
        |message| ReferenceStoreError::connection(message),
    )
}

fn row_to_genre(row: GenreRow) -> Genre {
    Genre {
        id: row.id,
        name: row.name,
    }
}

#[async_trait]
impl GenreRepository for DieselGenreRepository {
    async fn list(&self) -> Result<Vec<Genre>, ReferenceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<GenreRow> = genres::table
            .select(GenreRow::as_select())
            .order_by(genres::id)
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        Ok(rows.into_iter().map(row_to_genre).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, ReferenceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<GenreRow> = genres::table
            .find(id)
            .select(GenreRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        Ok(row.map(row_to_genre))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ReferenceStoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        genres::table
            .filter(genres::id.eq_any(ids))
            .select(genres::id)
            .order_by(genres::id)
            .load(&mut conn)
            .await
            .map_err(map_read)
    }
}
