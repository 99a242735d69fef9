//! PostgreSQL-backed `MpaRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::film::MpaRating;
use crate::domain::ports::{MpaRepository, ReferenceStoreError};

use super::diesel_error_mapping::{map_pool_error, map_read_diesel_error};
use super::models::MpaRow;
use super::pool::{DbPool, PoolError};
use super::schema::mpa_ratings;

/// Diesel-backed implementation of the `MpaRepository` port.
#[derive(Clone)]
pub struct DieselMpaRepository {
    pool: DbPool,
}

impl DieselMpaRepository {
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

fn row_to_rating(row: MpaRow) -> MpaRating {
    MpaRating {
        id: row.id,
        name: row.name,
    }
}

#[async_trait]
impl MpaRepository for DieselMpaRepository {
    async fn list(&self) -> Result<Vec<MpaRating>, ReferenceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<MpaRow> = mpa_ratings::table
            .select(MpaRow::as_select())
            .order_by(mpa_ratings::id)
            .load(&mut conn)
            .await
            .map_err(map_read)?;

        Ok(rows.into_iter().map(row_to_rating).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MpaRating>, ReferenceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<MpaRow> = mpa_ratings::table
            .find(id)
            .select(MpaRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read)?;

        Ok(row.map(row_to_rating))
    }

    async fn exists(&self, id: i32) -> Result<bool, ReferenceStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(diesel::dsl::exists(mpa_ratings::table.find(id)))
            .get_result(&mut conn)
            .await
            .map_err(map_read)
    }
}
