//! Genre and MPA reference lookup services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::film::{Genre, MpaRating};
use crate::domain::ports::{
    GenreCatalog, GenreRepository, MpaCatalog, MpaRepository, ReferenceStoreError,
};
use crate::domain::Error;

fn map_store_error(error: ReferenceStoreError) -> Error {
    match error {
        ReferenceStoreError::Connection { message } => {
            Error::service_unavailable(format!("reference store unavailable: {message}"))
        }
        ReferenceStoreError::Query { message } => {
            Error::internal(format!("reference store error: {message}"))
        }
    }
}

/// Read-only genre lookups.
#[derive(Clone)]
pub struct GenreQueryService<G> {
    genres: Arc<G>,
}

impl<G> GenreQueryService<G> {
    /// Create a new service over the genre repository.
    pub fn new(genres: Arc<G>) -> Self {
        Self { genres }
    }
}

#[async_trait]
impl<G> GenreCatalog for GenreQueryService<G>
where
    G: GenreRepository,
{
    async fn list_genres(&self) -> Result<Vec<Genre>, Error> {
        self.genres.list().await.map_err(map_store_error)
    }

    async fn get_genre(&self, id: i32) -> Result<Genre, Error> {
        self.genres
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("genre with id = {id} not found")))
    }
}

/// Read-only MPA rating lookups.
#[derive(Clone)]
pub struct MpaQueryService<M> {
    ratings: Arc<M>,
}

impl<M> MpaQueryService<M> {
    /// Create a new service over the MPA repository.
    pub fn new(ratings: Arc<M>) -> Self {
        Self { ratings }
    }
}

#[async_trait]
impl<M> MpaCatalog for MpaQueryService<M>
where
    M: MpaRepository,
{
    async fn list_ratings(&self) -> Result<Vec<MpaRating>, Error> {
        self.ratings.list().await.map_err(map_store_error)
    }

    async fn get_rating(&self, id: i32) -> Result<MpaRating, Error> {
        self.ratings
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("MPA rating with id = {id} not found")))
    }
}
