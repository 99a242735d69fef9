//! Film catalog domain service.
//!
//! Implements the [`FilmCatalog`] driving port: orchestrates draft
//! validation, genre/MPA reference checks, and the film repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::film::{Film, FilmDraft};
use crate::domain::ports::{
    FilmCatalog, FilmRepository, FilmStoreError, GenreRepository, MpaRepository,
    ReferenceStoreError, UserRepository, UserStoreError,
};
use crate::domain::Error;

fn map_film_store_error(error: FilmStoreError) -> Error {
    match error {
        FilmStoreError::Connection { message } => {
            Error::service_unavailable(format!("film store unavailable: {message}"))
        }
        FilmStoreError::Query { message } => {
            Error::internal(format!("film store error: {message}"))
        }
        FilmStoreError::Duplicate { message } => Error::conflict(message),
    }
}

fn map_user_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } | UserStoreError::Duplicate { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

fn map_reference_store_error(error: ReferenceStoreError) -> Error {
    match error {
        ReferenceStoreError::Connection { message } => {
            Error::service_unavailable(format!("reference store unavailable: {message}"))
        }
        ReferenceStoreError::Query { message } => {
            Error::internal(format!("reference store error: {message}"))
        }
    }
}

fn film_not_found(id: i64) -> Error {
    Error::not_found(format!("film with id = {id} not found"))
}

fn user_not_found(id: i64) -> Error {
    Error::not_found(format!("user with id = {id} not found"))
}

/// Film catalog service wiring draft validation to the repositories.
#[derive(Clone)]
pub struct FilmCatalogService<F, U, G, M> {
    films: Arc<F>,
    users: Arc<U>,
    genres: Arc<G>,
    mpa: Arc<M>,
}

impl<F, U, G, M> FilmCatalogService<F, U, G, M> {
    /// Create a new service over the film, user, and reference repositories.
    pub fn new(films: Arc<F>, users: Arc<U>, genres: Arc<G>, mpa: Arc<M>) -> Self {
        Self {
            films,
            users,
            genres,
            mpa,
        }
    }
}

impl<F, U, G, M> FilmCatalogService<F, U, G, M>
where
    F: FilmRepository,
    U: UserRepository,
    G: GenreRepository,
    M: MpaRepository,
{
    /// Check that every referenced genre id and the MPA id exist.
    ///
    /// The genre check is one batched round trip; the first missing id
    /// aborts with a validation error naming it.
    async fn check_references(&self, draft: &FilmDraft) -> Result<(), Error> {
        if !draft.genre_ids.is_empty() {
            let existing = self
                .genres
                .existing_ids(&draft.genre_ids)
                .await
                .map_err(map_reference_store_error)?;
            if let Some(missing) = draft.genre_ids.iter().find(|id| !existing.contains(id)) {
                return Err(Error::invalid_request(format!(
                    "genre with id = {missing} not found"
                ))
                .with_details(json!({ "field": "genres", "id": missing })));
            }
        }

        let mpa_exists = self
            .mpa
            .exists(draft.mpa_id)
            .await
            .map_err(map_reference_store_error)?;
        if !mpa_exists {
            return Err(Error::invalid_request(format!(
                "MPA rating with id = {} not found",
                draft.mpa_id
            ))
            .with_details(json!({ "field": "mpa", "id": draft.mpa_id })));
        }

        Ok(())
    }

    async fn require_film(&self, id: i64) -> Result<Film, Error> {
        self.films
            .find_by_id(id)
            .await
            .map_err(map_film_store_error)?
            .ok_or_else(|| film_not_found(id))
    }

    async fn require_user(&self, id: i64) -> Result<(), Error> {
        let exists = self.users.exists(id).await.map_err(map_user_store_error)?;
        if exists {
            Ok(())
        } else {
            Err(user_not_found(id))
        }
    }
}

#[async_trait]
impl<F, U, G, M> FilmCatalog for FilmCatalogService<F, U, G, M>
where
    F: FilmRepository,
    U: UserRepository,
    G: GenreRepository,
    M: MpaRepository,
{
    async fn list_films(&self) -> Result<Vec<Film>, Error> {
        self.films.list().await.map_err(map_film_store_error)
    }

    async fn get_film(&self, id: i64) -> Result<Film, Error> {
        self.require_film(id).await
    }

    async fn create_film(&self, draft: FilmDraft) -> Result<Film, Error> {
        let draft = draft
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.check_references(&draft).await?;

        let id = self
            .films
            .create(&draft)
            .await
            .map_err(map_film_store_error)?;
        info!(film_id = id, name = %draft.name, "film created");
        self.require_film(id).await
    }

    async fn update_film(&self, id: i64, draft: FilmDraft) -> Result<Film, Error> {
        let draft = draft
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.check_references(&draft).await?;

        let updated = self
            .films
            .update(id, &draft)
            .await
            .map_err(map_film_store_error)?;
        if !updated {
            return Err(film_not_found(id));
        }
        info!(film_id = id, "film updated");
        self.require_film(id).await
    }

    async fn delete_film(&self, id: i64) -> Result<(), Error> {
        let deleted = self.films.delete(id).await.map_err(map_film_store_error)?;
        if !deleted {
            return Err(film_not_found(id));
        }
        info!(film_id = id, "film deleted");
        Ok(())
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<Film, Error> {
        self.require_film(film_id).await?;
        self.require_user(user_id).await?;

        self.films
            .add_like(film_id, user_id)
            .await
            .map_err(map_film_store_error)?;
        debug!(film_id, user_id, "like recorded");
        self.require_film(film_id).await
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<Film, Error> {
        self.require_film(film_id).await?;
        self.require_user(user_id).await?;

        self.films
            .remove_like(film_id, user_id)
            .await
            .map_err(map_film_store_error)?;
        debug!(film_id, user_id, "like removed");
        self.require_film(film_id).await
    }

    async fn popular_films(
        &self,
        count: i64,
        genre_id: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<Film>, Error> {
        if count <= 0 {
            return Err(Error::invalid_request("count must be greater than 0")
                .with_details(json!({ "field": "count", "value": count })));
        }
        if let Some(year) = year {
            if !(1..=9999).contains(&year) {
                return Err(Error::invalid_request("year must be a four-digit year")
                    .with_details(json!({ "field": "year", "value": year })));
            }
        }

        self.films
            .list_popular(count, genre_id, year)
            .await
            .map_err(map_film_store_error)
    }
}

#[cfg(test)]
#[path = "film_service_tests.rs"]
mod tests;
