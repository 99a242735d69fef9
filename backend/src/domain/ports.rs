//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to reach the relational
//! store; each trait exposes a strongly typed error so adapters map their
//! failures into predictable variants. Driving ports are the use-case
//! contracts consumed by inbound adapters, returning the transport-agnostic
//! [`Error`](crate::domain::Error).

use async_trait::async_trait;
use thiserror::Error as ThisError;

use super::film::{Film, FilmDraft, Genre, MpaRating};
use super::user::{FriendshipStatus, User, ValidatedUser};
use super::Error;

/// Persistence errors raised by [`FilmRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum FilmStoreError {
    /// Store connection could not be established.
    #[error("film store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("film store query failed: {message}")]
    Query { message: String },
    /// A store uniqueness constraint fired (e.g. a duplicate like row).
    #[error("film store rejected a duplicate row: {message}")]
    Duplicate { message: String },
}

impl FilmStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// A store uniqueness constraint fired (e.g. a duplicate friendship edge).
    #[error("user store rejected a duplicate row: {message}")]
    Duplicate { message: String },
}

impl UserStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by the reference-data lookups.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ReferenceStoreError {
    /// Store connection could not be established.
    #[error("reference store connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("reference store query failed: {message}")]
    Query { message: String },
}

impl ReferenceStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for film aggregates.
///
/// Reads return films with their genre and like associations already
/// merged; adapters batch-fetch the association tables keyed by the
/// returned film ids rather than issuing one query per film.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Fetch every film.
    async fn list(&self) -> Result<Vec<Film>, FilmStoreError>;

    /// Fetch one film by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, FilmStoreError>;

    /// Insert the film row plus one association row per genre id and
    /// return the generated film id.
    async fn create(&self, draft: &FilmDraft) -> Result<i64, FilmStoreError>;

    /// Replace the scalar columns and the genre associations. Returns
    /// `false` when no film with this id exists.
    async fn update(&self, id: i64, draft: &FilmDraft) -> Result<bool, FilmStoreError>;

    /// Delete the film row; association rows cascade. Returns `false` when
    /// no film with this id exists.
    async fn delete(&self, id: i64) -> Result<bool, FilmStoreError>;

    /// Record a like. The store uniqueness constraint rejects duplicates
    /// with [`FilmStoreError::Duplicate`].
    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), FilmStoreError>;

    /// Remove a like. Returns `false` when no such like row existed.
    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<bool, FilmStoreError>;

    /// Films ordered by descending like count (ties broken by ascending
    /// film id), optionally filtered by genre id and release year, limited
    /// to `limit` rows.
    async fn list_popular(
        &self,
        limit: i64,
        genre_id: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<Film>, FilmStoreError>;
}

/// Persistence port for user aggregates and friendship edges.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user.
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch one user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError>;

    /// Cheap existence probe used by like and friendship checks.
    async fn exists(&self, id: i64) -> Result<bool, UserStoreError>;

    /// Insert the user row and return the generated id.
    async fn create(&self, user: &ValidatedUser) -> Result<i64, UserStoreError>;

    /// Replace the scalar columns. Returns `false` when no user with this
    /// id exists.
    async fn update(&self, id: i64, user: &ValidatedUser) -> Result<bool, UserStoreError>;

    /// Delete the user row; friendship and like rows cascade. Returns
    /// `false` when no user with this id exists.
    async fn delete(&self, id: i64) -> Result<bool, UserStoreError>;

    /// Insert a directed friendship edge. The store uniqueness constraint
    /// rejects duplicates with [`UserStoreError::Duplicate`].
    async fn add_friend(
        &self,
        user_id: i64,
        friend_id: i64,
        status: FriendshipStatus,
    ) -> Result<(), UserStoreError>;

    /// Remove a directed friendship edge. Returns `false` when no such
    /// edge existed.
    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<bool, UserStoreError>;

    /// Users referenced as the friend side of edges owned by `user_id`.
    async fn list_friends(&self, user_id: i64) -> Result<Vec<User>, UserStoreError>;

    /// Users in the intersection of both sides' friend sets, where a
    /// friend set is the union of outgoing and incoming edges.
    async fn list_common_friends(&self, id: i64, other_id: i64)
        -> Result<Vec<User>, UserStoreError>;
}

/// Read-only persistence port for genre reference data.
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Fetch every genre, ordered by id.
    async fn list(&self) -> Result<Vec<Genre>, ReferenceStoreError>;

    /// Fetch one genre by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, ReferenceStoreError>;

    /// Which of the given ids exist, resolved in one round trip.
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ReferenceStoreError>;
}

/// Read-only persistence port for MPA rating reference data.
#[async_trait]
pub trait MpaRepository: Send + Sync {
    /// Fetch every rating, ordered by id.
    async fn list(&self) -> Result<Vec<MpaRating>, ReferenceStoreError>;

    /// Fetch one rating by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<MpaRating>, ReferenceStoreError>;

    /// Cheap existence probe used by film validation.
    async fn exists(&self, id: i32) -> Result<bool, ReferenceStoreError>;
}

/// Driving port for the film catalog use cases.
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    /// All films with associations merged.
    async fn list_films(&self) -> Result<Vec<Film>, Error>;

    /// One film; `not_found` when the id is absent.
    async fn get_film(&self, id: i64) -> Result<Film, Error>;

    /// Validate and store a new film, returning it with the id assigned.
    async fn create_film(&self, draft: FilmDraft) -> Result<Film, Error>;

    /// Full replace of scalar fields and genre associations.
    async fn update_film(&self, id: i64, draft: FilmDraft) -> Result<Film, Error>;

    /// Delete a film and its association rows.
    async fn delete_film(&self, id: i64) -> Result<(), Error>;

    /// Record a like and return the refreshed film.
    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<Film, Error>;

    /// Remove a like and return the refreshed film.
    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<Film, Error>;

    /// Top `count` films by like count with optional genre/year filters.
    async fn popular_films(
        &self,
        count: i64,
        genre_id: Option<i32>,
        year: Option<i32>,
    ) -> Result<Vec<Film>, Error>;
}

/// Driving port for the user directory use cases.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All users with friendship edges merged.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user; `not_found` when the id is absent.
    async fn get_user(&self, id: i64) -> Result<User, Error>;

    /// Validate and store a new user, returning it with the id assigned.
    async fn create_user(&self, draft: crate::domain::UserDraft) -> Result<User, Error>;

    /// Full replace of scalar fields.
    async fn update_user(&self, id: i64, draft: crate::domain::UserDraft) -> Result<User, Error>;

    /// Delete a user and the rows it owns.
    async fn delete_user(&self, id: i64) -> Result<(), Error>;

    /// Insert an unconfirmed friendship edge and return the befriended user.
    async fn add_friend(&self, id: i64, friend_id: i64) -> Result<User, Error>;

    /// Remove a friendship edge.
    async fn remove_friend(&self, id: i64, friend_id: i64) -> Result<(), Error>;

    /// Users this user has befriended.
    async fn friends_of(&self, id: i64) -> Result<Vec<User>, Error>;

    /// Users befriended by (or befriending) both sides.
    async fn common_friends(&self, id: i64, other_id: i64) -> Result<Vec<User>, Error>;
}

/// Driving port for genre reference lookups.
#[async_trait]
pub trait GenreCatalog: Send + Sync {
    /// All genres.
    async fn list_genres(&self) -> Result<Vec<Genre>, Error>;

    /// One genre; `not_found` when the id is absent.
    async fn get_genre(&self, id: i32) -> Result<Genre, Error>;
}

/// Driving port for MPA rating reference lookups.
#[async_trait]
pub trait MpaCatalog: Send + Sync {
    /// All ratings.
    async fn list_ratings(&self) -> Result<Vec<MpaRating>, Error>;

    /// One rating; `not_found` when the id is absent.
    async fn get_rating(&self, id: i32) -> Result<MpaRating, Error>;
}
