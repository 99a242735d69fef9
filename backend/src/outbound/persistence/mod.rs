//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain aggregates.
//! - **Internal models**: row structs (`models.rs`) and the table DSL
//!   (`schema.rs`) never leak to the domain layer.
//! - **Batched association loads**: film genres, likes, and friendship edges
//!   are fetched keyed by the parent ids rather than per row.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to the
//!   store error enums the ports declare.

mod diesel_error_mapping;
mod diesel_film_repository;
mod diesel_genre_repository;
mod diesel_mpa_repository;
mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_film_repository::DieselFilmRepository;
pub use diesel_genre_repository::DieselGenreRepository;
pub use diesel_mpa_repository::DieselMpaRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
