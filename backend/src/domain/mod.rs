//! Core domain: aggregates, validation, ports, and services.
//!
//! The domain is transport and storage agnostic. Inbound adapters call the
//! driving ports ([`FilmCatalog`](ports::FilmCatalog) and friends); outbound
//! adapters implement the driven repository ports.

pub mod error;
pub mod film;
pub mod film_service;
pub mod ports;
pub mod reference_service;
pub mod user;
pub mod user_service;

pub use error::{Error, ErrorCode};
pub use film::{Film, FilmDraft, Genre, MpaRating, EARLIEST_RELEASE_DATE};
pub use film_service::FilmCatalogService;
pub use reference_service::{GenreQueryService, MpaQueryService};
pub use user::{Friendship, FriendshipStatus, User, UserDraft, ValidatedUser};
pub use user_service::UserDirectoryService;
