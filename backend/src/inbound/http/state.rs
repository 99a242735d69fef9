//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FilmCatalog, GenreCatalog, MpaCatalog, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub films: Arc<dyn FilmCatalog>,
    pub users: Arc<dyn UserDirectory>,
    pub genres: Arc<dyn GenreCatalog>,
    pub mpa: Arc<dyn MpaCatalog>,
}

impl HttpState {
    /// Construct state from the driving-port implementations.
    pub fn new(
        films: Arc<dyn FilmCatalog>,
        users: Arc<dyn UserDirectory>,
        genres: Arc<dyn GenreCatalog>,
        mpa: Arc<dyn MpaCatalog>,
    ) -> Self {
        Self {
            films,
            users,
            genres,
            mpa,
        }
    }
}
