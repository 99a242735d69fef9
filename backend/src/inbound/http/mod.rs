//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod films;
pub mod genres;
pub mod health;
pub mod mpa;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;
