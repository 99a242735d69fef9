//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic. The only infrastructure
//! this service talks to is PostgreSQL, via the `persistence` module.

pub mod persistence;
