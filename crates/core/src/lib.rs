//! Domain logic for the Pilakon backend.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, shared
//! id/time types, the asset listing query builder, and upload rules so that
//! the repository and HTTP layers can share them and test them in isolation.

pub mod asset_query;
pub mod error;
pub mod types;
pub mod upload;
