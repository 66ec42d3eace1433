//! Row models and insert DTOs, one module per table group.

pub mod asset;
pub mod category;
pub mod comic;
pub mod favorite;
