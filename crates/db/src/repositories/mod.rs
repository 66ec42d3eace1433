//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod asset_repo;
pub mod category_repo;
pub mod comic_repo;
pub mod favorite_repo;

pub use asset_repo::AssetRepo;
pub use category_repo::CategoryRepo;
pub use comic_repo::ComicRepo;
pub use favorite_repo::FavoriteRepo;
