pub mod assets;
pub mod categories;
pub mod comics;
pub mod diagnostics;
pub mod favorites;
pub mod upload;
