//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async SQL methods that
//! accept any SQLite executor (`&DbPool`, `&mut SqliteConnection` or an open
//! transaction) as the first argument.

pub mod image_repo;

pub use image_repo::ImageRepo;
