//! Domain core for picture-retriever.
//!
//! Zero internal dependencies: error taxonomy, id type, URL hashing,
//! field validation and the selection policy used for random picks.

pub mod error;
pub mod selection;
pub mod types;
pub mod url_hash;
pub mod validation;
