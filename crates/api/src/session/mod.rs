//! Cookie-backed session state.
//!
//! - [`token`] -- signing and validating the session payload.
//! - [`cookie`] -- storing, clearing and reading the session cookie.

pub mod cookie;
pub mod token;

pub use token::SessionImage;
