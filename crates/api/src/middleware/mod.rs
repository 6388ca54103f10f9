//! Request extractors.
//!
//! - [`session::CurrentImage`] -- the session's current image, if any.
//! - [`session::RequireImage`] -- redirects to `/logout` when there is none.

pub mod session;
