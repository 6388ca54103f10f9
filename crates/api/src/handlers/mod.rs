pub mod home;
pub mod image;
pub mod pictures;
pub mod session;
