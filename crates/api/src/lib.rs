pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod views;
