//! HTTP service for the folio portfolio site.
//!
//! Serves the three admin functions (`discord-auth`, `admin-check`,
//! `admin-update`) and the public content reads, with permissive CORS so the
//! static front-end can call them from any origin.

pub mod config;
pub mod db;
pub mod discord;
pub mod error;
pub mod functions;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
