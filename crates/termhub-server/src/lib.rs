//! HTTP server implementation for TermHub.
//!
//! Wires the inter-service access layer (registry, gateway, cache) to the
//! term/holiday business services and exposes them over axum. Bootstrap
//! order lives in `main.rs`: env → tracing → config → cache → registry
//! registration → serve → deregister.

pub mod config;
pub mod constants;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use self::config::AppConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
