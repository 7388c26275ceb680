//! Shelf auth server library.
//!
//! API key (bearer token) authentication for the Shelf reading server:
//! credential hashing, header parsing, the authentication middleware, and
//! the self-service key management flow.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
