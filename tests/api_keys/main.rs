//! API key end-to-end test suite.
//!
//! Drives the real middleware and management endpoints through
//! `actix_web::test` with an in-memory user repository. No database needed.
//!
//! Run with: cargo test --test api_keys

mod test_helpers;

mod test_bearer_auth;
mod test_manage_api_key;
