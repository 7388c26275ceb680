//! Actix-web middleware.

mod bearer_auth;
mod request_logger;

pub use bearer_auth::BearerAuth;
pub use request_logger::RequestLogger;
