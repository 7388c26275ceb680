//! Authentication module for API key (bearer token) verification.
//!
//! Bearer authentication is a fallback: when an upstream mechanism (the web
//! session) has already attached an identity to the request, nothing here runs.

pub mod audit;
pub mod authenticator;
mod extractor;
pub mod hasher;
pub mod header;
#[cfg(any(test, feature = "test-support"))]
pub mod testutil;

use actix_web::HttpMessage;
use actix_web::dev::ServiceRequest;

use crate::models::User;

pub use audit::{AuthEventLog, TracingAuthLog};
pub use authenticator::{AuthOutcome, BearerAuthenticator};
pub use extractor::{CurrentUser, SessionUser};
pub use hasher::CredentialHasher;
pub use header::{AuthorizationClaim, ParsedAuthorization, parse_authorization};
#[cfg(any(test, feature = "test-support"))]
pub use testutil::RecordingAuthLog;

/// Mechanism that established a request's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Primary session login, established upstream of this crate.
    Session,
    /// `Authorization: Bearer username:token`.
    Bearer,
}

impl AuthSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Bearer => "bearer",
        }
    }
}

/// Identity bound to a request, stored in the request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub source: AuthSource,
}

impl AuthenticatedUser {
    pub fn session(user: User) -> Self {
        Self {
            user,
            source: AuthSource::Session,
        }
    }

    pub fn bearer(user: User) -> Self {
        Self {
            user,
            source: AuthSource::Bearer,
        }
    }
}

/// Answers whether a request already carries an authenticated identity.
pub trait IdentityProvider {
    fn has_identity(&self) -> bool;
}

impl IdentityProvider for ServiceRequest {
    fn has_identity(&self) -> bool {
        self.extensions().contains::<AuthenticatedUser>()
    }
}
