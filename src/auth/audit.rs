//! Authentication event logging.
//!
//! The authenticator reports every attempt through an injected [`AuthEventLog`]
//! instead of calling a global logger, so tests can capture the exact lines.
//! Events carry the client address and claimed username only; there is no
//! field that could hold the presented token.

use std::fmt;

use tracing::{debug, warn};

/// What happened during a bearer authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEventKind {
    UnknownHeader,
    MismatchedHeader,
    UnknownUser,
    KeyUnavailable,
    BadKey,
    GoodKey,
}

impl AuthEventKind {
    pub fn is_success(self) -> bool {
        matches!(self, Self::GoodKey)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::UnknownHeader => "Unknown Authorization header",
            Self::MismatchedHeader => "Mismatched Authorization header",
            Self::UnknownUser => "User does not exist",
            Self::KeyUnavailable => "User has no key or is inactive",
            Self::BadKey => "Bad API key",
            Self::GoodKey => "Good API key",
        }
    }
}

/// A single authentication attempt.
#[derive(Debug, Clone, Copy)]
pub struct AuthEvent<'a> {
    pub kind: AuthEventKind,
    pub client_addr: &'a str,
    pub username: Option<&'a str>,
}

impl fmt::Display for AuthEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.username {
            Some(username) => write!(
                f,
                "[BearerAuth] {}: {} {}",
                self.kind.message(),
                username,
                self.client_addr
            ),
            None => write!(f, "[BearerAuth] {}: {}", self.kind.message(), self.client_addr),
        }
    }
}

/// Sink for authentication events.
pub trait AuthEventLog: Send + Sync {
    fn record(&self, event: &AuthEvent<'_>);
}

/// Writes events through `tracing`: successes at DEBUG, failures at WARN.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuthLog;

impl AuthEventLog for TracingAuthLog {
    fn record(&self, event: &AuthEvent<'_>) {
        let username = event.username.unwrap_or("-");
        if event.kind.is_success() {
            debug!(
                target: "auth",
                client_addr = %event.client_addr,
                username = %username,
                "{}",
                event
            );
        } else {
            warn!(
                target: "auth",
                client_addr = %event.client_addr,
                username = %username,
                "{}",
                event
            );
        }
    }
}
