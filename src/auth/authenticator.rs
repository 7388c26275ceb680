//! Bearer token authentication.
//!
//! One pass per request, fail-open: every failure leaves the request
//! anonymous. Only a storage error is surfaced to the caller.
//!
//! # Timing
//! When a header is present but there is no real stored hash to check
//! (unparsable header, unknown user, no key, inactive user), a dummy
//! verification with the same hasher runs instead, so these paths cost the
//! same as a real mismatch.

use std::sync::Arc;

use secrecy::ExposeSecret;

use super::IdentityProvider;
use super::audit::{AuthEvent, AuthEventKind, AuthEventLog};
use super::hasher::CredentialHasher;
use super::header::{ParsedAuthorization, parse_authorization};
use crate::db::UserRepository;
use crate::error::AppResult;
use crate::models::User;

const BOGUS_SECRET: &str = "bogus";
const BOGUS_SALT: &str = "bogus";

/// Terminal state of one authentication pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// An upstream mechanism already authenticated the request.
    AlreadyAuthenticated,
    HeaderAbsent,
    HeaderUnparsable,
    IdentityNotFound,
    /// No key provisioned, or the account is inactive.
    CredentialUnavailable,
    CredentialMismatch,
    Success(User),
}

impl AuthOutcome {
    /// The authenticated user, if any.
    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Success(user) => Some(user),
            _ => None,
        }
    }
}

/// Authenticates requests from an `Authorization: Bearer username:token` header.
#[derive(Clone)]
pub struct BearerAuthenticator {
    users: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
    log: Arc<dyn AuthEventLog>,
    dummy_hash: String,
}

impl BearerAuthenticator {
    /// Create an authenticator. Computes the dummy hash once, up front.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: CredentialHasher,
        log: Arc<dyn AuthEventLog>,
    ) -> AppResult<Self> {
        let dummy_hash = hasher.encode(BOGUS_SECRET, BOGUS_SALT)?;
        Ok(Self {
            users,
            hasher,
            log,
            dummy_hash,
        })
    }

    /// Run one authentication pass.
    ///
    /// `authorization` is the raw header value, `client_addr` the address used
    /// to tag log lines.
    pub async fn authenticate<I>(
        &self,
        identity: &I,
        authorization: Option<&str>,
        client_addr: &str,
    ) -> AppResult<AuthOutcome>
    where
        I: IdentityProvider + ?Sized,
    {
        if identity.has_identity() {
            return Ok(AuthOutcome::AlreadyAuthenticated);
        }

        let Some(header) = authorization else {
            return Ok(AuthOutcome::HeaderAbsent);
        };

        let claim = match parse_authorization(header) {
            ParsedAuthorization::Claim(claim) => claim,
            ParsedAuthorization::Mismatched { username } => {
                let username = Some(username.as_str()).filter(|u| !u.is_empty());
                self.emit(AuthEventKind::MismatchedHeader, client_addr, username);
                self.resist_timing_attacks();
                return Ok(AuthOutcome::CredentialMismatch);
            }
            ParsedAuthorization::Unparsable => {
                self.emit(AuthEventKind::UnknownHeader, client_addr, None);
                self.resist_timing_attacks();
                return Ok(AuthOutcome::HeaderUnparsable);
            }
        };

        let username = claim.username.as_str();
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                self.emit(AuthEventKind::UnknownUser, client_addr, Some(username));
                self.resist_timing_attacks();
                return Ok(AuthOutcome::IdentityNotFound);
            }
        };

        let stored = match user.api_key_hash() {
            Some(stored) if user.can_use_api_key() => stored,
            _ => {
                self.emit(AuthEventKind::KeyUnavailable, client_addr, Some(username));
                self.resist_timing_attacks();
                return Ok(AuthOutcome::CredentialUnavailable);
            }
        };

        if self.hasher.verify(claim.token.expose_secret(), stored) {
            self.emit(AuthEventKind::GoodKey, client_addr, Some(username));
            Ok(AuthOutcome::Success(user))
        } else {
            self.emit(AuthEventKind::BadKey, client_addr, Some(username));
            Ok(AuthOutcome::CredentialMismatch)
        }
    }

    /// Burn one verification's worth of CPU on a path with no real hash.
    fn resist_timing_attacks(&self) {
        let matched = self.hasher.verify(
            std::hint::black_box(BOGUS_SECRET),
            std::hint::black_box(&self.dummy_hash),
        );
        std::hint::black_box(matched);
    }

    fn emit(&self, kind: AuthEventKind, client_addr: &str, username: Option<&str>) {
        self.log.record(&AuthEvent {
            kind,
            client_addr,
            username,
        });
    }
}
