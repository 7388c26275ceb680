//! Parsing of `Authorization: Bearer <username>:<token>` headers.

use secrecy::SecretString;

/// Scheme keyword, matched case-insensitively.
const BEARER_SCHEME: &str = "bearer";

/// Username and token claimed by a request.
#[derive(Debug)]
pub struct AuthorizationClaim {
    pub username: String,
    pub token: SecretString,
}

/// Result of parsing an Authorization header value.
#[derive(Debug)]
pub enum ParsedAuthorization {
    /// Well-formed bearer credential.
    Claim(AuthorizationClaim),
    /// Bearer credential with a colon but an empty username or token.
    Mismatched { username: String },
    /// Not a bearer credential at all.
    Unparsable,
}

/// Parse a raw Authorization header value.
///
/// Only the first colon separates username from token.
pub fn parse_authorization(value: &str) -> ParsedAuthorization {
    let Some((scheme, credential)) = value.split_once(char::is_whitespace) else {
        return ParsedAuthorization::Unparsable;
    };
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return ParsedAuthorization::Unparsable;
    }

    let Some((username, token)) = credential.trim_start().split_once(':') else {
        return ParsedAuthorization::Unparsable;
    };

    if username.is_empty() || token.is_empty() {
        return ParsedAuthorization::Mismatched {
            username: username.to_string(),
        };
    }

    ParsedAuthorization::Claim(AuthorizationClaim {
        username: username.to_string(),
        token: SecretString::from(token.to_string()),
    })
}
