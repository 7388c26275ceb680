//! Request/response models for API key management.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Action requested on the caller's own API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyAction {
    Generate,
    Revoke,
}

impl ApiKeyAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "generate" => Some(Self::Generate),
            "revoke" => Some(Self::Revoke),
            _ => None,
        }
    }
}

/// State indicator returned by the management endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyState {
    Shown,
    Generated,
    Revoked,
    Error,
}

/// Request to manage the caller's API key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManageApiKeyRequest {
    /// `generate` or `revoke`
    #[serde(default)]
    pub action: Option<String>,
}

/// Response from the management endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManageApiKeyResponse {
    pub state: ApiKeyState,
    /// `username:secret` - only present right after generation, shown once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl ManageApiKeyResponse {
    pub fn state(state: ApiKeyState) -> Self {
        Self {
            state,
            bearer_token: None,
        }
    }
}
