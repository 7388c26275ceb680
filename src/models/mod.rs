//! Domain models for the Shelf auth server.

pub mod api_key;
pub mod user;

// Re-export commonly used types
pub use api_key::{ApiKeyAction, ApiKeyState, ManageApiKeyRequest, ManageApiKeyResponse};
pub use user::{IdentityResponse, User};
