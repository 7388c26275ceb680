//! Business logic services.

pub mod api_key;
pub mod manage_api_key;

pub use api_key::KeyLifecycleManager;
pub use manage_api_key::configure_routes as configure_api_key_routes;
