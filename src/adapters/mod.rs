//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the session core to external systems:
//! - `identity` - Identity provider implementations and error translation
//! - `navigation` - Navigator implementations
//! - `http` - Development shell exposing the core over HTTP

pub mod http;
pub mod identity;
pub mod navigation;

pub use identity::MockIdentityGateway;
pub use navigation::{LoggingNavigator, RecordingNavigator};
