//! Identity provider adapters.
//!
//! Implementations of the `IdentityGateway` port:
//!
//! - `mock` - In-memory provider for tests and the development shell
//! - `provider_codes` - Provider-native error code translation

mod mock;
mod provider_codes;

pub use mock::{test_identity, MockIdentityGateway};
pub use provider_codes::{kind_for_provider_code, translate_provider_error};
