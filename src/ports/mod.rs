//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the session core and the outside world. Adapters implement these ports.
//!
//! - `IdentityGateway` - interactive sign-in, sign-out, and identity push
//!   notifications from the identity provider
//! - `Navigator` - route changes requested after sign-in / sign-out

mod identity_gateway;
mod navigator;

pub use identity_gateway::{IdentityGateway, ProviderListener};
pub use navigator::Navigator;
