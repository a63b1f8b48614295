//! Gateway layer - HTTP access to the backend service
//!
//! The Gateway actor receives fetch commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::GatewayActor;
pub use client::GatewayError;
