//! Common imports for server-side code.

#[cfg(feature = "server")]
pub use crate::server::ApiState;
