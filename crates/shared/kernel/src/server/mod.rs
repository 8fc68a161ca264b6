//! HTTP plumbing shared by every slice: application state, system routes, error bodies.

mod error;
mod health;
pub mod router;
mod state;

pub use error::{ErrorResponse, error_response};
pub use health::HealthResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
