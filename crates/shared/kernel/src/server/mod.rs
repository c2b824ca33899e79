//! HTTP plumbing shared by every slice: state, error envelope, system routes.

mod error;
mod health;
mod router;
mod state;

pub use error::{ApiError, ApiErrorExt, ErrorBody, ErrorEnvelope};
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
