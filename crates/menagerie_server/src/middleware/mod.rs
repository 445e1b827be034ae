//! Request pre-processing applied ahead of routing.

pub mod method_override;
pub mod request_log;

pub use method_override::{MethodOverride, MethodOverrideLayer};
pub use request_log::log_request;
