//! Orchestration (stack) service.
//!
//! The latest version is re-exported at this module level:
//!
//! ```rust,ignore
//! use ecl_sdk::services::orchestration::{OrchestrationProxy, STACK};
//!
//! // Or explicitly specify a version:
//! use ecl_sdk::services::orchestration::v1::OrchestrationProxy;
//! ```

use crate::config::ServiceFilter;

pub mod v1;

pub use v1::*;

/// Service type the orchestration endpoint is registered under.
pub const SERVICE_TYPE: &str = "orchestration";

/// Returns the service descriptor for `version`.
#[must_use]
pub fn service_filter(version: &str) -> ServiceFilter {
    ServiceFilter::new(SERVICE_TYPE).with_version(version)
}
