//! Security order service.
//!
//! Service orders provision managed security devices. The latest version is
//! re-exported at this module level.

use crate::config::ServiceFilter;

pub mod v1;

pub use v1::*;

/// Service type the security order endpoint is registered under.
pub const SERVICE_TYPE: &str = "security-order";

/// Returns the service descriptor.
#[must_use]
pub fn service_filter() -> ServiceFilter {
    ServiceFilter::new(SERVICE_TYPE)
}
