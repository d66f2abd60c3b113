//! Virtual network appliance service.
//!
//! The latest version is re-exported at this module level.

use crate::config::ServiceFilter;

pub mod v1;

pub use v1::*;

/// Service type the appliance endpoint is registered under.
pub const SERVICE_TYPE: &str = "virtual-network-appliance";

/// Returns the service descriptor for `version`.
#[must_use]
pub fn service_filter(version: &str) -> ServiceFilter {
    ServiceFilter::new(SERVICE_TYPE).with_version(version)
}
