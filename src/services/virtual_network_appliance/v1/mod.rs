//! Virtual network appliance API v1.0.
//!
//! # Available Resources
//!
//! - [`VIRTUAL_NETWORK_APPLIANCE_PLAN`] - An appliance plan (get, list)
//! - [`VIRTUAL_NETWORK_APPLIANCE`] - An appliance (full CRUD, find, actions)
//! - [`OPERATION`] - An asynchronous operation (get, list)
//!
//! Appliance actions (`start`, `stop`, `restart`, `reset-password`,
//! `get-console`) are posted to `/v1.0/virtual_network_appliances/{id}/{action}`.

mod appliance;
mod operation;
mod plan;
mod proxy;

pub use appliance::{NewVirtualNetworkAppliance, VIRTUAL_NETWORK_APPLIANCE};
pub use operation::OPERATION;
pub use plan::VIRTUAL_NETWORK_APPLIANCE_PLAN;
pub use proxy::{VirtualNetworkApplianceProxy, VERSION};
