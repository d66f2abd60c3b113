//! Security order API v1.
//!
//! - [`SINGLE_FIREWALL`] - A single-device firewall service order
//! - [`FIREWALL_DEVICE_TABLE`] - The reshape step for the device screen grid
//! - [`FirewallDevice`] - A typed device record, read with [`firewall_devices`]

mod proxy;
mod single_firewall;

pub use proxy::SecurityOrderProxy;
pub use single_firewall::{
    firewall_devices, FirewallDevice, DEVICE_SCREEN_PATH, FIREWALL_DEVICE_TABLE, SINGLE_FIREWALL, SOKIND_CREATE,
};
