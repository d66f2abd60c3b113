//! Single firewall service order schema.
//!
//! The device screen endpoint does not return devices as objects but as a
//! grid: `{"rows": [{"cell": [..]}, ..]}`. [`FIREWALL_DEVICE_TABLE`] maps the
//! cells onto named columns and stores them under `devices`.

use serde::{Deserialize, Serialize};

use crate::rest::{
    Capabilities, Field, Resource, ResourceError, ResourceOperation, ResourceSchema,
    TabularReshape,
};

const SINGLE_FIREWALL_FIELDS: &[Field] = &[
    Field::body("tenant_id"),
    Field::body("gt_host"),
    Field::body("sokind").alternate_id(),
    Field::body("locale"),
    Field::body("code"),
    Field::body("message"),
    Field::body("soid").wire("soId"),
    Field::body("status"),
    Field::body("records"),
    Field::body("rows"),
    Field::body("devices"),
];

/// A single-device firewall service order.
pub static SINGLE_FIREWALL: ResourceSchema = ResourceSchema::new("SingleFirewall", "/API/SoEntryFGS")
    .fields(SINGLE_FIREWALL_FIELDS)
    .capabilities(
        Capabilities::NONE
            .with(ResourceOperation::Create)
            .with(ResourceOperation::Get)
            .with(ResourceOperation::List)
            .with(ResourceOperation::Update)
            .with(ResourceOperation::Delete),
    );

/// Path of the device screen endpoint.
pub const DEVICE_SCREEN_PATH: &str = "/API/ScreenEventFGSDeviceGet";

/// Service order kind for creating a single-device firewall.
pub const SOKIND_CREATE: &str = "A";

/// Column layout of the device screen grid.
pub static FIREWALL_DEVICE_TABLE: TabularReshape = TabularReshape::new(
    "firewall device table",
    "devices",
    &[
        "internal_use",
        "rows",
        "host_name",
        "menu",
        "plan",
        "redundancy",
        "availability_zone",
        "zone_name",
    ],
);

/// One row of the device screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallDevice {
    /// Reserved by the service.
    pub internal_use: Option<String>,
    /// Row number.
    pub rows: Option<String>,
    /// Device host name.
    pub host_name: Option<String>,
    /// Menu type (`FW` or `UTM`).
    pub menu: Option<String>,
    /// License plan.
    pub plan: Option<String>,
    /// Redundancy flag.
    pub redundancy: Option<String>,
    /// Availability zone.
    pub availability_zone: Option<String>,
    /// Display name of the zone.
    pub zone_name: Option<String>,
}

/// Returns the typed device records of a device screen.
///
/// # Errors
///
/// Returns [`ResourceError::Deserialize`] if a record has the wrong shape.
pub fn firewall_devices(screen: &Resource) -> Result<Vec<FirewallDevice>, ResourceError> {
    Ok(screen.get_as("devices")?.unwrap_or_default())
}
