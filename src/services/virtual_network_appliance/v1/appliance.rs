//! Virtual network appliance schema.
//!
//! Appliances are updated with `PATCH` and their request bodies are wrapped
//! in the `virtual_network_appliance` key.

use serde_json::Value;

use crate::rest::{Capabilities, Field, ResourceSchema};

const APPLIANCE_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("name"),
    Field::body("description"),
    Field::body("appliance_type"),
    Field::body("availability_zone"),
    Field::body("default_gateway"),
    Field::body("interfaces"),
    Field::body("tags"),
    Field::body("tenant_id"),
    Field::body("virtual_network_appliance_plan_id"),
    Field::body("os_monitoring_status"),
    Field::body("os_login_status"),
    Field::body("vm_status"),
    Field::body("operation_status"),
    Field::body("username"),
    Field::body("password"),
];

/// A virtual network appliance.
pub static VIRTUAL_NETWORK_APPLIANCE: ResourceSchema =
    ResourceSchema::new("VirtualNetworkAppliance", "/v1.0/virtual_network_appliances")
        .resource_key("virtual_network_appliance")
        .resources_key("virtual_network_appliances")
        .fields(APPLIANCE_FIELDS)
        .capabilities(Capabilities::ALL)
        .patch_updates()
        .wrap_request_body();

/// Parameters for creating an appliance.
///
/// Optional parameters that are `None` or empty are left out of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVirtualNetworkAppliance {
    /// Plan the appliance is created from.
    pub virtual_network_appliance_plan_id: String,
    /// Interface definitions keyed by slot (`interface_1`, ...).
    pub interfaces: Value,
    /// Display name.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Default gateway address.
    pub default_gateway: Option<String>,
    /// Availability zone.
    pub availability_zone: Option<String>,
}

impl NewVirtualNetworkAppliance {
    /// Creates parameters with the required fields.
    pub fn new(plan_id: impl Into<String>, interfaces: Value) -> Self {
        Self {
            virtual_network_appliance_plan_id: plan_id.into(),
            interfaces,
            ..Self::default()
        }
    }

    /// Returns the attributes to send.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, Value)> {
        let mut attrs = vec![
            (
                "virtual_network_appliance_plan_id",
                Value::String(self.virtual_network_appliance_plan_id.clone()),
            ),
            ("interfaces", self.interfaces.clone()),
        ];
        let optional = [
            ("name", &self.name),
            ("description", &self.description),
            ("default_gateway", &self.default_gateway),
            ("availability_zone", &self.availability_zone),
        ];
        attrs.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| match value {
                    Some(value) if !value.is_empty() => Some((name, Value::String(value.clone()))),
                    _ => None,
                }),
        );
        attrs
    }
}
