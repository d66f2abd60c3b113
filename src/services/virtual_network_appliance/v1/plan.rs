//! Virtual network appliance plan schema.

use crate::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};

const PLAN_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("name"),
    Field::body("description"),
    Field::body("appliance_type"),
    Field::body("version"),
    Field::body("flavor"),
    Field::body("number_of_interfaces"),
    Field::body("enabled"),
    Field::body("max_number_of_aap"),
    Field::body("licenses"),
];

/// A purchasable appliance configuration.
pub static VIRTUAL_NETWORK_APPLIANCE_PLAN: ResourceSchema =
    ResourceSchema::new("VirtualNetworkAppliancePlan", "/v1.0/virtual_network_appliance_plans")
        .resource_key("virtual_network_appliance_plan")
        .resources_key("virtual_network_appliance_plans")
        .fields(PLAN_FIELDS)
        .capabilities(
            Capabilities::NONE
                .with(ResourceOperation::Get)
                .with(ResourceOperation::List),
        );
