//! Software config schema.

use crate::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};

const SOFTWARE_CONFIG_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("name"),
    Field::body("group"),
    Field::body("config"),
    Field::body("inputs"),
    Field::body("outputs"),
    Field::body("options"),
    Field::body("created_at").wire("creation_time"),
];

/// A configuration script or document deployable to servers.
///
/// Software configs are immutable: they can be created and deleted but not
/// updated.
pub static SOFTWARE_CONFIG: ResourceSchema =
    ResourceSchema::new("SoftwareConfig", "/software_configs")
        .resource_key("software_config")
        .resources_key("software_configs")
        .fields(SOFTWARE_CONFIG_FIELDS)
        .capabilities(
            Capabilities::NONE
                .with(ResourceOperation::Create)
                .with(ResourceOperation::Get)
                .with(ResourceOperation::List)
                .with(ResourceOperation::Delete),
        );
