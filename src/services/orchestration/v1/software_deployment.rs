//! Software deployment schema.

use crate::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};

const SOFTWARE_DEPLOYMENT_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("action"),
    Field::body("config_id"),
    Field::body("server_id"),
    Field::body("input_values"),
    Field::body("output_values"),
    Field::body("status"),
    Field::body("status_reason"),
    Field::body("stack_user_project_id"),
    Field::body("created_at").wire("creation_time"),
    Field::body("updated_at").wire("updated_time"),
];

/// The binding of a software config to a server.
pub static SOFTWARE_DEPLOYMENT: ResourceSchema =
    ResourceSchema::new("SoftwareDeployment", "/software_deployments")
        .resource_key("software_deployment")
        .resources_key("software_deployments")
        .fields(SOFTWARE_DEPLOYMENT_FIELDS)
        .capabilities(
            Capabilities::NONE
                .with(ResourceOperation::Create)
                .with(ResourceOperation::Get)
                .with(ResourceOperation::List)
                .with(ResourceOperation::Update)
                .with(ResourceOperation::Delete),
        )
        .query_params(&["server_id"]);
