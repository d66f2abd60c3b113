//! Stack resource schema.
//!
//! Resources are listed per stack. Both the stack name and the stack ID are
//! part of the URI and are supplied as path parameters.

use crate::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};

const STACK_RESOURCE_FIELDS: &[Field] = &[
    Field::body("name").wire("resource_name"),
    Field::body("logical_resource_id").alternate_id(),
    Field::body("physical_resource_id"),
    Field::body("resource_type"),
    Field::body("status").wire("resource_status"),
    Field::body("status_reason").wire("resource_status_reason"),
    Field::body("required_by"),
    Field::body("links"),
    Field::body("updated_at").wire("updated_time"),
];

/// A resource belonging to a stack.
pub static STACK_RESOURCE: ResourceSchema =
    ResourceSchema::new("Resource", "/stacks/{stack_name}/{stack_id}/resources")
        .resource_key("resource")
        .resources_key("resources")
        .fields(STACK_RESOURCE_FIELDS)
        .capabilities(Capabilities::NONE.with(ResourceOperation::List))
        .query_params(&["nested_depth", "with_detail", "name", "status", "id", "type"]);
