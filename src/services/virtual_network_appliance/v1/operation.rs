//! Appliance operation schema.
//!
//! Every state change of an appliance is recorded as an operation that can
//! be polled until it is committed.

use crate::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};

const OPERATION_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("resource_id"),
    Field::body("resource_type"),
    Field::body("request_type"),
    Field::body("request_body"),
    Field::body("status"),
    Field::body("reception_datetime"),
    Field::body("commit_datetime"),
    Field::body("warning"),
    Field::body("error"),
    Field::body("error_details"),
    Field::body("tenant_id"),
];

/// An asynchronous operation on an appliance.
pub static OPERATION: ResourceSchema = ResourceSchema::new("Operation", "/v1.0/operations")
    .resource_key("operation")
    .resources_key("operations")
    .fields(OPERATION_FIELDS)
    .capabilities(
        Capabilities::NONE
            .with(ResourceOperation::Get)
            .with(ResourceOperation::List),
    )
    .query_params(&["id", "resource_id"]);
