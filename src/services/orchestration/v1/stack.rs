//! Stack schemas.
//!
//! A stack is the unit of deployment of the orchestration service. Its
//! `location` response header carries the canonical URI of a newly created
//! stack.

use crate::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};

const STACK_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("name").wire("stack_name"),
    Field::body("description"),
    Field::body("template_description"),
    Field::body("parameters"),
    Field::body("template"),
    Field::body("template_url"),
    Field::body("environment"),
    Field::body("files"),
    Field::body("timeout_mins"),
    Field::body("disable_rollback"),
    Field::body("tags"),
    Field::body("capabilities"),
    Field::body("notification_topics"),
    Field::body("status").wire("stack_status"),
    Field::body("status_reason").wire("stack_status_reason"),
    Field::body("owner_id").wire("stack_owner"),
    Field::body("parent"),
    Field::body("outputs"),
    Field::body("links"),
    Field::body("created_at").wire("creation_time"),
    Field::body("updated_at").wire("updated_time"),
    Field::header("location", "location"),
];

/// An orchestration stack.
pub static STACK: ResourceSchema = ResourceSchema::new("Stack", "/stacks")
    .resource_key("stack")
    .resources_key("stacks")
    .fields(STACK_FIELDS)
    .capabilities(Capabilities::ALL)
    .query_params(&[
        "action",
        "name",
        "status",
        "tenant",
        "username",
        "owner_id",
        "tags",
        "tags_any",
        "not_tags",
        "not_tags_any",
        "sort_keys",
        "sort_dir",
        "show_deleted",
        "show_nested",
        "show_hidden",
        "global_tenant",
        "with_count",
    ]);

/// A dry-run stack creation.
///
/// The server returns the resources the stack would contain without
/// creating anything.
pub static STACK_PREVIEW: ResourceSchema = ResourceSchema::new("StackPreview", "/stacks/preview")
    .resource_key("stack")
    .fields(STACK_FIELDS)
    .capabilities(Capabilities::NONE.with(ResourceOperation::Create));
