//! Orchestration API v1.
//!
//! # Available Resources
//!
//! - [`STACK`] - A stack (full CRUD, find by name or ID)
//! - [`STACK_PREVIEW`] - A dry-run stack creation (create only)
//! - [`STACK_RESOURCE`] - A resource of a stack, listed under
//!   `/stacks/{stack_name}/{stack_id}/resources`
//! - [`SOFTWARE_CONFIG`] - An immutable software config
//! - [`SOFTWARE_DEPLOYMENT`] - A software config bound to a server
//! - [`TEMPLATE`] - The result of a template validation
//!
//! All operations go through [`OrchestrationProxy`].

mod proxy;
mod resource;
mod software_config;
mod software_deployment;
mod stack;
mod template;

pub use proxy::{OrchestrationProxy, VERSION};
pub use resource::STACK_RESOURCE;
pub use software_config::SOFTWARE_CONFIG;
pub use software_deployment::SOFTWARE_DEPLOYMENT;
pub use stack::{STACK, STACK_PREVIEW};
pub use template::{TemplateValidation, TEMPLATE};
