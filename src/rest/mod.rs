//! Resource/Proxy framework.
//!
//! This module maps declared resource schemas onto CRUD-style calls:
//!
//! - **[`ResourceSchema`]**: Static attribute tables, URI templates, envelope
//!   keys and capability flags
//! - **[`Resource`]**: An instance of a schema with dirty tracking and
//!   identity resolution
//! - **[`Reshape`]**: Named pre-shaping steps for non-uniform payloads,
//!   applied before the generic hydration
//! - **[`Proxy`]**: A stateless dispatcher turning verbs into HTTP calls
//!   through a [`Session`](crate::Session)
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! # Example: Declaring and Using a Resource
//!
//! ```rust,ignore
//! use ecl_sdk::rest::{Capabilities, Field, Proxy, ResourceSchema};
//! use ecl_sdk::ServiceFilter;
//! use serde_json::json;
//!
//! const SERVER_FIELDS: &[Field] = &[
//!     Field::body("id"),
//!     Field::body("name"),
//!     Field::body("status"),
//! ];
//!
//! static SERVER: ResourceSchema = ResourceSchema::new("Server", "/servers")
//!     .resource_key("server")
//!     .resources_key("servers")
//!     .fields(SERVER_FIELDS)
//!     .capabilities(Capabilities::ALL);
//!
//! let proxy = Proxy::new(&session, ServiceFilter::new("compute"));
//!
//! // Create, then change only the name
//! let server = proxy.create(&SERVER, [("name", json!("web-1"))]).await?;
//! let server = proxy.update(&SERVER, &server, [("name", json!("web-2"))]).await?;
//!
//! // Lazily iterate over every page
//! let mut pager = proxy.list(&SERVER, Default::default())?;
//! while let Some(server) = pager.next().await {
//!     println!("{:?}", server?.get("status"));
//! }
//!
//! // Delete, tolerating a resource that is already gone
//! proxy.delete(&SERVER, "web-2", true).await?;
//! ```
//!
//! # Key Types
//!
//! - [`ResourceSchema`], [`Field`] and [`Capabilities`]: Declarative schemas
//! - [`ResourceOperation`] and [`build_path`]: Path building infrastructure
//! - [`Resource`] and [`ComponentState`]: Instances and dirty tracking
//! - [`Reshape`] and [`TabularReshape`]: Response translation
//! - [`Proxy`], [`ResourceRef`] and [`ResourcePager`]: Dispatch and iteration

mod errors;
mod path;
mod proxy;
mod resource;
mod schema;
mod tracking;
mod translate;

// Public exports
pub use errors::{remap_not_found, ResourceError};
pub use path::{build_path, join_id, placeholders, ResourceOperation};
pub use proxy::{Proxy, ResourcePager, ResourceRef};
pub use resource::{resolve_base_path, Resource, ID_ATTRIBUTE};
pub use schema::{Capabilities, Field, FieldLocation, ResourceSchema, PAGINATION_QUERY_PARAMS};
pub use tracking::ComponentState;
pub use translate::{
    list_elements, next_link, records, resource_from_element, translate_response, translate_with,
    Reshape, TabularReshape,
};
