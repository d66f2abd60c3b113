//! # ECL Cloud SDK
//!
//! A Rust SDK for cloud service APIs, providing type-safe configuration, an
//! async HTTP session, and a declarative Resource/Proxy framework that maps
//! resource schemas onto CRUD-style calls.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`EclConfig`] and [`EclConfigBuilder`]
//! - Validated newtypes for project IDs, tokens and endpoint URLs
//! - An async [`Session`] trait with a `reqwest` implementation, [`HttpSession`]
//! - Static resource schemas with body and header attributes via [`rest::ResourceSchema`]
//! - A stateless dispatcher, [`rest::Proxy`], with lazy multi-page listing
//! - Named reshaping steps for non-uniform payloads via [`rest::Reshape`]
//! - Typed proxies for the orchestration, virtual network appliance and
//!   security order services under [`services`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ecl_sdk::{AuthToken, EclConfig, EndpointUrl, ProjectId};
//!
//! // Create configuration using the builder pattern
//! let config = EclConfig::builder()
//!     .project_id(ProjectId::new("tenant-1").unwrap())
//!     .auth_token(AuthToken::new("gAAAAAB...").unwrap())
//!     .endpoint("orchestration", EndpointUrl::new("https://heat.example.com/v1/tenant-1").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working With Stacks
//!
//! ```rust,ignore
//! use ecl_sdk::{EclConfig, HttpSession};
//! use ecl_sdk::services::orchestration::{OrchestrationProxy, TemplateValidation};
//! use serde_json::json;
//!
//! let session = HttpSession::new(config)?;
//! let orchestration = OrchestrationProxy::new(&session);
//!
//! // Validation fails locally when there is nothing to validate
//! let result = orchestration
//!     .validate_template(TemplateValidation::default(), None)
//!     .await;
//! assert!(result.is_err());
//!
//! // Only the given attributes are sent on update
//! let stack = orchestration.update_stack("web", [("timeout_mins", json!(30))]).await?;
//!
//! // Missing stacks can be tolerated
//! orchestration.delete_stack("old", true).await?;
//! ```
//!
//! ## Declaring a Resource
//!
//! ```rust
//! use ecl_sdk::rest::{Capabilities, Field, Resource, ResourceSchema};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! const PORT_FIELDS: &[Field] = &[
//!     Field::body("id"),
//!     Field::body("name"),
//!     Field::body("status"),
//! ];
//!
//! static PORT: ResourceSchema = ResourceSchema::new("Port", "/v2.0/ports")
//!     .resource_key("port")
//!     .resources_key("ports")
//!     .fields(PORT_FIELDS)
//!     .capabilities(Capabilities::ALL);
//!
//! let port = Resource::from_response_parts(
//!     &PORT,
//!     &json!({"port": {"id": "p-1", "name": "eth0", "status": "ACTIVE", "unknown": true}}),
//!     &HashMap::new(),
//! );
//! assert_eq!(port.identity().unwrap(), "p-1");
//! assert!(port.get("unknown").is_none());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Schemas are immutable statics; configuration is passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction, schemas at compile time
//! - **Thread-safe**: Public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No silent retries**: Retries happen only when configured on the session

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod services;

// Re-export public types at crate root for convenience
pub use config::{
    AuthToken, EclConfig, EclConfigBuilder, EndpointUrl, Interface, ProjectId, ServiceFilter,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, HttpSession, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    Session,
};

// Re-export framework types
pub use rest::{Proxy, Resource, ResourceError, ResourceSchema};
