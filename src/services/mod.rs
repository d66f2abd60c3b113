//! Service bindings built on the [`rest`](crate::rest) framework.
//!
//! Each service declares its resource schemas and a typed proxy wrapping a
//! generic [`Proxy`](crate::rest::Proxy):
//!
//! ```text
//! services/
//!   mod.rs                      <- This file
//!   orchestration/v1/           <- Stacks, stack resources, software configs
//!   virtual_network_appliance/v1/
//!   security_order/v1/          <- Single firewall service orders
//! ```
//!
//! # Using a Service Proxy
//!
//! ```rust,ignore
//! use ecl_sdk::services::orchestration::OrchestrationProxy;
//!
//! let orchestration = OrchestrationProxy::new(&session);
//! let stack = orchestration.find_stack("web", false).await?;
//! ```

pub mod orchestration;
pub mod security_order;
pub mod virtual_network_appliance;
