//! Typed proxy for the virtual network appliance service.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecl_sdk::services::virtual_network_appliance::{
//!     NewVirtualNetworkAppliance, VirtualNetworkApplianceProxy,
//! };
//! use serde_json::json;
//!
//! let vna = VirtualNetworkApplianceProxy::new(&session);
//!
//! let mut params = NewVirtualNetworkAppliance::new(
//!     "plan-1",
//!     json!({"interface_1": {"network_id": "net-1", "fixed_ips": [{"ip_address": "192.168.0.10"}]}}),
//! );
//! params.name = Some("edge".to_string());
//! let appliance = vna.create_virtual_network_appliance(&params).await?;
//!
//! vna.stop_virtual_network_appliance(&appliance).await?;
//! ```

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpResponse, Session};
use crate::config::ServiceFilter;
use crate::rest::{Proxy, Resource, ResourceError, ResourcePager, ResourceRef};
use crate::services::virtual_network_appliance::service_filter;

use super::appliance::{NewVirtualNetworkAppliance, VIRTUAL_NETWORK_APPLIANCE};
use super::operation::OPERATION;
use super::plan::VIRTUAL_NETWORK_APPLIANCE_PLAN;

/// API version this proxy targets.
pub const VERSION: &str = "v1.0";

/// Virtual network appliance service operations.
#[derive(Debug, Clone)]
pub struct VirtualNetworkApplianceProxy<S> {
    proxy: Proxy<S>,
}

impl<S: Session> VirtualNetworkApplianceProxy<S> {
    /// Creates a proxy for the default appliance endpoint.
    pub fn new(session: S) -> Self {
        Self::with_service(session, service_filter(VERSION))
    }

    /// Creates a proxy for a specific service descriptor.
    #[must_use]
    pub const fn with_service(session: S, service: ServiceFilter) -> Self {
        Self {
            proxy: Proxy::new(session, service),
        }
    }

    /// Returns the generic proxy.
    #[must_use]
    pub const fn proxy(&self) -> &Proxy<S> {
        &self.proxy
    }

    // ========================================================================
    // Plans
    // ========================================================================

    /// Lists appliance plans.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the query cannot be resolved.
    pub fn virtual_network_appliance_plans(
        &self,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        self.proxy.list(&VIRTUAL_NETWORK_APPLIANCE_PLAN, query)
    }

    /// Fetches one appliance plan.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the plan does not exist.
    pub async fn get_virtual_network_appliance_plan(
        &self,
        plan_id: &str,
    ) -> Result<Resource, ResourceError> {
        self.proxy.get(&VIRTUAL_NETWORK_APPLIANCE_PLAN, plan_id).await
    }

    // ========================================================================
    // Appliances
    // ========================================================================

    /// Lists appliances.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the query cannot be resolved.
    pub fn virtual_network_appliances(
        &self,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        self.proxy.list(&VIRTUAL_NETWORK_APPLIANCE, query)
    }

    /// Fetches one appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn get_virtual_network_appliance<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
    ) -> Result<Resource, ResourceError> {
        self.proxy.get(&VIRTUAL_NETWORK_APPLIANCE, appliance).await
    }

    /// Finds an appliance by name or ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when nothing matches and
    /// `ignore_missing` is false, or [`ResourceError::Duplicate`] when the
    /// name is ambiguous.
    pub async fn find_virtual_network_appliance(
        &self,
        name_or_id: &str,
        ignore_missing: bool,
    ) -> Result<Option<Resource>, ResourceError> {
        self.proxy
            .find(&VIRTUAL_NETWORK_APPLIANCE, name_or_id, ignore_missing)
            .await
    }

    /// Creates an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails.
    pub async fn create_virtual_network_appliance(
        &self,
        params: &NewVirtualNetworkAppliance,
    ) -> Result<Resource, ResourceError> {
        self.proxy
            .create(&VIRTUAL_NETWORK_APPLIANCE, params.attributes())
            .await
    }

    /// Updates an appliance with exactly the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn update_virtual_network_appliance<'r, I, K>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
        attrs: I,
    ) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        self.proxy
            .update(&VIRTUAL_NETWORK_APPLIANCE, appliance, attrs)
            .await
    }

    /// Deletes an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist
    /// and `ignore_missing` is false.
    pub async fn delete_virtual_network_appliance<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
        ignore_missing: bool,
    ) -> Result<(), ResourceError> {
        self.proxy
            .delete(&VIRTUAL_NETWORK_APPLIANCE, appliance, ignore_missing)
            .await
            .map(|_| ())
    }

    /// Starts an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn start_virtual_network_appliance<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
    ) -> Result<HttpResponse, ResourceError> {
        self.appliance_action(appliance.into(), "start", None).await
    }

    /// Stops an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn stop_virtual_network_appliance<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
    ) -> Result<HttpResponse, ResourceError> {
        self.appliance_action(appliance.into(), "stop", None).await
    }

    /// Restarts an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn restart_virtual_network_appliance<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
    ) -> Result<HttpResponse, ResourceError> {
        self.appliance_action(appliance.into(), "restart", None).await
    }

    /// Resets the login password of an appliance.
    ///
    /// The response body carries the new credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn reset_password_virtual_network_appliance<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
    ) -> Result<HttpResponse, ResourceError> {
        self.appliance_action(appliance.into(), "reset-password", None)
            .await
    }

    /// Requests console access to an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the appliance does not exist.
    pub async fn get_virtual_network_appliance_console<'r>(
        &self,
        appliance: impl Into<ResourceRef<'r>>,
        vnc_type: &str,
    ) -> Result<HttpResponse, ResourceError> {
        self.appliance_action(
            appliance.into(),
            "get-console",
            Some(json!({"vnc_type": vnc_type})),
        )
        .await
    }

    async fn appliance_action(
        &self,
        target: ResourceRef<'_>,
        action: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, ResourceError> {
        let label = target.label();
        let appliance = self.get_virtual_network_appliance(target).await?;
        let uri = format!("{}/{action}", appliance.uri()?);
        self.proxy
            .action(
                VIRTUAL_NETWORK_APPLIANCE.name(),
                HttpMethod::Post,
                &uri,
                body,
                &label,
            )
            .await
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Lists operations, filtered by `id` or `resource_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] for other query keys.
    pub fn operations(
        &self,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        self.proxy.list(&OPERATION, query)
    }

    /// Fetches one operation.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the operation does not exist.
    pub async fn get_operation(&self, operation_id: &str) -> Result<Resource, ResourceError> {
        self.proxy.get(&OPERATION, operation_id).await
    }
}
