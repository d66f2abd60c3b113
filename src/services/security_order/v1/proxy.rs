//! Typed proxy for the security order service.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecl_sdk::services::security_order::{firewall_devices, SecurityOrderProxy};
//!
//! let security = SecurityOrderProxy::new(&session);
//! let screen = security.single_firewalls(Some("en")).await?;
//! for device in firewall_devices(&screen)? {
//!     println!("{:?} in {:?}", device.host_name, device.zone_name);
//! }
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::clients::{HttpMethod, Session};
use crate::config::ServiceFilter;
use crate::rest::{translate_with, Proxy, Resource, ResourceError};
use crate::services::security_order::service_filter;

use super::single_firewall::{
    DEVICE_SCREEN_PATH, FIREWALL_DEVICE_TABLE, SINGLE_FIREWALL, SOKIND_CREATE,
};

/// Security order service operations.
#[derive(Debug, Clone)]
pub struct SecurityOrderProxy<S> {
    proxy: Proxy<S>,
}

impl<S: Session> SecurityOrderProxy<S> {
    /// Creates a proxy for the default security order endpoint.
    pub fn new(session: S) -> Self {
        Self::with_service(session, service_filter())
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

    /// Fetches the firewall device screen of the session's tenant.
    ///
    /// The returned resource holds the status fields of the screen and the
    /// device grid reshaped into records under `devices`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails.
    pub async fn single_firewalls(&self, locale: Option<&str>) -> Result<Resource, ResourceError> {
        let mut query = BTreeMap::new();
        query.insert(
            "tenant_id".to_string(),
            self.proxy.session().project_id().to_string(),
        );
        if let Some(locale) = locale {
            query.insert("locale".to_string(), locale.to_string());
        }
        let headers = BTreeMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);

        tracing::debug!(resource = SINGLE_FIREWALL.name(), operation = "list", "proxy call");
        let response = self
            .proxy
            .send(HttpMethod::Get, DEVICE_SCREEN_PATH, None, headers, query)
            .await?;

        let mut screen = Resource::blank(&SINGLE_FIREWALL);
        translate_with(&mut screen, &response, &FIREWALL_DEVICE_TABLE);
        Ok(screen)
    }

    /// Orders a single-device firewall.
    ///
    /// `gt_host` lists the devices to create, each with `operatingmode`,
    /// `licensekind` and `azgroup`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails.
    pub async fn create_single_firewall(
        &self,
        gt_host: Value,
        locale: Option<&str>,
    ) -> Result<Resource, ResourceError> {
        let mut attrs = vec![
            (
                "tenant_id",
                Value::String(self.proxy.session().project_id().to_string()),
            ),
            ("sokind", Value::String(SOKIND_CREATE.to_string())),
            ("gt_host", gt_host),
        ];
        if let Some(locale) = locale {
            attrs.push(("locale", Value::String(locale.to_string())));
        }
        self.proxy.create(&SINGLE_FIREWALL, attrs).await
    }
}
