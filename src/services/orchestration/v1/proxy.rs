//! Typed proxy for the orchestration service.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecl_sdk::services::orchestration::OrchestrationProxy;
//! use serde_json::json;
//!
//! let orchestration = OrchestrationProxy::new(&session);
//!
//! let stack = orchestration
//!     .create_stack(false, [
//!         ("name", json!("web")),
//!         ("template_url", json!("https://example.com/web.yaml")),
//!     ])
//!     .await?;
//!
//! let mut resources = orchestration.resources("web", Default::default()).await?;
//! while let Some(resource) = resources.next().await {
//!     let resource = resource?;
//!     println!("{} {:?}", resource.identity()?, resource.get("status"));
//! }
//!
//! // Keep the underlying resources but forget the stack
//! let snapshot = orchestration.abandon_stack("web", true).await?;
//! ```

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpResponseError, Session};
use crate::config::ServiceFilter;
use crate::rest::{build_path, Proxy, Resource, ResourceError, ResourcePager, ResourceRef};
use crate::services::orchestration::service_filter;

use super::resource::STACK_RESOURCE;
use super::software_config::SOFTWARE_CONFIG;
use super::software_deployment::SOFTWARE_DEPLOYMENT;
use super::stack::{STACK, STACK_PREVIEW};
use super::template::{TemplateValidation, TEMPLATE};

/// API version this proxy targets.
pub const VERSION: &str = "v1";

/// Orchestration service operations.
#[derive(Debug, Clone)]
pub struct OrchestrationProxy<S> {
    proxy: Proxy<S>,
}

impl<S: Session> OrchestrationProxy<S> {
    /// Creates a proxy for the default orchestration endpoint.
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
    // Stacks
    // ========================================================================

    /// Creates a stack, or previews its creation when `preview` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the attributes are rejected or the call
    /// fails.
    pub async fn create_stack<I, K>(&self, preview: bool, attrs: I) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let schema = if preview { &STACK_PREVIEW } else { &STACK };
        self.proxy.create(schema, attrs).await
    }

    /// Finds a stack by name or ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when nothing matches and
    /// `ignore_missing` is false.
    pub async fn find_stack(
        &self,
        name_or_id: &str,
        ignore_missing: bool,
    ) -> Result<Option<Resource>, ResourceError> {
        self.proxy.find(&STACK, name_or_id, ignore_missing).await
    }

    /// Lists stacks.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] for unsupported query keys.
    pub fn stacks(
        &self,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        self.proxy.list(&STACK, query)
    }

    /// Fetches one stack.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the stack does not exist.
    pub async fn get_stack<'r>(
        &self,
        stack: impl Into<ResourceRef<'r>>,
    ) -> Result<Resource, ResourceError> {
        self.proxy.get(&STACK, stack).await
    }

    /// Updates a stack with exactly the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the stack does not exist.
    pub async fn update_stack<'r, I, K>(
        &self,
        stack: impl Into<ResourceRef<'r>>,
        attrs: I,
    ) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        self.proxy.update(&STACK, stack, attrs).await
    }

    /// Deletes a stack.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the stack does not exist and
    /// `ignore_missing` is false.
    pub async fn delete_stack<'r>(
        &self,
        stack: impl Into<ResourceRef<'r>>,
        ignore_missing: bool,
    ) -> Result<(), ResourceError> {
        self.proxy
            .delete(&STACK, stack, ignore_missing)
            .await
            .map(|_| ())
    }

    /// Abandons a stack, deleting it while keeping its resources.
    ///
    /// A bare identifier is first resolved into a stack, since the abandon
    /// URI needs both name and ID. Returns the abandon snapshot, or `None`
    /// when the stack is missing and `ignore_missing` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] with the message
    /// `No Stack found for {stack}` when the stack is missing and
    /// `ignore_missing` is false; the server's diagnostics are kept.
    pub async fn abandon_stack<'r>(
        &self,
        stack: impl Into<ResourceRef<'r>>,
        ignore_missing: bool,
    ) -> Result<Option<Value>, ResourceError> {
        let target = stack.into();
        let label = target.label();
        let stack = match target {
            ResourceRef::Resource(resource) => resource.clone(),
            ResourceRef::Id(id) => match self.get_stack(&*id).await {
                Ok(resource) => resource,
                Err(e) if e.is_not_found() && ignore_missing => return Ok(None),
                Err(e) => return Err(e),
            },
        };

        let uri = Self::stack_action_path(&stack, "/stacks/{stack_name}/{stack_id}/abandon")?;
        let response = self
            .proxy
            .invoke_action(STACK.name(), HttpMethod::Delete, &uri, None, &label, ignore_missing)
            .await?;
        Ok(response.map(|response| response.body))
    }

    /// Requests a status check of a stack.
    ///
    /// The check runs asynchronously; its outcome shows in the stack status.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the stack does not exist.
    pub async fn check_stack<'r>(&self, stack: impl Into<ResourceRef<'r>>) -> Result<(), ResourceError> {
        let target = stack.into();
        let label = target.label();
        let uri = match &target {
            ResourceRef::Resource(resource) => resource.uri()?,
            ResourceRef::Id(id) => Resource::existing(&STACK, id.to_string()).uri()?,
        };
        self.proxy
            .action(
                STACK.name(),
                HttpMethod::Post,
                &format!("{uri}/actions"),
                Some(json!({"check": ""})),
                &label,
            )
            .await?;
        Ok(())
    }

    /// Lists the resources of a stack.
    ///
    /// A bare name or ID is resolved with [`find_stack`](Self::find_stack)
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the stack cannot be found
    /// and [`ResourceError::InvalidRequest`] for unsupported query keys.
    pub async fn resources<'r>(
        &self,
        stack: impl Into<ResourceRef<'r>>,
        mut query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        let stack = match stack.into() {
            ResourceRef::Resource(resource) => resource.clone(),
            ResourceRef::Id(id) => self.find_stack(&id, false).await?.ok_or_else(|| {
                ResourceError::NotFound(HttpResponseError::with_message(format!(
                    "No {} found for {}",
                    STACK.name(),
                    id
                )))
            })?,
        };

        let name = stack.name().ok_or(ResourceError::PathResolutionFailed {
            resource: STACK_RESOURCE.name(),
            param: "stack_name".to_string(),
        })?;
        query.insert("stack_name".to_string(), name.to_string());
        query.insert("stack_id".to_string(), stack.identity()?);
        self.proxy.list(&STACK_RESOURCE, query)
    }

    fn stack_action_path(stack: &Resource, template: &str) -> Result<String, ResourceError> {
        let mut params = BTreeMap::new();
        if let Some(name) = stack.name() {
            params.insert("stack_name".to_string(), name.to_string());
        }
        params.insert("stack_id".to_string(), stack.identity()?);
        build_path(template, &params).map_err(|param| ResourceError::PathResolutionFailed {
            resource: STACK.name(),
            param: param.to_string(),
        })
    }

    // ========================================================================
    // Software configs
    // ========================================================================

    /// Creates a software config.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the attributes are rejected or the call
    /// fails.
    pub async fn create_software_config<I, K>(&self, attrs: I) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        self.proxy.create(&SOFTWARE_CONFIG, attrs).await
    }

    /// Lists software configs.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] for unsupported query keys.
    pub fn software_configs(
        &self,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        self.proxy.list(&SOFTWARE_CONFIG, query)
    }

    /// Fetches one software config.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when it does not exist.
    pub async fn get_software_config<'r>(
        &self,
        software_config: impl Into<ResourceRef<'r>>,
    ) -> Result<Resource, ResourceError> {
        self.proxy.get(&SOFTWARE_CONFIG, software_config).await
    }

    /// Deletes a software config.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when it does not exist and
    /// `ignore_missing` is false.
    pub async fn delete_software_config<'r>(
        &self,
        software_config: impl Into<ResourceRef<'r>>,
        ignore_missing: bool,
    ) -> Result<(), ResourceError> {
        self.proxy
            .delete(&SOFTWARE_CONFIG, software_config, ignore_missing)
            .await
            .map(|_| ())
    }

    // ========================================================================
    // Software deployments
    // ========================================================================

    /// Creates a software deployment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the attributes are rejected or the call
    /// fails.
    pub async fn create_software_deployment<I, K>(
        &self,
        attrs: I,
    ) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        self.proxy.create(&SOFTWARE_DEPLOYMENT, attrs).await
    }

    /// Lists software deployments.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] for unsupported query keys.
    pub fn software_deployments(
        &self,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        self.proxy.list(&SOFTWARE_DEPLOYMENT, query)
    }

    /// Fetches one software deployment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when it does not exist.
    pub async fn get_software_deployment<'r>(
        &self,
        software_deployment: impl Into<ResourceRef<'r>>,
    ) -> Result<Resource, ResourceError> {
        self.proxy.get(&SOFTWARE_DEPLOYMENT, software_deployment).await
    }

    /// Updates a software deployment with exactly the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when it does not exist.
    pub async fn update_software_deployment<'r, I, K>(
        &self,
        software_deployment: impl Into<ResourceRef<'r>>,
        attrs: I,
    ) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        self.proxy
            .update(&SOFTWARE_DEPLOYMENT, software_deployment, attrs)
            .await
    }

    /// Deletes a software deployment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when it does not exist and
    /// `ignore_missing` is false.
    pub async fn delete_software_deployment<'r>(
        &self,
        software_deployment: impl Into<ResourceRef<'r>>,
        ignore_missing: bool,
    ) -> Result<(), ResourceError> {
        self.proxy
            .delete(&SOFTWARE_DEPLOYMENT, software_deployment, ignore_missing)
            .await
            .map(|_| ())
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Validates a template.
    ///
    /// `template_url` is only used when no inline `template` is given.
    /// `ignore_errors` is a comma-separated list of error codes the server
    /// should tolerate.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] before any call when neither
    /// `template` nor `template_url` is given, and [`ResourceError::Http`]
    /// when the server rejects the template.
    pub async fn validate_template(
        &self,
        mut request: TemplateValidation,
        ignore_errors: Option<&str>,
    ) -> Result<Resource, ResourceError> {
        if request.template.is_none() && request.template_url.is_none() {
            return Err(ResourceError::invalid_request(
                "'template_url' must be specified when template is None",
            ));
        }
        if request.template.is_some() {
            request.template_url = None;
        }

        let body = serde_json::to_value(&request)
            .map_err(|e| ResourceError::invalid_request(e.to_string()))?;
        let mut query = BTreeMap::new();
        if let Some(codes) = ignore_errors {
            query.insert("ignore_errors".to_string(), codes.to_string());
        }

        tracing::debug!(resource = TEMPLATE.name(), "validating template");
        let response = self
            .proxy
            .send(HttpMethod::Post, TEMPLATE.base_path(), Some(body), BTreeMap::new(), query)
            .await?;
        Ok(Resource::from_response_parts(
            &TEMPLATE,
            &response.body,
            &response.headers,
        ))
    }
}
