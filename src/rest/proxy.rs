//! The generic resource dispatcher.
//!
//! A [`Proxy`] turns verbs on a [`ResourceSchema`] into HTTP calls through a
//! [`Session`], and hydrates [`Resource`]s from the responses. It holds no
//! per-call state; service-specific proxies wrap one and add named methods.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecl_sdk::rest::Proxy;
//! use ecl_sdk::ServiceFilter;
//! use serde_json::json;
//!
//! let proxy = Proxy::new(session, ServiceFilter::new("orchestration"));
//! let stack = proxy.create(&STACK, [("stack_name", json!("web"))]).await?;
//!
//! let mut pager = proxy.list(&STACK, Default::default())?;
//! while let Some(stack) = pager.next().await {
//!     println!("{:?}", stack?.name());
//! }
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet, VecDeque};

use futures::stream::{self, Stream};
use serde_json::{Map, Value};

use crate::clients::{DataType, HttpMethod, HttpRequest, HttpResponse, HttpResponseError, Session};
use crate::config::ServiceFilter;
use crate::rest::errors::{remap_not_found, ResourceError};
use crate::rest::path::{placeholders, ResourceOperation};
use crate::rest::resource::{resolve_base_path, Resource};
use crate::rest::schema::ResourceSchema;
use crate::rest::translate::{list_elements, next_link, resource_from_element};

/// Target of a single-resource verb: an identifier or a resource instance.
#[derive(Debug, Clone)]
pub enum ResourceRef<'a> {
    /// A bare identifier.
    Id(Cow<'a, str>),
    /// A resource instance, whose identity and path parameters are used.
    Resource(&'a Resource),
}

impl ResourceRef<'_> {
    /// Returns the identifier the caller supplied, for error messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Resource(resource) => resource
                .identity()
                .ok()
                .or_else(|| resource.name().map(str::to_string))
                .unwrap_or_default(),
        }
    }

    fn to_resource(&self, schema: &'static ResourceSchema) -> Resource {
        match self {
            Self::Id(id) => Resource::existing(schema, id.to_string()),
            Self::Resource(resource) => (*resource).clone(),
        }
    }
}

impl<'a> From<&'a str> for ResourceRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(Cow::Borrowed(id))
    }
}

impl<'a> From<&'a String> for ResourceRef<'a> {
    fn from(id: &'a String) -> Self {
        Self::Id(Cow::Borrowed(id.as_str()))
    }
}

impl From<String> for ResourceRef<'static> {
    fn from(id: String) -> Self {
        Self::Id(Cow::Owned(id))
    }
}

impl<'a> From<&'a Resource> for ResourceRef<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self::Resource(resource)
    }
}

/// Stateless dispatcher bound to a session and a service.
#[derive(Debug, Clone)]
pub struct Proxy<S> {
    session: S,
    service: ServiceFilter,
}

impl<S: Session> Proxy<S> {
    /// Creates a proxy for `service` on `session`.
    #[must_use]
    pub const fn new(session: S, service: ServiceFilter) -> Self {
        Self { session, service }
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Returns the service descriptor.
    #[must_use]
    pub const fn service(&self) -> &ServiceFilter {
        &self.service
    }

    fn require(
        schema: &'static ResourceSchema,
        operation: ResourceOperation,
    ) -> Result<(), ResourceError> {
        if schema.allows(operation) {
            Ok(())
        } else {
            Err(ResourceError::MethodNotSupported {
                resource: schema.name(),
                operation,
            })
        }
    }

    /// Sends a request built from parts and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] for 404 and
    /// [`ResourceError::Http`] for any other failure.
    pub async fn send(
        &self,
        method: HttpMethod,
        uri: &str,
        body: Option<Value>,
        headers: BTreeMap<String, String>,
        query: BTreeMap<String, String>,
    ) -> Result<HttpResponse, ResourceError> {
        let mut builder = HttpRequest::builder(method, uri)
            .extra_headers(headers)
            .query(query);
        if let Some(body) = body {
            builder = builder.body(body).body_type(DataType::Json);
        }
        let request = builder.build().map_err(crate::clients::HttpError::from)?;
        Ok(self.session.request(request, &self.service).await?)
    }

    fn request_body(schema: &'static ResourceSchema, attributes: Map<String, Value>) -> Value {
        let body = Value::Object(attributes);
        match schema.resource_key_name() {
            Some(key) if schema.wraps_request_body() => {
                let mut wrapped = Map::new();
                wrapped.insert(key.to_string(), body);
                Value::Object(wrapped)
            }
            _ => body,
        }
    }

    /// Creates a resource from attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MethodNotSupported`] when the schema does not
    /// allow creation, [`ResourceError::InvalidRequest`] for undeclared
    /// attributes, or the error of the call.
    pub async fn create<I, K>(
        &self,
        schema: &'static ResourceSchema,
        attrs: I,
    ) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        Self::require(schema, ResourceOperation::Create)?;
        let resource = Resource::new(schema, attrs)?;
        self.create_resource(resource).await
    }

    /// Creates a prepared resource.
    ///
    /// Only locally assigned attributes are sent; header attributes travel
    /// as request headers.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub async fn create_resource(&self, mut resource: Resource) -> Result<Resource, ResourceError> {
        let schema = resource.schema();
        Self::require(schema, ResourceOperation::Create)?;
        tracing::debug!(resource = schema.name(), operation = "create", "proxy call");

        let uri = resource.base_uri()?;
        let body = Self::request_body(schema, resource.dirty_wire());
        let response = self
            .send(
                HttpMethod::Post,
                &uri,
                Some(body),
                resource.dirty_headers(),
                BTreeMap::new(),
            )
            .await?;
        resource.hydrate(&response.body, &response.headers);
        Ok(resource)
    }

    /// Fetches one resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] naming the resource type and
    /// identifier when the server reports it missing.
    pub async fn get<'r>(
        &self,
        schema: &'static ResourceSchema,
        target: impl Into<ResourceRef<'r>>,
    ) -> Result<Resource, ResourceError> {
        Self::require(schema, ResourceOperation::Get)?;
        let target = target.into();
        tracing::debug!(resource = schema.name(), operation = "get", "proxy call");

        let mut resource = target.to_resource(schema);
        let uri = resource.uri()?;
        let response = self
            .send(HttpMethod::Get, &uri, None, BTreeMap::new(), BTreeMap::new())
            .await
            .map_err(|e| remap_not_found(e, schema.name(), &target.label()))?;
        resource.hydrate(&response.body, &response.headers);
        Ok(resource)
    }

    /// Locates one resource by identifier or name.
    ///
    /// A direct fetch is tried first when the schema allows it; on not-found
    /// the collection is listed and filtered on identifier or the schema's
    /// name attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when nothing matches and
    /// `ignore_missing` is false, and [`ResourceError::Duplicate`] when
    /// several resources match.
    pub async fn find(
        &self,
        schema: &'static ResourceSchema,
        name_or_id: &str,
        ignore_missing: bool,
    ) -> Result<Option<Resource>, ResourceError> {
        Self::require(schema, ResourceOperation::Find)?;
        tracing::debug!(resource = schema.name(), operation = "find", name_or_id, "proxy call");

        if schema.allows(ResourceOperation::Get) {
            match self.get(schema, name_or_id).await {
                Ok(resource) => return Ok(Some(resource)),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        let mut matches = Vec::new();
        if schema.allows(ResourceOperation::List) {
            tracing::debug!(resource = schema.name(), name_or_id, "find falling back to list");
            let mut pager = self.list(schema, BTreeMap::new())?;
            while let Some(item) = pager.next().await {
                let item = item?;
                let id_matches = item.identity().is_ok_and(|id| id == name_or_id);
                if id_matches || item.name() == Some(name_or_id) {
                    matches.push(item);
                }
            }
        }

        match matches.len() {
            0 if ignore_missing => Ok(None),
            0 => Err(ResourceError::NotFound(HttpResponseError {
                message: format!("No {} found for {}", schema.name(), name_or_id),
                details: Some(format!(
                    "No {} matched '{}' by id or {}",
                    schema.name(),
                    name_or_id,
                    schema.name_attr()
                )),
                http_status: Some(404),
                ..HttpResponseError::default()
            })),
            1 => Ok(matches.pop()),
            _ => Err(ResourceError::Duplicate(HttpResponseError {
                message: format!(
                    "More than one {} exists with the name '{}'.",
                    schema.name(),
                    name_or_id
                ),
                ..HttpResponseError::default()
            })),
        }
    }

    /// Lists resources lazily.
    ///
    /// Query keys named like placeholders of the schema's URI template fill
    /// the template; the rest are sent as query parameters and must be
    /// accepted by the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] for query keys the schema
    /// does not accept and [`ResourceError::PathResolutionFailed`] for
    /// missing path parameters. No call is made in either case.
    pub fn list(
        &self,
        schema: &'static ResourceSchema,
        query: BTreeMap<String, String>,
    ) -> Result<ResourcePager<'_, S>, ResourceError> {
        Self::require(schema, ResourceOperation::List)?;

        let mut path_params = BTreeMap::new();
        let mut remaining = query;
        for name in placeholders(schema.base_path()) {
            if let Some(value) = remaining.remove(name) {
                path_params.insert(name.to_string(), value);
            }
        }

        let invalid: Vec<&str> = remaining
            .keys()
            .map(String::as_str)
            .filter(|key| !schema.accepts_query_param(key))
            .collect();
        if !invalid.is_empty() {
            return Err(ResourceError::invalid_request(format!(
                "Invalid query params for {}: {}",
                schema.name(),
                invalid.join(", ")
            )));
        }

        let uri = resolve_base_path(schema, &path_params)?;
        let mut template = Resource::blank(schema);
        for (name, value) in path_params {
            template.set_path_param(name, value);
        }

        tracing::debug!(resource = schema.name(), operation = "list", uri = %uri, "proxy call");
        Ok(ResourcePager::new(self, template, uri, remaining))
    }

    /// Updates a resource with exactly the given attributes.
    ///
    /// Only `attrs` are serialized, whatever else the resource holds. The
    /// schema decides between `PUT` and `PATCH`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] naming the resource when it no
    /// longer exists, or the error of the call.
    pub async fn update<'r, I, K>(
        &self,
        schema: &'static ResourceSchema,
        target: impl Into<ResourceRef<'r>>,
        attrs: I,
    ) -> Result<Resource, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        Self::require(schema, ResourceOperation::Update)?;
        let target = target.into();
        tracing::debug!(resource = schema.name(), operation = "update", "proxy call");

        let mut resource = target.to_resource(schema);
        resource.mark_clean();
        for (name, value) in attrs {
            resource.set(name.as_ref(), value)?;
        }

        let uri = resource.uri()?;
        let body = Self::request_body(schema, resource.dirty_wire());
        let response = self
            .send(
                schema.update_method(),
                &uri,
                Some(body),
                resource.dirty_headers(),
                BTreeMap::new(),
            )
            .await
            .map_err(|e| remap_not_found(e, schema.name(), &target.label()))?;
        resource.hydrate(&response.body, &response.headers);
        Ok(resource)
    }

    /// Deletes a resource.
    ///
    /// Returns the addressed resource, or `None` when it was already gone
    /// and `ignore_missing` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the resource is missing and
    /// `ignore_missing` is false.
    pub async fn delete<'r>(
        &self,
        schema: &'static ResourceSchema,
        target: impl Into<ResourceRef<'r>>,
        ignore_missing: bool,
    ) -> Result<Option<Resource>, ResourceError> {
        Self::require(schema, ResourceOperation::Delete)?;
        let target = target.into();
        tracing::debug!(resource = schema.name(), operation = "delete", ignore_missing, "proxy call");

        let resource = target.to_resource(schema);
        let uri = resource.uri()?;
        match self
            .send(HttpMethod::Delete, &uri, None, BTreeMap::new(), BTreeMap::new())
            .await
        {
            Ok(_) => Ok(Some(resource)),
            Err(e) if e.is_not_found() && ignore_missing => Ok(None),
            Err(e) => Err(remap_not_found(e, schema.name(), &target.label())),
        }
    }

    /// Invokes a resource-specific action.
    ///
    /// Not-found is re-raised as `No {resource} found for {caller_id}` with
    /// the original diagnostics kept.
    ///
    /// # Errors
    ///
    /// Returns the remapped not-found error or the error of the call.
    pub async fn action(
        &self,
        resource_type: &str,
        method: HttpMethod,
        uri: &str,
        body: Option<Value>,
        caller_id: &str,
    ) -> Result<HttpResponse, ResourceError> {
        tracing::debug!(resource = resource_type, method = method.as_str(), uri, "invoking action");
        self.send(method, uri, body, BTreeMap::new(), BTreeMap::new())
            .await
            .map_err(|e| remap_not_found(e, resource_type, caller_id))
    }

    /// Invokes an action, optionally tolerating a missing resource.
    ///
    /// Returns `None` instead of the remapped not-found error when
    /// `ignore_missing` is set.
    ///
    /// # Errors
    ///
    /// See [`action`](Self::action).
    pub async fn invoke_action(
        &self,
        resource_type: &str,
        method: HttpMethod,
        uri: &str,
        body: Option<Value>,
        caller_id: &str,
        ignore_missing: bool,
    ) -> Result<Option<HttpResponse>, ResourceError> {
        match self.action(resource_type, method, uri, body, caller_id).await {
            Ok(response) => Ok(Some(response)),
            Err(e) if e.is_not_found() && ignore_missing => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// A lazy, finite, non-restartable sequence of listed resources.
///
/// Pages are fetched on demand. Elements are yielded in page order, then in
/// the order the server returned them. Iteration stops after a page without
/// a continuation link, an empty page, a link already followed, or the
/// first error.
pub struct ResourcePager<'a, S> {
    proxy: &'a Proxy<S>,
    template: Resource,
    buffer: VecDeque<Value>,
    next_request: Option<(String, BTreeMap<String, String>)>,
    followed: HashSet<String>,
}

impl<'a, S: Session> ResourcePager<'a, S> {
    fn new(
        proxy: &'a Proxy<S>,
        template: Resource,
        uri: String,
        query: BTreeMap<String, String>,
    ) -> Self {
        Self {
            proxy,
            template,
            buffer: VecDeque::new(),
            next_request: Some((uri, query)),
            followed: HashSet::new(),
        }
    }

    async fn fetch_page(&mut self) -> Result<(), ResourceError> {
        let Some((uri, query)) = self.next_request.take() else {
            return Ok(());
        };
        self.followed.insert(uri.clone());

        let response = self
            .proxy
            .send(HttpMethod::Get, &uri, None, BTreeMap::new(), query)
            .await?;

        let resources_key = self.template.schema().resources_key_name();
        let elements = list_elements(&response.body, resources_key);
        if elements.is_empty() {
            return Ok(());
        }

        let link = next_link(&response.body, resources_key).or(response.next_page_uri);
        self.next_request = link
            .filter(|link| !self.followed.contains(link))
            .map(|link| (link, BTreeMap::new()));
        self.buffer.extend(elements);
        Ok(())
    }

    /// Returns the next resource, fetching another page when needed.
    pub async fn next(&mut self) -> Option<Result<Resource, ResourceError>> {
        loop {
            if let Some(element) = self.buffer.pop_front() {
                return Some(Ok(resource_from_element(&self.template, &element)));
            }
            self.next_request.as_ref()?;
            if let Err(e) = self.fetch_page().await {
                self.next_request = None;
                return Some(Err(e));
            }
        }
    }

    /// Drains the sequence into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn try_collect(mut self) -> Result<Vec<Resource>, ResourceError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Converts the pager into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<Resource, ResourceError>> + 'a
    where
        S: 'a,
    {
        stream::unfold(self, |mut pager| async move {
            pager.next().await.map(|item| (item, pager))
        })
    }
}

impl<S> std::fmt::Debug for ResourcePager<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourcePager")
            .field("resource", &self.template.schema().name())
            .field("buffered", &self.buffer.len())
            .field("next_request", &self.next_request)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::schema::{Capabilities, Field};
    use serde_json::json;
    use std::collections::HashMap;

    const FIELDS: &[Field] = &[Field::body("id"), Field::body("name")];
    static THING: ResourceSchema = ResourceSchema::new("Thing", "/things")
        .fields(FIELDS)
        .capabilities(Capabilities::ALL);

    #[test]
    fn test_resource_ref_label() {
        assert_eq!(ResourceRef::from("t-1").label(), "t-1");
        assert_eq!(ResourceRef::from(String::from("t-2")).label(), "t-2");

        let hydrated = Resource::from_response_parts(&THING, &json!({"id": "t-3"}), &HashMap::new());
        assert_eq!(ResourceRef::from(&hydrated).label(), "t-3");

        let unsaved = Resource::new(&THING, [("name", json!("alpha"))]).unwrap();
        assert_eq!(ResourceRef::from(&unsaved).label(), "alpha");
    }

    #[test]
    fn test_resource_ref_to_resource_keeps_path_params() {
        let existing = Resource::existing(&THING, "t-1").with_path_param("owner", "o-1");
        let resource = ResourceRef::from(&existing).to_resource(&THING);
        assert_eq!(resource.path_params().get("owner").map(String::as_str), Some("o-1"));

        let bare = ResourceRef::from("t-2").to_resource(&THING);
        assert_eq!(bare.uri().unwrap(), "/things/t-2");
    }

    #[test]
    fn test_request_body_wrapping() {
        static WRAPPED: ResourceSchema = ResourceSchema::new("Wrapped", "/wrapped")
            .resource_key("wrapped")
            .fields(FIELDS)
            .wrap_request_body();

        let mut attrs = Map::new();
        attrs.insert("name".to_string(), json!("n"));
        assert_eq!(
            Proxy::<crate::clients::HttpSession>::request_body(&WRAPPED, attrs.clone()),
            json!({"wrapped": {"name": "n"}})
        );
        assert_eq!(
            Proxy::<crate::clients::HttpSession>::request_body(&THING, attrs),
            json!({"name": "n"})
        );
    }
}
