//! Resource instances.
//!
//! A [`Resource`] is one instance of a [`ResourceSchema`]: the attribute
//! values it currently holds (split into body and header components), which
//! of them were assigned locally, the primary identifier once known, and the
//! parent identifiers needed to build its URI.
//!
//! # Lifecycle
//!
//! Resources are created from caller attributes with [`Resource::new`] or
//! hydrated from a server response with [`Resource::from_response_parts`].
//! They change only through local assignment before a create or update, or
//! through hydration after a successful response.
//!
//! # Example
//!
//! ```rust
//! use ecl_sdk::rest::{Capabilities, Field, Resource, ResourceSchema};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! const FIELDS: &[Field] = &[Field::body("id"), Field::body("name"), Field::body("status")];
//! static THING: ResourceSchema = ResourceSchema::new("Thing", "/things")
//!     .resource_key("thing")
//!     .fields(FIELDS)
//!     .capabilities(Capabilities::ALL);
//!
//! let mut thing = Resource::new(&THING, [("name", json!("alpha"))]).unwrap();
//! assert!(thing.is_dirty());
//!
//! thing.hydrate(
//!     &json!({"thing": {"id": "t-1", "name": "alpha", "status": "ACTIVE", "extra": 1}}),
//!     &HashMap::new(),
//! );
//! assert_eq!(thing.id(), Some("t-1"));
//! assert_eq!(thing.get_str("status"), Some("ACTIVE"));
//! assert!(thing.get("extra").is_none());
//! assert!(!thing.is_dirty());
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::rest::errors::ResourceError;
use crate::rest::path::{build_path, join_id};
use crate::rest::schema::{FieldLocation, ResourceSchema};
use crate::rest::tracking::ComponentState;

/// Name of the attribute used as identifier when no alternate is declared.
pub const ID_ATTRIBUTE: &str = "id";

/// An instance of a [`ResourceSchema`].
#[derive(Debug, Clone)]
pub struct Resource {
    schema: &'static ResourceSchema,
    id: Option<String>,
    lookup_key: Option<String>,
    body: ComponentState,
    header: ComponentState,
    path_params: BTreeMap<String, String>,
}

impl Resource {
    /// Creates a resource from caller-supplied attributes.
    ///
    /// Every supplied attribute is marked dirty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] if an attribute is not
    /// declared by the schema.
    pub fn new<I, K>(schema: &'static ResourceSchema, attrs: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut resource = Self::blank(schema);
        for (name, value) in attrs {
            resource.set(name.as_ref(), value)?;
        }
        Ok(resource)
    }

    /// Creates a resource addressed by a caller-supplied key.
    ///
    /// The key (an identifier or a name) only builds request URIs until a
    /// response supplies the server's identifier.
    #[must_use]
    pub fn existing(schema: &'static ResourceSchema, key: impl Into<String>) -> Self {
        let mut resource = Self::blank(schema);
        resource.lookup_key = Some(key.into());
        resource
    }

    /// Creates a resource by hydrating a raw body and headers.
    #[must_use]
    pub fn from_response_parts(
        schema: &'static ResourceSchema,
        raw_body: &Value,
        raw_headers: &HashMap<String, Vec<String>>,
    ) -> Self {
        let mut resource = Self::blank(schema);
        resource.hydrate(raw_body, raw_headers);
        resource
    }

    /// Creates a resource with no attributes and no identifier.
    #[must_use]
    pub fn blank(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            id: None,
            lookup_key: None,
            body: ComponentState::default(),
            header: ComponentState::default(),
            path_params: BTreeMap::new(),
        }
    }

    /// Sets a path parameter used to fill the schema's URI template.
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_path_param(name, value);
        self
    }

    /// Sets a path parameter in place.
    pub fn set_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.path_params.insert(name.into(), value.into());
    }

    /// Returns the path parameters.
    #[must_use]
    pub const fn path_params(&self) -> &BTreeMap<String, String> {
        &self.path_params
    }

    /// Returns the schema this resource is an instance of.
    #[must_use]
    pub const fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// Assigns an attribute locally and marks it dirty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidRequest`] if the attribute is not
    /// declared by the schema.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        let field = self.schema.field(name).ok_or_else(|| {
            ResourceError::invalid_request(format!(
                "{} has no attribute '{}'",
                self.schema.name(),
                name
            ))
        })?;
        match field.location {
            FieldLocation::Body => self.body.set(field.wire, value),
            FieldLocation::Header => self.header.set(field.wire, value),
        }
        Ok(())
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let field = self.schema.field(name)?;
        match field.location {
            FieldLocation::Body => self.body.get(field.wire),
            FieldLocation::Header => self.header.get(field.wire),
        }
    }

    /// Returns the value of an attribute if it is a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Converts one attribute into a typed value.
    ///
    /// Returns `Ok(None)` when the attribute is unset or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialize`] if the value has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ResourceError> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| ResourceError::Deserialize {
                    resource: self.schema.name(),
                    source,
                }),
        }
    }

    /// Parses a timestamp attribute.
    ///
    /// Accepts RFC 3339 and zone-less ISO 8601 values (taken as UTC).
    #[must_use]
    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        let raw = self.get_str(name)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Returns every set attribute keyed by attribute name.
    #[must_use]
    pub fn attributes(&self) -> Map<String, Value> {
        self.schema
            .field_table()
            .iter()
            .filter_map(|field| {
                self.get(field.name)
                    .map(|value| (field.name.to_string(), value.clone()))
            })
            .collect()
    }

    /// Converts all attributes into a typed view.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Deserialize`] if the attributes do not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ResourceError> {
        serde_json::from_value(Value::Object(self.attributes())).map_err(|source| {
            ResourceError::Deserialize {
                resource: self.schema.name(),
                source,
            }
        })
    }

    /// Returns the value of the schema's name attribute.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str(self.schema.name_attr())
    }

    /// Returns the identifier pinned from a server response, if any.
    ///
    /// A lookup key given to [`Resource::existing`] is never returned here.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns `true` if any attribute was assigned locally since the last
    /// hydration.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.body.is_dirty() || self.header.is_dirty()
    }

    /// Clears all dirty flags.
    pub fn mark_clean(&mut self) {
        self.body.mark_clean();
        self.header.mark_clean();
    }

    /// Merges a server response into the resource.
    ///
    /// The body is unwrapped from `resource_key` when that key is present.
    /// Only declared wire names are kept; `null` values are captured. Merged
    /// keys lose their dirty flag. The identifier is pinned the first time
    /// one can be resolved and never changes afterwards. Hydrating twice with
    /// the same input yields the same state.
    pub fn hydrate(&mut self, raw_body: &Value, raw_headers: &HashMap<String, Vec<String>>) {
        let body = match self.schema.resource_key_name() {
            Some(key) => match raw_body.get(key) {
                Some(inner) if inner.is_object() => inner,
                _ => raw_body,
            },
            None => raw_body,
        };

        if let Some(object) = body.as_object() {
            let schema = self.schema;
            self.body.merge(
                object
                    .iter()
                    .filter(|(wire, _)| schema.field_by_wire(FieldLocation::Body, wire).is_some())
                    .map(|(wire, value)| (wire.clone(), value.clone())),
            );
        }

        let headers: Vec<(String, Value)> = self
            .schema
            .field_table()
            .iter()
            .filter(|field| field.location == FieldLocation::Header)
            .filter_map(|field| {
                raw_headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(field.wire))
                    .and_then(|(_, values)| values.first())
                    .map(|value| (field.wire.to_string(), Value::String(value.clone())))
            })
            .collect();
        self.header.merge(headers);

        if self.id.is_none() {
            self.id = self.resolved_attribute_id();
        }
    }

    fn resolved_attribute_id(&self) -> Option<String> {
        let alternate = self
            .schema
            .alternate_id()
            .and_then(|field| self.get(field.name))
            .and_then(value_to_id);
        alternate.or_else(|| {
            self.schema
                .field(ID_ATTRIBUTE)
                .and_then(|_| self.get(ID_ATTRIBUTE))
                .and_then(value_to_id)
        })
    }

    /// Returns the primary identifier.
    ///
    /// Resolution order: the pinned identifier, the alternate-id attribute,
    /// the `id` attribute, then the lookup key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Identity`] when none is available.
    pub fn identity(&self) -> Result<String, ResourceError> {
        self.id
            .clone()
            .or_else(|| self.resolved_attribute_id())
            .or_else(|| self.lookup_key.clone())
            .ok_or(ResourceError::Identity {
                resource: self.schema.name(),
            })
    }

    /// Returns all body attributes keyed by wire name.
    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        self.body.values().clone()
    }

    /// Returns the locally assigned body attributes keyed by wire name.
    #[must_use]
    pub fn dirty_wire(&self) -> Map<String, Value> {
        self.body.dirty_values()
    }

    /// Returns the locally assigned header attributes as header strings.
    #[must_use]
    pub fn dirty_headers(&self) -> BTreeMap<String, String> {
        self.header
            .dirty_values()
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(wire, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (wire, value)
            })
            .collect()
    }

    /// Returns the collection URI with path parameters substituted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if a placeholder has
    /// no value.
    pub fn base_uri(&self) -> Result<String, ResourceError> {
        resolve_base_path(self.schema, &self.path_params)
    }

    /// Returns the URI of this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] or
    /// [`ResourceError::Identity`].
    pub fn uri(&self) -> Result<String, ResourceError> {
        let base = self.base_uri()?;
        Ok(join_id(&base, &self.identity()?))
    }
}

/// Substitutes path parameters into a schema's base path.
///
/// # Errors
///
/// Returns [`ResourceError::PathResolutionFailed`] naming the first missing
/// placeholder.
#[allow(clippy::implicit_hasher)]
pub fn resolve_base_path(
    schema: &'static ResourceSchema,
    params: &BTreeMap<String, String>,
) -> Result<String, ResourceError> {
    build_path(schema.base_path(), params).map_err(|param| ResourceError::PathResolutionFailed {
        resource: schema.name(),
        param: param.to_string(),
    })
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};
