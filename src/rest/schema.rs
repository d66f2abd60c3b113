//! Declarative resource schemas.
//!
//! A [`ResourceSchema`] is a static description of one remote resource type:
//! its attributes and where each lives on the wire, its URI template, its
//! envelope keys, and which operations it supports. Schemas are built with
//! `const fn`s so they can be declared as `static` items and checked at
//! compile time.
//!
//! # Example
//!
//! ```rust
//! use ecl_sdk::rest::{Capabilities, Field, ResourceOperation, ResourceSchema};
//!
//! const WIDGET_FIELDS: &[Field] = &[
//!     Field::body("id"),
//!     Field::body("name"),
//!     Field::body("created_at").wire("creation_time"),
//!     Field::header("location", "location"),
//! ];
//!
//! static WIDGET: ResourceSchema = ResourceSchema::new("Widget", "/widgets")
//!     .resource_key("widget")
//!     .resources_key("widgets")
//!     .fields(WIDGET_FIELDS)
//!     .capabilities(Capabilities::ALL);
//!
//! assert_eq!(WIDGET.field("created_at").unwrap().wire, "creation_time");
//! assert!(WIDGET.allows(ResourceOperation::Update));
//! ```
//!
//! Declaring two attributes with the same name fails to compile:
//!
//! ```compile_fail
//! use ecl_sdk::rest::{Field, ResourceSchema};
//!
//! static BROKEN: ResourceSchema = ResourceSchema::new("Broken", "/broken")
//!     .fields(&[Field::body("name"), Field::body("name")]);
//! ```

use crate::clients::HttpMethod;
use crate::rest::path::ResourceOperation;

/// Where an attribute travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLocation {
    /// A key of the JSON body.
    Body,
    /// An HTTP header.
    Header,
}

/// One attribute of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Attribute name used by callers.
    pub name: &'static str,
    /// Key (or header name) used on the wire.
    pub wire: &'static str,
    /// Body or header.
    pub location: FieldLocation,
    /// Whether this attribute's value serves as the resource identifier.
    pub alternate_id: bool,
}

impl Field {
    /// A body attribute whose wire name equals its attribute name.
    #[must_use]
    pub const fn body(name: &'static str) -> Self {
        Self {
            name,
            wire: name,
            location: FieldLocation::Body,
            alternate_id: false,
        }
    }

    /// A header attribute. Header names are matched case-insensitively.
    #[must_use]
    pub const fn header(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire,
            location: FieldLocation::Header,
            alternate_id: false,
        }
    }

    /// Overrides the wire name.
    #[must_use]
    pub const fn wire(self, wire: &'static str) -> Self {
        Self { wire, ..self }
    }

    /// Flags the attribute as the alternate identifier.
    #[must_use]
    pub const fn alternate_id(self) -> Self {
        Self {
            alternate_id: true,
            ..self
        }
    }
}

/// Capability flags of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// `POST` to the base path.
    pub create: bool,
    /// `GET` a single resource.
    pub get: bool,
    /// `GET` the collection.
    pub list: bool,
    /// `PUT`/`PATCH` a single resource.
    pub update: bool,
    /// `DELETE` a single resource.
    pub delete: bool,
    /// Locate by ID or name.
    pub find: bool,
}

impl Capabilities {
    /// Nothing allowed.
    pub const NONE: Self = Self {
        create: false,
        get: false,
        list: false,
        update: false,
        delete: false,
        find: false,
    };

    /// Get, list and find.
    pub const READ_ONLY: Self = Self::NONE
        .with(ResourceOperation::Get)
        .with(ResourceOperation::List)
        .with(ResourceOperation::Find);

    /// Every operation.
    pub const ALL: Self = Self {
        create: true,
        get: true,
        list: true,
        update: true,
        delete: true,
        find: true,
    };

    /// Returns a copy with `operation` allowed.
    #[must_use]
    pub const fn with(self, operation: ResourceOperation) -> Self {
        match operation {
            ResourceOperation::Create => Self {
                create: true,
                ..self
            },
            ResourceOperation::Get => Self { get: true, ..self },
            ResourceOperation::List => Self { list: true, ..self },
            ResourceOperation::Update => Self {
                update: true,
                ..self
            },
            ResourceOperation::Delete => Self {
                delete: true,
                ..self
            },
            ResourceOperation::Find => Self { find: true, ..self },
        }
    }

    /// Returns `true` if `operation` is allowed.
    #[must_use]
    pub const fn supports(&self, operation: ResourceOperation) -> bool {
        match operation {
            ResourceOperation::Create => self.create,
            ResourceOperation::Get => self.get,
            ResourceOperation::List => self.list,
            ResourceOperation::Update => self.update,
            ResourceOperation::Delete => self.delete,
            ResourceOperation::Find => self.find,
        }
    }
}

/// Query keys every list call accepts.
pub const PAGINATION_QUERY_PARAMS: &[&str] = &["limit", "marker"];

/// Static description of a remote resource type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    name: &'static str,
    base_path: &'static str,
    resource_key: Option<&'static str>,
    resources_key: Option<&'static str>,
    fields: &'static [Field],
    capabilities: Capabilities,
    update_method: HttpMethod,
    wrap_request_body: bool,
    query_params: Option<&'static [&'static str]>,
    name_attribute: &'static str,
}

impl ResourceSchema {
    /// Starts a schema with no fields and no capabilities.
    ///
    /// Updates default to `PUT`, request bodies are sent unwrapped, every
    /// query key is passed through, and `find` matches on `name`.
    #[must_use]
    pub const fn new(name: &'static str, base_path: &'static str) -> Self {
        Self {
            name,
            base_path,
            resource_key: None,
            resources_key: None,
            fields: &[],
            capabilities: Capabilities::NONE,
            update_method: HttpMethod::Put,
            wrap_request_body: false,
            query_params: None,
            name_attribute: "name",
        }
    }

    /// Sets the envelope key of single-resource bodies.
    #[must_use]
    pub const fn resource_key(self, key: &'static str) -> Self {
        Self {
            resource_key: Some(key),
            ..self
        }
    }

    /// Sets the envelope key of list bodies.
    #[must_use]
    pub const fn resources_key(self, key: &'static str) -> Self {
        Self {
            resources_key: Some(key),
            ..self
        }
    }

    /// Sets the attribute table.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `static`) if two attributes
    /// share a name, two attributes at the same location share a wire name,
    /// or more than one attribute is flagged as the alternate identifier.
    #[must_use]
    pub const fn fields(self, fields: &'static [Field]) -> Self {
        validate_fields(fields);
        Self { fields, ..self }
    }

    /// Sets the capability flags.
    #[must_use]
    pub const fn capabilities(self, capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..self
        }
    }

    /// Sends updates with `PATCH` instead of `PUT`.
    #[must_use]
    pub const fn patch_updates(self) -> Self {
        Self {
            update_method: HttpMethod::Patch,
            ..self
        }
    }

    /// Wraps create and update bodies in `resource_key`.
    #[must_use]
    pub const fn wrap_request_body(self) -> Self {
        Self {
            wrap_request_body: true,
            ..self
        }
    }

    /// Restricts the query keys `list` accepts.
    ///
    /// `limit` and `marker` are always accepted.
    #[must_use]
    pub const fn query_params(self, params: &'static [&'static str]) -> Self {
        Self {
            query_params: Some(params),
            ..self
        }
    }

    /// Sets the attribute `find` compares against when no ID matches.
    #[must_use]
    pub const fn name_attribute(self, attribute: &'static str) -> Self {
        Self {
            name_attribute: attribute,
            ..self
        }
    }

    /// Returns the resource type name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the base URI template.
    #[must_use]
    pub const fn base_path(&self) -> &'static str {
        self.base_path
    }

    /// Returns the single-resource envelope key.
    #[must_use]
    pub const fn resource_key_name(&self) -> Option<&'static str> {
        self.resource_key
    }

    /// Returns the list envelope key.
    #[must_use]
    pub const fn resources_key_name(&self) -> Option<&'static str> {
        self.resources_key
    }

    /// Returns all declared attributes.
    #[must_use]
    pub const fn field_table(&self) -> &'static [Field] {
        self.fields
    }

    /// Returns the capability flags.
    #[must_use]
    pub const fn capability_flags(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns `true` if `operation` is allowed.
    #[must_use]
    pub const fn allows(&self, operation: ResourceOperation) -> bool {
        self.capabilities.supports(operation)
    }

    /// Returns the HTTP method used for updates.
    #[must_use]
    pub const fn update_method(&self) -> HttpMethod {
        self.update_method
    }

    /// Returns `true` if request bodies are wrapped in `resource_key`.
    #[must_use]
    pub const fn wraps_request_body(&self) -> bool {
        self.wrap_request_body && self.resource_key.is_some()
    }

    /// Returns the attribute `find` matches names against.
    #[must_use]
    pub const fn name_attr(&self) -> &'static str {
        self.name_attribute
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up an attribute by wire name at a location.
    ///
    /// Header wire names compare case-insensitively.
    #[must_use]
    pub fn field_by_wire(&self, location: FieldLocation, wire: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| {
            f.location == location
                && match location {
                    FieldLocation::Body => f.wire == wire,
                    FieldLocation::Header => f.wire.eq_ignore_ascii_case(wire),
                }
        })
    }

    /// Returns the alternate-identifier attribute, if declared.
    #[must_use]
    pub fn alternate_id(&self) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.alternate_id)
    }

    /// Returns `true` if `list` accepts the query key.
    #[must_use]
    pub fn accepts_query_param(&self, key: &str) -> bool {
        match self.query_params {
            None => true,
            Some(allowed) => {
                PAGINATION_QUERY_PARAMS.contains(&key) || allowed.contains(&key)
            }
        }
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn same_location(a: FieldLocation, b: FieldLocation) -> bool {
    matches!(
        (a, b),
        (FieldLocation::Body, FieldLocation::Body) | (FieldLocation::Header, FieldLocation::Header)
    )
}

const fn validate_fields(fields: &[Field]) {
    let mut alternate_ids = 0;
    let mut i = 0;
    while i < fields.len() {
        if fields[i].alternate_id {
            alternate_ids += 1;
        }
        let mut j = i + 1;
        while j < fields.len() {
            if str_eq(fields[i].name, fields[j].name) {
                panic!("schema declares the same attribute name twice");
            }
            if same_location(fields[i].location, fields[j].location)
                && str_eq(fields[i].wire, fields[j].wire)
            {
                panic!("schema maps two attributes to the same wire name");
            }
            j += 1;
        }
        i += 1;
    }
    if alternate_ids > 1 {
        panic!("schema declares more than one alternate identifier");
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Field>();
    assert_send_sync::<ResourceSchema>();
};
