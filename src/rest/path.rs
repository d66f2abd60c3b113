//! URI template handling for resource schemas.
//!
//! Base paths may be parameterized by parent identifiers, for example
//! `/stacks/{stack_name}/{stack_id}/resources`. Parameters are substituted
//! percent-encoded; a missing parameter is reported by name.
//!
//! # Example
//!
//! ```rust
//! use ecl_sdk::rest::build_path;
//! use std::collections::BTreeMap;
//!
//! let mut params = BTreeMap::new();
//! params.insert("stack_name".to_string(), "web tier".to_string());
//! params.insert("stack_id".to_string(), "42".to_string());
//!
//! let uri = build_path("/stacks/{stack_name}/{stack_id}/resources", &params).unwrap();
//! assert_eq!(uri, "/stacks/web%20tier/42/resources");
//!
//! let missing = build_path("/stacks/{stack_name}", &BTreeMap::new());
//! assert_eq!(missing, Err("stack_name"));
//! ```

use crate::clients::HttpMethod;
use std::collections::BTreeMap;
use std::fmt;

/// Operations a schema can allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create a new resource (POST /resources).
    Create,
    /// Fetch a single resource by ID (GET /resources/{id}).
    Get,
    /// List resources (GET /resources).
    List,
    /// Update an existing resource (PUT or PATCH /resources/{id}).
    Update,
    /// Delete a resource (DELETE /resources/{id}).
    Delete,
    /// Locate a resource by ID or name.
    Find,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    ///
    /// Schemas may override the update method with PATCH.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::List | Self::Find => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Find => "find",
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the placeholder names of a template in order of appearance.
///
/// ```rust
/// use ecl_sdk::rest::placeholders;
///
/// let names: Vec<&str> = placeholders("/stacks/{stack_name}/{stack_id}/resources").collect();
/// assert_eq!(names, vec!["stack_name", "stack_id"]);
/// ```
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    template.split('{').skip(1).filter_map(|chunk| {
        let end = chunk.find('}')?;
        let name = &chunk[..end];
        (!name.is_empty()).then_some(name)
    })
}

/// Builds a URI from a template by substituting `{name}` placeholders.
///
/// Values are percent-encoded so identifiers containing `/` or spaces stay
/// within one path segment.
///
/// # Errors
///
/// Returns the name of the first placeholder without a value.
#[allow(clippy::implicit_hasher)]
pub fn build_path<'t>(
    template: &'t str,
    params: &BTreeMap<String, String>,
) -> Result<String, &'t str> {
    let mut result = template.to_string();
    for name in placeholders(template) {
        let value = params.get(name).ok_or(name)?;
        result = result.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
    }
    Ok(result)
}

/// Appends an encoded identifier segment to a base URI.
///
/// ```rust
/// use ecl_sdk::rest::join_id;
///
/// assert_eq!(join_id("/stacks", "web/1"), "/stacks/web%2F1");
/// assert_eq!(join_id("/stacks/", "web"), "/stacks/web");
/// ```
#[must_use]
pub fn join_id(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), urlencoding::encode(id))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_path_template_interpolation_single_param() {
        let result = build_path("/plans/{plan_id}", &params(&[("plan_id", "p-1")]));
        assert_eq!(result.unwrap(), "/plans/p-1");
    }

    #[test]
    fn test_path_template_interpolation_multiple_params() {
        let result = build_path(
            "/stacks/{stack_name}/{stack_id}/resources",
            &params(&[("stack_name", "web"), ("stack_id", "abc")]),
        );
        assert_eq!(result.unwrap(), "/stacks/web/abc/resources");
    }

    #[test]
    fn test_build_path_reports_missing_param() {
        let result = build_path(
            "/stacks/{stack_name}/{stack_id}/resources",
            &params(&[("stack_name", "web")]),
        );
        assert_eq!(result, Err("stack_id"));
    }

    #[test]
    fn test_build_path_encodes_values() {
        let result = build_path("/stacks/{stack_name}", &params(&[("stack_name", "a/b c")]));
        assert_eq!(result.unwrap(), "/stacks/a%2Fb%20c");
    }

    #[test]
    fn test_build_path_without_placeholders_ignores_params() {
        let result = build_path("/stacks", &params(&[("extra", "1")]));
        assert_eq!(result.unwrap(), "/stacks");
    }

    #[test]
    fn test_placeholders_skip_empty_braces() {
        let names: Vec<&str> = placeholders("/a/{}/b/{x}").collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_resource_operation_default_http_method() {
        assert_eq!(ResourceOperation::Get.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::List.default_http_method(), HttpMethod::Get);
        assert_eq!(
            ResourceOperation::Create.default_http_method(),
            HttpMethod::Post
        );
        assert_eq!(
            ResourceOperation::Update.default_http_method(),
            HttpMethod::Put
        );
        assert_eq!(
            ResourceOperation::Delete.default_http_method(),
            HttpMethod::Delete
        );
    }

    #[test]
    fn test_resource_operation_display() {
        assert_eq!(ResourceOperation::Find.to_string(), "find");
        assert_eq!(ResourceOperation::List.as_str(), "list");
    }
}
