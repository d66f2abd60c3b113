//! Response translation.
//!
//! Most endpoints return a resource (optionally wrapped in an envelope key)
//! and are hydrated directly. A few return payloads of a different shape;
//! for those a named [`Reshape`] step rewrites the parsed JSON before the
//! generic hydration runs. Nothing here knows about particular resource
//! types: reshaping steps are declared next to the resources that need them.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::clients::HttpResponse;
use crate::rest::resource::Resource;

/// A resource-specific rewrite of a parsed response body.
pub trait Reshape {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Rewrites `body` in place into a shape the schema can hydrate.
    fn reshape(&self, body: &mut Value);
}

/// Hydrates a resource from a response.
pub fn translate_response(resource: &mut Resource, response: &HttpResponse) {
    resource.hydrate(&response.body, &response.headers);
}

/// Applies a reshape step to a copy of the response body, then hydrates.
pub fn translate_with(resource: &mut Resource, response: &HttpResponse, step: &dyn Reshape) {
    let mut body = response.body.clone();
    step.reshape(&mut body);
    tracing::debug!(
        step = step.name(),
        resource = resource.schema().name(),
        "reshaped response body"
    );
    resource.hydrate(&body, &response.headers);
}

/// Returns the elements of one list page.
///
/// With a `resources_key` the array under that key is used; without one the
/// body itself must be an array. Any other shape yields an empty page.
#[must_use]
pub fn list_elements(body: &Value, resources_key: Option<&str>) -> Vec<Value> {
    let page = resources_key.map_or(Some(body), |key| body.get(key));
    match page {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!(
                key = resources_key.unwrap_or("<root>"),
                kind = json_kind(other),
                "list response page is not an array"
            );
            Vec::new()
        }
    }
}

/// Returns the `rel == "next"` link of a list body.
///
/// Links live under `<resources_key>_links` as `[{"rel": .., "href": ..}]`.
#[must_use]
pub fn next_link(body: &Value, resources_key: Option<&str>) -> Option<String> {
    let key = format!("{}_links", resources_key?);
    body.get(&key)?
        .as_array()?
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some("next"))
        .and_then(|link| link.get("href"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Maps positional `cell` arrays onto named columns.
///
/// Input shape: `{"rows": [{"cell": [..]}, ..]}`. The result is written
/// under `target_key` as an array of objects, one per row. Missing `rows`
/// produce an empty array; short rows fill the missing columns with `null`.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::rest::{Reshape, TabularReshape};
/// use serde_json::json;
///
/// static TABLE: TabularReshape = TabularReshape::new("pairs", "items", &["left", "right"]);
///
/// let mut body = json!({"rows": [{"cell": ["a", "b"]}]});
/// TABLE.reshape(&mut body);
/// assert_eq!(body["items"], json!([{"left": "a", "right": "b"}]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TabularReshape {
    name: &'static str,
    source_key: &'static str,
    target_key: &'static str,
    columns: &'static [&'static str],
}

impl TabularReshape {
    /// Creates a reshape step reading `rows` and writing `target_key`.
    #[must_use]
    pub const fn new(
        name: &'static str,
        target_key: &'static str,
        columns: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            source_key: "rows",
            target_key,
            columns,
        }
    }

    /// Returns the column names in cell order.
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    fn record(&self, row_index: usize, row: &Value) -> Value {
        let cells = row.get("cell").and_then(Value::as_array);
        let cell_count = cells.map_or(0, Vec::len);
        if cell_count != self.columns.len() {
            tracing::warn!(
                step = self.name,
                row = row_index,
                expected = self.columns.len(),
                actual = cell_count,
                "tabular row has an unexpected number of cells"
            );
        }

        let record: Map<String, Value> = self
            .columns
            .iter()
            .enumerate()
            .map(|(offset, column)| {
                let value = cells
                    .and_then(|cells| cells.get(offset))
                    .cloned()
                    .unwrap_or(Value::Null);
                ((*column).to_string(), value)
            })
            .collect();
        Value::Object(record)
    }
}

impl Reshape for TabularReshape {
    fn name(&self) -> &'static str {
        self.name
    }

    fn reshape(&self, body: &mut Value) {
        let records: Vec<Value> = body
            .get(self.source_key)
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .enumerate()
                    .map(|(index, row)| self.record(index, row))
                    .collect()
            })
            .unwrap_or_default();

        match body {
            Value::Object(object) => {
                object.insert(self.target_key.to_string(), Value::Array(records));
            }
            other => {
                let mut object = Map::new();
                object.insert(self.target_key.to_string(), Value::Array(records));
                *other = Value::Object(object);
            }
        }
    }
}

/// Returns the records a reshape step wrote under `key`.
#[must_use]
pub fn records(resource: &Resource, key: &str) -> Vec<Map<String, Value>> {
    resource
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Hydrates one list element (body only).
#[must_use]
pub fn resource_from_element(
    template: &Resource,
    element: &Value,
) -> Resource {
    let mut resource = Resource::from_response_parts(template.schema(), element, &HashMap::new());
    for (name, value) in template.path_params() {
        resource.set_path_param(name.clone(), value.clone());
    }
    resource
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::schema::{Capabilities, Field, ResourceSchema};
    use serde_json::json;

    static PAIRS: TabularReshape = TabularReshape::new("pairs", "items", &["left", "right"]);

    const HOLDER_FIELDS: &[Field] = &[Field::body("items"), Field::body("status")];
    static HOLDER: ResourceSchema = ResourceSchema::new("Holder", "/holders")
        .fields(HOLDER_FIELDS)
        .capabilities(Capabilities::READ_ONLY);

    #[test]
    fn test_tabular_reshape_maps_cells_by_offset() {
        let mut body = json!({"rows": [{"cell": ["a", "b"]}, {"cell": ["c", "d"]}], "status": "ok"});
        PAIRS.reshape(&mut body);

        assert_eq!(
            body["items"],
            json!([{"left": "a", "right": "b"}, {"left": "c", "right": "d"}])
        );
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn test_tabular_reshape_missing_rows_yields_empty_list() {
        let mut body = json!({"status": "ok"});
        PAIRS.reshape(&mut body);
        assert_eq!(body["items"], json!([]));

        let mut body = Value::Null;
        PAIRS.reshape(&mut body);
        assert_eq!(body, json!({"items": []}));
    }

    #[test]
    fn test_tabular_reshape_short_row_fills_null() {
        let mut body = json!({"rows": [{"cell": ["only"]}, {"no_cell": true}]});
        PAIRS.reshape(&mut body);
        assert_eq!(
            body["items"],
            json!([{"left": "only", "right": null}, {"left": null, "right": null}])
        );
    }

    #[test]
    fn test_translate_with_injects_records() {
        let response = HttpResponse::new(
            200,
            HashMap::new(),
            json!({"rows": [{"cell": ["x", "y"]}], "status": "ok", "total": 1}),
        );
        let mut holder = Resource::blank(&HOLDER);
        translate_with(&mut holder, &response, &PAIRS);

        let items = records(&holder, "items");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["left"], "x");
        assert_eq!(holder.get_str("status"), Some("ok"));
        assert!(holder.get("total").is_none());
        assert_eq!(response.body.get("items"), None);
    }

    #[test]
    fn test_list_elements_with_and_without_key() {
        let body = json!({"things": [{"id": 1}, {"id": 2}]});
        assert_eq!(list_elements(&body, Some("things")).len(), 2);
        assert!(list_elements(&body, Some("others")).is_empty());

        let body = json!([{"id": 1}]);
        assert_eq!(list_elements(&body, None).len(), 1);

        let body = json!({"things": "nope"});
        assert!(list_elements(&body, Some("things")).is_empty());
    }

    #[test]
    fn test_next_link_reads_links_entry() {
        let body = json!({
            "things": [],
            "things_links": [
                {"rel": "self", "href": "https://api/things"},
                {"rel": "next", "href": "https://api/things?marker=9"}
            ]
        });
        assert_eq!(
            next_link(&body, Some("things")).as_deref(),
            Some("https://api/things?marker=9")
        );
        assert_eq!(next_link(&body, None), None);
        assert_eq!(next_link(&json!({"things": []}), Some("things")), None);
    }

    #[test]
    fn test_resource_from_element_copies_path_params() {
        let template = Resource::existing(&HOLDER, "h").with_path_param("parent", "p");
        let resource = resource_from_element(&template, &json!({"status": "ok"}));
        assert_eq!(resource.path_params().get("parent"), Some(&"p".to_string()));
        assert_eq!(resource.get_str("status"), Some("ok"));
    }
}
