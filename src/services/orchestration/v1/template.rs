//! Template validation result schema.
//!
//! The validation endpoint answers with capitalised keys; they are mapped
//! onto snake-case attributes.

use crate::rest::{Capabilities, Field, ResourceSchema};

const TEMPLATE_FIELDS: &[Field] = &[
    Field::body("description").wire("Description"),
    Field::body("parameters").wire("Parameters"),
    Field::body("parameter_groups").wire("ParameterGroups"),
];

/// The outcome of validating a template.
///
/// Not addressable: it is produced by
/// [`OrchestrationProxy::validate_template`](super::OrchestrationProxy::validate_template).
pub static TEMPLATE: ResourceSchema = ResourceSchema::new("Template", "/validate")
    .fields(TEMPLATE_FIELDS)
    .capabilities(Capabilities::NONE);

/// Request body for a template validation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct TemplateValidation {
    /// Inline template document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<serde_json::Value>,
    /// Environment applied while validating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<serde_json::Value>,
    /// Location of the template when it is not inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Resource;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_template_maps_capitalised_keys() {
        let template = Resource::from_response_parts(
            &TEMPLATE,
            &json!({
                "Description": "Simple template",
                "Parameters": {"flavor": {"Type": "String"}},
                "ParameterGroups": []
            }),
            &HashMap::new(),
        );
        assert_eq!(template.get_str("description"), Some("Simple template"));
        assert_eq!(template.get("parameter_groups"), Some(&json!([])));
    }

    #[test]
    fn test_template_validation_body_skips_missing_parts() {
        let body = TemplateValidation {
            template_url: Some("https://example.com/t.yaml".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, json!({"template_url": "https://example.com/t.yaml"}));
    }
}
