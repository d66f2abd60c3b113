//! Integration tests for the generic proxy.
//!
//! These tests drive [`Proxy`] through a scripted session and verify the
//! requests it sends, how responses are hydrated, pagination, and the
//! not-found handling of every verb.

mod common;

use std::collections::BTreeMap;

use common::{MockSession, BASE_URL};
use ecl_sdk::rest::{
    Capabilities, Field, Proxy, Resource, ResourceError, ResourceOperation, ResourceSchema,
};
use ecl_sdk::{HttpMethod, ServiceFilter};
use futures::StreamExt;
use serde_json::json;

const WIDGET_FIELDS: &[Field] = &[
    Field::body("id"),
    Field::body("name"),
    Field::body("description"),
    Field::body("status"),
    Field::header("request_tag", "x-request-tag"),
];

static WIDGET: ResourceSchema = ResourceSchema::new("Widget", "/widgets")
    .resource_key("widget")
    .resources_key("widgets")
    .fields(WIDGET_FIELDS)
    .capabilities(Capabilities::ALL)
    .query_params(&["status"]);

static PATCHED_WIDGET: ResourceSchema = ResourceSchema::new("PatchedWidget", "/patched")
    .resource_key("widget")
    .resources_key("widgets")
    .fields(WIDGET_FIELDS)
    .capabilities(Capabilities::ALL)
    .patch_updates()
    .wrap_request_body();

static READ_ONLY_WIDGET: ResourceSchema = ResourceSchema::new("ReadOnlyWidget", "/widgets")
    .resource_key("widget")
    .resources_key("widgets")
    .fields(WIDGET_FIELDS)
    .capabilities(Capabilities::READ_ONLY);

const PART_FIELDS: &[Field] = &[Field::body("slot").alternate_id(), Field::body("kind")];

static PART: ResourceSchema = ResourceSchema::new("Part", "/widgets/{widget_id}/parts")
    .resources_key("parts")
    .fields(PART_FIELDS)
    .capabilities(Capabilities::NONE.with(ResourceOperation::List));

fn proxy(session: &MockSession) -> Proxy<&MockSession> {
    Proxy::new(session, ServiceFilter::new("widgets"))
}

fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_posts_assigned_attributes_and_hydrates() {
    let session = MockSession::new().respond_with_headers(
        201,
        &[("X-Request-Tag", "tag-from-server")],
        json!({"widget": {"id": "w-1", "name": "alpha", "status": "BUILDING", "owner": "x"}}),
    );
    let proxy = proxy(&session);

    let widget = proxy
        .create(
            &WIDGET,
            [("name", json!("alpha")), ("request_tag", json!("tag-1"))],
        )
        .await
        .unwrap();

    assert_eq!(widget.id(), Some("w-1"));
    assert_eq!(widget.get_str("status"), Some("BUILDING"));
    assert_eq!(widget.get_str("request_tag"), Some("tag-from-server"));
    assert!(!widget.is_dirty());

    let requests = session.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method(), HttpMethod::Post);
    assert_eq!(requests[0].uri(), "/widgets");
    assert_eq!(requests[0].body(), Some(&json!({"name": "alpha"})));
    assert_eq!(requests[0].header("x-request-tag"), Some("tag-1"));
    assert_eq!(requests[0].service.service_type(), "widgets");
}

#[tokio::test]
async fn test_create_wraps_body_when_configured() {
    let session = MockSession::new().respond(201, json!({"widget": {"id": "w-2"}}));
    let proxy = proxy(&session);

    proxy
        .create(&PATCHED_WIDGET, [("name", json!("beta"))])
        .await
        .unwrap();

    assert_eq!(
        session.requests()[0].body(),
        Some(&json!({"widget": {"name": "beta"}}))
    );
}

#[tokio::test]
async fn test_create_without_capability_fails_before_any_call() {
    let session = MockSession::new();
    let proxy = proxy(&session);

    let result = proxy
        .create(&READ_ONLY_WIDGET, [("name", json!("gamma"))])
        .await;

    match result {
        Err(ResourceError::MethodNotSupported {
            resource,
            operation,
        }) => {
            assert_eq!(resource, "ReadOnlyWidget");
            assert_eq!(operation, ResourceOperation::Create);
        }
        other => panic!("expected MethodNotSupported, got {other:?}"),
    }
    assert_eq!(session.request_count(), 0);
}

#[tokio::test]
async fn test_create_rejects_unknown_attribute_before_any_call() {
    let session = MockSession::new();
    let proxy = proxy(&session);

    let result = proxy.create(&WIDGET, [("colour", json!("red"))]).await;

    assert!(matches!(result, Err(ResourceError::InvalidRequest(_))));
    assert_eq!(session.request_count(), 0);
}

// ============================================================================
// Get
// ============================================================================

#[tokio::test]
async fn test_get_filters_unknown_fields_and_keeps_nulls() {
    let session = MockSession::new().respond(
        200,
        json!({"widget": {"id": "w-1", "name": "alpha", "description": null, "secret": "s"}}),
    );
    let proxy = proxy(&session);

    let widget = proxy.get(&WIDGET, "w-1").await.unwrap();

    assert_eq!(session.requests()[0].uri(), "/widgets/w-1");
    assert_eq!(widget.get("description"), Some(&serde_json::Value::Null));
    assert!(widget.attributes().get("secret").is_none());
    assert_eq!(widget.attributes().len(), 3);
}

#[tokio::test]
async fn test_get_by_name_takes_identifier_from_response() {
    let session = MockSession::new()
        .respond(200, json!({"widget": {"id": "t-1", "name": "alpha"}}))
        .respond(204, serde_json::Value::Null);
    let proxy = proxy(&session);

    let widget = proxy.get(&WIDGET, "alpha").await.unwrap();

    assert_eq!(widget.id(), Some("t-1"));
    assert_eq!(widget.identity().unwrap(), "t-1");
    assert_eq!(widget.uri().unwrap(), "/widgets/t-1");

    proxy.delete(&WIDGET, &widget, false).await.unwrap();
    let requests = session.requests();
    assert_eq!(requests[0].uri(), "/widgets/alpha");
    assert_eq!(requests[1].uri(), "/widgets/t-1");
}

#[tokio::test]
async fn test_get_accepts_resource_instance() {
    let session = MockSession::new().respond(200, json!({"widget": {"id": "w-9", "status": "OK"}}));
    let proxy = proxy(&session);
    let existing = Resource::existing(&WIDGET, "w-9");

    let widget = proxy.get(&WIDGET, &existing).await.unwrap();

    assert_eq!(widget.get_str("status"), Some("OK"));
    assert_eq!(session.requests()[0].uri(), "/widgets/w-9");
}

#[tokio::test]
async fn test_get_not_found_names_resource_and_identifier() {
    let session = MockSession::new().respond_not_found("Widget w-404 could not be found.");
    let proxy = proxy(&session);

    let error = proxy.get(&WIDGET, "w-404").await.unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "No Widget found for w-404");
    assert_eq!(error.details(), Some("Widget w-404 could not be found."));
    assert_eq!(error.request_id(), Some("req-404"));
    assert_eq!(error.http_status(), Some(404));
    let record = error.response_error().unwrap();
    assert_eq!(record.url.as_deref(), Some(format!("{BASE_URL}/widgets/w-404").as_str()));
    assert_eq!(record.method, Some(HttpMethod::Get));
}

#[tokio::test]
async fn test_server_error_is_wrapped_not_remapped() {
    let session = MockSession::new().respond(500, json!({"message": "database down"}));
    let proxy = proxy(&session);

    let error = proxy.get(&WIDGET, "w-1").await.unwrap_err();

    assert!(matches!(error, ResourceError::Http(_)));
    assert_eq!(error.http_status(), Some(500));
    assert_eq!(error.details(), Some("database down"));
}

// ============================================================================
// Find
// ============================================================================

#[tokio::test]
async fn test_find_returns_direct_hit() {
    let session = MockSession::new().respond(200, json!({"widget": {"id": "w-1", "name": "alpha"}}));
    let proxy = proxy(&session);

    let found = proxy.find(&WIDGET, "w-1", false).await.unwrap();

    assert_eq!(found.unwrap().id(), Some("w-1"));
    assert_eq!(session.request_count(), 1);
}

#[tokio::test]
async fn test_find_falls_back_to_name_match() {
    let session = MockSession::new()
        .respond_not_found("no such widget")
        .respond(
            200,
            json!({"widgets": [
                {"id": "w-1", "name": "alpha"},
                {"id": "w-2", "name": "beta"}
            ]}),
        );
    let proxy = proxy(&session);

    let found = proxy.find(&WIDGET, "beta", false).await.unwrap().unwrap();

    assert_eq!(found.id(), Some("w-2"));
    let requests = session.requests();
    assert_eq!(requests[0].uri(), "/widgets/beta");
    assert_eq!(requests[1].uri(), "/widgets");
}

#[tokio::test]
async fn test_find_missing_with_ignore_missing_returns_none() {
    let session = MockSession::new()
        .respond_not_found("no such widget")
        .respond(200, json!({"widgets": [{"id": "w-1", "name": "alpha"}]}));
    let proxy = proxy(&session);

    let found = proxy.find(&WIDGET, "omega", true).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_missing_without_ignore_missing_fails_with_details() {
    let session = MockSession::new()
        .respond_not_found("no such widget")
        .respond(200, json!({"widgets": []}));
    let proxy = proxy(&session);

    let error = proxy.find(&WIDGET, "omega", false).await.unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "No Widget found for omega");
    assert!(!error.details().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_find_ambiguous_name_is_duplicate() {
    let session = MockSession::new()
        .respond_not_found("no such widget")
        .respond(
            200,
            json!({"widgets": [
                {"id": "w-1", "name": "twin"},
                {"id": "w-2", "name": "twin"}
            ]}),
        );
    let proxy = proxy(&session);

    let error = proxy.find(&WIDGET, "twin", false).await.unwrap_err();

    match error {
        ResourceError::Duplicate(e) => {
            assert_eq!(e.message, "More than one Widget exists with the name 'twin'.");
        }
        other => panic!("expected Duplicate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_find_propagates_non_not_found_errors() {
    let session = MockSession::new().respond(403, json!({"message": "forbidden"}));
    let proxy = proxy(&session);

    let error = proxy.find(&WIDGET, "alpha", true).await.unwrap_err();

    assert_eq!(error.http_status(), Some(403));
    assert_eq!(session.request_count(), 1);
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_follows_body_links_in_order() {
    let session = MockSession::new()
        .respond(
            200,
            json!({
                "widgets": [{"id": "a"}, {"id": "b"}],
                "widgets_links": [{"rel": "next", "href": "https://api.test/widgets?marker=b"}]
            }),
        )
        .respond(200, json!({"widgets": [{"id": "c"}]}));
    let proxy = proxy(&session);

    let pager = proxy.list(&WIDGET, query(&[("status", "ACTIVE")])).unwrap();
    let ids: Vec<String> = pager
        .try_collect()
        .await
        .unwrap()
        .iter()
        .map(|w| w.identity().unwrap())
        .collect();

    assert_eq!(ids, vec!["a", "b", "c"]);
    let requests = session.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query("status"), Some("ACTIVE"));
    assert_eq!(requests[1].url, "https://api.test/widgets?marker=b");
    assert!(requests[1].request.query.is_none());
}

#[tokio::test]
async fn test_list_follows_link_header() {
    let session = MockSession::new()
        .respond_with_headers(
            200,
            &[("Link", "<https://api.test/widgets?page=2>; rel=\"next\"")],
            json!({"widgets": [{"id": "a"}]}),
        )
        .respond(200, json!({"widgets": [{"id": "b"}]}));
    let proxy = proxy(&session);

    let widgets = proxy
        .list(&WIDGET, BTreeMap::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(widgets.len(), 2);
    assert_eq!(session.request_count(), 2);
}

#[tokio::test]
async fn test_list_stops_on_repeated_link() {
    let page = json!({
        "widgets": [{"id": "a"}],
        "widgets_links": [{"rel": "next", "href": "/widgets"}]
    });
    let session = MockSession::new().respond(200, page);
    let proxy = proxy(&session);

    let widgets = proxy
        .list(&WIDGET, BTreeMap::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(widgets.len(), 1);
    assert_eq!(session.request_count(), 1);
}

#[tokio::test]
async fn test_list_is_lazy() {
    let session = MockSession::new()
        .respond(
            200,
            json!({
                "widgets": [{"id": "a"}],
                "widgets_links": [{"rel": "next", "href": "/widgets?marker=a"}]
            }),
        )
        .respond(200, json!({"widgets": []}));
    let proxy = proxy(&session);

    let mut pager = proxy.list(&WIDGET, BTreeMap::new()).unwrap();
    assert_eq!(session.request_count(), 0);

    let first = pager.next().await.unwrap().unwrap();
    assert_eq!(first.id(), Some("a"));
    assert_eq!(session.request_count(), 1);

    assert!(pager.next().await.is_none());
    assert_eq!(session.request_count(), 2);
    assert!(pager.next().await.is_none());
    assert_eq!(session.request_count(), 2);
}

#[tokio::test]
async fn test_list_rejects_unknown_query_before_any_call() {
    let session = MockSession::new();
    let proxy = proxy(&session);

    let error = proxy
        .list(&WIDGET, query(&[("colour", "red"), ("limit", "10")]))
        .unwrap_err();

    assert!(matches!(error, ResourceError::InvalidRequest(_)));
    assert!(error.to_string().contains("colour"));
    assert!(!error.to_string().contains("limit"));
    assert_eq!(session.request_count(), 0);
}

#[tokio::test]
async fn test_list_takes_path_params_from_query() {
    let session = MockSession::new().respond(
        200,
        json!({"parts": [{"slot": "front", "kind": "lens"}, {"slot": "back", "kind": "cap"}]}),
    );
    let proxy = proxy(&session);

    let parts = proxy
        .list(&PART, query(&[("widget_id", "w 1")]))
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(session.requests()[0].uri(), "/widgets/w%201/parts");
    assert!(session.requests()[0].request.query.is_none());
    assert_eq!(parts[0].identity().unwrap(), "front");
    assert_eq!(parts[1].path_params().get("widget_id").map(String::as_str), Some("w 1"));
}

#[tokio::test]
async fn test_list_missing_path_param_fails() {
    let session = MockSession::new();
    let proxy = proxy(&session);

    let error = proxy.list(&PART, BTreeMap::new()).unwrap_err();

    match error {
        ResourceError::PathResolutionFailed { param, .. } => assert_eq!(param, "widget_id"),
        other => panic!("expected PathResolutionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_error_is_yielded_once() {
    let session = MockSession::new().respond(500, json!({"message": "boom"}));
    let proxy = proxy(&session);

    let mut pager = proxy.list(&WIDGET, BTreeMap::new()).unwrap();

    assert!(matches!(pager.next().await, Some(Err(_))));
    assert!(pager.next().await.is_none());
    assert_eq!(session.request_count(), 1);
}

#[tokio::test]
async fn test_list_as_stream() {
    let session = MockSession::new().respond(200, json!({"widgets": [{"id": "a"}, {"id": "b"}]}));
    let proxy = proxy(&session);

    let ids: Vec<String> = proxy
        .list(&WIDGET, BTreeMap::new())
        .unwrap()
        .into_stream()
        .map(|item| item.unwrap().identity().unwrap())
        .collect()
        .await;

    assert_eq!(ids, vec!["a", "b"]);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_sends_only_given_attributes() {
    let session = MockSession::new()
        .respond(
            200,
            json!({"widget": {"id": "w-1", "name": "old", "description": "kept", "status": "OK"}}),
        )
        .respond(
            200,
            json!({"widget": {"id": "w-1", "name": "new", "description": "kept", "status": "OK"}}),
        );
    let proxy = proxy(&session);

    let widget = proxy.get(&WIDGET, "w-1").await.unwrap();
    let updated = proxy
        .update(&WIDGET, &widget, [("name", json!("new"))])
        .await
        .unwrap();

    let request = &session.requests()[1];
    assert_eq!(request.method(), HttpMethod::Put);
    assert_eq!(request.uri(), "/widgets/w-1");
    assert_eq!(request.body(), Some(&json!({"name": "new"})));
    assert_eq!(updated.get_str("name"), Some("new"));
    assert!(!updated.is_dirty());
}

#[tokio::test]
async fn test_update_uses_patch_and_envelope_when_configured() {
    let session = MockSession::new().respond(200, json!({"widget": {"id": "w-1", "name": "new"}}));
    let proxy = proxy(&session);

    proxy
        .update(&PATCHED_WIDGET, "w-1", [("name", json!("new"))])
        .await
        .unwrap();

    let request = &session.requests()[0];
    assert_eq!(request.method(), HttpMethod::Patch);
    assert_eq!(request.body(), Some(&json!({"widget": {"name": "new"}})));
}

#[tokio::test]
async fn test_update_not_found_is_remapped() {
    let session = MockSession::new().respond_not_found("gone");
    let proxy = proxy(&session);

    let error = proxy
        .update(&WIDGET, "w-1", [("name", json!("new"))])
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "No Widget found for w-1");
    assert_eq!(error.details(), Some("gone"));
}

// ============================================================================
// Delete and actions
// ============================================================================

#[tokio::test]
async fn test_delete_existing_resource() {
    let session = MockSession::new().respond(204, serde_json::Value::Null);
    let proxy = proxy(&session);

    let deleted = proxy.delete(&WIDGET, "w-1", false).await.unwrap();

    assert_eq!(deleted.unwrap().identity().unwrap(), "w-1");
    assert_eq!(session.requests()[0].method(), HttpMethod::Delete);
    assert_eq!(session.requests()[0].uri(), "/widgets/w-1");
}

#[tokio::test]
async fn test_delete_missing_with_ignore_missing_returns_none() {
    let session = MockSession::new().respond_not_found("gone");
    let proxy = proxy(&session);

    let deleted = proxy.delete(&WIDGET, "w-1", true).await.unwrap();

    assert!(deleted.is_none());
}

#[tokio::test]
async fn test_delete_missing_without_ignore_missing_fails() {
    let session = MockSession::new().respond_not_found("gone");
    let proxy = proxy(&session);

    let error = proxy.delete(&WIDGET, "w-1", false).await.unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "No Widget found for w-1");
    assert_eq!(error.details(), Some("gone"));
}

#[tokio::test]
async fn test_invoke_action_truth_table() {
    let session = MockSession::new()
        .respond(202, serde_json::Value::Null)
        .respond_not_found("gone")
        .respond_not_found("gone");
    let proxy = proxy(&session);

    let ok = proxy
        .invoke_action("Widget", HttpMethod::Post, "/widgets/w-1/reboot", None, "w-1", false)
        .await
        .unwrap();
    assert_eq!(ok.unwrap().code, 202);

    let ignored = proxy
        .invoke_action("Widget", HttpMethod::Post, "/widgets/w-1/reboot", None, "w-1", true)
        .await
        .unwrap();
    assert!(ignored.is_none());

    let error = proxy
        .invoke_action("Widget", HttpMethod::Post, "/widgets/w-1/reboot", None, "w-1", false)
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "No Widget found for w-1");
    assert_eq!(error.details(), Some("gone"));
    assert_eq!(error.request_id(), Some("req-404"));
}
