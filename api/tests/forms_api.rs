//! Integration tests against an in-memory service instance.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use formbuilder_api::{auth, build_router, AppState, Config};
use formbuilder_core::FormStore;

struct TestApi {
    server: TestServer,
    token: String,
}

async fn test_api() -> TestApi {
    let config = Config::default();
    let token = auth::create_token(&config.jwt_secret, "admin", &[auth::MANAGE_FORMS]).unwrap();

    let store = FormStore::connect(&config.database_url).await.unwrap();
    store.init_schema().await.unwrap();

    let server = TestServer::new(build_router(AppState::new(store, config))).unwrap();
    TestApi { server, token }
}

impl TestApi {
    fn bearer(&self) -> (HeaderName, HeaderValue) {
        (
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", self.token).parse().unwrap(),
        )
    }

    async fn create_form(&self, body: Value) -> Value {
        let (name, value) = self.bearer();
        let response = self
            .server
            .post("/form-builder/v1/forms")
            .add_header(name, value)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json::<Value>()
    }
}

fn contact_body() -> Value {
    json!({
        "name": "Contact",
        "form_data": {"fields": [
            {"id": "email", "type": "email", "label": "Email", "required": true}
        ]}
    })
}

#[tokio::test]
async fn admin_routes_reject_missing_or_invalid_tokens() {
    let api = test_api().await;

    let response = api.server.get("/form-builder/v1/forms").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "unauthorized");

    let response = api
        .server
        .get("/form-builder/v1/forms")
        .add_header(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_with_empty_name_writes_nothing() {
    let api = test_api().await;
    let (name, value) = api.bearer();

    let response = api
        .server
        .post("/form-builder/v1/forms")
        .add_header(name, value)
        .json(&json!({"name": "", "form_data": {"fields": []}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_data");

    let (name, value) = api.bearer();
    let list = api
        .server
        .get("/form-builder/v1/forms")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let api = test_api().await;
    let (name, value) = api.bearer();

    let response = api
        .server
        .post("/form-builder/v1/forms")
        .add_header(name, value)
        .json(&json!({"name": "Contact", "form_data": {}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_json");
}

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let api = test_api().await;
    let created = api.create_form(contact_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (name, value) = api.bearer();
    let response = api
        .server
        .get(&format!("/form-builder/v1/forms/{id}"))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["data"]["name"], "Contact");
    assert_eq!(
        body["data"]["form_data"]["fields"],
        contact_body()["form_data"]["fields"]
    );
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn update_nonexistent_returns_not_found() {
    let api = test_api().await;
    let (name, value) = api.bearer();

    let response = api
        .server
        .put("/form-builder/v1/forms/999")
        .add_header(name, value)
        .json(&contact_body())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn delete_then_get_returns_not_found() {
    let api = test_api().await;
    let created = api.create_form(contact_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (name, value) = api.bearer();
    let response = api
        .server
        .delete(&format!("/form-builder/v1/forms/{id}"))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let (name, value) = api.bearer();
    let response = api
        .server
        .get(&format!("/form-builder/v1/forms/{id}"))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Deleting again also reports not found.
    let (name, value) = api.bearer();
    let response = api
        .server
        .delete(&format!("/form-builder/v1/forms/{id}"))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_orders_by_most_recent_update() {
    let api = test_api().await;
    let mut body = contact_body();
    body["name"] = json!("A");
    api.create_form(body.clone()).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    body["name"] = json!("B");
    api.create_form(body).await;

    let (name, value) = api.bearer();
    let list = api
        .server
        .get("/form-builder/v1/forms")
        .add_header(name, value)
        .await
        .json::<Value>();
    let names: Vec<&str> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["B", "A"]);
}

#[tokio::test]
async fn public_fetch_omits_timestamps() {
    let api = test_api().await;
    let created = api.create_form(contact_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = api
        .server
        .get(&format!("/form-builder/v1/forms/{id}/public"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["name"], "Contact");
    assert!(body["data"].get("created_at").is_none());
    assert!(body["data"].get("updated_at").is_none());
}

#[tokio::test]
async fn embed_renders_escaped_fragment() {
    let api = test_api().await;
    let created = api
        .create_form(json!({
            "name": "Survey",
            "form_data": {"fields": [
                {"id": "confirm", "type": "radio", "label": "<script>x</script>",
                 "options": ["Yes", "No"]}
            ]}
        }))
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = api
        .server
        .get(&format!("/form-builder/v1/forms/{id}/embed"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains(&format!("data-form-id=\"{id}\"")));
    assert_eq!(html.matches("<input type=\"radio\"").count(), 2);
    assert!(html.contains("id=\"field-confirm-0\""));
    assert!(html.contains("id=\"field-confirm-1\""));
    assert!(!html.contains("<script>"));

    let response = api.server.get("/form-builder/v1/forms/999/embed").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "<p>Form not found</p>");
}

#[tokio::test]
async fn submit_neutralizes_hostile_values() {
    let api = test_api().await;

    let response = api
        .server
        .post("/form-builder/v1/submit")
        .json(&json!({"form_id": 5, "data": {"q1": "<script>x</script>"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let (name, value) = api.bearer();
    let subs = api
        .server
        .get("/form-builder/v1/forms/5/submissions")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(subs["data"][0]["data"]["q1"], "x");
}

#[tokio::test]
async fn submit_against_missing_form_still_succeeds() {
    let api = test_api().await;

    // No form with id 12345 exists; the soft reference is accepted as-is.
    let response = api
        .server
        .post("/form-builder/v1/submit")
        .json(&json!({
            "form_id": 12345,
            "data": {"q2": ["Option 1", "Option 2"]}
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert!(body["data"]["id"].as_i64().unwrap() > 0);

    let (name, value) = api.bearer();
    let subs = api
        .server
        .get("/form-builder/v1/forms/12345/submissions")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(subs["data"][0]["data"]["q2"], json!(["Option 1", "Option 2"]));
}

#[tokio::test]
async fn submit_without_data_is_rejected() {
    let api = test_api().await;
    let response = api
        .server
        .post("/form-builder/v1/submit")
        .json(&json!({"form_id": 1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_data");
}

#[tokio::test]
async fn update_changes_visible_on_next_get() {
    let api = test_api().await;
    let created = api.create_form(contact_body()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (name, value) = api.bearer();
    let response = api
        .server
        .put(&format!("/form-builder/v1/forms/{id}"))
        .add_header(name, value)
        .json(&json!({
            "name": "Contact v2",
            "form_data": {"fields": [
                {"id": "email", "type": "email", "label": "Email", "required": true},
                {"id": "topics", "type": "checkbox", "label": "Topics",
                 "options": ["News", "Offers"]}
            ]}
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let (name, value) = api.bearer();
    let body = api
        .server
        .get(&format!("/form-builder/v1/forms/{id}"))
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(body["data"]["name"], "Contact v2");
    assert_eq!(body["data"]["form_data"]["fields"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn openapi_document_declares_bearer_scheme() {
    let api = test_api().await;
    let response = api.server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let doc = response.json::<Value>();
    let scheme = &doc["components"]["securitySchemes"]["bearer_token"];
    assert_eq!(scheme["type"], "http");
    assert_eq!(scheme["scheme"], "bearer");

    // The admin paths reference the declared scheme.
    let list_security = &doc["paths"]["/form-builder/v1/forms"]["get"]["security"];
    assert!(list_security
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s.get("bearer_token").is_some()));
}

#[tokio::test]
async fn health_needs_no_auth() {
    let api = test_api().await;
    let response = api.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "healthy");
}
