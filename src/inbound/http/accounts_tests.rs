//! Tests for account administration handlers.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test as actix_test, web, App, Error};
use rstest::rstest;
use serde_json::{json, Value};

use crate::domain::password::StandardPasswordPolicy;
use crate::domain::ports::AccountStoreError;
use crate::domain::AccountDirectory;
use crate::inbound::http::state::HttpState;
use crate::test_support::{InMemoryAccountStore, StubPasswordHasher};

use super::routes::configure;

struct TestContext {
    store: Arc<InMemoryAccountStore>,
    state: web::Data<HttpState>,
}

fn context() -> TestContext {
    let store = Arc::new(InMemoryAccountStore::new());
    let directory = AccountDirectory::new(
        store.clone(),
        Arc::new(StubPasswordHasher::new()),
        Arc::new(StandardPasswordPolicy::new()),
    );
    TestContext {
        store,
        state: web::Data::new(HttpState::new(directory)),
    }
}

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).configure(configure)
}

fn create_payload(user_name: &str) -> Value {
    json!({
        "userName": user_name,
        "email": "a@x.com",
        "idCard": "ID1",
        "birthDate": "1990-01-01",
        "password": "P@ssw0rd!",
    })
}

async fn create_account_via_api<S, B>(app: &S, user_name: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(create_payload(user_name))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("created account payload")
}

#[rstest]
#[actix_web::test]
async fn create_returns_account_without_password_material() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let created = create_account_via_api(&app, "alice").await;

    assert_eq!(created.get("userName").and_then(Value::as_str), Some("alice"));
    assert_eq!(created.get("email").and_then(Value::as_str), Some("a@x.com"));
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());
    assert_eq!(ctx.store.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn created_account_is_fetchable_by_id() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let created = create_account_via_api(&app, "alice").await;
    let id = created.get("id").and_then(Value::as_str).expect("id present");

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/accounts/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    let fetched: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("account payload");
    assert_eq!(fetched, created);
}

#[rstest]
#[actix_web::test]
async fn invalid_submission_reports_every_violation() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "userName": "", "email": "nope", "password": "abc" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    let violations = body
        .get("violations")
        .and_then(Value::as_array)
        .expect("violations present");
    let fields: Vec<&str> = violations
        .iter()
        .filter_map(|violation| violation.get("field").and_then(Value::as_str))
        .collect();
    assert!(fields.contains(&"userName"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"idCard"));
    assert!(fields.contains(&"birthDate"));
    assert!(fields.contains(&"password"));
    assert_eq!(ctx.store.len(), 0);
}

#[rstest]
#[actix_web::test]
async fn duplicate_user_name_is_a_field_violation() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    create_account_via_api(&app, "alice").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(create_payload("alice"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    let violations = body
        .get("violations")
        .and_then(Value::as_array)
        .expect("violations present");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].get("field").and_then(Value::as_str),
        Some("userName")
    );
    assert_eq!(ctx.store.len(), 1);
}

#[rstest]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("not-a-uuid")]
#[actix_web::test]
async fn unknown_or_malformed_ids_report_not_found(#[case] id: &str) {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/accounts/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);

    let body: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
}

#[rstest]
#[actix_web::test]
async fn update_changes_profile_fields() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let created = create_account_via_api(&app, "alice").await;
    let id = created.get("id").and_then(Value::as_str).expect("id present");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/accounts/{id}"))
        .set_json(json!({
            "userName": "alice2",
            "email": "b@y.com",
            "idCard": "ID2",
            "birthDate": "1991-02-02",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::OK);

    let updated: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("account payload");
    assert_eq!(updated.get("id").and_then(Value::as_str), Some(id));
    assert_eq!(
        updated.get("userName").and_then(Value::as_str),
        Some("alice2")
    );
    assert_eq!(
        updated.get("birthDate").and_then(Value::as_str),
        Some("1991-02-02")
    );
}

#[rstest]
#[actix_web::test]
async fn update_on_unknown_id_reports_not_found() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/accounts/3fa85f64-5717-4562-b3fc-2c963f66afa6")
        .set_json(json!({
            "userName": "ghost",
            "email": "g@x.com",
            "idCard": "ID9",
            "birthDate": "1990-01-01",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_succeeds_once_then_reports_not_found() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    let created = create_account_via_api(&app, "alice").await;
    let id = created.get("id").and_then(Value::as_str).expect("id present");
    let uri = format!("/api/v1/accounts/{id}");

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
            .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
            .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    assert_eq!(ctx.store.len(), 0);
}

#[rstest]
#[actix_web::test]
async fn list_reflects_surviving_accounts() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;

    for name in ["alice", "bob", "carol"] {
        create_account_via_api(&app, name).await;
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/accounts")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    let listed: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("accounts payload");
    assert_eq!(listed.as_array().map(Vec::len), Some(3));
}

#[rstest]
#[actix_web::test]
async fn store_outage_maps_to_service_unavailable() {
    let ctx = context();
    let app = actix_test::init_service(test_app(ctx.state.clone())).await;
    ctx.store
        .fail_with(AccountStoreError::connection("connection refused"));

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/accounts")
            .to_request(),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    );

    let body: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("service_unavailable")
    );
}
