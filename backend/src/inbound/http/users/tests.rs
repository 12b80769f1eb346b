//! Tests for users API handlers.

use super::*;
use crate::domain::ports::UserPersistenceError;
use crate::test_support::{
    FakeStoreHealth, InMemoryUserRepository, connected_state, degraded_state,
};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::Value;
use std::sync::Arc;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(list_users)
        .service(web::resource("/users/create").to(create_user))
}

#[fixture]
fn repository() -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::default())
}

fn form_request(body: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/users/create")
        .insert_header(ContentType::form_url_encoded())
        .set_payload(body.to_owned())
}

async fn error_code(response: actix_web::dev::ServiceResponse) -> Option<String> {
    let value: Value = actix_test::read_body_json(response).await;
    value.get("code").and_then(Value::as_str).map(str::to_owned)
}

#[rstest]
#[actix_web::test]
async fn list_is_empty_array_without_rows(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), b"[]");
}

#[rstest]
#[actix_web::test]
async fn create_then_list_returns_the_user(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let response =
        actix_test::call_service(&app, form_request("name=Ada&email=ada%40example.com").to_request())
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CreateUserResponse = actix_test::read_body_json(response).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.email, "ada@example.com");
    assert_eq!(created.message, USER_CREATED_MESSAGE);

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let users: Vec<User> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users.first().map(|user| user.name().as_ref()), Some("Ada"));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_conflict(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository.clone(),
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let first =
        actix_test::call_service(&app, form_request("name=A&email=a%40b.com").to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second =
        actix_test::call_service(&app, form_request("name=B&email=a%40b.com").to_request()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let value: Value = actix_test::read_body_json(second).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Email already exists")
    );
    assert_eq!(repository.len(), 1);
}

#[rstest]
#[case("name=&email=a%40b.com", "name")]
#[case("email=a%40b.com", "name")]
#[case("name=&email=", "name")]
#[case("name=Ada&email=", "email")]
#[actix_web::test]
async fn missing_fields_are_rejected(
    repository: Arc<InMemoryUserRepository>,
    #[case] body: &str,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(connected_state(
        repository.clone(),
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let response = actix_test::call_service(&app, form_request(body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(
        value
            .get("details")
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str),
        Some(field)
    );
    assert!(repository.is_empty());
}

#[rstest]
#[actix_web::test]
async fn whitespace_only_name_is_accepted(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository.clone(),
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let response =
        actix_test::call_service(&app, form_request("name=%20%20&email=ws%40b.com").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CreateUserResponse = actix_test::read_body_json(response).await;
    assert_eq!(created.name, "  ");

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let users: Vec<User> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(users.first().map(|user| user.name().as_ref()), Some("  "));
}

#[rstest]
#[actix_web::test]
async fn oversized_name_is_rejected(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;
    let body = format!("name={}&email=a%40b.com", "x".repeat(101));

    let response = actix_test::call_service(&app, form_request(&body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn query_parameters_are_used_without_a_form_body(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/users/create?name=Grace&email=grace%40example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CreateUserResponse = actix_test::read_body_json(response).await;
    assert_eq!(created.name, "Grace");
}

#[rstest]
#[actix_web::test]
async fn non_post_methods_are_rejected(repository: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/users/create?name=Ada&email=ada%40example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_code(response).await.as_deref(), Some("method_not_allowed"));
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/users"))]
#[case(actix_test::TestRequest::get().uri("/users/create"))]
#[case(form_request("name=Ada&email=ada%40example.com"))]
#[actix_web::test]
async fn degraded_mode_answers_service_unavailable(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(degraded_state(12))).await;

    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error_code(response).await.as_deref(), Some("service_unavailable"));
}

#[rstest]
#[case(UserPersistenceError::query("syntax error"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(UserPersistenceError::connection("timed out"), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn store_failures_map_to_server_errors(
    repository: Arc<InMemoryUserRepository>,
    #[case] failure: UserPersistenceError,
    #[case] expected: StatusCode,
) {
    repository.fail_with(failure);
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let list = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(list.status(), expected);

    let create =
        actix_test::call_service(&app, form_request("name=A&email=a%40b.com").to_request()).await;
    assert_eq!(create.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_do_not_leak_store_messages(repository: Arc<InMemoryUserRepository>) {
    repository.fail_with(UserPersistenceError::query("relation \"users\" does not exist"));
    let app = actix_test::init_service(test_app(connected_state(
        repository,
        FakeStoreHealth::healthy(None),
    )))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;

    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
}
