//! Users API handlers.
//!
//! ```text
//! GET /users
//! POST /users/create  name=Ada&email=ada@example.com
//! ```

use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewUser, User, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned after a successful registration.
pub const USER_CREATED_MESSAGE: &str = "User created successfully";

/// Form fields accepted by `/users/create`, from the body or the query string.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateUserForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateUserForm {
    /// Body fields win; query parameters fill the gaps.
    fn merge(body: Option<Self>, query: Option<Self>) -> Self {
        let body = body.unwrap_or_default();
        let query = query.unwrap_or_default();
        Self {
            name: body.name.or(query.name),
            email: body.email.or(query.email),
        }
    }
}

/// Body of a 201 response from `/users/create`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "User created successfully")]
    pub message: String,
}

impl From<User> for CreateUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            message: USER_CREATED_MESSAGE.to_owned(),
        }
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyName => Error::invalid_request("Name and email are required")
            .with_details(json!({ "field": "name", "code": "required" })),
        UserValidationError::EmptyEmail => Error::invalid_request("Name and email are required")
            .with_details(json!({ "field": "email", "code": "required" })),
        UserValidationError::NameTooLong { .. } => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "name", "code": "too_long" })),
        UserValidationError::EmailTooLong { .. } => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "too_long" })),
        UserValidationError::NonPositiveId => Error::internal(err.to_string()),
    }
}

/// List every user ordered by id.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use ms_app::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, `[]` when none exist", body = [User]),
        (status = 500, description = "Query failed", body = Error),
        (status = 503, description = "Store not connected or unreachable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Register a user.
///
/// Mounted for every method so degraded mode answers 503 before the method
/// is checked.
#[utoipa::path(
    post,
    path = "/users/create",
    request_body(content = CreateUserForm, content_type = "application/x-www-form-urlencoded"),
    params(CreateUserForm),
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Missing or oversized field", body = Error),
        (status = 405, description = "Method other than POST", body = Error),
        (status = 409, description = "Email already exists", body = Error),
        (status = 500, description = "Insert failed", body = Error),
        (status = 503, description = "Store not connected or unreachable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    request: HttpRequest,
    state: web::Data<HttpState>,
    body: Option<web::Form<CreateUserForm>>,
    query: Option<web::Query<CreateUserForm>>,
) -> ApiResult<HttpResponse> {
    if !state.store.is_connected() {
        return Err(Error::service_unavailable("Database not connected"));
    }
    if request.method() != Method::POST {
        return Err(Error::method_not_allowed("Method not allowed"));
    }

    let form = CreateUserForm::merge(
        body.map(web::Form::into_inner),
        query.map(web::Query::into_inner),
    );
    let new_user = NewUser::try_from_parts(
        form.name.as_deref().unwrap_or_default(),
        form.email.as_deref().unwrap_or_default(),
    )
    .map_err(map_user_validation_error)?;

    let created = state.registration.register(new_user).await?;
    Ok(HttpResponse::Created().json(CreateUserResponse::from(created)))
}

#[cfg(test)]
mod tests;
