//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] covers the JSON endpoints. The HTML status page at `/` is left
//! out. The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, HealthReport, HealthStatus, User};
use crate::inbound::http::users::{CreateUserForm, CreateUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ms-app API",
        description = "Users service with store health reporting.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        HealthReport,
        HealthStatus,
        CreateUserForm,
        CreateUserResponse
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Store connectivity probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/health")]
    #[case("/users")]
    #[case("/users/create")]
    fn json_endpoints_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn status_page_is_not_documented() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.contains_key("/"));
    }

    #[rstest]
    #[case("User", &["id", "name", "email"])]
    #[case("Error", &["code", "message"])]
    #[case("HealthReport", &["status", "database", "timestamp", "hostname"])]
    #[case("CreateUserResponse", &["id", "name", "email", "message"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }
}
