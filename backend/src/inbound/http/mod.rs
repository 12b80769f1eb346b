//! HTTP inbound adapter exposing the status page, health and users endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod status_page;
pub mod users;

pub use error::ApiResult;

use actix_web::{HttpResponse, web};

use crate::domain::Error;

/// Register every HTTP route on `cfg`.
///
/// `/users/create` is mounted for all methods so the handler can report a
/// missing store before rejecting the method. Unmatched paths get a JSON
/// `not_found` body.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use ms_app::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(status_page::status_page)
        .service(health::health)
        .service(users::list_users)
        .service(web::resource("/users/create").to(users::create_user))
        .default_service(web::to(route_not_found));
}

async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not found"))
}
