//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use ms_app::domain::HealthContext;
use ms_app::domain::UsersService;
use ms_app::inbound::http::state::{HttpState, HttpStatePorts};
use ms_app::outbound::persistence::{DbPool, DieselStoreHealth, DieselUserRepository};

/// Use `make_ports` when a pool exists, otherwise the disconnected ports.
fn build_ports_with_pool<Pool>(
    pool: Option<&Pool>,
    make_ports: impl FnOnce(&Pool) -> HttpStatePorts,
) -> HttpStatePorts {
    match pool {
        Some(pool) => make_ports(pool),
        None => HttpStatePorts::disconnected(),
    }
}

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    let service = Arc::new(UsersService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));
    HttpStatePorts {
        users: service.clone(),
        registration: service,
        store: Arc::new(DieselStoreHealth::new(pool.clone())),
    }
}

/// Build the shared HTTP state for the handle chosen at startup.
pub(super) fn build_http_state(
    pool: Option<&DbPool>,
    health: HealthContext,
) -> web::Data<HttpState> {
    let ports = build_ports_with_pool(pool, diesel_ports);
    web::Data::new(HttpState::new(ports, health))
}
