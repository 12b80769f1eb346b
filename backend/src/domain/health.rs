//! Service health assessment.
//!
//! The report is transport-agnostic; the HTTP adapter maps
//! [`HealthStatus::is_healthy`] to 200 or 503.

use std::time::Duration;

use chrono::SecondsFormat;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::ports::{StoreHealth, StoreHealthError};

/// Deadline shared by the probe and the server address lookup.
pub const HEALTH_DEADLINE: Duration = Duration::from_secs(5);

/// Overall health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The store answered its probe.
    Ok,
    /// A handle exists but the probe failed or timed out.
    DatabaseError,
    /// Startup ended in degraded mode.
    DatabaseNotInitialized,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Health payload returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// `true` only when the probe succeeded.
    pub database: bool,
    /// RFC 3339 time the report was produced.
    #[schema(example = "2026-01-01T12:00:00Z")]
    pub timestamp: String,
    pub hostname: String,
    /// Address of the store server that answered, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_host: Option<String>,
    /// Startup rounds consumed before the service came up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
}

/// Inputs that stay fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthContext {
    pub hostname: String,
    pub startup_rounds: u32,
}

/// Probe `store` and build a report stamped with `clock`.
///
/// The server address lookup only runs after a successful probe and its
/// failure never changes the verdict. Both calls share one
/// [`HEALTH_DEADLINE`], so an assessment never outlasts it.
pub async fn assess_health(
    store: &dyn StoreHealth,
    clock: &dyn Clock,
    context: &HealthContext,
) -> HealthReport {
    let mut report = HealthReport {
        status: HealthStatus::DatabaseNotInitialized,
        database: false,
        timestamp: clock.utc().to_rfc3339_opts(SecondsFormat::Secs, true),
        hostname: context.hostname.clone(),
        db_host: None,
        retry_count: (context.startup_rounds > 0).then_some(context.startup_rounds),
    };

    if !store.is_connected() {
        return report;
    }

    let deadline = Instant::now() + HEALTH_DEADLINE;
    let probe = timeout_at(deadline, store.ping())
        .await
        .unwrap_or_else(|_| Err(StoreHealthError::timeout(HEALTH_DEADLINE.as_secs())));
    match probe {
        Ok(()) => {
            report.status = HealthStatus::Ok;
            report.database = true;
            report.db_host = timeout_at(deadline, store.server_address())
                .await
                .unwrap_or_else(|_| {
                    debug!("server address lookup ran past the health deadline");
                    None
                });
        }
        Err(error) => {
            warn!(%error, "database health probe failed");
            report.status = HealthStatus::DatabaseError;
        }
    }
    report
}
