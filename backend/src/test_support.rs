//! In-memory port doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{StoreHealth, StoreHealthError, UserPersistenceError, UserRepository};
use crate::domain::{HealthContext, NewUser, User, UserId, UsersService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Hostname reported by states built with [`connected_state`].
pub const TEST_HOSTNAME: &str = "test-host";

/// `users` table held in memory with the same uniqueness rule on `email`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
    failure: Mutex<Option<UserPersistenceError>>,
}

impl InMemoryUserRepository {
    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: UserPersistenceError) {
        *lock(&self.failure) = Some(error);
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected_failure(&self) -> Option<UserPersistenceError> {
        lock(&self.failure).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        if let Some(error) = self.injected_failure() {
            return Err(error);
        }
        Ok(lock(&self.rows).clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        if let Some(error) = self.injected_failure() {
            return Err(error);
        }
        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        let next = i32::try_from(rows.len() + 1)
            .map_err(|_| UserPersistenceError::query("identifier space exhausted"))?;
        let id = UserId::new(next)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let created = user.clone().into_user(id);
        rows.push(created.clone());
        Ok(created)
    }
}

/// Store double with a fixed probe outcome.
#[derive(Debug, Clone)]
pub struct FakeStoreHealth {
    pub probe: Result<(), StoreHealthError>,
    pub address: Option<String>,
}

impl FakeStoreHealth {
    pub fn healthy(address: Option<&str>) -> Self {
        Self {
            probe: Ok(()),
            address: address.map(str::to_owned),
        }
    }

    pub fn failing(error: StoreHealthError) -> Self {
        Self {
            probe: Err(error),
            address: None,
        }
    }
}

#[async_trait]
impl StoreHealth for FakeStoreHealth {
    fn is_connected(&self) -> bool {
        true
    }

    async fn ping(&self) -> Result<(), StoreHealthError> {
        self.probe.clone()
    }

    async fn server_address(&self) -> Option<String> {
        self.address.clone()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Health context used by the helpers below.
pub fn test_health_context(startup_rounds: u32) -> HealthContext {
    HealthContext {
        hostname: TEST_HOSTNAME.to_owned(),
        startup_rounds,
    }
}

/// State wired to `repository` and `store` through the real users service.
pub fn connected_state(
    repository: Arc<InMemoryUserRepository>,
    store: FakeStoreHealth,
) -> HttpState {
    let service = Arc::new(UsersService::new(repository));
    let ports = HttpStatePorts {
        users: service.clone(),
        registration: service,
        store: Arc::new(store),
    };
    HttpState::new(ports, test_health_context(1)).with_clock(Arc::new(FixedClock::default()))
}

/// State for a service that started in degraded mode.
pub fn degraded_state(startup_rounds: u32) -> HttpState {
    HttpState::new(
        HttpStatePorts::disconnected(),
        test_health_context(startup_rounds),
    )
    .with_clock(Arc::new(FixedClock::default()))
}
