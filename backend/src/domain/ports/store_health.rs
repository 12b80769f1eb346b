//! Driven port for store liveness and replica introspection.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while probing the backing store.
    pub enum StoreHealthError {
        /// The probe query failed.
        Probe { message: String } => "store probe failed: {message}",
        /// The probe did not finish within its deadline.
        Timeout { seconds: u64 } => "store probe timed out after {seconds}s",
    }
}

/// Port reporting whether a store handle exists and whether it answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// `false` when the process runs in degraded mode.
    fn is_connected(&self) -> bool;

    /// Liveness probe. Callers bound it with their own deadline.
    async fn ping(&self) -> Result<(), StoreHealthError>;

    /// Network address of the server that answered, when the store can tell.
    ///
    /// Behind a load balancer this identifies the replica that served the
    /// connection. Diagnostic only; `None` on any failure.
    async fn server_address(&self) -> Option<String>;
}

/// Store health used when no handle exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedStore;

#[async_trait]
impl StoreHealth for DisconnectedStore {
    fn is_connected(&self) -> bool {
        false
    }

    async fn ping(&self) -> Result<(), StoreHealthError> {
        Err(StoreHealthError::probe("database not initialized"))
    }

    async fn server_address(&self) -> Option<String> {
        None
    }
}
