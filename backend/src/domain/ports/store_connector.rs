//! Driven port for opening and probing store handles during startup.
//!
//! The connection resolver only knows this trait, so its retry behaviour can
//! be exercised against scripted connectors without a database.

use async_trait::async_trait;

use crate::domain::connection::Descriptor;

use super::define_port_error;

define_port_error! {
    /// Failures observed while establishing a store handle.
    pub enum ConnectError {
        /// The handle could not be opened, e.g. an unparseable descriptor.
        Open { message: String } => "failed to open connection: {message}",
        /// The handle opened but the liveness probe failed.
        Probe { message: String } => "failed to ping database: {message}",
        /// The liveness probe exceeded its deadline.
        Timeout { seconds: u64 } => "database ping timed out after {seconds}s",
    }
}

/// Opens pooled handles from descriptors.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Pooled handle produced by a successful open.
    type Handle: Send + Sync;

    /// Open and configure a handle. Must not block on network I/O longer
    /// than the adapter's own connect timeout.
    async fn open(&self, descriptor: &Descriptor) -> Result<Self::Handle, ConnectError>;

    /// Issue a liveness probe through `handle`.
    async fn probe(&self, handle: &Self::Handle) -> Result<(), ConnectError>;

    /// Release a handle whose probe failed.
    async fn close(&self, handle: Self::Handle);
}
