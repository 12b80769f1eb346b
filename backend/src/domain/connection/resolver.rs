//! Sequential fallback across connection descriptors.

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::domain::ports::{ConnectError, StoreConnector};

use super::Descriptor;

/// Timing knobs for a single resolver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Pause after a failed descriptor before trying the next one.
    pub attempt_delay: Duration,
    /// Deadline for the liveness probe on a freshly opened handle.
    pub probe_timeout: Duration,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            attempt_delay: Duration::from_secs(3),
            probe_timeout: Duration::from_secs(10),
        }
    }
}

/// A handle that passed its probe, with the descriptor that produced it.
#[derive(Debug)]
pub struct Resolved<H> {
    /// Open handle that answered its liveness probe.
    pub handle: H,
    /// Descriptor the handle was opened from.
    pub descriptor: Descriptor,
    /// One-based position of the winning descriptor in the candidate list.
    pub position: usize,
}

/// Why a resolver pass produced no handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("failed to connect to database after all attempts; last error: {0}")]
    Exhausted(ConnectError),
    #[error("no connection descriptors configured")]
    NoDescriptors,
}

/// Tries each descriptor in order and returns the first one that answers.
pub struct ConnectionResolver<C> {
    connector: C,
    policy: ResolverPolicy,
}

impl<C> ConnectionResolver<C>
where
    C: StoreConnector,
{
    /// Build a resolver that opens handles through `connector`.
    pub fn new(connector: C, policy: ResolverPolicy) -> Self {
        Self { connector, policy }
    }

    /// Walk `candidates` once, skipping blank entries.
    ///
    /// Each failure is logged with the redacted descriptor and followed by
    /// [`ResolverPolicy::attempt_delay`], including after the last entry.
    pub async fn resolve(
        &self,
        candidates: &[String],
    ) -> Result<Resolved<C::Handle>, ResolveError> {
        let mut last_error = None;

        for (index, raw) in candidates.iter().enumerate() {
            let position = index + 1;
            let Some(descriptor) = Descriptor::new(raw.as_str()) else {
                debug!(position, "skipping empty connection descriptor");
                continue;
            };

            info!(position, descriptor = %descriptor, "trying database connection");
            match self.attempt(&descriptor).await {
                Ok(handle) => {
                    info!(
                        position,
                        descriptor = %descriptor,
                        route = %descriptor.route(),
                        "database connection established"
                    );
                    return Ok(Resolved {
                        handle,
                        descriptor,
                        position,
                    });
                }
                Err(error) => {
                    warn!(position, descriptor = %descriptor, %error, "database connection failed");
                    last_error = Some(error);
                    sleep(self.policy.attempt_delay).await;
                }
            }
        }

        Err(last_error.map_or(ResolveError::NoDescriptors, ResolveError::Exhausted))
    }

    async fn attempt(&self, descriptor: &Descriptor) -> Result<C::Handle, ConnectError> {
        let handle = self.connector.open(descriptor).await?;

        let probed = match timeout(self.policy.probe_timeout, self.connector.probe(&handle)).await
        {
            Ok(result) => result,
            Err(_) => Err(ConnectError::timeout(self.policy.probe_timeout.as_secs())),
        };

        if let Err(error) = probed {
            self.connector.close(handle).await;
            return Err(error);
        }
        Ok(handle)
    }
}
