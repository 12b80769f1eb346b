//! Startup connection management: descriptor fallback and bounded retry.
//!
//! [`ConnectionResolver`] makes one pass over the configured descriptors.
//! [`StartupSequencer`] repeats passes with linear back-off and reports
//! whether the service starts connected or degraded.

mod descriptor;
mod resolver;
mod startup;
#[cfg(test)]
mod test_connector;

pub use descriptor::{redact_credentials, Descriptor, StoreRoute, REDACTED};
pub use resolver::{ConnectionResolver, ResolveError, Resolved, ResolverPolicy};
pub use startup::{round_backoff, StartupOutcome, StartupPolicy, StartupSequencer};
