//! Startup retry schedule loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::connection::{ResolverPolicy, StartupPolicy};

/// Timing of the startup connection sequence.
///
/// Every field is optional; accessors supply the production defaults.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STARTUP")]
pub struct StartupSettings {
    /// Seconds to wait before the first round.
    pub initial_delay_secs: Option<u64>,
    /// Number of resolver rounds before giving up.
    pub max_rounds: Option<u32>,
    /// Back-off multiplier in seconds; round `n` waits `n` times this.
    pub backoff_step_secs: Option<u64>,
    /// Seconds to wait after a failed descriptor.
    pub attempt_delay_secs: Option<u64>,
    /// Deadline in seconds for the liveness probe.
    pub probe_timeout_secs: Option<u64>,
}

impl StartupSettings {
    pub fn startup_policy(&self) -> StartupPolicy {
        let defaults = StartupPolicy::default();
        StartupPolicy {
            initial_delay: self
                .initial_delay_secs
                .map_or(defaults.initial_delay, Duration::from_secs),
            max_rounds: self.max_rounds.unwrap_or(defaults.max_rounds),
            backoff_step: self
                .backoff_step_secs
                .map_or(defaults.backoff_step, Duration::from_secs),
        }
    }

    pub fn resolver_policy(&self) -> ResolverPolicy {
        let defaults = ResolverPolicy::default();
        ResolverPolicy {
            attempt_delay: self
                .attempt_delay_secs
                .map_or(defaults.attempt_delay, Duration::from_secs),
            probe_timeout: self
                .probe_timeout_secs
                .map_or(defaults.probe_timeout, Duration::from_secs),
        }
    }
}
