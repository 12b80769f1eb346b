//! Bounded startup retry with linear back-off.
//!
//! The sequencer never fails: when every round is exhausted the service is
//! expected to start in degraded mode and answer 503 on data endpoints.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::ports::StoreConnector;

use super::{ConnectionResolver, Descriptor, ResolveError};

/// Timing knobs for the whole startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupPolicy {
    /// Pause before the first round so dependencies can come up.
    pub initial_delay: Duration,
    /// Number of full resolver passes to attempt.
    pub max_rounds: u32,
    /// Back-off after round `n` is `n * backoff_step`.
    pub backoff_step: Duration,
}

impl Default for StartupPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            max_rounds: 12,
            backoff_step: Duration::from_secs(5),
        }
    }
}

/// Wait applied after failed `round` (one-based).
///
/// Returns `None` after the final round, where the sequencer gives up
/// instead of waiting.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use ms_app::domain::connection::round_backoff;
///
/// let step = Duration::from_secs(5);
/// assert_eq!(round_backoff(1, 12, step), Some(Duration::from_secs(5)));
/// assert_eq!(round_backoff(11, 12, step), Some(Duration::from_secs(55)));
/// assert_eq!(round_backoff(12, 12, step), None);
/// ```
pub fn round_backoff(round: u32, max_rounds: u32, step: Duration) -> Option<Duration> {
    if round == 0 || round >= max_rounds {
        return None;
    }
    Some(step.saturating_mul(round))
}

/// Result of the startup sequence.
#[derive(Debug)]
pub enum StartupOutcome<H> {
    /// A descriptor answered its probe.
    Connected {
        handle: H,
        /// Descriptor that produced `handle`.
        descriptor: Descriptor,
        /// Rounds consumed, including the successful one.
        rounds: u32,
    },
    /// Every round failed; the service runs without a store.
    Degraded {
        rounds: u32,
        /// Failure from the final round, if any round ran.
        last_error: Option<ResolveError>,
    },
}

impl<H> StartupOutcome<H> {
    /// Rounds consumed before the outcome was reached.
    pub fn rounds(&self) -> u32 {
        match self {
            Self::Connected { rounds, .. } | Self::Degraded { rounds, .. } => *rounds,
        }
    }

    /// Whether a store handle was obtained.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// Drives repeated resolver passes until one succeeds or rounds run out.
pub struct StartupSequencer<C> {
    resolver: ConnectionResolver<C>,
    policy: StartupPolicy,
}

impl<C> StartupSequencer<C>
where
    C: StoreConnector,
{
    /// Pair `resolver` with the round schedule in `policy`.
    pub fn new(resolver: ConnectionResolver<C>, policy: StartupPolicy) -> Self {
        Self { resolver, policy }
    }

    /// Wait out the initial delay, then run resolver rounds over
    /// `candidates` with growing back-off until one connects.
    pub async fn run(&self, candidates: &[String]) -> StartupOutcome<C::Handle> {
        let StartupPolicy {
            initial_delay,
            max_rounds,
            backoff_step,
        } = self.policy;

        info!(
            delay_secs = initial_delay.as_secs(),
            "waiting for database dependencies before connecting"
        );
        sleep(initial_delay).await;

        let mut last_error = None;
        for round in 1..=max_rounds {
            info!(round, max_rounds, "database connection round");
            match self.resolver.resolve(candidates).await {
                Ok(resolved) => {
                    info!(round, position = resolved.position, "database ready");
                    return StartupOutcome::Connected {
                        handle: resolved.handle,
                        descriptor: resolved.descriptor,
                        rounds: round,
                    };
                }
                Err(error) => {
                    warn!(round, max_rounds, %error, "database connection round failed");
                    last_error = Some(error);
                    if let Some(wait) = round_backoff(round, max_rounds, backoff_step) {
                        info!(wait_secs = wait.as_secs(), "retrying database connection");
                        sleep(wait).await;
                    }
                }
            }
        }

        warn!(
            max_rounds,
            "all database connection rounds failed; starting in degraded mode"
        );
        StartupOutcome::Degraded {
            rounds: max_rounds,
            last_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::connection::test_connector::ScriptedConnector;
    use crate::domain::connection::ResolverPolicy;
    use rstest::rstest;
    use tokio::time::Instant;

    fn sequencer(connector: ScriptedConnector, max_rounds: u32) -> StartupSequencer<ScriptedConnector> {
        let resolver = ConnectionResolver::new(connector, ResolverPolicy::default());
        StartupSequencer::new(
            resolver,
            StartupPolicy {
                max_rounds,
                ..StartupPolicy::default()
            },
        )
    }

    #[rstest]
    #[case(1, 12, Some(5))]
    #[case(2, 12, Some(10))]
    #[case(11, 12, Some(55))]
    #[case(12, 12, None)]
    #[case(0, 12, None)]
    #[case(1, 1, None)]
    fn back_off_grows_linearly_and_stops_at_final_round(
        #[case] round: u32,
        #[case] max_rounds: u32,
        #[case] expected_secs: Option<u64>,
    ) {
        let wait = round_backoff(round, max_rounds, Duration::from_secs(5));
        assert_eq!(wait, expected_secs.map(Duration::from_secs));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn connects_in_first_round_after_initial_delay() {
        let started = Instant::now();
        let outcome = sequencer(ScriptedConnector::default(), 12)
            .run(&["postgres://a@ok/db".to_owned()])
            .await;

        assert!(outcome.is_connected());
        assert_eq!(outcome.rounds(), 1);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(11));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn degrades_after_every_round_fails() {
        let started = Instant::now();
        let outcome = sequencer(ScriptedConnector::default(), 3)
            .run(&["postgres://a@bad-probe/db".to_owned()])
            .await;

        assert!(!outcome.is_connected());
        assert_eq!(outcome.rounds(), 3);
        // 10s initial, 3s per failed descriptor per round, then 5s and 10s back-off.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(34));
        assert!(elapsed < Duration::from_secs(35));
        match outcome {
            StartupOutcome::Degraded { last_error, .. } => {
                assert!(matches!(last_error, Some(ResolveError::Exhausted(_))));
            }
            StartupOutcome::Connected { .. } => panic!("expected degraded outcome"),
        }
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn zero_rounds_degrades_immediately_after_initial_delay() {
        let outcome = sequencer(ScriptedConnector::default(), 0)
            .run(&["postgres://a@ok/db".to_owned()])
            .await;

        assert_eq!(outcome.rounds(), 0);
        assert!(!outcome.is_connected());
    }
}
