//! Fixed-period cadences for Framecast.
//!
//! The engine runs three independent periodic jobs: the broadcast push
//! (every 100 ms), the turn clock (every second), and the inactivity
//! reaper (every five seconds). Each one is a [`Cadence`] polled from the
//! engine actor's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = commands.recv() => { /* handle commands */ }
//!         _ = broadcast.wait_for_tick() => {
//!             store.broadcast(Instant::now());
//!             broadcast.record_tick_end();
//!         }
//!     }
//! }
//! ```
//!
//! `wait_for_tick` is cancel-safe: if another branch wins the `select!`,
//! the pending deadline is kept and the next call waits for the same
//! instant.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for one cadence.
#[derive(Debug, Clone)]
pub struct CadenceConfig {
    /// Time between ticks.
    pub period: Duration,
    /// Fraction of the period (0.0–1.0) that a tick's work may take
    /// before a warning is logged.
    pub budget_warn_threshold: f64,
}

impl CadenceConfig {
    /// Used when a zero period is configured.
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// A config for `period` with the default warning threshold.
    pub fn every(period: Duration) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    /// Fixes out-of-range values. Called by [`Cadence::new`].
    ///
    /// - a zero `period` becomes [`Self::DEFAULT_PERIOD`]
    /// - `budget_warn_threshold` is clamped to `0.0..=1.0`
    pub fn validated(mut self) -> Self {
        if self.period.is_zero() {
            warn!(
                default_ms = Self::DEFAULT_PERIOD.as_millis() as u64,
                "cadence period is zero, using default"
            );
            self.period = Self::DEFAULT_PERIOD;
        }
        self.budget_warn_threshold = self.budget_warn_threshold.clamp(0.0, 1.0);
        self
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
            budget_warn_threshold: 0.80,
        }
    }
}

// ---------------------------------------------------------------------------
// Tick info and metrics
// ---------------------------------------------------------------------------

/// Returned by [`Cadence::wait_for_tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Monotonically increasing tick number, starting at 1.
    pub tick: u64,
    /// The tick woke more than a tenth of a period after its deadline.
    pub overrun: bool,
    /// Whole periods that were skipped because of the overrun.
    pub ticks_skipped: u64,
}

/// Counters kept by a cadence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CadenceMetrics {
    pub total_ticks: u64,
    pub total_overruns: u64,
    pub total_skipped: u64,
    /// Longest work time reported through [`Cadence::record_tick_end`].
    pub max_tick_time: Duration,
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// A fixed-period tick source.
///
/// A late tick never triggers a burst of catch-up ticks: the missed
/// periods are counted as skipped and the next deadline is a full period
/// after the late wake-up.
#[derive(Debug)]
pub struct Cadence {
    config: CadenceConfig,
    tick_count: u64,
    next_tick: Instant,
    tick_start: Option<Instant>,
    metrics: CadenceMetrics,
}

impl Cadence {
    pub fn new(config: CadenceConfig) -> Self {
        let config = config.validated();
        debug!(period_ms = config.period.as_millis() as u64, "cadence created");
        Self {
            next_tick: Instant::now() + config.period,
            config,
            tick_count: 0,
            tick_start: None,
            metrics: CadenceMetrics::default(),
        }
    }

    /// A cadence firing every `period`.
    pub fn every(period: Duration) -> Self {
        Self::new(CadenceConfig::every(period))
    }

    /// Waits until the next tick is due.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let deadline = self.next_tick;
        time::sleep_until(deadline).await;

        let now = Instant::now();
        let period = self.config.period;
        self.tick_count += 1;
        self.tick_start = Some(now);

        let late_by = now.saturating_duration_since(deadline);
        let overrun = late_by > period / 10;
        let mut ticks_skipped = 0;

        if overrun {
            ticks_skipped = (late_by.as_nanos() / period.as_nanos()) as u64;
            if ticks_skipped > 0 {
                warn!(
                    tick = self.tick_count,
                    skipped = ticks_skipped,
                    late_ms = late_by.as_millis() as u64,
                    "tick overrun, skipping ahead"
                );
            }
        }
        self.next_tick = now + period;

        if overrun {
            self.metrics.total_overruns += 1;
        }
        self.metrics.total_skipped += ticks_skipped;
        self.metrics.total_ticks += 1;

        trace!(tick = self.tick_count, overrun, "tick fired");

        TickInfo {
            tick: self.tick_count,
            overrun,
            ticks_skipped,
        }
    }

    /// Reports that the work for the current tick is done. Logs a warning
    /// if it took more than the configured share of the period.
    pub fn record_tick_end(&mut self) {
        let Some(start) = self.tick_start.take() else {
            return;
        };
        let elapsed = start.elapsed();
        if elapsed > self.metrics.max_tick_time {
            self.metrics.max_tick_time = elapsed;
        }
        let utilization = elapsed.as_secs_f64() / self.config.period.as_secs_f64();
        if utilization >= self.config.budget_warn_threshold {
            warn!(
                tick = self.tick_count,
                elapsed_ms = elapsed.as_millis() as u64,
                period_ms = self.config.period.as_millis() as u64,
                "tick work approaching period"
            );
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }

    pub fn metrics(&self) -> &CadenceMetrics {
        &self.metrics
    }
}
