//! GPU memory polling
//!
//! A [`MemoryMonitor`] probes the report source once. If that succeeds it
//! creates its display and polls every [`POLL_INTERVAL`]; if it fails,
//! monitoring stays off for the rest of the process. Steady-state failures
//! only skip the cycle: the last published value stays on screen.

pub mod telemetry;
pub mod types;

pub use types::*;

use crate::command::ReportSource;
use crate::display::StatusDisplay;
use crate::report::{parse_report, DeviceIndex, MemoryReading};
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Time between the starts of consecutive poll cycles
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Owns the report source, the display and the polling state for one device
pub struct MemoryMonitor<S, D> {
    source: S,
    display: D,
    device: DeviceIndex,
    state: MonitorState,
}

impl<S, D> MemoryMonitor<S, D>
where
    S: ReportSource,
    D: StatusDisplay,
{
    pub fn new(source: S, display: D, device: DeviceIndex) -> Self {
        Self {
            source,
            display,
            device,
            state: MonitorState::Uninitialized,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn device(&self) -> DeviceIndex {
        self.device
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Fetch and parse one report without touching state or display
    pub async fn read(&self) -> Result<MemoryReading, CycleError> {
        fetch_reading(&self.source, self.device).await
    }

    /// Decide once whether monitoring can run on this host
    ///
    /// On success the display is created and the monitor becomes `Active`.
    /// Any failure makes it `Unavailable` for good.
    pub async fn probe(&mut self) -> Result<MemoryReading, MonitorError> {
        if self.state != MonitorState::Uninitialized {
            return Err(MonitorError::InvalidState(self.state));
        }

        self.state = MonitorState::Probing;
        debug!(device = %self.device, "Probing GPU memory reporting");

        match fetch_reading(&self.source, self.device).await {
            Ok(reading) => {
                self.display.create();
                self.state = MonitorState::Active;
                telemetry::record_reading(self.device, &reading);
                info!(
                    device = %self.device,
                    used_mb = reading.used_mb(),
                    total_mb = reading.total_mb(),
                    "GPU memory monitoring active"
                );
                Ok(reading)
            }
            Err(e) => {
                self.state = MonitorState::Unavailable;
                info!(device = %self.device, "GPU memory monitoring unavailable: {}", e);
                Err(MonitorError::ToolUnavailable(e))
            }
        }
    }

    /// Run one steady-state cycle: publish on success, log and skip on failure
    pub async fn poll_cycle(&mut self) -> Result<MemoryReading, MonitorError> {
        if self.state != MonitorState::Active {
            return Err(MonitorError::InvalidState(self.state));
        }

        match fetch_reading(&self.source, self.device).await {
            Ok(reading) => {
                self.display.publish(&reading.status_text(self.device));
                telemetry::record_reading(self.device, &reading);
                debug!(
                    device = %self.device,
                    used_mb = reading.used_mb(),
                    free_mb = reading.free_mb(),
                    "Published GPU memory reading"
                );
                Ok(reading)
            }
            Err(e) => {
                telemetry::record_cycle_failure(self.device, e.kind());
                warn!(device = %self.device, "Skipping GPU memory poll cycle: {}", e);
                Err(MonitorError::CycleFailed(e))
            }
        }
    }

    /// Poll until `cancel` fires, one cycle at a time
    ///
    /// The first cycle starts one [`POLL_INTERVAL`] after the call. A cycle
    /// that overruns delays the next tick instead of overlapping with it.
    /// Returns immediately unless the monitor is `Active`.
    pub async fn run(mut self, cancel: CancellationToken) -> Self {
        if self.state != MonitorState::Active {
            warn!(device = %self.device, state = %self.state, "Not polling: monitor is not active");
            return self;
        }

        let mut ticker = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        // Failures are logged inside the cycle
                        _ = self.poll_cycle() => {}
                    }
                }
            }
        }

        debug!(device = %self.device, "GPU memory polling stopped");
        self
    }
}

// Borrows only the source so cycle futures stay `Send` with a non-`Sync` display
async fn fetch_reading<S: ReportSource>(
    source: &S,
    device: DeviceIndex,
) -> Result<MemoryReading, CycleError> {
    let report = source.fetch_report().await?;
    Ok(parse_report(&report, device)?)
}

impl<S, D> MemoryMonitor<S, D>
where
    S: ReportSource + 'static,
    D: StatusDisplay + 'static,
{
    /// Probe, then spawn the polling task
    ///
    /// When the probe fails no task is spawned and the display is never created.
    pub async fn start(mut self) -> Result<MonitorHandle<S, D>, MonitorError> {
        self.probe().await?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));

        Ok(MonitorHandle { cancel, task })
    }
}

/// Handle to a running polling task
pub struct MonitorHandle<S, D> {
    cancel: CancellationToken,
    task: JoinHandle<MemoryMonitor<S, D>>,
}

impl<S, D> MonitorHandle<S, D> {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop polling and hand back the monitor
    ///
    /// An in-flight command is abandoned (and killed) rather than awaited.
    pub async fn stop(self) -> Result<MemoryMonitor<S, D>, JoinError> {
        self.cancel.cancel();
        self.task.await
    }
}
