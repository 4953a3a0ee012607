//! Reconciliation loop: poll the wallpaper, re-extract its colors when it
//! changes and push them to the lighting device.
//!
//! ```text
//! Idle -> Checking -> Extracting -> Publishing -> Idle
//!            |            |
//!            +-> RetryWait <-+      (transient failure, attempts left)
//! ```
//!
//! Reading and decoding are retried a bounded number of times within one
//! poll, because Windows briefly locks the wallpaper while rewriting it.
//! Device errors are never retried here.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use color_grid::GridShape;

use super::{extract, ChangeDetector, Lighting, LightingSession, Verdict, WallpaperSource};
use crate::error::{ReconcileError, WallpaperError};
use crate::models::{AppConfig, ExhaustionPolicy, LightingMode};

/// Immutable loop settings, taken from [`AppConfig`] at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilerSettings {
    pub poll_interval: Duration,
    /// Total attempts per poll (at least one)
    pub attempts: u32,
    pub retry_delay: Duration,
    pub shape: GridShape,
    pub mode: LightingMode,
    pub on_exhausted: ExhaustionPolicy,
    pub republish: bool,
}

impl From<&AppConfig> for ReconcilerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            attempts: config.attempts(),
            retry_delay: config.retry_delay(),
            shape: config.grid_shape(),
            mode: config.mode,
            on_exhausted: config.on_exhausted,
            republish: config.republish,
        }
    }
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Checking,
    Extracting,
    Publishing,
    RetryWait,
}

/// What one poll did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Wallpaper not modified since the last publish
    Unchanged,
    /// New colors were sent for the wallpaper modified at this time
    Published(SystemTime),
    /// Every attempt failed and the device was left on its previous colors
    Degraded { attempts: u32 },
}

pub struct Reconciler {
    settings: ReconcilerSettings,
    source: Arc<dyn WallpaperSource>,
    lighting: Arc<LightingSession>,
    detector: ChangeDetector,
    last_good: Option<Lighting>,
    state: LoopState,
}

impl Reconciler {
    pub fn new(
        settings: ReconcilerSettings,
        source: Arc<dyn WallpaperSource>,
        lighting: Arc<LightingSession>,
    ) -> Self {
        Self {
            settings,
            source,
            lighting,
            detector: ChangeDetector::new(),
            last_good: None,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Modification time of the last wallpaper that was published
    pub fn marker(&self) -> Option<SystemTime> {
        self.detector.marker()
    }

    /// The lighting most recently sent to the device
    pub fn last_good(&self) -> Option<&Lighting> {
        self.last_good.as_ref()
    }

    /// Poll forever. Returns only when a tick fails.
    pub async fn run(&mut self) -> Result<(), ReconcileError> {
        tracing::info!(
            interval_ms = self.settings.poll_interval.as_millis() as u64,
            attempts = self.settings.attempts,
            rows = self.settings.shape.rows,
            cols = self.settings.shape.cols,
            mode = ?self.settings.mode,
            "Watching wallpaper"
        );
        loop {
            self.tick().await?;
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Run one poll, including any retries.
    pub async fn tick(&mut self) -> Result<TickOutcome, ReconcileError> {
        let attempts = self.settings.attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.attempt().await {
                Ok(Some((modified, lighting))) => {
                    self.publish(&lighting).await?;
                    self.detector.commit(modified);
                    tracing::info!(modified = %format_time(modified), "New wallpaper");
                    self.last_good = Some(lighting);
                    return Ok(TickOutcome::Published(modified));
                }
                Ok(None) => {
                    self.republish_last_good().await?;
                    self.enter(LoopState::Idle);
                    return Ok(TickOutcome::Unchanged);
                }
                Err(e) => {
                    let retries_left = attempts - attempt;
                    tracing::warn!(
                        error = %e,
                        attempt,
                        retries_left,
                        "Wallpaper unavailable"
                    );
                    if retries_left == 0 {
                        self.enter(LoopState::Idle);
                        return self.exhausted(attempts, e).await;
                    }
                    self.enter(LoopState::RetryWait);
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
            }
        }
    }

    /// Stat, then decode and extract if the wallpaper changed.
    async fn attempt(&mut self) -> Result<Option<(SystemTime, Lighting)>, WallpaperError> {
        self.enter(LoopState::Checking);
        let Verdict::Changed(modified) = self.detector.poll(self.source.as_ref())? else {
            return Ok(None);
        };

        self.enter(LoopState::Extracting);
        let source = self.source.clone();
        let mode = self.settings.mode;
        let shape = self.settings.shape;
        let lighting = tokio::task::spawn_blocking(move || {
            let frame = source.load()?;
            extract(&frame, mode, shape)
        })
        .await
        .map_err(|e| WallpaperError::Task(e.to_string()))??;

        Ok(Some((modified, lighting)))
    }

    async fn publish(&mut self, lighting: &Lighting) -> Result<(), ReconcileError> {
        self.enter(LoopState::Publishing);
        let result = self.lighting.publish(lighting).await;
        self.enter(LoopState::Idle);
        Ok(result?)
    }

    /// Re-send the last good lighting if the keepalive is enabled.
    async fn republish_last_good(&mut self) -> Result<(), ReconcileError> {
        if !self.settings.republish {
            return Ok(());
        }
        if let Some(lighting) = self.last_good.take() {
            let result = self.publish(&lighting).await;
            self.last_good = Some(lighting);
            result?;
        }
        Ok(())
    }

    async fn exhausted(
        &mut self,
        attempts: u32,
        last: WallpaperError,
    ) -> Result<TickOutcome, ReconcileError> {
        match self.settings.on_exhausted {
            ExhaustionPolicy::Exit => Err(ReconcileError::RetriesExhausted { attempts, last }),
            ExhaustionPolicy::KeepLastGood => {
                tracing::error!(
                    error = %last,
                    attempts,
                    "Wallpaper unreadable, keeping previous colors"
                );
                // The SDK drops idle sessions, which would lose the colors
                self.republish_last_good().await?;
                Ok(TickOutcome::Degraded { attempts })
            }
        }
    }

    fn enter(&mut self, state: LoopState) {
        if self.state != state {
            tracing::trace!(from = ?self.state, to = ?state, "Reconciler state");
            self.state = state;
        }
    }
}

/// Local-time RFC 3339 rendering of a file timestamp, for logs.
pub fn format_time(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time).to_rfc3339()
}
