//! In-memory stand-ins for the wallpaper file and the lighting device.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use chroma_reflect::error::{DeviceError, WallpaperError};
use chroma_reflect::services::{LightingDevice, Session, WallpaperSource};
use color_grid::{Bgr, ColorGrid, Frame};

/// One scripted outcome for a stat or load call
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// File held open by another process
    Locked,
    /// Bytes are not an image
    Garbage,
}

impl Step {
    fn error(self) -> WallpaperError {
        match self {
            Step::Locked => WallpaperError::io(
                "TranscodedWallpaper",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "file is locked"),
            ),
            Step::Garbage => WallpaperError::Decode {
                jpeg: "invalid marker".to_string(),
                png: "invalid signature".to_string(),
            },
        }
    }
}

/// Wallpaper source with a settable timestamp and scripted failures.
///
/// Once the failure scripts are used up every call succeeds.
pub struct ScriptedSource {
    modified: Mutex<SystemTime>,
    frame: Mutex<Frame>,
    stat_script: Mutex<VecDeque<Step>>,
    load_script: Mutex<VecDeque<Step>>,
    always_fail: AtomicBool,
    loads: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(frame: Frame, modified: SystemTime) -> Self {
        Self {
            modified: Mutex::new(modified),
            frame: Mutex::new(frame),
            stat_script: Mutex::new(VecDeque::new()),
            load_script: Mutex::new(VecDeque::new()),
            always_fail: AtomicBool::new(false),
            loads: AtomicUsize::new(0),
        }
    }

    /// Fail the next `n` loads with `step`
    pub fn fail_loads(&self, n: usize, step: Step) {
        self.load_script
            .lock()
            .unwrap()
            .extend(std::iter::repeat(step).take(n));
    }

    /// Fail the next `n` stats with `step`
    pub fn fail_stats(&self, n: usize, step: Step) {
        self.stat_script
            .lock()
            .unwrap()
            .extend(std::iter::repeat(step).take(n));
    }

    /// Make every load fail until cleared
    pub fn set_broken(&self, broken: bool) {
        self.always_fail.store(broken, Ordering::SeqCst);
    }

    /// Simulate the wallpaper being rewritten
    pub fn replace(&self, frame: Frame, modified: SystemTime) {
        *self.frame.lock().unwrap() = frame;
        *self.modified.lock().unwrap() = modified;
    }

    pub fn touch(&self, modified: SystemTime) {
        *self.modified.lock().unwrap() = modified;
    }

    pub fn load_calls(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl WallpaperSource for ScriptedSource {
    fn modified(&self) -> Result<SystemTime, WallpaperError> {
        if let Some(step) = self.stat_script.lock().unwrap().pop_front() {
            return Err(step.error());
        }
        Ok(*self.modified.lock().unwrap())
    }

    fn load(&self) -> Result<Frame, WallpaperError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.always_fail.load(Ordering::SeqCst) {
            return Err(Step::Locked.error());
        }
        if let Some(step) = self.load_script.lock().unwrap().pop_front() {
            return Err(step.error());
        }
        Ok(self.frame.lock().unwrap().clone())
    }
}

/// Something the device was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Grid(ColorGrid),
    Static(Bgr),
}

/// Lighting device that records every call
#[derive(Default)]
pub struct RecordingDevice {
    applied: Mutex<Vec<Applied>>,
    registered: AtomicUsize,
    unregistered: AtomicUsize,
    reject: AtomicBool,
    unregister_delay: Mutex<Duration>,
}

impl RecordingDevice {
    pub fn applied(&self) -> Vec<Applied> {
        self.applied.lock().unwrap().clone()
    }

    pub fn registered(&self) -> usize {
        self.registered.load(Ordering::SeqCst)
    }

    pub fn unregistered(&self) -> usize {
        self.unregistered.load(Ordering::SeqCst)
    }

    /// Make apply calls fail with a non-zero result code
    pub fn set_rejecting(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Make unregister take this long before it completes
    pub fn set_unregister_delay(&self, delay: Duration) {
        *self.unregister_delay.lock().unwrap() = delay;
    }

    fn record(&self, applied: Applied) -> Result<(), DeviceError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(DeviceError::Rejected { code: 87 });
        }
        self.applied.lock().unwrap().push(applied);
        Ok(())
    }
}

#[async_trait]
impl LightingDevice for RecordingDevice {
    async fn register(&self) -> Result<Session, DeviceError> {
        let id = self.registered.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        Ok(Session {
            id,
            uri: format!("http://localhost:54236/session/{id}"),
        })
    }

    async fn apply_grid(&self, _session: &Session, grid: &ColorGrid) -> Result<(), DeviceError> {
        self.record(Applied::Grid(grid.clone()))
    }

    async fn apply_static(&self, _session: &Session, color: Bgr) -> Result<(), DeviceError> {
        self.record(Applied::Static(color))
    }

    async fn unregister(&self, _session: Session) -> Result<(), DeviceError> {
        let delay = *self.unregister_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        self.unregistered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
