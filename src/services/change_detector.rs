//! Decides whether the wallpaper needs to be processed again.

use std::time::SystemTime;

use super::WallpaperSource;
use crate::error::WallpaperError;

/// Result of comparing the wallpaper's modification time to the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Strictly newer than the last processed version
    Changed(SystemTime),
    Unchanged,
}

/// Tracks the modification time of the last successfully processed
/// wallpaper.
///
/// The marker starts at "never", so the first successful poll always counts
/// as a change. It only moves when the caller commits, and never backwards.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    marker: Option<SystemTime>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self) -> Option<SystemTime> {
        self.marker
    }

    /// Compare a modification time against the marker.
    pub fn judge(&self, modified: SystemTime) -> Verdict {
        match self.marker {
            Some(marker) if modified <= marker => Verdict::Unchanged,
            _ => Verdict::Changed(modified),
        }
    }

    /// Stat the source and compare against the marker. Never mutates state.
    pub fn poll(&self, source: &dyn WallpaperSource) -> Result<Verdict, WallpaperError> {
        source.modified().map(|modified| self.judge(modified))
    }

    /// Record that the wallpaper at `modified` was fully processed.
    pub fn commit(&mut self, modified: SystemTime) {
        if self.marker.map_or(true, |marker| modified > marker) {
            self.marker = Some(modified);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_grid::Frame;
    use std::sync::Mutex;
    use std::time::Duration;

    struct StatOnly(Mutex<SystemTime>);

    impl WallpaperSource for StatOnly {
        fn modified(&self) -> Result<SystemTime, WallpaperError> {
            Ok(*self.0.lock().unwrap())
        }

        fn load(&self) -> Result<Frame, WallpaperError> {
            unreachable!("change detection never decodes")
        }
    }

    fn t(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_first_poll_is_changed() {
        let detector = ChangeDetector::new();
        assert_eq!(detector.judge(t(0)), Verdict::Changed(t(0)));
        assert_eq!(detector.marker(), None);
    }

    #[test]
    fn test_unchanged_twice_without_modification() {
        let source = StatOnly(Mutex::new(t(100)));
        let mut detector = ChangeDetector::new();
        detector.commit(t(100));

        assert_eq!(detector.poll(&source).unwrap(), Verdict::Unchanged);
        assert_eq!(detector.poll(&source).unwrap(), Verdict::Unchanged);
    }

    #[test]
    fn test_one_changed_verdict_per_modification() {
        let source = StatOnly(Mutex::new(t(100)));
        let mut detector = ChangeDetector::new();
        detector.commit(t(100));

        *source.0.lock().unwrap() = t(101);
        let verdict = detector.poll(&source).unwrap();
        assert_eq!(verdict, Verdict::Changed(t(101)));

        if let Verdict::Changed(m) = verdict {
            detector.commit(m);
        }
        assert_eq!(detector.marker(), Some(t(101)));
        assert_eq!(detector.poll(&source).unwrap(), Verdict::Unchanged);
    }

    #[test]
    fn test_changed_persists_until_commit() {
        let source = StatOnly(Mutex::new(t(200)));
        let mut detector = ChangeDetector::new();
        detector.commit(t(100));

        // a failed cycle does not commit, so the next poll retries
        assert_eq!(detector.poll(&source).unwrap(), Verdict::Changed(t(200)));
        assert_eq!(detector.poll(&source).unwrap(), Verdict::Changed(t(200)));
        assert_eq!(detector.marker(), Some(t(100)));
    }

    #[test]
    fn test_older_timestamp_is_unchanged() {
        let mut detector = ChangeDetector::new();
        detector.commit(t(100));
        assert_eq!(detector.judge(t(99)), Verdict::Unchanged);
    }

    #[test]
    fn test_commit_never_rolls_back() {
        let mut detector = ChangeDetector::new();
        detector.commit(t(100));
        detector.commit(t(50));
        assert_eq!(detector.marker(), Some(t(100)));
    }

    #[test]
    fn test_stat_failure_propagates() {
        struct Missing;
        impl WallpaperSource for Missing {
            fn modified(&self) -> Result<SystemTime, WallpaperError> {
                Err(WallpaperError::io(
                    "wall",
                    std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                ))
            }
            fn load(&self) -> Result<Frame, WallpaperError> {
                unreachable!()
            }
        }

        let detector = ChangeDetector::new();
        assert!(matches!(
            detector.poll(&Missing),
            Err(WallpaperError::Io { .. })
        ));
    }
}
