pub mod change_detector;
pub mod chroma;
pub mod extract;
pub mod lighting;
pub mod reconciler;
pub mod wallpaper;

pub use change_detector::{ChangeDetector, Verdict};
pub use chroma::ChromaClient;
pub use extract::{extract, Lighting};
pub use lighting::{LightingDevice, LightingSession, Session};
pub use reconciler::{LoopState, Reconciler, ReconcilerSettings, TickOutcome};
pub use wallpaper::{decode_frame, WallpaperFile, WallpaperSource};
