use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chroma_reflect::error::{DeviceError, ReconcileError};
use chroma_reflect::models::{AppConfig, LightingMode};
use chroma_reflect::services::{
    decode_frame, extract, ChromaClient, Lighting, LightingDevice, LightingSession, Reconciler,
    ReconcilerSettings, WallpaperFile, WallpaperSource,
};

#[derive(Parser)]
#[command(name = "chroma-reflect")]
#[command(about = "Mirror the desktop wallpaper's colors on Razer Chroma devices")]
struct Cli {
    /// Config file (defaults to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Wallpaper file to track instead of the Windows transcoded wallpaper
    #[arg(long, global = true)]
    wallpaper: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the wallpaper and drive the lighting device (default)
    Run,
    /// Print the colors extracted from an image file
    Extract {
        /// JPEG or PNG image to reduce
        #[arg(short, long)]
        image: PathBuf,

        /// Override the configured lighting mode
        #[arg(short, long, value_enum)]
        mode: Option<LightingMode>,
    },
    /// Show resolved configuration and wallpaper state
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        config,
        wallpaper,
        command,
    } = Cli::parse();

    match command {
        Some(Commands::Extract { image, mode }) => {
            init_tracing("chroma_reflect=warn");
            let config = load_config(config, wallpaper);
            run_extract_command(&config, &image, mode)
        }
        Some(Commands::Status) => {
            init_tracing("chroma_reflect=warn");
            let config = load_config(config, wallpaper);
            run_status_command(&config);
            Ok(())
        }
        Some(Commands::Run) | None => {
            init_tracing("chroma_reflect=info");
            let config = load_config(config, wallpaper);
            run_daemon(config).await
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve the config file from the flag or $CONFIG_FILE, then apply the
/// wallpaper override.
fn load_config(config_file: Option<PathBuf>, wallpaper: Option<PathBuf>) -> AppConfig {
    let config_file = config_file.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let mut config = AppConfig::load(config_file.as_deref());
    if wallpaper.is_some() {
        config.wallpaper = wallpaper;
    }
    config
}

/// Decode one image and print what would be sent to the device
fn run_extract_command(
    config: &AppConfig,
    image: &Path,
    mode: Option<LightingMode>,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
    let frame = decode_frame(&bytes)?;
    let mode = mode.unwrap_or(config.mode);

    match extract(&frame, mode, config.grid_shape())? {
        Lighting::Grid(grid) => {
            let shape = grid.shape();
            println!(
                "{} ({}x{}) -> {}x{} dominant colors (packed BGR):",
                image.display(),
                frame.width(),
                frame.height(),
                shape.rows,
                shape.cols
            );
            for row in grid.rows() {
                let line: Vec<String> =
                    row.iter().map(|c| format!("{:06X}", c.packed())).collect();
                println!("  {}", line.join(" "));
            }
        }
        Lighting::Static(color) => {
            println!(
                "{} ({}x{}) -> average color {color} (packed BGR 0x{:06X})",
                image.display(),
                frame.width(),
                frame.height(),
                color.packed()
            );
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command(config: &AppConfig) {
    use chroma_reflect::services::reconciler::format_time;

    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Chroma Reflect v{VERSION}\n");

    println!("Wallpaper:");
    match config.wallpaper_path() {
        Some(path) => {
            println!("  Path:     {}", path.display());
            match WallpaperFile::new(&path).modified() {
                Ok(modified) => println!("  Modified: {}", format_time(modified)),
                Err(e) => println!("  Modified: unavailable ({e})"),
            }
        }
        None => println!("  Path:     (home directory unknown, set `wallpaper`)"),
    }

    println!("\nReconciler:");
    println!("  Poll interval: {} ms", config.poll_interval_ms);
    println!(
        "  Attempts:      {} ({} ms apart)",
        config.attempts(),
        config.retry_delay_ms
    );
    println!("  Grid:          {}x{}", config.grid_rows, config.grid_cols);
    println!("  Mode:          {:?}", config.mode);
    println!("  On exhausted:  {:?}", config.on_exhausted);
    println!("  Republish:     {}", config.republish);

    println!("\nChroma SDK:");
    println!("  URL:     {}", config.chroma.url);
    println!("  Device:  {}", config.chroma.device);
    println!("  Timeout: {} ms", config.chroma.timeout_ms);

    println!("\nRun 'chroma-reflect --help' for more details.");
}

/// Register with the device and reconcile until a fatal error or a signal
async fn run_daemon(config: AppConfig) -> anyhow::Result<()> {
    let path = config
        .wallpaper_path()
        .context("Cannot locate the home directory; set `wallpaper` in the config")?;
    tracing::info!(path = %path.display(), "Tracking wallpaper");

    let source: Arc<dyn WallpaperSource> = Arc::new(WallpaperFile::new(path));
    let device: Arc<dyn LightingDevice> = Arc::new(ChromaClient::new(config.chroma.clone())?);
    let session = Arc::new(
        LightingSession::open(device)
            .await
            .with_context(|| format!("Failed to register with {}", config.chroma.url))?,
    );

    // Unregister before exiting on SIGINT/SIGTERM. The session guard makes
    // the main path wait for this unregister instead of racing it.
    let signal_session = session.clone();
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        tracing::info!(signal, "Caught signal");
        if let Err(e) = signal_session.teardown().await {
            tracing::warn!(error = %e, "Failed to unregister lighting session");
        }
        std::process::exit(0);
    });

    let mut reconciler = Reconciler::new(ReconcilerSettings::from(&config), source, session.clone());
    let result = reconciler.run().await;

    if let Err(e) = session.teardown().await {
        tracing::warn!(error = %e, "Failed to unregister lighting session");
    }

    match result {
        // The signal task closed the session under the loop
        Err(ReconcileError::Device(DeviceError::NotRegistered)) => {
            tracing::info!("Lighting session closed, shutting down");
        }
        Err(e) => {
            // A wallpaper that stays unreadable needs an operator; exit non-zero
            tracing::error!(error = %e, "Reconciliation stopped");
            std::process::exit(1);
        }
        Ok(()) => {}
    }

    Ok(())
}

/// Wait for SIGINT or SIGTERM (Ctrl-C only on non-Unix platforms)
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => tokio::select! {
                _ = ctrl_c() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                ctrl_c().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
        "Ctrl-C"
    }
}

/// Resolve on Ctrl-C. If the handler cannot be installed, never resolve.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
