use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;

use crate::config;
use crate::error::{Result, StationError};
use crate::params::{Health, ParamDef, ParamSink};
use crate::traits::StationDriver;

/// Built-in CLI arguments handled by the runner.
#[derive(argh::FromArgs)]
#[argh(description = "Skybridge weather-station driver")]
pub struct StationArgs {
    /// path to configuration file
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// polling period in milliseconds
    #[argh(option, short = 'p', default = "2000")]
    pub poll_interval_ms: u64,
}

/// Initialize logging from `RUST_LOG`, defaulting to `info`.
pub fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Set up a shutdown channel triggered by SIGINT/SIGTERM.
///
/// Returns the sender (for the signal handler) and a receiver (for the loop).
pub fn setup_shutdown() -> Result<(watch::Sender<()>, watch::Receiver<()>)> {
    let (tx, rx) = watch::channel(());
    let shutdown_tx = tx.clone();
    ctrlc::set_handler(move || {
        log::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| StationError::Runtime(format!("Failed to set signal handler: {e}")))?;
    Ok((tx, rx))
}

/// `ParamSink` that forwards every declaration and update to the log stream.
///
/// The standalone runner has no host UI, so the log is the parameter surface.
pub struct LogSink;

impl ParamSink for LogSink {
    fn declare_number(&mut self, def: &ParamDef) {
        log::info!(
            "Parameter {} ({}) range [{}, {}], warn {}%{}",
            def.name,
            def.label,
            def.min,
            def.max,
            def.warn_percent,
            if def.critical { ", critical" } else { "" }
        );
    }

    fn update_number(&mut self, name: &str, value: f64) {
        log::info!("{} = {:.2}", name, value);
    }

    fn update_status(&mut self, device: &str, status: &str) {
        log::info!("{}: {}", device, status);
    }
}

/// Drive a connected station on a fixed period until the shutdown signal.
///
/// Each tick invokes `on_timer` to completion before the next is scheduled,
/// so driver callbacks never overlap. Health transitions are logged; an
/// unhealthy tick never stops the loop.
pub async fn poll_loop<D: StationDriver>(
    driver: &mut D,
    poll_interval: Duration,
    mut shutdown_rx: watch::Receiver<()>,
) {
    let mut interval = tokio::time::interval(poll_interval);
    // The first tick completes immediately; consume it so ticks start one
    // period after connect.
    interval.tick().await;
    let mut last_health = driver.report_health();
    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.changed() => {
                log::debug!("Poll loop stopping");
                break;
            }
            _ = interval.tick() => {
                driver.on_timer().await;
                let health = driver.report_health();
                if health != last_health {
                    match health {
                        Health::Ok => log::info!("Weather data healthy"),
                        Health::Alert => log::warn!("Weather data unavailable"),
                    }
                    last_health = health;
                }
            }
        }
    }
}

/// Run a station driver with the SDK runtime.
///
/// This is the single entry point that driver binaries call from `main()`.
/// It handles: logging init, CLI args, config load, parameter declaration,
/// the connectivity probe, the poll timer and graceful shutdown.
pub async fn run_station<D: StationDriver>() -> Result<()> {
    // 1. Init logging
    setup_logging();

    // 2. Parse CLI args
    let args: StationArgs = argh::from_env();

    let meta = D::metadata();
    log::info!("{} v{} - {}", meta.name, meta.version, meta.description);

    // 3. Load config (or use defaults)
    let station_config: D::Config = config::load_config_or_default(args.config.as_deref())?;
    if let Some(path) = &args.config {
        log::info!("{}: config loaded from {}", meta.name, path.display());
    }

    // 4. Declare parameters on the sink
    let mut sink = Box::new(LogSink);
    for def in D::parameters() {
        sink.declare_number(def);
    }

    // 5. Construct the driver
    let mut driver = D::new(station_config, sink)?;

    // 6. Setup shutdown channel
    let (_shutdown_tx, shutdown_rx) = setup_shutdown()?;

    // 7. Connectivity probe; refuse to start polling on failure
    driver.connect().await?;

    // 8. Poll until shutdown
    poll_loop(&mut driver, Duration::from_millis(args.poll_interval_ms), shutdown_rx).await;

    // 9. Stop polling
    driver.disconnect().await?;
    log::info!("{} shut down", meta.name);
    Ok(())
}
