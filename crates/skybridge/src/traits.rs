use crate::error::Result;
use crate::params::{Health, ParamDef, ParamSink};

/// Static driver metadata logged at startup.
#[derive(Debug, Clone, Copy)]
pub struct StationMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// Build a [`StationMetadata`] from the calling crate's `Cargo.toml`.
#[macro_export]
macro_rules! station_metadata {
    () => {
        $crate::StationMetadata {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    };
}

/// Trait that driver authors implement to define a weather station.
///
/// The SDK handles everything else: logging, CLI args, config loading,
/// parameter declaration, the poll timer and graceful shutdown. All methods
/// are invoked serially by the runner; no two callbacks ever overlap.
#[async_trait::async_trait]
pub trait StationDriver: Send + 'static {
    /// Driver-specific configuration type (deserialized from YAML).
    type Config: serde::de::DeserializeOwned + Default + Send + Sync + 'static;

    /// Name, version and description reported at startup.
    fn metadata() -> StationMetadata;

    /// Parameters the driver publishes; declared to the sink before connect.
    fn parameters() -> &'static [ParamDef];

    /// Construct the driver from its config and the host's parameter sink.
    fn new(config: Self::Config, sink: Box<dyn ParamSink>) -> Result<Self>
    where
        Self: Sized;

    /// Connectivity probe. Succeeds iff one poll cycle succeeds; on success
    /// the driver is considered online and the runner starts the poll timer.
    /// No retry inside this call — the caller decides whether to retry.
    async fn connect(&mut self) -> Result<()>;

    /// Stop polling. Always succeeds; must not fail on a station that never
    /// connected.
    async fn disconnect(&mut self) -> Result<()>;

    /// One timer tick. Does no work while disconnected. Per-cycle failures
    /// are logged and absorbed — they surface through `report_health`, not
    /// by stopping the timer.
    async fn on_timer(&mut self);

    /// Handle a configuration text field change. Returns `Ok(true)` when the
    /// field was recognized and applied, `Ok(false)` to delegate to the host.
    fn on_config_changed(&mut self, name: &str, value: &str) -> Result<bool>;

    /// Current health, derived from the last successfully decoded data.
    /// Consulted independently of the timer; must not trigger a fetch.
    fn report_health(&self) -> Health;
}
