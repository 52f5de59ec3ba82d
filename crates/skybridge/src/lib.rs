//! Batteries-included SDK for writing skybridge weather-station drivers.
//!
//! Extracts the scaffolding every driver needs (logging, CLI args, config
//! loading, parameter declaration, poll timer, signal handling, shutdown)
//! into a single crate. Driver authors implement the `StationDriver` trait
//! and call `run_station::<MyStation>().await`.
//!
//! # Example
//!
//! ```ignore
//! use skybridge::prelude::*;
//!
//! struct MyStation { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl StationDriver for MyStation {
//!     type Config = MyConfig;
//!     fn metadata() -> StationMetadata { skybridge::station_metadata!() }
//!     fn parameters() -> &'static [ParamDef] { PARAMS }
//!     fn new(config: MyConfig, sink: Box<dyn ParamSink>) -> Result<Self> { /* ... */ }
//!     async fn connect(&mut self) -> Result<()> { /* ... */ }
//!     /* ... */
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     skybridge::run_station::<MyStation>().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod params;
mod runner;
mod traits;

pub use config::{load_config, load_config_or_default, parse_config};
pub use error::{Result, StationError};
pub use params::{Health, ParamDef, ParamSink};
pub use runner::{poll_loop, run_station, setup_logging, setup_shutdown, LogSink, StationArgs};
pub use traits::{StationDriver, StationMetadata};

// Re-exports for convenience (so drivers don't need to add these deps)
pub use async_trait;
pub use log;
pub use tokio;

pub mod prelude {
    pub use crate::params::{Health, ParamDef, ParamSink};
    pub use crate::traits::{StationDriver, StationMetadata};
    pub use crate::{Result, StationError};
}
