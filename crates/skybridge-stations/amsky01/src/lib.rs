//! AMSKY01 sky-sensor driver for skybridge.
//!
//! Polls the amsky01_viewer HTTP API (default `http://localhost:8080/data.json`)
//! on a fixed timer and republishes the hygro, light and cloud readings as
//! named weather parameters. Stateless poll-and-forward: the last successful
//! reading wins, a failed poll leaves it untouched.

mod api;
mod config;
mod driver;
mod snapshot;

pub use api::{Amsky01Client, ApiError};
pub use config::Config;
pub use driver::{Amsky01Station, API_URL_FIELD, DEVICE_NAME};
pub use snapshot::{DecodeError, SkyZone, WeatherSnapshot};
