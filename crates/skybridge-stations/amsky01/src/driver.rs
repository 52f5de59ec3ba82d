use std::time::Duration;

use skybridge::prelude::*;
use skybridge::station_metadata;

use crate::api::{Amsky01Client, ApiError};
use crate::config::Config;
use crate::snapshot::{DecodeError, SkyZone, WeatherSnapshot};

/// Device name shown in the host's status display.
pub const DEVICE_NAME: &str = "AMSKY01 API";

/// Name of the editable endpoint-URL text field.
pub const API_URL_FIELD: &str = "API_URL";

/// Parameters published by the driver, with the ranges and warning bands the
/// host uses for its own alerting.
const PARAMS: &[ParamDef] = &[
    ParamDef {
        name: "WEATHER_TEMPERATURE",
        label: "Temperature (°C)",
        min: -50.0,
        max: 80.0,
        warn_percent: 15.0,
        critical: true,
    },
    ParamDef {
        name: "WEATHER_HUMIDITY",
        label: "Humidity (%)",
        min: 0.0,
        max: 100.0,
        warn_percent: 15.0,
        critical: true,
    },
    ParamDef {
        name: "WEATHER_DEW_POINT",
        label: "Dew Point (°C)",
        min: -50.0,
        max: 50.0,
        warn_percent: 15.0,
        critical: true,
    },
    ParamDef {
        name: "WEATHER_LIGHT_LUX",
        label: "Light (lux)",
        min: 0.0,
        max: 100000.0,
        warn_percent: 15.0,
        critical: false,
    },
    ParamDef {
        name: "WEATHER_SKY_BRIGHTNESS",
        label: "Sky Brightness (mag/arcsec²)",
        min: 10.0,
        max: 25.0,
        warn_percent: 15.0,
        critical: false,
    },
    ParamDef {
        name: "WEATHER_SKY_TEMP_CENTER",
        label: "Sky Temp Center (°C)",
        min: -50.0,
        max: 50.0,
        warn_percent: 15.0,
        critical: true,
    },
];

/// One poll cycle failure: either the GET or the decode.
#[derive(Debug, thiserror::Error)]
enum CycleError {
    #[error(transparent)]
    Fetch(#[from] ApiError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Driver for the AMSKY01 sky sensor's viewer HTTP API.
pub struct Amsky01Station {
    client: Amsky01Client,
    endpoint: String,
    snapshot: WeatherSnapshot,
    sink: Box<dyn ParamSink>,
    connected: bool,
}

impl Amsky01Station {
    /// One fetch-and-decode cycle. On success the merged snapshot is
    /// published; on failure the previous snapshot stays untouched.
    async fn poll_cycle(&mut self) -> std::result::Result<(), CycleError> {
        let body = self.client.fetch(&self.endpoint).await?;
        log::debug!("Received document: {}", body);

        self.snapshot.apply_document(&body)?;
        log::debug!(
            "Parsed data - temp: {:?}, rh: {:?}, lux: {:?}, sqm: {:?}",
            self.snapshot.temperature,
            self.snapshot.humidity,
            self.snapshot.lux,
            self.snapshot.sky_brightness
        );

        self.publish();
        Ok(())
    }

    /// Forward every parameter whose backing field has been reported at
    /// least once. A never-reported field produces no update.
    fn publish(&mut self) {
        let updates = [
            ("WEATHER_TEMPERATURE", self.snapshot.temperature),
            ("WEATHER_HUMIDITY", self.snapshot.humidity),
            ("WEATHER_DEW_POINT", self.snapshot.dew_point),
            ("WEATHER_LIGHT_LUX", self.snapshot.lux),
            ("WEATHER_SKY_BRIGHTNESS", self.snapshot.sky_brightness),
            ("WEATHER_SKY_TEMP_CENTER", self.snapshot.sky_temp(SkyZone::Center)),
        ];
        for (name, value) in updates {
            if let Some(value) = value {
                self.sink.update_number(name, value);
            }
        }
    }
}

#[async_trait::async_trait]
impl StationDriver for Amsky01Station {
    type Config = Config;

    fn metadata() -> StationMetadata {
        station_metadata!()
    }

    fn parameters() -> &'static [ParamDef] {
        PARAMS
    }

    fn new(config: Config, sink: Box<dyn ParamSink>) -> Result<Self> {
        let client = Amsky01Client::new(Duration::from_millis(config.request_timeout_ms))
            .map_err(|e| StationError::Init(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            snapshot: WeatherSnapshot::default(),
            sink,
            connected: false,
        })
    }

    async fn connect(&mut self) -> Result<()> {
        log::info!("Attempting to connect to API...");
        self.sink.update_status(DEVICE_NAME, "Connecting");

        match self.poll_cycle().await {
            Ok(()) => {
                self.connected = true;
                self.sink.update_status(DEVICE_NAME, "Connected - Reading API");
                log::info!("Successfully connected to API");
                Ok(())
            }
            Err(e) => {
                self.sink.update_status(DEVICE_NAME, "Disconnected");
                log::error!("Failed to connect to API at {}: {}", self.endpoint, e);
                Err(StationError::Init(format!(
                    "Failed to connect to API at {}: {e}",
                    self.endpoint
                )))
            }
        }
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        self.sink.update_status(DEVICE_NAME, "Disconnected");
        log::info!("Disconnected from API");
        Ok(())
    }

    async fn on_timer(&mut self) {
        if !self.connected {
            return;
        }
        // Stale-is-fine: a failed cycle is logged, the previous snapshot and
        // the timer both stay alive. Persistent failure shows up through
        // report_health and the log stream.
        if let Err(e) = self.poll_cycle().await {
            log::error!("Poll failed: {}", e);
        }
    }

    fn on_config_changed(&mut self, name: &str, value: &str) -> Result<bool> {
        if name != API_URL_FIELD {
            return Ok(false);
        }
        // Stored as-is; takes effect on the next fetch.
        self.endpoint = value.to_string();
        log::info!("API URL set to: {}", self.endpoint);
        Ok(true)
    }

    fn report_health(&self) -> Health {
        if self.snapshot.valid {
            Health::Ok
        } else {
            log::warn!("No valid weather data available");
            Health::Alert
        }
    }
}
