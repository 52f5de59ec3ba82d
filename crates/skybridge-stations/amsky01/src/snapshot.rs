use std::collections::BTreeMap;

use serde::Deserialize;

/// Sky-temperature zones reported by the cloud sensor. The station currently
/// populates only `Center`; the others are decoded when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkyZone {
    North,
    East,
    South,
    West,
    Center,
}

impl SkyZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkyZone::North => "north",
            SkyZone::East => "east",
            SkyZone::South => "south",
            SkyZone::West => "west",
            SkyZone::Center => "center",
        }
    }
}

/// A structurally invalid weather document.
#[derive(Debug, thiserror::Error)]
#[error("malformed weather document: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

// Typed view of the wire document. Every section and field is optional and
// unknown keys are ignored; `null` reads as absent. A section that is present
// but not an object is skipped like an absent one — the station has shipped
// such documents and the other sections must still commit.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default, deserialize_with = "object_or_absent")]
    hygro: Option<RawHygro>,
    #[serde(default, deserialize_with = "object_or_absent")]
    light: Option<RawLight>,
    #[serde(default, deserialize_with = "object_or_absent")]
    cloud: Option<RawCloud>,
}

// Reads a section as `T` when it is a JSON object, `None` for anything else.
// Wrongly-typed fields inside an object section still fail the decode.
fn object_or_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_object() {
        serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct RawHygro {
    temp: Option<f64>,
    rh: Option<f64>,
    dew_point: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLight {
    lux: Option<f64>,
    sqm: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCloud {
    north: Option<f64>,
    east: Option<f64>,
    south: Option<f64>,
    west: Option<f64>,
    center: Option<f64>,
}

/// The last successfully decoded set of readings.
///
/// Scalar fields are `None` until the field first appears in a document; a
/// later document that omits the field leaves the previous value in place.
/// `valid` flips to true after any structurally sound document, including `{}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub lux: Option<f64>,
    pub sky_brightness: Option<f64>,
    pub sky_temps: BTreeMap<SkyZone, f64>,
    pub valid: bool,
}

impl WeatherSnapshot {
    /// Merge one JSON document into the snapshot.
    ///
    /// The document is deserialized in full before any field is touched, so a
    /// malformed body leaves the snapshot exactly as it was. Sections and the
    /// fields inside them are individually optional; absence (including a
    /// section of the wrong JSON type) is not an error.
    pub fn apply_document(&mut self, body: &str) -> Result<(), DecodeError> {
        let doc: RawDocument = serde_json::from_str(body)?;

        if let Some(hygro) = doc.hygro {
            merge(&mut self.temperature, hygro.temp);
            merge(&mut self.humidity, hygro.rh);
            merge(&mut self.dew_point, hygro.dew_point);
        }

        if let Some(light) = doc.light {
            merge(&mut self.lux, light.lux);
            merge(&mut self.sky_brightness, light.sqm);
        }

        if let Some(cloud) = doc.cloud {
            let zones = [
                (SkyZone::North, cloud.north),
                (SkyZone::East, cloud.east),
                (SkyZone::South, cloud.south),
                (SkyZone::West, cloud.west),
                (SkyZone::Center, cloud.center),
            ];
            for (zone, reading) in zones {
                if let Some(value) = reading {
                    self.sky_temps.insert(zone, value);
                }
            }
        }

        self.valid = true;
        Ok(())
    }

    /// Last reading for a sky zone, `None` if the zone was never reported.
    pub fn sky_temp(&self, zone: SkyZone) -> Option<f64> {
        self.sky_temps.get(&zone).copied()
    }
}

fn merge(slot: &mut Option<f64>, incoming: Option<f64>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}
