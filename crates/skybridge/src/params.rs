/// Declaration of a numeric parameter a driver publishes to the host.
///
/// The range and warning band are registered with the sink at startup; the
/// host uses them for its own alerting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDef {
    /// Fixed parameter name, e.g. `WEATHER_TEMPERATURE`.
    pub name: &'static str,
    /// Human-readable label shown by the host UI.
    pub label: &'static str,
    /// Lower bound of the valid range.
    pub min: f64,
    /// Upper bound of the valid range.
    pub max: f64,
    /// Warning band as a percentage of the range.
    pub warn_percent: f64,
    /// Whether the host should treat this parameter as safety-critical.
    pub critical: bool,
}

/// Two-valued health state the host polls to decide whether the station
/// is functioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Ok,
    Alert,
}

/// Sink for parameter updates. The host side implements this; drivers hold
/// a boxed sink and forward readings through it.
pub trait ParamSink: Send {
    /// Register a parameter with its label, range and warning band.
    fn declare_number(&mut self, def: &ParamDef);

    /// Forward one reading for a previously declared parameter.
    fn update_number(&mut self, name: &str, value: f64);

    /// Push the human-readable device status text.
    fn update_status(&mut self, device: &str, status: &str);
}
