use crate::flight_control::coord::Coordinate;
use crate::flight_control::flight_state::{ArrivalNotice, FlightSnapshot};
use crate::flight_control::glide::GlideEstimate;
use crate::planner::DiversionPlan;
use chrono::{DateTime, Utc};

/// Downstream console event, one JSON line per event on the wire:
/// `{"event": "<name>", "data": {…}}`.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ConsoleEvent {
    FlightData(FlightSnapshot),
    SolutionUpdate(DiversionPlan),
    FlightArrived(ArrivalNotice),
    GlideEstimate(GlideEstimate),
    Health(HealthReport),
    Error(ErrorReply),
}

/// Upstream console command, one JSON line per command, dispatched by the
/// `cmd` field. Unknown or malformed commands get an [`ErrorReply`].
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum ConsoleCommand {
    Emergency(EmergencyRequest),
    Glide(GlideRequest),
    Health,
}

/// An emergency trigger. Only the origin is mandatory; altitude and
/// emergency type fall back to sensible cruise defaults.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmergencyRequest {
    lat: f64,
    lon: f64,
    #[serde(default = "default_altitude_ft")]
    altitude: f64,
    #[serde(rename = "type", default = "default_emergency_type")]
    emergency_type: String,
}

fn default_altitude_ft() -> f64 { 35000.0 }

fn default_emergency_type() -> String { "Engine failure".to_string() }

impl EmergencyRequest {
    pub fn origin(&self) -> Coordinate { Coordinate::new(self.lat, self.lon) }
    pub fn altitude_ft(&self) -> f64 { self.altitude }
    pub fn emergency_type(&self) -> &str { &self.emergency_type }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GlideRequest {
    #[serde(rename = "altitudeFt")]
    altitude_ft: f64,
    #[serde(rename = "speedKts")]
    speed_kts: f64,
    #[serde(rename = "glideRatio", default)]
    glide_ratio: Option<f64>,
}

impl GlideRequest {
    pub fn altitude_ft(&self) -> f64 { self.altitude_ft }
    pub fn speed_kts(&self) -> f64 { self.speed_kts }
    pub fn glide_ratio(&self) -> Option<f64> { self.glide_ratio }
}

/// Liveness reply mirroring the current flight flags.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    status: &'static str,
    timestamp: DateTime<Utc>,
    is_emergency_active: bool,
    has_arrived: bool,
    current_position: Coordinate,
}

impl HealthReport {
    pub fn from_snapshot(snapshot: &FlightSnapshot) -> Self {
        Self {
            status: "ok",
            timestamp: Utc::now(),
            is_emergency_active: snapshot.is_emergency(),
            has_arrived: snapshot.has_arrived(),
            current_position: snapshot.position(),
        }
    }

    pub fn status(&self) -> &str { self.status }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorReply {
    error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self { Self { error: error.into() } }

    pub fn error(&self) -> &str { &self.error }
}
