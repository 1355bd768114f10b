use crate::flight_control::coord::Coordinate;
use std::fmt;

/// A single airport from the catalog: identity plus the two facts the
/// diversion pipeline ranks on, position and runway length.
///
/// Reference data only; records are created by the directory from the
/// persistent store or the built-in fallback set and never mutated.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Airport {
    /// Full airport name, e.g. "Indira Gandhi Intl".
    name: String,
    /// IATA code, e.g. "DEL".
    code: String,
    /// Field reference point.
    #[serde(flatten)]
    position: Coordinate,
    /// Longest runway in feet.
    #[serde(rename = "runwayFt", default = "default_runway_ft")]
    runway_ft: u32,
}

/// Runway length assumed for records that carry none.
const fn default_runway_ft() -> u32 { 10_000 }

impl Airport {
    pub fn new(name: &str, code: &str, lat: f64, lon: f64, runway_ft: u32) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            position: Coordinate::new(lat, lon),
            runway_ft,
        }
    }

    /// Builds a record with the default runway length, for sources (such as
    /// an advisory reply) that only name a field and its position.
    pub fn with_default_runway(name: &str, code: &str, lat: f64, lon: f64) -> Self {
        Self::new(name, code, lat, lon, default_runway_ft())
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn code(&self) -> &str { &self.code }
    pub fn position(&self) -> Coordinate { self.position }
    pub fn runway_ft(&self) -> u32 { self.runway_ft }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// An airport annotated with its distance from a query origin.
///
/// Ephemeral: built per request by the directory, never cached, so the
/// distance always refers to the origin of the request that produced it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateAirport {
    #[serde(flatten)]
    airport: Airport,
    #[serde(rename = "distKm")]
    distance_km: f64,
}

impl CandidateAirport {
    pub fn new(airport: Airport, distance_km: f64) -> Self { Self { airport, distance_km } }

    pub fn airport(&self) -> &Airport { &self.airport }
    pub fn distance_km(&self) -> f64 { self.distance_km }
    pub fn into_airport(self) -> Airport { self.airport }
}
