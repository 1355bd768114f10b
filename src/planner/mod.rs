mod advisory;
mod diversion_planner;

#[cfg(test)]
mod tests;

pub use advisory::{Advisor, AdvisoryError, AdvisoryVerdict};
pub use diversion_planner::{DiversionPlanner, PlannerError};

use crate::airport::{Airport, CandidateAirport};
use crate::flight_control::coord::Coordinate;
use itertools::Itertools;
use serde::ser::Serializer;

/// Which tier of the fallback chain produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Advisory,
    Fallback,
}

/// The committed outcome of an emergency request.
///
/// Immutable once built: the planner finalizes every field before the plan
/// leaves the tier chain, and from then on the same value is broadcast to
/// observers, returned to the caller and installed into the flight state.
/// Serializes in the camelCase shape the console protocol expects.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiversionPlan {
    chosen_airport: Airport,
    reasoning: String,
    checklist: Vec<String>,
    #[serde(rename = "flightPathCoordinates", serialize_with = "ser_path")]
    flight_path: Vec<Coordinate>,
    #[serde(rename = "atcCall")]
    radio_call: String,
    nearby_airports: Vec<CandidateAirport>,
    source: PlanSource,
}

impl DiversionPlan {
    pub fn chosen_airport(&self) -> &Airport { &self.chosen_airport }
    pub fn reasoning(&self) -> &str { &self.reasoning }
    pub fn checklist(&self) -> &[String] { &self.checklist }
    pub fn flight_path(&self) -> &[Coordinate] { &self.flight_path }
    pub fn radio_call(&self) -> &str { &self.radio_call }
    pub fn nearby_airports(&self) -> &[CandidateAirport] { &self.nearby_airports }
    pub fn source(&self) -> PlanSource { self.source }

    /// The candidate list as shown in a rendered plan view: duplicates by
    /// IATA code removed, ascending-distance order preserved. The internal
    /// `nearby_airports` list keeps duplicates for bookkeeping.
    pub fn nearby_for_display(&self) -> Vec<CandidateAirport> {
        self.nearby_airports
            .iter()
            .unique_by(|c| c.airport().code().to_ascii_uppercase())
            .cloned()
            .collect()
    }
}

/// Serializes a path as `[[lat, lon], …]` pairs (console wire format).
fn ser_path<S: Serializer>(path: &[Coordinate], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(path.iter().map(|c| [c.lat(), c.lon()]))
}
