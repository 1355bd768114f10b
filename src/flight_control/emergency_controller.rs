use super::coord::Coordinate;
use super::flight_simulator::FlightSimulator;
use crate::airport::AirportDirectory;
use crate::console_communication::TelemetryMessenger;
use crate::planner::{DiversionPlan, DiversionPlanner, PlannerError};
use crate::{info, plan};
use itertools::Itertools;
use std::sync::Arc;

#[derive(Debug, strum_macros::Display)]
pub enum EmergencyError {
    #[strum(to_string = "invalid emergency origin: {0}")]
    InvalidOrigin(String),
    #[strum(to_string = "{0}")]
    Planning(PlannerError),
}

impl std::error::Error for EmergencyError {}

impl From<PlannerError> for EmergencyError {
    fn from(value: PlannerError) -> Self { Self::Planning(value) }
}

/// Orchestrates one emergency request end to end: validate, reset the
/// flight, rank candidates, plan, commit, broadcast.
///
/// The slow part (the advisory call inside the planner) runs with no lock
/// held; only the reset before it and the commit after it touch the
/// flight state, each briefly.
pub struct EmergencyController {
    simulator: Arc<FlightSimulator>,
    directory: Arc<AirportDirectory>,
    planner: Arc<DiversionPlanner>,
    messenger: Arc<TelemetryMessenger>,
}

impl EmergencyController {
    /// Candidates fetched per emergency, also the cap on `nearbyAirports`.
    const MAX_CANDIDATES: usize = 5;

    pub fn new(
        simulator: Arc<FlightSimulator>,
        directory: Arc<AirportDirectory>,
        planner: Arc<DiversionPlanner>,
        messenger: Arc<TelemetryMessenger>,
    ) -> Self {
        Self { simulator, directory, planner, messenger }
    }

    /// Produces and commits a diversion plan for an emergency at `origin`.
    ///
    /// An out-of-range origin is rejected before anything is mutated.
    /// Past that point the call cannot fail in practice: directory and
    /// planner both bottom out in infallible fallbacks, and the returned
    /// plan is always complete. The plan is broadcast to observers and
    /// returned to the caller.
    pub async fn handle_emergency(
        &self,
        origin: Coordinate,
        altitude_ft: f64,
        emergency_type: &str,
    ) -> Result<DiversionPlan, EmergencyError> {
        if !origin.is_valid() {
            return Err(EmergencyError::InvalidOrigin(format!("{origin} out of range")));
        }
        info!("Emergency received: \"{emergency_type}\" at {origin}, {altitude_ft:.0} ft.");

        self.simulator.reset_for_emergency(origin).await;
        let candidates = self.directory.list_candidates(origin, Self::MAX_CANDIDATES).await;
        let diversion =
            self.planner.plan(origin, altitude_ft, emergency_type, candidates).await?;
        self.simulator.commit_diversion(diversion.chosen_airport().clone()).await;

        plan!(
            "Emergency diversion committed: {} via {} tier.",
            diversion.chosen_airport(),
            diversion.source()
        );
        let alternates = diversion
            .nearby_for_display()
            .iter()
            .map(|c| format!("{} {:.0} km", c.airport().code(), c.distance_km()))
            .join(", ");
        plan!("Alternates considered: {alternates}.");
        self.messenger.send_plan(diversion.clone());
        Ok(diversion)
    }
}
