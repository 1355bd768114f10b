use super::advisory::{self, Advisor, AdvisoryError, AdvisoryVerdict};
use super::{DiversionPlan, PlanSource};
use crate::airport::{Airport, CandidateAirport};
use crate::flight_control::coord::Coordinate;
use crate::{plan, warn};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on one advisory round trip, prompt out to reply in.
const ADVISORY_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, strum_macros::Display)]
pub enum PlannerError {
    #[strum(to_string = "no candidate airports to plan with")]
    NoCandidates,
}

impl std::error::Error for PlannerError {}

/// Produces a [`DiversionPlan`] from an emergency situation and a ranked
/// candidate list.
///
/// Planning runs a two-tier chain: ask the advisor first, and on any
/// advisory failure select the nearest candidate deterministically. The
/// second tier cannot fail, so given at least one candidate `plan` always
/// returns a complete plan.
pub struct DiversionPlanner {
    advisor: Option<Arc<dyn Advisor>>,
    advisory_timeout: Duration,
}

impl DiversionPlanner {
    pub fn new(advisor: Option<Arc<dyn Advisor>>) -> Self {
        Self::with_timeout(advisor, ADVISORY_TIMEOUT)
    }

    pub fn with_timeout(advisor: Option<Arc<dyn Advisor>>, advisory_timeout: Duration) -> Self {
        Self { advisor, advisory_timeout }
    }

    pub fn has_advisor(&self) -> bool { self.advisor.is_some() }

    /// Plans a diversion for an emergency at `origin`.
    ///
    /// `candidates` must be sorted by ascending distance and non-empty;
    /// an empty list is the only error this method can return.
    pub async fn plan(
        &self,
        origin: Coordinate,
        altitude_ft: f64,
        emergency_type: &str,
        candidates: Vec<CandidateAirport>,
    ) -> Result<DiversionPlan, PlannerError> {
        if candidates.is_empty() {
            return Err(PlannerError::NoCandidates);
        }
        let mut plan = match self
            .advisory_tier(origin, altitude_ft, emergency_type, &candidates)
            .await
        {
            Ok(drafted) => drafted,
            Err(cause) => {
                warn!("Advisory tier failed: {cause}. Using deterministic fallback.");
                Self::fallback_tier(origin, emergency_type, &candidates)
            }
        };
        Self::finalize(&mut plan, origin, emergency_type, candidates);
        Ok(plan)
    }

    /// First tier: prompt the advisor and map its verdict onto a plan.
    async fn advisory_tier(
        &self,
        origin: Coordinate,
        altitude_ft: f64,
        emergency_type: &str,
        candidates: &[CandidateAirport],
    ) -> Result<DiversionPlan, AdvisoryError> {
        let advisor = self.advisor.as_ref().ok_or_else(|| {
            AdvisoryError::Unreachable("no advisory credential configured".to_string())
        })?;
        let prompt = advisory::build_prompt(origin, altitude_ft, emergency_type, candidates);
        let raw = tokio::time::timeout(self.advisory_timeout, advisor.request_verdict(&prompt))
            .await
            .map_err(|_| {
                AdvisoryError::Unreachable(format!(
                    "no reply within {}s",
                    self.advisory_timeout.as_secs()
                ))
            })??;
        let verdict = advisory::parse_verdict(&raw)?;
        let chosen = Self::resolve_chosen(&verdict, candidates);
        plan!("Advisory selected {chosen}: {}", verdict.reasoning());
        Ok(DiversionPlan {
            chosen_airport: chosen,
            reasoning: verdict.reasoning().to_string(),
            checklist: verdict.checklist().to_vec(),
            flight_path: verdict.flight_path().collect(),
            radio_call: verdict.radio_call().to_string(),
            nearby_airports: Vec::new(),
            source: PlanSource::Advisory,
        })
    }

    /// Second tier: nearest candidate, templated fields. Never fails.
    fn fallback_tier(
        origin: Coordinate,
        emergency_type: &str,
        candidates: &[CandidateAirport],
    ) -> DiversionPlan {
        let nearest = &candidates[0];
        let chosen = nearest.airport().clone();
        plan!(
            "Fallback selected nearest candidate {chosen} at {:.1} km",
            nearest.distance_km()
        );
        let reasoning = format!(
            "Nearest suitable airport at {:.1} km with {} ft runway",
            nearest.distance_km(),
            chosen.runway_ft()
        );
        let radio_call = format!(
            "Mayday Mayday Mayday, {emergency_type}, diverting to {}",
            chosen.name()
        );
        DiversionPlan {
            reasoning,
            checklist: emergency_checklist(),
            flight_path: vec![origin, chosen.position()],
            radio_call,
            chosen_airport: chosen,
            nearby_airports: Vec::new(),
            source: PlanSource::Fallback,
        }
    }

    /// Maps a verdict's airport back onto catalog data when it names a known
    /// candidate, first by code and then by name. An unknown pick keeps the
    /// verdict's own position and gets the default runway length.
    fn resolve_chosen(verdict: &AdvisoryVerdict, candidates: &[CandidateAirport]) -> Airport {
        if let Some(code) = verdict.airport_code() {
            if let Some(hit) = candidates
                .iter()
                .find(|c| c.airport().code().eq_ignore_ascii_case(code))
            {
                return hit.airport().clone();
            }
        }
        if let Some(hit) = candidates
            .iter()
            .find(|c| c.airport().name().eq_ignore_ascii_case(verdict.airport_name()))
        {
            return hit.airport().clone();
        }
        let pos = verdict.airport_position();
        Airport::with_default_runway(
            verdict.airport_name(),
            verdict.airport_code().unwrap_or("XXX"),
            pos.lat(),
            pos.lon(),
        )
    }

    /// Post-processing applied to every plan regardless of tier: attach the
    /// candidate list and backfill any field the tier left unusable.
    fn finalize(
        plan: &mut DiversionPlan,
        origin: Coordinate,
        emergency_type: &str,
        candidates: Vec<CandidateAirport>,
    ) {
        if plan.checklist.is_empty() {
            plan.checklist = emergency_checklist();
        }
        if plan.flight_path.len() < 2 {
            plan.flight_path = vec![origin, plan.chosen_airport.position()];
        }
        if plan.radio_call.trim().is_empty() {
            plan.radio_call = format!(
                "Mayday Mayday Mayday, {emergency_type}, position {:.2}N {:.2}E, \
                requesting immediate diversion to {}",
                origin.lat(),
                origin.lon(),
                plan.chosen_airport.name()
            );
        }
        plan.nearby_airports = candidates;
    }
}

/// Fixed checklist for plans whose tier supplied none.
fn emergency_checklist() -> Vec<String> {
    [
        "1. Maintain aircraft control - wings level",
        "2. Declare emergency - squawk 7700 on 121.5 MHz",
        "3. Secure affected systems",
        "4. Begin descent to 10,000 ft MSL",
        "5. Reduce speed to single-engine best glide",
        "6. Request ATC vectors to nearest airport",
        "7. Configure for emergency approach",
        "8. Complete emergency landing checklist",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
