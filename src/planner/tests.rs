use super::advisory::{parse_verdict, Advisor, AdvisoryError};
use super::{DiversionPlanner, PlanSource, PlannerError};
use crate::airport::{Airport, CandidateAirport};
use crate::flight_control::coord::Coordinate;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

struct CannedAdvisor(String);

#[async_trait]
impl Advisor for CannedAdvisor {
    async fn request_verdict(&self, _prompt: &str) -> Result<String, AdvisoryError> {
        Ok(self.0.clone())
    }
}

struct SlowAdvisor;

#[async_trait]
impl Advisor for SlowAdvisor {
    async fn request_verdict(&self, _prompt: &str) -> Result<String, AdvisoryError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(String::new())
    }
}

fn origin() -> Coordinate { Coordinate::new(28.61, 77.20) }

fn candidates() -> Vec<CandidateAirport> {
    vec![
        CandidateAirport::new(
            Airport::new("Indira Gandhi Intl", "DEL", 28.5562, 77.1000, 12500),
            11.2,
        ),
        CandidateAirport::new(
            Airport::new("Jaipur Intl", "JAI", 26.8242, 75.8122, 9177),
            240.3,
        ),
        CandidateAirport::new(
            Airport::new("Chhatrapati Shivaji Intl", "BOM", 19.0896, 72.8656, 11302),
            1150.6,
        ),
    ]
}

#[tokio::test]
async fn planner_without_advisor_picks_nearest() {
    let planner = DiversionPlanner::new(None);
    let plan = planner
        .plan(origin(), 35000.0, "Engine fire", candidates())
        .await
        .unwrap();

    assert_eq!(plan.source(), PlanSource::Fallback);
    assert_eq!(plan.chosen_airport().code(), "DEL");
    assert!(plan.checklist().len() >= 3);
    assert!(plan.radio_call().contains("Engine fire"));
    assert_eq!(plan.flight_path().first().copied(), Some(origin()));
    let last = plan.flight_path().last().copied().unwrap();
    assert!(last.distance_km(&plan.chosen_airport().position()) < 0.001);
    assert_eq!(plan.nearby_airports().len(), 3);
}

#[tokio::test]
async fn planner_rejects_empty_candidate_list() {
    let planner = DiversionPlanner::new(None);
    let err = planner
        .plan(origin(), 35000.0, "Engine fire", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::NoCandidates));
}

#[tokio::test]
async fn advisory_verdict_resolves_by_code_onto_catalog_record() {
    // Verdict names JAI with sloppy coordinates; catalog data must win.
    let reply = r#"{
        "chosenAirport": {"name": "Jaipur", "code": "jai", "lat": 26.8, "lon": 75.8},
        "reasoning": "Long runway within range",
        "checklist": ["1. Fly the aircraft"],
        "flightPathCoordinates": [[28.61, 77.20], [26.8242, 75.8122]],
        "atcCall": "Mayday, Engine fire, diverting to Jaipur"
    }"#;
    let planner = DiversionPlanner::new(Some(Arc::new(CannedAdvisor(reply.to_string()))));
    let plan = planner
        .plan(origin(), 35000.0, "Engine fire", candidates())
        .await
        .unwrap();

    assert_eq!(plan.source(), PlanSource::Advisory);
    assert_eq!(plan.chosen_airport().code(), "JAI");
    assert_eq!(plan.chosen_airport().runway_ft(), 9177);
    assert_eq!(plan.reasoning(), "Long runway within range");
}

#[tokio::test]
async fn advisory_unknown_airport_keeps_verdict_position() {
    let reply = r#"{
        "chosenAirport": {"name": "Hindon AFB", "lat": 28.7077, "lon": 77.3558}
    }"#;
    let planner = DiversionPlanner::new(Some(Arc::new(CannedAdvisor(reply.to_string()))));
    let plan = planner
        .plan(origin(), 35000.0, "Cabin depressurization", candidates())
        .await
        .unwrap();

    assert_eq!(plan.chosen_airport().name(), "Hindon AFB");
    assert_eq!(plan.chosen_airport().runway_ft(), 10000);
    assert!((plan.chosen_airport().position().lat() - 28.7077).abs() < 1e-9);
}

#[tokio::test]
async fn advisory_partial_verdict_is_backfilled() {
    let reply = r#"{"chosenAirport": {"name": "Indira Gandhi Intl", "code": "DEL", "lat": 28.5562, "lon": 77.1}}"#;
    let planner = DiversionPlanner::new(Some(Arc::new(CannedAdvisor(reply.to_string()))));
    let plan = planner
        .plan(origin(), 35000.0, "Hydraulic failure", candidates())
        .await
        .unwrap();

    assert_eq!(plan.source(), PlanSource::Advisory);
    assert_eq!(plan.checklist().len(), 8);
    assert_eq!(plan.flight_path().len(), 2);
    assert!(plan.radio_call().contains("Hydraulic failure"));
    assert!(plan.radio_call().contains("Indira Gandhi Intl"));
}

#[tokio::test]
async fn advisory_garbage_falls_back_to_nearest() {
    let planner = DiversionPlanner::new(Some(Arc::new(CannedAdvisor(
        "I am sorry, I cannot help with that.".to_string(),
    ))));
    let plan = planner
        .plan(origin(), 35000.0, "Engine fire", candidates())
        .await
        .unwrap();
    assert_eq!(plan.source(), PlanSource::Fallback);
    assert_eq!(plan.chosen_airport().code(), "DEL");
}

#[tokio::test]
async fn advisory_timeout_falls_back_to_nearest() {
    let planner = DiversionPlanner::with_timeout(
        Some(Arc::new(SlowAdvisor)),
        Duration::from_millis(50),
    );
    let plan = planner
        .plan(origin(), 35000.0, "Engine fire", candidates())
        .await
        .unwrap();
    assert_eq!(plan.source(), PlanSource::Fallback);
    assert_eq!(plan.chosen_airport().code(), "DEL");
}

#[test]
fn verdict_parsing_survives_fences_and_trailing_commas() {
    let raw = "```json\n{\n  \"chosenAirport\": {\"name\": \"Lokpriya Gopinath Bordoloi Intl\", \"code\": \"GAU\", \"lat\": 26.1061, \"lon\": 91.5859,},\n  \"checklist\": [\"1. Maintain control\",],\n}\n```";
    let verdict = parse_verdict(raw).unwrap();
    assert_eq!(verdict.airport_code(), Some("GAU"));
    assert_eq!(verdict.checklist().len(), 1);
}

#[test]
fn verdict_parsing_strips_control_characters() {
    let raw = "{\"chosenAirport\": {\"name\": \"Dab\u{0007}olim\", \"lat\": 15.38, \"lon\": 73.83}}";
    let verdict = parse_verdict(raw).unwrap();
    assert_eq!(verdict.airport_name(), "Dabolim");
}

#[test]
fn verdict_parsing_extracts_embedded_object() {
    let raw = "Here is my analysis:\n{\"chosenAirport\": {\"name\": \"Dabolim\", \"lat\": 15.38, \"lon\": 73.83}}\nGood luck!";
    assert!(parse_verdict(raw).is_ok());
}

#[test]
fn verdict_parsing_rejects_missing_airport() {
    assert!(parse_verdict("{\"reasoning\": \"no airport here\"}").is_err());
    assert!(parse_verdict("no json at all").is_err());
    let off_globe = "{\"chosenAirport\": {\"name\": \"Nowhere\", \"lat\": 412.0, \"lon\": 73.8}}";
    assert!(parse_verdict(off_globe).is_err());
}

#[tokio::test]
async fn nearby_display_dedups_by_code() {
    let mut cands = candidates();
    cands.push(CandidateAirport::new(
        Airport::new("Indira Gandhi International", "DEL", 28.5562, 77.1000, 12192),
        11.4,
    ));
    let planner = DiversionPlanner::new(None);
    let plan = planner
        .plan(origin(), 35000.0, "Engine fire", cands)
        .await
        .unwrap();
    assert_eq!(plan.nearby_airports().len(), 4);
    assert_eq!(plan.nearby_for_display().len(), 3);
    assert_eq!(plan.nearby_for_display()[0].airport().name(), "Indira Gandhi Intl");
}
