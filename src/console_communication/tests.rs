use super::console_messages::{ConsoleCommand, ConsoleEvent, HealthReport};
use crate::airport::{Airport, CandidateAirport};
use crate::flight_control::coord::Coordinate;
use crate::flight_control::glide::estimate_glide;
use crate::flight_control::FlightState;
use crate::planner::DiversionPlanner;

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
    ]
}

#[test]
fn emergency_command_parses_with_cruise_defaults() {
    let raw = r#"{"cmd": "emergency", "lat": 28.61, "lon": 77.2}"#;
    let cmd: ConsoleCommand = serde_json::from_str(raw).unwrap();
    let ConsoleCommand::Emergency(req) = cmd else {
        panic!("parsed into the wrong command");
    };
    assert_eq!(req.origin(), Coordinate::new(28.61, 77.2));
    assert!((req.altitude_ft() - 35000.0).abs() < f64::EPSILON);
    assert_eq!(req.emergency_type(), "Engine failure");
}

#[test]
fn emergency_command_honors_explicit_fields() {
    let raw = r#"{"cmd": "emergency", "lat": 19.09, "lon": 72.87,
                  "altitude": 24000, "type": "Cabin depressurization"}"#;
    let cmd: ConsoleCommand = serde_json::from_str(raw).unwrap();
    let ConsoleCommand::Emergency(req) = cmd else {
        panic!("parsed into the wrong command");
    };
    assert!((req.altitude_ft() - 24000.0).abs() < f64::EPSILON);
    assert_eq!(req.emergency_type(), "Cabin depressurization");
}

#[test]
fn glide_command_ratio_is_optional() {
    let full = r#"{"cmd": "glide", "altitudeFt": 30000, "speedKts": 200, "glideRatio": 10}"#;
    let cmd: ConsoleCommand = serde_json::from_str(full).unwrap();
    let ConsoleCommand::Glide(req) = cmd else {
        panic!("parsed into the wrong command");
    };
    assert_eq!(req.glide_ratio(), Some(10.0));

    let bare = r#"{"cmd": "glide", "altitudeFt": 30000, "speedKts": 200}"#;
    let cmd: ConsoleCommand = serde_json::from_str(bare).unwrap();
    let ConsoleCommand::Glide(req) = cmd else {
        panic!("parsed into the wrong command");
    };
    assert_eq!(req.glide_ratio(), None);
    assert!((req.altitude_ft() - 30000.0).abs() < f64::EPSILON);
}

#[test]
fn unknown_commands_are_rejected() {
    assert!(serde_json::from_str::<ConsoleCommand>(r#"{"cmd": "teleport"}"#).is_err());
    assert!(serde_json::from_str::<ConsoleCommand>(r#"{"lat": 28.61}"#).is_err());
    assert!(serde_json::from_str::<ConsoleCommand>("not json at all").is_err());
}

#[test]
fn events_wrap_payloads_in_the_event_envelope() {
    let estimate = estimate_glide(10000.0, 150.0, None).unwrap();
    let value = serde_json::to_value(ConsoleEvent::GlideEstimate(estimate)).unwrap();
    assert_eq!(value["event"], "glideEstimate");
    assert_eq!(value["data"]["timeSec"], 592);
    assert_eq!(value["data"]["glideDistanceKm"], 45.72);
    assert_eq!(value["data"]["glideRatio"], 15.0);
}

#[tokio::test]
async fn solution_events_serialize_the_committed_plan() {
    let planner = DiversionPlanner::new(None);
    let plan = planner
        .plan(Coordinate::new(28.61, 77.2), 35000.0, "Engine fire", candidates())
        .await
        .unwrap();
    let value = serde_json::to_value(ConsoleEvent::SolutionUpdate(plan)).unwrap();

    assert_eq!(value["event"], "solutionUpdate");
    let data = &value["data"];
    assert_eq!(data["chosenAirport"]["code"], "DEL");
    assert_eq!(data["chosenAirport"]["runwayFt"], 12500);
    assert_eq!(data["source"], "fallback");
    assert_eq!(data["flightPathCoordinates"][0][0], 28.61);
    assert_eq!(data["flightPathCoordinates"][0][1], 77.2);
    assert!(data["atcCall"].as_str().unwrap().contains("Mayday"));
    assert_eq!(data["nearbyAirports"][1]["distKm"], 240.3);
}

#[test]
fn health_reports_mirror_the_flight_flags() {
    let state = FlightState::new(Coordinate::new(28.61, 77.2));
    let report = HealthReport::from_snapshot(&state.snapshot());
    assert_eq!(report.status(), "ok");

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["isEmergencyActive"], false);
    assert_eq!(value["hasArrived"], false);
    assert_eq!(value["currentPosition"]["lat"], 28.61);
}
