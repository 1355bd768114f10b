use super::store::{AirportStore, StoreError};
use super::{Airport, AirportDirectory, CandidateAirport, FALLBACK_AIRPORTS};
use crate::flight_control::coord::Coordinate;
use async_trait::async_trait;
use std::sync::Arc;

struct CannedStore(Vec<Airport>);

#[async_trait]
impl AirportStore for CannedStore {
    async fn load_catalog(&self) -> Result<Vec<Airport>, StoreError> {
        Ok(self.0.clone())
    }
}

struct BrokenStore;

#[async_trait]
impl AirportStore for BrokenStore {
    async fn load_catalog(&self) -> Result<Vec<Airport>, StoreError> {
        Err(StoreError::Unreadable(std::io::Error::other("db down")))
    }
}

fn delhi() -> Coordinate { Coordinate::new(28.61, 77.20) }

#[tokio::test]
async fn no_store_ranks_fallback_catalog() {
    let dir = AirportDirectory::new(None);
    let ranked = dir.list_candidates(delhi(), 5).await;

    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].airport().code(), "DEL");
    assert!(ranked[0].distance_km() < 15.0);
    for pair in ranked.windows(2) {
        assert!(pair[0].distance_km() <= pair[1].distance_km());
    }
}

#[tokio::test]
async fn broken_store_falls_back() {
    let dir = AirportDirectory::new(Some(Arc::new(BrokenStore)));
    let ranked = dir.list_candidates(delhi(), FALLBACK_AIRPORTS.len()).await;
    assert_eq!(ranked.len(), FALLBACK_AIRPORTS.len());
    assert_eq!(ranked[0].airport().code(), "DEL");
}

#[tokio::test]
async fn empty_store_falls_back() {
    let dir = AirportDirectory::new(Some(Arc::new(CannedStore(Vec::new()))));
    let ranked = dir.list_candidates(delhi(), 3).await;
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].airport().code(), "DEL");
}

#[tokio::test]
async fn stored_catalog_wins_over_fallback() {
    let catalog = vec![
        Airport::new("Hindon AFB", "VIDX", 28.7077, 77.3558, 9000),
        Airport::new("Safdarjung", "VIDD", 28.5846, 77.2055, 3600),
    ];
    let dir = AirportDirectory::new(Some(Arc::new(CannedStore(catalog))));
    let ranked = dir.list_candidates(delhi(), 5).await;

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].airport().code(), "VIDD");
    assert_eq!(ranked[1].airport().code(), "VIDX");
}

#[tokio::test]
async fn ranking_is_deterministic() {
    let dir = AirportDirectory::new(None);
    let first = dir.list_candidates(delhi(), 5).await;
    let second = dir.list_candidates(delhi(), 5).await;
    let codes = |v: &[CandidateAirport]| {
        v.iter().map(|c| c.airport().code().to_string()).collect::<Vec<_>>()
    };
    assert_eq!(codes(&first), codes(&second));
}

#[tokio::test]
async fn truncation_respects_max_count() {
    let dir = AirportDirectory::new(None);
    assert_eq!(dir.list_candidates(delhi(), 2).await.len(), 2);
    assert!(dir.list_candidates(delhi(), 100).await.len() >= 10);
}

#[test]
fn fallback_catalog_holds_at_least_ten_entries() {
    assert!(FALLBACK_AIRPORTS.len() >= 10);
    assert!(FALLBACK_AIRPORTS.iter().all(|a| a.position().is_valid()));
    assert!(FALLBACK_AIRPORTS.iter().all(|a| a.runway_ft() > 0));
}

#[test]
fn airport_record_wire_shape() {
    let parsed: Airport = serde_json::from_str(
        r#"{"name": "Dabolim", "code": "GOI", "lat": 15.3808, "lon": 73.8314, "runwayFt": 11230}"#,
    )
    .unwrap();
    assert_eq!(parsed.code(), "GOI");
    assert_eq!(parsed.runway_ft(), 11230);
    assert!((parsed.position().lat() - 15.3808).abs() < 1e-9);

    let out = serde_json::to_value(&parsed).unwrap();
    assert_eq!(out["runwayFt"], 11230);
    assert_eq!(out["lat"], 15.3808);
}

#[test]
fn airport_record_defaults_runway_when_absent() {
    let parsed: Airport =
        serde_json::from_str(r#"{"name": "Strip", "code": "XXX", "lat": 1.0, "lon": 2.0}"#)
            .unwrap();
    assert_eq!(parsed.runway_ft(), 10000);
}

#[test]
fn candidate_wire_shape_carries_distance() {
    let c = CandidateAirport::new(Airport::new("Dabolim", "GOI", 15.3808, 73.8314, 11230), 42.5);
    let out = serde_json::to_value(&c).unwrap();
    assert_eq!(out["distKm"], 42.5);
    assert_eq!(out["code"], "GOI");
    assert_eq!(out["name"], "Dabolim");
}
