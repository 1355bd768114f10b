use super::fallback::FALLBACK_AIRPORTS;
use super::record::{Airport, CandidateAirport};
use super::store::AirportStore;
use crate::flight_control::coord::Coordinate;
use crate::{info, plan, warn};
use itertools::Itertools;
use std::sync::Arc;

/// Resolves ranked diversion candidates near a point.
///
/// The directory is stateless apart from its (optional) store handle: every
/// request re-reads the catalog, re-computes distances and re-sorts, so two
/// identical requests against an unchanged catalog always produce identical
/// rankings. There is deliberately no shuffling and no caching.
pub struct AirportDirectory {
    store: Option<Arc<dyn AirportStore>>,
}

impl AirportDirectory {
    pub fn new(store: Option<Arc<dyn AirportStore>>) -> Self { Self { store } }

    /// Returns up to `max_count` airports ordered by ascending great-circle
    /// distance from `origin`.
    ///
    /// Never fails: if the persistent store is missing, unreachable or
    /// empty, the built-in fallback catalog is ranked instead. With
    /// `max_count > 0` the result is therefore never empty.
    pub async fn list_candidates(
        &self,
        origin: Coordinate,
        max_count: usize,
    ) -> Vec<CandidateAirport> {
        let catalog = self.load_or_fallback().await;
        let ranked = catalog
            .into_iter()
            .map(|a| {
                let d = origin.distance_km(&a.position());
                CandidateAirport::new(a, d)
            })
            .sorted_by(|a, b| a.distance_km().total_cmp(&b.distance_km()))
            .take(max_count)
            .collect::<Vec<_>>();
        plan!("Nearest airports to {origin}:");
        for (i, c) in ranked.iter().enumerate() {
            plan!("  {}. {} - {:.1} km", i + 1, c.airport(), c.distance_km());
        }
        ranked
    }

    async fn load_or_fallback(&self) -> Vec<Airport> {
        let Some(store) = &self.store else {
            info!("No airport store configured. Using fallback catalog.");
            return FALLBACK_AIRPORTS.clone();
        };
        match store.load_catalog().await {
            Ok(catalog) if !catalog.is_empty() => {
                info!("Loaded {} airports from catalog store.", catalog.len());
                catalog
            }
            Ok(_) => {
                warn!("Airport store returned an empty catalog. Using fallback.");
                FALLBACK_AIRPORTS.clone()
            }
            Err(e) => {
                warn!("Airport store unavailable: {e}. Using fallback.");
                FALLBACK_AIRPORTS.clone()
            }
        }
    }
}
