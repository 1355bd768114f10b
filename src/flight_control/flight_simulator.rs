use super::coord::Coordinate;
use super::flight_state::{FlightSnapshot, FlightState};
use crate::airport::Airport;
use crate::console_communication::TelemetryMessenger;
use crate::{event, info, log};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Owner of the flight state and driver of the periodic tick.
///
/// All mutation funnels through the single `RwLock`: the tick takes the
/// write lock for one `advance`, and the emergency path takes it briefly
/// for reset and commit. Broadcasting happens after the lock is dropped,
/// so no observer can ever stall a tick.
pub struct FlightSimulator {
    state: Arc<RwLock<FlightState>>,
    messenger: Arc<TelemetryMessenger>,
}

impl FlightSimulator {
    /// Region a flight spawns in when no position is configured.
    const SPAWN_LAT_RANGE: std::ops::Range<f64> = 25.0..31.0;
    const SPAWN_LON_RANGE: std::ops::Range<f64> = 75.0..83.0;

    /// Creates a simulator with a random spawn position.
    pub fn new(messenger: Arc<TelemetryMessenger>) -> Self {
        let mut rng = rand::rng();
        let spawn = Coordinate::new(
            rng.random_range(Self::SPAWN_LAT_RANGE),
            rng.random_range(Self::SPAWN_LON_RANGE),
        );
        Self::with_initial(spawn, messenger)
    }

    /// Creates a simulator at a fixed position.
    pub fn with_initial(position: Coordinate, messenger: Arc<TelemetryMessenger>) -> Self {
        info!("Flight spawned at {position}.");
        Self { state: Arc::new(RwLock::new(FlightState::new(position))), messenger }
    }

    /// Runs the tick loop until cancelled. Spawned once at startup.
    pub async fn run(&self, token: CancellationToken) {
        let mut tick_interval = tokio::time::interval(FlightState::TICK_INTERVAL);
        loop {
            tokio::select! {
                () = token.cancelled() => break,
                _ = tick_interval.tick() => self.tick().await,
            }
        }
        log!("Flight simulation loop stopped.");
    }

    /// One simulation step: advance under the write lock, publish after
    /// dropping it.
    pub async fn tick(&self) {
        let (snapshot, arrival) = {
            let mut state = self.state.write().await;
            state.advance()
        };
        event!(
            "Tick: {} | {} ft | {} kts | hdg {}° | progress {}%",
            snapshot.position(),
            snapshot.altitude_ft(),
            snapshot.airspeed_kts(),
            snapshot.heading_deg(),
            snapshot.progress_pct()
        );
        self.messenger.send_flight_data(snapshot);
        if let Some(notice) = arrival {
            info!("{}", notice.message());
            self.messenger.send_arrival(notice);
        }
    }

    /// Derives a snapshot of the current state without advancing it.
    pub async fn snapshot(&self) -> FlightSnapshot {
        self.state.read().await.snapshot()
    }

    pub(crate) async fn reset_for_emergency(&self, origin: Coordinate) {
        self.state.write().await.reset_for_emergency(origin);
        log!("Flight state reset to emergency origin {origin}.");
    }

    pub(crate) async fn commit_diversion(&self, destination: Airport) {
        self.state.write().await.commit_diversion(destination);
    }
}
