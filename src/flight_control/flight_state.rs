use super::coord::Coordinate;
use crate::airport::Airport;
use rand::Rng;
use std::time::Duration;

/// Simulation behavior the flight is currently in, derived from the
/// emergency and arrival flags.
#[derive(Debug, PartialEq, Eq, Clone, Copy, strum_macros::Display)]
pub enum FlightPhase {
    Drifting,
    EnRoute,
    Arrived,
}

/// The one mutable flight state of the process.
///
/// Mutation happens in exactly three places: [`advance`](Self::advance)
/// (the periodic tick), [`reset_for_emergency`](Self::reset_for_emergency)
/// and [`commit_diversion`](Self::commit_diversion). Observers never see
/// the fields directly, only the derived [`FlightSnapshot`].
#[derive(Debug, Clone)]
pub struct FlightState {
    current_position: Coordinate,
    target_position: Coordinate,
    flight_progress: f64,
    is_emergency_active: bool,
    emergency_destination: Option<Airport>,
    has_arrived: bool,
}

impl FlightState {
    /// Simulation step cadence.
    pub const TICK_INTERVAL: Duration = Duration::from_secs(2);
    /// Length of one full altitude/airspeed profile cycle.
    const TOTAL_FLIGHT_SECS: f64 = 60.0;
    /// Phase advance per tick; `flight_progress` wraps back to 0 past 1.
    const PROGRESS_INCREMENT: f64 =
        Self::TICK_INTERVAL.as_secs() as f64 / Self::TOTAL_FLIGHT_SECS;
    /// Cruise ground speed while steering toward a diversion target.
    const CRUISE_SPEED_KMH: f64 = 1500.0;
    /// Ground covered in one tick at cruise speed.
    const DISTANCE_PER_TICK_KM: f64 =
        Self::CRUISE_SPEED_KMH / 3600.0 * Self::TICK_INTERVAL.as_secs() as f64;
    /// Within this distance of the destination the flight counts as landed.
    const ARRIVAL_THRESHOLD_KM: f64 = 0.5;
    /// Drift jitter amplitude per tick, in degrees.
    const DRIFT_LAT_AMPLITUDE: f64 = 0.15;
    const DRIFT_LON_AMPLITUDE: f64 = 0.2;
    /// Altitude profile endpoints in feet.
    const CRUISE_ALT_FT: f64 = 35000.0;
    const FINAL_ALT_FT: f64 = 3000.0;
    /// Airspeed profile endpoints in knots.
    const MIN_AIRSPEED_KTS: f64 = 250.0;
    const CRUISE_AIRSPEED_KTS: f64 = 480.0;
    /// Progress fraction where climb-out ends and descent begins.
    const CLIMB_END: f64 = 0.1;
    const DESCENT_START: f64 = 0.7;

    pub fn new(initial: Coordinate) -> Self {
        Self {
            current_position: initial,
            target_position: initial,
            flight_progress: 0.0,
            is_emergency_active: false,
            emergency_destination: None,
            has_arrived: false,
        }
    }

    pub fn current_position(&self) -> Coordinate { self.current_position }
    pub fn target_position(&self) -> Coordinate { self.target_position }
    pub fn flight_progress(&self) -> f64 { self.flight_progress }
    pub fn is_emergency_active(&self) -> bool { self.is_emergency_active }
    pub fn has_arrived(&self) -> bool { self.has_arrived }
    pub fn emergency_destination(&self) -> Option<&Airport> {
        self.emergency_destination.as_ref()
    }

    pub fn phase(&self) -> FlightPhase {
        if self.has_arrived {
            FlightPhase::Arrived
        } else if self.is_emergency_active {
            FlightPhase::EnRoute
        } else {
            FlightPhase::Drifting
        }
    }

    /// Runs one simulation tick and returns the snapshot to broadcast,
    /// plus an arrival notice on the tick the flight first reaches its
    /// destination.
    ///
    /// While `Arrived`, the state is frozen: the same snapshot is derived
    /// again and nothing moves until a new emergency resets the flags.
    pub(crate) fn advance(&mut self) -> (FlightSnapshot, Option<ArrivalNotice>) {
        if self.has_arrived {
            return (self.snapshot(), None);
        }

        if self.is_emergency_active {
            self.steer_step();
        } else {
            self.drift_step();
        }

        let notice = self.check_arrival();
        let snapshot = self.snapshot();

        if notice.is_none() {
            self.flight_progress += Self::PROGRESS_INCREMENT;
            if self.flight_progress >= 1.0 {
                self.flight_progress = 0.0;
            }
        }
        (snapshot, notice)
    }

    /// Drift mode: small bounded random perturbation, no directed travel.
    fn drift_step(&mut self) {
        let mut rng = rand::rng();
        let jittered = Coordinate::new(
            self.current_position.lat()
                + rng.random_range(-Self::DRIFT_LAT_AMPLITUDE..Self::DRIFT_LAT_AMPLITUDE),
            self.current_position.lon()
                + rng.random_range(-Self::DRIFT_LON_AMPLITUDE..Self::DRIFT_LON_AMPLITUDE),
        );
        self.current_position = jittered.normalized();
        self.target_position = self.current_position;
    }

    /// En-route mode: move one tick's worth of ground toward the target,
    /// snapping exactly onto it once within a single step.
    fn steer_step(&mut self) {
        let distance_to_target = self.current_position.distance_km(&self.target_position);
        if distance_to_target > Self::DISTANCE_PER_TICK_KM {
            let t = Self::DISTANCE_PER_TICK_KM / distance_to_target;
            self.current_position = self.current_position.interpolate(&self.target_position, t);
        } else {
            self.current_position = self.target_position;
        }
    }

    /// Edge-triggered arrival detection. Fires at most once per committed
    /// emergency; `has_arrived` stays set until the next reset.
    fn check_arrival(&mut self) -> Option<ArrivalNotice> {
        if !self.is_emergency_active {
            return None;
        }
        let destination = self.emergency_destination.as_ref()?;
        if self.current_position.distance_km(&destination.position())
            > Self::ARRIVAL_THRESHOLD_KM
        {
            return None;
        }
        self.has_arrived = true;
        self.flight_progress = 0.0;
        Some(ArrivalNotice::new(destination.clone(), self.current_position))
    }

    /// Prepares the state for a fresh emergency: the flight teleports to
    /// the reported origin and any prior arrival is cleared. Emergency
    /// flags are untouched until [`commit_diversion`](Self::commit_diversion).
    pub(crate) fn reset_for_emergency(&mut self, origin: Coordinate) {
        self.current_position = origin;
        self.flight_progress = 0.0;
        self.has_arrived = false;
    }

    /// Installs a committed diversion target. The one place the emergency
    /// flags flip on, so a tick either sees the full commit or none of it.
    pub(crate) fn commit_diversion(&mut self, destination: Airport) {
        self.target_position = destination.position();
        self.is_emergency_active = true;
        self.emergency_destination = Some(destination);
    }

    /// Derives the observer-facing snapshot from the current state.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn snapshot(&self) -> FlightSnapshot {
        let distance_to_destination_km = if self.is_emergency_active {
            self.emergency_destination
                .as_ref()
                .map(|d| round2(self.current_position.distance_km(&d.position())))
        } else {
            None
        };
        FlightSnapshot {
            position: self.current_position,
            altitude_ft: self.profile_altitude_ft().round() as u32,
            airspeed_kts: self.profile_airspeed_kts().round() as u32,
            heading_deg: (self.current_position.bearing_degrees(&self.target_position).round()
                as u32)
                % 360,
            progress_pct: (self.flight_progress * 100.0).round() as u8,
            is_emergency: self.is_emergency_active,
            distance_to_destination_km,
            has_arrived: self.has_arrived,
        }
    }

    /// Cruise altitude until descent starts, then a linear slope down to
    /// the final approach altitude over the rest of the cycle.
    fn profile_altitude_ft(&self) -> f64 {
        let p = self.flight_progress;
        if p < Self::DESCENT_START {
            Self::CRUISE_ALT_FT
        } else {
            let descent = (p - Self::DESCENT_START) / (1.0 - Self::DESCENT_START);
            Self::CRUISE_ALT_FT - (Self::CRUISE_ALT_FT - Self::FINAL_ALT_FT) * descent
        }
    }

    /// Climb-out over the first tenth of the cycle, cruise speed through
    /// descent start, then a linear deceleration back down.
    fn profile_airspeed_kts(&self) -> f64 {
        let p = self.flight_progress;
        let span = Self::CRUISE_AIRSPEED_KTS - Self::MIN_AIRSPEED_KTS;
        if p < Self::CLIMB_END {
            Self::MIN_AIRSPEED_KTS + (p / Self::CLIMB_END) * span
        } else if p < Self::DESCENT_START {
            Self::CRUISE_AIRSPEED_KTS
        } else {
            Self::CRUISE_AIRSPEED_KTS
                - ((p - Self::DESCENT_START) / (1.0 - Self::DESCENT_START)) * span
        }
    }
}

/// Per-tick telemetry in console wire shape. The only view of the flight
/// the simulator exposes.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSnapshot {
    #[serde(flatten)]
    position: Coordinate,
    #[serde(rename = "altitude")]
    altitude_ft: u32,
    #[serde(rename = "airspeed")]
    airspeed_kts: u32,
    #[serde(rename = "heading")]
    heading_deg: u32,
    #[serde(rename = "flightProgress")]
    progress_pct: u8,
    is_emergency: bool,
    #[serde(rename = "distanceToDestination")]
    distance_to_destination_km: Option<f64>,
    has_arrived: bool,
}

impl FlightSnapshot {
    pub fn position(&self) -> Coordinate { self.position }
    pub fn altitude_ft(&self) -> u32 { self.altitude_ft }
    pub fn airspeed_kts(&self) -> u32 { self.airspeed_kts }
    pub fn heading_deg(&self) -> u32 { self.heading_deg }
    pub fn progress_pct(&self) -> u8 { self.progress_pct }
    pub fn is_emergency(&self) -> bool { self.is_emergency }
    pub fn distance_to_destination_km(&self) -> Option<f64> {
        self.distance_to_destination_km
    }
    pub fn has_arrived(&self) -> bool { self.has_arrived }
}

/// One-shot landing notification, emitted on the arrival edge.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalNotice {
    message: String,
    airport: Airport,
    final_position: Coordinate,
}

impl ArrivalNotice {
    fn new(airport: Airport, final_position: Coordinate) -> Self {
        let message = format!(
            "Flight has safely landed at {} ({})",
            airport.name(),
            airport.code()
        );
        Self { message, airport, final_position }
    }

    pub fn message(&self) -> &str { &self.message }
    pub fn airport(&self) -> &Airport { &self.airport }
    pub fn final_position(&self) -> Coordinate { self.final_position }
}

fn round2(value: f64) -> f64 { (value * 100.0).round() / 100.0 }
