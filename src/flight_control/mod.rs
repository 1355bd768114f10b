pub(crate) mod coord;
pub(crate) mod emergency_controller;
pub(crate) mod flight_simulator;
pub(crate) mod flight_state;
pub(crate) mod glide;


pub use emergency_controller::{EmergencyController, EmergencyError};
pub use flight_simulator::FlightSimulator;
pub use flight_state::{FlightPhase, FlightState};
