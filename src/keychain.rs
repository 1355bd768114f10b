use crate::airport::{AirportDirectory, AirportStore, JsonFileStore};
use crate::config::Config;
use crate::console_communication::TelemetryMessenger;
use crate::flight_control::{EmergencyController, FlightSimulator};
use crate::http_handler::http_client::AdvisoryClient;
use crate::planner::{Advisor, DiversionPlanner};
use std::sync::Arc;

/// Struct representing the key components of the application, providing access
/// to various subsystems such as the flight simulator, airport directory,
/// diversion planner, emergency controller, and telemetry messenger.
#[derive(Clone)]
pub struct Keychain {
    /// The telemetry messenger fanning simulation events out to consoles.
    messenger: Arc<TelemetryMessenger>,
    /// The flight simulator owning the flight state and the tick loop.
    simulator: Arc<FlightSimulator>,
    /// The airport directory resolving ranked diversion candidates.
    directory: Arc<AirportDirectory>,
    /// The planner producing diversion plans for emergencies.
    planner: Arc<DiversionPlanner>,
    /// The emergency controller orchestrating the diversion pipeline.
    emergency_controller: Arc<EmergencyController>,
}

impl Keychain {
    /// Creates a new instance of `Keychain` from the resolved configuration.
    ///
    /// # Arguments
    /// - `config`: The process configuration read from the environment.
    ///
    /// # Returns
    /// A new instance of `Keychain` containing initialized subsystems.
    pub fn new(config: &Config) -> Self {
        let messenger = Arc::new(TelemetryMessenger::new());
        let simulator = Arc::new(FlightSimulator::new(Arc::clone(&messenger)));
        let store = config
            .airport_db()
            .map(|path| Arc::new(JsonFileStore::new(path.clone())) as Arc<dyn AirportStore>);
        let directory = Arc::new(AirportDirectory::new(store));
        let advisor = config.advisory_api_key().map(|key| {
            Arc::new(AdvisoryClient::new(config.advisory_base_url(), key, config.advisory_model()))
                as Arc<dyn Advisor>
        });
        let planner = Arc::new(DiversionPlanner::new(advisor));
        let emergency_controller = Arc::new(EmergencyController::new(
            Arc::clone(&simulator),
            Arc::clone(&directory),
            Arc::clone(&planner),
            Arc::clone(&messenger),
        ));
        Self { messenger, simulator, directory, planner, emergency_controller }
    }

    /// Provides a cloned reference to the telemetry messenger.
    pub fn messenger(&self) -> Arc<TelemetryMessenger> { Arc::clone(&self.messenger) }

    /// Provides a cloned reference to the flight simulator.
    pub fn simulator(&self) -> Arc<FlightSimulator> { Arc::clone(&self.simulator) }

    /// Provides a cloned reference to the airport directory.
    pub fn directory(&self) -> Arc<AirportDirectory> { Arc::clone(&self.directory) }

    /// Provides a cloned reference to the diversion planner.
    pub fn planner(&self) -> Arc<DiversionPlanner> { Arc::clone(&self.planner) }

    /// Provides a cloned reference to the emergency controller.
    pub fn emergency_controller(&self) -> Arc<EmergencyController> {
        Arc::clone(&self.emergency_controller)
    }
}
