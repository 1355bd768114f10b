use super::console_messages::ConsoleEvent;
use crate::flight_control::flight_state::{ArrivalNotice, FlightSnapshot};
use crate::planner::DiversionPlan;
use tokio::sync::broadcast;

/// Fan-out hub between the simulation side and however many console
/// connections happen to exist.
///
/// Publishing is fire-and-forget: sends never block and never wait on a
/// slow observer, and an event sent with no observer at all is simply
/// dropped. Lagging receivers skip ahead instead of stalling the tick.
pub struct TelemetryMessenger {
    event_sender: broadcast::Sender<ConsoleEvent>,
}

impl TelemetryMessenger {
    /// Events buffered per observer before a laggard starts losing some.
    const EVENT_CHANNEL_CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self { event_sender: broadcast::Sender::new(Self::EVENT_CHANNEL_CAPACITY) }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.event_sender.subscribe()
    }

    pub fn observer_count(&self) -> usize { self.event_sender.receiver_count() }

    pub fn send_flight_data(&self, snapshot: FlightSnapshot) {
        self.broadcast(ConsoleEvent::FlightData(snapshot));
    }

    pub fn send_arrival(&self, notice: ArrivalNotice) {
        self.broadcast(ConsoleEvent::FlightArrived(notice));
    }

    pub fn send_plan(&self, plan: DiversionPlan) {
        self.broadcast(ConsoleEvent::SolutionUpdate(plan));
    }

    fn broadcast(&self, event: ConsoleEvent) {
        // Err here only means nobody is listening right now.
        let _ = self.event_sender.send(event);
    }
}

impl Default for TelemetryMessenger {
    fn default() -> Self { Self::new() }
}
