//! Components for talking to attached consoles over TCP.
//! The `console_messages` module defines the newline-delimited JSON wire
//! types, `telemetry_messenger` fans simulation events out to observers,
//! and `console_endpoint` serves connections and dispatches commands.

pub(crate) mod console_endpoint;
pub(crate) mod console_messages;
pub(crate) mod telemetry_messenger;

#[cfg(test)]
mod tests;

pub use console_endpoint::ConsoleEndpoint;
pub use telemetry_messenger::TelemetryMessenger;
