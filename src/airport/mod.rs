mod directory;
mod fallback;
mod record;
mod store;

#[cfg(test)]
mod tests;

pub use directory::AirportDirectory;
pub use fallback::FALLBACK_AIRPORTS;
pub use record::{Airport, CandidateAirport};
pub use store::{AirportStore, JsonFileStore, StoreError};
