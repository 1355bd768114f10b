#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod airport;
mod config;
mod console_communication;
mod flight_control;
mod http_handler;
mod keychain;
mod logger;
mod planner;

use crate::config::Config;
use crate::console_communication::ConsoleEndpoint;
use crate::keychain::Keychain;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let config = Config::from_env();
    let keychain = Arc::new(Keychain::new(&config));
    if keychain.planner().has_advisor() {
        info!("Advisory tier enabled, model {}.", config.advisory_model());
    } else {
        warn!("No advisory credential configured. Diversions will use the fallback tier.");
    }

    let console_endpoint =
        ConsoleEndpoint::start(Arc::clone(&keychain), config.console_bind().to_string());

    let shutdown_token = CancellationToken::new();
    let simulator = keychain.simulator();
    let simulator_token = shutdown_token.clone();
    let simulation = tokio::spawn(async move { simulator.run(simulator_token).await });

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for shutdown signal: {e}.");
    }
    info!("Shutdown requested.");
    shutdown_token.cancel();
    let _ = simulation.await;
    drop(console_endpoint);
    log!("Flight backend stopped.");
}
