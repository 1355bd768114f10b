use super::console_messages::{ConsoleCommand, ConsoleEvent, ErrorReply, HealthReport};
use crate::flight_control::glide::estimate_glide;
use crate::keychain::Keychain;
use crate::{error, info, log, warn};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{ReadHalf, WriteHalf};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, oneshot};

/// TCP console server speaking newline-delimited JSON.
///
/// Every connection receives the full broadcast stream from the
/// [`TelemetryMessenger`](super::TelemetryMessenger) hub, plus a direct
/// reply line for each command it sends. Dropping the endpoint closes the
/// accept loop; open connections finish on their own.
pub struct ConsoleEndpoint {
    close_oneshot_sender: Option<oneshot::Sender<()>>,
}

impl ConsoleEndpoint {
    /// Direct replies buffered per connection.
    const REPLY_CHANNEL_CAPACITY: usize = 8;

    async fn handle_connection_rx(
        reader: &mut BufReader<ReadHalf<'_>>,
        keychain: &Arc<Keychain>,
        reply_sender: &mpsc::Sender<ConsoleEvent>,
    ) -> Result<(), std::io::Error> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                return Ok(());
            }
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            let reply = match serde_json::from_str::<ConsoleCommand>(input) {
                Ok(command) => Self::execute(keychain, command).await,
                Err(e) => {
                    ConsoleEvent::Error(ErrorReply::new(format!("unreadable command: {e}")))
                }
            };
            if reply_sender.send(reply).await.is_err() {
                return Ok(());
            }
        }
    }

    async fn handle_connection_tx(
        socket: &mut WriteHalf<'_>,
        hub_receiver: &mut broadcast::Receiver<ConsoleEvent>,
        reply_receiver: &mut mpsc::Receiver<ConsoleEvent>,
    ) -> Result<(), std::io::Error> {
        loop {
            let event = tokio::select! {
                reply = reply_receiver.recv() => match reply {
                    Some(event) => event,
                    None => return Ok(()),
                },
                forwarded = hub_receiver.recv() => match forwarded {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Console connection lagging, skipped {n} events.");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => return Ok(()),
                },
            };
            match serde_json::to_vec(&event) {
                Ok(mut encoded) => {
                    encoded.push(b'\n');
                    socket.write_all(&encoded).await?;
                }
                Err(e) => warn!("Dropped unencodable console event: {e}."),
            }
        }
    }

    /// Runs one console command and builds its direct reply.
    async fn execute(keychain: &Arc<Keychain>, command: ConsoleCommand) -> ConsoleEvent {
        match command {
            ConsoleCommand::Emergency(request) => {
                let outcome = keychain
                    .emergency_controller()
                    .handle_emergency(
                        request.origin(),
                        request.altitude_ft(),
                        request.emergency_type(),
                    )
                    .await;
                match outcome {
                    Ok(plan) => ConsoleEvent::SolutionUpdate(plan),
                    Err(e) => ConsoleEvent::Error(ErrorReply::new(e.to_string())),
                }
            }
            ConsoleCommand::Glide(request) => {
                let outcome = estimate_glide(
                    request.altitude_ft(),
                    request.speed_kts(),
                    request.glide_ratio(),
                );
                match outcome {
                    Ok(estimate) => ConsoleEvent::GlideEstimate(estimate),
                    Err(e) => ConsoleEvent::Error(ErrorReply::new(e.to_string())),
                }
            }
            ConsoleCommand::Health => {
                let snapshot = keychain.simulator().snapshot().await;
                ConsoleEvent::Health(HealthReport::from_snapshot(&snapshot))
            }
        }
    }

    pub fn start(keychain: Arc<Keychain>, bind_addr: String) -> Self {
        let (close_oneshot_sender, mut close_oneshot_receiver) = oneshot::channel();
        let inst = Self { close_oneshot_sender: Some(close_oneshot_sender) };

        tokio::spawn(async move {
            let listener = match TcpListener::bind(&bind_addr).await {
                Ok(listener) => listener,
                Err(e) => {
                    error!("Cannot serve console on {bind_addr}: {e}.");
                    return;
                }
            };
            info!("Console endpoint listening on {bind_addr}.");
            loop {
                let accept = tokio::select! {
                    accept = listener.accept() => accept,
                    _ = &mut close_oneshot_receiver => break,
                };

                if let Ok((mut socket, peer)) = accept {
                    log!("Console connected from {peer}.");
                    let keychain_local = Arc::clone(&keychain);
                    let mut hub_receiver = keychain.messenger().subscribe();

                    tokio::spawn(async move {
                        let (rx_socket, mut tx_socket) = socket.split();
                        let mut reader = BufReader::new(rx_socket);
                        let (reply_sender, mut reply_receiver) =
                            mpsc::channel(Self::REPLY_CHANNEL_CAPACITY);

                        let result = tokio::select! {
                            res = Self::handle_connection_tx(&mut tx_socket, &mut hub_receiver, &mut reply_receiver) => res,
                            res = Self::handle_connection_rx(&mut reader, &keychain_local, &reply_sender) => res,
                        };

                        match result {
                            Err(e) if e.kind() == ErrorKind::UnexpectedEof
                                || e.kind() == ErrorKind::ConnectionReset
                                || e.kind() == ErrorKind::ConnectionAborted => {}
                            Err(e) => warn!("Closing console connection: {e:?}."),
                            Ok(()) => {}
                        }
                        log!("Console disconnected ({peer}).");
                        let _ = socket.shutdown().await;
                    });
                } else {
                    break;
                }
            }
            log!("Console endpoint closed.");
        });
        inst
    }
}

impl Drop for ConsoleEndpoint {
    fn drop(&mut self) {
        if let Some(sender) = self.close_oneshot_sender.take() {
            let _ = sender.send(());
        }
    }
}
