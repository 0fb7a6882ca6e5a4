//! WebSocket connection to the MUD server.
//!
//! One background task owns the socket. Inbound text frames are forwarded
//! to the UI inbox as [`ConnectionEvent::Payload`]; outbound commands come
//! in through an unbounded channel held by [`ConnectionHandle`]. Dropping
//! the handle closes the socket.

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use mudview_core::{CommandSink, Framing};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};
use url::Url;

use super::inbox::UiEventSender;
use crate::events::{ConnectionEvent, UiEvent};

/// Outbound side of the connection.
#[derive(Debug)]
pub struct ConnectionHandle {
    outbound: mpsc::UnboundedSender<String>,
    framing: Framing,
}

impl CommandSink for ConnectionHandle {
    fn send(&mut self, command: &str) -> Result<()> {
        self.outbound
            .send(self.framing.encode(command))
            .context("Connection is closed")
    }
}

/// Starts the connection task. Must be called inside a tokio runtime.
pub fn spawn(url: Url, framing: Framing, inbox: UiEventSender) -> ConnectionHandle {
    let (outbound, outbound_rx) = mpsc::unbounded_channel();
    tokio::spawn(run(url, outbound_rx, inbox));
    ConnectionHandle { outbound, framing }
}

fn emit(inbox: &UiEventSender, event: ConnectionEvent) {
    // The UI may already be gone during shutdown.
    let _ = inbox.send(UiEvent::Connection(event));
}

async fn run(url: Url, mut outbound: mpsc::UnboundedReceiver<String>, inbox: UiEventSender) {
    info!(%url, "Connecting");
    let ws = match connect_async(url.as_str()).await {
        Ok((ws, _response)) => ws,
        Err(err) => {
            warn!(%url, error = %err, "Connection failed");
            emit(&inbox, ConnectionEvent::Failed {
                error: err.to_string(),
            });
            return;
        }
    };
    emit(&inbox, ConnectionEvent::Connected);

    let (mut sink, mut stream) = ws.split();
    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    emit(&inbox, ConnectionEvent::Payload(text.as_str().to_string()));
                }
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => emit(&inbox, ConnectionEvent::Payload(text)),
                    Err(err) => debug!(error = %err, "Dropping non-UTF-8 binary frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.as_str().to_string())
                        .filter(|r| !r.is_empty());
                    info!(?reason, "Server closed the connection");
                    emit(&inbox, ConnectionEvent::Closed { reason });
                    break;
                }
                // Ping/pong are answered by tungstenite.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(error = %err, "Read failed");
                    emit(&inbox, ConnectionEvent::Failed { error: err.to_string() });
                    break;
                }
                None => {
                    emit(&inbox, ConnectionEvent::Closed { reason: None });
                    break;
                }
            },
            command = outbound.recv() => match command {
                Some(text) => {
                    debug!(bytes = text.len(), "Sending command");
                    if let Err(err) = sink.send(Message::Text(text.into())).await {
                        warn!(error = %err, "Write failed");
                        emit(&inbox, ConnectionEvent::Failed { error: err.to_string() });
                        break;
                    }
                }
                None => {
                    debug!("Handle dropped; closing socket");
                    let _ = sink.close().await;
                    break;
                }
            },
        }
    }
}
