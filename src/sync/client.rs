use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::config;
use crate::error::LifegridError;
use crate::sync::message::{EngineMessage, SetMessage};
use crate::view::{render, Surface};
use crate::AppState;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Per-session observability counters, read by the status reporter.
#[derive(Debug, Default)]
struct SessionCounters {
    received: AtomicU64,
    last_server_send: AtomicU64,
}

impl SessionCounters {
    fn record_update(&self, send_count: u64) {
        self.received.fetch_add(1, Ordering::Relaxed);
        self.last_server_send.store(send_count, Ordering::Relaxed);
    }

    fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    fn last_server_send(&self) -> u64 {
        self.last_server_send.load(Ordering::Relaxed)
    }
}

/// Everything owned by one live connection. Dropped as a unit on `stop()`.
struct Session {
    sink: WsSink,
    counters: Arc<SessionCounters>,
    recv_task: JoinHandle<()>,
    status_task: JoinHandle<()>,
}

/// Connection lifecycle state machine and protocol endpoint.
///
/// `start()` opens the socket, sends the one-time set message with the
/// current grid snapshot, and spawns the receive loop plus the periodic
/// status reporter. `stop()` is the only way back to `Disconnected`: a
/// transport-level close or error ends the receive loop but leaves the
/// session in place until the owner tears it down.
pub struct SyncClient<S> {
    url: String,
    state: AppState<S>,
    session: Option<Session>,
}

impl<S: Surface + Send + Sync + 'static> SyncClient<S> {
    pub fn new(url: String, state: AppState<S>) -> Self {
        Self {
            url,
            state,
            session: None,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        if self.session.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Messages received since the current session connected.
    pub fn received_count(&self) -> u64 {
        self.session
            .as_ref()
            .map(|s| s.counters.received())
            .unwrap_or(0)
    }

    /// Most recent send counter reported by the engine.
    pub fn last_server_send_count(&self) -> u64 {
        self.session
            .as_ref()
            .map(|s| s.counters.last_server_send())
            .unwrap_or(0)
    }

    /// Open the connection and hand the engine the current grid as the
    /// initial simulation state. Fire and forget: the client is ready to
    /// receive updates as soon as the set message is on the wire.
    pub async fn start(&mut self) -> Result<(), LifegridError> {
        if self.session.is_some() {
            return Err(LifegridError::AlreadyConnected);
        }

        let (ws, _) = connect_async(self.url.as_str()).await?;
        let (mut sink, stream) = ws.split();

        let set_json = {
            let grid = self.state.grid.read().await;
            SetMessage::from_grid(&grid).to_json()?
        };
        sink.send(Message::Text(set_json)).await?;

        let counters = Arc::new(SessionCounters::default());
        let recv_task = tokio::spawn(recv_loop(
            stream,
            self.state.clone(),
            Arc::clone(&counters),
        ));
        let status_task = tokio::spawn(status_loop(Arc::clone(&counters)));

        self.session = Some(Session {
            sink,
            counters,
            recv_task,
            status_task,
        });

        tracing::info!("Connected to engine at {}", self.url);
        Ok(())
    }

    /// Close the connection. No message is processed after this returns.
    pub async fn stop(&mut self) -> Result<(), LifegridError> {
        let mut session = self.session.take().ok_or(LifegridError::NotConnected)?;

        // Halt processing before the close frame goes out.
        session.recv_task.abort();
        session.status_task.abort();

        if let Err(e) = session.sink.send(Message::Close(None)).await {
            tracing::debug!("Close frame not delivered: {}", e);
        }

        tracing::info!("Disconnected from engine");
        Ok(())
    }
}

/// Receive loop for one session. Messages are handled strictly in arrival
/// order; a transport close or error ends the loop without touching the
/// owning client's state.
async fn recv_loop<S: Surface + Send + Sync + 'static>(
    mut stream: WsStream,
    state: AppState<S>,
    counters: Arc<SessionCounters>,
) {
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_engine_text(&text, &state, &counters).await;
            }
            Ok(Message::Close(frame)) => {
                tracing::info!("Engine closed the connection: {:?}", frame);
                break;
            }
            Ok(_) => {
                // Ignore binary, ping and pong frames.
            }
            Err(e) => {
                tracing::warn!("WebSocket error: {}", e);
                break;
            }
        }
    }
}

/// Apply one inbound text frame. Malformed frames are logged and dropped;
/// unknown commands are a forward-compatible no-op.
async fn handle_engine_text<S: Surface>(
    text: &str,
    state: &AppState<S>,
    counters: &SessionCounters,
) {
    match EngineMessage::parse(text) {
        Ok(EngineMessage::Update(update)) => {
            let mut grid = state.grid.write().await;
            grid.replace(update.world);

            let mut surface = state.surface.write().await;
            render(&grid, &mut *surface);

            counters.record_update(update.send_count);
            tracing::debug!(
                "Applied generation {}, {} cells alive",
                update.send_count,
                grid.num_alive()
            );
        }
        Ok(EngineMessage::Other(command)) => {
            tracing::debug!("Ignoring unhandled command: {}", command);
        }
        Err(e) => {
            tracing::warn!("Unable to parse engine message: {}", e);
        }
    }
}

/// Periodic status report, observability only.
async fn status_loop(counters: Arc<SessionCounters>) {
    let mut timer = interval(Duration::from_millis(config::STATUS_INTERVAL_MS));

    loop {
        timer.tick().await;
        tracing::info!(
            "Received {} messages, server at {}",
            counters.received(),
            counters.last_server_send()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::TextSurface;

    fn state_2x2() -> AppState<TextSurface> {
        AppState::new(2, 2, TextSurface::new(2, 2)).unwrap()
    }

    #[tokio::test]
    async fn test_update_replaces_grid_and_counts() {
        let state = state_2x2();
        let counters = SessionCounters::default();

        let text = r#"{"Command":"update","World":[[true,true],[false,false]],"SendCount":7}"#;
        handle_engine_text(text, &state, &counters).await;

        let grid = state.grid.read().await;
        assert_eq!(grid.cells(), &[vec![true, true], vec![false, false]]);
        assert_eq!(counters.received(), 1);
        assert_eq!(counters.last_server_send(), 7);

        let surface = state.surface.read().await;
        assert_eq!(surface.to_text(), "##\n..");
    }

    #[tokio::test]
    async fn test_updates_accumulate_received_count() {
        let state = state_2x2();
        let counters = SessionCounters::default();

        for n in 1..=3u64 {
            let text = format!(
                r#"{{"Command":"update","World":[[false,false],[false,false]],"SendCount":{}}}"#,
                n
            );
            handle_engine_text(&text, &state, &counters).await;
        }

        assert_eq!(counters.received(), 3);
        assert_eq!(counters.last_server_send(), 3);
    }

    #[tokio::test]
    async fn test_malformed_message_leaves_state_untouched() {
        let state = state_2x2();
        let counters = SessionCounters::default();

        handle_engine_text("definitely not json", &state, &counters).await;

        let grid = state.grid.read().await;
        assert_eq!(grid.num_alive(), 0);
        assert_eq!(counters.received(), 0);
        assert_eq!(counters.last_server_send(), 0);
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let state = state_2x2();
        let counters = SessionCounters::default();

        handle_engine_text(r#"{"Command":"pause"}"#, &state, &counters).await;

        let grid = state.grid.read().await;
        assert_eq!(grid.num_alive(), 0);
        assert_eq!(counters.received(), 0);
    }

    #[tokio::test]
    async fn test_stop_while_disconnected_errors() {
        let state = state_2x2();
        let mut client = SyncClient::new("ws://localhost:1/game".into(), state);

        assert!(matches!(
            client.stop().await,
            Err(LifegridError::NotConnected)
        ));
        assert_eq!(client.connection_state(), ConnectionState::Disconnected);
    }
}
