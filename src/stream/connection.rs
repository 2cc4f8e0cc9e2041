//! Connection manager for the live waveform stream.
//!
//! Owns the device socket and the reconnect timer. The manager keeps a
//! best-effort connection to the streaming endpoint and feeds every valid
//! sample frame into the shared buffer; the live view stays available
//! across device restarts because closed or failed connections are retried
//! forever at a fixed delay.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::config::MonitorConfig;
use crate::monitor::buffer::{SampleBuffer, WaveformSnapshot};
use crate::stream::frame::StreamFrame;

/// Delay between a closure (or failed attempt) and the next connection
/// attempt. Fixed, no backoff.
pub const RETRY_DELAY: Duration = Duration::from_millis(3000);

/// Lifecycle of the single streaming connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Subsystem constructed, no attempt made yet.
    Idle,
    /// A connection attempt is in flight.
    Connecting,
    /// Socket open, handshake sent, sample frames flowing.
    Open,
    /// Socket lost or attempt failed; a retry is pending unless torn down.
    Closed,
}

impl ConnectionState {
    /// True while sample frames are flowing.
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }
}

/// Transport-level failures inside the worker. Every variant is transient:
/// the worker logs it and falls back to the retry schedule.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("websocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("frame serialization error: {0}")]
    Frame(#[from] serde_json::Error),
}

/// A socket happening, as consumed by the state machine. The async loop
/// only translates I/O into these; all observable behavior lives in
/// [`ConnectionManager::apply`].
#[derive(Debug)]
pub(crate) enum SocketEvent {
    /// Connection established, handshake delivered.
    Opened,
    /// One inbound text message.
    Frame(String),
    /// Transport failure.
    Error(String),
    /// Remote close or end of stream.
    Closed,
}

type DeviceSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct ConnectionManager {
    config: MonitorConfig,
    buffer: Arc<Mutex<SampleBuffer>>,
    state_tx: watch::Sender<ConnectionState>,
}

impl ConnectionManager {
    fn transition(&self, next: ConnectionState) {
        if *self.state_tx.borrow() != next {
            debug!("connection state -> {:?}", next);
            let _ = self.state_tx.send(next);
        }
    }

    /// The single transition function of the state machine.
    fn apply(&self, event: SocketEvent) {
        match event {
            SocketEvent::Opened => {
                info!("stream connected to {}", self.config.endpoint);
                self.transition(ConnectionState::Open);
            }
            SocketEvent::Frame(text) => self.on_frame(&text),
            SocketEvent::Error(reason) => {
                warn!("stream transport error: {}", reason);
                self.transition(ConnectionState::Closed);
            }
            SocketEvent::Closed => {
                info!("stream disconnected");
                self.transition(ConnectionState::Closed);
            }
        }
    }

    /// Per-frame contract: parse, discard anything that is not a valid
    /// sample frame, append the value and refresh the heart rate.
    fn on_frame(&self, text: &str) {
        match StreamFrame::parse(text) {
            Ok(StreamFrame::Stream { value, hr }) => {
                if let Ok(mut buffer) = self.buffer.lock() {
                    buffer.append(value);
                    buffer.set_heart_rate(hr);
                }
            }
            Ok(other) => debug!("ignoring unexpected inbound frame: {:?}", other),
            Err(e) => warn!("discarding unparseable frame: {}", e),
        }
    }

    /// Connect/serve/retry until teardown. The retry timer is the single
    /// `sleep` below: at most one pending reconnect at any time, cancelled
    /// by the shutdown signal.
    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }
            self.transition(ConnectionState::Connecting);
            let attempt = tokio::select! {
                _ = shutdown.changed() => break,
                attempt = connect_async(self.config.endpoint.as_str()) => attempt,
            };
            match attempt {
                Ok((socket, _)) => {
                    if let Err(e) = self.serve(socket, &mut shutdown).await {
                        self.apply(SocketEvent::Error(e.to_string()));
                    }
                }
                Err(e) => self.apply(SocketEvent::Error(e.to_string())),
            }
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = sleep(RETRY_DELAY) => {}
            }
        }
        self.transition(ConnectionState::Closed);
    }

    /// Drive one live connection: handshake once, then pump frames until
    /// the socket drops or teardown is requested.
    async fn serve(
        &self,
        socket: DeviceSocket,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<(), StreamError> {
        let (mut sink, mut stream) = socket.split();

        self.apply(SocketEvent::Opened);
        let handshake = StreamFrame::connect(self.config.patient_id.clone()).to_json()?;
        sink.send(Message::Text(handshake)).await?;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    // Close requested by teardown; this closure must not
                    // feed the retry schedule.
                    let _ = sink.close().await;
                    return Ok(());
                }
                inbound = stream.next() => match inbound {
                    Some(Ok(Message::Text(text))) => self.apply(SocketEvent::Frame(text)),
                    Some(Ok(Message::Close(_))) | None => {
                        self.apply(SocketEvent::Closed);
                        return Ok(());
                    }
                    // Binary, ping and pong frames carry no samples.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
        }
    }
}

/// Handle to the live waveform subsystem.
///
/// Owns the shared sample buffer and the background connection worker. The
/// socket and retry timer stay private to the worker; embedders interact
/// only through this handle.
pub struct LiveMonitor {
    buffer: Arc<Mutex<SampleBuffer>>,
    state_rx: watch::Receiver<ConnectionState>,
    shutdown_tx: watch::Sender<bool>,
    worker: Option<JoinHandle<()>>,
}

impl LiveMonitor {
    /// Start the subsystem: spawn the connection worker and begin the
    /// connect/retry cycle against the configured endpoint. Must be called
    /// from within a tokio runtime.
    pub fn connect(config: MonitorConfig) -> Self {
        let buffer = Arc::new(Mutex::new(SampleBuffer::new()));
        let (state_tx, state_rx) = watch::channel(ConnectionState::Idle);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let manager = ConnectionManager {
            config,
            buffer: buffer.clone(),
            state_tx,
        };
        let worker = tokio::spawn(manager.run(shutdown_rx));
        Self {
            buffer,
            state_rx,
            shutdown_tx,
            worker: Some(worker),
        }
    }

    /// Clone out the current waveform window and heart rate. Safe to call
    /// at any cadence; a torn-down monitor yields the empty snapshot.
    pub fn snapshot(&self) -> WaveformSnapshot {
        self.buffer
            .lock()
            .map(|buffer| buffer.snapshot())
            .unwrap_or_default()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// True while the stream is open (the UI's Live/Offline indicator).
    pub fn is_live(&self) -> bool {
        self.state().is_open()
    }

    /// Watchable state channel for observers that await transitions.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Tear the subsystem down: cancel any pending retry, close a live
    /// socket, wait for the worker to stop, and reset the buffer.
    /// Idempotent; after return no further transitions occur and the state
    /// reads `Closed`.
    pub async fn teardown(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

impl Drop for LiveMonitor {
    fn drop(&mut self) {
        // A dropped view must not leave a reconnect loop running.
        let _ = self.shutdown_tx.send(true);
    }
}
