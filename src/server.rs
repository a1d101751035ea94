//! Two-listener TCP front end. The listener that accepts a connection decides
//! whether it plays as player 1 or player 2.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;

use crate::coordinator::Coordinator;
use crate::core::common::PlayerId;
use crate::core::config::{DEFAULT_MAX_LINE_LEN, DEFAULT_P1_PORT, DEFAULT_P2_PORT};
use crate::session::PlayerSession;
use crate::transport::tcp::TcpTransport;

/// Default timeout for writing one response to a client.
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_host: String,
    pub p1_port: u16,
    pub p2_port: u16,
    /// Disconnect a player who sends nothing for this long. Off by default.
    pub idle_timeout: Option<Duration>,
    pub max_line_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            p1_port: DEFAULT_P1_PORT,
            p2_port: DEFAULT_P2_PORT,
            idle_timeout: None,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl ServerConfig {
    /// Loopback config on OS-assigned ports, for tests and simulations.
    pub fn ephemeral() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            p1_port: 0,
            p2_port: 0,
            ..Self::default()
        }
    }

    fn addr(&self, port: u16) -> String {
        format!("{}:{}", self.bind_host, port)
    }
}

pub struct Server {
    config: ServerConfig,
    p1_listener: TcpListener,
    p2_listener: TcpListener,
    coordinator: Arc<Coordinator>,
}

impl Server {
    /// Bind both listeners. Failing to bind is the only fatal server error.
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let p1_listener = TcpListener::bind(config.addr(config.p1_port))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind player 1 port {}: {}", config.p1_port, e))?;
        let p2_listener = TcpListener::bind(config.addr(config.p2_port))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind player 2 port {}: {}", config.p2_port, e))?;
        Ok(Self {
            config,
            p1_listener,
            p2_listener,
            coordinator: Arc::new(Coordinator::new()),
        })
    }

    /// Addresses actually bound for player 1 and player 2.
    pub fn local_addrs(&self) -> anyhow::Result<(SocketAddr, SocketAddr)> {
        Ok((self.p1_listener.local_addr()?, self.p2_listener.local_addr()?))
    }

    pub fn coordinator(&self) -> Arc<Coordinator> {
        self.coordinator.clone()
    }

    /// Host matches back to back, forever.
    pub async fn run(self) -> anyhow::Result<()> {
        let (p1_addr, p2_addr) = self.local_addrs()?;
        info!("Listening for player 1 on {}", p1_addr);
        info!("Listening for player 2 on {}", p2_addr);
        loop {
            let generation = self.coordinator.generation().await;

            let stream = accept(&self.p1_listener, PlayerId::One).await;
            self.spawn_session(PlayerId::One, stream).await;

            let stream = tokio::select! {
                stream = accept(&self.p2_listener, PlayerId::Two) => stream,
                _ = self.coordinator.wait_finished(generation) => {
                    info!("Match ended before player 2 connected");
                    continue;
                }
            };
            self.spawn_session(PlayerId::Two, stream).await;

            self.coordinator.wait_finished(generation).await;
        }
    }

    async fn spawn_session(&self, player: PlayerId, stream: TcpStream) {
        let transport =
            TcpTransport::with_config(stream, self.config.max_line_len, WRITE_TIMEOUT);
        let session =
            match PlayerSession::join(self.coordinator.clone(), player, Box::new(transport)).await {
                Ok(session) => session.with_idle_timeout(self.config.idle_timeout),
                Err(e) => {
                    error!("Could not seat {}: {}", player, e);
                    return;
                }
            };
        tokio::spawn(async move {
            if let Err(e) = session.run().await {
                warn!("{} session ended with an error: {}", player, e);
            }
        });
    }
}

/// Accept the next connection, logging and retrying on accept errors.
async fn accept(listener: &TcpListener, player: PlayerId) -> TcpStream {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("{} connected from {}", player, addr);
                return stream;
            }
            Err(e) => {
                error!("Accept failed for {}: {}", player, e);
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }
}
