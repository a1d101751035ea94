use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use crate::coordinator::{Coordinator, Seat};
use crate::core::common::PlayerId;
use crate::protocol::Response;
use crate::transport::Transport;

enum Event {
    Outbound(Response),
    Inbound(anyhow::Result<Option<String>>),
    IdleTimeout,
}

/// One connected player: forwards inbound lines to the coordinator and
/// writes whatever the coordinator queues for this seat.
pub struct PlayerSession {
    seat: Seat,
    outbound: mpsc::UnboundedReceiver<Response>,
    transport: Box<dyn Transport>,
    coordinator: Arc<Coordinator>,
    idle_timeout: Option<Duration>,
}

impl PlayerSession {
    pub fn new(
        seat: Seat,
        outbound: mpsc::UnboundedReceiver<Response>,
        transport: Box<dyn Transport>,
        coordinator: Arc<Coordinator>,
    ) -> Self {
        Self {
            seat,
            outbound,
            transport,
            coordinator,
            idle_timeout: None,
        }
    }

    /// Treat `idle` without any inbound line as a disconnect.
    pub fn with_idle_timeout(mut self, idle: Option<Duration>) -> Self {
        self.idle_timeout = idle;
        self
    }

    /// Seat `player` on `coordinator` and build its session around `transport`.
    pub async fn join(
        coordinator: Arc<Coordinator>,
        player: PlayerId,
        transport: Box<dyn Transport>,
    ) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let seat = coordinator.seat(player, tx).await?;
        Ok(Self::new(seat, rx, transport, coordinator))
    }

    pub fn seat(&self) -> &Seat {
        &self.seat
    }

    /// Serve the connection until the peer goes away.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let player = self.seat.player();
        loop {
            let event = {
                let recv = self.transport.recv();
                let idle = self.idle_timeout;
                tokio::select! {
                    biased;
                    Some(response) = self.outbound.recv() => Event::Outbound(response),
                    line = async {
                        match idle {
                            Some(limit) => timeout(limit, recv).await.ok(),
                            None => Some(recv.await),
                        }
                    } => match line {
                        Some(line) => Event::Inbound(line),
                        None => Event::IdleTimeout,
                    },
                }
            };

            match event {
                Event::Outbound(response) => {
                    let line = response.to_string();
                    debug!("-> {}: {}", player, line);
                    if let Err(e) = self.transport.send(&line).await {
                        warn!("{} write failed: {}", player, e);
                        self.coordinator.disconnect(&self.seat).await;
                        return Err(e);
                    }
                }
                Event::Inbound(Ok(Some(line))) => {
                    debug!("<- {}: {}", player, line);
                    self.coordinator.submit(&self.seat, &line).await;
                }
                Event::Inbound(Ok(None)) => {
                    info!("{} closed the connection", player);
                    self.coordinator.disconnect(&self.seat).await;
                    return Ok(());
                }
                Event::Inbound(Err(e)) => {
                    warn!("{} read failed: {}", player, e);
                    self.coordinator.disconnect(&self.seat).await;
                    return Err(e);
                }
                Event::IdleTimeout => {
                    warn!("{} idle for {:?}; treating as disconnected", player, self.idle_timeout);
                    self.coordinator.disconnect(&self.seat).await;
                    return Ok(());
                }
            }
        }
    }
}
