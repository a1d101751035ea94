//! Serializes both connection handlers onto the single shared `Match`.
//!
//! All match reads and writes happen under one `tokio::sync::Mutex`. Responses
//! are pushed onto per-seat unbounded channels while the lock is held, so each
//! connection sees its messages in lock-acquisition order and no socket I/O
//! is ever awaited with the lock taken.

use log::{debug, info};
use tokio::sync::{mpsc, watch, Mutex};

use crate::core::common::PlayerId;
use crate::core::game::{Match, MatchResult, MatchSnapshot, Outcome};
use crate::protocol::{ErrorCode, Response};

/// Channel a session drains to write responses to its socket.
pub type Outbound = mpsc::UnboundedSender<Response>;

/// A connection's claim on a player slot for one match.
#[derive(Debug, Clone)]
pub struct Seat {
    player: PlayerId,
    generation: u64,
    outbound: Outbound,
}

impl Seat {
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Match generation this seat was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Shared {
    game: Match,
    /// Number of matches finished so far; identifies the current match.
    generation: u64,
    seats: [Option<Outbound>; 2],
}

impl Shared {
    fn deliver(&self, outcome: &Outcome) {
        for delivery in &outcome.deliveries {
            match &self.seats[delivery.to.index()] {
                Some(tx) => {
                    // A closed channel means the session is already gone.
                    let _ = tx.send(delivery.response.clone());
                }
                None => debug!("{} is not seated; dropping {}", delivery.to, delivery.response),
            }
        }
    }
}

pub struct Coordinator {
    shared: Mutex<Shared>,
    finished: watch::Sender<u64>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        let (finished, _) = watch::channel(0);
        Self {
            shared: Mutex::new(Shared {
                game: Match::new(),
                generation: 0,
                seats: [None, None],
            }),
            finished,
        }
    }

    /// Bind `outbound` to `player`'s slot in the current match.
    pub async fn seat(&self, player: PlayerId, outbound: Outbound) -> anyhow::Result<Seat> {
        let mut shared = self.shared.lock().await;
        let slot = &mut shared.seats[player.index()];
        if slot.is_some() {
            anyhow::bail!("{} seat is already taken", player);
        }
        *slot = Some(outbound.clone());
        info!("{} seated for match #{}", player, shared.generation + 1);
        Ok(Seat {
            player,
            generation: shared.generation,
            outbound,
        })
    }

    /// Run one inbound line through the match. Returns the result if this
    /// line ended the match.
    pub async fn submit(&self, seat: &Seat, line: &str) -> Option<MatchResult> {
        let mut shared = self.shared.lock().await;
        if seat.generation != shared.generation {
            debug!("{} sent {:?} after their match ended", seat.player, line);
            let _ = seat.outbound.send(Response::Error(ErrorCode::ExpectedBegin));
            return None;
        }
        let outcome = shared.game.handle(seat.player, line);
        self.settle(&mut shared, outcome)
    }

    /// Treat the seat's connection as gone: an implicit forfeit if its match
    /// is still running, otherwise nothing.
    pub async fn disconnect(&self, seat: &Seat) -> Option<MatchResult> {
        let mut shared = self.shared.lock().await;
        if seat.generation != shared.generation {
            return None;
        }
        info!("{} disconnected", seat.player);
        shared.seats[seat.player.index()] = None;
        let outcome = shared.game.abandon(seat.player);
        self.settle(&mut shared, outcome)
    }

    fn settle(&self, shared: &mut Shared, outcome: Outcome) -> Option<MatchResult> {
        shared.deliver(&outcome);
        let result = outcome.result?;
        shared.game.reset();
        shared.seats = [None, None];
        shared.generation += 1;
        self.finished.send_replace(shared.generation);
        info!("Match #{} finished; waiting for new players", shared.generation);
        Some(result)
    }

    /// Identifier of the match currently being set up or played.
    pub async fn generation(&self) -> u64 {
        self.shared.lock().await.generation
    }

    pub async fn snapshot(&self) -> MatchSnapshot {
        self.shared.lock().await.game.snapshot()
    }

    /// Resolve once the match identified by `generation` has ended.
    pub async fn wait_finished(&self, generation: u64) {
        let mut rx = self.finished.subscribe();
        while *rx.borrow_and_update() <= generation {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}
