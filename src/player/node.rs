use log::{debug, info};
use rand::rngs::SmallRng;
use tokio::time::{sleep, Duration};

use crate::core::common::{Cell, PlayerId};
use crate::player::{Player, ShotRecord};
use crate::protocol::{Command, ErrorCode, Response};
use crate::transport::Transport;

/// Default pause before re-sending a command the server was not ready for.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// How one client's match went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MatchReport {
    pub seat: PlayerId,
    pub won: bool,
    /// Shots the server resolved for us.
    pub shots: usize,
}

/// Plays one seat of a match against a server: declares or joins the board,
/// submits a fleet, then fires until a halt arrives.
///
/// The protocol never announces whose turn it is, so the node polls: commands
/// answered with "not ready" or "not your turn" errors are retried after a
/// short delay.
pub struct ClientNode {
    seat: PlayerId,
    player: Box<dyn Player>,
    transport: Box<dyn Transport>,
    dims: (usize, usize),
    retry_delay: Duration,
    shots: usize,
}

impl ClientNode {
    /// `dims` is `(width, height)`. Player 1 declares it; player 2 must be
    /// told out of band since `B` carries no dimensions back.
    pub fn new(
        seat: PlayerId,
        player: Box<dyn Player>,
        transport: Box<dyn Transport>,
        dims: (usize, usize),
    ) -> Self {
        Self {
            seat,
            player,
            transport,
            dims,
            retry_delay: DEFAULT_RETRY_DELAY,
            shots: 0,
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    async fn next_response(&mut self) -> anyhow::Result<Response> {
        let line = self
            .transport
            .recv()
            .await?
            .ok_or_else(|| anyhow::anyhow!("Server closed the connection"))?;
        Response::parse(&line).ok_or_else(|| anyhow::anyhow!("Unexpected server line: {:?}", line))
    }

    /// Send `command` and return the first response that follows it.
    pub async fn request(&mut self, command: &Command) -> anyhow::Result<Response> {
        let line = command.to_string();
        debug!("{} sends {}", self.seat, line);
        self.transport.send(&line).await?;
        self.next_response().await
    }

    /// Ask the server for our record of shots against the opponent.
    pub async fn query(&mut self) -> anyhow::Result<Response> {
        self.request(&Command::Query).await
    }

    fn report(&self, won: bool) -> MatchReport {
        MatchReport {
            seat: self.seat,
            won,
            shots: self.shots,
        }
    }

    /// Send `command` until it is acknowledged. `Err(report)` means the match
    /// ended while waiting.
    async fn until_ack(
        &mut self,
        command: &Command,
        retry_on: &[ErrorCode],
    ) -> anyhow::Result<Result<(), MatchReport>> {
        loop {
            match self.request(command).await? {
                Response::Ack => return Ok(Ok(())),
                Response::Halt { won } => return Ok(Err(self.report(won))),
                Response::Error(code) if retry_on.contains(&code) => sleep(self.retry_delay).await,
                other => anyhow::bail!("{} rejected {}: {}", self.seat, command, other),
            }
        }
    }

    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<MatchReport> {
        let (width, height) = self.dims;

        let begin = match self.seat {
            PlayerId::One => Command::Begin {
                dims: Some((width as i64, height as i64)),
            },
            PlayerId::Two => Command::Begin { dims: None },
        };
        if let Err(report) = self.until_ack(&begin, &[ErrorCode::ExpectedBegin]).await? {
            return Ok(report);
        }

        let fleet = self.player.fleet(rng, width, height)?;
        let initialize = Command::Initialize {
            placements: fleet.map(|p| p.raw()),
        };
        if let Err(report) = self.until_ack(&initialize, &[ErrorCode::ExpectedBegin]).await? {
            return Ok(report);
        }
        info!("{} fleet accepted", self.seat);

        let mut record = ShotRecord::new(width, height);
        loop {
            let target: Cell = self.player.select_target(rng, &record);
            let shot = Command::Shoot {
                row: target.row as i64,
                col: target.col as i64,
            };
            match self.request(&shot).await? {
                Response::ShotResult {
                    ships_remaining,
                    outcome,
                } => {
                    self.shots += 1;
                    record.record(target, outcome);
                    self.player.handle_shot_result(target, outcome, ships_remaining);
                    if ships_remaining == 0 {
                        return match self.next_response().await? {
                            Response::Halt { won } => Ok(self.report(won)),
                            other => anyhow::bail!("Expected a halt, got {}", other),
                        };
                    }
                }
                Response::Halt { won } => return Ok(self.report(won)),
                Response::Error(ErrorCode::NotYourTurn | ErrorCode::ExpectedInitialize) => {
                    sleep(self.retry_delay).await
                }
                other => anyhow::bail!("{} shot at {:?} rejected: {}", self.seat, target, other),
            }
        }
    }
}
