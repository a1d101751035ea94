//! Match state machine: phase gating, turn order, and dispatch of parsed
//! commands to placement and shot resolution.

use alloc::vec::Vec;
use log::{debug, info};

use crate::core::board::Board;
use crate::core::common::PlayerId;
use crate::core::config::{valid_dimensions, NUM_SHIPS};
use crate::core::placement::{place_fleet, RawPlacement};
use crate::core::shot::resolve_shot;
use crate::protocol::{Command, CommandKind, ErrorCode, ParseError, Response};

/// Match-wide stage gating which commands are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    AwaitingSetup,
    AwaitingPlacement,
    InCombat,
    Finished,
}

impl Phase {
    /// Whether a command of `kind` may be sent in this phase.
    pub fn allows(self, kind: CommandKind) -> bool {
        match self {
            Phase::AwaitingSetup => matches!(kind, CommandKind::Begin | CommandKind::Forfeit),
            Phase::AwaitingPlacement => {
                matches!(kind, CommandKind::Initialize | CommandKind::Forfeit)
            }
            Phase::InCombat => matches!(
                kind,
                CommandKind::Shoot | CommandKind::Query | CommandKind::Forfeit
            ),
            Phase::Finished => false,
        }
    }

    /// Error code reported for a command that is illegal in this phase.
    pub fn violation(self) -> ErrorCode {
        match self {
            Phase::AwaitingSetup | Phase::Finished => ErrorCode::ExpectedBegin,
            Phase::AwaitingPlacement => ErrorCode::ExpectedInitialize,
            Phase::InCombat => ErrorCode::ExpectedCombat,
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    FleetEliminated,
    Forfeit,
    Disconnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    pub winner: PlayerId,
    pub reason: EndReason,
}

/// A response addressed to one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub to: PlayerId,
    pub response: Response,
}

/// Everything produced by one state-machine step, in send order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub deliveries: Vec<Delivery>,
    /// Set when this step ended the match.
    pub result: Option<MatchResult>,
}

impl Outcome {
    fn push(&mut self, to: PlayerId, response: Response) {
        self.deliveries.push(Delivery { to, response });
    }

    fn single(to: PlayerId, response: Response) -> Self {
        let mut out = Outcome::default();
        out.push(to, response);
        out
    }

    /// Responses addressed to `player`, in order.
    pub fn to(&self, player: PlayerId) -> Vec<&Response> {
        self.deliveries
            .iter()
            .filter(|d| d.to == player)
            .map(|d| &d.response)
            .collect()
    }
}

/// Read-only view of the match for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub phase: Phase,
    /// Turn holder; only present during combat.
    pub turn: Option<PlayerId>,
    /// `(width, height)` once player 1 has declared them.
    pub dims: Option<(usize, usize)>,
    pub joined: [bool; 2],
    pub placed: [bool; 2],
    /// Ships afloat per player, once that player has placed.
    pub ships_remaining: [Option<usize>; 2],
}

/// State of the single active match.
#[derive(Debug, Clone)]
pub struct Match {
    phase: Phase,
    dims: Option<(usize, usize)>,
    boards: [Option<Board>; 2],
    placed: [bool; 2],
    turn: PlayerId,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    pub fn new() -> Self {
        Match {
            phase: Phase::AwaitingSetup,
            dims: None,
            boards: [None, None],
            placed: [false; 2],
            turn: PlayerId::One,
        }
    }

    /// Drop both boards and return to `AwaitingSetup`.
    pub fn reset(&mut self) {
        *self = Match::new();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player allowed to shoot, during combat only.
    pub fn turn(&self) -> Option<PlayerId> {
        (self.phase == Phase::InCombat).then_some(self.turn)
    }

    pub fn dims(&self) -> Option<(usize, usize)> {
        self.dims
    }

    pub fn board(&self, player: PlayerId) -> Option<&Board> {
        self.boards[player.index()].as_ref()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            turn: self.turn(),
            dims: self.dims,
            joined: [self.boards[0].is_some(), self.boards[1].is_some()],
            placed: self.placed,
            ships_remaining: core::array::from_fn(|i| {
                self.boards[i]
                    .as_ref()
                    .filter(|_| self.placed[i])
                    .map(Board::ships_remaining)
            }),
        }
    }

    /// Parse and apply one line received from `player`.
    pub fn handle(&mut self, player: PlayerId, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(command) => self.apply(player, command),
            Err(ParseError::UnknownCommand) => self.reject(player, self.phase.violation()),
            Err(ParseError::Malformed(kind)) if !self.phase.allows(kind) => {
                self.reject(player, self.phase.violation())
            }
            Err(ParseError::Malformed(kind)) => self.reject(player, ErrorCode::malformed(kind)),
        }
    }

    /// Apply an already parsed command from `player`.
    pub fn apply(&mut self, player: PlayerId, command: Command) -> Outcome {
        if !self.phase.allows(command.kind()) {
            return self.reject(player, self.phase.violation());
        }
        match command {
            Command::Begin { dims } => self.begin(player, dims),
            Command::Initialize { placements } => self.initialize(player, &placements),
            Command::Shoot { row, col } => self.shoot(player, row, col),
            Command::Query => self.query(player),
            Command::Forfeit => self.forfeit(player),
        }
    }

    fn reject(&self, player: PlayerId, code: ErrorCode) -> Outcome {
        debug!("{} rejected in {:?}: {}", player, self.phase, code);
        Outcome::single(player, Response::Error(code))
    }

    fn begin(&mut self, player: PlayerId, dims: Option<(i64, i64)>) -> Outcome {
        if self.boards[player.index()].is_some() {
            return self.reject(player, ErrorCode::ExpectedBegin);
        }
        match (player, dims) {
            (PlayerId::One, Some((width, height))) => {
                let (Ok(width), Ok(height)) = (usize::try_from(width), usize::try_from(height))
                else {
                    return self.reject(player, ErrorCode::MalformedBegin);
                };
                if !valid_dimensions(width, height) {
                    return self.reject(player, ErrorCode::MalformedBegin);
                }
                self.dims = Some((width, height));
                self.boards[0] = Some(Board::new(width, height));
                info!("{} set the board to {}x{}", player, width, height);
            }
            (PlayerId::Two, None) => {
                let Some((width, height)) = self.dims else {
                    return self.reject(player, ErrorCode::ExpectedBegin);
                };
                self.boards[1] = Some(Board::new(width, height));
                info!("{} joined the match", player);
            }
            _ => return self.reject(player, ErrorCode::MalformedBegin),
        }
        if self.boards.iter().all(Option::is_some) {
            self.phase = Phase::AwaitingPlacement;
            info!("Both players joined; awaiting ship placement");
        }
        Outcome::single(player, Response::Ack)
    }

    fn initialize(&mut self, player: PlayerId, placements: &[RawPlacement; NUM_SHIPS]) -> Outcome {
        if self.placed[player.index()] {
            return self.reject(player, ErrorCode::ExpectedInitialize);
        }
        let (Some((width, height)), Some(slot)) =
            (self.dims, self.boards[player.index()].as_mut())
        else {
            return self.reject(player, ErrorCode::ExpectedBegin);
        };
        // Each `I` starts from an empty board. Pieces committed by a failed
        // `I` stay until the player's next attempt.
        *slot = Board::new(width, height);
        if let Err((piece, err)) = place_fleet(slot, player, placements) {
            debug!("{} piece {} rejected: {}", player, piece + 1, err);
            return self.reject(player, err.into());
        }
        if !slot.is_fleet_complete() {
            return self.reject(player, ErrorCode::MalformedInitialize);
        }
        self.placed[player.index()] = true;
        info!("{} placed their fleet", player);
        if self.placed.iter().all(|&p| p) {
            self.phase = Phase::InCombat;
            self.turn = PlayerId::One;
            info!("Both fleets placed; {} shoots first", self.turn);
        }
        Outcome::single(player, Response::Ack)
    }

    fn shoot(&mut self, player: PlayerId, row: i64, col: i64) -> Outcome {
        if self.turn != player {
            return self.reject(player, ErrorCode::NotYourTurn);
        }
        let opponent = player.opponent();
        let Some(board) = self.boards[opponent.index()].as_mut() else {
            return self.reject(player, self.phase.violation());
        };
        let report = match resolve_shot(board, row, col) {
            Ok(report) => report,
            Err(err) => return self.reject(player, err.into()),
        };
        debug!(
            "{} fired at ({}, {}): {:?}, {} ships left",
            player, row, col, report.outcome, report.ships_remaining
        );
        let mut out = Outcome::single(
            player,
            Response::ShotResult {
                ships_remaining: report.ships_remaining,
                outcome: report.outcome,
            },
        );
        if let Some(ship) = report.sunk {
            info!("{} sank ship {} of {}", player, ship + 1, opponent);
        }
        if report.fleet_eliminated() {
            self.finish(&mut out, player, EndReason::FleetEliminated);
        } else {
            self.turn = opponent;
        }
        out
    }

    fn query(&self, player: PlayerId) -> Outcome {
        let Some(board) = self.boards[player.opponent().index()].as_ref() else {
            return self.reject(player, self.phase.violation());
        };
        Outcome::single(
            player,
            Response::QueryResult {
                ships_remaining: board.ships_remaining(),
                shots: board.guesses().collect(),
            },
        )
    }

    /// `player` concedes; legal in every phase except `Finished`.
    pub fn forfeit(&mut self, player: PlayerId) -> Outcome {
        if self.phase == Phase::Finished {
            return self.reject(player, ErrorCode::ExpectedBegin);
        }
        let mut out = Outcome::default();
        self.finish(&mut out, player.opponent(), EndReason::Forfeit);
        out
    }

    /// `player` disconnected. The opponent wins; nothing is sent to `player`.
    pub fn abandon(&mut self, player: PlayerId) -> Outcome {
        let mut out = Outcome::default();
        if self.phase != Phase::Finished {
            self.finish(&mut out, player.opponent(), EndReason::Disconnect);
        }
        out
    }

    fn finish(&mut self, out: &mut Outcome, winner: PlayerId, reason: EndReason) {
        let loser = winner.opponent();
        match reason {
            EndReason::FleetEliminated => {
                out.push(winner, Response::Halt { won: true });
                out.push(loser, Response::Halt { won: false });
            }
            EndReason::Forfeit => {
                out.push(loser, Response::Halt { won: false });
                out.push(winner, Response::Halt { won: true });
            }
            EndReason::Disconnect => out.push(winner, Response::Halt { won: true }),
        }
        info!("Match over: {} wins ({:?})", winner, reason);
        self.phase = Phase::Finished;
        out.result = Some(MatchResult { winner, reason });
    }
}
