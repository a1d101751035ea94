//! Line-oriented text protocol: client commands, server responses and the
//! numeric error codes carried by `E` responses.

use alloc::vec::Vec;
use core::fmt;

use crate::core::common::{Cell, PlacementError, ShotError, ShotOutcome};
use crate::core::config::NUM_SHIPS;
use crate::core::placement::RawPlacement;

/// Integer fields carried by one `I` command.
pub const INITIALIZE_FIELDS: usize = NUM_SHIPS * 4;

/// The command a line names, independent of whether its fields parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    Begin,
    Initialize,
    Shoot,
    Query,
    Forfeit,
}

impl CommandKind {
    pub fn token(self) -> &'static str {
        match self {
            CommandKind::Begin => "B",
            CommandKind::Initialize => "I",
            CommandKind::Shoot => "S",
            CommandKind::Query => "Q",
            CommandKind::Forfeit => "F",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "B" => Some(CommandKind::Begin),
            "I" => Some(CommandKind::Initialize),
            "S" => Some(CommandKind::Shoot),
            "Q" => Some(CommandKind::Query),
            "F" => Some(CommandKind::Forfeit),
            _ => None,
        }
    }
}

/// A client request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// `B <width> <height>` from player 1, bare `B` from player 2.
    Begin { dims: Option<(i64, i64)> },
    /// `I` followed by five `<kind> <rotation> <col> <row>` groups.
    Initialize { placements: [RawPlacement; NUM_SHIPS] },
    /// `S <row> <col>`.
    Shoot { row: i64, col: i64 },
    Query,
    Forfeit,
}

/// Why a line could not be turned into a `Command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Empty line or unrecognised first token.
    UnknownCommand,
    /// Known command with the wrong number or type of fields.
    Malformed(CommandKind),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand => write!(f, "unknown command"),
            ParseError::Malformed(kind) => write!(f, "malformed {} command", kind.token()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Begin { .. } => CommandKind::Begin,
            Command::Initialize { .. } => CommandKind::Initialize,
            Command::Shoot { .. } => CommandKind::Shoot,
            Command::Query => CommandKind::Query,
            Command::Forfeit => CommandKind::Forfeit,
        }
    }

    /// Parse one line (without its newline). Surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let mut tokens = line.split_whitespace();
        let kind = tokens
            .next()
            .and_then(CommandKind::from_token)
            .ok_or(ParseError::UnknownCommand)?;

        match kind {
            CommandKind::Query => return Ok(Command::Query),
            CommandKind::Forfeit => return Ok(Command::Forfeit),
            _ => {}
        }

        let fields: Vec<i64> = tokens
            .map(str::parse::<i64>)
            .collect::<Result<_, _>>()
            .map_err(|_| ParseError::Malformed(kind))?;

        match (kind, fields.as_slice()) {
            (CommandKind::Begin, []) => Ok(Command::Begin { dims: None }),
            (CommandKind::Begin, &[width, height]) => Ok(Command::Begin {
                dims: Some((width, height)),
            }),
            (CommandKind::Initialize, f) if f.len() == INITIALIZE_FIELDS => {
                let mut placements = [RawPlacement {
                    kind: 0,
                    rotation: 0,
                    col: 0,
                    row: 0,
                }; NUM_SHIPS];
                for (slot, group) in placements.iter_mut().zip(f.chunks_exact(4)) {
                    *slot = RawPlacement {
                        kind: group[0],
                        rotation: group[1],
                        col: group[2],
                        row: group[3],
                    };
                }
                Ok(Command::Initialize { placements })
            }
            (CommandKind::Shoot, &[row, col]) => Ok(Command::Shoot { row, col }),
            _ => Err(ParseError::Malformed(kind)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Begin { dims: None } => write!(f, "B"),
            Command::Begin {
                dims: Some((width, height)),
            } => write!(f, "B {} {}", width, height),
            Command::Initialize { placements } => {
                write!(f, "I")?;
                for p in placements {
                    write!(f, " {} {} {} {}", p.kind, p.rotation, p.col, p.row)?;
                }
                Ok(())
            }
            Command::Shoot { row, col } => write!(f, "S {} {}", row, col),
            Command::Query => write!(f, "Q"),
            Command::Forfeit => write!(f, "F"),
        }
    }
}

/// Numeric error codes sent as `E <code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// Phase violation while waiting for `B` (also sent once a match is over).
    ExpectedBegin,
    /// Phase violation while waiting for `I`.
    ExpectedInitialize,
    /// Phase violation during combat.
    ExpectedCombat,
    /// Shot from the player who does not hold the turn.
    NotYourTurn,
    MalformedBegin,
    MalformedInitialize,
    MalformedShoot,
    InvalidShape,
    InvalidRotation,
    PlacementOutOfBounds,
    PlacementOverlap,
    ShotOutOfBounds,
    AlreadyGuessed,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::ExpectedBegin,
        ErrorCode::ExpectedInitialize,
        ErrorCode::ExpectedCombat,
        ErrorCode::NotYourTurn,
        ErrorCode::MalformedBegin,
        ErrorCode::MalformedInitialize,
        ErrorCode::MalformedShoot,
        ErrorCode::InvalidShape,
        ErrorCode::InvalidRotation,
        ErrorCode::PlacementOutOfBounds,
        ErrorCode::PlacementOverlap,
        ErrorCode::ShotOutOfBounds,
        ErrorCode::AlreadyGuessed,
    ];

    pub fn code(self) -> u16 {
        match self {
            ErrorCode::ExpectedBegin => 100,
            ErrorCode::ExpectedInitialize => 101,
            ErrorCode::ExpectedCombat => 102,
            ErrorCode::NotYourTurn => 103,
            ErrorCode::MalformedBegin => 200,
            ErrorCode::MalformedInitialize => 201,
            ErrorCode::MalformedShoot => 202,
            ErrorCode::InvalidShape => 300,
            ErrorCode::InvalidRotation => 301,
            ErrorCode::PlacementOutOfBounds => 302,
            ErrorCode::PlacementOverlap => 303,
            ErrorCode::ShotOutOfBounds => 400,
            ErrorCode::AlreadyGuessed => 401,
        }
    }

    pub fn from_code(code: u16) -> Option<ErrorCode> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    /// Code reported for a malformed command of `kind`.
    pub fn malformed(kind: CommandKind) -> ErrorCode {
        match kind {
            CommandKind::Begin => ErrorCode::MalformedBegin,
            CommandKind::Initialize => ErrorCode::MalformedInitialize,
            // Q and F take no fields and never fail to parse.
            CommandKind::Shoot | CommandKind::Query | CommandKind::Forfeit => {
                ErrorCode::MalformedShoot
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorCode::ExpectedBegin => "expected a begin packet",
            ErrorCode::ExpectedInitialize => "expected an initialize packet",
            ErrorCode::ExpectedCombat => "expected a shoot, query or forfeit packet",
            ErrorCode::NotYourTurn => "not your turn",
            ErrorCode::MalformedBegin => "invalid begin parameters",
            ErrorCode::MalformedInitialize => "invalid initialize parameters",
            ErrorCode::MalformedShoot => "invalid shoot parameters",
            ErrorCode::InvalidShape => "piece kind out of range",
            ErrorCode::InvalidRotation => "rotation out of range",
            ErrorCode::PlacementOutOfBounds => "piece does not fit on the board",
            ErrorCode::PlacementOverlap => "piece overlaps another ship",
            ErrorCode::ShotOutOfBounds => "shot outside the board",
            ErrorCode::AlreadyGuessed => "cell already guessed",
        };
        write!(f, "{} ({})", text, self.code())
    }
}

impl From<PlacementError> for ErrorCode {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::InvalidShape => ErrorCode::InvalidShape,
            PlacementError::InvalidRotation => ErrorCode::InvalidRotation,
            PlacementError::OutOfBounds => ErrorCode::PlacementOutOfBounds,
            PlacementError::Overlap => ErrorCode::PlacementOverlap,
        }
    }
}

impl From<ShotError> for ErrorCode {
    fn from(err: ShotError) -> Self {
        match err {
            ShotError::OutOfBounds => ErrorCode::ShotOutOfBounds,
            ShotError::AlreadyGuessed => ErrorCode::AlreadyGuessed,
        }
    }
}

/// A server response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Response {
    /// `A`
    Ack,
    /// `E <code>`
    Error(ErrorCode),
    /// `R <ships_remaining> <H|M>`
    ShotResult {
        ships_remaining: usize,
        outcome: ShotOutcome,
    },
    /// `G <ships_remaining> [H|M <row> <col>]*`, cells in row-major order.
    QueryResult {
        ships_remaining: usize,
        shots: Vec<(ShotOutcome, Cell)>,
    },
    /// `H 1` to the winner, `H 0` to the loser.
    Halt { won: bool },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ack => write!(f, "A"),
            Response::Error(code) => write!(f, "E {}", code.code()),
            Response::ShotResult {
                ships_remaining,
                outcome,
            } => write!(f, "R {} {}", ships_remaining, outcome.symbol()),
            Response::QueryResult {
                ships_remaining,
                shots,
            } => {
                write!(f, "G {}", ships_remaining)?;
                for (outcome, cell) in shots {
                    write!(f, " {} {} {}", outcome.symbol(), cell.row, cell.col)?;
                }
                Ok(())
            }
            Response::Halt { won } => write!(f, "H {}", u8::from(*won)),
        }
    }
}

fn parse_outcome(token: &str) -> Option<ShotOutcome> {
    match token {
        "H" => Some(ShotOutcome::Hit),
        "M" => Some(ShotOutcome::Miss),
        _ => None,
    }
}

impl Response {
    /// Parse a server line; `None` if it is not a well-formed response.
    pub fn parse(line: &str) -> Option<Response> {
        let mut tokens = line.split_whitespace();
        let head = tokens.next()?;
        let response = match head {
            "A" => Response::Ack,
            "E" => Response::Error(ErrorCode::from_code(tokens.next()?.parse().ok()?)?),
            "R" => Response::ShotResult {
                ships_remaining: tokens.next()?.parse().ok()?,
                outcome: parse_outcome(tokens.next()?)?,
            },
            "G" => {
                let ships_remaining = tokens.next()?.parse().ok()?;
                let mut shots = Vec::new();
                while let Some(symbol) = tokens.next() {
                    let outcome = parse_outcome(symbol)?;
                    let row = tokens.next()?.parse().ok()?;
                    let col = tokens.next()?.parse().ok()?;
                    shots.push((outcome, Cell::new(row, col)));
                }
                return Some(Response::QueryResult {
                    ships_remaining,
                    shots,
                });
            }
            "H" => match tokens.next()? {
                "1" => Response::Halt { won: true },
                "0" => Response::Halt { won: false },
                _ => return None,
            },
            _ => return None,
        };
        if tokens.next().is_some() {
            return None;
        }
        Some(response)
    }
}
