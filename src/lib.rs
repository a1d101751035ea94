#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
pub mod protocol;

#[cfg(feature = "std")]
pub mod coordinator;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
pub use protocol::{Command, CommandKind, ErrorCode, ParseError, Response};

#[cfg(feature = "std")]
pub use coordinator::{Coordinator, Seat};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player::{BotPlayer, ClientNode, MatchReport, Player};
#[cfg(feature = "std")]
pub use server::{Server, ServerConfig};
#[cfg(feature = "std")]
pub use session::PlayerSession;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
