//! gotak - client for the gotak.app Tak service.
//!
//! The service owns all rules and state. This crate talks to it over HTTP and
//! turns its payloads into the canonical model from [`gotak_board`].
//!
//! # Architecture
//!
//! - **Wire**: raw payloads and the field mapping to canonical names
//! - **Adapter**: normalizes payloads, replaying the turn log when the
//!   server's board snapshot is not trusted
//! - **Client**: the REST façade, with timeouts and error classification
//! - **Session**: latest state per game, newest response wins, one move at
//!   a time
//!
//! # Example
//!
//! ```no_run
//! use gotak::{ClientConfig, GameClient, GameService};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GameClient::new(ClientConfig::new("https://gotak.app"))?;
//! let game = client.create_game(5).await?;
//! let game = client
//!     .submit_move(game.slug(), "c3".parse()?, gotak::Player::One, 1)
//!     .await?;
//! println!("{}", game.board().display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod client;
mod config;
mod error;
mod session;
pub mod wire;

pub use adapter::{normalize_created, normalize_fetched};
pub use client::{GameClient, GameService};
pub use config::{BoardSource, ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use error::{ClientError, ClientErrorKind};
pub use session::{GameSession, Update};

pub use gotak_board::{
    Board, BoardView, GamePhase, GameState, Move, MoveAction, Outcome, Player, ProjectionMode,
    Projector, Reserve, ScreenPoint, Square, Stone, StoneKind, TileMetrics, Turn, next_move,
};
