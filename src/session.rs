//! Per-game session: the latest canonical state and the move guard.

use crate::client::GameService;
use crate::error::{ClientError, ClientErrorKind};
use gotak_board::{GameState, Player, Square};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// What happened to a response once it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// The response became the session's latest state.
    Applied(Arc<GameState>),
    /// A newer response was applied first; this one was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct Latest {
    ticket: u64,
    state: Option<Arc<GameState>>,
}

/// A game being played from one screen.
///
/// Responses replace the state wholesale, newest request wins. At most one
/// move is in flight at a time.
#[derive(Debug)]
pub struct GameSession<S> {
    service: S,
    slug: String,
    issued: AtomicU64,
    latest: Mutex<Latest>,
    submitting: AtomicBool,
}

impl<S: GameService> GameSession<S> {
    /// Attaches to an existing game without fetching it.
    #[instrument(skip(service))]
    pub fn new(service: S, slug: String) -> Self {
        Self {
            service,
            slug,
            issued: AtomicU64::new(0),
            latest: Mutex::new(Latest::default()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Creates a game and opens a session on it.
    #[instrument(skip(service))]
    pub async fn create(service: S, board_size: u8) -> Result<Self, ClientError> {
        let state = service.create_game(board_size).await?;
        let session = Self::new(service, state.slug().clone());
        let ticket = session.next_ticket();
        session.apply(ticket, state);
        Ok(session)
    }

    /// Slug of the game.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The service this session talks to.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Latest applied state, if any.
    pub fn latest(&self) -> Option<Arc<GameState>> {
        self.lock().state.clone()
    }

    /// Whether a move is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Fetches the game and applies it unless a newer response got there
    /// first.
    #[instrument(skip(self), fields(slug = %self.slug))]
    pub async fn refresh(&self) -> Result<Update, ClientError> {
        let ticket = self.next_ticket();
        let state = self.service.fetch_game(&self.slug).await?;
        Ok(self.apply(ticket, state))
    }

    /// Submits a placement.
    ///
    /// # Errors
    ///
    /// Returns [`ClientErrorKind::Busy`] while another move is in flight,
    /// otherwise whatever the service reports. On any error the latest state
    /// is left untouched.
    #[instrument(skip(self), fields(slug = %self.slug, square = %square))]
    pub async fn play(
        &self,
        square: Square,
        player: Player,
        turn: u32,
    ) -> Result<Update, ClientError> {
        if self.submitting.swap(true, Ordering::AcqRel) {
            warn!("Move already in flight");
            return Err(ClientError::new(ClientErrorKind::Busy(self.slug.clone())));
        }
        let _guard = SubmitGuard(&self.submitting);

        let ticket = self.next_ticket();
        let state = self
            .service
            .submit_move(&self.slug, square, player, turn)
            .await?;
        Ok(self.apply(ticket, state))
    }

    fn next_ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn apply(&self, ticket: u64, state: GameState) -> Update {
        let mut latest = self.lock();
        if ticket < latest.ticket {
            debug!(ticket, applied = latest.ticket, "Discarding superseded response");
            return Update::Superseded;
        }
        let state = Arc::new(state);
        latest.ticket = ticket;
        latest.state = Some(Arc::clone(&state));
        info!(ticket, turns = state.turns().len(), "Applied game state");
        Update::Applied(state)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Latest> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight flag when a submission ends, however it ends.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
