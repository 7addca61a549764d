//! REST client for the gotak service.

use crate::adapter::{normalize_created, normalize_fetched};
use crate::config::{ClientConfig, ConfigError};
use crate::error::{ClientError, ClientErrorKind};
use crate::wire::{self, JoinRequest, MoveRequest, NewGameRequest, RawGame};
use async_trait::async_trait;
use gotak_board::{GameState, Player, Square};
use reqwest::StatusCode;
use tracing::{debug, error, info, instrument, warn};

/// Game operations a session drives.
///
/// Implemented by [`GameClient`]; sessions are generic over it so they can
/// run against other transports.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Creates a game of the given board size.
    async fn create_game(&self, board_size: u8) -> Result<GameState, ClientError>;

    /// Fetches a game by slug.
    async fn fetch_game(&self, slug: &str) -> Result<GameState, ClientError>;

    /// Submits a placement for `player` on `square`, claiming turn `turn`.
    async fn submit_move(
        &self,
        slug: &str,
        square: Square,
        player: Player,
        turn: u32,
    ) -> Result<GameState, ClientError>;

    /// Joins a game under a display name.
    async fn join_game(&self, slug: &str, name: &str) -> Result<GameState, ClientError>;
}

/// HTTP client for the gotak service.
///
/// Every request is bounded by the configured timeout and is never retried
/// here; retrying a move could submit it twice.
#[derive(Debug, Clone)]
pub struct GameClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl GameClient {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid or the HTTP
    /// stack cannot be initialized.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        if *config.debug() {
            info!(?config, "API configuration");
        }

        Ok(Self { config, http })
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the service root answers with a success status.
    ///
    /// Never fails; any transport error reads as unreachable.
    #[instrument(skip(self))]
    pub async fn connectivity_check(&self) -> bool {
        let url = format!("{}/", self.config.root());
        match self.http.get(&url).send().await {
            Ok(response) => {
                let reachable = response.status().is_success();
                debug!(status = %response.status(), reachable, "Connectivity check");
                reachable
            }
            Err(e) => {
                warn!(error = %e, "Service unreachable");
                false
            }
        }
    }

    /// Shareable link to a game.
    pub fn game_link(&self, slug: &str) -> String {
        format!("{}/game/{}", self.config.root(), slug)
    }

    /// Sends a request and decodes a game from a successful response.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        slug: &str,
    ) -> Result<RawGame, ClientError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if *self.config.debug() {
            debug!(%status, body = %body, "Raw response");
        }

        if status == StatusCode::NOT_FOUND {
            warn!(slug, "Game not found");
            return Err(ClientError::new(ClientErrorKind::NotFound(slug.to_string())));
        }
        if status.is_server_error() {
            warn!(%status, "Server error");
            return Err(ClientError::new(ClientErrorKind::ServerError {
                status: status.as_u16(),
                body,
            }));
        }
        if !status.is_success() {
            let reason = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| wire::error_message(&value))
                .unwrap_or_else(|| body.trim().to_string());
            warn!(%status, reason = %reason, "Request rejected");
            return Err(ClientError::new(ClientErrorKind::Rejected {
                status: Some(status.as_u16()),
                reason,
            }));
        }

        wire::parse_game(&body)
    }

    /// Classifies a transport-level failure.
    #[track_caller]
    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            warn!(limit_ms = *self.config.timeout_ms(), "Request timed out");
            ClientError::new(ClientErrorKind::Timeout {
                limit_ms: *self.config.timeout_ms(),
            })
        } else if err.is_decode() {
            ClientError::new(ClientErrorKind::MalformedHistory(err.to_string()))
        } else {
            error!(error = %err, "Transport failure");
            ClientError::new(ClientErrorKind::Unreachable(err.to_string()))
        }
    }
}

#[async_trait]
impl GameService for GameClient {
    #[instrument(skip(self))]
    async fn create_game(&self, board_size: u8) -> Result<GameState, ClientError> {
        info!("Creating game");
        let url = format!("{}/game/new", self.config.root());
        let raw = self
            .send(self.http.post(&url).json(&NewGameRequest { size: board_size }), "new")
            .await?;
        let state = normalize_created(raw)?;
        info!(slug = %state.slug(), "Game created");
        Ok(state)
    }

    #[instrument(skip(self))]
    async fn fetch_game(&self, slug: &str) -> Result<GameState, ClientError> {
        debug!("Fetching game");
        let url = format!("{}/game/{}", self.config.root(), slug);
        let raw = self.send(self.http.get(&url), slug).await?;
        normalize_fetched(raw, *self.config.board_source())
    }

    #[instrument(skip(self), fields(square = %square, player = player.index()))]
    async fn submit_move(
        &self,
        slug: &str,
        square: Square,
        player: Player,
        turn: u32,
    ) -> Result<GameState, ClientError> {
        info!("Submitting move");
        let url = format!("{}/game/{}/move", self.config.root(), slug);
        let body = MoveRequest {
            player: player.index(),
            square: square.label(),
            turn,
        };
        let raw = self.send(self.http.post(&url).json(&body), slug).await?;
        let state = normalize_fetched(raw, *self.config.board_source())?;
        info!(turns = state.turns().len(), "Move accepted");
        Ok(state)
    }

    #[instrument(skip(self))]
    async fn join_game(&self, slug: &str, name: &str) -> Result<GameState, ClientError> {
        info!("Joining game");
        let url = format!("{}/game/{}/join", self.config.root(), slug);
        let body = JoinRequest {
            name: name.to_string(),
        };
        let raw = self.send(self.http.post(&url).json(&body), slug).await?;
        normalize_fetched(raw, *self.config.board_source())
    }
}
