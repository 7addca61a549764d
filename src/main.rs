//! gotak - terminal client for the gotak.app Tak service.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use gotak::{
    BoardView, ClientConfig, GameClient, GameService, GameSession, GameState, Player, Square,
    Update, next_move,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = GameClient::new(config)?;

    match cli.command {
        Command::Ping => ping(&client).await,
        Command::New { size } => {
            let game = client.create_game(size).await?;
            print_game(&game)?;
            println!("link: {}", client.game_link(game.slug()));
            Ok(())
        }
        Command::Show { slug } => {
            let game = client.fetch_game(&slug).await?;
            print_game(&game)
        }
        Command::Play {
            slug,
            square,
            player,
            turn,
        } => play(client, slug, &square, player, turn).await,
        Command::Join { slug, name } => {
            let game = client.join_game(&slug, &name).await?;
            print_game(&game)
        }
        Command::Link { slug } => {
            println!("{}", client.game_link(&slug));
            Ok(())
        }
    }
}

/// Resolves configuration: file or environment, then command-line overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(timeout) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout);
    }
    if let Some(source) = cli.board_source {
        config = config.with_board_source(source);
    }
    if cli.debug {
        config = config.with_debug(true);
    }
    config.validate()?;
    Ok(config)
}

async fn ping(client: &GameClient) -> Result<()> {
    if client.connectivity_check().await {
        println!("{} is reachable", client.config().base_url());
        Ok(())
    } else {
        bail!("{} is unreachable", client.config().base_url())
    }
}

/// Fetches the game to fill in defaults, then submits through a session.
async fn play(
    client: GameClient,
    slug: String,
    square: &str,
    player: Option<u8>,
    turn: Option<u32>,
) -> Result<()> {
    let square: Square = square.parse().context("invalid square")?;
    let session = GameSession::new(client, slug);
    session.refresh().await?;
    let current = session.latest().context("no game state")?;

    let (next_player, next_turn) = next_move(&current);
    let player = match player {
        Some(index) => Player::from_index(index).context("player must be 1 or 2")?,
        None => next_player,
    };
    let turn = turn.unwrap_or(next_turn);
    info!(%square, player = player.index(), turn, "Playing");

    match session.play(square, player, turn).await? {
        Update::Applied(game) => print_game(&game),
        Update::Superseded => Ok(()),
    }
}

fn print_game(game: &GameState) -> Result<()> {
    let view = BoardView::derive(game)?;
    println!("game {} ({})", game.slug(), game.id());
    println!("{}", game.board().display());
    println!(
        "turns: {}  phase: {}  to move: {}",
        game.turns().len(),
        view.phase(),
        view.current_player()
    );
    if let Some(outcome) = view.outcome() {
        println!("outcome: {:?}", outcome);
    }
    for player in [Player::One, Player::Two] {
        let reserve = view.reserve(player);
        println!(
            "{}: {} stones, {} capstones",
            player,
            reserve.stones(),
            reserve.capstones()
        );
    }
    for (key, value) in game.meta() {
        println!("{}: {}", key, value);
    }
    Ok(())
}
