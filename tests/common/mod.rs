//! In-process fake of the gotak service for integration tests.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gotak::Square;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the fake behaves.
#[derive(Debug, Clone, Default)]
pub struct FakeOptions {
    /// Send an empty `Squares` map instead of the real occupancy.
    pub stale_board: bool,
    /// Delay before answering `GET /game/{slug}`.
    pub fetch_delay: Option<Duration>,
    /// Delay before answering `GET /`.
    pub root_delay: Option<Duration>,
    /// Answer the root and every game endpoint with this status.
    pub fail_with: Option<u16>,
}

#[derive(Debug, Clone)]
struct FakeMove {
    square: String,
    stone: String,
}

#[derive(Debug, Clone)]
struct FakeTurn {
    number: u32,
    first: FakeMove,
    second: Option<FakeMove>,
}

#[derive(Debug, Clone)]
struct FakeGame {
    id: i64,
    slug: String,
    size: u8,
    turns: Vec<FakeTurn>,
    meta: Vec<(String, String)>,
}

struct Fake {
    options: FakeOptions,
    games: Mutex<HashMap<String, FakeGame>>,
}

type Shared = Arc<Fake>;

/// Starts the fake on an ephemeral port and returns its base URL.
pub async fn spawn(options: FakeOptions) -> String {
    let fake = Arc::new(Fake {
        options,
        games: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/game/new", post(new_game))
        .route("/game/{slug}", get(get_game))
        .route("/game/{slug}/move", post(make_move))
        .route("/game/{slug}/join", post(join_game))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server");
    });

    format!("http://{}", addr)
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

fn render(game: &FakeGame, stale: bool) -> Value {
    let mut squares: HashMap<String, Vec<Value>> = HashMap::new();
    if !stale {
        for y in 0..game.size {
            for x in 0..game.size {
                let label = Square::new(x, y).expect("square").label();
                squares.insert(label, Vec::new());
            }
        }
        for turn in &game.turns {
            let moves = std::iter::once((1, &turn.first)).chain(turn.second.iter().map(|m| (2, m)));
            for (player, mv) in moves {
                if let Some(stack) = squares.get_mut(&mv.square) {
                    stack.push(json!({ "Player": player, "Type": mv.stone }));
                }
            }
        }
    }

    let turns: Vec<Value> = game
        .turns
        .iter()
        .map(|turn| {
            json!({
                "Number": turn.number,
                "First": { "Square": turn.first.square, "Stone": turn.first.stone, "Text": turn.first.square },
                "Second": turn.second.as_ref().map(|m| json!({ "Square": m.square, "Stone": m.stone, "Text": m.square })),
                "Result": "",
            })
        })
        .collect();

    let meta: Vec<Value> = game
        .meta
        .iter()
        .map(|(k, v)| json!({ "Key": k, "Value": v }))
        .collect();

    let turns = if turns.is_empty() {
        Value::Null
    } else {
        Value::Array(turns)
    };

    json!({
        "ID": game.id,
        "Slug": game.slug,
        "Board": { "Size": game.size, "Squares": squares },
        "Turns": turns,
        "Meta": meta,
    })
}

fn failure(fake: &Fake) -> Option<Response> {
    fake.options.fail_with.map(|code| {
        let status = StatusCode::from_u16(code).expect("status");
        (status, "boom").into_response()
    })
}

fn refuse(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response()
}

async fn root(State(fake): State<Shared>) -> Response {
    if let Some(delay) = fake.options.root_delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(response) = failure(&fake) {
        return response;
    }
    "gotak".into_response()
}

#[derive(Deserialize)]
struct NewGame {
    size: u8,
}

async fn new_game(State(fake): State<Shared>, Json(body): Json<NewGame>) -> Response {
    if let Some(response) = failure(&fake) {
        return response;
    }
    let mut games = fake.games.lock().expect("lock");
    let id = games.len() as i64 + 1;
    let game = FakeGame {
        id,
        slug: format!("game{}", id),
        size: body.size,
        turns: Vec::new(),
        meta: Vec::new(),
    };
    let rendered = render(&game, fake.options.stale_board);
    games.insert(game.slug.clone(), game);
    Json(rendered).into_response()
}

async fn get_game(State(fake): State<Shared>, Path(slug): Path<String>) -> Response {
    if let Some(delay) = fake.options.fetch_delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(response) = failure(&fake) {
        return response;
    }
    let games = fake.games.lock().expect("lock");
    match games.get(&slug) {
        Some(game) => Json(render(game, fake.options.stale_board)).into_response(),
        None => (StatusCode::NOT_FOUND, "no such game").into_response(),
    }
}

#[derive(Deserialize)]
struct MakeMove {
    player: u8,
    #[serde(rename = "move")]
    square: String,
    turn: u32,
}

async fn make_move(
    State(fake): State<Shared>,
    Path(slug): Path<String>,
    Json(body): Json<MakeMove>,
) -> Response {
    if let Some(response) = failure(&fake) {
        return response;
    }
    let mut games = fake.games.lock().expect("lock");
    let Some(game) = games.get_mut(&slug) else {
        return (StatusCode::NOT_FOUND, "no such game").into_response();
    };

    let on_board = body
        .square
        .parse::<Square>()
        .map(|square| square.within(game.size))
        .unwrap_or(false);
    if !on_board {
        return refuse("square is not on the board");
    }
    let occupied = game.turns.iter().any(|turn| {
        turn.first.square == body.square
            || turn.second.as_ref().is_some_and(|m| m.square == body.square)
    });
    if occupied {
        return refuse("square is occupied");
    }

    let mv = FakeMove {
        square: body.square,
        stone: "F".to_string(),
    };
    match body.player {
        1 => {
            if game.turns.iter().any(|turn| turn.number == body.turn) {
                return refuse("turn already started");
            }
            game.turns.push(FakeTurn {
                number: body.turn,
                first: mv,
                second: None,
            });
        }
        2 => match game.turns.iter_mut().find(|turn| turn.number == body.turn) {
            Some(turn) if turn.second.is_none() => turn.second = Some(mv),
            _ => return refuse("not player two's turn"),
        },
        _ => return refuse("unknown player"),
    }

    Json(render(game, fake.options.stale_board)).into_response()
}

#[derive(Deserialize)]
struct Join {
    name: String,
}

async fn join_game(
    State(fake): State<Shared>,
    Path(slug): Path<String>,
    Json(body): Json<Join>,
) -> Response {
    if let Some(response) = failure(&fake) {
        return response;
    }
    let mut games = fake.games.lock().expect("lock");
    let Some(game) = games.get_mut(&slug) else {
        return (StatusCode::NOT_FOUND, "no such game").into_response();
    };
    game.meta.push(("Player2".to_string(), body.name));
    Json(render(game, fake.options.stale_board)).into_response()
}
