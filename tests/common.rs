#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use battle_form::battle::{BattleRequest, BattleResponse, BattleResult, Combatant, FinalState};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static START: Once = Once::new();
static _GUARD: Lazy<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initialize test environment: dotenv and tracing (stderr + file).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("env filter");

        // Daily rotating log file separate from app runtime logs
        let file_appender = rolling::daily("logs", "tests.log");
        let (file_nb, guard) = tracing_appender::non_blocking(file_appender);
        *_GUARD.lock().unwrap() = Some(guard); // retain guard for lifetime

        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_writer(std::io::stderr);

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_writer(file_nb);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();

        tracing::info!(target: "test_init", "Test tracing initialized (stderr + rotating file)");
    });
}

/// Bodies received by the stub, in arrival order.
pub type Seen = Arc<Mutex<Vec<Value>>>;

/// In-process battle simulator stub.
///
/// Behaviour is picked by `pokemon1`:
/// * `missingno` -> 400 with plain text "Invalid Pokémon name"
/// * `empty500`  -> 500 with an empty body
/// * `garbage`   -> 200 with a non-JSON body
/// * anything else -> 200 with a three-entry log, `pokemon1` wins
pub struct StubServer {
    pub addr: SocketAddr,
    pub seen: Seen,
}

impl StubServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

async fn simulate(State(seen): State<Seen>, Json(body): Json<Value>) -> axum::response::Response {
    seen.lock().unwrap().push(body.clone());
    let p1 = body["pokemon1"].as_str().unwrap_or_default().to_string();
    let p2 = body["pokemon2"].as_str().unwrap_or_default().to_string();
    match p1.as_str() {
        "missingno" => (StatusCode::BAD_REQUEST, "Invalid Pokémon name").into_response(),
        "empty500" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbage" => (StatusCode::OK, "definitely not json").into_response(),
        _ => Json(json!({
            "tool": "battle_simulator",
            "params": body,
            "result": {
                "winner": p1,
                "turns": 1,
                "log": [
                    format!("Battle start : {p1} vs {p2}."),
                    "-- Turn 1 --".to_string(),
                    format!("{p2} fainted!"),
                ],
                "final_state": {"p1": {"name": p1, "hp": 41}, "p2": {"name": p2, "hp": 0}}
            }
        }))
        .into_response(),
    }
}

/// Start the stub on 127.0.0.1 with an ephemeral port, on its own thread and runtime.
pub fn spawn_stub() -> StubServer {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/mcp/tools/battle_simulator", post(simulate))
        .with_state(seen.clone());

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("stub runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
            tx.send(listener.local_addr().expect("stub addr")).expect("send stub addr");
            axum::serve(listener, app).await.expect("serve stub");
        });
    });
    let addr = rx.recv().expect("stub addr");
    StubServer { addr, seen }
}

/// A localhost URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn sample_response(log_len: usize) -> BattleResponse {
    BattleResponse {
        tool: "battle_simulator".into(),
        params: BattleRequest {
            pokemon1: "pikachu".into(),
            pokemon2: "charmander".into(),
            level: 50,
            max_turns: 200,
        },
        result: BattleResult {
            winner: "pikachu".into(),
            turns: log_len as u32,
            log: (1..=log_len).map(|i| format!("event #{i}")).collect(),
            final_state: FinalState {
                p1: Combatant { name: "pikachu".into(), hp: 41 },
                p2: Combatant { name: "charmander".into(), hp: 0 },
            },
        },
    }
}
