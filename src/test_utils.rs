//! Shared test fixtures

use std::{
    io,
    path::Path,
    sync::{Arc, Mutex},
};

use axum::{Router, body::to_bytes, response::Response};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

use crate::{
    config::Config,
    db::{load_players, repositories::InMemoryPlayerRepository},
    handlers::create_router,
    models::{Country, Player, PlayerData, Sex},
    state::AppState,
};

const SEED_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/players.json");

/// Player with plausible data; two wins out of three recent matches
pub fn sample_player(id: i64, country_code: &str, rank: u32) -> Player {
    Player {
        id,
        firstname: format!("First{id}"),
        lastname: format!("Last{id}"),
        shortname: format!("F.L{id}"),
        sex: Sex::Male,
        country: Country {
            picture: format!("https://example.com/flags/{country_code}.png"),
            code: country_code.to_string(),
        },
        picture: format!("https://example.com/players/{id}.png"),
        data: PlayerData {
            rank,
            points: 1000,
            weight: 80000,
            height: 185,
            age: 30,
            last: vec![1, 0, 1],
        },
    }
}

/// State over the bundled seed file
pub fn create_test_state() -> AppState {
    let players = load_players(Path::new(SEED_PATH)).expect("bundled seed loads");
    let repository = InMemoryPlayerRepository::with_players(players).expect("seed ids are unique");
    AppState::new(Arc::new(repository), Config::default())
}

/// Full router with the middleware stack over the bundled seed file
pub fn create_test_app() -> Router {
    create_router(create_test_state())
}

/// Buffer a response body and parse it as JSON
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body is readable");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Collects the formatted log output of a closure
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Run `f` with a subscriber writing into this buffer
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().expect("log buffer lock");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log buffer lock poisoned"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(Arc::clone(&self.buffer))
    }
}
