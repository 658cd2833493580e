//! Seed loading
//!
//! The player catalog is read once at startup from a JSON document of the
//! shape `{"players": [...]}`.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{CreatePlayerRequest, Player},
    utils::validation::prefix_violations,
};

#[derive(Debug, Deserialize)]
struct SeedDocument {
    players: Vec<Value>,
}

/// Read and validate the seed file at `path`
pub fn load_players(path: &Path) -> AppResult<Vec<Player>> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        AppError::DataSourceUnavailable(format!("cannot read {}: {err}", path.display()))
    })?;

    let players = parse_players(&raw)?;
    tracing::info!(path = %path.display(), count = players.len(), "Loaded player seed");
    Ok(players)
}

/// Parse and validate a seed document.
///
/// Every record passes the same validation as the add-player input. Field
/// paths of violations are prefixed with `players.<index>`.
pub fn parse_players(raw: &str) -> AppResult<Vec<Player>> {
    let document: SeedDocument = serde_json::from_str(raw)
        .map_err(|err| AppError::DataSourceUnavailable(format!("malformed seed document: {err}")))?;

    let mut players: Vec<Player> = Vec::with_capacity(document.players.len());
    for (index, record) in document.players.into_iter().enumerate() {
        let player = CreatePlayerRequest::from_value(record)
            .and_then(Player::try_from)
            .map_err(|err| match err {
                AppError::InvalidPayload { message, details } => AppError::InvalidPayload {
                    message,
                    details: prefix_violations(&format!("players.{index}"), details),
                },
                other => other,
            })?;

        if players.iter().any(|p| p.id == player.id) {
            return Err(AppError::DuplicateId(player.id));
        }
        players.push(player);
    }

    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    const SEED_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/players.json");

    fn record(id: i64, code: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "firstname": "Rafael",
            "lastname": "Nadal",
            "shortname": "R.NAD",
            "sex": "M",
            "country": { "picture": "https://example.com/flags/esp.png", "code": code },
            "picture": "https://example.com/players/nadal.png",
            "data": {
                "rank": 1,
                "points": 1982,
                "weight": 85000,
                "height": 185,
                "age": 33,
                "last": [1, 0, 0, 0, 1]
            }
        })
    }

    #[test]
    fn test_bundled_seed_is_valid() {
        let players = assert_ok!(load_players(Path::new(SEED_PATH)));

        assert_eq!(players.len(), 5);
        assert!(players.iter().any(|p| p.lastname == "Djokovic"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let document = serde_json::json!({ "players": [record(17, "ESP"), record(18, "ESP")] });
        write!(file, "{document}").unwrap();

        let players = load_players(file.path()).unwrap();
        assert_eq!(players.iter().map(|p| p.id).collect::<Vec<_>>(), vec![17, 18]);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = assert_err!(load_players(&dir.path().join("absent.json")));

        assert!(matches!(err, AppError::DataSourceUnavailable(_)));
    }

    #[test]
    fn test_wrong_shape_is_unavailable() {
        assert!(matches!(
            parse_players("[]"),
            Err(AppError::DataSourceUnavailable(_))
        ));
        assert!(matches!(
            parse_players("{\"players\": "),
            Err(AppError::DataSourceUnavailable(_))
        ));
    }

    #[test]
    fn test_invalid_record_is_reported_with_index() {
        let mut bad = record(18, "");
        bad["data"]["last"] = serde_json::json!([]);
        let document = serde_json::json!({ "players": [record(17, "ESP"), bad] });

        match parse_players(&document.to_string()) {
            Err(AppError::InvalidPayload { details, .. }) => {
                let fields: Vec<_> = details.iter().map(|d| d.field.as_str()).collect();
                assert_eq!(fields, vec!["players.1.country.code", "players.1.data.last"]);
            }
            other => panic!("expected an invalid payload, got {other:?}"),
        }
    }

    #[test]
    fn test_mistyped_record_is_reported_with_index() {
        let mut bad = record(18, "ESP");
        bad["data"]["height"] = serde_json::json!("tall");
        let document = serde_json::json!({ "players": [record(17, "ESP"), bad] });

        match parse_players(&document.to_string()) {
            Err(AppError::InvalidPayload { details, .. }) => {
                assert_eq!(details[0].field, "players.1.data.height");
            }
            other => panic!("expected an invalid payload, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let document = serde_json::json!({ "players": [record(17, "ESP"), record(17, "SRB")] });

        assert!(matches!(
            parse_players(&document.to_string()),
            Err(AppError::DuplicateId(17))
        ));
    }
}
