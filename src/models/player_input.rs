//! Validated player input
//!
//! Shape shared by the add-player endpoint and the seed document. Input is
//! checked in three steps: unknown properties, field types (with the path of
//! the offending field) and field rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_path_to_error::Segment;
use validator::Validate;

use crate::{
    constants::MAX_PLAYER_METRIC,
    error::{AppError, AppResult, FieldViolation},
    models::{Country, Player, PlayerData, Sex},
    utils::validation::{validate_recent_results, validate_sex},
};

const PLAYER_FIELDS: &[&str] = &[
    "id",
    "firstname",
    "lastname",
    "shortname",
    "sex",
    "country",
    "picture",
    "data",
];
const COUNTRY_FIELDS: &[&str] = &["picture", "code"];
const DATA_FIELDS: &[&str] = &["rank", "points", "weight", "height", "age", "last"];

/// Add player input
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation violation instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePlayerRequest {
    #[validate(required)]
    pub id: Option<i64>,

    #[validate(required, length(min = 1))]
    pub firstname: Option<String>,

    #[validate(required, length(min = 1))]
    pub lastname: Option<String>,

    #[validate(required, length(min = 1))]
    pub shortname: Option<String>,

    #[validate(required, custom(function = "validate_sex"))]
    pub sex: Option<String>,

    #[validate(required, nested)]
    pub country: Option<CountryRequest>,

    #[validate(required, url)]
    pub picture: Option<String>,

    #[validate(required, nested)]
    pub data: Option<PlayerDataRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CountryRequest {
    #[validate(required, url)]
    pub picture: Option<String>,

    #[validate(required, length(min = 1))]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlayerDataRequest {
    #[validate(required, range(min = 1, max = MAX_PLAYER_METRIC))]
    pub rank: Option<i64>,

    #[validate(required, range(min = 0, max = MAX_PLAYER_METRIC))]
    pub points: Option<i64>,

    /// Grams
    #[validate(required, range(min = 1, max = MAX_PLAYER_METRIC))]
    pub weight: Option<i64>,

    /// Centimeters
    #[validate(required, range(min = 1, max = MAX_PLAYER_METRIC))]
    pub height: Option<i64>,

    #[validate(required, range(min = 1, max = MAX_PLAYER_METRIC))]
    pub age: Option<i64>,

    #[validate(required, length(min = 1), custom(function = "validate_recent_results"))]
    pub last: Option<Vec<i64>>,
}

impl CreatePlayerRequest {
    /// Decode a raw JSON document.
    ///
    /// Unknown properties are all reported at once. A type mismatch is
    /// reported on the path of the first offending field.
    pub fn from_value(value: Value) -> AppResult<Self> {
        let unknown = unknown_properties(&value);
        if !unknown.is_empty() {
            return Err(AppError::invalid_payload(unknown));
        }

        serde_path_to_error::deserialize(value).map_err(|err| {
            let field = dotted_path(err.path());
            AppError::invalid_field(field, err.into_inner().to_string())
        })
    }
}

fn unknown_properties(value: &Value) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    collect_unknown(value, "", PLAYER_FIELDS, &mut violations);

    if let Some(country) = value.get("country") {
        collect_unknown(country, "country", COUNTRY_FIELDS, &mut violations);
    }
    if let Some(data) = value.get("data") {
        collect_unknown(data, "data", DATA_FIELDS, &mut violations);
    }

    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn collect_unknown(value: &Value, parent: &str, known: &[&str], out: &mut Vec<FieldViolation>) {
    let Some(object) = value.as_object() else {
        return;
    };

    for key in object.keys().filter(|key| !known.contains(&key.as_str())) {
        let field = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}.{key}")
        };
        out.push(FieldViolation::new(field, format!("property {key} should not exist")));
    }
}

/// `data.last.2` style path; the document root is reported as `body`
fn dotted_path(path: &serde_path_to_error::Path) -> String {
    let segments: Vec<String> = path
        .iter()
        .filter_map(|segment| match segment {
            Segment::Seq { index } => Some(index.to_string()),
            Segment::Map { key } => Some(key.clone()),
            Segment::Enum { variant } => Some(variant.clone()),
            Segment::Unknown => None,
        })
        .collect();

    if segments.is_empty() {
        "body".to_string()
    } else {
        segments.join(".")
    }
}

impl TryFrom<CreatePlayerRequest> for Player {
    type Error = AppError;

    /// Validate the request and build the record it describes
    fn try_from(request: CreatePlayerRequest) -> AppResult<Self> {
        request.validate()?;

        let sex = present(request.sex, "sex")?
            .parse::<Sex>()
            .map_err(|msg| AppError::invalid_field("sex", msg))?;
        let country = present(request.country, "country")?;
        let data = present(request.data, "data")?;

        Ok(Player {
            id: present(request.id, "id")?,
            firstname: present(request.firstname, "firstname")?,
            lastname: present(request.lastname, "lastname")?,
            shortname: present(request.shortname, "shortname")?,
            sex,
            country: Country {
                picture: present(country.picture, "country.picture")?,
                code: present(country.code, "country.code")?,
            },
            picture: present(request.picture, "picture")?,
            data: PlayerData {
                rank: metric(data.rank, "data.rank")?,
                points: metric(data.points, "data.points")?,
                weight: metric(data.weight, "data.weight")?,
                height: metric(data.height, "data.height")?,
                age: metric(data.age, "data.age")?,
                last: recent_results(data.last)?,
            },
        })
    }
}

fn present<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::invalid_field(field, format!("{field} is required")))
}

fn metric(value: Option<i64>, field: &str) -> AppResult<u32> {
    u32::try_from(present(value, field)?)
        .map_err(|_| AppError::invalid_field(field, format!("{field} is out of range")))
}

fn recent_results(value: Option<Vec<i64>>) -> AppResult<Vec<u8>> {
    present(value, "data.last")?
        .into_iter()
        .map(|outcome| {
            u8::try_from(outcome).map_err(|_| {
                AppError::invalid_field("data.last", "each value in last must be 0 or 1")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn djokovic() -> Value {
        json!({
            "id": 52,
            "firstname": "Novak",
            "lastname": "Djokovic",
            "shortname": "N.DJO",
            "sex": "M",
            "country": {
                "picture": "https://data.latelier.co/training/tennis_stats/resources/Serbie.png",
                "code": "SRB"
            },
            "picture": "https://data.latelier.co/training/tennis_stats/resources/Djokovic.png",
            "data": {
                "rank": 2,
                "points": 2542,
                "weight": 80000,
                "height": 188,
                "age": 31,
                "last": [1, 1, 1, 1, 1]
            }
        })
    }

    fn violations(result: AppResult<impl std::fmt::Debug>) -> Vec<FieldViolation> {
        match result {
            Err(AppError::InvalidPayload { details, .. }) => details,
            other => panic!("expected an invalid payload, got {other:?}"),
        }
    }

    fn validated(payload: Value) -> Vec<FieldViolation> {
        let request = CreatePlayerRequest::from_value(payload).unwrap();
        violations(Player::try_from(request))
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_request_builds_player() {
        let request = CreatePlayerRequest::from_value(djokovic()).unwrap();
        let player = Player::try_from(request).unwrap();

        assert_eq!(player.id, 52);
        assert_eq!(player.sex, Sex::Male);
        assert_eq!(player.country.code, "SRB");
        assert_eq!(player.data.weight, 80000);
        assert_eq!(player.data.last, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_missing_fields_are_reported_by_path() {
        let mut payload = djokovic();
        payload.as_object_mut().unwrap().remove("firstname");
        payload["data"].as_object_mut().unwrap().remove("age");
        payload.as_object_mut().unwrap().remove("country");

        let found = validated(payload);
        assert_eq!(fields(&found), vec!["country", "data.age", "firstname"]);
    }

    #[test]
    fn test_nested_violations_are_sorted() {
        let mut payload = djokovic();
        payload["sex"] = json!("X");
        payload["country"]["code"] = json!("");
        payload["data"]["rank"] = json!(0);
        payload["data"]["points"] = json!(-1);
        payload["data"]["last"] = json!([1, 2]);
        payload["picture"] = json!("not a url");

        let found = validated(payload);
        assert_eq!(
            fields(&found),
            vec![
                "country.code",
                "data.last",
                "data.points",
                "data.rank",
                "picture",
                "sex"
            ]
        );
        let sex = found.iter().find(|v| v.field == "sex").unwrap();
        assert_eq!(sex.messages, vec!["sex must be one of the following values: M, F"]);
    }

    #[test]
    fn test_empty_recent_results_are_rejected() {
        let mut payload = djokovic();
        payload["data"]["last"] = json!([]);

        assert_eq!(fields(&validated(payload)), vec!["data.last"]);
    }

    #[test]
    fn test_zero_points_are_accepted() {
        let mut payload = djokovic();
        payload["data"]["points"] = json!(0);

        let request = CreatePlayerRequest::from_value(payload).unwrap();
        assert_eq!(Player::try_from(request).unwrap().data.points, 0);
    }

    #[test]
    fn test_type_mismatch_is_reported_on_its_path() {
        let mut payload = djokovic();
        payload["data"]["rank"] = json!("abc");
        let found = violations(CreatePlayerRequest::from_value(payload));
        assert_eq!(fields(&found), vec!["data.rank"]);
        assert!(!found[0].messages[0].contains("line"));

        let mut payload = djokovic();
        payload["id"] = json!(1.5);
        assert_eq!(fields(&violations(CreatePlayerRequest::from_value(payload))), vec!["id"]);

        let mut payload = djokovic();
        payload["data"]["last"] = json!([1, "won"]);
        assert_eq!(
            fields(&violations(CreatePlayerRequest::from_value(payload))),
            vec!["data.last.1"]
        );
    }

    #[test]
    fn test_non_object_document_is_reported_on_body() {
        let found = violations(CreatePlayerRequest::from_value(json!("not a player")));
        assert_eq!(fields(&found), vec!["body"]);
    }

    #[test]
    fn test_unknown_properties_are_reported_by_path() {
        let mut payload = djokovic();
        payload["nickname"] = json!("Nole");
        payload["country"]["flag"] = json!("rs");

        let found = violations(CreatePlayerRequest::from_value(payload));
        assert_eq!(fields(&found), vec!["country.flag", "nickname"]);
        assert_eq!(found[1].messages, vec!["property nickname should not exist"]);
    }
}
