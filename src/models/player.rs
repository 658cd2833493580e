//! Player model

use serde::{Deserialize, Serialize};

/// A single competitor record
///
/// The serialized shape is the wire shape: it is what the seed document
/// contains and what the API returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub shortname: String,
    pub sex: Sex,
    pub country: Country,
    pub picture: String,
    pub data: PlayerData,
}

/// Country a player represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub picture: String,
    pub code: String,
}

/// Performance data attached to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub rank: u32,
    pub points: u32,
    /// Weight in grams
    pub weight: u32,
    /// Height in centimeters
    pub height: u32,
    pub age: u32,
    /// Most recent match outcomes, 1 for a win and 0 for a loss
    pub last: Vec<u8>,
}

/// Player sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "M"),
            Self::Female => write!(f, "F"),
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            other => Err(format!("sex must be one of M, F (got {other:?})")),
        }
    }
}

impl PlayerData {
    /// Number of wins among the recent results
    pub fn wins(&self) -> u32 {
        self.last.iter().filter(|&&outcome| outcome == 1).count() as u32
    }

    /// Number of recent matches played
    pub fn matches(&self) -> u32 {
        self.last.len() as u32
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 1000.0
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 100.0
    }

    /// Body-mass index, or `None` when weight or height is not positive
    pub fn bmi(&self) -> Option<f64> {
        let weight_kg = self.weight_kg();
        let height_m = self.height_m();

        if weight_kg > 0.0 && height_m > 0.0 {
            Some(weight_kg / (height_m * height_m))
        } else {
            None
        }
    }
}
