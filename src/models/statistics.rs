//! Aggregate statistics model

use serde::{Deserialize, Serialize};

/// Statistics derived from a single snapshot of all players
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    pub top_country_by_win_ratio: TopCountry,
    /// Rounded to two decimals
    pub average_bmi: f64,
    pub median_height: f64,
}

/// Country with the best aggregated win ratio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopCountry {
    pub code: String,
    /// In `[0, 1]`, rounded to three decimals
    pub ratio: f64,
}
