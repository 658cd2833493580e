//! Statistics engine
//!
//! Pure computations over one snapshot of player records.

use std::collections::HashMap;

use crate::{
    constants::{BMI_DECIMALS, WIN_RATIO_DECIMALS},
    models::{Player, PlayerStatistics, TopCountry},
};

/// Compute every aggregate from the same snapshot
pub fn compute(players: &[Player]) -> PlayerStatistics {
    PlayerStatistics {
        top_country_by_win_ratio: top_country_by_win_ratio(players),
        average_bmi: round_to(average_bmi(players), BMI_DECIMALS),
        median_height: median_height(players),
    }
}

/// Country with the highest aggregated win ratio.
///
/// Wins and matches are summed per country code before dividing. On an
/// exact tie the country seen first in `players` is kept. Empty input
/// yields an empty code with a zero ratio.
pub fn top_country_by_win_ratio(players: &[Player]) -> TopCountry {
    // (code, wins, matches) in first-seen order
    let mut totals: Vec<(&str, u64, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for player in players {
        let code = player.country.code.as_str();
        let slot = *index.entry(code).or_insert_with(|| {
            totals.push((code, 0, 0));
            totals.len() - 1
        });
        totals[slot].1 += u64::from(player.data.wins());
        totals[slot].2 += u64::from(player.data.matches());
    }

    let mut best: Option<TopCountry> = None;
    for (code, wins, matches) in totals {
        let ratio = if matches == 0 {
            0.0
        } else {
            wins as f64 / matches as f64
        };

        if best.as_ref().is_none_or(|current| ratio > current.ratio) {
            best = Some(TopCountry {
                code: code.to_string(),
                ratio,
            });
        }
    }

    best.map(|top| TopCountry {
        ratio: round_to(top.ratio, WIN_RATIO_DECIMALS),
        ..top
    })
    .unwrap_or_default()
}

/// Mean BMI over the players with a positive weight and height, 0 if none
pub fn average_bmi(players: &[Player]) -> f64 {
    let values: Vec<f64> = players.iter().filter_map(|p| p.data.bmi()).collect();

    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Median height in centimeters, 0 for an empty input
pub fn median_height(players: &[Player]) -> f64 {
    let mut heights: Vec<u32> = players.iter().map(|p| p.data.height).collect();
    if heights.is_empty() {
        return 0.0;
    }

    heights.sort_unstable();
    let mid = heights.len() / 2;

    if heights.len() % 2 == 1 {
        f64::from(heights[mid])
    } else {
        (f64::from(heights[mid - 1]) + f64::from(heights[mid])) / 2.0
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
