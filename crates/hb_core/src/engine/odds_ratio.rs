//! Odds-ratio combination of batter, pitcher, and league probabilities.
//!
//! The mathematical core of the matchup model. Averaging batter and
//! pitcher rates flattens skill differences: a 47% strikeout pitcher
//! against a 31% strikeout batter is not a 39% strikeout matchup. The
//! odds-ratio method (a relative of the log5 formula) keeps the
//! interaction multiplicative against the league anchor:
//!
//! ```text
//! odds(x)      = x / (1 - x)
//! matchup_odds = odds(batter) * odds(pitcher) / odds(league)
//! matchup_p    = matchup_odds / (1 + matchup_odds)
//! ```
//!
//! Applied event-by-event this yields an unnormalized `EventRates`; the
//! residual `1 - sum` is the in-play-out mass the resolver depends on.
//! Normalizing here would silently inflate hit rates.

use super::events::{Event, EventRates};
use crate::error::{Result, SimError};

/// Convert a probability in [0, 1] to odds. 1.0 maps to infinity.
pub fn probability_to_odds(prob: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(SimError::InvalidProbabilityInput {
            name: "probability",
            value: prob,
            expected: "[0, 1]",
        });
    }
    if prob >= 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok(prob / (1.0 - prob))
}

/// Convert odds back to a probability. Infinity maps to 1.0.
pub fn odds_to_probability(odds: f64) -> Result<f64> {
    if odds.is_infinite() {
        return Ok(1.0);
    }
    if odds < 0.0 || odds.is_nan() {
        return Err(SimError::InvalidProbabilityInput {
            name: "odds",
            value: odds,
            expected: "a non-negative value",
        });
    }
    Ok(odds / (1.0 + odds))
}

/// Combine one event's batter, pitcher, and league probabilities.
///
/// The league probability is the anchor and must lie strictly in (0, 1)
/// because its odds appear in a denominator. Batter or pitcher at 0 pins
/// the matchup to 0; at 1, to 1. No division is attempted in either case.
pub fn combine(batter_prob: f64, pitcher_prob: f64, league_prob: f64) -> Result<f64> {
    if league_prob <= 0.0 || league_prob >= 1.0 {
        return Err(SimError::InvalidProbabilityInput {
            name: "league_prob",
            value: league_prob,
            expected: "strictly inside (0, 1)",
        });
    }
    for (name, value) in [("batter_prob", batter_prob), ("pitcher_prob", pitcher_prob)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(SimError::InvalidProbabilityInput {
                name,
                value,
                expected: "[0, 1]",
            });
        }
    }

    if batter_prob == 0.0 || pitcher_prob == 0.0 {
        return Ok(0.0);
    }
    if batter_prob >= 1.0 || pitcher_prob >= 1.0 {
        return Ok(1.0);
    }

    let batter_odds = probability_to_odds(batter_prob)?;
    let pitcher_odds = probability_to_odds(pitcher_prob)?;
    let league_odds = probability_to_odds(league_prob)?;

    odds_to_probability(batter_odds * pitcher_odds / league_odds)
}

/// Apply the odds-ratio combination to every event in the closed set.
///
/// Returns unnormalized matchup rates: the sum stays below 1 and the
/// residual is the in-play-out probability.
pub fn combine_rates(
    batter: &EventRates,
    pitcher: &EventRates,
    league: &EventRates,
) -> Result<EventRates> {
    let mut matchup = EventRates::default();
    for event in Event::ALL {
        let combined = combine(batter.get(event), pitcher.get(event), league.get(event))?;
        matchup.set(event, combined);
    }
    Ok(matchup)
}

// ========== Tests ==========
