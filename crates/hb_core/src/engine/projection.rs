//! Projection of seasonal counts into per-plate-appearance event rates.
//!
//! Rates are per plate appearance (batters) or per batter faced
//! (pitchers), never per at-bat: walks and HBP are not at-bats and
//! per-AB rates would distort every denominator. Thin or missing samples
//! fall back to the league baseline, and the fallback is reported so
//! callers can detect when a projection carries no player signal.

use serde::{Deserialize, Serialize};

use super::events::EventRates;
use crate::data::models::{BattingStatLine, PitchingStatLine};

/// Where a projection's rates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Rates computed from the player's own seasonal counts.
    Direct,
    /// League baseline substituted: the sample was below the configured
    /// minimum (or empty).
    LeagueBaseline,
}

/// Projected per-PA rates plus the provenance flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub rates: EventRates,
    pub source: RateSource,
}

/// Project a batting line into per-PA event rates.
///
/// Below `min_plate_appearances` the league baseline is substituted
/// wholesale; partial blending would let a 10-PA September call-up swing
/// a matchup.
pub fn project_batter(
    stats: &BattingStatLine,
    league: &EventRates,
    min_plate_appearances: u32,
) -> Projection {
    let pa = stats.plate_appearances();
    if pa < min_plate_appearances.max(1) {
        log::warn!(
            "batter {} ({}): {} PA below minimum {}, using league baseline",
            stats.player_id,
            stats.year,
            pa,
            min_plate_appearances
        );
        return Projection {
            rates: *league,
            source: RateSource::LeagueBaseline,
        };
    }

    let pa = f64::from(pa);
    Projection {
        rates: EventRates {
            strikeout: f64::from(stats.strikeouts) / pa,
            walk: f64::from(stats.walks) / pa,
            hit_by_pitch: f64::from(stats.hit_by_pitch) / pa,
            single: f64::from(stats.singles()) / pa,
            double: f64::from(stats.doubles) / pa,
            triple: f64::from(stats.triples) / pa,
            home_run: f64::from(stats.home_runs) / pa,
        },
        source: RateSource::Direct,
    }
}

/// Project a pitching line into allowed per-batter-faced rates.
///
/// When the line lacks an extra-base breakdown, non-HR hits allowed are
/// distributed by the league's single/double/triple proportions.
pub fn project_pitcher(
    stats: &PitchingStatLine,
    league: &EventRates,
    min_batters_faced: u32,
) -> Projection {
    let bf = stats.batters_faced;
    if bf < min_batters_faced.max(1) {
        log::warn!(
            "pitcher {} ({}): {} BF below minimum {}, using league baseline",
            stats.player_id,
            stats.year,
            bf,
            min_batters_faced
        );
        return Projection {
            rates: *league,
            source: RateSource::LeagueBaseline,
        };
    }

    let bf = f64::from(bf);
    let (single_rate, double_rate, triple_rate) = match (stats.doubles_allowed, stats.triples_allowed)
    {
        (Some(doubles), Some(triples)) => {
            let singles =
                stats.hits_allowed - doubles - triples - stats.home_runs_allowed;
            (
                f64::from(singles) / bf,
                f64::from(doubles) / bf,
                f64::from(triples) / bf,
            )
        }
        _ => {
            // No breakdown recorded: split non-HR hits by league proportions.
            let non_hr_hits = f64::from(stats.hits_allowed - stats.home_runs_allowed);
            let non_hr_league = league.single + league.double + league.triple;
            let per_bf = non_hr_hits / bf;
            (
                league.single / non_hr_league * per_bf,
                league.double / non_hr_league * per_bf,
                league.triple / non_hr_league * per_bf,
            )
        }
    };

    Projection {
        rates: EventRates {
            strikeout: f64::from(stats.strikeouts) / bf,
            walk: f64::from(stats.walks_allowed) / bf,
            hit_by_pitch: f64::from(stats.hit_batters) / bf,
            single: single_rate,
            double: double_rate,
            triple: triple_rate,
            home_run: f64::from(stats.home_runs_allowed) / bf,
        },
        source: RateSource::Direct,
    }
}

/// Scale the hit events for park context, at half strength because half
/// the schedule is played on the road. Strikeouts, walks, and HBP are
/// untouched.
pub fn apply_park_factor(rates: &EventRates, park_factor: i32) -> EventRates {
    if park_factor == 100 {
        return *rates;
    }
    let adjustment = 1.0 + f64::from(park_factor - 100) / 200.0;
    EventRates {
        single: rates.single * adjustment,
        double: rates.double * adjustment,
        triple: rates.triple * adjustment,
        home_run: rates.home_run * adjustment,
        ..*rates
    }
}

// ========== Tests ==========
