//! Era-partitioned league baselines.
//!
//! The odds-ratio combination anchors every matchup against the league
//! average of the season being simulated. Cross-era matchups (a 1911
//! deadball bat against a 1968 arm) are only meaningful because each side
//! is first measured against its own era's baseline.

use serde::{Deserialize, Serialize};

use super::events::{Event, EventRates};
use crate::error::{Result, SimError};

/// The three statistical eras. Boundaries are fixed constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    Deadball,
    Liveball,
    Modern,
}

impl Era {
    pub fn name(self) -> &'static str {
        match self {
            Era::Deadball => "deadball",
            Era::Liveball => "liveball",
            Era::Modern => "modern",
        }
    }
}

/// Era for a season year: deadball before 1920, liveball 1920-1960,
/// modern from 1961 on.
pub fn era_of(year: u16) -> Era {
    if year < 1920 {
        Era::Deadball
    } else if year <= 1960 {
        Era::Liveball
    } else {
        Era::Modern
    }
}

fn deadball_rates() -> EventRates {
    EventRates {
        strikeout: 0.10,
        walk: 0.08,
        hit_by_pitch: 0.01,
        single: 0.18,
        double: 0.04,
        triple: 0.02,
        home_run: 0.005,
    }
}

fn liveball_rates() -> EventRates {
    EventRates {
        strikeout: 0.12,
        walk: 0.09,
        hit_by_pitch: 0.01,
        single: 0.17,
        double: 0.04,
        triple: 0.015,
        home_run: 0.02,
    }
}

fn modern_rates() -> EventRates {
    EventRates {
        strikeout: 0.20,
        walk: 0.08,
        hit_by_pitch: 0.01,
        single: 0.15,
        double: 0.045,
        triple: 0.005,
        home_run: 0.03,
    }
}

/// Immutable table of per-era league-average event rates.
///
/// Construction validates that every probability and every residual
/// in-play-out rate lies strictly in (0, 1); after that the table is
/// safely shareable process-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueBaselines {
    deadball: EventRates,
    liveball: EventRates,
    modern: EventRates,
}

impl LeagueBaselines {
    pub fn new() -> Result<Self> {
        Self::with_tables(deadball_rates(), liveball_rates(), modern_rates())
    }

    /// Build from caller-supplied tables, for validation work that tunes
    /// the anchors without code changes.
    pub fn with_tables(
        deadball: EventRates,
        liveball: EventRates,
        modern: EventRates,
    ) -> Result<Self> {
        validate_baseline(Era::Deadball, &deadball)?;
        validate_baseline(Era::Liveball, &liveball)?;
        validate_baseline(Era::Modern, &modern)?;
        Ok(Self {
            deadball,
            liveball,
            modern,
        })
    }

    pub fn for_era(&self, era: Era) -> &EventRates {
        match era {
            Era::Deadball => &self.deadball,
            Era::Liveball => &self.liveball,
            Era::Modern => &self.modern,
        }
    }

    /// Baseline rates for a season year.
    pub fn baseline(&self, year: u16) -> &EventRates {
        self.for_era(era_of(year))
    }
}

fn validate_baseline(era: Era, rates: &EventRates) -> Result<()> {
    for event in Event::ALL {
        let value = rates.get(event);
        if value <= 0.0 || value >= 1.0 {
            return Err(SimError::InvalidLeagueBaseline {
                era: era.name(),
                event: event.name(),
                value,
            });
        }
    }
    let out_rate = rates.out_rate();
    if out_rate <= 0.0 || out_rate >= 1.0 {
        return Err(SimError::InvalidLeagueBaseline {
            era: era.name(),
            event: "in_play_out",
            value: out_rate,
        });
    }
    Ok(())
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_boundaries() {
        assert_eq!(era_of(1871), Era::Deadball);
        assert_eq!(era_of(1919), Era::Deadball);
        assert_eq!(era_of(1920), Era::Liveball);
        assert_eq!(era_of(1960), Era::Liveball);
        assert_eq!(era_of(1961), Era::Modern);
        assert_eq!(era_of(2023), Era::Modern);
    }

    #[test]
    fn test_default_tables_validate() {
        assert!(LeagueBaselines::new().is_ok());
    }

    #[test]
    fn test_baseline_selects_by_year() {
        let baselines = LeagueBaselines::new().unwrap();
        assert_eq!(baselines.baseline(1911).home_run, 0.005);
        assert_eq!(baselines.baseline(1927).home_run, 0.02);
        assert_eq!(baselines.baseline(1998).home_run, 0.03);
    }

    #[test]
    fn test_residual_out_rate_strictly_inside_unit_interval() {
        let baselines = LeagueBaselines::new().unwrap();
        for era in [Era::Deadball, Era::Liveball, Era::Modern] {
            let out_rate = baselines.for_era(era).out_rate();
            assert!(out_rate > 0.0 && out_rate < 1.0, "{}: {}", era.name(), out_rate);
        }
    }

    #[test]
    fn test_modern_residual_value() {
        let baselines = LeagueBaselines::new().unwrap();
        assert!((baselines.for_era(Era::Modern).out_rate() - 0.48).abs() < 1e-12);
    }

    #[test]
    fn test_zero_probability_rejected() {
        let mut bad = *LeagueBaselines::new().unwrap().for_era(Era::Modern);
        bad.triple = 0.0;
        let result = LeagueBaselines::with_tables(
            *LeagueBaselines::new().unwrap().for_era(Era::Deadball),
            *LeagueBaselines::new().unwrap().for_era(Era::Liveball),
            bad,
        );
        assert!(matches!(
            result,
            Err(SimError::InvalidLeagueBaseline { event: "triple", .. })
        ));
    }

    #[test]
    fn test_residual_leaving_unit_interval_rejected() {
        let mut bad = *LeagueBaselines::new().unwrap().for_era(Era::Modern);
        bad.single = 0.70; // pushes the event sum past 1
        let result = LeagueBaselines::with_tables(
            *LeagueBaselines::new().unwrap().for_era(Era::Deadball),
            *LeagueBaselines::new().unwrap().for_era(Era::Liveball),
            bad,
        );
        assert!(matches!(
            result,
            Err(SimError::InvalidLeagueBaseline { event: "in_play_out", .. })
        ));
    }
}
