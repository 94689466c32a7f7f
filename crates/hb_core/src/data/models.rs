//! Seasonal stat-line models.
//!
//! These are the immutable inputs to the simulation: one batting line and
//! one pitching line per player-year, produced by a repository collaborator
//! and shared for the duration of a game. Counts are unsigned so negative
//! values are unrepresentable; the remaining cross-field invariants are
//! checked by `validate()`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Season batting statistics for one player-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingStatLine {
    pub player_id: String,
    pub year: u16,
    pub team_id: String,
    pub games: u32,
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub hit_by_pitch: u32,
    pub sacrifice_flies: u32,
}

impl BattingStatLine {
    /// Singles are derived: hits minus extra-base hits.
    pub fn singles(&self) -> u32 {
        self.hits - self.doubles - self.triples - self.home_runs
    }

    /// Plate appearances: at-bats plus walks, HBP, and sacrifice flies.
    pub fn plate_appearances(&self) -> u32 {
        self.at_bats + self.walks + self.hit_by_pitch + self.sacrifice_flies
    }

    pub fn batting_average(&self) -> f64 {
        if self.at_bats == 0 {
            return 0.0;
        }
        f64::from(self.hits) / f64::from(self.at_bats)
    }

    /// Check cross-field invariants that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        let extra_base = self.doubles + self.triples + self.home_runs;
        if self.hits < extra_base {
            return Err(SimError::InvalidStatLine {
                field: "hits",
                value: i64::from(self.hits),
                reason: "fewer hits than doubles + triples + home runs",
            });
        }
        if self.strikeouts > self.plate_appearances() {
            return Err(SimError::InvalidStatLine {
                field: "strikeouts",
                value: i64::from(self.strikeouts),
                reason: "more strikeouts than plate appearances",
            });
        }
        if self.hits > self.at_bats {
            return Err(SimError::InvalidStatLine {
                field: "hits",
                value: i64::from(self.hits),
                reason: "more hits than at-bats",
            });
        }
        Ok(())
    }
}

/// Season pitching statistics for one pitcher-year.
///
/// `doubles_allowed` / `triples_allowed` carry the extra-base breakdown of
/// hits allowed when the source records it; most historical seasons do not,
/// in which case the projector splits non-HR hits by league proportions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingStatLine {
    pub player_id: String,
    pub year: u16,
    pub team_id: String,
    pub games: u32,
    pub games_started: u32,
    pub wins: u32,
    pub losses: u32,
    /// Outs recorded (innings pitched * 3).
    pub outs_recorded: u32,
    pub hits_allowed: u32,
    pub runs_allowed: u32,
    pub earned_runs: u32,
    pub home_runs_allowed: u32,
    pub doubles_allowed: Option<u32>,
    pub triples_allowed: Option<u32>,
    pub walks_allowed: u32,
    pub strikeouts: u32,
    pub hit_batters: u32,
    pub batters_faced: u32,
}

impl PitchingStatLine {
    pub fn innings_pitched(&self) -> f64 {
        f64::from(self.outs_recorded) / 3.0
    }

    pub fn earned_run_average(&self) -> f64 {
        if self.outs_recorded == 0 {
            return 0.0;
        }
        f64::from(self.earned_runs) * 27.0 / f64::from(self.outs_recorded)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hits_allowed < self.home_runs_allowed {
            return Err(SimError::InvalidStatLine {
                field: "hits_allowed",
                value: i64::from(self.hits_allowed),
                reason: "fewer hits allowed than home runs allowed",
            });
        }
        if let (Some(doubles), Some(triples)) = (self.doubles_allowed, self.triples_allowed) {
            let extra_base = doubles + triples + self.home_runs_allowed;
            if self.hits_allowed < extra_base {
                return Err(SimError::InvalidStatLine {
                    field: "hits_allowed",
                    value: i64::from(self.hits_allowed),
                    reason: "fewer hits allowed than extra-base hits allowed",
                });
            }
        }
        if self.strikeouts > self.batters_faced {
            return Err(SimError::InvalidStatLine {
                field: "strikeouts",
                value: i64::from(self.strikeouts),
                reason: "more strikeouts than batters faced",
            });
        }
        Ok(())
    }
}

/// Team record for one season, carrying the park factor used by the
/// projector. 100 is neutral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeason {
    pub team_id: String,
    pub year: u16,
    pub league_id: String,
    pub team_name: String,
    pub park_factor: i32,
}

// ========== Tests ==========
