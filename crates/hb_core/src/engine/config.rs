//! Simulation tuning knobs.
//!
//! The sub-decision constants are league-average defaults; they are
//! injectable so tests can pin distributions and future calibration work
//! can tune them without code changes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

const EPSILON: f64 = 1e-9;

/// Every knob the core recognizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// RNG seed; `None` draws one from system entropy.
    pub seed: Option<u64>,
    /// Park factor, 50-150 with 100 neutral. Applied at half strength to
    /// hit events only.
    pub park_factor: i32,
    /// Below this sample size a projection substitutes the league
    /// baseline (plate appearances for batters, batters faced for
    /// pitchers).
    pub min_plate_appearances: u32,
    /// Share of strikeouts that are swinging (the rest are looking).
    pub strikeout_swinging_share: f64,
    /// Share of singles that stay on the infield.
    pub infield_single_share: f64,
    /// Groundout / flyout / lineout / popup split of in-play outs.
    /// Must sum to 1.
    pub out_type_distribution: [f64; 4],
    /// Share of in-play outs converted to reached-on-error.
    pub error_rate_on_in_play_out: f64,
    /// Share of groundouts that become double plays when a runner is on
    /// first with fewer than two outs.
    pub gidp_rate: f64,
    /// Share of flyouts that become sacrifice flies when a runner is on
    /// third with fewer than two outs.
    pub sac_fly_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            park_factor: 100,
            min_plate_appearances: 50,
            strikeout_swinging_share: 0.70,
            infield_single_share: 0.15,
            out_type_distribution: [0.44, 0.28, 0.21, 0.07],
            error_rate_on_in_play_out: 0.02,
            gidp_rate: 0.15,
            sac_fly_rate: 0.20,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(50..=150).contains(&self.park_factor) {
            return Err(SimError::InvalidConfiguration {
                option: "park_factor",
                value: f64::from(self.park_factor),
                expected: "50..=150",
            });
        }

        for (option, value) in [
            ("strikeout_swinging_share", self.strikeout_swinging_share),
            ("infield_single_share", self.infield_single_share),
            ("error_rate_on_in_play_out", self.error_rate_on_in_play_out),
            ("gidp_rate", self.gidp_rate),
            ("sac_fly_rate", self.sac_fly_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfiguration {
                    option,
                    value,
                    expected: "[0, 1]",
                });
            }
        }

        let total: f64 = self.out_type_distribution.iter().sum();
        if self.out_type_distribution.iter().any(|share| *share < 0.0)
            || (total - 1.0).abs() > EPSILON
        {
            return Err(SimError::InvalidConfiguration {
                option: "out_type_distribution",
                value: total,
                expected: "non-negative shares summing to 1",
            });
        }
        Ok(())
    }
}

// ========== Tests ==========
