//! Plate-appearance outcome type.

use serde::{Deserialize, Serialize};

/// Every way a plate appearance can end.
///
/// A closed sum type: the resolver produces exactly one of these per plate
/// appearance, and the categorization flags (`is_hit`, `is_out`, ...) are
/// pure functions over the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatOutcome {
    StrikeoutSwinging,
    StrikeoutLooking,
    Walk,
    HitByPitch,
    /// Outfield single.
    Single,
    InfieldSingle,
    Double,
    Triple,
    HomeRun,
    Groundout,
    Flyout,
    Lineout,
    /// Infield fly.
    Popup,
    FoulOut,
    ReachedOnError,
    GroundIntoDoublePlay,
    SacrificeFly,
}

impl AtBatOutcome {
    /// Hits, for batting-average purposes.
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            AtBatOutcome::Single
                | AtBatOutcome::InfieldSingle
                | AtBatOutcome::Double
                | AtBatOutcome::Triple
                | AtBatOutcome::HomeRun
        )
    }

    /// At least one out is recorded. GIDP records two.
    pub fn is_out(self) -> bool {
        matches!(
            self,
            AtBatOutcome::StrikeoutSwinging
                | AtBatOutcome::StrikeoutLooking
                | AtBatOutcome::Groundout
                | AtBatOutcome::Flyout
                | AtBatOutcome::Lineout
                | AtBatOutcome::Popup
                | AtBatOutcome::FoulOut
                | AtBatOutcome::GroundIntoDoublePlay
                | AtBatOutcome::SacrificeFly
        )
    }

    /// The batter ends up on base.
    pub fn is_on_base(self) -> bool {
        matches!(
            self,
            AtBatOutcome::Single
                | AtBatOutcome::InfieldSingle
                | AtBatOutcome::Double
                | AtBatOutcome::Triple
                | AtBatOutcome::Walk
                | AtBatOutcome::HitByPitch
                | AtBatOutcome::ReachedOnError
        )
    }

    pub fn is_strikeout(self) -> bool {
        matches!(
            self,
            AtBatOutcome::StrikeoutSwinging | AtBatOutcome::StrikeoutLooking
        )
    }

    pub fn is_extra_base_hit(self) -> bool {
        matches!(
            self,
            AtBatOutcome::Double | AtBatOutcome::Triple | AtBatOutcome::HomeRun
        )
    }

    /// Bases the batter gains: 0 for outs, 1 for single/walk/HBP/error,
    /// up to 4 for the home run.
    pub fn bases_gained(self) -> u8 {
        match self {
            AtBatOutcome::Single
            | AtBatOutcome::InfieldSingle
            | AtBatOutcome::Walk
            | AtBatOutcome::HitByPitch
            | AtBatOutcome::ReachedOnError => 1,
            AtBatOutcome::Double => 2,
            AtBatOutcome::Triple => 3,
            AtBatOutcome::HomeRun => 4,
            _ => 0,
        }
    }
}

// ========== Tests ==========
