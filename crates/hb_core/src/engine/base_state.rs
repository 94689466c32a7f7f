//! Base-occupancy value type.

use serde::{Deserialize, Serialize};

/// Which bases hold a runner. Exactly eight occupancy patterns exist.
///
/// Instances are immutable values: each plate appearance produces a new
/// state rather than mutating the prior one, which keeps scenarios
/// trivially replayable. Runner identities are carried where known;
/// synthetic `R1`/`R2`/`R3` placeholders stand in when only occupancy
/// matters (as in the advancement matrices).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseState {
    first: Option<String>,
    second: Option<String>,
    third: Option<String>,
}

impl BaseState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_first(mut self, runner: impl Into<String>) -> Self {
        self.first = Some(runner.into());
        self
    }

    pub fn with_second(mut self, runner: impl Into<String>) -> Self {
        self.second = Some(runner.into());
        self
    }

    pub fn with_third(mut self, runner: impl Into<String>) -> Self {
        self.third = Some(runner.into());
        self
    }

    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    pub fn second(&self) -> Option<&str> {
        self.second.as_deref()
    }

    pub fn third(&self) -> Option<&str> {
        self.third.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }

    /// Number of runners on base (0-3).
    pub fn count(&self) -> u8 {
        u8::from(self.first.is_some())
            + u8::from(self.second.is_some())
            + u8::from(self.third.is_some())
    }

    /// Occupancy tuple for advancement-matrix lookup.
    pub fn as_tuple(&self) -> (bool, bool, bool) {
        (
            self.first.is_some(),
            self.second.is_some(),
            self.third.is_some(),
        )
    }

    /// Build a state from an occupancy tuple with synthetic runner ids.
    pub fn from_tuple(occupied: (bool, bool, bool)) -> Self {
        Self {
            first: occupied.0.then(|| "R1".to_string()),
            second: occupied.1.then(|| "R2".to_string()),
            third: occupied.2.then(|| "R3".to_string()),
        }
    }

    /// Runner ids in base order, first to third.
    pub fn runner_ids(&self) -> Vec<&str> {
        [&self.first, &self.second, &self.third]
            .into_iter()
            .filter_map(|base| base.as_deref())
            .collect()
    }
}

// ========== Tests ==========
