//! Seeded random source with a full audit trail.
//!
//! Every draw the simulation makes flows through `SimulationRng`, which
//! records kind, value, and context so a game can be replayed bit-for-bit.
//! The generator is pinned to `ChaCha8Rng` seeded through
//! `SeedableRng::seed_from_u64`: the same seed and the same call sequence
//! produce the same stream on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawKind {
    Uniform,
    WeightedChoice,
}

/// One recorded random decision.
///
/// `value` is always the raw uniform variate in [0, 1) consumed from the
/// generator, so the recorded stream alone reproduces the generator's
/// output. For weighted choices, `chosen` carries the selected index and
/// `weights` the caller's weight vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub kind: DrawKind,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    pub context: String,
}

/// Reproducible random source owned by one simulation engine.
///
/// Single-owner by construction: all draw methods take `&mut self`, and the
/// core never shares an instance across threads.
#[derive(Debug, Clone)]
pub struct SimulationRng {
    seed: u64,
    rng: ChaCha8Rng,
    history: Vec<DrawRecord>,
}

impl SimulationRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            history: Vec::new(),
        }
    }

    /// Seed from system entropy. The effective seed is still recorded so
    /// the run stays replayable.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in [0, 1). Never fails.
    pub fn uniform(&mut self, context: &str) -> f64 {
        let value = self.rng.gen::<f64>();
        self.history.push(DrawRecord {
            kind: DrawKind::Uniform,
            value,
            chosen: None,
            weights: None,
            context: context.to_string(),
        });
        value
    }

    /// Weighted choice by inverse-CDF sampling over one uniform draw.
    ///
    /// Weights need not sum to 1; they are normalized internally without
    /// mutating the caller's slice. A non-positive total weight (all zero,
    /// or any negative) is a caller bug and fails.
    pub fn weighted_choice<'a, T>(
        &mut self,
        options: &'a [T],
        weights: &[f64],
        context: &str,
    ) -> Result<&'a T> {
        assert_eq!(
            options.len(),
            weights.len(),
            "weighted_choice: options and weights must have equal length"
        );
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 || weights.iter().any(|w| *w < 0.0) {
            return Err(SimError::EmptyWeightedChoice { total });
        }

        let value = self.rng.gen::<f64>();
        let target = value * total;
        let mut cumulative = 0.0;
        let mut chosen = options.len() - 1;
        for (index, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                chosen = index;
                break;
            }
        }

        self.history.push(DrawRecord {
            kind: DrawKind::WeightedChoice,
            value,
            chosen: Some(chosen),
            weights: Some(weights.to_vec()),
            context: context.to_string(),
        });
        Ok(&options[chosen])
    }

    /// Immutable view of every draw made since construction or reset.
    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Restore the generator to its initial state and clear the history.
    /// With `Some(seed)` the source is re-seeded instead.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.history.clear();
    }

    /// Export the audit history as newline-delimited JSON, one record per
    /// draw.
    pub fn history_ndjson(&self) -> String {
        self.history
            .iter()
            .map(|record| serde_json::to_string(record).expect("draw record serializes"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ========== Tests ==========
