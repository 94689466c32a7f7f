//! Runner advancement.
//!
//! Hits and walks move runners according to probability matrices keyed by
//! the eight prior occupancy patterns, with row probabilities taken from
//! historical play-by-play frequencies. Home runs, walks, and outs follow
//! fixed rules. Each matrix row lists `(new_state, runs, probability)`
//! options whose probabilities sum to 1; selection goes through the
//! audited weighted choice so replays land on the same branch.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::base_state::BaseState;
use super::outcomes::AtBatOutcome;
use super::rng::SimulationRng;
use crate::error::{Result, SimError};

const ROW_SUM_EPSILON: f64 = 1e-9;

type StateTuple = (bool, bool, bool);

/// One possible advancement for a prior base state.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AdvancementOption {
    to: StateTuple,
    runs: u8,
    probability: f64,
}

const fn option(to: StateTuple, runs: u8, probability: f64) -> AdvancementOption {
    AdvancementOption {
        to,
        runs,
        probability,
    }
}

type AdvancementMatrix = HashMap<StateTuple, Vec<AdvancementOption>>;

/// Single (and reached-on-error, which advances identically). Scoring
/// branches come first in each row so the inverse-CDF draw crosses the
/// score threshold from below.
static SINGLE_ADVANCEMENT: Lazy<AdvancementMatrix> = Lazy::new(|| {
    HashMap::from([
        ((false, false, false), vec![option((true, false, false), 0, 1.0)]),
        (
            (true, false, false),
            vec![
                // Runner stops at second, or takes third on the throw.
                option((true, true, false), 0, 0.736),
                option((true, false, true), 0, 0.264),
            ],
        ),
        (
            (false, true, false),
            vec![
                // Runner on second scores more often than not.
                option((true, false, false), 1, 0.576),
                option((true, false, true), 0, 0.424),
            ],
        ),
        ((false, false, true), vec![option((true, false, false), 1, 1.0)]),
        (
            (true, true, false),
            vec![
                option((true, true, false), 1, 0.35),
                option((true, false, true), 1, 0.25),
                option((true, true, true), 0, 0.40),
            ],
        ),
        (
            (true, false, true),
            vec![
                option((true, true, false), 1, 0.70),
                option((true, false, true), 1, 0.30),
            ],
        ),
        (
            (false, true, true),
            vec![
                option((true, false, false), 2, 0.60),
                option((true, false, true), 1, 0.40),
            ],
        ),
        (
            (true, true, true),
            vec![
                option((true, true, false), 2, 0.35),
                option((true, true, true), 1, 0.45),
                option((true, false, true), 2, 0.20),
            ],
        ),
    ])
});

static DOUBLE_ADVANCEMENT: Lazy<AdvancementMatrix> = Lazy::new(|| {
    HashMap::from([
        ((false, false, false), vec![option((false, true, false), 0, 1.0)]),
        (
            (true, false, false),
            vec![
                option((false, true, false), 1, 0.60),
                option((false, true, true), 0, 0.40),
            ],
        ),
        ((false, true, false), vec![option((false, true, false), 1, 1.0)]),
        ((false, false, true), vec![option((false, true, false), 1, 1.0)]),
        (
            (true, true, false),
            vec![
                option((false, true, false), 2, 0.70),
                option((false, true, true), 1, 0.30),
            ],
        ),
        (
            (true, false, true),
            vec![
                option((false, true, false), 2, 0.85),
                option((false, true, true), 1, 0.15),
            ],
        ),
        ((false, true, true), vec![option((false, true, false), 2, 1.0)]),
        (
            (true, true, true),
            vec![
                option((false, true, false), 3, 0.75),
                option((false, true, true), 2, 0.25),
            ],
        ),
    ])
});

/// Triples clear the bases in front of the batter.
static TRIPLE_ADVANCEMENT: Lazy<AdvancementMatrix> = Lazy::new(|| {
    HashMap::from([
        ((false, false, false), vec![option((false, false, true), 0, 1.0)]),
        ((true, false, false), vec![option((false, false, true), 1, 1.0)]),
        ((false, true, false), vec![option((false, false, true), 1, 1.0)]),
        ((false, false, true), vec![option((false, false, true), 1, 1.0)]),
        ((true, true, false), vec![option((false, false, true), 2, 1.0)]),
        ((true, false, true), vec![option((false, false, true), 2, 1.0)]),
        ((false, true, true), vec![option((false, false, true), 2, 1.0)]),
        ((true, true, true), vec![option((false, false, true), 3, 1.0)]),
    ])
});

/// Walks and HBP force only: a runner moves when every base behind him is
/// occupied, and a run scores only from a bases-loaded force.
static WALK_ADVANCEMENT: Lazy<AdvancementMatrix> = Lazy::new(|| {
    HashMap::from([
        ((false, false, false), vec![option((true, false, false), 0, 1.0)]),
        ((true, false, false), vec![option((true, true, false), 0, 1.0)]),
        ((false, true, false), vec![option((true, true, false), 0, 1.0)]),
        ((false, false, true), vec![option((true, false, true), 0, 1.0)]),
        ((true, true, false), vec![option((true, true, true), 0, 1.0)]),
        ((true, false, true), vec![option((true, true, true), 0, 1.0)]),
        ((false, true, true), vec![option((true, true, true), 0, 1.0)]),
        ((true, true, true), vec![option((true, true, true), 1, 1.0)]),
    ])
});

/// New base state, runs scored, and outs recorded for one plate
/// appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancementResult {
    pub new_base_state: BaseState,
    pub runs_scored: u8,
    pub outs_added: u8,
}

fn matrices() -> [(&'static str, &'static AdvancementMatrix); 4] {
    [
        ("single", &*SINGLE_ADVANCEMENT),
        ("double", &*DOUBLE_ADVANCEMENT),
        ("triple", &*TRIPLE_ADVANCEMENT),
        ("walk", &*WALK_ADVANCEMENT),
    ]
}

/// Initialization-time integrity check: every matrix covers all eight
/// prior states and every row's probabilities sum to 1.
pub fn validate_matrices() -> Result<()> {
    for (name, matrix) in matrices() {
        for first in [false, true] {
            for second in [false, true] {
                for third in [false, true] {
                    let state = (first, second, third);
                    let rows = matrix.get(&state).ok_or(SimError::InvalidAdvancementMatrix {
                        outcome: name,
                        state,
                        sum: 0.0,
                    })?;
                    let sum: f64 = rows.iter().map(|row| row.probability).sum();
                    if (sum - 1.0).abs() > ROW_SUM_EPSILON {
                        return Err(SimError::InvalidAdvancementMatrix {
                            outcome: name,
                            state,
                            sum,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Advance runners for one resolved outcome.
///
/// The prior state is read, never mutated; the result carries a fresh
/// state. Matrix-driven outcomes place synthetic runner ids, since a
/// probability row only describes occupancy.
pub fn advance_runners(
    base_state: &BaseState,
    outcome: AtBatOutcome,
    rng: &mut SimulationRng,
) -> Result<AdvancementResult> {
    // Home run: fixed rule, bases clear, everybody plus the batter scores.
    if outcome == AtBatOutcome::HomeRun {
        return Ok(AdvancementResult {
            new_base_state: BaseState::empty(),
            runs_scored: base_state.count() + 1,
            outs_added: 0,
        });
    }

    // Double play: the runner on first is erased, everyone else holds.
    if outcome == AtBatOutcome::GroundIntoDoublePlay {
        let mut new_state = BaseState::empty();
        if let Some(id) = base_state.second() {
            new_state = new_state.with_second(id);
        }
        if let Some(id) = base_state.third() {
            new_state = new_state.with_third(id);
        }
        return Ok(AdvancementResult {
            new_base_state: new_state,
            runs_scored: 0,
            outs_added: 2,
        });
    }

    // Sacrifice fly: the runner on third trades the out for a run.
    if outcome == AtBatOutcome::SacrificeFly {
        let mut new_state = BaseState::empty();
        if let Some(id) = base_state.first() {
            new_state = new_state.with_first(id);
        }
        if let Some(id) = base_state.second() {
            new_state = new_state.with_second(id);
        }
        return Ok(AdvancementResult {
            new_base_state: new_state,
            runs_scored: 1,
            outs_added: 1,
        });
    }

    let matrix: &AdvancementMatrix = match outcome {
        AtBatOutcome::Single | AtBatOutcome::InfieldSingle | AtBatOutcome::ReachedOnError => {
            &SINGLE_ADVANCEMENT
        }
        AtBatOutcome::Double => &DOUBLE_ADVANCEMENT,
        AtBatOutcome::Triple => &TRIPLE_ADVANCEMENT,
        AtBatOutcome::Walk | AtBatOutcome::HitByPitch => &WALK_ADVANCEMENT,
        _ => {
            // Strikeouts and batted-ball outs leave the bases alone.
            return Ok(AdvancementResult {
                new_base_state: base_state.clone(),
                runs_scored: 0,
                outs_added: 1,
            });
        }
    };

    let rows = &matrix[&base_state.as_tuple()];
    let selected = if rows.len() == 1 {
        // Deterministic rows consume no randomness.
        &rows[0]
    } else {
        let weights: Vec<f64> = rows.iter().map(|row| row.probability).collect();
        rng.weighted_choice(rows, &weights, "advancement")?
    };

    Ok(AdvancementResult {
        new_base_state: BaseState::from_tuple(selected.to),
        runs_scored: selected.runs,
        outs_added: 0,
    })
}

// ========== Tests ==========
