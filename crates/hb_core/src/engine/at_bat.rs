//! At-bat resolution: chained binomial decision tree.
//!
//! The odds-ratio stage hands over marginal, unnormalized matchup rates.
//! `ConditionalProbs` converts those marginals into the conditional
//! probability at each branch of a fixed decision tree, and `resolve_at_bat`
//! walks the tree with successive uniform draws. Because every conditional
//! divides by the mass remaining after the branches above it, the tree
//! reproduces the marginal categorical distribution exactly, including the
//! implicit in-play-out residual. This is why the input must never be
//! normalized to sum to 1.
//!
//! The draw order is fixed (HBP, walk, strikeout, home run, hit-in-play,
//! extra-base/triple or infield, then the out-type ladder) so a recorded
//! seed replays to the same outcome.

use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;
use super::events::EventRates;
use super::outcomes::AtBatOutcome;
use super::rng::SimulationRng;

/// Game context the resolver conditions on. It reads, never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtBatContext {
    pub outs: u8,
    pub runner_on_first: bool,
    pub runner_on_third: bool,
}

/// Conditional probability at each branch point of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionalProbs {
    pub hbp: f64,
    pub walk_given_not_hbp: f64,
    pub strikeout_given_no_free_pass: f64,
    pub home_run_given_contact: f64,
    pub hit_given_non_hr_contact: f64,
    pub extra_base_given_hit: f64,
    pub triple_given_extra_base: f64,
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Share of remaining mass, or 0 when the branches above already consumed
/// everything (probability 0 means the branch cannot happen; no division).
fn conditional(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        clamp_unit(numerator / denominator)
    } else {
        0.0
    }
}

impl ConditionalProbs {
    pub fn from_rates(matchup: &EventRates) -> Self {
        let not_hbp = 1.0 - matchup.hit_by_pitch;
        let no_free_pass = not_hbp - matchup.walk;
        let contact = no_free_pass - matchup.strikeout;
        let non_hr_contact = contact - matchup.home_run;
        let non_hr_hits = matchup.single + matchup.double + matchup.triple;
        let extra_base = matchup.double + matchup.triple;

        Self {
            hbp: clamp_unit(matchup.hit_by_pitch),
            walk_given_not_hbp: conditional(matchup.walk, not_hbp),
            strikeout_given_no_free_pass: conditional(matchup.strikeout, no_free_pass),
            home_run_given_contact: conditional(matchup.home_run, contact),
            hit_given_non_hr_contact: conditional(non_hr_hits, non_hr_contact),
            extra_base_given_hit: conditional(extra_base, non_hr_hits),
            triple_given_extra_base: conditional(matchup.triple, extra_base),
        }
    }
}

/// Walk the decision tree and emit exactly one outcome.
pub fn resolve_at_bat(
    cond: &ConditionalProbs,
    rng: &mut SimulationRng,
    ctx: &AtBatContext,
    config: &SimulationConfig,
) -> AtBatOutcome {
    // Free passes first: rarest checked before the rest of the mass.
    if rng.uniform("hbp") < cond.hbp {
        return AtBatOutcome::HitByPitch;
    }
    if rng.uniform("walk") < cond.walk_given_not_hbp {
        return AtBatOutcome::Walk;
    }
    if rng.uniform("strikeout") < cond.strikeout_given_no_free_pass {
        if rng.uniform("strikeout_mode") < config.strikeout_swinging_share {
            return AtBatOutcome::StrikeoutSwinging;
        }
        return AtBatOutcome::StrikeoutLooking;
    }

    // Contact was made.
    if rng.uniform("home_run") < cond.home_run_given_contact {
        return AtBatOutcome::HomeRun;
    }
    if rng.uniform("hit_in_play") < cond.hit_given_non_hr_contact {
        if rng.uniform("extra_base") < cond.extra_base_given_hit {
            if rng.uniform("triple") < cond.triple_given_extra_base {
                return AtBatOutcome::Triple;
            }
            return AtBatOutcome::Double;
        }
        if rng.uniform("infield_single") < config.infield_single_share {
            return AtBatOutcome::InfieldSingle;
        }
        return AtBatOutcome::Single;
    }

    resolve_in_play_out(rng, ctx, config)
}

/// Classify a ball-in-play out: error conversion first, then the out-type
/// split, then the situational double-play / sacrifice-fly upgrades.
fn resolve_in_play_out(
    rng: &mut SimulationRng,
    ctx: &AtBatContext,
    config: &SimulationConfig,
) -> AtBatOutcome {
    if rng.uniform("error") < config.error_rate_on_in_play_out {
        return AtBatOutcome::ReachedOnError;
    }

    let roll = rng.uniform("out_type");
    let [groundout, flyout, lineout, _popup] = config.out_type_distribution;
    let out_type = if roll < groundout {
        AtBatOutcome::Groundout
    } else if roll < groundout + flyout {
        AtBatOutcome::Flyout
    } else if roll < groundout + flyout + lineout {
        AtBatOutcome::Lineout
    } else {
        AtBatOutcome::Popup
    };

    // The situational draws only happen when the situation applies, so
    // ineligible plate appearances consume no extra randomness.
    if out_type == AtBatOutcome::Groundout
        && ctx.runner_on_first
        && ctx.outs < 2
        && rng.uniform("gidp") < config.gidp_rate
    {
        return AtBatOutcome::GroundIntoDoublePlay;
    }
    if out_type == AtBatOutcome::Flyout
        && ctx.runner_on_third
        && ctx.outs < 2
        && rng.uniform("sac_fly") < config.sac_fly_rate
    {
        return AtBatOutcome::SacrificeFly;
    }

    out_type
}

// ========== Tests ==========
