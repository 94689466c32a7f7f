//! Simulation engine façade.
//!
//! Composes projection, odds-ratio combination, at-bat resolution, and
//! runner advancement behind a single call. A plate appearance moves
//! through fixed stages (project, combine, resolve, advance) and every
//! stage is deterministic given the inputs and the RNG state, so a seeded
//! engine replays a game bit-for-bit.

use serde::{Deserialize, Serialize};

use super::advancement::{advance_runners, validate_matrices, AdvancementResult};
use super::at_bat::{resolve_at_bat, AtBatContext, ConditionalProbs};
use super::base_state::BaseState;
use super::config::SimulationConfig;
use super::events::EventRates;
use super::league::LeagueBaselines;
use super::odds_ratio::combine_rates;
use super::outcomes::AtBatOutcome;
use super::projection::{apply_park_factor, project_batter, project_pitcher, RateSource};
use super::rng::{DrawRecord, SimulationRng};
use crate::data::models::{BattingStatLine, PitchingStatLine};
use crate::data::repository::Repository;
use crate::error::{Result, SimError};

/// Seasons before professional record-keeping (1871) or far future years
/// are rejected before any draw.
const MIN_YEAR: u16 = 1871;
const MAX_YEAR: u16 = 2050;

/// Every probability that fed one plate appearance, for display and
/// debugging. `matchup` is unnormalized; its residual is the
/// in-play-out mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBreakdown {
    pub batter: EventRates,
    pub pitcher: EventRates,
    pub league: EventRates,
    pub matchup: EventRates,
    pub batter_source: RateSource,
    pub pitcher_source: RateSource,
}

/// Complete result of one simulated plate appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateAppearanceResult {
    pub outcome: AtBatOutcome,
    pub advancement: AdvancementResult,
    pub probabilities: ProbabilityBreakdown,
    /// The draws consumed by this plate appearance, in order.
    pub draws: Vec<DrawRecord>,
}

impl PlateAppearanceResult {
    pub fn runs_scored(&self) -> u8 {
        self.advancement.runs_scored
    }

    pub fn is_hit(&self) -> bool {
        self.outcome.is_hit()
    }

    pub fn is_out(&self) -> bool {
        self.outcome.is_out()
    }
}

/// The simulation engine. Owns the random source; everything else it
/// holds is immutable after construction.
pub struct SimulationEngine {
    rng: SimulationRng,
    baselines: LeagueBaselines,
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Build an engine from configuration. Validates the configuration,
    /// the league tables, and the advancement matrices up front so a
    /// constructed engine cannot fail on table data later.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        validate_matrices()?;
        let rng = match config.seed {
            Some(seed) => SimulationRng::new(seed),
            None => SimulationRng::from_entropy(),
        };
        log::debug!("simulation engine ready, seed {}", rng.seed());
        Ok(Self {
            rng,
            baselines: LeagueBaselines::new()?,
            config,
        })
    }

    /// Replace the league anchors, for calibration runs.
    pub fn with_baselines(mut self, baselines: LeagueBaselines) -> Self {
        self.baselines = baselines;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn rng(&self) -> &SimulationRng {
        &self.rng
    }

    /// Re-seed (or re-run) the random source; clears the audit history.
    pub fn reset_rng(&mut self, seed: Option<u64>) {
        self.rng.reset(seed);
    }

    /// Simulate one plate appearance.
    ///
    /// All input validation happens before the first draw, so a rejected
    /// call leaves the audit history untouched.
    pub fn simulate_plate_appearance(
        &mut self,
        batter: &BattingStatLine,
        pitcher: &PitchingStatLine,
        year: u16,
        prior_base_state: &BaseState,
        prior_outs: u8,
    ) -> Result<PlateAppearanceResult> {
        validate_year(year)?;
        validate_outs(prior_outs)?;
        batter.validate()?;
        pitcher.validate()?;

        let probabilities = self.matchup_breakdown(batter, pitcher, year)?;

        let draws_before = self.rng.history_len();
        let cond = ConditionalProbs::from_rates(&probabilities.matchup);
        let (first, _, third) = prior_base_state.as_tuple();
        let ctx = AtBatContext {
            outs: prior_outs,
            runner_on_first: first,
            runner_on_third: third,
        };

        let outcome = resolve_at_bat(&cond, &mut self.rng, &ctx, &self.config);
        let advancement = advance_runners(prior_base_state, outcome, &mut self.rng)?;
        log::trace!(
            "{} vs {} ({}): {:?}, {} runs",
            batter.player_id,
            pitcher.player_id,
            year,
            outcome,
            advancement.runs_scored
        );

        let draws = self.rng.history()[draws_before..].to_vec();
        Ok(PlateAppearanceResult {
            outcome,
            advancement,
            probabilities,
            draws,
        })
    }

    /// Load both stat lines through the repository seam and simulate.
    /// Returns `Ok(None)` when either player-season is missing.
    pub fn simulate_from_repository(
        &mut self,
        repository: &dyn Repository,
        batter_id: &str,
        pitcher_id: &str,
        year: u16,
        prior_base_state: &BaseState,
        prior_outs: u8,
    ) -> Result<Option<PlateAppearanceResult>> {
        let (Some(batter), Some(pitcher)) = (
            repository.get_batter_season(batter_id, year),
            repository.get_pitcher_season(pitcher_id, year),
        ) else {
            return Ok(None);
        };
        let batter = batter.clone();
        let pitcher = pitcher.clone();
        self.simulate_plate_appearance(&batter, &pitcher, year, prior_base_state, prior_outs)
            .map(Some)
    }

    /// Matchup probabilities without consuming any randomness; the
    /// analysis/display path.
    pub fn expected_rates(
        &self,
        batter: &BattingStatLine,
        pitcher: &PitchingStatLine,
        year: u16,
    ) -> Result<ProbabilityBreakdown> {
        validate_year(year)?;
        batter.validate()?;
        pitcher.validate()?;
        self.matchup_breakdown(batter, pitcher, year)
    }

    fn matchup_breakdown(
        &self,
        batter: &BattingStatLine,
        pitcher: &PitchingStatLine,
        year: u16,
    ) -> Result<ProbabilityBreakdown> {
        let league = *self.baselines.baseline(year);
        let batter_projection =
            project_batter(batter, &league, self.config.min_plate_appearances);
        let pitcher_projection =
            project_pitcher(pitcher, &league, self.config.min_plate_appearances);

        // Park context applies to the batter's hit rates only.
        let batter_rates = apply_park_factor(&batter_projection.rates, self.config.park_factor);

        let matchup = combine_rates(&batter_rates, &pitcher_projection.rates, &league)?;

        Ok(ProbabilityBreakdown {
            batter: batter_rates,
            pitcher: pitcher_projection.rates,
            league,
            matchup,
            batter_source: batter_projection.source,
            pitcher_source: pitcher_projection.source,
        })
    }
}

fn validate_year(year: u16) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(SimError::InvalidConfiguration {
            option: "year",
            value: f64::from(year),
            expected: "1871..=2050",
        });
    }
    Ok(())
}

fn validate_outs(outs: u8) -> Result<()> {
    if outs > 2 {
        return Err(SimError::InvalidConfiguration {
            option: "prior_outs",
            value: f64::from(outs),
            expected: "0..=2",
        });
    }
    Ok(())
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::repository::MemoryRepository;

    fn seeded_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    /// A batter whose rates equal the modern league baseline exactly:
    /// 1000 PA of 200 K, 80 BB, 10 HBP, 150 1B, 45 2B, 5 3B, 30 HR.
    fn league_average_batter() -> BattingStatLine {
        BattingStatLine {
            player_id: "averagejoe".to_string(),
            year: 1999,
            team_id: "AVG".to_string(),
            games: 150,
            at_bats: 910,
            runs: 100,
            hits: 230,
            doubles: 45,
            triples: 5,
            home_runs: 30,
            rbi: 100,
            walks: 80,
            strikeouts: 200,
            hit_by_pitch: 10,
            sacrifice_flies: 0,
        }
    }

    /// A pitcher who allows the modern baseline exactly over 1000 BF.
    fn league_average_pitcher() -> PitchingStatLine {
        PitchingStatLine {
            player_id: "averagearm".to_string(),
            year: 1999,
            team_id: "AVG".to_string(),
            games: 35,
            games_started: 35,
            wins: 12,
            losses: 12,
            outs_recorded: 720,
            hits_allowed: 230,
            runs_allowed: 110,
            earned_runs: 100,
            home_runs_allowed: 30,
            doubles_allowed: Some(45),
            triples_allowed: Some(5),
            walks_allowed: 80,
            strikeouts: 200,
            hit_batters: 10,
            batters_faced: 1000,
        }
    }

    #[test]
    fn test_engine_construction_validates_config() {
        let mut config = SimulationConfig::default();
        config.park_factor = 200;
        assert!(SimulationEngine::new(config).is_err());
    }

    #[test]
    fn test_average_matchup_reproduces_league_rates() {
        let engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let breakdown = engine
            .expected_rates(&league_average_batter(), &league_average_pitcher(), 1999)
            .unwrap();

        assert_eq!(breakdown.batter_source, RateSource::Direct);
        assert_eq!(breakdown.pitcher_source, RateSource::Direct);
        assert!((breakdown.matchup.strikeout - 0.20).abs() < 1e-9);
        assert!((breakdown.matchup.home_run - 0.03).abs() < 1e-9);
        assert!((breakdown.matchup.sum() - 0.52).abs() < 1e-9);
        assert!(breakdown.matchup.out_rate() > 0.0);
    }

    #[test]
    fn test_expected_rates_consume_no_draws() {
        let engine = SimulationEngine::new(seeded_config(42)).unwrap();
        engine
            .expected_rates(&league_average_batter(), &league_average_pitcher(), 1999)
            .unwrap();
        assert_eq!(engine.rng().history_len(), 0);
    }

    #[test]
    fn test_validation_failure_leaves_history_clean() {
        let mut engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let mut bad_batter = league_average_batter();
        bad_batter.hits = 10; // fewer than extra-base hits

        let result = engine.simulate_plate_appearance(
            &bad_batter,
            &league_average_pitcher(),
            1999,
            &BaseState::empty(),
            0,
        );
        assert!(result.is_err());
        assert_eq!(engine.rng().history_len(), 0);
    }

    #[test]
    fn test_out_of_range_year_rejected_before_draws() {
        let mut engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let result = engine.simulate_plate_appearance(
            &league_average_batter(),
            &league_average_pitcher(),
            1492,
            &BaseState::empty(),
            0,
        );
        assert!(result.is_err());
        assert_eq!(engine.rng().history_len(), 0);
    }

    #[test]
    fn test_invalid_outs_rejected() {
        let mut engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let result = engine.simulate_plate_appearance(
            &league_average_batter(),
            &league_average_pitcher(),
            1999,
            &BaseState::empty(),
            3,
        );
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration { option: "prior_outs", .. })
        ));
    }

    #[test]
    fn test_result_carries_the_draw_slice() {
        let mut engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let result = engine
            .simulate_plate_appearance(
                &league_average_batter(),
                &league_average_pitcher(),
                1999,
                &BaseState::empty(),
                0,
            )
            .unwrap();
        assert!(!result.draws.is_empty());
        assert_eq!(result.draws.len(), engine.rng().history_len());
        assert_eq!(result.draws[0].context, "hbp");

        // A second call appends; its slice covers only its own draws.
        let second = engine
            .simulate_plate_appearance(
                &league_average_batter(),
                &league_average_pitcher(),
                1999,
                &BaseState::empty(),
                0,
            )
            .unwrap();
        assert_eq!(
            result.draws.len() + second.draws.len(),
            engine.rng().history_len()
        );
    }

    #[test]
    fn test_identical_seeds_produce_identical_streams() {
        let batter = league_average_batter();
        let pitcher = league_average_pitcher();
        let mut a = SimulationEngine::new(seeded_config(1927)).unwrap();
        let mut b = SimulationEngine::new(seeded_config(1927)).unwrap();

        let mut state_a = BaseState::empty();
        let mut state_b = BaseState::empty();
        for _ in 0..200 {
            let left = a
                .simulate_plate_appearance(&batter, &pitcher, 1999, &state_a, 0)
                .unwrap();
            let right = b
                .simulate_plate_appearance(&batter, &pitcher, 1999, &state_b, 0)
                .unwrap();
            assert_eq!(left, right);
            state_a = left.advancement.new_base_state.clone();
            state_b = right.advancement.new_base_state.clone();
        }
        assert_eq!(a.rng().history(), b.rng().history());
    }

    #[test]
    fn test_reset_rng_replays_the_same_game() {
        let batter = league_average_batter();
        let pitcher = league_average_pitcher();
        let mut engine = SimulationEngine::new(seeded_config(7)).unwrap();

        let first: Vec<AtBatOutcome> = (0..50)
            .map(|_| {
                engine
                    .simulate_plate_appearance(&batter, &pitcher, 1999, &BaseState::empty(), 0)
                    .unwrap()
                    .outcome
            })
            .collect();

        engine.reset_rng(None);
        let second: Vec<AtBatOutcome> = (0..50)
            .map(|_| {
                engine
                    .simulate_plate_appearance(&batter, &pitcher, 1999, &BaseState::empty(), 0)
                    .unwrap()
                    .outcome
            })
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcome_is_a_pure_function_of_recorded_draws() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let batter = league_average_batter();
        let pitcher = league_average_pitcher();
        let mut engine = SimulationEngine::new(seeded_config(31337)).unwrap();
        for _ in 0..25 {
            engine
                .simulate_plate_appearance(&batter, &pitcher, 1999, &BaseState::empty(), 1)
                .unwrap();
        }

        // The recorded values are exactly the raw generator stream: replaying
        // the seed recreates every draw the simulation consumed.
        let mut raw = ChaCha8Rng::seed_from_u64(31337);
        for record in engine.rng().history() {
            assert_eq!(record.value, raw.gen::<f64>());
        }
    }

    #[test]
    fn test_repository_round_trip() {
        let mut repository = MemoryRepository::new();
        repository.insert_batting(league_average_batter());
        repository.insert_pitching(league_average_pitcher());

        let mut engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let result = engine
            .simulate_from_repository(
                &repository,
                "averagejoe",
                "averagearm",
                1999,
                &BaseState::empty(),
                0,
            )
            .unwrap();
        assert!(result.is_some());

        let missing = engine
            .simulate_from_repository(
                &repository,
                "nobody",
                "averagearm",
                1999,
                &BaseState::empty(),
                0,
            )
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_park_factor_inflates_batter_hit_rates() {
        let mut config = seeded_config(42);
        config.park_factor = 120;
        let engine = SimulationEngine::new(config).unwrap();
        let breakdown = engine
            .expected_rates(&league_average_batter(), &league_average_pitcher(), 1999)
            .unwrap();

        // +20 park at half strength: hit rates up 10%, others untouched.
        assert!((breakdown.batter.home_run - 0.03 * 1.10).abs() < 1e-9);
        assert!((breakdown.batter.strikeout - 0.20).abs() < 1e-9);
        assert!(breakdown.matchup.home_run > 0.03);
    }

    #[test]
    fn test_era_selection_follows_year() {
        let engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let mut batter = league_average_batter();
        batter.year = 1915;
        let mut pitcher = league_average_pitcher();
        pitcher.year = 1915;

        let breakdown = engine.expected_rates(&batter, &pitcher, 1915).unwrap();
        assert_eq!(breakdown.league.home_run, 0.005);
    }

    #[test]
    fn test_thin_samples_reported_in_breakdown() {
        let engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let mut thin = league_average_batter();
        thin.at_bats = 20;
        thin.walks = 2;
        thin.hit_by_pitch = 0;
        thin.hits = 5;
        thin.doubles = 1;
        thin.triples = 0;
        thin.home_runs = 1;
        thin.strikeouts = 6;

        let breakdown = engine
            .expected_rates(&thin, &league_average_pitcher(), 1999)
            .unwrap();
        assert_eq!(breakdown.batter_source, RateSource::LeagueBaseline);
        assert_eq!(breakdown.batter, breakdown.league);
    }

    // ----- statistical validation over 5000 seeded plate appearances -----

    struct Tally {
        pa: u32,
        hits: u32,
        walks: u32,
        hbp: u32,
        sac_flies: u32,
        strikeouts: u32,
        home_runs: u32,
    }

    fn run_average_matchup(samples: u32, seed: u64) -> Tally {
        let batter = league_average_batter();
        let pitcher = league_average_pitcher();
        let mut engine = SimulationEngine::new(seeded_config(seed)).unwrap();
        let mut tally = Tally {
            pa: samples,
            hits: 0,
            walks: 0,
            hbp: 0,
            sac_flies: 0,
            strikeouts: 0,
            home_runs: 0,
        };
        for _ in 0..samples {
            let result = engine
                .simulate_plate_appearance(&batter, &pitcher, 1999, &BaseState::empty(), 0)
                .unwrap();
            if result.is_hit() {
                tally.hits += 1;
            }
            match result.outcome {
                AtBatOutcome::Walk => tally.walks += 1,
                AtBatOutcome::HitByPitch => tally.hbp += 1,
                AtBatOutcome::SacrificeFly => tally.sac_flies += 1,
                AtBatOutcome::HomeRun => tally.home_runs += 1,
                outcome if outcome.is_strikeout() => tally.strikeouts += 1,
                _ => {}
            }
        }
        tally
    }

    #[test]
    fn test_batting_average_within_ten_percent_of_expectation() {
        let tally = run_average_matchup(5000, 42);
        let at_bats = tally.pa - tally.walks - tally.hbp - tally.sac_flies;
        let observed = f64::from(tally.hits) / f64::from(at_bats);
        // Matchup hit probability 0.23 against an at-bat share of 0.91.
        let expected = 0.23 / (1.0 - 0.08 - 0.01);
        assert!(
            (observed - expected).abs() < expected * 0.10,
            "observed BA {} vs expected {}",
            observed,
            expected
        );
    }

    #[test]
    fn test_strikeout_rate_within_ten_percent() {
        let tally = run_average_matchup(5000, 42);
        let observed = f64::from(tally.strikeouts) / f64::from(tally.pa);
        assert!((observed - 0.20).abs() < 0.02, "observed K rate {}", observed);
    }

    #[test]
    fn test_home_run_rate_within_one_point() {
        let tally = run_average_matchup(5000, 42);
        let observed = f64::from(tally.home_runs) / f64::from(tally.pa);
        assert!((observed - 0.03).abs() < 0.01, "observed HR rate {}", observed);
    }

    #[test]
    fn test_strikeout_dominance_beats_naive_average() {
        // A 30% strikeout batter against a 25% strikeout pitcher in a 20%
        // league: the odds-ratio matchup sits near 0.36, so the simulated
        // rate must clear the naive midpoint of 0.275.
        let mut batter = league_average_batter();
        batter.strikeouts = 300; // 0.30 per PA over 1000 PA
        let mut pitcher = league_average_pitcher();
        pitcher.strikeouts = 250; // 0.25 per BF over 1000 BF

        let mut engine = SimulationEngine::new(seeded_config(42)).unwrap();
        let expected = engine.expected_rates(&batter, &pitcher, 1999).unwrap();
        assert!(expected.matchup.strikeout > 0.275);

        let samples = 5000u32;
        let mut strikeouts = 0u32;
        for _ in 0..samples {
            let result = engine
                .simulate_plate_appearance(&batter, &pitcher, 1999, &BaseState::empty(), 0)
                .unwrap();
            if result.outcome.is_strikeout() {
                strikeouts += 1;
            }
        }
        let observed = f64::from(strikeouts) / f64::from(samples);
        assert!(observed > 0.275, "observed K rate {}", observed);
    }
}
