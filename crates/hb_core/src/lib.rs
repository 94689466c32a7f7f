//! # hb_core - Deterministic Historical Baseball At-Bat Simulation
//!
//! Simulates single plate appearances between any batter-season and
//! pitcher-season in 150 years of historical statistics.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result), with a full
//!   per-draw audit trail for replay and debugging
//! - Odds-ratio matchup model anchored on era-specific league baselines
//! - Chained-binomial outcome resolution that preserves the implicit
//!   in-play-out mass
//! - Base-state-conditioned runner advancement from historical
//!   play-by-play frequencies
//!
//! ## Example
//! ```
//! use hb_core::{BaseState, SimulationConfig, SimulationEngine};
//! # use hb_core::data::{BattingStatLine, PitchingStatLine};
//! # fn stat_lines() -> (BattingStatLine, PitchingStatLine) {
//! #     (
//! #         BattingStatLine {
//! #             player_id: "ruthba01".into(), year: 1927, team_id: "NYA".into(),
//! #             games: 151, at_bats: 540, runs: 158, hits: 192, doubles: 29,
//! #             triples: 8, home_runs: 60, rbi: 164, walks: 137, strikeouts: 89,
//! #             hit_by_pitch: 0, sacrifice_flies: 0,
//! #         },
//! #         PitchingStatLine {
//! #             player_id: "grovele01".into(), year: 1931, team_id: "PHA".into(),
//! #             games: 41, games_started: 30, wins: 31, losses: 4,
//! #             outs_recorded: 866, hits_allowed: 249, runs_allowed: 84,
//! #             earned_runs: 66, home_runs_allowed: 10, doubles_allowed: None,
//! #             triples_allowed: None, walks_allowed: 62, strikeouts: 175,
//! #             hit_batters: 2, batters_faced: 1160,
//! #         },
//! #     )
//! # }
//!
//! let (batter, pitcher) = stat_lines();
//! let config = SimulationConfig {
//!     seed: Some(42),
//!     ..SimulationConfig::default()
//! };
//! let mut engine = SimulationEngine::new(config)?;
//! let result =
//!     engine.simulate_plate_appearance(&batter, &pitcher, 1927, &BaseState::empty(), 0)?;
//! println!("{:?}: {} runs", result.outcome, result.runs_scored());
//! # Ok::<(), hb_core::SimError>(())
//! ```

pub mod data;
pub mod engine;
pub mod error;

pub use data::{BattingStatLine, MemoryRepository, PitchingStatLine, Repository, TeamSeason};
pub use engine::{
    era_of, AtBatContext, AtBatOutcome, AdvancementResult, BaseState, DrawKind, DrawRecord, Era,
    Event, EventRates, LeagueBaselines, PlateAppearanceResult, ProbabilityBreakdown, RateSource,
    SimulationConfig, SimulationEngine, SimulationRng,
};
pub use error::{Result, SimError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
