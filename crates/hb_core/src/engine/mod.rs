//! The at-bat simulation core.
//!
//! Data flows through the modules in pipeline order: `projection` turns
//! seasonal counts into per-PA event rates, `odds_ratio` combines batter
//! and pitcher against the `league` anchor, `at_bat` resolves one outcome
//! through the chained-binomial tree, and `advancement` moves the runners.
//! `sim` is the façade composing all of it over one audited `rng`.

pub mod advancement;
pub mod at_bat;
pub mod base_state;
pub mod config;
pub mod events;
pub mod league;
pub mod odds_ratio;
pub mod outcomes;
pub mod projection;
pub mod rng;
pub mod sim;

pub use advancement::{advance_runners, validate_matrices, AdvancementResult};
pub use at_bat::{resolve_at_bat, AtBatContext, ConditionalProbs};
pub use base_state::BaseState;
pub use config::SimulationConfig;
pub use events::{Event, EventRates};
pub use league::{era_of, Era, LeagueBaselines};
pub use outcomes::AtBatOutcome;
pub use projection::{apply_park_factor, project_batter, project_pitcher, Projection, RateSource};
pub use rng::{DrawKind, DrawRecord, SimulationRng};
pub use sim::{PlateAppearanceResult, ProbabilityBreakdown, SimulationEngine};
