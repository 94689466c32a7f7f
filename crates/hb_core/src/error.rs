use thiserror::Error;

/// Errors raised by the simulation core.
///
/// All validation happens at construction time or at the entry of
/// `simulate_plate_appearance`, before any random draw, so a failed call
/// never pollutes the audit history. Every variant carries the offending
/// value and the expected range so embedders can handle errors
/// programmatically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid stat line: {field} = {value} ({reason})")]
    InvalidStatLine {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("invalid league baseline ({era}): {event} = {value}, must lie strictly in (0, 1)")]
    InvalidLeagueBaseline {
        era: &'static str,
        event: &'static str,
        value: f64,
    },

    #[error("invalid probability input: {name} = {value}, expected {expected}")]
    InvalidProbabilityInput {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("invalid configuration: {option} = {value}, expected {expected}")]
    InvalidConfiguration {
        option: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("weighted choice requires a positive total weight, got {total}")]
    EmptyWeightedChoice { total: f64 },

    #[error("advancement matrix for {outcome} at {state:?} sums to {sum}, expected 1.0")]
    InvalidAdvancementMatrix {
        outcome: &'static str,
        state: (bool, bool, bool),
        sum: f64,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
