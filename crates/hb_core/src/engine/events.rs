//! The closed event set and its per-event probability container.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// The seven positive plate-appearance events. Everything not in this set
/// is the implicit in-play out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Strikeout,
    Walk,
    HitByPitch,
    Single,
    Double,
    Triple,
    HomeRun,
}

impl Event {
    pub const ALL: [Event; 7] = [
        Event::Strikeout,
        Event::Walk,
        Event::HitByPitch,
        Event::Single,
        Event::Double,
        Event::Triple,
        Event::HomeRun,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Event::Strikeout => "strikeout",
            Event::Walk => "walk",
            Event::HitByPitch => "hit_by_pitch",
            Event::Single => "single",
            Event::Double => "double",
            Event::Triple => "triple",
            Event::HomeRun => "home_run",
        }
    }
}

/// Per-event probabilities for one plate appearance.
///
/// The sum over all events is at most 1; the residual `1 - sum` is the
/// implicit in-play-out mass. The resolver depends on that residual, so
/// these rates are deliberately NOT normalized to sum to 1. See
/// `normalized()` for the display-only variant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EventRates {
    pub strikeout: f64,
    pub walk: f64,
    pub hit_by_pitch: f64,
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub home_run: f64,
}

impl EventRates {
    pub fn get(&self, event: Event) -> f64 {
        match event {
            Event::Strikeout => self.strikeout,
            Event::Walk => self.walk,
            Event::HitByPitch => self.hit_by_pitch,
            Event::Single => self.single,
            Event::Double => self.double,
            Event::Triple => self.triple,
            Event::HomeRun => self.home_run,
        }
    }

    pub fn set(&mut self, event: Event, value: f64) {
        match event {
            Event::Strikeout => self.strikeout = value,
            Event::Walk => self.walk = value,
            Event::HitByPitch => self.hit_by_pitch = value,
            Event::Single => self.single = value,
            Event::Double => self.double = value,
            Event::Triple => self.triple = value,
            Event::HomeRun => self.home_run = value,
        }
    }

    /// Total positive-event probability.
    pub fn sum(&self) -> f64 {
        Event::ALL.iter().map(|event| self.get(*event)).sum()
    }

    /// Implicit in-play-out mass.
    pub fn out_rate(&self) -> f64 {
        1.0 - self.sum()
    }

    /// Combined probability of any hit.
    pub fn hit_rate(&self) -> f64 {
        self.single + self.double + self.triple + self.home_run
    }

    /// Scale so the events sum to 1. Display and analysis only: feeding
    /// normalized rates to the resolver would erase the in-play-out mass
    /// and silently inflate hit rates.
    pub fn normalized(&self) -> Result<EventRates> {
        let total = self.sum();
        if total <= 0.0 {
            return Err(SimError::InvalidProbabilityInput {
                name: "event_rates_sum",
                value: total,
                expected: "a positive total",
            });
        }
        let mut scaled = *self;
        for event in Event::ALL {
            scaled.set(event, self.get(event) / total);
        }
        Ok(scaled)
    }
}

// ========== Tests ==========
