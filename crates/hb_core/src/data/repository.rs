//! Repository seam for historical statistics.
//!
//! The core consumes seasonal stats through this narrow read-only
//! interface; persistent storage, CSV parsing, and caching policy belong to
//! the embedding application. `MemoryRepository` is the in-process
//! implementation used by tests and headless runs.

use std::collections::HashMap;

use super::models::{BattingStatLine, PitchingStatLine, TeamSeason};

/// Read-only access to seasonal batting, pitching, and team records.
///
/// Repeated queries for the same key must return the same values; results
/// are immutable for a game's duration.
pub trait Repository {
    fn get_batter_season(&self, player_id: &str, year: u16) -> Option<&BattingStatLine>;

    fn get_pitcher_season(&self, player_id: &str, year: u16) -> Option<&PitchingStatLine>;

    fn get_team_roster(&self, team_id: &str, year: u16) -> Vec<String>;

    /// Park factor for a team-season; 100 (neutral) when unknown.
    fn get_team_park_factor(&self, team_id: &str, year: u16) -> i32;
}

/// In-memory repository backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    batting: HashMap<(String, u16), BattingStatLine>,
    pitching: HashMap<(String, u16), PitchingStatLine>,
    teams: HashMap<(String, u16), TeamSeason>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_batting(&mut self, line: BattingStatLine) {
        self.batting.insert((line.player_id.clone(), line.year), line);
    }

    pub fn insert_pitching(&mut self, line: PitchingStatLine) {
        self.pitching.insert((line.player_id.clone(), line.year), line);
    }

    pub fn insert_team(&mut self, team: TeamSeason) {
        self.teams.insert((team.team_id.clone(), team.year), team);
    }
}

impl Repository for MemoryRepository {
    fn get_batter_season(&self, player_id: &str, year: u16) -> Option<&BattingStatLine> {
        self.batting.get(&(player_id.to_string(), year))
    }

    fn get_pitcher_season(&self, player_id: &str, year: u16) -> Option<&PitchingStatLine> {
        self.pitching.get(&(player_id.to_string(), year))
    }

    fn get_team_roster(&self, team_id: &str, year: u16) -> Vec<String> {
        let mut roster: Vec<String> = self
            .batting
            .values()
            .filter(|line| line.team_id == team_id && line.year == year)
            .map(|line| line.player_id.clone())
            .chain(
                self.pitching
                    .values()
                    .filter(|line| line.team_id == team_id && line.year == year)
                    .map(|line| line.player_id.clone()),
            )
            .collect();
        roster.sort();
        roster.dedup();
        roster
    }

    fn get_team_park_factor(&self, team_id: &str, year: u16) -> i32 {
        self.teams
            .get(&(team_id.to_string(), year))
            .map(|team| team.park_factor)
            .unwrap_or(100)
    }
}

// ========== Tests ==========
