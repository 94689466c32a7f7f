pub mod models;
pub mod repository;

pub use models::{BattingStatLine, PitchingStatLine, TeamSeason};
pub use repository::{MemoryRepository, Repository};
