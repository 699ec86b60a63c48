// Live Football Scoreboard - Core Library
// Exposes the registry and its collaborators for the CLI and tests

pub mod config;
pub mod entities;
pub mod errors;
pub mod feed;
pub mod scoreboard;

// Re-export commonly used types
pub use config::{ScoreboardConfig, DEFAULT_MAX_SCORE};
pub use entities::{match_key, normalize_team_name, FootballMatch, TeamName, MATCH_KEY_SEPARATOR};
pub use errors::{ErrorKind, Operation, Result, ScoreboardError, ValidationReason};
pub use feed::{load_events, parse_events, replay, MatchEvent, RejectedEvent, ReplayReport};
pub use scoreboard::{Scoreboard, SharedScoreboard, SummaryEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
