// Entity Models
// "Identity persists, values change"
//
// A match's pairing is its identity; its score is a value the registry rewrites.

pub mod football_match;

pub use football_match::{match_key, normalize_team_name, FootballMatch, TeamName, MATCH_KEY_SEPARATOR};
