// ⚽ FootballMatch Entity - Fixed pairing + mutable score
//
// "Team names are IDENTITY (never change), the score is a VALUE (changes all game long)"
//
// Each team name is kept twice:
// - display form: trimmed, original casing ("  SOUTH Korea " → "SOUTH Korea")
// - normalized form: trimmed + lowercased ("south korea"), used only for lookups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, ValidationReason};

/// Separator between the two normalized names of a match key
pub const MATCH_KEY_SEPARATOR: &str = "_vs_";

/// Normalize a raw team name for equality checks and set membership
pub fn normalize_team_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Build the lookup key for a pairing
///
/// Example: ("  Japan", "SOUTH Korea  ") → "japan_vs_south korea"
pub fn match_key(home: &str, away: &str) -> String {
    format!(
        "{}{}{}",
        normalize_team_name(home),
        MATCH_KEY_SEPARATOR,
        normalize_team_name(away)
    )
}

// ============================================================================
// TEAM NAME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamName {
    display: String,
    normalized: String,
}

impl TeamName {
    /// Trim and validate a raw team name
    pub fn new(raw: &str) -> Result<Self> {
        let display = raw.trim();
        if display.is_empty() {
            return Err(ValidationReason::EmptyTeamName.into());
        }

        Ok(TeamName {
            display: display.to_string(),
            normalized: display.to_lowercase(),
        })
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

// ============================================================================
// FOOTBALL MATCH
// ============================================================================

/// A match between two teams, owned by a [`crate::Scoreboard`]
///
/// Callers only ever see clones; scores change through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootballMatch {
    /// Stable identity (UUID)
    id: String,

    home: TeamName,
    away: TeamName,

    home_score: u32,
    away_score: u32,

    /// Registry-assigned sequence number, strictly increasing per registry
    start_order: u64,

    /// Wall-clock start time, informational only
    started_at: DateTime<Utc>,
}

impl FootballMatch {
    /// Create a new match at 0 - 0
    ///
    /// Fails when either name is blank or both names are the same
    /// ignoring case and surrounding whitespace.
    pub fn new(raw_home: &str, raw_away: &str, start_order: u64) -> Result<Self> {
        let home = TeamName::new(raw_home)?;
        let away = TeamName::new(raw_away)?;

        if home.normalized() == away.normalized() {
            return Err(ValidationReason::SameTeams.into());
        }

        Ok(FootballMatch {
            id: uuid::Uuid::new_v4().to_string(),
            home,
            away,
            home_score: 0,
            away_score: 0,
            start_order,
            started_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn home_team(&self) -> &str {
        self.home.display()
    }

    pub fn away_team(&self) -> &str {
        self.away.display()
    }

    pub fn home(&self) -> &TeamName {
        &self.home
    }

    pub fn away(&self) -> &TeamName {
        &self.away
    }

    pub fn home_score(&self) -> u32 {
        self.home_score
    }

    pub fn away_score(&self) -> u32 {
        self.away_score
    }

    pub fn start_order(&self) -> u64 {
        self.start_order
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Sum of both scores, the primary summary sort key
    pub fn total_score(&self) -> u32 {
        self.home_score.saturating_add(self.away_score)
    }

    /// Normalized lookup key for this pairing
    pub fn key(&self) -> String {
        format!(
            "{}{}{}",
            self.home.normalized(),
            MATCH_KEY_SEPARATOR,
            self.away.normalized()
        )
    }

    pub(crate) fn set_home_score(&mut self, score: u32) {
        self.home_score = score;
    }

    pub(crate) fn set_away_score(&mut self, score: u32) {
        self.away_score = score;
    }
}

/// Summary line: "<home> <home_score> - <away> <away_score>"
impl fmt::Display for FootballMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home, self.home_score, self.away, self.away_score
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
