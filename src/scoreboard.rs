// 🏟️ Scoreboard Registry - Live matches + busy teams
//
// Two collections, always mutated together:
// - matches: normalized match key → FootballMatch, kept in start order
// - active_teams: normalized names of every team currently on the pitch
//
// A team is in active_teams iff it plays in exactly one entry of matches.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::config::ScoreboardConfig;
use crate::entities::football_match::{match_key, normalize_team_name, FootballMatch};
use crate::errors::{Operation, Result, ScoreboardError, ValidationReason};

// ============================================================================
// SUMMARY ENTRY
// ============================================================================

/// One row of the ranked summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub home_team: String,
    pub home_score: u32,
    pub away_team: String,
    pub away_score: u32,
    pub total_score: u32,
}

impl SummaryEntry {
    fn from_match(m: &FootballMatch) -> Self {
        SummaryEntry {
            home_team: m.home_team().to_string(),
            home_score: m.home_score(),
            away_team: m.away_team().to_string(),
            away_score: m.away_score(),
            total_score: m.total_score(),
        }
    }
}

impl std::fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home_team, self.home_score, self.away_team, self.away_score
        )
    }
}

// ============================================================================
// SCOREBOARD
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    config: ScoreboardConfig,

    /// Matches by start order (doubles as insertion order)
    matches: BTreeMap<u64, FootballMatch>,

    /// Normalized match key → start order
    keys: HashMap<String, u64>,

    /// Normalized names of teams currently playing
    active_teams: HashSet<String>,

    /// Next start order to hand out
    next_start_order: u64,
}

impl Scoreboard {
    /// Create an empty scoreboard with the default score ceiling
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoreboardConfig) -> Self {
        Scoreboard {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    /// Start a match at 0 - 0
    ///
    /// Re-starting the exact pairing reports `AlreadyInProgress`, not `TeamBusy`.
    pub fn start_match(&mut self, home_team: &str, away_team: &str) -> Result<()> {
        let key = match_key(home_team, away_team);

        if self.keys.contains_key(&key) {
            warn!(%key, "Rejected start: match already in progress");
            return Err(ScoreboardError::AlreadyInProgress {
                home: home_team.trim().to_string(),
                away: away_team.trim().to_string(),
            });
        }

        for team in [home_team, away_team] {
            if self.is_team_active(team) {
                warn!(%key, team = team.trim(), "Rejected start: team already playing");
                return Err(ScoreboardError::TeamBusy {
                    team: team.trim().to_string(),
                });
            }
        }

        let football_match = FootballMatch::new(home_team, away_team, self.next_start_order)
            .inspect_err(|e| warn!(%key, error = %e, "Rejected start: invalid teams"))?;

        let start_order = football_match.start_order();
        self.next_start_order += 1;

        self.active_teams
            .insert(football_match.home().normalized().to_string());
        self.active_teams
            .insert(football_match.away().normalized().to_string());
        self.keys.insert(key.clone(), start_order);
        self.matches.insert(start_order, football_match);

        debug!(%key, start_order, "Match started");
        Ok(())
    }

    /// Overwrite both scores of an ongoing match
    ///
    /// Both scores are validated before anything is written.
    /// Scores may go down, so mistaken entries can be corrected.
    pub fn update_score(
        &mut self,
        home_team: &str,
        away_team: &str,
        home_score: i32,
        away_score: i32,
    ) -> Result<()> {
        let key = match_key(home_team, away_team);

        let Some(start_order) = self.keys.get(&key).copied() else {
            warn!(%key, "Rejected update: match not found");
            return Err(Self::not_found(Operation::Update, home_team, away_team));
        };

        let (home_score, away_score) = match (
            self.validate_score(home_score),
            self.validate_score(away_score),
        ) {
            (Ok(h), Ok(a)) => (h, a),
            (Err(e), _) | (_, Err(e)) => {
                warn!(%key, error = %e, "Rejected update: invalid score");
                return Err(e);
            }
        };

        if let Some(football_match) = self.matches.get_mut(&start_order) {
            football_match.set_home_score(home_score);
            football_match.set_away_score(away_score);
        }

        debug!(%key, home_score, away_score, "Score updated");
        Ok(())
    }

    /// Remove a match and free both of its teams
    pub fn finish_match(&mut self, home_team: &str, away_team: &str) -> Result<()> {
        let key = match_key(home_team, away_team);

        let Some(start_order) = self.keys.remove(&key) else {
            warn!(%key, "Rejected finish: match not found");
            return Err(Self::not_found(Operation::Finish, home_team, away_team));
        };

        if let Some(football_match) = self.matches.remove(&start_order) {
            self.active_teams.remove(football_match.home().normalized());
            self.active_teams.remove(football_match.away().normalized());
        }

        debug!(%key, "Match finished");
        Ok(())
    }

    /// Ongoing matches ranked by total score, most recently started first on ties
    ///
    /// Recomputed on every call.
    pub fn summary_entries(&self) -> Vec<SummaryEntry> {
        let mut ranked: Vec<(u32, u64, SummaryEntry)> = self
            .matches
            .values()
            .map(|m| (m.total_score(), m.start_order(), SummaryEntry::from_match(m)))
            .collect();

        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        ranked.into_iter().map(|(_, _, entry)| entry).collect()
    }

    /// Summary lines formatted as "<home> <home_score> - <away> <away_score>"
    pub fn get_summary(&self) -> Vec<String> {
        self.summary_entries()
            .iter()
            .map(|entry| entry.to_string())
            .collect()
    }

    // ========================================================================
    // READ-ONLY VIEWS
    // ========================================================================

    /// Copy of one ongoing match, looked up by normalized pairing
    pub fn get_match(&self, home_team: &str, away_team: &str) -> Option<FootballMatch> {
        self.keys
            .get(&match_key(home_team, away_team))
            .and_then(|order| self.matches.get(order))
            .cloned()
    }

    /// Copies of all ongoing matches in the order they started
    pub fn matches(&self) -> Vec<FootballMatch> {
        self.matches.values().cloned().collect()
    }

    /// Normalized names of all teams currently playing
    pub fn active_teams(&self) -> BTreeSet<String> {
        self.active_teams.iter().cloned().collect()
    }

    pub fn is_team_active(&self, team: &str) -> bool {
        self.active_teams.contains(&normalize_team_name(team))
    }

    /// Check a normalized match key such as "brazil_vs_croatia"
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn validate_score(&self, score: i32) -> Result<u32> {
        if score < 0 {
            return Err(ValidationReason::NegativeScore.into());
        }

        let score = score.unsigned_abs();
        if score > self.config.max_score {
            return Err(ValidationReason::UnrealisticScore.into());
        }

        Ok(score)
    }

    fn not_found(operation: Operation, home_team: &str, away_team: &str) -> ScoreboardError {
        ScoreboardError::NotFound {
            operation,
            home: home_team.trim().to_string(),
            away: away_team.trim().to_string(),
        }
    }
}

// ============================================================================
// SHARED SCOREBOARD
// ============================================================================

/// Thread-safe handle to one scoreboard
///
/// Every call holds a single lock for its whole duration, so the match map
/// and the active-team set never disagree.
#[derive(Debug, Clone, Default)]
pub struct SharedScoreboard {
    inner: Arc<Mutex<Scoreboard>>,
}

impl SharedScoreboard {
    pub fn new(scoreboard: Scoreboard) -> Self {
        SharedScoreboard {
            inner: Arc::new(Mutex::new(scoreboard)),
        }
    }

    pub fn start_match(&self, home_team: &str, away_team: &str) -> Result<()> {
        self.lock().start_match(home_team, away_team)
    }

    pub fn update_score(
        &self,
        home_team: &str,
        away_team: &str,
        home_score: i32,
        away_score: i32,
    ) -> Result<()> {
        self.lock()
            .update_score(home_team, away_team, home_score, away_score)
    }

    pub fn finish_match(&self, home_team: &str, away_team: &str) -> Result<()> {
        self.lock().finish_match(home_team, away_team)
    }

    pub fn get_summary(&self) -> Vec<String> {
        self.lock().get_summary()
    }

    pub fn summary_entries(&self) -> Vec<SummaryEntry> {
        self.lock().summary_entries()
    }

    pub fn active_teams(&self) -> BTreeSet<String> {
        self.lock().active_teams()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Scoreboard {
        self.lock().clone()
    }

    // Operations validate before mutating, so a poisoned lock still guards consistent state
    fn lock(&self) -> MutexGuard<'_, Scoreboard> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY TESTS
// ============================================================================
