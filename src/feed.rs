// 📡 Match Event Feed
// Scripted start/update/finish events, read from CSV and replayed onto a scoreboard
//
// CSV layout (header required):
//   action,home,away,home_score,away_score
//   start,Mexico,Canada,,
//   update,Mexico,Canada,0,5
//   finish,Mexico,Canada,,

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::ScoreboardError;
use crate::scoreboard::Scoreboard;

// ============================================================================
// EVENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum MatchEvent {
    Start {
        home: String,
        away: String,
    },
    Update {
        home: String,
        away: String,
        home_score: i32,
        away_score: i32,
    },
    Finish {
        home: String,
        away: String,
    },
}

impl MatchEvent {
    /// Forward this event to the matching scoreboard operation
    pub fn apply(&self, scoreboard: &mut Scoreboard) -> crate::errors::Result<()> {
        match self {
            MatchEvent::Start { home, away } => scoreboard.start_match(home, away),
            MatchEvent::Update {
                home,
                away,
                home_score,
                away_score,
            } => scoreboard.update_score(home, away, *home_score, *away_score),
            MatchEvent::Finish { home, away } => scoreboard.finish_match(home, away),
        }
    }
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchEvent::Start { home, away } => write!(f, "start {} vs {}", home, away),
            MatchEvent::Update {
                home,
                away,
                home_score,
                away_score,
            } => write!(f, "update {} {} - {} {}", home, home_score, away, away_score),
            MatchEvent::Finish { home, away } => write!(f, "finish {} vs {}", home, away),
        }
    }
}

// ============================================================================
// CSV PARSING
// ============================================================================

/// One CSV row before it is checked against its action
#[derive(Debug, Deserialize)]
struct EventRow {
    action: String,
    #[serde(default)]
    home: String,
    #[serde(default)]
    away: String,
    #[serde(default)]
    home_score: Option<i32>,
    #[serde(default)]
    away_score: Option<i32>,
}

impl EventRow {
    fn into_event(self, line: usize) -> Result<MatchEvent> {
        let EventRow {
            action,
            home,
            away,
            home_score,
            away_score,
        } = self;

        match action.to_lowercase().as_str() {
            "start" => Ok(MatchEvent::Start { home, away }),
            "finish" => Ok(MatchEvent::Finish { home, away }),
            "update" => match (home_score, away_score) {
                (Some(home_score), Some(away_score)) => Ok(MatchEvent::Update {
                    home,
                    away,
                    home_score,
                    away_score,
                }),
                _ => Err(anyhow!("Line {}: update requires home_score and away_score", line)),
            },
            other => Err(anyhow!("Line {}: unknown action '{}'", line, other)),
        }
    }
}

/// Parse an event script from any reader
pub fn parse_events<R: Read>(reader: R) -> Result<Vec<MatchEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();

    for (index, result) in rdr.deserialize::<EventRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = result.with_context(|| format!("Failed to deserialize event on line {}", line))?;
        events.push(row.into_event(line)?);
    }

    Ok(events)
}

/// Load an event script from a CSV file
pub fn load_events(path: &Path) -> Result<Vec<MatchEvent>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open event file: {:?}", path))?;

    parse_events(file)
}

// ============================================================================
// REPLAY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEvent {
    /// Position in the replayed slice
    pub index: usize,
    pub event: MatchEvent,
    pub error: ScoreboardError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<RejectedEvent>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Apply every event in order
///
/// A rejected event leaves the scoreboard untouched and replay moves on.
pub fn replay(scoreboard: &mut Scoreboard, events: &[MatchEvent]) -> ReplayReport {
    let mut report = ReplayReport::default();

    for (index, event) in events.iter().enumerate() {
        match event.apply(scoreboard) {
            Ok(()) => report.applied += 1,
            Err(error) => {
                warn!(index, %event, %error, "Event rejected");
                report.rejected.push(RejectedEvent {
                    index,
                    event: event.clone(),
                    error,
                });
            }
        }
    }

    info!(
        applied = report.applied,
        rejected = report.rejected.len(),
        "Replay complete"
    );
    report
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::io::Write;

    const SCRIPT: &str = "\
action,home,away,home_score,away_score
start,Mexico,Canada,,
update,Mexico,Canada,0,5
start,Spain,Brazil,,
UPDATE,Spain,Brazil,10,2
";

    #[test]
    fn test_parse_events() {
        let events = parse_events(SCRIPT.as_bytes()).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            MatchEvent::Start {
                home: "Mexico".to_string(),
                away: "Canada".to_string(),
            }
        );
        assert_eq!(
            events[3],
            MatchEvent::Update {
                home: "Spain".to_string(),
                away: "Brazil".to_string(),
                home_score: 10,
                away_score: 2,
            }
        );
    }

    #[test]
    fn test_parse_short_rows() {
        let events = parse_events("action,home,away,home_score,away_score\nfinish,Brazil,Croatia\n".as_bytes()).unwrap();
        assert_eq!(
            events,
            vec![MatchEvent::Finish {
                home: "Brazil".to_string(),
                away: "Croatia".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_update_without_scores_fails() {
        let script = "action,home,away,home_score,away_score\nstart,A,B,,\nupdate,A,B,1,\n";
        let err = parse_events(script.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 3"));
    }

    #[test]
    fn test_parse_unknown_action_fails() {
        let script = "action,home,away,home_score,away_score\npause,A,B,,\n";
        let err = parse_events(script.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown action 'pause'"));
    }

    #[test]
    fn test_parse_non_numeric_score_fails() {
        let script = "action,home,away,home_score,away_score\nupdate,A,B,one,2\n";
        assert!(parse_events(script.as_bytes()).is_err());
    }

    #[test]
    fn test_replay_builds_summary() {
        let events = parse_events(SCRIPT.as_bytes()).unwrap();
        let mut scoreboard = Scoreboard::new();

        let report = replay(&mut scoreboard, &events);

        assert!(report.is_clean());
        assert_eq!(report.applied, 4);
        assert_eq!(
            scoreboard.get_summary(),
            vec!["Spain 10 - Brazil 2", "Mexico 0 - Canada 5"]
        );
    }

    #[test]
    fn test_replay_continues_past_rejected_events() {
        let events = vec![
            MatchEvent::Start {
                home: "Brazil".to_string(),
                away: "Croatia".to_string(),
            },
            MatchEvent::Start {
                home: "Brazil".to_string(),
                away: "Mexico".to_string(),
            },
            MatchEvent::Update {
                home: "Brazil".to_string(),
                away: "Croatia".to_string(),
                home_score: 1,
                away_score: 101,
            },
            MatchEvent::Finish {
                home: "brazil".to_string(),
                away: "CROATIA".to_string(),
            },
        ];
        let mut scoreboard = Scoreboard::new();

        let report = replay(&mut scoreboard, &events);

        assert_eq!(report.applied, 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(report.rejected[0].error.kind(), ErrorKind::TeamBusy);
        assert_eq!(report.rejected[1].error.kind(), ErrorKind::Validation);
        assert!(scoreboard.is_empty());
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_load_events_missing_file() {
        assert!(load_events(Path::new("/nonexistent/events.csv")).is_err());
    }

    #[test]
    fn test_event_display() {
        let event = MatchEvent::Update {
            home: "Mexico".to_string(),
            away: "Canada".to_string(),
            home_score: 0,
            away_score: 5,
        };
        assert_eq!(event.to_string(), "update Mexico 0 - Canada 5");
    }
}
