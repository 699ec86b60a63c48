// 🚨 Scoreboard Errors
// Every rejected call surfaces one of these; none of them leave the registry modified

use thiserror::Error;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Coarse classification of a [`ScoreboardError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad team name, identical teams, or a score outside the allowed range
    Validation,
    /// The normalized pairing is already on the board
    AlreadyInProgress,
    /// One of the teams is already playing in another match
    TeamBusy,
    /// No active match for the normalized pairing
    NotFound,
}

/// Operation that failed to find its match
///
/// Update and finish report different messages for the same missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Update,
    Finish,
}

// ============================================================================
// SCOREBOARD ERROR
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreboardError {
    #[error("{reason}")]
    Validation { reason: ValidationReason },

    #[error("This match is already in progress")]
    AlreadyInProgress { home: String, away: String },

    #[error("This match can not be initialized since one of the teams is already in the game")]
    TeamBusy { team: String },

    #[error("{}", not_found_message(.operation))]
    NotFound {
        operation: Operation,
        home: String,
        away: String,
    },
}

/// Why a validation failed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("Team name can not be null or empty")]
    EmptyTeamName,

    #[error("Team names can not be the same")]
    SameTeams,

    #[error("Score can not be a negative number")]
    NegativeScore,

    #[error("Score number seems unrealistic, check the score input")]
    UnrealisticScore,
}

fn not_found_message(operation: &Operation) -> &'static str {
    match operation {
        Operation::Update => "Can not update match that doesn't exist",
        Operation::Finish => "Can not finish the match that is not ongoing",
    }
}

impl ScoreboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreboardError::Validation { .. } => ErrorKind::Validation,
            ScoreboardError::AlreadyInProgress { .. } => ErrorKind::AlreadyInProgress,
            ScoreboardError::TeamBusy { .. } => ErrorKind::TeamBusy,
            ScoreboardError::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl From<ValidationReason> for ScoreboardError {
    fn from(reason: ValidationReason) -> Self {
        ScoreboardError::Validation { reason }
    }
}

pub type Result<T> = std::result::Result<T, ScoreboardError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err: ScoreboardError = ValidationReason::EmptyTeamName.into();
        assert_eq!(err.to_string(), "Team name can not be null or empty");
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: ScoreboardError = ValidationReason::UnrealisticScore.into();
        assert_eq!(
            err.to_string(),
            "Score number seems unrealistic, check the score input"
        );
    }

    #[test]
    fn test_not_found_wording_depends_on_operation() {
        let update = ScoreboardError::NotFound {
            operation: Operation::Update,
            home: "Germany".to_string(),
            away: "France".to_string(),
        };
        let finish = ScoreboardError::NotFound {
            operation: Operation::Finish,
            home: "Germany".to_string(),
            away: "France".to_string(),
        };

        assert_eq!(update.to_string(), "Can not update match that doesn't exist");
        assert_eq!(finish.to_string(), "Can not finish the match that is not ongoing");
        assert_eq!(update.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_state_error_kinds() {
        let busy = ScoreboardError::TeamBusy {
            team: "brazil".to_string(),
        };
        assert_eq!(busy.kind(), ErrorKind::TeamBusy);

        let dup = ScoreboardError::AlreadyInProgress {
            home: "Brazil".to_string(),
            away: "Croatia".to_string(),
        };
        assert_eq!(dup.kind(), ErrorKind::AlreadyInProgress);
        assert_eq!(dup.to_string(), "This match is already in progress");
    }
}
