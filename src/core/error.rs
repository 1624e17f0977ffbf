use thiserror::Error;

/// Which catalog a failed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Concept,
    Ability,
    Achievement,
    Level,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentKind::Concept => "concept",
            ContentKind::Ability => "ability",
            ContentKind::Achievement => "achievement",
            ContentKind::Level => "level",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// Unknown content id. Always a content-data bug.
    #[error("Unknown {kind} id: {id}")]
    NotFound { kind: ContentKind, id: String },

    #[error("Ability {ability_id} is unavailable ({remaining} turns of cooldown left)")]
    AbilityUnavailable { ability_id: String, remaining: u32 },

    #[error("Invalid progression update: {0}")]
    InvalidProgressionUpdate(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Action rejected by the combat session; the player is re-prompted.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Balance settings that would break the level curve.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn not_found(kind: ContentKind, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True for errors the UI recovers from by re-prompting the player.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::AbilityUnavailable { .. } | EngineError::InvalidAction(_)
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Deserialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
