use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Snapshot version {found} is newer than supported version {supported}")]
    UnsupportedSnapshotVersion { found: u32, supported: u32 },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Why a mutation left the state unchanged.
///
/// None of these are failures: stale ids and stray drops are expected when
/// the store can be changed by another view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The gesture was released outside any drop target
    NoDestination,
    /// Dropped back into the slot it came from
    SamePosition,
    /// A board, list or item id did not resolve
    NotFound,
    /// The source index is outside the source collection
    InvalidIndex,
    /// A required title was empty or whitespace
    EmptyInput,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDestination => write!(f, "no destination"),
            Self::SamePosition => write!(f, "same position"),
            Self::NotFound => write!(f, "not found"),
            Self::InvalidIndex => write!(f, "invalid index"),
            Self::EmptyInput => write!(f, "empty input"),
        }
    }
}

/// Result of a mutation that may legitimately do nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Applied(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

impl<T> From<SkipReason> for Outcome<T> {
    fn from(reason: SkipReason) -> Self {
        Self::Skipped(reason)
    }
}
