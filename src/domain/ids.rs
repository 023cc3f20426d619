use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

entity_id!(
    /// Identifier of a board, unique across all boards
    BoardId
);
entity_id!(
    /// Identifier of a list, unique within its board
    ListId
);
entity_id!(
    /// Identifier of an item, unique within its list
    ItemId
);

/// Kind of entity an identifier is minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Board,
    List,
    Item,
}

impl EntityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Item => "item",
        }
    }
}

/// Mints identifiers of the form `<prefix>-<millis>-<sequence>-<session>`.
///
/// The sequence makes ids unique within one generator even inside a single
/// clock tick. The session nonce separates generators that share a store.
#[derive(Debug)]
pub struct IdGenerator {
    session: String,
    sequence: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        let nonce = Uuid::new_v4().simple().to_string();
        Self::with_session(&nonce[..8])
    }

    /// Creates a generator with a fixed session nonce
    pub fn with_session(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            sequence: 0,
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// Generates the next id for the given kind
    pub fn next(&mut self, kind: EntityKind) -> String {
        self.sequence += 1;
        format!(
            "{}-{}-{}-{}",
            kind.prefix(),
            Utc::now().timestamp_millis(),
            self.sequence,
            self.session
        )
    }

    pub fn next_board_id(&mut self) -> BoardId {
        BoardId::new(self.next(EntityKind::Board))
    }

    pub fn next_list_id(&mut self) -> ListId {
        ListId::new(self.next(EntityKind::List))
    }

    pub fn next_item_id(&mut self) -> ItemId {
        ItemId::new(self.next(EntityKind::Item))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
