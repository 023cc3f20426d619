//! Snapshot document encoding.
//!
//! The canonical document is `{"version": 1, "boards": [...]}`. Older
//! unversioned documents are still accepted: a bare array of boards (with
//! either `lists`/`items` or `columns`/`cards` naming), and a bare array of
//! lists from the single-board layout, which is wrapped into one board.

use crate::domain::{Board, BoardId, List};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current document version
pub const SNAPSHOT_VERSION: u32 = 1;

pub const LEGACY_BOARD_ID: &str = "legacy-board";
pub const LEGACY_BOARD_TITLE: &str = "My Board";

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    boards: &'a [Board],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Versioned { version: u32, boards: Vec<Board> },
    Boards(Vec<Board>),
    FlatLists(Vec<List>),
}

/// How a decoded document was laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    Versioned,
    BareBoards,
    FlatLists,
}

/// A decoded snapshot along with the shape it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub boards: Vec<Board>,
    pub shape: DocumentShape,
}

impl Decoded {
    /// True when the document was not in the canonical shape
    pub fn migrated(&self) -> bool {
        self.shape != DocumentShape::Versioned
    }
}

/// Serializes all boards into the canonical document
pub fn encode(boards: &[Board]) -> Result<String> {
    let doc = DocumentRef {
        version: SNAPSHOT_VERSION,
        boards,
    };
    Ok(serde_json::to_string(&doc)?)
}

/// Parses a stored document into boards
pub fn decode(text: &str) -> Result<Vec<Board>> {
    decode_document(text).map(|decoded| decoded.boards)
}

/// Parses a stored document, reporting which layout it used
pub fn decode_document(text: &str) -> Result<Decoded> {
    let doc: Document = serde_json::from_str(text)
        .map_err(|e| KanbanError::MalformedSnapshot(e.to_string()))?;

    let decoded = match doc {
        Document::Versioned { version, boards } => {
            if version > SNAPSHOT_VERSION {
                return Err(KanbanError::UnsupportedSnapshotVersion {
                    found: version,
                    supported: SNAPSHOT_VERSION,
                });
            }
            Decoded {
                boards,
                shape: DocumentShape::Versioned,
            }
        }
        Document::Boards(boards) => Decoded {
            boards,
            shape: DocumentShape::BareBoards,
        },
        Document::FlatLists(lists) => Decoded {
            boards: vec![Board {
                id: BoardId::from(LEGACY_BOARD_ID),
                title: LEGACY_BOARD_TITLE.to_string(),
                lists,
            }],
            shape: DocumentShape::FlatLists,
        },
    };

    validate(&decoded.boards)?;
    Ok(decoded)
}

/// Checks id uniqueness at every level of ownership.
///
/// Item ids must be unique across the whole board, since moves carry items
/// between its lists.
fn validate(boards: &[Board]) -> Result<()> {
    let mut board_ids = HashSet::new();
    for board in boards {
        if !board_ids.insert(board.id.as_str()) {
            return Err(KanbanError::MalformedSnapshot(format!(
                "duplicate board id {}",
                board.id
            )));
        }

        let mut list_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for list in &board.lists {
            if !list_ids.insert(list.id.as_str()) {
                return Err(KanbanError::MalformedSnapshot(format!(
                    "duplicate list id {} in board {}",
                    list.id, board.id
                )));
            }

            for item in &list.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(KanbanError::MalformedSnapshot(format!(
                        "duplicate item id {} in board {}",
                        item.id, board.id
                    )));
                }
            }
        }
    }
    Ok(())
}
