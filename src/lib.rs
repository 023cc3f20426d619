//! # Corkboard Core
//!
//! Boards, lists and items with drag-and-drop reordering, persisted as a
//! single snapshot document in a key-value store.
//!
//! This crate holds the state and mutation rules only. Rendering and the
//! translation of pointer gestures into [`MoveInstruction`]s live elsewhere.

pub mod config;
pub mod domain;
pub mod error;
pub mod kanban;
pub mod storage;

// Re-export commonly used types
pub use config::{KanbanConfig, ListTemplate};
pub use domain::{
    board::{Board, List},
    ids::{BoardId, EntityKind, IdGenerator, ItemId, ListId},
    item::Item,
    reorder::{MoveInstruction, Scope},
};
pub use error::{KanbanError, Outcome, Result, SkipReason};
pub use kanban::Kanban;
pub use storage::{KeyValueStore, MemoryStore, SnapshotStore};

#[cfg(feature = "file-storage")]
pub use storage::FileStore;
