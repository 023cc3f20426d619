//! Positional move engine.
//!
//! A drag gesture arrives already resolved into a [`MoveInstruction`]. The
//! functions here turn the current boards plus one instruction into the new
//! boards without touching any identifier, title, color or description.

use crate::domain::{
    board::{find_board, Board},
    ids::{BoardId, ListId},
};
use crate::error::SkipReason;
use serde::{Deserialize, Serialize};

/// What kind of element is being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// An item between or within lists; parents are list ids
    Item,
    /// A list within its board; both parents are the board id
    List,
}

/// A resolved request to relocate one element of an ordered collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInstruction {
    pub scope: Scope,
    pub source_parent_id: String,
    pub source_index: usize,
    pub dest_parent_id: String,
    pub dest_index: usize,
}

impl MoveInstruction {
    /// Moves an item between (or within) lists
    pub fn item(
        source_list: impl Into<String>,
        source_index: usize,
        dest_list: impl Into<String>,
        dest_index: usize,
    ) -> Self {
        Self {
            scope: Scope::Item,
            source_parent_id: source_list.into(),
            source_index,
            dest_parent_id: dest_list.into(),
            dest_index,
        }
    }

    /// Moves a list within its board
    pub fn list(board: impl Into<String>, source_index: usize, dest_index: usize) -> Self {
        let board = board.into();
        Self {
            scope: Scope::List,
            source_parent_id: board.clone(),
            source_index,
            dest_parent_id: board,
            dest_index,
        }
    }

    /// Dropped back into the exact originating slot
    pub fn is_same_slot(&self) -> bool {
        self.source_parent_id == self.dest_parent_id && self.source_index == self.dest_index
    }
}

/// Splice-out then splice-in within one sequence.
///
/// `dest_index` is interpreted against the already shortened sequence and
/// clamped to its end.
fn relocate<T>(seq: &mut Vec<T>, from: usize, to: usize) -> Result<(), SkipReason> {
    if from >= seq.len() {
        return Err(SkipReason::InvalidIndex);
    }
    let moved = seq.remove(from);
    let to = to.min(seq.len());
    seq.insert(to, moved);
    Ok(())
}

/// Applies one move instruction to a single board.
///
/// Returns the new board, or the reason the instruction was discarded.
pub fn reorder_board(board: &Board, instruction: &MoveInstruction) -> Result<Board, SkipReason> {
    if instruction.is_same_slot() {
        return Err(SkipReason::SamePosition);
    }

    let mut next = board.clone();
    match instruction.scope {
        Scope::List => {
            if board.id != instruction.source_parent_id.as_str()
                || board.id != instruction.dest_parent_id.as_str()
            {
                return Err(SkipReason::NotFound);
            }
            relocate(
                &mut next.lists,
                instruction.source_index,
                instruction.dest_index,
            )?;
        }
        Scope::Item => {
            let source_id = ListId::from(instruction.source_parent_id.as_str());
            let dest_id = ListId::from(instruction.dest_parent_id.as_str());

            let source_pos = next
                .lists
                .iter()
                .position(|list| list.id == source_id)
                .ok_or(SkipReason::NotFound)?;
            let dest_pos = next
                .lists
                .iter()
                .position(|list| list.id == dest_id)
                .ok_or(SkipReason::NotFound)?;

            if source_pos == dest_pos {
                relocate(
                    &mut next.lists[source_pos].items,
                    instruction.source_index,
                    instruction.dest_index,
                )?;
            } else {
                let source_items = &mut next.lists[source_pos].items;
                if instruction.source_index >= source_items.len() {
                    return Err(SkipReason::InvalidIndex);
                }
                let moved = source_items.remove(instruction.source_index);

                let dest_items = &mut next.lists[dest_pos].items;
                let at = instruction.dest_index.min(dest_items.len());
                dest_items.insert(at, moved);
            }
        }
    }

    Ok(next)
}

/// Applies a possibly-absent move instruction to the board with `board_id`.
///
/// `None` means the gesture ended outside any drop target.
pub fn reorder(
    boards: &[Board],
    board_id: &BoardId,
    instruction: Option<&MoveInstruction>,
) -> Result<Vec<Board>, SkipReason> {
    let instruction = instruction.ok_or(SkipReason::NoDestination)?;
    if instruction.is_same_slot() {
        return Err(SkipReason::SamePosition);
    }

    let board = find_board(boards, board_id).ok_or(SkipReason::NotFound)?;
    let moved = reorder_board(board, instruction)?;

    Ok(boards
        .iter()
        .map(|b| if &b.id == board_id { moved.clone() } else { b.clone() })
        .collect())
}
