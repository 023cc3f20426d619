use crate::domain::{
    ids::{BoardId, ItemId, ListId},
    item::Item,
};
use serde::{Deserialize, Serialize};

/// A work-stage column holding an ordered sequence of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(alias = "cards")]
    pub items: Vec<Item>,
}

impl List {
    pub fn new(id: ListId, title: String, color: Option<String>) -> Self {
        Self {
            id,
            title,
            color,
            items: Vec::new(),
        }
    }

    /// Finds an item by id
    pub fn find_item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn find_item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Removes an item by id, returning it if it was present
    pub fn remove_item(&mut self, id: &ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(pos))
    }
}

/// Kanban board: a titled, ordered sequence of lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(alias = "columns")]
    pub lists: Vec<List>,
}

impl Board {
    pub fn new(id: BoardId, title: String) -> Self {
        Self {
            id,
            title,
            lists: Vec::new(),
        }
    }

    /// Finds a list by id
    pub fn find_list(&self, id: &ListId) -> Option<&List> {
        self.lists.iter().find(|list| &list.id == id)
    }

    pub fn find_list_mut(&mut self, id: &ListId) -> Option<&mut List> {
        self.lists.iter_mut().find(|list| &list.id == id)
    }

    /// Removes a list and all of its items
    pub fn remove_list(&mut self, id: &ListId) -> Option<List> {
        let pos = self.lists.iter().position(|list| &list.id == id)?;
        Some(self.lists.remove(pos))
    }

    /// Number of items across all lists of this board
    pub fn item_count(&self) -> usize {
        self.lists.iter().map(|list| list.items.len()).sum()
    }
}

/// Finds a board by id
pub fn find_board<'a>(boards: &'a [Board], id: &BoardId) -> Option<&'a Board> {
    boards.iter().find(|board| &board.id == id)
}

pub fn find_board_mut<'a>(boards: &'a mut [Board], id: &BoardId) -> Option<&'a mut Board> {
    boards.iter_mut().find(|board| &board.id == id)
}

/// Finds a list inside a board
pub fn find_list<'a>(boards: &'a [Board], board_id: &BoardId, list_id: &ListId) -> Option<&'a List> {
    find_board(boards, board_id)?.find_list(list_id)
}

/// Finds an item inside a list inside a board
pub fn find_item<'a>(
    boards: &'a [Board],
    board_id: &BoardId,
    list_id: &ListId,
    item_id: &ItemId,
) -> Option<&'a Item> {
    find_list(boards, board_id, list_id)?.find_item(item_id)
}

pub fn total_item_count(boards: &[Board]) -> usize {
    boards.iter().map(Board::item_count).sum()
}

pub fn total_list_count(boards: &[Board]) -> usize {
    boards.iter().map(|board| board.lists.len()).sum()
}
