use crate::domain::ids::ItemId;
use serde::{Deserialize, Serialize};

/// A work card inside a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    /// Creates a new item with an empty description
    pub fn new(id: ItemId, title: String) -> Self {
        Self {
            id,
            title,
            description: String::new(),
        }
    }

    /// Replaces both the title and the description
    pub fn edit(&mut self, title: String, description: String) {
        self.title = title;
        self.description = description;
    }
}
