use crate::domain::palette;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A list every new board starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTemplate {
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl ListTemplate {
    pub fn new(title: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            title: title.into(),
            color: color.map(str::to_string),
        }
    }
}

/// Settings for a kanban workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// Key the snapshot is stored under
    pub storage_key: String,
    /// Title used when a board is created with a blank title
    pub default_board_title: String,
    /// Lists added to every new board, in order. Empty means boards start bare.
    pub starter_lists: Vec<ListTemplate>,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            storage_key: "boards".to_string(),
            default_board_title: "Untitled Board".to_string(),
            starter_lists: vec![
                ListTemplate::new("To Do", Some(palette::RED)),
                ListTemplate::new("In Progress", Some(palette::YELLOW)),
                ListTemplate::new("Done", Some(palette::GREEN)),
            ],
        }
    }
}

impl KanbanConfig {
    /// Config whose boards start with no lists
    pub fn without_starter_lists() -> Self {
        Self {
            starter_lists: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| KanbanError::ConfigError(e.to_string()))?;
        if config.storage_key.trim().is_empty() {
            return Err(KanbanError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads the config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }
}
