//! Mutation façade over the persisted board snapshot.
//!
//! Every operation reloads the stored snapshot, applies one change to a copy,
//! writes the copy back and only then publishes it as the in-memory state. A
//! skipped operation publishes the freshly loaded snapshot unchanged, so the
//! published boards always equal what is stored.
//!
//! There is no concurrency check: if another view saves between this view's
//! load and save, the last writer wins.

use crate::{
    config::KanbanConfig,
    domain::{
        board::{self, find_board_mut},
        reorder, Board, BoardId, IdGenerator, Item, ItemId, List, ListId, MoveInstruction,
    },
    error::{Outcome, Result, SkipReason},
    storage::{KeyValueStore, SnapshotStore},
};
use tracing::{debug, info};

type Step<T> = std::result::Result<T, SkipReason>;

fn require_title(title: &str) -> Step<()> {
    if title.trim().is_empty() {
        Err(SkipReason::EmptyInput)
    } else {
        Ok(())
    }
}

fn list_mut<'a>(boards: &'a mut [Board], board_id: &BoardId, list_id: &ListId) -> Step<&'a mut List> {
    find_board_mut(boards, board_id)
        .and_then(|board| board.find_list_mut(list_id))
        .ok_or(SkipReason::NotFound)
}

/// Board workspace bound to one store
pub struct Kanban<S> {
    snapshots: SnapshotStore<S>,
    ids: IdGenerator,
    config: KanbanConfig,
    boards: Vec<Board>,
}

impl<S: KeyValueStore> Kanban<S> {
    /// Opens the workspace, loading whatever snapshot the store holds
    pub fn open(store: S, config: KanbanConfig) -> Result<Self> {
        Self::open_with_ids(store, config, IdGenerator::new())
    }

    pub fn open_with_ids(store: S, config: KanbanConfig, ids: IdGenerator) -> Result<Self> {
        let snapshots = SnapshotStore::new(store, config.storage_key.clone());
        let boards = snapshots.load()?;
        debug!(key = snapshots.key(), boards = boards.len(), "workspace opened");
        Ok(Self {
            snapshots,
            ids,
            config,
            boards,
        })
    }

    /// The published in-memory boards
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn config(&self) -> &KanbanConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.snapshots.inner()
    }

    /// Re-reads the stored snapshot, picking up changes from other views
    pub fn refresh(&mut self) -> Result<&[Board]> {
        self.boards = self.snapshots.load()?;
        Ok(&self.boards)
    }

    pub fn find_board(&self, id: &BoardId) -> Option<&Board> {
        board::find_board(&self.boards, id)
    }

    pub fn find_list(&self, board_id: &BoardId, list_id: &ListId) -> Option<&List> {
        board::find_list(&self.boards, board_id, list_id)
    }

    pub fn find_item(&self, board_id: &BoardId, list_id: &ListId, item_id: &ItemId) -> Option<&Item> {
        board::find_item(&self.boards, board_id, list_id, item_id)
    }

    fn mutate<T>(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&mut Vec<Board>, &mut IdGenerator, &KanbanConfig) -> Step<T>,
    ) -> Result<Outcome<T>> {
        let loaded = self.snapshots.load()?;
        let mut next = loaded.clone();

        match apply(&mut next, &mut self.ids, &self.config) {
            Ok(value) => {
                self.snapshots.save(&next)?;
                self.boards = next;
                debug!(op, "mutation applied");
                Ok(Outcome::Applied(value))
            }
            Err(reason) => {
                self.boards = loaded;
                debug!(op, %reason, "mutation skipped");
                Ok(Outcome::Skipped(reason))
            }
        }
    }

    /// Creates a board with the configured starter lists, appended last.
    ///
    /// A blank title falls back to the configured default title.
    pub fn create_board(&mut self, title: &str) -> Result<Outcome<Board>> {
        let outcome = self.mutate("create_board", |boards, ids, config| {
            let title = if title.trim().is_empty() {
                config.default_board_title.clone()
            } else {
                title.to_string()
            };

            let mut board = Board::new(ids.next_board_id(), title);
            for template in &config.starter_lists {
                board.lists.push(List::new(
                    ids.next_list_id(),
                    template.title.clone(),
                    template.color.clone(),
                ));
            }
            boards.push(board.clone());
            Ok(board)
        })?;

        if let Outcome::Applied(board) = &outcome {
            info!(board_id = %board.id, title = %board.title, "board created");
        }
        Ok(outcome)
    }

    pub fn rename_board(&mut self, board_id: &BoardId, title: &str) -> Result<Outcome<Board>> {
        self.mutate("rename_board", |boards, _, _| {
            let board = find_board_mut(boards, board_id).ok_or(SkipReason::NotFound)?;
            board.title = title.to_string();
            Ok(board.clone())
        })
    }

    /// Deletes a board along with all of its lists and items
    pub fn delete_board(&mut self, board_id: &BoardId) -> Result<Outcome<Board>> {
        let outcome = self.mutate("delete_board", |boards, _, _| {
            let pos = boards
                .iter()
                .position(|board| &board.id == board_id)
                .ok_or(SkipReason::NotFound)?;
            Ok(boards.remove(pos))
        })?;

        if outcome.is_applied() {
            info!(%board_id, "board deleted");
        }
        Ok(outcome)
    }

    /// Appends a new list to the end of a board
    pub fn create_list(
        &mut self,
        board_id: &BoardId,
        title: &str,
        color: Option<&str>,
    ) -> Result<Outcome<List>> {
        self.mutate("create_list", |boards, ids, _| {
            require_title(title)?;
            let board = find_board_mut(boards, board_id).ok_or(SkipReason::NotFound)?;
            let list = List::new(
                ids.next_list_id(),
                title.to_string(),
                color.map(str::to_string),
            );
            board.lists.push(list.clone());
            Ok(list)
        })
    }

    /// Renames a list; `Some(color)` also recolors it, `None` keeps the color
    pub fn rename_list(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        title: &str,
        color: Option<&str>,
    ) -> Result<Outcome<List>> {
        self.mutate("rename_list", |boards, _, _| {
            let list = list_mut(boards, board_id, list_id)?;
            list.title = title.to_string();
            if let Some(color) = color {
                list.color = Some(color.to_string());
            }
            Ok(list.clone())
        })
    }

    /// Removes a list and every item in it
    pub fn delete_list(&mut self, board_id: &BoardId, list_id: &ListId) -> Result<Outcome<List>> {
        self.mutate("delete_list", |boards, _, _| {
            find_board_mut(boards, board_id)
                .and_then(|board| board.remove_list(list_id))
                .ok_or(SkipReason::NotFound)
        })
    }

    /// Appends a new item to the end of a list
    pub fn create_item(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        title: &str,
    ) -> Result<Outcome<Item>> {
        self.mutate("create_item", |boards, ids, _| {
            require_title(title)?;
            let list = list_mut(boards, board_id, list_id)?;
            let item = Item::new(ids.next_item_id(), title.to_string());
            list.items.push(item.clone());
            Ok(item)
        })
    }

    /// Replaces both the title and the description of an item
    pub fn edit_item(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        item_id: &ItemId,
        title: &str,
        description: &str,
    ) -> Result<Outcome<Item>> {
        self.mutate("edit_item", |boards, _, _| {
            let item = list_mut(boards, board_id, list_id)?
                .find_item_mut(item_id)
                .ok_or(SkipReason::NotFound)?;
            item.edit(title.to_string(), description.to_string());
            Ok(item.clone())
        })
    }

    pub fn delete_item(
        &mut self,
        board_id: &BoardId,
        list_id: &ListId,
        item_id: &ItemId,
    ) -> Result<Outcome<Item>> {
        self.mutate("delete_item", |boards, _, _| {
            list_mut(boards, board_id, list_id)?
                .remove_item(item_id)
                .ok_or(SkipReason::NotFound)
        })
    }

    /// Applies a resolved drag gesture to one board.
    ///
    /// `None` is a drop outside any target and changes nothing.
    pub fn move_entity(
        &mut self,
        board_id: &BoardId,
        instruction: Option<&MoveInstruction>,
    ) -> Result<Outcome<()>> {
        self.mutate("move_entity", |boards, _, _| {
            *boards = reorder(boards, board_id, instruction)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::total_item_count;
    use crate::storage::{codec, MemoryStore};

    fn open(store: &MemoryStore) -> Kanban<MemoryStore> {
        Kanban::open(store.clone(), KanbanConfig::default()).unwrap()
    }

    /// Seeds the store with board B1: L1 [c1, c2], L2 []
    fn seeded() -> (MemoryStore, Kanban<MemoryStore>) {
        let mut board = Board::new(BoardId::from("B1"), "Board".to_string());
        let mut l1 = List::new(ListId::from("L1"), "To Do".to_string(), None);
        l1.items.push(Item::new(ItemId::from("c1"), "one".to_string()));
        l1.items.push(Item::new(ItemId::from("c2"), "two".to_string()));
        board.lists.push(l1);
        board
            .lists
            .push(List::new(ListId::from("L2"), "Done".to_string(), None));

        let store = MemoryStore::with_entry("boards", &codec::encode(&[board]).unwrap());
        let kanban = open(&store);
        (store, kanban)
    }

    fn persisted(store: &MemoryStore) -> Vec<Board> {
        SnapshotStore::new(store.clone(), "boards").load().unwrap()
    }

    fn item_ids(kanban: &Kanban<MemoryStore>, list: &str) -> Vec<String> {
        kanban
            .find_list(&BoardId::from("B1"), &ListId::from(list))
            .unwrap()
            .items
            .iter()
            .map(|item| item.id.to_string())
            .collect()
    }

    #[test]
    fn test_open_empty_store() {
        let kanban = open(&MemoryStore::new());
        assert!(kanban.boards().is_empty());
    }

    #[test]
    fn test_open_corrupt_store() {
        let kanban = open(&MemoryStore::with_entry("boards", "not json"));
        assert!(kanban.boards().is_empty());
    }

    #[test]
    fn test_create_board_with_starter_lists() {
        let store = MemoryStore::new();
        let mut kanban = open(&store);

        let board = kanban.create_board("Roadmap").unwrap().applied().unwrap();

        assert_eq!(board.title, "Roadmap");
        let titles: Vec<&str> = board.lists.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(board.lists[0].color.as_deref(), Some("#ef4444"));
        assert_ne!(board.lists[0].id, board.lists[1].id);
        assert_eq!(kanban.boards(), persisted(&store).as_slice());
    }

    #[test]
    fn test_create_board_without_starter_lists() {
        let store = MemoryStore::new();
        let mut kanban = Kanban::open(store, KanbanConfig::without_starter_lists()).unwrap();

        let board = kanban.create_board("  ").unwrap().applied().unwrap();
        assert_eq!(board.title, "Untitled Board");
        assert!(board.lists.is_empty());
    }

    #[test]
    fn test_create_board_appends() {
        let store = MemoryStore::new();
        let mut kanban = open(&store);

        let first = kanban.create_board("A").unwrap().applied().unwrap();
        let second = kanban.create_board("B").unwrap().applied().unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(kanban.boards()[0].id, first.id);
        assert_eq!(kanban.boards()[1].id, second.id);
    }

    #[test]
    fn test_rename_board() {
        let (store, mut kanban) = seeded();
        let b1 = BoardId::from("B1");

        assert!(kanban.rename_board(&b1, "Renamed").unwrap().is_applied());
        assert_eq!(persisted(&store)[0].title, "Renamed");

        let board = kanban.rename_board(&b1, "").unwrap().applied().unwrap();
        assert_eq!(board.title, "");
        assert_eq!(persisted(&store)[0].title, "");
    }

    #[test]
    fn test_delete_board_cascades() {
        let (store, mut kanban) = seeded();

        let removed = kanban
            .delete_board(&BoardId::from("B1"))
            .unwrap()
            .applied()
            .unwrap();

        assert_eq!(removed.item_count(), 2);
        assert!(kanban.boards().is_empty());
        assert!(persisted(&store).is_empty());
    }

    #[test]
    fn test_delete_missing_board_is_noop() {
        let (store, mut kanban) = seeded();
        let before = persisted(&store);

        let outcome = kanban.delete_board(&BoardId::from("nope")).unwrap();

        assert_eq!(outcome.skip_reason(), Some(SkipReason::NotFound));
        assert_eq!(persisted(&store), before);
        assert_eq!(kanban.boards(), before.as_slice());
    }

    #[test]
    fn test_create_list() {
        let (store, mut kanban) = seeded();
        let b1 = BoardId::from("B1");

        let list = kanban
            .create_list(&b1, "Review", Some("#8b5cf6"))
            .unwrap()
            .applied()
            .unwrap();

        let board = kanban.find_board(&b1).unwrap();
        assert_eq!(board.lists.last().unwrap(), &list);
        assert_eq!(list.color.as_deref(), Some("#8b5cf6"));
        assert_eq!(persisted(&store)[0].lists.len(), 3);
    }

    #[test]
    fn test_create_list_rejects_blank_and_unknown_board() {
        let (_, mut kanban) = seeded();

        let outcome = kanban.create_list(&BoardId::from("B1"), " \t", None).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyInput));

        let outcome = kanban.create_list(&BoardId::from("B9"), "X", None).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NotFound));
    }

    #[test]
    fn test_rename_list_keeps_color_when_none() {
        let (_, mut kanban) = seeded();
        let b1 = BoardId::from("B1");
        let l1 = ListId::from("L1");

        kanban.rename_list(&b1, &l1, "Backlog", Some("#3b82f6")).unwrap();
        let list = kanban.rename_list(&b1, &l1, "Later", None).unwrap().applied().unwrap();

        assert_eq!(list.title, "Later");
        assert_eq!(list.color.as_deref(), Some("#3b82f6"));
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn test_delete_list_cascades() {
        let (store, mut kanban) = seeded();
        let b1 = BoardId::from("B1");

        kanban.delete_list(&b1, &ListId::from("L1")).unwrap();

        let board = kanban.find_board(&b1).unwrap();
        assert_eq!(board.lists.len(), 1);
        assert_eq!(board.lists[0].id, "L2");
        assert_eq!(total_item_count(&persisted(&store)), 0);
    }

    #[test]
    fn test_create_item() {
        let (store, mut kanban) = seeded();
        let b1 = BoardId::from("B1");
        let l2 = ListId::from("L2");

        let item = kanban.create_item(&b1, &l2, "Ship it").unwrap().applied().unwrap();

        assert_eq!(item.description, "");
        assert_eq!(item_ids(&kanban, "L2"), vec![item.id.to_string()]);
        assert_eq!(total_item_count(&persisted(&store)), 3);
    }

    #[test]
    fn test_create_item_blank_title_is_noop() {
        let (store, mut kanban) = seeded();
        let before = persisted(&store);

        let outcome = kanban
            .create_item(&BoardId::from("B1"), &ListId::from("L1"), "   ")
            .unwrap();

        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyInput));
        assert_eq!(persisted(&store), before);
    }

    #[test]
    fn test_edit_item() {
        let (store, mut kanban) = seeded();
        let (b1, l1, c2) = (BoardId::from("B1"), ListId::from("L1"), ItemId::from("c2"));

        kanban.edit_item(&b1, &l1, &c2, "Two!", "details").unwrap();

        let item = board::find_item(&persisted(&store), &b1, &l1, &c2).cloned().unwrap();
        assert_eq!(item.title, "Two!");
        assert_eq!(item.description, "details");
        assert_eq!(kanban.find_item(&b1, &l1, &c2), Some(&item));
    }

    #[test]
    fn test_edit_item_with_blank_title_keeps_description() {
        let (store, mut kanban) = seeded();
        let (b1, l1, c1) = (BoardId::from("B1"), ListId::from("L1"), ItemId::from("c1"));

        let outcome = kanban.edit_item(&b1, &l1, &c1, "", "new description").unwrap();

        assert!(outcome.is_applied());
        let item = board::find_item(&persisted(&store), &b1, &l1, &c1).cloned().unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.description, "new description");
    }

    #[test]
    fn test_rename_list_with_blank_title_still_recolors() {
        let (store, mut kanban) = seeded();
        let (b1, l2) = (BoardId::from("B1"), ListId::from("L2"));

        let list = kanban
            .rename_list(&b1, &l2, " ", Some("#ec4899"))
            .unwrap()
            .applied()
            .unwrap();

        assert_eq!(list.title, " ");
        assert_eq!(
            board::find_list(&persisted(&store), &b1, &l2).unwrap().color.as_deref(),
            Some("#ec4899")
        );
    }

    #[test]
    fn test_edit_missing_item() {
        let (_, mut kanban) = seeded();
        let outcome = kanban
            .edit_item(
                &BoardId::from("B1"),
                &ListId::from("L2"),
                &ItemId::from("c1"),
                "x",
                "",
            )
            .unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NotFound));
    }

    #[test]
    fn test_delete_item() {
        let (_, mut kanban) = seeded();

        let removed = kanban
            .delete_item(&BoardId::from("B1"), &ListId::from("L1"), &ItemId::from("c1"))
            .unwrap()
            .applied()
            .unwrap();

        assert_eq!(removed.title, "one");
        assert_eq!(item_ids(&kanban, "L1"), vec!["c2"]);
    }

    #[test]
    fn test_move_across_lists() {
        let (store, mut kanban) = seeded();

        let outcome = kanban
            .move_entity(&BoardId::from("B1"), Some(&MoveInstruction::item("L1", 0, "L2", 0)))
            .unwrap();

        assert!(outcome.is_applied());
        assert_eq!(item_ids(&kanban, "L1"), vec!["c2"]);
        assert_eq!(item_ids(&kanban, "L2"), vec!["c1"]);
        assert_eq!(kanban.boards(), persisted(&store).as_slice());
    }

    #[test]
    fn test_moved_snapshot_survives_reopen() {
        let (store, mut kanban) = seeded();
        let b1 = BoardId::from("B1");

        kanban
            .move_entity(&b1, Some(&MoveInstruction::item("L1", 0, "L2", 0)))
            .unwrap();
        kanban
            .move_entity(&b1, Some(&MoveInstruction::item("L1", 0, "L2", 0)))
            .unwrap();

        let reopened = open(&store);
        assert_eq!(reopened.boards(), kanban.boards());
        assert_eq!(item_ids(&reopened, "L2"), vec!["c2", "c1"]);
    }

    #[test]
    fn test_store_with_item_in_two_lists_is_rejected_on_open() {
        let text = r#"[{"id":"B1","title":"B","lists":[
            {"id":"L1","title":"L1","items":[{"id":"x","title":"x","description":""}]},
            {"id":"L2","title":"L2","items":[{"id":"x","title":"x","description":""}]}
        ]}]"#;
        let kanban = open(&MemoryStore::with_entry("boards", text));
        assert!(kanban.boards().is_empty());
    }

    #[test]
    fn test_move_within_list() {
        let (_, mut kanban) = seeded();

        kanban
            .move_entity(&BoardId::from("B1"), Some(&MoveInstruction::item("L1", 0, "L1", 1)))
            .unwrap();

        assert_eq!(item_ids(&kanban, "L1"), vec!["c2", "c1"]);
    }

    #[test]
    fn test_move_lists() {
        let (_, mut kanban) = seeded();
        let b1 = BoardId::from("B1");

        kanban
            .move_entity(&b1, Some(&MoveInstruction::list("B1", 1, 0)))
            .unwrap();

        let order: Vec<&str> = kanban
            .find_board(&b1)
            .unwrap()
            .lists
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(order, vec!["L2", "L1"]);
    }

    #[test]
    fn test_noop_moves_leave_snapshot_unchanged() {
        let (store, mut kanban) = seeded();
        let b1 = BoardId::from("B1");
        let before = persisted(&store);

        let dropped_outside = kanban.move_entity(&b1, None).unwrap();
        let same_slot = kanban
            .move_entity(&b1, Some(&MoveInstruction::item("L1", 1, "L1", 1)))
            .unwrap();
        let stale = kanban
            .move_entity(&b1, Some(&MoveInstruction::item("L2", 0, "L1", 0)))
            .unwrap();

        assert_eq!(dropped_outside.skip_reason(), Some(SkipReason::NoDestination));
        assert_eq!(same_slot.skip_reason(), Some(SkipReason::SamePosition));
        assert_eq!(stale.skip_reason(), Some(SkipReason::InvalidIndex));
        assert_eq!(persisted(&store), before);
        assert_eq!(kanban.boards(), before.as_slice());
    }

    #[test]
    fn test_mutation_reads_latest_store() {
        let (store, mut first_view) = seeded();
        let mut second_view = open(&store);
        let b1 = BoardId::from("B1");

        second_view.create_item(&b1, &ListId::from("L2"), "from second").unwrap();
        first_view.create_item(&b1, &ListId::from("L1"), "from first").unwrap();

        // The first view loaded before writing, so the second view's item survives
        let stored = persisted(&store);
        assert_eq!(total_item_count(&stored), 4);
        assert_eq!(first_view.boards(), stored.as_slice());
    }

    #[test]
    fn test_refresh_picks_up_external_changes() {
        let (store, mut kanban) = seeded();
        let mut other = open(&store);
        other.delete_board(&BoardId::from("B1")).unwrap();

        assert_eq!(kanban.boards().len(), 1);
        assert!(kanban.refresh().unwrap().is_empty());
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn test_reopen_file_store() {
        use crate::storage::FileStore;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let mut kanban = Kanban::open(FileStore::new(temp_dir.path()), KanbanConfig::default()).unwrap();
        let board = kanban.create_board("Home").unwrap().applied().unwrap();
        let todo = board.lists[0].id.clone();
        kanban.create_item(&board.id, &todo, "Groceries").unwrap();

        let reopened = Kanban::open(FileStore::new(temp_dir.path()), KanbanConfig::default()).unwrap();
        assert_eq!(reopened.boards(), kanban.boards());
        assert_eq!(reopened.find_list(&board.id, &todo).unwrap().items[0].title, "Groceries");
    }

    #[test]
    fn test_legacy_snapshot_rewritten_on_save() {
        let legacy = r#"[{"id":"1","title":"To Do","cards":[{"id":"1","title":"Task 1","description":""}]}]"#;
        let store = MemoryStore::with_entry("boards", legacy);
        let mut kanban = open(&store);

        assert_eq!(kanban.boards()[0].id, codec::LEGACY_BOARD_ID);
        kanban
            .create_item(&BoardId::from(codec::LEGACY_BOARD_ID), &ListId::from("1"), "Task 2")
            .unwrap();

        let text = store.get("boards").unwrap().unwrap();
        assert!(text.starts_with(r#"{"version":1"#));
        assert_eq!(total_item_count(&codec::decode(&text).unwrap()), 2);
    }
}
