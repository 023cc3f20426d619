pub mod board;
pub mod ids;
pub mod item;
pub mod palette;
pub mod reorder;

pub use board::{find_board, find_item, find_list, total_item_count, total_list_count, Board, List};
pub use ids::{BoardId, EntityKind, IdGenerator, ItemId, ListId};
pub use item::Item;
pub use reorder::{reorder, reorder_board, MoveInstruction, Scope};
