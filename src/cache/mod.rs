use crate::{
    domain::{BoardState, Column, Product},
    error::Result,
};
use serde::{Deserialize, Serialize};

pub mod file_cache;
pub mod memory;

pub use file_cache::FileCache;
pub use memory::MemoryCache;

/// Current schema version of the persisted board.
///
/// There are no migrations: a stored blob with any other version is discarded
/// wholesale and the board is reseeded from defaults.
pub const CACHE_VERSION: u32 = 2;

/// The single keyed blob written on every store mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedBoard {
    pub version: u32,
    pub columns: Vec<Column>,
    pub products: Vec<Product>,
}

impl PersistedBoard {
    /// Snapshots the board for writing. Transient drag tracking is dropped.
    pub fn from_state(state: &BoardState) -> Self {
        Self {
            version: CACHE_VERSION,
            columns: state.columns.clone(),
            products: state.products.clone(),
        }
    }

    pub fn into_state(self) -> BoardState {
        BoardState {
            columns: self.columns,
            products: self.products,
            dragged_product: None,
        }
    }
}

/// Cache trait for persisting the board between sessions.
///
/// Writes are synchronous and fire-and-forget from the store's perspective:
/// a failed save is logged and ignored, and in-memory state stays correct.
pub trait BoardCache {
    /// Writes the full board snapshot, replacing any previous one
    fn save(&self, board: &PersistedBoard) -> Result<()>;

    /// Loads the persisted snapshot, or `None` if nothing has been written
    fn load(&self) -> Result<Option<PersistedBoard>>;

    /// Removes any persisted snapshot
    fn clear(&self) -> Result<()>;
}

impl<C: BoardCache + ?Sized> BoardCache for std::rc::Rc<C> {
    fn save(&self, board: &PersistedBoard) -> Result<()> {
        (**self).save(board)
    }

    fn load(&self) -> Result<Option<PersistedBoard>> {
        (**self).load()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
