use crate::{
    cache::{BoardCache, PersistedBoard},
    error::Result,
};
use std::cell::RefCell;

/// In-memory cache for tests and embedders without a filesystem.
///
/// Single-threaded like the store itself; the slot uses interior mutability
/// so the cache can be shared behind `&self`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slot: RefCell<Option<PersistedBoard>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardCache for MemoryCache {
    fn save(&self, board: &PersistedBoard) -> Result<()> {
        *self.slot.borrow_mut() = Some(board.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedBoard>> {
        Ok(self.slot.borrow().clone())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}
