//! # Shelfboard Core
//!
//! Core board state and drag-and-drop logic for the Shelfboard product
//! kanban.
//!
//! This crate provides the board state store, the drag interaction
//! controller, the pure reconciliation policy behind reordering, and a
//! versioned persistence cache, without any dependency on specific UI
//! implementations or transports.

pub mod cache;
pub mod domain;
pub mod drag;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use cache::{BoardCache, FileCache, MemoryCache, PersistedBoard, CACHE_VERSION};
pub use domain::{
    board::BoardState,
    column::{CategoryOption, Column, ColumnId, ColumnIdGen, SlugIds, UuidIds},
    product::{Product, ProductDraft, ProductId},
};
pub use drag::{DragController, DraggableId};
pub use error::{Result, ShelfboardError};
pub use store::{BoardStore, SubscriberId};
