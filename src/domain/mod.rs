pub mod board;
pub mod column;
pub mod product;

pub use board::BoardState;
pub use column::{
    default_category_options, CategoryOption, Column, ColumnId, ColumnIdGen, SlugIds, UuidIds,
};
pub use product::{format_usd, Product, ProductDraft, ProductId};
