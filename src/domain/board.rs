use crate::domain::column::{CategoryOption, Column, ColumnId};
use crate::domain::product::{Product, ProductDraft, ProductId};
use serde::{Deserialize, Serialize};

/// Kanban board state.
///
/// Invariant: the global `products` order IS the display order. A column's
/// top-to-bottom card list is this sequence filtered by `column_id`; there is
/// no per-column order field. Bulk operations must preserve this or visual
/// order will desync from observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub columns: Vec<Column>,
    pub products: Vec<Product>,
    /// Transient id of the product mid-drag; not persisted
    #[serde(skip)]
    pub dragged_product: Option<ProductId>,
}

impl BoardState {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            products: Vec::new(),
            dragged_product: None,
        }
    }

    /// Builds the initial board: one column per category option plus the two
    /// seed products, placed in the first two columns
    pub fn seeded(options: &[CategoryOption]) -> Self {
        let columns: Vec<Column> = options.iter().map(CategoryOption::to_column).collect();

        let mut products = Vec::new();
        if let Some(first) = columns.first() {
            let second = columns.get(1).unwrap_or(first);
            products.push(
                ProductDraft::new(
                    "Mobile App v2.0",
                    "A premium mobile application with advanced features",
                    999.99,
                    "https://api.slingacademy.com/public/sample-products/1.png",
                    first.id.clone(),
                )
                .into_product(ProductId::new(1)),
            );
            products.push(
                ProductDraft::new(
                    "Website Redesign",
                    "A complete overhaul of the company website",
                    1299.99,
                    "https://api.slingacademy.com/public/sample-products/2.png",
                    second.id.clone(),
                )
                .into_product(ProductId::new(2)),
            );
        }

        Self {
            columns,
            products,
            dragged_product: None,
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn product_index(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }

    /// Products assigned to the given column, in display order
    pub fn products_in(&self, column: &ColumnId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| &product.column_id == column)
            .collect()
    }

    /// A product's position within its own column's card list
    pub fn position_in_column(&self, id: ProductId) -> Option<usize> {
        let column = &self.product(id)?.column_id;
        self.products_in(column)
            .iter()
            .position(|product| product.id == id)
    }

    /// Next fresh product id: `max(existing) + 1`, or 1 on an empty board
    pub fn next_product_id(&self) -> ProductId {
        let max = self
            .products
            .iter()
            .map(|product| product.id.value())
            .max()
            .unwrap_or(0);
        ProductId::new(max + 1)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::seeded(&crate::domain::column::default_category_options())
    }
}
