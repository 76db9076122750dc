//! Pure reordering policy behind drag-and-drop.
//!
//! Item order is not stored per column: the global product sequence is the
//! display order, filtered by `column_id`. A cross-column move therefore
//! mutates `column_id` and adjusts the global index in the same step, or the
//! visual order desyncs from what observers read.

use crate::domain::{Column, ColumnId, Product, ProductId};

/// Removes the element at `from` and reinserts it at `to`, preserving the
/// relative order of everything else. Out-of-range indexes saturate.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to.min(items.len()), item);
}

/// Index that lands the moved element immediately before the target once the
/// element has been removed from its old slot
fn insert_before(active_index: usize, target_index: usize) -> usize {
    if active_index < target_index {
        target_index - 1
    } else {
        target_index
    }
}

/// Product dragged over another product.
///
/// Same column: array-move the active product to the target's global index.
/// Different column: reassign `column_id` to the target's column and land
/// just ahead of the target, keeping stable top-to-bottom reading order.
///
/// Returns whether anything changed; unresolvable ids change nothing.
pub fn product_over_product(
    products: &mut Vec<Product>,
    active: ProductId,
    target: ProductId,
) -> bool {
    if active == target {
        return false;
    }
    let Some(active_index) = products.iter().position(|p| p.id == active) else {
        return false;
    };
    let Some(target_index) = products.iter().position(|p| p.id == target) else {
        return false;
    };

    if products[active_index].column_id == products[target_index].column_id {
        array_move(products, active_index, target_index);
    } else {
        products[active_index].column_id = products[target_index].column_id.clone();
        array_move(
            products,
            active_index,
            insert_before(active_index, target_index),
        );
    }
    true
}

/// Product dropped over a column's empty area: reassign only, no reordering
pub fn product_over_column(
    products: &mut [Product],
    active: ProductId,
    column: &ColumnId,
) -> bool {
    let Some(product) = products.iter_mut().find(|p| p.id == active) else {
        return false;
    };
    if &product.column_id == column {
        return false;
    }
    product.column_id = column.clone();
    true
}

/// Column dropped over another column: commit a column-order array move
pub fn column_over_column(columns: &mut Vec<Column>, active: &ColumnId, target: &ColumnId) -> bool {
    if active == target {
        return false;
    }
    let Some(active_index) = columns.iter().position(|c| &c.id == active) else {
        return false;
    };
    let Some(target_index) = columns.iter().position(|c| &c.id == target) else {
        return false;
    };
    array_move(columns, active_index, target_index);
    true
}
