//! Drag interaction controller.
//!
//! Translates the start/over/end/cancel lifecycle of a single gesture into
//! store mutations. Every lookup is soft: an id that no longer resolves
//! silently aborts the step, because a drag must never crash mid-gesture.

use crate::{
    domain::{ColumnId, ProductId},
    store::BoardStore,
};

pub mod reconcile;

/// Identifier of a draggable entity, as classified by the host's drag layer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DraggableId {
    Column(ColumnId),
    Product(ProductId),
}

impl From<ColumnId> for DraggableId {
    fn from(id: ColumnId) -> Self {
        Self::Column(id)
    }
}

impl From<ProductId> for DraggableId {
    fn from(id: ProductId) -> Self {
        Self::Product(id)
    }
}

/// Tracks the active draggable across one gesture and applies the
/// reconciliation policy through the store
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DraggableId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity currently being dragged, if any
    pub fn active(&self) -> Option<&DraggableId> {
        self.active.as_ref()
    }

    /// Drag start: record the entity as active if it resolves in the store.
    /// Idempotent when called again with the same id before an end/cancel.
    pub fn start(&mut self, store: &mut BoardStore, id: DraggableId) {
        let resolves = match &id {
            DraggableId::Column(column) => store.state().column(column).is_some(),
            DraggableId::Product(product) => store.state().product(*product).is_some(),
        };
        if !resolves {
            tracing::debug!(?id, "drag start for unresolvable id ignored");
            return;
        }
        if self.active.as_ref() == Some(&id) {
            return;
        }

        if let DraggableId::Product(product) = &id {
            store.drag_product(Some(*product));
        }
        self.active = Some(id);
    }

    /// Pointer moved over a drop target. Repositions the active product
    /// (same-column array move, cross-column reassignment, or empty-column
    /// drop); column ordering commits on `end` instead.
    pub fn over(&mut self, store: &mut BoardStore, target: DraggableId) {
        let Some(active) = self.active.clone() else {
            return;
        };
        if active == target {
            return;
        }
        let DraggableId::Product(active_product) = active else {
            return;
        };

        match target {
            DraggableId::Product(target_product) => {
                let mut products = store.state().products.clone();
                if reconcile::product_over_product(&mut products, active_product, target_product) {
                    store.set_products(products);
                }
            }
            DraggableId::Column(column) => {
                if store.state().column(&column).is_none() {
                    tracing::debug!(%column, "drag over unresolvable column ignored");
                    return;
                }
                let mut products = store.state().products.clone();
                if reconcile::product_over_column(&mut products, active_product, &column) {
                    store.set_products(products);
                }
            }
        }
    }

    /// Drag end. A `None` target abandons the gesture: state stays as the
    /// last `over` left it, with no rollback. A column dropped on a column
    /// commits the column reorder. Active tracking clears regardless.
    pub fn end(&mut self, store: &mut BoardStore, target: Option<DraggableId>) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let DraggableId::Product(_) = active {
            store.drag_product(None);
        }

        let Some(target) = target else {
            return;
        };
        if active == target {
            return;
        }

        if let (DraggableId::Column(active_column), DraggableId::Column(target_column)) =
            (&active, &target)
        {
            let mut columns = store.state().columns.clone();
            if reconcile::column_over_column(&mut columns, active_column, target_column) {
                store.set_columns(columns);
            }
        }
    }

    /// Drag cancelled: clears active tracking; columns and products are
    /// left untouched
    pub fn cancel(&mut self, store: &mut BoardStore) {
        if let Some(DraggableId::Product(_)) = self.active.take() {
            store.drag_product(None);
        }
    }
}
