use crate::{
    cache::{BoardCache, PersistedBoard, CACHE_VERSION},
    domain::{
        BoardState, CategoryOption, Column, ColumnId, ColumnIdGen, Product, ProductDraft,
        ProductId, SlugIds,
    },
};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Handle returned by [`BoardStore::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&BoardState)>;

/// Single source of truth for the board.
///
/// Every mutating operation updates in-memory state, writes the full state to
/// the cache (best-effort), then synchronously notifies subscribers in
/// registration order. There is no batching: each operation is its own atomic
/// notify cycle. Confined to a single thread; mutations never interleave.
pub struct BoardStore {
    state: BoardState,
    seed: BoardState,
    cache: Box<dyn BoardCache>,
    id_gen: Box<dyn ColumnIdGen>,
    /// High-water mark for product ids; never decreases, so ids are not
    /// reused within a session even after the highest product is removed
    next_product: u64,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl BoardStore {
    /// Opens a store with the stock category options and slug column ids,
    /// rehydrating from the cache when a current-version snapshot exists
    pub fn open(cache: impl BoardCache + 'static) -> Self {
        Self::open_with(
            cache,
            &crate::domain::default_category_options(),
            SlugIds,
        )
    }

    /// Opens a store with host-supplied category options and column-id policy
    pub fn open_with(
        cache: impl BoardCache + 'static,
        options: &[CategoryOption],
        id_gen: impl ColumnIdGen + 'static,
    ) -> Self {
        let cache: Box<dyn BoardCache> = Box::new(cache);
        let seed = BoardState::seeded(options);
        let state = Self::rehydrate(cache.as_ref(), &seed);
        let next_product = state.next_product_id().value();

        Self {
            state,
            seed,
            cache,
            id_gen: Box::new(id_gen),
            next_product,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Loads the cached board, falling back to the seed state when the cache
    /// is empty, unreadable, or carries a stale schema version. Schema drift
    /// resolves by full reset; there are no migrations.
    fn rehydrate(cache: &dyn BoardCache, seed: &BoardState) -> BoardState {
        match cache.load() {
            Ok(Some(persisted)) if persisted.version == CACHE_VERSION => persisted.into_state(),
            Ok(Some(persisted)) => {
                tracing::warn!(
                    found = persisted.version,
                    expected = CACHE_VERSION,
                    "discarding persisted board with stale schema version"
                );
                if let Err(err) = cache.clear() {
                    tracing::warn!(%err, "failed to clear stale board cache");
                }
                seed.clone()
            }
            Ok(None) => seed.clone(),
            Err(err) => {
                tracing::warn!(%err, "failed to load board cache; reseeding defaults");
                seed.clone()
            }
        }
    }

    /// Current board snapshot. Observers re-read this after each notification.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Adds a product with a freshly assigned id and returns it.
    /// Always succeeds.
    ///
    /// The id is `max(existing ids) + 1`, floored by the session high-water
    /// mark so removing the highest product does not free its id for reuse.
    pub fn add_product(&mut self, draft: ProductDraft) -> ProductId {
        let id = ProductId::new(
            self.next_product
                .max(self.state.next_product_id().value()),
        );
        self.next_product = id.value() + 1;
        self.state.products.push(draft.into_product(id));
        self.commit();
        id
    }

    /// Adds a column titled `title`, deriving its id from the configured
    /// policy. Returns the new id, or `None` (no-op) for a blank title.
    pub fn add_column(&mut self, title: &str) -> Option<ColumnId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let id = self.id_gen.derive(title);
        self.state.columns.push(Column::new(id.clone(), title));
        self.commit();
        Some(id)
    }

    /// Renames a column. No-op if the id does not resolve.
    pub fn rename_column(&mut self, id: &ColumnId, new_title: &str) {
        let Some(column) = self.state.columns.iter_mut().find(|col| &col.id == id) else {
            return;
        };
        column.title = new_title.to_string();
        self.commit();
    }

    /// Removes a column, reassigning its products to the first remaining
    /// column. On a board left columnless the products keep their dangling
    /// column id until a column exists again. No-op if the id does not
    /// resolve.
    pub fn remove_column(&mut self, id: &ColumnId) {
        let Some(position) = self.state.column_index(id) else {
            return;
        };
        self.state.columns.remove(position);

        if let Some(fallback) = self.state.columns.first().map(|col| col.id.clone()) {
            for product in self
                .state
                .products
                .iter_mut()
                .filter(|product| &product.column_id == id)
            {
                product.column_id = fallback.clone();
            }
        }
        self.commit();
    }

    /// Removes a product. No-op if the id does not resolve.
    pub fn remove_product(&mut self, id: ProductId) {
        let Some(position) = self.state.product_index(id) else {
            return;
        };
        self.state.products.remove(position);
        self.commit();
    }

    /// Bulk-replaces the column sequence. Used by drag reconciliation after
    /// computing a new arrangement; callers are trusted to preserve
    /// referential integrity.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.state.columns = columns;
        self.commit();
    }

    /// Bulk-replaces the product sequence. The new global order becomes the
    /// display order.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.state.products = products;
        self.commit();
    }

    /// Tracks (or clears) the product currently mid-drag
    pub fn drag_product(&mut self, id: Option<ProductId>) {
        self.state.dragged_product = id;
        self.commit();
    }

    /// Restores the seed state and clears the persisted cache
    pub fn reset(&mut self) {
        self.state = self.seed.clone();
        self.next_product = self.seed.next_product_id().value();
        if let Err(err) = self.cache.clear() {
            tracing::warn!(%err, "failed to clear board cache during reset");
        }
        self.commit();
    }

    /// Registers an observer invoked after every mutation. Notification order
    /// is registration order.
    pub fn subscribe(&mut self, callback: impl Fn(&BoardState) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered observer. No-op for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Persists the current state (best-effort) and notifies subscribers
    fn commit(&mut self) {
        let snapshot = PersistedBoard::from_state(&self.state);
        if let Err(err) = self.cache.save(&snapshot) {
            tracing::warn!(%err, "board cache write failed; continuing with in-memory state");
        }
        self.notify();
    }

    /// A panicking subscriber must not prevent the remaining subscribers
    /// from running
    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            if catch_unwind(AssertUnwindSafe(|| callback(&self.state))).is_err() {
                tracing::warn!("board subscriber panicked during notification");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> BoardStore {
        BoardStore::open(MemoryCache::new())
    }

    fn column_id(store: &BoardStore, index: usize) -> ColumnId {
        store.state().columns[index].id.clone()
    }

    fn draft(name: &str, column: &ColumnId) -> ProductDraft {
        ProductDraft::new(name, "", 10.0, "", column.clone())
    }

    #[test]
    fn test_open_seeds_defaults() {
        let store = store();
        assert_eq!(store.state().columns.len(), 8);
        assert_eq!(store.state().products.len(), 2);
    }

    #[test]
    fn test_add_product_assigns_next_id() {
        let mut store = store();
        let column = column_id(&store, 0);

        // Seed board's max id is 2
        let id = store.add_product(draft("X", &column));
        assert_eq!(id, ProductId::new(3));
    }

    #[test]
    fn test_product_ids_are_monotonic_and_never_reused() {
        let mut store = store();
        let column = column_id(&store, 0);

        let a = store.add_product(draft("A", &column));
        let b = store.add_product(draft("B", &column));
        assert!(b > a);

        // Removing the highest id must not free it for reuse
        store.remove_product(b);
        let c = store.add_product(draft("C", &column));
        assert!(c > b);
    }

    #[test]
    fn test_add_product_on_empty_board_starts_at_one() {
        let mut store = BoardStore::open_with(MemoryCache::new(), &[], SlugIds);
        assert!(store.state().products.is_empty());

        let id = store.add_product(draft("X", &ColumnId::from("A")));
        assert_eq!(id, ProductId::new(1));
    }

    #[test]
    fn test_add_column_derives_slug_id() {
        let mut store = store();
        let id = store.add_column("Beauty Tools").unwrap();
        assert_eq!(id.as_str(), "BEAUTY_TOOLS");
        assert_eq!(store.state().columns.last().unwrap().title, "Beauty Tools");
    }

    #[test]
    fn test_add_column_rejects_blank_title() {
        let mut store = store();
        let before = store.state().columns.len();

        assert!(store.add_column("").is_none());
        assert!(store.add_column("   ").is_none());
        assert_eq!(store.state().columns.len(), before);
    }

    #[test]
    fn test_rename_column() {
        let mut store = store();
        let id = column_id(&store, 0);

        store.rename_column(&id, "Gadgets");
        assert_eq!(store.state().column(&id).unwrap().title, "Gadgets");
    }

    #[test]
    fn test_rename_unknown_column_is_noop() {
        let mut store = store();
        let before = store.state().clone();

        store.rename_column(&ColumnId::from("NOPE"), "Gadgets");
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_remove_column_reassigns_products_to_first_remaining() {
        let mut store = BoardStore::open_with(
            MemoryCache::new(),
            &[CategoryOption::new("A", "A"), CategoryOption::new("B", "B")],
            SlugIds,
        );
        let b = ColumnId::from("B");

        store.remove_column(&b);

        assert!(store.state().column(&b).is_none());
        assert!(store
            .state()
            .products
            .iter()
            .all(|product| product.column_id.as_str() == "A"));
    }

    #[test]
    fn test_remove_last_column_leaves_products_dangling() {
        let mut store = BoardStore::open_with(
            MemoryCache::new(),
            &[CategoryOption::new("A", "A")],
            SlugIds,
        );

        store.remove_column(&ColumnId::from("A"));

        assert!(store.state().columns.is_empty());
        // Documented exception: no fallback column exists, ids dangle
        assert!(store
            .state()
            .products
            .iter()
            .all(|product| product.column_id.as_str() == "A"));
    }

    #[test]
    fn test_remove_unknown_column_is_noop() {
        let mut store = store();
        let before = store.state().clone();

        store.remove_column(&ColumnId::from("NOPE"));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_remove_product() {
        let mut store = store();
        store.remove_product(ProductId::new(1));
        assert!(store.state().product(ProductId::new(1)).is_none());
        assert_eq!(store.state().products.len(), 1);

        let before = store.state().clone();
        store.remove_product(ProductId::new(99));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_reset_restores_seed_and_clears_drag() {
        let mut store = store();
        let column = column_id(&store, 0);

        store.add_product(draft("X", &column));
        store.add_column("Extra");
        store.drag_product(Some(ProductId::new(1)));

        store.reset();

        assert_eq!(store.state().columns.len(), 8);
        assert_eq!(store.state().products.len(), 2);
        assert!(store.state().dragged_product.is_none());
    }

    #[test]
    fn test_state_survives_reopen() {
        let cache = Rc::new(MemoryCache::new());

        let mut store = BoardStore::open(Rc::clone(&cache));
        let column = column_id(&store, 0);
        let id = store.add_product(draft("Persisted", &column));

        let reopened = BoardStore::open(cache);
        let product = reopened.state().product(id).unwrap();
        assert_eq!(product.name, "Persisted");
    }

    #[test]
    fn test_stale_cache_version_triggers_full_reset() {
        let cache = Rc::new(MemoryCache::new());

        let mut snapshot = PersistedBoard::from_state(&BoardState::default());
        snapshot.version = CACHE_VERSION - 1;
        snapshot.columns.clear();
        cache.save(&snapshot).unwrap();

        let store = BoardStore::open(Rc::clone(&cache));
        assert_eq!(store.state().columns.len(), 8);
    }

    #[test]
    fn test_subscribers_notified_in_registration_order() {
        let mut store = store();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        store.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        store.subscribe(move |_| second.borrow_mut().push("second"));

        store.add_column("Extra");
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_subscriber_sees_post_mutation_snapshot() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&seen);
        store.subscribe(move |state| *counter.borrow_mut() = state.products.len());

        let column = column_id(&store, 0);
        store.add_product(draft("X", &column));
        assert_eq!(*seen.borrow(), 3);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.add_column("One");
        store.unsubscribe(id);
        store.add_column("Two");

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_panicking_subscriber_does_not_block_others() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));

        store.subscribe(|_| panic!("subscriber failure"));
        let counter = Rc::clone(&count);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.add_column("Extra");
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_every_mutation_is_its_own_notify_cycle() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        let column = column_id(&store, 0);
        store.add_product(draft("X", &column));
        store.rename_column(&column, "Renamed");
        store.drag_product(None);

        assert_eq!(*count.borrow(), 3);
    }
}
