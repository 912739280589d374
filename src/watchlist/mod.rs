use crate::models::{EditSession, WatchItem, WatchlistStats};
use crate::storage::LocalStore;

/// The watchlist store: sole owner of the in-memory collection
///
/// Every mutation updates memory first, then persists the full snapshot
/// through [`LocalStore`] as a best-effort side effect. Callers only ever
/// see read-only views; mutations go through the intent methods below.
///
/// Mutations on ids that are no longer present are silent no-ops: the store
/// is forgiving of stale references (a double-click on a just-removed item
/// must not error). Nothing in here can fail the session.
#[derive(Debug)]
pub struct Watchlist {
    items: Vec<WatchItem>,
    editing: Option<EditSession>,
    next_id: u64,
    store: LocalStore,
}

impl Watchlist {
    /// Restores the watchlist from durable storage
    ///
    /// Called once per session. Ids are assigned from a monotonic counter
    /// seeded past the highest persisted id, so fresh ids never collide
    /// with restored ones.
    pub fn load(store: LocalStore) -> Self {
        let items = store.load_items();
        let next_id = items.iter().map(|i| i.id).max().map_or(1, |max| max + 1);

        Self {
            items,
            editing: None,
            next_id,
            store,
        }
    }

    /// Adds a new item with the trimmed title, appended at the end
    ///
    /// Blank titles are a no-op and return `None`. On success returns the
    /// newly created item.
    pub fn add(&mut self, raw_title: &str) -> Option<&WatchItem> {
        let title = raw_title.trim();
        if title.is_empty() {
            return None;
        }

        let item = WatchItem {
            id: self.fresh_id(),
            title: title.to_string(),
            completed: false,
        };
        tracing::info!(id = item.id, title = %item.title, "Watchlist item added");

        self.items.push(item);
        self.persist();
        self.items.last()
    }

    /// Removes the item with the given id; returns whether anything changed
    ///
    /// If the removed item was under active edit, the edit session is
    /// discarded with it.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }

        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        self.persist();
        true
    }

    /// Flips the completed flag on the matching item
    ///
    /// Returns the new completed value, or `None` if the id is stale. The
    /// returned value is computed inside the mutation so callers can log
    /// the transition without re-reading state.
    pub fn toggle_complete(&mut self, id: u64) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.completed = !item.completed;
        let completed = item.completed;

        tracing::info!(id, completed, "Watchlist item toggled");
        self.persist();
        Some(completed)
    }

    /// Opens an edit session on the matching item, seeding the draft with
    /// its current title; stale ids are a no-op
    pub fn start_edit(&mut self, id: u64) -> bool {
        let Some(item) = self.items.iter().find(|item| item.id == id) else {
            return false;
        };

        self.editing = Some(EditSession {
            id,
            draft: item.title.clone(),
        });
        true
    }

    /// Replaces the draft text of the open edit session, if any
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(editing) = self.editing.as_mut() {
            editing.draft = text.into();
        }
    }

    /// Discards any open edit session
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commits the open edit session
    ///
    /// A blank draft is a no-op that leaves the session open, so the user
    /// can keep typing. Otherwise the item's title becomes the trimmed
    /// draft and the session closes. Returns whether a title changed.
    pub fn save_edit(&mut self) -> bool {
        let Some(editing) = self.editing.as_ref() else {
            return false;
        };
        let draft = editing.draft.trim();
        if draft.is_empty() {
            return false;
        }

        let id = editing.id;
        let title = draft.to_string();
        self.editing = None;

        // The edited item may have been removed out from under the session
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.title = title;
        self.persist();
        true
    }

    /// Empties the collection and discards any open edit session
    pub fn clear_all(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }

        self.items.clear();
        self.editing = None;
        self.persist();
        true
    }

    /// Read-only view of the collection, in insertion order
    pub fn items(&self) -> &[WatchItem] {
        &self.items
    }

    /// The open edit session, if any
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Derived counters, recomputed on demand
    pub fn stats(&self) -> WatchlistStats {
        let total = self.items.len();
        let completed = self.items.iter().filter(|item| item.completed).count();

        WatchlistStats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn persist(&self) {
        self.store.save_items(&self.items);
    }
}
