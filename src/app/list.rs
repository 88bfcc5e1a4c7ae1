//! The filtered, selectable list of picker items.
//!
//! [`ItemList`] owns every [`Item`] for the session, the subsequence matching the
//! current query, and the single selected item. It keeps three invariants:
//!
//! 1. the filtered sequence is exactly the items matching the last query, in
//!    their list order;
//! 2. at most one item is selected, and it is always part of the filtered
//!    sequence;
//! 3. right after a filter, the first filtered item is selected (or nothing,
//!    when no item matched).
//!
//! State changes are announced on the list's own [`EventBus`] so presentation
//! code can react without the list knowing about it.

use super::item::Item;
use crate::domain::Bookmark;
use crate::events::{EventBus, Listener};

/// Event name emitted after the filtered sequence is recomputed.
pub const FILTER_EVENT: &str = "filter";

/// Event name emitted after the selection moves.
pub const SELECT_EVENT: &str = "select";

/// Notifications published by [`ItemList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// The filtered sequence was recomputed for `query`.
    Filtered {
        /// Query the list was filtered with.
        query: String,
        /// Number of matching items.
        count: usize,
    },
    /// The selection moved to `position` within the filtered sequence, or was
    /// cleared (`None`) because a filter matched nothing.
    SelectionChanged {
        /// Position of the newly selected item in the filtered sequence.
        position: Option<usize>,
    },
}

/// Ordered picker items with an active filter and a single selection.
#[derive(Debug)]
pub struct ItemList {
    items: Vec<Item>,
    /// Indices into `items`, in list order.
    filtered: Vec<usize>,
    /// Index into `items` of the selected item.
    selected: Option<usize>,
    bus: EventBus<ListEvent>,
}

impl ItemList {
    /// Creates a list with one item per record, in the given order.
    ///
    /// Nothing is filtered or selected until the first [`filter`](Self::filter).
    #[must_use]
    pub fn new(records: Vec<Bookmark>) -> Self {
        Self {
            items: records.into_iter().map(Item::new).collect(),
            filtered: Vec::new(),
            selected: None,
            bus: EventBus::new(),
        }
    }

    /// Subscribes to list notifications ([`FILTER_EVENT`], [`SELECT_EVENT`] or
    /// the wildcard).
    pub fn on(&self, names: &str, listener: &Listener<ListEvent>) {
        self.bus.on(names, listener);
    }

    pub fn off(&self, names: &str, listener: &Listener<ListEvent>) {
        self.bus.off(names, listener);
    }

    /// Recomputes the filtered sequence for `query` and selects its head.
    ///
    /// The previous selection is cleared first, so an item filtered out can
    /// never stay selected. Emits [`FILTER_EVENT`], then [`SELECT_EVENT`] if
    /// something matched or if an earlier selection was dropped.
    pub fn filter(&mut self, query: &str) {
        let _span = tracing::debug_span!(
            "item_list_filter",
            total_items = self.items.len(),
            query_len = query.len()
        )
        .entered();

        let previous = self.selected.take();
        if let Some(previous) = previous {
            self.items[previous].unselect();
        }

        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(query))
            .map(|(index, _)| index)
            .collect();

        tracing::debug!(filtered_count = self.filtered.len(), "filter applied");

        self.bus.emit(
            FILTER_EVENT,
            &ListEvent::Filtered {
                query: query.to_string(),
                count: self.filtered.len(),
            },
        );

        if self.filtered.is_empty() {
            if previous.is_some() {
                self.bus
                    .emit(SELECT_EVENT, &ListEvent::SelectionChanged { position: None });
            }
        } else {
            self.select_position(0);
        }
    }

    /// Moves the selection one step towards the end of the filtered sequence.
    ///
    /// No-op on the last item (no wraparound) and on an empty list.
    pub fn select_next(&mut self) {
        let position = self.current_position();
        self.select_position(position + 1);
    }

    /// Moves the selection one step towards the head of the filtered sequence.
    ///
    /// No-op on the first item (no wraparound) and on an empty list.
    pub fn select_previous(&mut self) {
        if let Some(position) = self.current_position().checked_sub(1) {
            self.select_position(position);
        }
    }

    /// Returns the record of the selected item, if any.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Bookmark> {
        self.selected.map(|index| self.items[index].record())
    }

    /// Returns the URL of the selected item, if any.
    #[must_use]
    pub fn selected_url(&self) -> Option<&str> {
        self.selected.map(|index| self.items[index].url())
    }

    /// Position of the selected item within the filtered sequence.
    #[must_use]
    pub fn selected_position(&self) -> Option<usize> {
        self.filtered
            .iter()
            .position(|&index| self.items[index].is_selected())
    }

    /// Items matching the current query, in list order.
    pub fn filtered(&self) -> impl Iterator<Item = &Item> + '_ {
        self.filtered.iter().map(|&index| &self.items[index])
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Every item, in load order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the selected item in the filtered sequence, or the head
    /// when nothing is selected.
    fn current_position(&self) -> usize {
        self.selected_position().unwrap_or(0)
    }

    /// Selects the filtered item at `position`; out-of-range positions leave
    /// the selection untouched.
    fn select_position(&mut self, position: usize) {
        let Some(&index) = self.filtered.get(position) else {
            tracing::trace!(position, filtered_count = self.filtered.len(), "selection out of range");
            return;
        };

        if let Some(previous) = self.selected.replace(index) {
            self.items[previous].unselect();
        }
        self.items[index].select();

        tracing::debug!(position, url = %self.items[index].url(), "selection changed");
        self.bus
            .emit(SELECT_EVENT, &ListEvent::SelectionChanged { position: Some(position) });
    }
}
