//! Presentation adapter observing the item list.
//!
//! The list knows nothing about rendering; it only announces `filter` and
//! `select` notifications. [`ListView`] subscribes to them and records that the
//! pane has to be redrawn, which the plugin reports back to Zellij from
//! `update()`.

use crate::app::list::{ItemList, ListEvent, FILTER_EVENT, SELECT_EVENT};
use crate::events::Listener;
use std::cell::Cell;
use std::rc::Rc;

/// Tracks whether list state changed since the last frame.
#[derive(Debug)]
pub struct ListView {
    dirty: Rc<Cell<bool>>,
    filtered: Rc<Cell<usize>>,
    listener: Listener<ListEvent>,
}

impl ListView {
    #[must_use]
    pub fn new() -> Self {
        let dirty = Rc::new(Cell::new(true));
        let filtered = Rc::new(Cell::new(0));

        let listener = {
            let dirty = Rc::clone(&dirty);
            let filtered = Rc::clone(&filtered);
            Listener::new(move |event: &ListEvent| {
                if let ListEvent::Filtered { count, .. } = event {
                    filtered.set(*count);
                }
                dirty.set(true);
            })
        };

        Self {
            dirty,
            filtered,
            listener,
        }
    }

    /// Starts observing `list`.
    pub fn attach(&self, list: &ItemList) {
        list.on(FILTER_EVENT, &self.listener);
        list.on(SELECT_EVENT, &self.listener);
        self.dirty.set(true);
    }

    pub fn detach(&self, list: &ItemList) {
        list.off(FILTER_EVENT, &self.listener);
        list.off(SELECT_EVENT, &self.listener);
    }

    /// Marks the view as needing a redraw for reasons outside the list
    /// (query text, focus, load state).
    pub fn invalidate(&self) {
        self.dirty.set(true);
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Match count reported by the most recent filter notification.
    #[must_use]
    pub fn last_filtered_count(&self) -> usize {
        self.filtered.get()
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bookmark;

    fn list() -> ItemList {
        ItemList::new(vec![
            Bookmark::new("Alpha", "http://a.com"),
            Bookmark::new("Beta", "http://b.com"),
        ])
    }

    #[test]
    fn list_notifications_mark_dirty() {
        let mut list = list();
        let view = ListView::new();
        view.attach(&list);
        assert!(view.take_dirty());
        assert!(!view.take_dirty());

        list.filter("beta");
        assert!(view.take_dirty());
        assert_eq!(view.last_filtered_count(), 1);

        list.select_next();
        assert!(!view.take_dirty(), "no movement past the last match");
    }

    #[test]
    fn detached_view_stays_clean() {
        let mut list = list();
        let view = ListView::new();
        view.attach(&list);
        view.take_dirty();
        view.detach(&list);

        list.filter("");
        assert!(!view.take_dirty());
    }

    #[test]
    fn invalidate_forces_redraw() {
        let view = ListView::new();
        view.take_dirty();
        view.invalidate();
        assert!(view.take_dirty());
    }
}
