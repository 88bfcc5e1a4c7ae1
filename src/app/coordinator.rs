//! Wiring between the search input and the item list.
//!
//! The [`Coordinator`] subscribes to the input's `search` and `shortcut`
//! events and turns them into list operations. Committing a selection queues
//! an [`Action::OpenUrl`] that the plugin runtime drains with
//! [`Coordinator::take_actions`].

use super::actions::Action;
use super::commands::{normalize_query, Command};
use super::input::{InputEvent, SearchInput, SEARCH_EVENT, SHORTCUT_EVENT};
use super::list::ItemList;
use crate::events::{Listener, WILDCARD};
use std::cell::RefCell;
use std::rc::Rc;

/// Connects a [`SearchInput`] to an [`ItemList`] for the lifetime of a session.
///
/// Dropping the coordinator removes its listeners from the input.
pub struct Coordinator {
    input: Rc<SearchInput>,
    list: Rc<RefCell<ItemList>>,
    outbox: Rc<RefCell<Vec<Action>>>,
    on_search: Listener<InputEvent>,
    on_shortcut: Listener<InputEvent>,
    on_any: Listener<InputEvent>,
}

impl Coordinator {
    /// Registers the listeners, focuses the input and applies the empty
    /// filter, so the first record starts out selected.
    #[must_use]
    pub fn new(input: Rc<SearchInput>, list: Rc<RefCell<ItemList>>) -> Self {
        let _span = tracing::debug_span!("coordinator_new", items = list.borrow().len()).entered();

        let outbox = Rc::new(RefCell::new(Vec::new()));

        let on_search = {
            let list = Rc::clone(&list);
            Listener::new(move |event: &InputEvent| {
                if let InputEvent::Search(text) = event {
                    list.borrow_mut().filter(&normalize_query(text));
                }
            })
        };

        let on_shortcut = {
            let list = Rc::clone(&list);
            let outbox = Rc::clone(&outbox);
            Listener::new(move |event: &InputEvent| {
                if let InputEvent::Shortcut(command) = event {
                    dispatch(*command, &list, &outbox);
                }
            })
        };

        let on_any = Listener::new(|event: &InputEvent| {
            tracing::trace!(?event, "input event");
        });

        input.on(SEARCH_EVENT, &on_search);
        input.on(SHORTCUT_EVENT, &on_shortcut);
        input.on(WILDCARD, &on_any);

        input.focus();
        list.borrow_mut().filter("");

        Self {
            input,
            list,
            outbox,
            on_search,
            on_shortcut,
            on_any,
        }
    }

    /// Routes keyboard focus back to the search input.
    pub fn on_keystroke(&self) {
        self.input.focus();
    }

    /// Drains the actions queued by committed selections.
    pub fn take_actions(&self) -> Vec<Action> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }

    #[must_use]
    pub fn input(&self) -> &Rc<SearchInput> {
        &self.input
    }

    #[must_use]
    pub fn list(&self) -> &Rc<RefCell<ItemList>> {
        &self.list
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.input.off(SEARCH_EVENT, &self.on_search);
        self.input.off(SHORTCUT_EVENT, &self.on_shortcut);
        self.input.off(WILDCARD, &self.on_any);
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("query", &self.input.value())
            .field("pending_actions", &self.outbox.borrow().len())
            .finish_non_exhaustive()
    }
}

fn dispatch(command: Command, list: &RefCell<ItemList>, outbox: &RefCell<Vec<Action>>) {
    let _span = tracing::debug_span!("dispatch_command", command = %command).entered();

    match command {
        Command::Previous => list.borrow_mut().select_previous(),
        Command::Next => list.borrow_mut().select_next(),
        Command::Commit => {
            let url = list.borrow().selected_url().map(str::to_string);
            match url {
                Some(url) => {
                    tracing::info!(url = %url, "opening bookmark");
                    outbox.borrow_mut().push(Action::OpenUrl { url });
                }
                None => tracing::debug!("commit without selection ignored"),
            }
        }
    }
}
