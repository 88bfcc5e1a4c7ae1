//! The search text input.
//!
//! [`SearchInput`] holds the query text and the focus flag and publishes two
//! events on its bus: [`SEARCH_EVENT`] whenever the text changes, and
//! [`SHORTCUT_EVENT`] when a released key maps to a navigation [`Command`]
//! through the configured [`KeyMap`].
//!
//! Text only reaches the input while it has focus, mirroring a real text field.

use super::commands::{Command, KeyMap};
use crate::events::{EventBus, Listener};
use std::cell::{Cell, RefCell};

/// Event name emitted when the query text changes.
pub const SEARCH_EVENT: &str = "search";

/// Event name emitted when a key maps to a navigation command.
pub const SHORTCUT_EVENT: &str = "shortcut";

/// Notifications published by [`SearchInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Current text of the input.
    Search(String),
    /// A navigation command triggered from the keyboard.
    Shortcut(Command),
}

/// Query text field with focus state and keyboard shortcuts.
#[derive(Debug)]
pub struct SearchInput {
    value: RefCell<String>,
    focused: Cell<bool>,
    keymap: KeyMap,
    bus: EventBus<InputEvent>,
}

impl SearchInput {
    /// Creates an empty, unfocused input.
    #[must_use]
    pub fn new(keymap: KeyMap) -> Self {
        Self {
            value: RefCell::new(String::new()),
            focused: Cell::new(false),
            keymap,
            bus: EventBus::new(),
        }
    }

    pub fn on(&self, names: &str, listener: &Listener<InputEvent>) {
        self.bus.on(names, listener);
    }

    pub fn off(&self, names: &str, listener: &Listener<InputEvent>) {
        self.bus.off(names, listener);
    }

    pub fn focus(&self) {
        if !self.focused.replace(true) {
            tracing::trace!("search input focused");
        }
    }

    pub fn blur(&self) {
        if self.focused.replace(false) {
            tracing::trace!("search input blurred");
        }
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Current text of the input.
    #[must_use]
    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    /// Appends a typed character. Ignored while unfocused.
    ///
    /// Returns `true` if the text changed.
    pub fn insert_char(&self, c: char) -> bool {
        if !self.is_focused() {
            return false;
        }
        self.value.borrow_mut().push(c);
        self.emit_search();
        true
    }

    /// Deletes the last character. Ignored while unfocused or empty.
    ///
    /// Returns `true` if the text changed.
    pub fn backspace(&self) -> bool {
        if !self.is_focused() {
            return false;
        }
        let removed = self.value.borrow_mut().pop().is_some();
        if removed {
            self.emit_search();
        }
        removed
    }

    /// Replaces the whole text, emitting [`SEARCH_EVENT`] if it changed.
    pub fn set_value(&self, text: &str) -> bool {
        let changed = {
            let mut value = self.value.borrow_mut();
            if *value == text {
                false
            } else {
                text.clone_into(&mut value);
                true
            }
        };
        if changed {
            self.emit_search();
        }
        changed
    }

    /// Handles a key release: emits [`SHORTCUT_EVENT`] if `code` is bound.
    ///
    /// Returns the command that was emitted, if any.
    pub fn key_up(&self, code: u32) -> Option<Command> {
        let command = self.keymap.map_key_code(code)?;
        tracing::debug!(code, command = %command, "shortcut");
        self.bus
            .emit(SHORTCUT_EVENT, &InputEvent::Shortcut(command));
        Some(command)
    }

    #[must_use]
    pub const fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    fn emit_search(&self) {
        let text = self.value();
        self.bus.emit(SEARCH_EVENT, &InputEvent::Search(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WILDCARD;
    use std::rc::Rc;

    fn recording(input: &SearchInput, names: &str) -> Rc<RefCell<Vec<InputEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        input.on(names, &Listener::new(move |e: &InputEvent| sink.borrow_mut().push(e.clone())));
        seen
    }

    #[test]
    fn typing_requires_focus() {
        let input = SearchInput::new(KeyMap::default());
        let seen = recording(&input, SEARCH_EVENT);

        assert!(!input.insert_char('r'));
        input.focus();
        assert!(input.insert_char('r'));
        assert!(input.insert_char('s'));

        assert_eq!(input.value(), "rs");
        assert_eq!(
            *seen.borrow(),
            [
                InputEvent::Search("r".to_string()),
                InputEvent::Search("rs".to_string()),
            ]
        );
    }

    #[test]
    fn backspace_on_empty_emits_nothing() {
        let input = SearchInput::new(KeyMap::default());
        let seen = recording(&input, SEARCH_EVENT);
        input.focus();

        assert!(!input.backspace());
        input.insert_char('x');
        assert!(input.backspace());

        assert_eq!(input.value(), "");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn set_value_only_emits_on_change() {
        let input = SearchInput::new(KeyMap::default());
        let seen = recording(&input, SEARCH_EVENT);

        assert!(input.set_value("go "));
        assert!(!input.set_value("go "));
        assert_eq!(*seen.borrow(), [InputEvent::Search("go ".to_string())]);
    }

    #[test]
    fn bound_keys_emit_shortcuts() {
        let input = SearchInput::new(KeyMap::default());
        let shortcuts = recording(&input, SHORTCUT_EVENT);
        let everything = recording(&input, WILDCARD);

        assert_eq!(input.key_up(40), Some(Command::Next));
        assert_eq!(input.key_up(37), None);
        assert_eq!(input.key_up(13), Some(Command::Commit));

        let expected = [
            InputEvent::Shortcut(Command::Next),
            InputEvent::Shortcut(Command::Commit),
        ];
        assert_eq!(*shortcuts.borrow(), expected);
        assert_eq!(*everything.borrow(), expected);
    }

    #[test]
    fn focus_toggles() {
        let input = SearchInput::new(KeyMap::default());
        assert!(!input.is_focused());
        input.focus();
        input.focus();
        assert!(input.is_focused());
        input.blur();
        assert!(!input.is_focused());
    }
}
