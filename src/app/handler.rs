//! Event handling and state transitions.
//!
//! The plugin shim translates Zellij events into [`Event`]s and feeds them to
//! [`handle_event`], which mutates [`AppState`] and returns whether the pane
//! needs a redraw together with the [`Action`]s to execute.
//!
//! Key handling follows the picker's focus model: every key event first
//! routes focus back to the search input (the re-focus hook), then typed text
//! goes to the input while navigation keys are delivered as raw key codes and
//! resolved by the key map.

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::infrastructure::resolve_bookmarks_file;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events delivered by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A printable character was typed.
    Char(char),
    /// The last character of the query should be removed.
    Backspace,
    /// A navigation key, as a browser-style key code (13 Enter, 37-40 arrows).
    KeyCode(u32),
    /// Clears the query, or hides the plugin when the query is already empty.
    Escape,
    /// The plugin pane lost visibility; the search input loses focus.
    Blur,
    /// Permissions were granted; the bookmarks can be requested.
    PermissionsGranted,
    /// Permissions were refused; the bookmarks can never be read.
    PermissionsDenied,
    /// A response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the plugin shim's error path in
/// place for fallible handlers.
///
/// # Example
///
/// ```
/// use zmarks::app::{handle_event, Action, AppState, Event, KeyMap};
/// use zmarks::ui::Theme;
/// use zmarks::worker::WorkerResponse;
/// use zmarks::Bookmark;
///
/// let mut state = AppState::new(Theme::default(), KeyMap::default());
/// let loaded = WorkerResponse::BookmarksLoaded {
///     bookmarks: vec![Bookmark::new("Rust", "https://www.rust-lang.org/")],
/// };
/// handle_event(&mut state, &Event::WorkerResponse(loaded))?;
///
/// state.close_on_open = false;
/// let (_, actions) = handle_event(&mut state, &Event::KeyCode(13))?;
/// assert_eq!(actions, vec![Action::OpenUrl { url: "https://www.rust-lang.org/".into() }]);
/// # Ok::<(), zmarks::ZmarksError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            let Some(coordinator) = state.coordinator() else {
                return Ok((false, vec![]));
            };
            coordinator.on_keystroke();
            let changed = coordinator.input().insert_char(*c);
            tracing::trace!(char = %c, changed, "character typed");
            let dirty = state.take_dirty();
            Ok((changed || dirty, vec![]))
        }
        Event::Backspace => {
            let Some(coordinator) = state.coordinator() else {
                return Ok((false, vec![]));
            };
            let refocused = !coordinator.input().is_focused();
            coordinator.on_keystroke();
            let changed = coordinator.input().backspace();
            let dirty = state.take_dirty();
            Ok((changed || refocused || dirty, vec![]))
        }
        Event::KeyCode(code) => {
            let Some(coordinator) = state.coordinator() else {
                return Ok((false, vec![]));
            };
            let refocused = !coordinator.input().is_focused();
            coordinator.on_keystroke();
            if coordinator.input().key_up(*code).is_none() {
                tracing::trace!(code, "unbound key code ignored");
            }

            let mut actions = coordinator.take_actions();
            if state.close_on_open && actions.iter().any(|a| matches!(a, Action::OpenUrl { .. })) {
                actions.push(Action::CloseFocus);
            }
            let dirty = state.take_dirty();
            Ok((dirty || refocused, actions))
        }
        Event::Escape => {
            let Some(coordinator) = state.coordinator() else {
                return Ok((false, vec![Action::CloseFocus]));
            };
            coordinator.on_keystroke();
            if coordinator.input().value().is_empty() {
                tracing::debug!("escape on empty query, closing");
                Ok((false, vec![Action::CloseFocus]))
            } else {
                coordinator.input().set_value("");
                state.take_dirty();
                Ok((true, vec![]))
            }
        }
        Event::Blur => {
            let Some(coordinator) = state.coordinator() else {
                return Ok((false, vec![]));
            };
            let was_focused = coordinator.input().is_focused();
            coordinator.input().blur();
            Ok((was_focused, vec![]))
        }
        Event::PermissionsGranted => {
            if state.load_requested {
                return Ok((false, vec![]));
            }
            state.load_requested = true;

            let path = resolve_bookmarks_file(&state.bookmarks_file);
            tracing::info!(path = %path.display(), "requesting bookmarks");
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::load_bookmarks(
                    path.to_string_lossy().into_owned(),
                ))],
            ))
        }
        Event::PermissionsDenied => {
            state.fail_load("permissions denied");
            state.take_dirty();
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::BookmarksLoaded { bookmarks } => {
                tracing::debug!(count = bookmarks.len(), "bookmarks received");
                state.install_bookmarks(bookmarks.clone());
                state.take_dirty();
                Ok((true, vec![]))
            }
            WorkerResponse::Error { message } => {
                state.fail_load(message.clone());
                state.take_dirty();
                Ok((true, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::{KeyMap, KEY_DOWN, KEY_ENTER, KEY_LEFT};
    use crate::domain::Bookmark;
    use crate::ui::Theme;

    fn loaded(entries: &[(&str, &str)]) -> AppState {
        let mut state = AppState::new(Theme::default(), KeyMap::default());
        let bookmarks = entries.iter().map(|(t, u)| Bookmark::new(*t, *u)).collect();
        let (render, actions) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::BookmarksLoaded { bookmarks })).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        state
    }

    fn selected_url(state: &AppState) -> Option<String> {
        state
            .coordinator()
            .and_then(|c| c.list().borrow().selected_url().map(str::to_string))
    }

    #[test]
    fn permissions_request_bookmarks_once() {
        let mut state = AppState::new(Theme::default(), KeyMap::default());
        state.bookmarks_file = "~/Bookmarks".to_string();

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        match actions.as_slice() {
            [Action::PostToWorker(WorkerMessage::LoadBookmarks { path, .. })] => {
                assert_eq!(path, "/host/Bookmarks");
            }
            other => panic!("unexpected actions {other:?}"),
        }

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn keys_are_ignored_while_loading() {
        let mut state = AppState::new(Theme::default(), KeyMap::default());
        assert_eq!(handle_event(&mut state, &Event::Char('a')).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::KeyCode(KEY_ENTER)).unwrap(), (false, vec![]));
        assert_eq!(
            handle_event(&mut state, &Event::Escape).unwrap(),
            (false, vec![Action::CloseFocus])
        );
    }

    #[test]
    fn typing_filters_and_renders() {
        let mut state = loaded(&[("Alpha", "http://a.com"), ("Beta", "http://b.com")]);

        let (render, _) = handle_event(&mut state, &Event::Char('b')).unwrap();
        assert!(render);
        assert_eq!(selected_url(&state).as_deref(), Some("http://b.com"));

        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(render);
        assert_eq!(selected_url(&state).as_deref(), Some("http://a.com"));

        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render, "backspace on empty query changes nothing");
    }

    #[test]
    fn typing_does_not_leave_a_stale_redraw() {
        let mut state = loaded(&[("Alpha", "http://a.com"), ("Beta", "http://b.com")]);
        handle_event(&mut state, &Event::Char('b')).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::KeyCode(KEY_LEFT)).unwrap();
        assert!(!render, "unbound key after typing must not redraw");
        assert!(actions.is_empty());
    }

    #[test]
    fn commit_opens_and_closes() {
        let mut state = loaded(&[("Alpha", "http://a.com"), ("Beta", "http://b.com")]);
        handle_event(&mut state, &Event::KeyCode(KEY_DOWN)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::KeyCode(KEY_ENTER)).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::OpenUrl { url: "http://b.com".to_string() },
                Action::CloseFocus,
            ]
        );
    }

    #[test]
    fn commit_without_selection_does_nothing() {
        let mut state = loaded(&[("Alpha", "http://a.com")]);
        for c in "zzz".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::KeyCode(KEY_ENTER)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn unbound_left_arrow_is_ignored_by_default() {
        let mut state = loaded(&[("Alpha", "http://a.com"), ("Beta", "http://b.com")]);
        handle_event(&mut state, &Event::KeyCode(KEY_DOWN)).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::KeyCode(KEY_LEFT)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(selected_url(&state).as_deref(), Some("http://b.com"));
    }

    #[test]
    fn escape_clears_then_closes() {
        let mut state = loaded(&[("Alpha", "http://a.com")]);
        handle_event(&mut state, &Event::Char('x')).unwrap();

        assert_eq!(handle_event(&mut state, &Event::Escape).unwrap(), (true, vec![]));
        assert_eq!(state.coordinator().unwrap().input().value(), "");
        assert_eq!(
            handle_event(&mut state, &Event::Escape).unwrap(),
            (false, vec![Action::CloseFocus])
        );
    }

    #[test]
    fn blur_then_keystroke_refocuses() {
        let mut state = loaded(&[("Alpha", "http://a.com")]);

        assert_eq!(handle_event(&mut state, &Event::Blur).unwrap(), (true, vec![]));
        assert_eq!(handle_event(&mut state, &Event::Blur).unwrap(), (false, vec![]));

        handle_event(&mut state, &Event::Char('a')).unwrap();
        let input = state.coordinator().unwrap().input();
        assert!(input.is_focused());
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn denied_permissions_show_an_error() {
        let mut state = AppState::new(Theme::default(), KeyMap::default());

        let (render, actions) = handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        let empty = state.compute_viewmodel(24, 80).empty_state.unwrap();
        assert!(empty.is_error);
        assert_eq!(empty.subtitle, "permissions denied");
    }

    #[test]
    fn worker_error_is_displayed() {
        let mut state = AppState::new(Theme::default(), KeyMap::default());
        let response = WorkerResponse::Error {
            message: "load bookmarks: IO error: No such file or directory".to_string(),
        };

        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(render);
        assert!(state.coordinator().is_none());
        assert!(state.compute_viewmodel(24, 80).empty_state.unwrap().is_error);
    }
}
