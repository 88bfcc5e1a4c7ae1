//! Zellij entry point.
//!
//! Everything interesting lives in the library; this shim translates Zellij
//! events into [`zmarks::Event`]s and carries out the returned [`Action`]s.
//!
//! ```text
//! ┌──────────────── plugin thread ────────────────┐      ┌──── worker thread ────┐
//! │ Key/Visible ──▶ Event ──▶ handle_event        │      │                       │
//! │                               │ PostToWorker ─┼─────▶│ ZmarksWorker          │
//! │ CustomMessage ◀───────────────┼───────────────┼──────│  reads Bookmarks file │
//! │                               ▼               │      └───────────────────────┘
//! │                 OpenUrl ──▶ run_command       │
//! │                 CloseFocus ──▶ hide_self      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Keys
//!
//! - printable characters, `Backspace`: edit the query
//! - `Up`/`Ctrl+p`, `Down`/`Ctrl+n`, `Left`, `Right`, `Enter`: sent as key
//!   codes 38, 40, 37, 39 and 13 and resolved by the configured key map
//! - `Esc`: clear the query, or hide the plugin when it is already empty

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zmarks::app::commands::{KEY_DOWN, KEY_ENTER, KEY_LEFT, KEY_RIGHT, KEY_UP};
use zmarks::worker::{WorkerMessage, WorkerResponse, ZmarksWorker};
use zmarks::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(ZmarksWorker, zmarks_worker, ZMARKS_WORKER);

/// Name shared by the worker registration and its messages.
const WORKER_NAME: &str = "zmarks";

struct State {
    app: zmarks::AppState,
    opener: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: zmarks::initialize(&config),
            opener: config.opener,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zmarks::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(?config, "configuration parsed");

        self.app = zmarks::initialize(&config);
        self.opener.clone_from(&config.opener);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
        ]);
        subscribe(&[
            EventType::Key,
            EventType::Visible,
            EventType::CustomMessage,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _span = tracing::debug_span!("plugin_update", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Visible(visible) => {
                if visible {
                    return false;
                }
                Event::Blur
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied, bookmarks cannot be read");
                    Event::PermissionsDenied
                }
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        opener = %self.opener,
                        "opener failed"
                    );
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zmarks::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            zellij_tile::prelude::Event::CustomMessage(name, _) => format!("CustomMessage({name})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let alt = key.has_modifiers(&[KeyModifier::Alt]);

        Some(match key.bare_key {
            BareKey::Char('n') if ctrl => Event::KeyCode(KEY_DOWN),
            BareKey::Char('p') if ctrl => Event::KeyCode(KEY_UP),
            BareKey::Up => Event::KeyCode(KEY_UP),
            BareKey::Down => Event::KeyCode(KEY_DOWN),
            BareKey::Left => Event::KeyCode(KEY_LEFT),
            BareKey::Right => Event::KeyCode(KEY_RIGHT),
            BareKey::Enter => Event::KeyCode(KEY_ENTER),
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !ctrl && !alt => Event::Char(c),
            _ => {
                tracing::trace!(bare_key = ?key.bare_key, "unmapped key");
                return None;
            }
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::OpenUrl { url } => {
                tracing::info!(url = %url, opener = %self.opener, "opening bookmark");
                let context = BTreeMap::from([("url".to_string(), url.clone())]);
                run_command(&[self.opener.as_str(), url.as_str()], context);
            }
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}
