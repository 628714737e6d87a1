//! Zellij plugin wrapper and entry point.
//!
//! The only module that talks to the Zellij host. It maps host events to
//! library events, runs the actions `handle_event` returns, and renders.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: `Key`, `WebRequestResult`, `RunCommandResult`, `PermissionRequestResult`
//! 3. **Permissions granted**: Submit the configured default query
//! 4. **Update**: Translate events, delegate to the library, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, editing and query events (see Keybindings)
//! - `WebRequestResult` → `Event::FetchCompleted`, with the request recovered
//!   from the context map and the body decoded by `decode_response`
//! - `RunCommandResult` → logged (opener command exit status)
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`/`Down`: Move down
//! - `Ctrl+p`/`Up`: Move up
//!
//! In normal mode:
//! - `j`/`k`: Move down/up
//! - `/`: Edit search term
//! - `f`: Edit filter
//! - `s`: Cycle sort key, `S`: restore arrival order
//! - `m`: Load more
//! - `d`/`x`: Dismiss selected hit
//! - `Enter`: Open selected hit
//! - `r`: Search the current term again
//! - `Esc`: Clear filter
//! - `q`: Close plugin
//!
//! While editing:
//! - Characters and `Backspace` edit the field
//! - `Enter`: Submit the search / keep the filter
//! - `Esc`: Discard the search edit / keep the filter

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use hnpane::fetch::{decode_response, FetchRequest, Fetcher};
use hnpane::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Issues search requests through Zellij's `web_request`.
///
/// Results arrive later as `WebRequestResult` carrying the request's context
/// map.
struct ZellijFetcher {
    base_url: String,
}

impl Fetcher for ZellijFetcher {
    fn fetch(&mut self, request: &FetchRequest) {
        let url = request.url(&self.base_url);
        tracing::debug!(url = %url, page = request.page, "issuing web request");
        web_request(
            url,
            HttpVerb::Get,
            BTreeMap::new(),
            Vec::new(),
            request.to_context(),
        );
    }
}

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: hnpane::AppState,

    fetcher: ZellijFetcher,

    /// Program used to open links.
    open_command: String,

    /// Term submitted once permissions are granted.
    default_query: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: hnpane::initialize(&default_config),
            fetcher: ZellijFetcher {
                base_url: default_config.base_url,
            },
            open_command: default_config.open_command,
            default_query: default_config.default_query,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, sets up tracing and state, requests permissions
    /// and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Query the search API
    /// - `RunCommands`: Launch the link opener
    /// - `ReadApplicationState`: Receive key events while focused
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        hnpane::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            base_url = %config.base_url,
            default_query = %config.default_query,
            default_sort = %config.default_sort,
            "parsed configuration"
        );
        self.app = hnpane::initialize(&config);
        self.fetcher = ZellijFetcher {
            base_url: config.base_url,
        };
        self.open_command = config.open_command;
        self.default_query = config.default_query;

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the Zellij event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` when the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_request_result(status, &body, &context)
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        open_command = %self.open_command,
                        "opener command failed"
                    );
                }
                return false;
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        hnpane::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one library event and its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key),
            InputMode::Editing(_) => Self::map_editing_key(key),
        }
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Esc => Event::ClearFilter,
            BareKey::Char('/') => Event::EditSearch,
            BareKey::Char('f') => Event::EditFilter,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('S') => Event::ResetSort,
            BareKey::Char('m') => Event::RequestMore,
            BareKey::Char('d' | 'x') => Event::DismissSelected,
            BareKey::Char('r') => Event::Resubmit,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_editing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Enter => Event::CommitEdit,
            BareKey::Esc => Event::CancelEdit,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_web_request_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Event {
        let request = FetchRequest::from_context(context);
        if request.is_none() {
            tracing::debug!(status = status, "web request result without request context");
        }

        let outcome = decode_response(status, body);
        tracing::debug!(
            status = status,
            body_len = body.len(),
            success = outcome.is_ok(),
            "web request result"
        );

        Event::FetchCompleted { request, outcome }
    }

    /// Submits the default query once web access is granted.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - submitting default query");
                let term = self.default_query.clone();
                self.dispatch(&Event::SubmitQuery { term })
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - searches cannot be issued");
                false
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                self.fetcher.fetch(request);
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, command = %self.open_command, "opening link");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }
}
