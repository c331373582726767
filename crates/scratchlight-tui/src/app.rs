//! TUI application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use scratchlight_core::logging::LogView;
use scratchlight_core::search::status;
use scratchlight_core::spotlight::SpotlightDisplay;

/// Which input field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Term,
    Limit,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Term => Focus::Limit,
            Focus::Limit => Focus::Term,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Focus::Term => "Term",
            Focus::Limit => "Limit",
        }
    }
}

/// A search request produced by the key handler.
///
/// Both fields are the raw input contents; trimming and clamping happen in
/// the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub limit: String,
}

/// TUI application state.
pub struct App {
    /// Whether the application should quit.
    pub should_quit: bool,

    /// Currently focused input field.
    pub focus: Focus,

    /// Contents of the search-term field.
    pub term_input: String,

    /// Contents of the result-limit field.
    pub limit_input: String,

    /// Status line published by the search service.
    pub status: String,

    /// Term of the currently displayed rotation.
    pub current_term: String,

    /// What the spotlight area shows.
    pub display: SpotlightDisplay,

    /// Read handle over recent log lines.
    pub logs: LogView,
}

impl App {
    /// Create a new App seeded with the configured default limit.
    pub fn new(default_limit: u32, logs: LogView) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Term,
            term_input: String::new(),
            limit_input: default_limit.to_string(),
            status: status::PROMPT.to_string(),
            current_term: String::new(),
            display: SpotlightDisplay::Placeholder,
            logs,
        }
    }

    /// Process a key press. Returns a search request when one is triggered.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::Enter => Some(SearchRequest {
                term: self.term_input.clone(),
                limit: self.limit_input.clone(),
            }),
            KeyCode::Backspace => {
                self.focused_field_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                self.focused_field_mut().push(c);
                None
            }
            _ => None,
        }
    }

    /// Apply a status line update from the service.
    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    /// Apply a current-term update from the service.
    pub fn set_current_term(&mut self, term: String) {
        self.current_term = term;
    }

    /// Apply a spotlight display update from the service.
    pub fn set_display(&mut self, display: SpotlightDisplay) {
        self.display = display;
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::Term => &mut self.term_input,
            Focus::Limit => &mut self.limit_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scratchlight_core::logging::LogStore;

    fn make_app() -> App {
        App::new(10, LogStore::new(16).view())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ── Construction ──────────────────────────────────────────────

    #[test]
    fn test_app_defaults() {
        let app = make_app();
        assert!(!app.should_quit);
        assert_eq!(app.focus, Focus::Term);
        assert_eq!(app.term_input, "");
        assert_eq!(app.limit_input, "10");
        assert_eq!(app.display, SpotlightDisplay::Placeholder);
    }

    // ── Key handling ──────────────────────────────────────────────

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut app = make_app();
        for c in "fox".chars() {
            assert!(app.handle_key(press(KeyCode::Char(c))).is_none());
        }
        assert_eq!(app.term_input, "fox");

        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char('5')));
        assert_eq!(app.limit_input, "105");
        assert_eq!(app.term_input, "fox");
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut app = make_app();
        app.handle_key(press(KeyCode::Char('a')));
        app.handle_key(press(KeyCode::Char('b')));
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.term_input, "a");

        // Backspace on an empty field is a no-op
        app.handle_key(press(KeyCode::Backspace));
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.term_input, "");
    }

    #[test]
    fn test_tab_toggles_focus() {
        let mut app = make_app();
        assert_eq!(app.focus, Focus::Term);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Limit);
        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Term);
    }

    #[test]
    fn test_enter_produces_raw_request() {
        let mut app = make_app();
        for c in "  fox ".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Tab));
        for c in "abc".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }

        let request = app.handle_key(press(KeyCode::Enter)).unwrap();
        // Raw field contents; the service trims and clamps.
        assert_eq!(request.term, "  fox ");
        assert_eq!(request.limit, "10abc");
    }

    #[test]
    fn test_enter_works_from_either_field() {
        let mut app = make_app();
        app.handle_key(press(KeyCode::Tab));
        assert!(app.handle_key(press(KeyCode::Enter)).is_some());
    }

    #[test]
    fn test_esc_quits() {
        let mut app = make_app();
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = make_app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_key(key);
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_is_just_text() {
        let mut app = make_app();
        app.handle_key(press(KeyCode::Char('c')));
        assert!(!app.should_quit);
        assert_eq!(app.term_input, "c");
    }

    // ── Service updates ───────────────────────────────────────────

    #[test]
    fn test_service_updates_apply() {
        let mut app = make_app();
        app.set_status("Scratched 3 pages.".to_string());
        app.set_current_term("fox".to_string());
        assert_eq!(app.status, "Scratched 3 pages.");
        assert_eq!(app.current_term, "fox");
    }
}
