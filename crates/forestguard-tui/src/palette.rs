//! Command palette: a searchable list of named actions.
//!
//! The palette only tracks the query and the highlighted row. Confirming
//! yields the action id; the application decides what the id means.

use forestguard_core::FilterQuery;
use serde::{Deserialize, Serialize};

// ─── Action ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// Switch screens.
    Navigation,
    /// Change what the active screen shows.
    View,
    Settings,
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Navigation => write!(f, "Navigation"),
            Self::View => write!(f, "View"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

/// A palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Dispatch key, e.g. `nav.map` or `settings.theme`.
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub category: ActionCategory,
    /// Display-only key hint.
    pub shortcut: Option<String>,
}

impl Action {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: ActionCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            category,
            shortcut: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

// ─── Command Palette ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CommandPalette {
    actions: Vec<Action>,
    query: FilterQuery,
    highlighted: usize,
    open: bool,
}

impl CommandPalette {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            query: FilterQuery::new(),
            highlighted: 0,
            open: false,
        }
    }

    pub fn register(&mut self, action: Action) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn open(&mut self) {
        self.open = true;
        self.reset();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.reset();
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push_char(ch);
        self.highlighted = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop_char();
        self.highlighted = 0;
    }

    /// Actions matching the query (case-insensitive over label, id and
    /// description), in registration order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Action> {
        if self.query.is_empty() {
            return self.actions.iter().collect();
        }
        let needle = self.query.as_str().to_lowercase();
        self.actions.iter().filter(|a| a.matches(&needle)).collect()
    }

    #[must_use]
    pub const fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_prev(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.highlighted = self.highlighted.checked_sub(1).unwrap_or(count - 1);
        }
    }

    pub fn highlight_next(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    /// Id of the highlighted action, if any row matches.
    #[must_use]
    pub fn confirm(&self) -> Option<String> {
        self.filtered()
            .get(self.highlighted)
            .map(|action| action.id.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn reset(&mut self) {
        self.query.clear();
        self.highlighted = 0;
    }
}
