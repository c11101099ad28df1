//! The [`Screen`] trait and the ordered registry of tabs.
//!
//! Each console tab implements [`Screen`]. The shell owns a
//! [`ScreenRegistry`], hands the active screen a [`ScreenContext`] for every
//! render and input call, and interprets the returned [`ScreenAction`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use ratatui::Frame;
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use crate::input::InputEvent;
use crate::theme::Theme;

// ─── Screen Id ──────────────────────────────────────────────────────────────

/// Dotted screen identifier, e.g. `console.map`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub String);

impl ScreenId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Context ────────────────────────────────────────────────────────────────

/// What a screen may know about its surroundings.
#[derive(Debug, Clone)]
pub struct ScreenContext {
    pub active_screen: ScreenId,
    /// Content rectangle between the tab bar and the status line.
    pub area: Rect,
    pub theme: Theme,
    /// False while an overlay or the palette holds focus.
    pub focused: bool,
}

// ─── Screen Trait ───────────────────────────────────────────────────────────

pub trait Screen: Send {
    fn id(&self) -> &ScreenId;

    /// Tab label.
    fn title(&self) -> &str;

    /// Draw into `ctx.area`.
    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext);

    fn handle_input(&mut self, event: &InputEvent, ctx: &ScreenContext) -> ScreenAction;

    /// While true the shell forwards every key except `Ctrl+C` straight to
    /// the screen, so that typing `q` or `1` into a search box works.
    fn captures_text(&self) -> bool {
        false
    }

    /// Key hints for the status line.
    fn hints(&self) -> &str {
        ""
    }

    fn on_focus(&mut self) {}

    fn on_blur(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// What the shell should do after a screen handled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    Consumed,
    /// Let the shell try its own bindings.
    Ignored,
    Navigate(ScreenId),
    /// Show an alert overlay.
    Notify { title: String, body: String },
    Quit,
}

// ─── Registry ───────────────────────────────────────────────────────────────

/// Screens in tab order.
#[derive(Default)]
pub struct ScreenRegistry {
    screens: HashMap<ScreenId, Box<dyn Screen>>,
    order: Vec<ScreenId>,
}

impl ScreenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a screen. Re-registering an id replaces the screen in place.
    pub fn register(&mut self, screen: Box<dyn Screen>) {
        let id = screen.id().clone();
        if !self.order.contains(&id) {
            self.order.push(id.clone());
        }
        self.screens.insert(id, screen);
    }

    #[must_use]
    pub fn get(&self, id: &ScreenId) -> Option<&dyn Screen> {
        self.screens.get(id).map(AsRef::as_ref)
    }

    pub fn get_mut(&mut self, id: &ScreenId) -> Option<&mut Box<dyn Screen>> {
        self.screens.get_mut(id)
    }

    #[must_use]
    pub fn screen_ids(&self) -> &[ScreenId] {
        &self.order
    }

    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&ScreenId> {
        self.order.get(index)
    }

    #[must_use]
    pub fn position(&self, id: &ScreenId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    /// Tab after `current`, wrapping.
    #[must_use]
    pub fn next_screen(&self, current: &ScreenId) -> Option<&ScreenId> {
        let pos = self.position(current)?;
        self.order.get((pos + 1) % self.order.len())
    }

    /// Tab before `current`, wrapping.
    #[must_use]
    pub fn prev_screen(&self, current: &ScreenId) -> Option<&ScreenId> {
        let pos = self.position(current)?;
        let prev = pos.checked_sub(1).unwrap_or(self.order.len() - 1);
        self.order.get(prev)
    }

    /// `(id, title)` pairs in tab order.
    #[must_use]
    pub fn titles(&self) -> Vec<(&ScreenId, &str)> {
        self.order
            .iter()
            .filter_map(|id| self.screens.get(id).map(|screen| (id, screen.title())))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank {
        id: ScreenId,
        title: String,
    }

    impl Blank {
        fn boxed(id: &str, title: &str) -> Box<dyn Screen> {
            Box::new(Self {
                id: ScreenId::new(id),
                title: title.to_owned(),
            })
        }
    }

    impl Screen for Blank {
        fn id(&self) -> &ScreenId {
            &self.id
        }

        fn title(&self) -> &str {
            &self.title
        }

        fn render(&self, _frame: &mut Frame<'_>, _ctx: &ScreenContext) {}

        fn handle_input(&mut self, _event: &InputEvent, _ctx: &ScreenContext) -> ScreenAction {
            ScreenAction::Ignored
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn registry() -> ScreenRegistry {
        let mut registry = ScreenRegistry::new();
        registry.register(Blank::boxed("console.dashboard", "Dashboard"));
        registry.register(Blank::boxed("console.staff", "Staff"));
        registry.register(Blank::boxed("console.map", "Zone Map"));
        registry
    }

    #[test]
    fn screen_id_display_and_serde() {
        let id = ScreenId::new("console.map");
        assert_eq!(id.to_string(), "console.map");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(serde_json::from_str::<ScreenId>(&json).unwrap(), id);
    }

    #[test]
    fn lookup_and_order() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.get(&ScreenId::new("console.staff")).map(|s| s.title()),
            Some("Staff")
        );
        assert!(registry.get(&ScreenId::new("console.nope")).is_none());
        let titles: Vec<&str> = registry.titles().into_iter().map(|(_, t)| t).collect();
        assert_eq!(titles, vec!["Dashboard", "Staff", "Zone Map"]);
        assert_eq!(registry.id_at(2), Some(&ScreenId::new("console.map")));
        assert_eq!(registry.id_at(3), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        let registry = registry();
        assert_eq!(
            registry.next_screen(&ScreenId::new("console.map")),
            Some(&ScreenId::new("console.dashboard"))
        );
        assert_eq!(
            registry.prev_screen(&ScreenId::new("console.dashboard")),
            Some(&ScreenId::new("console.map"))
        );
        assert!(registry.next_screen(&ScreenId::new("console.nope")).is_none());
    }

    #[test]
    fn reregistering_keeps_position() {
        let mut registry = registry();
        registry.register(Blank::boxed("console.staff", "Rangers"));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.position(&ScreenId::new("console.staff")), Some(1));
        assert_eq!(
            registry.get(&ScreenId::new("console.staff")).map(|s| s.title()),
            Some("Rangers")
        );
    }

    #[test]
    fn downcast_through_as_any() {
        let mut registry = registry();
        let screen = registry.get_mut(&ScreenId::new("console.map")).unwrap();
        assert!(screen.as_any_mut().downcast_mut::<Blank>().is_some());
    }
}
