//! Input model: terminal events, semantic actions and the keymap.
//!
//! The shell resolves key presses through the [`Keymap`] and handles
//! navigation-level actions itself. Everything else reaches the active
//! screen as the raw [`InputEvent`].

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use serde::{Deserialize, Serialize};

// ─── Input Event ────────────────────────────────────────────────────────────

/// Event consumed by the shell and screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyCode, KeyModifiers),
    /// Mouse event at `(column, row)`.
    Mouse(MouseEventKind, u16, u16),
    Resize(u16, u16),
}

impl InputEvent {
    /// Convert a crossterm event. Key releases and repeats are dropped, as are
    /// focus and paste events.
    #[must_use]
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(Self::Key(key.code, key.modifiers))
            }
            Event::Mouse(mouse) => Some(Self::Mouse(mouse.kind, mouse.column, mouse.row)),
            Event::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }

    /// Shorthand for an unmodified key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(code, KeyModifiers::NONE)
    }

    /// Shorthand for an unmodified character key.
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::Key(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    /// The typed character, if this is a plain (or shifted) character key.
    #[must_use]
    pub fn typed_char(&self) -> Option<char> {
        match self {
            Self::Key(KeyCode::Char(ch), mods)
                if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(*ch)
            }
            _ => None,
        }
    }
}

// ─── Key Action ─────────────────────────────────────────────────────────────

/// Semantic action resolved from a key binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    // ── Shell-level ─────────────────────────────────────────────────
    Quit,
    TogglePalette,
    NextScreen,
    PrevScreen,
    /// Jump to the screen at this zero-based tab index.
    JumpTo(usize),
    ToggleHelp,
    CycleTheme,
    /// Close the top overlay, or cancel.
    Dismiss,

    // ── Screen-level ────────────────────────────────────────────────
    Up,
    Down,
    Confirm,
    Delete,
}

// ─── Keymap ─────────────────────────────────────────────────────────────────

/// Key press → action lookup.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl Keymap {
    /// The console's default bindings.
    #[must_use]
    pub fn default_bindings() -> Self {
        let none = KeyModifiers::NONE;
        let mut bindings = HashMap::new();

        bindings.insert((KeyCode::Char('q'), none), KeyAction::Quit);
        bindings.insert((KeyCode::Char('c'), KeyModifiers::CONTROL), KeyAction::Quit);

        bindings.insert(
            (KeyCode::Char('p'), KeyModifiers::CONTROL),
            KeyAction::TogglePalette,
        );
        bindings.insert((KeyCode::Char(':'), none), KeyAction::TogglePalette);

        bindings.insert((KeyCode::Tab, none), KeyAction::NextScreen);
        // Terminals disagree on whether Shift-Tab carries SHIFT.
        bindings.insert((KeyCode::BackTab, none), KeyAction::PrevScreen);
        bindings.insert((KeyCode::BackTab, KeyModifiers::SHIFT), KeyAction::PrevScreen);
        for (index, digit) in ('1'..='9').enumerate() {
            bindings.insert((KeyCode::Char(digit), none), KeyAction::JumpTo(index));
        }

        bindings.insert((KeyCode::Char('?'), none), KeyAction::ToggleHelp);
        bindings.insert((KeyCode::F(1), none), KeyAction::ToggleHelp);
        bindings.insert(
            (KeyCode::Char('t'), KeyModifiers::CONTROL),
            KeyAction::CycleTheme,
        );
        bindings.insert((KeyCode::Esc, none), KeyAction::Dismiss);

        bindings.insert((KeyCode::Up, none), KeyAction::Up);
        bindings.insert((KeyCode::Down, none), KeyAction::Down);
        bindings.insert((KeyCode::Char('k'), none), KeyAction::Up);
        bindings.insert((KeyCode::Char('j'), none), KeyAction::Down);
        bindings.insert((KeyCode::Enter, none), KeyAction::Confirm);
        bindings.insert((KeyCode::Backspace, none), KeyAction::Delete);

        Self { bindings }
    }

    #[must_use]
    pub fn resolve(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<&KeyAction> {
        self.bindings.get(&(key, modifiers))
    }

    /// Resolve an event; non-key events never resolve.
    #[must_use]
    pub fn resolve_event(&self, event: &InputEvent) -> Option<&KeyAction> {
        match event {
            InputEvent::Key(key, mods) => self.resolve(*key, *mods),
            InputEvent::Mouse(..) | InputEvent::Resize(..) => None,
        }
    }

    /// Add or override a binding.
    pub fn bind(&mut self, key: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert((key, modifiers), action);
    }

    pub fn unbind(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        self.bindings.remove(&(key, modifiers));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::default_bindings()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventState, MouseButton, MouseEvent};

    use super::*;

    #[test]
    fn quit_bindings() {
        let keymap = Keymap::default_bindings();
        assert_eq!(
            keymap.resolve(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(&KeyAction::Quit)
        );
        assert_eq!(
            keymap.resolve(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(&KeyAction::Quit)
        );
    }

    #[test]
    fn digits_jump_to_tabs() {
        let keymap = Keymap::default_bindings();
        assert_eq!(
            keymap.resolve(KeyCode::Char('1'), KeyModifiers::NONE),
            Some(&KeyAction::JumpTo(0))
        );
        assert_eq!(
            keymap.resolve(KeyCode::Char('6'), KeyModifiers::NONE),
            Some(&KeyAction::JumpTo(5))
        );
        assert!(keymap.resolve(KeyCode::Char('0'), KeyModifiers::NONE).is_none());
    }

    #[test]
    fn back_tab_resolves_with_or_without_shift() {
        let keymap = Keymap::default_bindings();
        assert_eq!(
            keymap.resolve(KeyCode::BackTab, KeyModifiers::SHIFT),
            Some(&KeyAction::PrevScreen)
        );
        assert_eq!(
            keymap.resolve(KeyCode::BackTab, KeyModifiers::NONE),
            Some(&KeyAction::PrevScreen)
        );
    }

    #[test]
    fn mouse_events_never_resolve() {
        let keymap = Keymap::default_bindings();
        let click = InputEvent::Mouse(MouseEventKind::Down(MouseButton::Left), 3, 4);
        assert!(keymap.resolve_event(&click).is_none());
    }

    #[test]
    fn bind_and_unbind() {
        let mut keymap = Keymap::default_bindings();
        keymap.unbind(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(keymap.resolve(KeyCode::Char('q'), KeyModifiers::NONE).is_none());
        keymap.bind(KeyCode::Char('x'), KeyModifiers::CONTROL, KeyAction::Quit);
        assert_eq!(
            keymap.resolve(KeyCode::Char('x'), KeyModifiers::CONTROL),
            Some(&KeyAction::Quit)
        );
    }

    #[test]
    fn typed_char_ignores_control_chords() {
        assert_eq!(InputEvent::char('a').typed_char(), Some('a'));
        assert_eq!(
            InputEvent::Key(KeyCode::Char('A'), KeyModifiers::SHIFT).typed_char(),
            Some('A')
        );
        assert_eq!(
            InputEvent::Key(KeyCode::Char('a'), KeyModifiers::CONTROL).typed_char(),
            None
        );
        assert_eq!(InputEvent::key(KeyCode::Enter).typed_char(), None);
    }

    #[test]
    fn crossterm_conversion_drops_releases() {
        let press = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(InputEvent::from_crossterm(press), Some(InputEvent::char('x')));

        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(InputEvent::from_crossterm(release), None);

        let mouse = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            InputEvent::from_crossterm(mouse),
            Some(InputEvent::Mouse(MouseEventKind::Down(MouseButton::Left), 10, 5))
        );
        assert_eq!(
            InputEvent::from_crossterm(Event::Resize(80, 24)),
            Some(InputEvent::Resize(80, 24))
        );
    }

    #[test]
    fn key_action_serde_roundtrip() {
        for action in [KeyAction::Quit, KeyAction::JumpTo(3), KeyAction::CycleTheme] {
            let json = serde_json::to_string(&action).unwrap();
            let decoded: KeyAction = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, action);
        }
    }
}
