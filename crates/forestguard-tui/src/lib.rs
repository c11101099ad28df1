//! Terminal UI framework for the forestguard console.
//!
//! Provides the pieces every console tab shares:
//!
//! - [`Screen`] and [`ScreenRegistry`]: one implementation per tab, in order.
//! - [`AppShell`]: tab bar, status line, navigation and input routing.
//! - [`Keymap`] and [`InputEvent`]: crossterm events mapped to actions.
//! - [`Theme`]: dark and light presets plus the style-token mapping.
//! - [`OverlayManager`] and [`CommandPalette`]: modal layers above a screen.

pub mod input;
pub mod overlay;
pub mod palette;
pub mod screen;
pub mod shell;
pub mod theme;

pub use input::{InputEvent, KeyAction, Keymap};
pub use overlay::{OverlayKind, OverlayManager, OverlayRequest};
pub use palette::{Action, ActionCategory, CommandPalette};
pub use screen::{Screen, ScreenAction, ScreenContext, ScreenId, ScreenRegistry};
pub use shell::{AppShell, ShellConfig, StatusLine};
pub use theme::{SerColor, Theme, ThemePreset};
