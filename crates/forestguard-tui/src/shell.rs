//! App shell: tab bar, status line, navigation and input routing.
//!
//! Input is routed in a fixed order:
//!
//! 1. the command palette, when open;
//! 2. the top overlay, when one is shown;
//! 3. `Ctrl+C`, which always quits;
//! 4. a screen that is capturing text gets every remaining key;
//! 5. shell-level keymap actions (quit, tabs, help, palette, theme);
//! 6. everything else goes to the active screen.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyModifiers};
use forestguard_core::tracing_config::span_names;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Tabs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{InputEvent, KeyAction, Keymap};
use crate::overlay::{OverlayManager, OverlayRequest};
use crate::palette::CommandPalette;
use crate::screen::{Screen, ScreenAction, ScreenContext, ScreenId, ScreenRegistry};
use crate::theme::Theme;

/// Used when no frame has been drawn yet and the terminal size is unknown.
const FALLBACK_AREA: Rect = Rect::new(0, 0, 80, 24);

// ─── Shell Config ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shown in the status line.
    pub title: String,
    pub theme: Theme,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "ForestGuard".to_owned(),
            theme: Theme::dark(),
        }
    }
}

// ─── Status Line ────────────────────────────────────────────────────────────

/// Extra text shown after the title in the status bar.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub center: String,
}

impl StatusLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_center(mut self, text: impl Into<String>) -> Self {
        self.center = text.into();
        self
    }
}

// ─── App Shell ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AppShell {
    pub config: ShellConfig,
    pub registry: ScreenRegistry,
    pub active_screen: Option<ScreenId>,
    pub keymap: Keymap,
    pub overlays: OverlayManager,
    pub palette: CommandPalette,
    pub status_line: StatusLine,
    pub should_quit: bool,
    last_palette_action: Option<String>,
    last_render_area: Cell<Rect>,
}

impl AppShell {
    #[must_use]
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            registry: ScreenRegistry::new(),
            active_screen: None,
            keymap: Keymap::default_bindings(),
            overlays: OverlayManager::new(),
            palette: CommandPalette::new(),
            status_line: StatusLine::new(),
            should_quit: false,
            last_palette_action: None,
            last_render_area: Cell::new(Rect::new(0, 0, 0, 0)),
        }
    }

    /// Register a screen; the first one registered becomes active.
    pub fn register(&mut self, screen: Box<dyn Screen>) {
        let id = screen.id().clone();
        self.registry.register(screen);
        if self.active_screen.is_none() {
            self.navigate_to(&id);
        }
    }

    /// Switch screens. Unknown ids are ignored and return `false`.
    pub fn navigate_to(&mut self, id: &ScreenId) -> bool {
        if self.registry.get(id).is_none() {
            return false;
        }
        if let Some(old) = self.active_screen.take()
            && let Some(screen) = self.registry.get_mut(&old)
        {
            screen.on_blur();
        }
        if let Some(screen) = self.registry.get_mut(id) {
            screen.on_focus();
        }
        debug!(
            target: span_names::SHELL,
            screen_id = %id,
            "screen activated"
        );
        self.active_screen = Some(id.clone());
        true
    }

    pub fn next_screen(&mut self) {
        if let Some(current) = &self.active_screen
            && let Some(next) = self.registry.next_screen(current).cloned()
        {
            self.navigate_to(&next);
        }
    }

    pub fn prev_screen(&mut self) {
        if let Some(current) = &self.active_screen
            && let Some(prev) = self.registry.prev_screen(current).cloned()
        {
            self.navigate_to(&prev);
        }
    }

    /// Activate the tab at a zero-based index; out-of-range is a no-op.
    pub fn jump_to(&mut self, index: usize) -> bool {
        match self.registry.id_at(index).cloned() {
            Some(id) => self.navigate_to(&id),
            None => false,
        }
    }

    /// Swap to the next theme preset.
    pub fn cycle_theme(&mut self) {
        self.config.theme = Theme::from_preset(self.config.theme.preset.next());
        debug!(
            target: span_names::SHELL,
            theme = %self.config.theme.preset,
            "theme changed"
        );
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Id of the palette action confirmed by the last `handle_input` call.
    #[must_use]
    pub fn last_palette_action(&self) -> Option<&str> {
        self.last_palette_action.as_deref()
    }

    /// Content rectangle for a full terminal area: everything except the
    /// tab bar (top row) and the status line (bottom row).
    #[must_use]
    pub fn content_area_for(full: Rect) -> Rect {
        let [_, content, _] = Self::split(full);
        content
    }

    #[must_use]
    pub fn screen_context(&self, full: Rect) -> ScreenContext {
        ScreenContext {
            active_screen: self
                .active_screen
                .clone()
                .unwrap_or_else(|| ScreenId::new("")),
            area: Self::content_area_for(full),
            theme: self.config.theme,
            focused: !self.palette.is_open() && !self.overlays.has_active(),
        }
    }

    /// Route one event. Returns `true` once the shell wants to quit.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.last_palette_action = None;
        self.track_area(event);

        if self.palette.is_open() {
            self.handle_palette_input(event);
            return self.should_quit;
        }

        if self.overlays.has_active() {
            if let Some(KeyAction::Dismiss | KeyAction::ToggleHelp | KeyAction::Confirm) =
                self.keymap.resolve_event(event)
            {
                self.overlays.dismiss();
            }
            return self.should_quit;
        }

        if let InputEvent::Key(KeyCode::Char('c'), mods) = event
            && mods.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return true;
        }

        let capturing = self.active().is_some_and(|screen| screen.captures_text());
        if !capturing && let Some(action) = self.keymap.resolve_event(event).cloned() {
            let handled = match action {
                KeyAction::Quit => {
                    self.should_quit = true;
                    true
                }
                KeyAction::NextScreen => {
                    self.next_screen();
                    true
                }
                KeyAction::PrevScreen => {
                    self.prev_screen();
                    true
                }
                KeyAction::JumpTo(index) => {
                    self.jump_to(index);
                    true
                }
                KeyAction::ToggleHelp => {
                    self.overlays.toggle_help();
                    true
                }
                KeyAction::TogglePalette => {
                    self.palette.open();
                    true
                }
                KeyAction::CycleTheme => {
                    self.cycle_theme();
                    true
                }
                KeyAction::Dismiss
                | KeyAction::Up
                | KeyAction::Down
                | KeyAction::Confirm
                | KeyAction::Delete => false,
            };
            if handled {
                return self.should_quit;
            }
        }

        self.forward_to_screen(event);
        self.should_quit
    }

    /// Draw tabs, the active screen and the status line.
    ///
    /// Overlays and the palette are drawn by the caller on top.
    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        self.last_render_area.set(area);
        let theme = &self.config.theme;
        let [tabs_area, content_area, status_area] = Self::split(area);

        frame.render_widget(Block::default().style(theme.base()), area);

        let titles: Vec<Line<'_>> = self
            .registry
            .titles()
            .into_iter()
            .enumerate()
            .map(|(index, (_, title))| Line::from(format!("{} {title}", index + 1)))
            .collect();
        let selected = self
            .active_screen
            .as_ref()
            .and_then(|id| self.registry.position(id))
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme.muted_style().bg(theme.bg.to_ratatui()))
            .highlight_style(theme.highlight_style())
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        let ctx = self.screen_context(area);
        match self.active() {
            Some(screen) => screen.render(frame, &ctx),
            None => frame.render_widget(
                Paragraph::new("No screens registered").style(theme.muted_style()),
                content_area,
            ),
        }

        let left = self.active().map_or("", |screen| screen.hints());
        let center = if self.status_line.center.is_empty() {
            format!(" {} ", self.config.title)
        } else {
            format!(" {} │ {} ", self.config.title, self.status_line.center)
        };
        let right = format!("{} │ ? help ", theme.preset);
        let bar_style = Style::default().fg(theme.status_bar_fg.to_ratatui());
        let status = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {left} "), bar_style),
            Span::styled(center, bar_style.add_modifier(Modifier::BOLD)),
            Span::styled(right, bar_style),
        ]))
        .style(Style::default().bg(theme.status_bar_bg.to_ratatui()));
        frame.render_widget(status, status_area);
    }

    // ─── Internals ──────────────────────────────────────────────────────

    fn split(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    fn active(&self) -> Option<&dyn Screen> {
        self.active_screen
            .as_ref()
            .and_then(|id| self.registry.get(id))
    }

    fn track_area(&self, event: &InputEvent) {
        if let InputEvent::Resize(width, height) = event {
            self.last_render_area.set(Rect::new(0, 0, *width, *height));
        }
        let current = self.last_render_area.get();
        if current.width == 0 || current.height == 0 {
            let area = crossterm::terminal::size()
                .map_or(FALLBACK_AREA, |(width, height)| Rect::new(0, 0, width, height));
            self.last_render_area.set(area);
        }
    }

    fn handle_palette_input(&mut self, event: &InputEvent) {
        let InputEvent::Key(key, mods) = event else {
            return;
        };
        match key {
            KeyCode::Esc => self.palette.close(),
            KeyCode::Char('p') if mods.contains(KeyModifiers::CONTROL) => self.palette.close(),
            KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up => self.palette.highlight_prev(),
            KeyCode::Down => self.palette.highlight_next(),
            KeyCode::Enter => {
                self.last_palette_action = self.palette.confirm();
                self.palette.close();
            }
            KeyCode::Backspace => self.palette.pop_char(),
            _ => {
                if let Some(ch) = event.typed_char() {
                    self.palette.push_char(ch);
                }
            }
        }
    }

    fn forward_to_screen(&mut self, event: &InputEvent) {
        let Some(id) = self.active_screen.clone() else {
            return;
        };
        let ctx = self.screen_context(self.last_render_area.get());
        let Some(screen) = self.registry.get_mut(&id) else {
            return;
        };
        match screen.handle_input(event, &ctx) {
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Navigate(target) => {
                self.navigate_to(&target);
            }
            ScreenAction::Notify { title, body } => {
                self.overlays.push(OverlayRequest::alert(title, body));
            }
            ScreenAction::Consumed | ScreenAction::Ignored => {}
        }
    }
}
