//! Console application.
//!
//! [`ConsoleApp`] builds the shell, moves each store out of [`AppState`] into
//! the screen that renders it, registers the palette actions and draws the
//! overlays on top of the active screen.

use std::any::Any;

use forestguard_core::tracing_config::span_names;
use forestguard_core::{ConsoleConfig, RegistryResult};
use forestguard_tui::{
    Action, ActionCategory, AppShell, InputEvent, Screen, ScreenId, ShellConfig, StatusLine,
    Theme, ThemePreset,
};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::data_source::DataSource;
use crate::overlays::{render_overlay, render_palette_overlay};
use crate::screens::{
    self, DashboardScreen, DetectionScreen, ForestRegistryScreen, IncidentHistoryScreen,
    StaffScreen, ZoneMapScreen,
};
use crate::state::AppState;

// ─── Console App ────────────────────────────────────────────────────────────

pub struct ConsoleApp {
    pub shell: AppShell,
}

impl ConsoleApp {
    /// Assemble the six screens in tab order.
    #[must_use]
    pub fn new(state: AppState, config: &ConsoleConfig) -> Self {
        let mut shell = AppShell::new(ShellConfig {
            theme: Theme::from_preset(ThemePreset::from(config.theme)),
            ..ShellConfig::default()
        });
        shell.status_line =
            StatusLine::new().with_center(format!("reporting year {}", config.reporting_year));
        for action in Self::palette_actions() {
            shell.palette.register(action);
        }

        let dashboard = DashboardScreen::new(&state);
        let AppState {
            staff,
            incidents,
            zones,
            forests,
            detection_systems,
            detections,
            ..
        } = state;

        shell.register(Box::new(dashboard));
        shell.register(Box::new(StaffScreen::new(staff, config.max_query_len)));
        shell.register(Box::new(ZoneMapScreen::new(zones, config.hit_tolerance)));
        shell.register(Box::new(ForestRegistryScreen::new(
            forests,
            config.max_query_len,
        )));
        shell.register(Box::new(DetectionScreen::new(detection_systems, detections)));
        shell.register(Box::new(IncidentHistoryScreen::new(
            incidents,
            config.max_query_len,
            config.reporting_year,
        )));

        Self { shell }
    }

    /// Load every store from `source` and build the app.
    ///
    /// # Errors
    ///
    /// Propagates [`AppState::load`] failures.
    pub fn from_source(source: &dyn DataSource, config: &ConsoleConfig) -> RegistryResult<Self> {
        Ok(Self::new(AppState::load(source)?, config))
    }

    #[must_use]
    pub fn palette_actions() -> Vec<Action> {
        let nav = |id: &str, label: &str, shortcut: &str| {
            Action::new(id, label, ActionCategory::Navigation).with_shortcut(shortcut)
        };
        vec![
            nav("nav.dashboard", "Go to Dashboard", "1"),
            nav("nav.staff", "Go to Staff", "2"),
            nav("nav.map", "Go to Zone Map", "3"),
            nav("nav.forests", "Go to Forests", "4"),
            nav("nav.detection", "Go to Fire Detection", "5"),
            nav("nav.incidents", "Go to Incident History", "6"),
            Action::new("view.incidents_year", "Cycle Incident Year", ActionCategory::View)
                .with_description("Switch the incident history between years")
                .with_shortcut("y"),
            Action::new("view.help", "Show Keyboard Shortcuts", ActionCategory::View)
                .with_shortcut("?"),
            Action::new("settings.theme", "Toggle Theme", ActionCategory::Settings)
                .with_description("Switch between the dark and light presets")
                .with_shortcut("Ctrl+T"),
            Action::new("app.quit", "Quit", ActionCategory::Settings).with_shortcut("q"),
        ]
    }

    /// Process one event. Returns `true` once the app should quit.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let quit = self.shell.handle_input(event);
        if let Some(action_id) = self.shell.last_palette_action().map(str::to_owned) {
            self.dispatch_palette_action(&action_id);
        }
        quit || self.shell.should_quit
    }

    /// Draw the shell, then the top overlay and the palette.
    pub fn render(&self, frame: &mut Frame<'_>) {
        self.shell.render(frame);
        let area = frame.area();
        let theme = self.shell.theme();
        if let Some(request) = self.shell.overlays.top() {
            render_overlay(frame, area, request, theme);
        }
        render_palette_overlay(frame, area, &self.shell.palette, theme);
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.shell.should_quit
    }

    #[must_use]
    pub fn active_screen_id(&self) -> Option<&str> {
        self.shell.active_screen.as_ref().map(ScreenId::as_str)
    }

    /// Typed access to a registered screen.
    #[must_use]
    pub fn screen<S: Screen + Any>(&self, id: &str) -> Option<&S> {
        self.shell
            .registry
            .get(&ScreenId::new(id))
            .and_then(|screen| screen.as_any().downcast_ref::<S>())
    }

    fn screen_mut<S: Screen + Any>(&mut self, id: &str) -> Option<&mut S> {
        self.shell
            .registry
            .get_mut(&ScreenId::new(id))
            .and_then(|screen| screen.as_any_mut().downcast_mut::<S>())
    }

    fn navigate(&mut self, id: &str) {
        if !self.shell.navigate_to(&ScreenId::new(id)) {
            warn!(target: span_names::CONSOLE, screen_id = id, "palette target not registered");
        }
    }

    fn dispatch_palette_action(&mut self, action_id: &str) {
        debug!(target: span_names::CONSOLE, action = action_id, "palette action");
        match action_id {
            "nav.dashboard" => self.navigate(screens::DASHBOARD),
            "nav.staff" => self.navigate(screens::STAFF),
            "nav.map" => self.navigate(screens::MAP),
            "nav.forests" => self.navigate(screens::FORESTS),
            "nav.detection" => self.navigate(screens::DETECTION),
            "nav.incidents" => self.navigate(screens::INCIDENTS),
            "view.incidents_year" => {
                self.navigate(screens::INCIDENTS);
                if let Some(incidents) = self.screen_mut::<IncidentHistoryScreen>(screens::INCIDENTS)
                {
                    incidents.cycle_year();
                }
            }
            "view.help" => self.shell.overlays.toggle_help(),
            "settings.theme" => self.shell.cycle_theme(),
            "app.quit" => self.shell.should_quit = true,
            other => warn!(target: span_names::CONSOLE, action = other, "unknown palette action"),
        }
    }
}
