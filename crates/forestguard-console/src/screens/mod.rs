//! Console screens, one per tab.
//!
//! Each screen implements [`forestguard_tui::Screen`] and owns the core state
//! object it renders (`RegistryState`, `MapState`, or plain snapshots).

pub mod dashboard;
pub mod detection;
pub mod forests;
pub mod incidents;
pub mod map;
pub mod staff;
pub(crate) mod widgets;

use crossterm::event::KeyCode;
use forestguard_core::tracing_config::span_names;
use forestguard_core::{Entity, RegistryState};
use forestguard_tui::{InputEvent, ScreenAction};
use tracing::{debug, warn};

pub use dashboard::DashboardScreen;
pub use detection::DetectionScreen;
pub use forests::ForestRegistryScreen;
pub use incidents::IncidentHistoryScreen;
pub use map::ZoneMapScreen;
pub use staff::StaffScreen;

// ─── Screen Ids ─────────────────────────────────────────────────────────────

pub const DASHBOARD: &str = "console.dashboard";
pub const STAFF: &str = "console.staff";
pub const MAP: &str = "console.map";
pub const FORESTS: &str = "console.forests";
pub const DETECTION: &str = "console.detection";
pub const INCIDENTS: &str = "console.incidents";

/// Tab order.
pub const ALL: [&str; 6] = [DASHBOARD, STAFF, MAP, FORESTS, DETECTION, INCIDENTS];

// ─── Search Input ───────────────────────────────────────────────────────────

/// Route a key through a registry's search box.
///
/// `/` opens the box. While it is open, characters edit the query and
/// `Enter`/`Esc` close it (the query stays applied). Returns `None` for keys
/// the screen should handle itself.
pub(crate) fn search_input<E: Entity>(
    registry: &mut RegistryState<E>,
    searching: &mut bool,
    event: &InputEvent,
) -> Option<ScreenAction> {
    let InputEvent::Key(code, _) = event else {
        return None;
    };
    if !*searching {
        if *code == KeyCode::Char('/') {
            *searching = true;
            return Some(ScreenAction::Consumed);
        }
        return None;
    }
    match code {
        KeyCode::Esc | KeyCode::Enter => *searching = false,
        KeyCode::Backspace => registry.pop_char(),
        KeyCode::Up | KeyCode::Down => return None,
        _ => {
            if let Some(ch) = event.typed_char()
                && let Err(error) = registry.push_char(ch)
            {
                if error.is_recoverable() {
                    debug!(target: span_names::CONSOLE, %error, "keystroke rejected");
                } else {
                    warn!(target: span_names::CONSOLE, %error, "search input failed");
                }
            }
        }
    }
    Some(ScreenAction::Consumed)
}

#[cfg(test)]
pub(crate) mod test_support {
    use forestguard_tui::{Screen, ScreenContext, ScreenId, Theme};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    pub fn ctx(id: &str) -> ScreenContext {
        ScreenContext {
            active_screen: ScreenId::new(id),
            area: Rect::new(0, 0, 120, 36),
            theme: Theme::dark(),
            focused: true,
        }
    }

    /// Render a screen into a test buffer and return it row by row.
    pub fn render(screen: &dyn Screen, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let ctx = ScreenContext {
            area: Rect::new(0, 0, width, height),
            ..ctx(screen.id().as_str())
        };
        terminal.draw(|frame| screen.render(frame, &ctx)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_owned())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
