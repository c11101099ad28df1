//! Overlay rendering: help, alerts and the command palette.
//!
//! The shell owns the overlay stack and the palette state; these functions
//! draw them on top of the active screen.

use forestguard_tui::{CommandPalette, OverlayKind, OverlayRequest, Theme};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, Paragraph, Wrap};

// ─── Popup Area ─────────────────────────────────────────────────────────────

/// Centered popup rectangle, sized as a percentage of `area`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

fn popup_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.focus_border_style())
        .title(Span::styled(format!(" {title} "), theme.title_style()))
        .style(theme.base())
}

// ─── Help Overlay ───────────────────────────────────────────────────────────

/// One row of the shortcut table.
#[derive(Debug, Clone, Copy)]
pub struct HelpEntry {
    pub key: &'static str,
    pub description: &'static str,
}

#[must_use]
pub fn default_help_entries() -> Vec<HelpEntry> {
    let entry = |key, description| HelpEntry { key, description };
    vec![
        entry("? / F1", "Toggle help"),
        entry("q / Ctrl+C", "Quit"),
        entry("Ctrl+P / :", "Command palette"),
        entry("Tab / Shift+Tab", "Next / previous screen"),
        entry("1-6", "Jump to screen"),
        entry("Ctrl+T", "Switch dark / light theme"),
        entry("/", "Search the current list"),
        entry("j / Down", "Select next"),
        entry("k / Up", "Select previous"),
        entry("Esc", "Clear selection, then search"),
        entry("Del", "Remove selected staff member"),
        entry("y", "Cycle incident year"),
        entry("Click", "Select a zone on the map"),
    ]
}

pub fn render_help_overlay(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem<'_>> = default_help_entries()
        .into_iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<18}", entry.key),
                    theme.title_style().add_modifier(Modifier::BOLD),
                ),
                Span::raw(entry.description),
            ]))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(popup_block("Keyboard Shortcuts", theme)),
        popup,
    );
}

// ─── Alert Overlay ──────────────────────────────────────────────────────────

pub fn render_alert_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    request: &OverlayRequest,
    theme: &Theme,
) {
    let popup = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup);

    let body = request.body.as_deref().unwrap_or("(no details)");
    let content = Paragraph::new(vec![
        Line::from(body.to_owned()),
        Line::default(),
        Line::from(Span::styled("Enter / Esc to close", theme.muted_style())),
    ])
    .wrap(Wrap { trim: true })
    .block(popup_block(&request.title, theme));
    frame.render_widget(content, popup);
}

// ─── Command Palette ────────────────────────────────────────────────────────

/// Draw the palette near the top of the screen. No-op while closed.
pub fn render_palette_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    palette: &CommandPalette,
    theme: &Theme,
) {
    if !palette.is_open() {
        return;
    }

    let width = area.width.min(60);
    let height = area.height.saturating_sub(2).min(16);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y.saturating_add(1),
        width,
        height,
    );
    frame.render_widget(Clear, popup);

    let [input_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(popup);

    let input = if palette.query().is_empty() {
        Span::styled("Type to search...", theme.muted_style())
    } else {
        Span::raw(palette.query().to_owned())
    };
    frame.render_widget(
        Paragraph::new(input).block(popup_block("Command Palette", theme)),
        input_area,
    );

    let items: Vec<ListItem<'_>> = palette
        .filtered()
        .into_iter()
        .enumerate()
        .map(|(index, action)| {
            let style = if index == palette.highlighted() {
                theme.highlight_style()
            } else {
                theme.base()
            };
            let mut spans = vec![Span::styled(action.label.as_str(), style)];
            if let Some(shortcut) = &action.shortcut {
                spans.push(Span::styled(format!("  ({shortcut})"), theme.muted_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = if items.is_empty() {
        List::new([ListItem::new(Span::styled("No matching actions", theme.muted_style()))])
    } else {
        List::new(items)
    };
    frame.render_widget(
        list.block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style())
                .style(theme.base()),
        ),
        list_area,
    );
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

pub fn render_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    request: &OverlayRequest,
    theme: &Theme,
) {
    match request.kind {
        OverlayKind::Help => render_help_overlay(frame, area, theme),
        OverlayKind::Alert => render_alert_overlay(frame, area, request, theme),
    }
}

#[cfg(test)]
mod tests {
    use forestguard_tui::{Action, ActionCategory};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(f: impl FnOnce(&mut Frame<'_>)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(f).unwrap();
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

    fn palette_frame(frame: &mut Frame<'_>, palette: &CommandPalette) {
        let area = frame.area();
        render_palette_overlay(frame, area, palette, &Theme::dark());
    }

    #[test]
    fn centered_rect_within_bounds() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert!(popup.bottom() <= area.bottom());
    }

    #[test]
    fn help_entries_have_content() {
        for entry in default_help_entries() {
            assert!(!entry.key.is_empty());
            assert!(!entry.description.is_empty());
        }
    }

    #[test]
    fn help_overlay_lists_shortcuts() {
        let theme = Theme::dark();
        let text = draw(|frame| {
            let area = frame.area();
            render_overlay(frame, area, &OverlayRequest::help(), &theme);
        });
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Command palette"));
    }

    #[test]
    fn alert_overlay_shows_body() {
        let theme = Theme::light();
        let request = OverlayRequest::alert("Staff removed", "Gone from the roster.");
        let text = draw(|frame| {
            let area = frame.area();
            render_overlay(frame, area, &request, &theme);
        });
        assert!(text.contains("Staff removed"));
        assert!(text.contains("Gone from the roster."));
    }

    #[test]
    fn palette_closed_draws_nothing() {
        let palette = CommandPalette::new();
        let text = draw(|frame| palette_frame(frame, &palette));
        assert!(text.trim().is_empty());
    }

    #[test]
    fn palette_lists_filtered_actions() {
        let mut palette = CommandPalette::new();
        palette.register(Action::new("nav.map", "Go to Zone Map", ActionCategory::Navigation));
        palette.register(
            Action::new("settings.theme", "Toggle Theme", ActionCategory::Settings)
                .with_shortcut("Ctrl+T"),
        );
        palette.open();
        let text = draw(|frame| palette_frame(frame, &palette));
        assert!(text.contains("Go to Zone Map"));
        assert!(text.contains("(Ctrl+T)"));

        for ch in "zzz".chars() {
            palette.push_char(ch);
        }
        let text = draw(|frame| palette_frame(frame, &palette));
        assert!(text.contains("No matching actions"));
    }
}
