//! Zone map: one marker per zone on the normalized plane, mouse and keyboard
//! selection, a risk summary strip and the selected zone's conditions.

use std::any::Any;

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use forestguard_core::tracing_config::span_names;
use forestguard_core::{
    EntityStore, InMemoryStore, MapState, RiskLevel, RiskSummary, Viewport, Zone,
};
use forestguard_tui::{InputEvent, Screen, ScreenAction, ScreenContext, ScreenId, Theme};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::debug;

use super::widgets::{badge, empty_detail, field, panel};

const MARKER: &str = "●";
const MARKER_SELECTED: &str = "◉";

/// Areas of the map screen: summary strip, map panel, detail panel.
fn split(area: Rect) -> [Rect; 3] {
    let [summary, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(4)]).areas(area);
    let [map, detail] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(body);
    [summary, map, detail]
}

/// Terminal cells the map plane occupies for a given content area.
#[must_use]
pub fn viewport_for(area: Rect) -> Viewport {
    let [_, map, _] = split(area);
    let inner = Block::bordered().inner(map);
    Viewport::new(inner.x, inner.y, inner.width, inner.height)
}

pub struct ZoneMapScreen {
    id: ScreenId,
    map: MapState<Zone>,
}

impl ZoneMapScreen {
    #[must_use]
    pub fn new(store: InMemoryStore<Zone>, hit_tolerance: f64) -> Self {
        Self {
            id: ScreenId::new(super::MAP),
            map: MapState::new(store, hit_tolerance),
        }
    }

    #[must_use]
    pub const fn map(&self) -> &MapState<Zone> {
        &self.map
    }

    fn click(&mut self, column: u16, row: u16, area: Rect) -> ScreenAction {
        let viewport = viewport_for(area);
        if !viewport.contains(column, row) {
            return ScreenAction::Ignored;
        }
        match self.map.click_cell(column, row, viewport) {
            Some(id) => debug!(target: span_names::CONSOLE, zone = %id, "zone clicked"),
            None => debug!(
                target: span_names::CONSOLE,
                column,
                row,
                "click missed every marker"
            ),
        }
        ScreenAction::Consumed
    }
}

fn summary_line(theme: &Theme, summary: RiskSummary) -> Line<'static> {
    let mut spans = vec![Span::styled(" Risk summary  ", theme.muted_style())];
    for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
        spans.push(badge(theme, level));
        spans.push(Span::raw(format!(" {} zones   ", summary.count(level))));
    }
    Line::from(spans)
}

fn detail_lines(theme: &Theme, zone: &Zone) -> Vec<Line<'static>> {
    let at = zone.coordinates;
    vec![
        Line::from(vec![
            Span::styled(format!("Zone {}", zone.id), theme.title_style()),
            Span::raw("  "),
            badge(theme, zone.risk),
        ]),
        Line::from(Span::styled(zone.name.clone(), theme.muted_style())),
        Line::default(),
        field(theme, "Temperature", format!("{}°C", zone.temperature)),
        field(theme, "Humidity", format!("{}%", zone.humidity)),
        field(theme, "Wind speed", format!("{} km/h", zone.wind_speed)),
        field(theme, "Staff", zone.staff.to_string()),
        field(theme, "Last inspection", zone.last_inspection.as_str()),
        field(theme, "Position", format!("{:.0}, {:.0}", at.x(), at.y())),
    ]
}

impl Screen for ZoneMapScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        "Zone Map"
    }

    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext) {
        let theme = &ctx.theme;
        let [summary_area, map_area, detail_area] = split(ctx.area);

        let summary = RiskSummary::from_zones(self.map.store().list());
        frame.render_widget(
            Paragraph::new(summary_line(theme, summary)).block(panel("Zones", theme, false)),
            summary_area,
        );

        frame.render_widget(panel("Zone Map", theme, ctx.focused), map_area);
        let viewport = viewport_for(ctx.area);
        let view = self.map.compose();
        let right_edge = viewport.x.saturating_add(viewport.width);
        let bottom_edge = viewport.y.saturating_add(viewport.height);
        for marker in &view.markers {
            let (column, row) = marker.at.to_cell(viewport);
            if column >= right_edge || row >= bottom_edge {
                continue;
            }
            let style = self
                .map
                .store()
                .get(marker.id)
                .map_or_else(|_| theme.muted_style(), |zone| theme.category_style(zone.risk));
            let (symbol, style) = if marker.selected {
                (MARKER_SELECTED, theme.highlight_style())
            } else {
                (MARKER, style)
            };
            let room = usize::from(right_edge - column);
            let buffer = frame.buffer_mut();
            buffer.set_stringn(column, row, symbol, room, style);
            if room > 1 {
                buffer.set_stringn(
                    column + 1,
                    row,
                    format!(" {}", marker.id),
                    room - 1,
                    theme.muted_style(),
                );
            }
        }

        let detail_block = panel("Zone Details", theme, false);
        match view.detail.selected() {
            Some(zone) => frame.render_widget(
                Paragraph::new(detail_lines(theme, zone))
                    .wrap(Wrap { trim: false })
                    .block(detail_block),
                detail_area,
            ),
            None => frame.render_widget(
                empty_detail(theme, "Click on a zone marker to view details", detail_block),
                detail_area,
            ),
        }
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &ScreenContext) -> ScreenAction {
        match event {
            InputEvent::Mouse(MouseEventKind::Down(MouseButton::Left), column, row) => {
                self.click(*column, *row, ctx.area)
            }
            InputEvent::Key(KeyCode::Down | KeyCode::Char('j' | 'n'), _) => {
                self.map.select_next();
                ScreenAction::Consumed
            }
            InputEvent::Key(KeyCode::Esc, _) if self.map.selection().current().is_some() => {
                self.map.deselect();
                ScreenAction::Consumed
            }
            _ => ScreenAction::Ignored,
        }
    }

    fn hints(&self) -> &str {
        "click a marker · n next zone · Esc clear"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
