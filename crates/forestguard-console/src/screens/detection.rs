//! Fire detection: system fleet status, confidence gauges and recent
//! detections.

use std::any::Any;

use crossterm::event::KeyCode;
use forestguard_core::{
    Detection, DetectionStats, DetectionSystem, EntityStore, InMemoryStore, RegistryState,
};
use forestguard_tui::{InputEvent, Screen, ScreenAction, ScreenContext, ScreenId, Theme};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};

use super::widgets::{badge, columns, empty_detail, field, meter, panel, row_style, stat_card};

const GAUGE_WIDTH: usize = 10;

pub struct DetectionScreen {
    id: ScreenId,
    systems: RegistryState<DetectionSystem>,
    detections: InMemoryStore<Detection>,
}

impl DetectionScreen {
    #[must_use]
    pub fn new(
        systems: InMemoryStore<DetectionSystem>,
        detections: InMemoryStore<Detection>,
    ) -> Self {
        Self {
            id: ScreenId::new(super::DETECTION),
            systems: RegistryState::new(systems),
            detections,
        }
    }

    #[must_use]
    pub const fn systems(&self) -> &RegistryState<DetectionSystem> {
        &self.systems
    }

    #[must_use]
    pub fn stats(&self) -> DetectionStats {
        DetectionStats::compute(self.systems.store().list())
    }
}

fn system_lines(theme: &Theme, system: &DetectionSystem) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(system.name.clone(), theme.title_style()),
            Span::raw("  "),
            badge(theme, system.status),
        ]),
        Line::from(Span::styled(system.system_type.clone(), theme.muted_style())),
        field(theme, "Location", system.location.as_str()),
        field(theme, "Confidence", meter(system.confidence, GAUGE_WIDTH)),
        field(theme, "Last scan", system.last_scan.as_str()),
        field(theme, "Open alerts", system.alerts.to_string()),
    ]
}

impl Screen for DetectionScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        "Detection"
    }

    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext) {
        let theme = &ctx.theme;
        let [cards_area, body] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(6)]).areas(ctx.area);
        let [systems_area, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body);
        let [detail_area, detections_area] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(4)]).areas(right);

        let stats = self.stats();
        let cards = [
            ("Systems Online", format!("{}/{}", stats.online, stats.systems)),
            ("Open Alerts", stats.total_alerts.to_string()),
            ("Detections", self.detections.len().to_string()),
        ];
        for ((title, value), area) in cards.into_iter().zip(columns(cards_area, 3)) {
            frame.render_widget(stat_card(theme, title, value), area);
        }

        let view = self.systems.compose();
        let systems_block = panel("Detection Systems", theme, ctx.focused);
        if view.rows.is_empty() {
            frame.render_widget(
                empty_detail(theme, "No detection systems registered", systems_block),
                systems_area,
            );
        } else {
            let items: Vec<ListItem<'_>> = view
                .rows
                .iter()
                .map(|system| {
                    let selected = self.systems.selection().is_selected(&system.id);
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(system.name.as_str(), row_style(theme, selected)),
                            Span::raw(" "),
                            badge(theme, system.status),
                        ]),
                        Line::from(Span::styled(
                            format!(
                                "  {}  {}",
                                meter(system.confidence, GAUGE_WIDTH),
                                system.location
                            ),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(systems_block), systems_area);
        }

        let detail_block = panel("System Details", theme, false);
        match view.detail.selected() {
            Some(system) => frame.render_widget(
                Paragraph::new(system_lines(theme, system))
                    .wrap(Wrap { trim: false })
                    .block(detail_block),
                detail_area,
            ),
            None => frame.render_widget(
                empty_detail(theme, "Select a detection system to view details", detail_block),
                detail_area,
            ),
        }

        let detections_block = panel("Recent Detections", theme, false);
        let detections = self.detections.list();
        if detections.is_empty() {
            frame.render_widget(
                empty_detail(theme, "No recent detections", detections_block),
                detections_area,
            );
        } else {
            let items: Vec<ListItem<'_>> = detections
                .iter()
                .map(|detection| {
                    ListItem::new(vec![
                        Line::from(vec![
                            badge(theme, detection.status),
                            Span::raw(format!(
                                " {} · {}%",
                                detection.detection_type, detection.confidence
                            )),
                        ]),
                        Line::from(Span::styled(
                            format!(
                                "  {} · {} · {}°C · {} km/h",
                                detection.timestamp,
                                detection.location,
                                detection.temperature,
                                detection.wind_speed
                            ),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(detections_block), detections_area);
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &ScreenContext) -> ScreenAction {
        let InputEvent::Key(code, _) = event else {
            return ScreenAction::Ignored;
        };
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.systems.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.systems.select_next(),
            KeyCode::Esc if self.systems.selection().current().is_some() => {
                self.systems.deselect();
            }
            _ => return ScreenAction::Ignored,
        }
        ScreenAction::Consumed
    }

    fn hints(&self) -> &str {
        "↑↓ select system · Esc clear"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use forestguard_core::EntityId;

    use super::*;
    use crate::data_source::{DataSource, MockDataSource};
    use crate::screens::test_support::{ctx, render};

    fn screen() -> DetectionScreen {
        let source = MockDataSource::sample();
        DetectionScreen::new(
            InMemoryStore::from_records(source.detection_systems().unwrap()).unwrap(),
            InMemoryStore::from_records(source.detections().unwrap()).unwrap(),
        )
    }

    #[test]
    fn stats_count_online_and_alerts() {
        let stats = screen().stats();
        assert_eq!(stats.systems, 3);
        assert_eq!(stats.online, 2);
        assert_eq!(stats.total_alerts, 3);
    }

    #[test]
    fn arrows_select_systems() {
        let mut screen = screen();
        let ctx = ctx(super::super::DETECTION);
        screen.handle_input(&InputEvent::key(KeyCode::Up), &ctx);
        assert_eq!(screen.systems().selection().current(), Some(&EntityId::Num(3)));
        screen.handle_input(&InputEvent::key(KeyCode::Esc), &ctx);
        assert!(screen.systems().selection().current().is_none());
    }

    #[test]
    fn renders_gauges_and_detections() {
        let mut screen = screen();
        let text = render(&screen, 120, 36);
        assert!(text.contains("2/3"));
        assert!(text.contains("██████████ 95%"));
        assert!(text.contains("░░░░░░░░░░ 0%"));
        assert!(text.contains(" false-positive "));
        assert!(text.contains("Select a detection system to view details"));

        screen.handle_input(&InputEvent::key(KeyCode::Down), &ctx(super::super::DETECTION));
        let text = render(&screen, 120, 36);
        assert!(text.contains("30 seconds ago"));
    }

    #[test]
    fn empty_fleet_renders_placeholders() {
        let screen = DetectionScreen::new(InMemoryStore::new(), InMemoryStore::new());
        let text = render(&screen, 120, 36);
        assert!(text.contains("No detection systems registered"));
        assert!(text.contains("No recent detections"));
        assert!(text.contains("0/0"));
    }
}
