//! Dashboard: headline numbers, recent alerts, forest overview and the
//! activity feed. Read-only.

use std::any::Any;

use forestguard_core::{ActivityEntry, Alert, DashboardStats, EntityStore, Forest};
use forestguard_tui::{InputEvent, Screen, ScreenAction, ScreenContext, ScreenId};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};

use super::widgets::{badge, columns, empty_detail, panel, stat_card};
use crate::state::AppState;

pub struct DashboardScreen {
    id: ScreenId,
    stats: DashboardStats,
    alerts: Vec<Alert>,
    forests: Vec<Forest>,
    activity: Vec<ActivityEntry>,
}

impl DashboardScreen {
    /// Snapshot the dashboard inputs from the loaded state.
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            id: ScreenId::new(super::DASHBOARD),
            stats: state.dashboard_stats(),
            alerts: state.alerts.list().to_vec(),
            forests: state.forests.list().to_vec(),
            activity: state.activity.clone(),
        }
    }

    #[must_use]
    pub const fn stats(&self) -> &DashboardStats {
        &self.stats
    }
}

impl Screen for DashboardScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        "Dashboard"
    }

    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext) {
        let theme = &ctx.theme;
        let [cards, middle, feed] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(6),
        ])
        .areas(ctx.area);

        let headline = [
            ("Total Forests", self.stats.total_forests.to_string()),
            ("Active Staff", self.stats.active_staff.to_string()),
            ("Monitoring Zones", self.stats.monitoring_zones.to_string()),
            ("Active Alerts", self.stats.active_alerts.to_string()),
        ];
        for ((title, value), area) in headline.into_iter().zip(columns(cards, 4)) {
            frame.render_widget(stat_card(theme, title, value), area);
        }

        let [alerts_area, forests_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(middle);

        let alerts_block = panel("Recent Alerts", theme, false);
        if self.alerts.is_empty() {
            frame.render_widget(empty_detail(theme, "No alerts", alerts_block), alerts_area);
        } else {
            let items: Vec<ListItem<'_>> = self
                .alerts
                .iter()
                .map(|alert| {
                    ListItem::new(vec![
                        Line::from(vec![
                            badge(theme, alert.status),
                            Span::raw(format!(" {} ", alert.alert_type)),
                            Span::styled(alert.time.as_str(), theme.muted_style()),
                        ]),
                        Line::from(Span::styled(
                            format!("  {} · {}", alert.forest, alert.zone),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(alerts_block), alerts_area);
        }

        let forests_block = panel("Forest Overview", theme, false);
        if self.forests.is_empty() {
            frame.render_widget(
                empty_detail(theme, "No forests registered", forests_block),
                forests_area,
            );
        } else {
            let items: Vec<ListItem<'_>> = self
                .forests
                .iter()
                .map(|forest| {
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(forest.name.as_str(), theme.title_style()),
                            Span::raw(" "),
                            badge(theme, forest.risk),
                        ]),
                        Line::from(Span::styled(
                            format!("  {} zones · {} staff", forest.zones, forest.staff),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(forests_block), forests_area);
        }

        let feed_block = panel("Recent Activity", theme, false);
        let lines: Vec<Line<'_>> = self
            .activity
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::raw(format!(" • {}  ", entry.message)),
                    Span::styled(entry.time.as_str(), theme.muted_style()),
                ])
            })
            .collect();
        if lines.is_empty() {
            frame.render_widget(empty_detail(theme, "No recent activity", feed_block), feed);
        } else {
            frame.render_widget(Paragraph::new(lines).block(feed_block), feed);
        }
    }

    fn handle_input(&mut self, _event: &InputEvent, _ctx: &ScreenContext) -> ScreenAction {
        ScreenAction::Ignored
    }

    fn hints(&self) -> &str {
        "Tab next · 1-6 jump · : palette"
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
    use super::*;
    use crate::data_source::MockDataSource;
    use crate::screens::test_support::{ctx, render};

    fn screen() -> DashboardScreen {
        DashboardScreen::new(&AppState::load(&MockDataSource::sample()).unwrap())
    }

    #[test]
    fn headline_numbers_come_from_stores() {
        let screen = screen();
        assert_eq!(screen.stats().total_forests, 3);
        assert_eq!(screen.stats().monitoring_zones, 105);
    }

    #[test]
    fn renders_cards_alerts_and_feed() {
        let text = render(&screen(), 120, 30);
        assert!(text.contains("Total Forests"));
        assert!(text.contains("105"));
        assert!(text.contains("High Risk"));
        assert!(text.contains("Oak Ridge Forest"));
        assert!(text.contains("Weekly forest inspection completed"));
    }

    #[test]
    fn empty_state_renders_placeholders() {
        let screen = DashboardScreen::new(&AppState::load(&MockDataSource::empty()).unwrap());
        let text = render(&screen, 120, 30);
        assert!(text.contains("No alerts"));
        assert!(text.contains("No recent activity"));
    }

    #[test]
    fn ignores_input() {
        let mut screen = screen();
        assert_eq!(
            screen.handle_input(&InputEvent::char('x'), &ctx(super::super::DASHBOARD)),
            ScreenAction::Ignored
        );
    }
}
