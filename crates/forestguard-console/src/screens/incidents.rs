//! Incident history with a year selector applied on top of the text query.

use std::any::Any;

use crossterm::event::KeyCode;
use forestguard_core::tracing_config::span_names;
use forestguard_core::{
    EntityStore, InMemoryStore, Incident, IncidentStats, RegistryState, YearFilter,
};
use forestguard_tui::{InputEvent, Screen, ScreenAction, ScreenContext, ScreenId, Theme};
use ratatui::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};
use tracing::debug;

use super::search_input;
use super::widgets::{
    RegistryLayout, badge, columns, empty_detail, field, panel, row_style, search_bar, stat_card,
};

pub struct IncidentHistoryScreen {
    id: ScreenId,
    registry: RegistryState<Incident>,
    searching: bool,
    year: YearFilter,
    reporting_year: i32,
}

impl IncidentHistoryScreen {
    /// Starts filtered to `reporting_year`.
    #[must_use]
    pub fn new(store: InMemoryStore<Incident>, max_query_len: usize, reporting_year: i32) -> Self {
        Self {
            id: ScreenId::new(super::INCIDENTS),
            registry: RegistryState::new(store).with_max_query_len(max_query_len),
            searching: false,
            year: YearFilter::Year(reporting_year),
            reporting_year,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &RegistryState<Incident> {
        &self.registry
    }

    #[must_use]
    pub const fn year(&self) -> YearFilter {
        self.year
    }

    /// Advance the year selector.
    pub fn cycle_year(&mut self) {
        self.year = self.year.cycle(self.reporting_year);
        debug!(target: span_names::CONSOLE, year = %self.year, "incident year changed");
    }

    /// Incidents passing both the query and the year selector.
    #[must_use]
    pub fn visible(&self) -> Vec<&Incident> {
        let year = self.year;
        self.registry.compose_where(move |i| year.admits(i)).rows
    }
}

fn detail_lines(theme: &Theme, incident: &Incident) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(incident.title.clone(), theme.title_style()),
            Span::raw("  "),
            badge(theme, incident.severity),
        ]),
        Line::from(Span::styled(
            format!("{} {}", incident.date, incident.time),
            theme.muted_style(),
        )),
        Line::default(),
        field(theme, "Location", incident.location.as_str()),
        field(theme, "Cause", incident.cause.as_str()),
        field(theme, "Area", incident.area.as_str()),
        field(theme, "Duration", incident.duration.as_str()),
        field(theme, "Staff deployed", incident.staff_deployed.to_string()),
        field(theme, "Response", incident.response_time_label()),
        Line::from(vec![
            Span::styled(format!("{:<16}", "Status"), theme.muted_style()),
            badge(theme, incident.status),
        ]),
        field(theme, "Damages", incident.damages.as_str()),
        Line::default(),
        Line::from(incident.description.clone()),
    ]
}

impl Screen for IncidentHistoryScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        "Incidents"
    }

    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext) {
        let theme = &ctx.theme;
        let layout = RegistryLayout::split(ctx.area);
        let stats = IncidentStats::compute(self.registry.store().list(), self.reporting_year);
        let cards = [
            ("Total Incidents", stats.total.to_string()),
            ("Resolved", stats.resolved.to_string()),
            ("This Year", stats.this_year.to_string()),
            ("Avg Response", stats.avg_response_label()),
        ];
        for ((title, value), area) in cards.into_iter().zip(columns(layout.stats, 4)) {
            frame.render_widget(stat_card(theme, title, value), area);
        }

        let year = self.year;
        let view = self.registry.compose_where(move |i| year.admits(i));
        frame.render_widget(
            search_bar(theme, self.registry.query(), self.searching, view.rows.len(), view.total),
            layout.search,
        );

        let list_block = panel(
            format!("Incident History · {year}"),
            theme,
            ctx.focused && !self.searching,
        );
        if view.rows.is_empty() {
            frame.render_widget(
                empty_detail(theme, "No incidents match the filters", list_block),
                layout.list,
            );
        } else {
            let items: Vec<ListItem<'_>> = view
                .rows
                .iter()
                .map(|incident| {
                    let selected = self.registry.selection().is_selected(&incident.id);
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(incident.title.as_str(), row_style(theme, selected)),
                            Span::raw(" "),
                            badge(theme, incident.severity),
                        ]),
                        Line::from(Span::styled(
                            format!("  {} · {}", incident.date, incident.location),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(list_block), layout.list);
        }

        let detail_block = panel("Details", theme, false);
        match view.detail.selected() {
            Some(incident) => frame.render_widget(
                Paragraph::new(detail_lines(theme, incident))
                    .wrap(Wrap { trim: true })
                    .block(detail_block),
                layout.detail,
            ),
            None => frame.render_widget(
                empty_detail(theme, "Select an incident to view details", detail_block),
                layout.detail,
            ),
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &ScreenContext) -> ScreenAction {
        if let Some(action) = search_input(&mut self.registry, &mut self.searching, event) {
            return action;
        }
        let InputEvent::Key(code, _) = event else {
            return ScreenAction::Ignored;
        };
        let year = self.year;
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.registry.select_prev_where(move |i| year.admits(i));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.registry.select_next_where(move |i| year.admits(i));
            }
            KeyCode::Char('y') => self.cycle_year(),
            KeyCode::Esc if self.registry.selection().current().is_some() => {
                self.registry.deselect();
            }
            KeyCode::Esc if !self.registry.query().is_empty() => self.registry.clear_query(),
            _ => return ScreenAction::Ignored,
        }
        ScreenAction::Consumed
    }

    fn captures_text(&self) -> bool {
        self.searching
    }

    fn hints(&self) -> &str {
        if self.searching {
            "type to filter · Enter/Esc done"
        } else {
            "/ search · y year · ↑↓ select · Esc clear"
        }
    }

    fn on_blur(&mut self) {
        self.searching = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
