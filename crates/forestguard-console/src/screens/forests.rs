//! Forest registry.

use std::any::Any;

use crossterm::event::KeyCode;
use forestguard_core::{EntityStore, Forest, InMemoryStore, RegistryState, RiskLevel, RiskSummary};
use forestguard_tui::{InputEvent, Screen, ScreenAction, ScreenContext, ScreenId, Theme};
use ratatui::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};

use super::search_input;
use super::widgets::{
    RegistryLayout, badge, columns, empty_detail, field, panel, row_style, search_bar, stat_card,
};

pub struct ForestRegistryScreen {
    id: ScreenId,
    registry: RegistryState<Forest>,
    searching: bool,
}

impl ForestRegistryScreen {
    #[must_use]
    pub fn new(store: InMemoryStore<Forest>, max_query_len: usize) -> Self {
        Self {
            id: ScreenId::new(super::FORESTS),
            registry: RegistryState::new(store).with_max_query_len(max_query_len),
            searching: false,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &RegistryState<Forest> {
        &self.registry
    }

    fn risk_counts(&self) -> RiskSummary {
        let mut summary = RiskSummary::default();
        for forest in self.registry.store().list() {
            match forest.risk {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }
}

fn detail_lines(theme: &Theme, forest: &Forest) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(forest.name.clone(), theme.title_style()),
            Span::raw("  "),
            badge(theme, forest.risk),
        ]),
        Line::from(Span::styled(forest.location.clone(), theme.muted_style())),
        Line::default(),
        field(theme, "Area", forest.area_label()),
        field(theme, "Type", forest.forest_type.as_str()),
        field(theme, "Established", forest.established.to_string()),
        field(theme, "Zones", forest.zones.to_string()),
        field(theme, "Staff", forest.staff.to_string()),
        field(theme, "Species", forest.dominant_species.as_str()),
        field(theme, "Last survey", forest.last_survey.as_str()),
    ]
}

impl Screen for ForestRegistryScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        "Forests"
    }

    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext) {
        let theme = &ctx.theme;
        let layout = RegistryLayout::split(ctx.area);
        let risk = self.risk_counts();
        let cards = [
            ("Forests", self.registry.store().len()),
            ("High Risk", risk.high),
            ("Medium Risk", risk.medium),
            ("Low Risk", risk.low),
        ];
        for ((title, value), area) in cards.into_iter().zip(columns(layout.stats, 4)) {
            frame.render_widget(stat_card(theme, title, value.to_string()), area);
        }

        let view = self.registry.compose();
        frame.render_widget(
            search_bar(theme, self.registry.query(), self.searching, view.rows.len(), view.total),
            layout.search,
        );

        let list_block = panel("Forest Registry", theme, ctx.focused && !self.searching);
        if view.rows.is_empty() {
            frame.render_widget(
                empty_detail(theme, "No forests match the search", list_block),
                layout.list,
            );
        } else {
            let items: Vec<ListItem<'_>> = view
                .rows
                .iter()
                .map(|forest| {
                    let selected = self.registry.selection().is_selected(&forest.id);
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(forest.name.as_str(), row_style(theme, selected)),
                            Span::raw(" "),
                            badge(theme, forest.risk),
                        ]),
                        Line::from(Span::styled(
                            format!("  {} · {}", forest.location, forest.area_label()),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(list_block), layout.list);
        }

        let detail_block = panel("Details", theme, false);
        match view.detail.selected() {
            Some(forest) => frame.render_widget(
                Paragraph::new(detail_lines(theme, forest))
                    .wrap(Wrap { trim: false })
                    .block(detail_block),
                layout.detail,
            ),
            None => frame.render_widget(
                empty_detail(theme, "Select a forest to view details", detail_block),
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
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.registry.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.registry.select_next(),
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
            "/ search · ↑↓ select · Esc clear"
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
