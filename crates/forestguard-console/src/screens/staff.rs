//! Staff roster: searchable list, duty-status counts and a detail pane.

use std::any::Any;

use crossterm::event::KeyCode;
use forestguard_core::tracing_config::span_names;
use forestguard_core::{EntityStore, InMemoryStore, RegistryState, Staff, StaffStats};
use forestguard_tui::{InputEvent, Screen, ScreenAction, ScreenContext, ScreenId, Theme};
use ratatui::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};
use tracing::warn;

use super::search_input;
use super::widgets::{
    RegistryLayout, badge, columns, empty_detail, field, panel, row_style, search_bar, stat_card,
};

pub struct StaffScreen {
    id: ScreenId,
    registry: RegistryState<Staff>,
    searching: bool,
}

impl StaffScreen {
    #[must_use]
    pub fn new(store: InMemoryStore<Staff>, max_query_len: usize) -> Self {
        Self {
            id: ScreenId::new(super::STAFF),
            registry: RegistryState::new(store).with_max_query_len(max_query_len),
            searching: false,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &RegistryState<Staff> {
        &self.registry
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    fn remove_selected(&mut self) -> ScreenAction {
        let Some(id) = self.registry.selection().current().cloned() else {
            return ScreenAction::Ignored;
        };
        match self.registry.remove(&id) {
            Ok(member) => ScreenAction::Notify {
                title: "Staff removed".into(),
                body: format!("{} is no longer on the roster.", member.name),
            },
            Err(error) => {
                warn!(target: span_names::CONSOLE, %error, "staff removal failed");
                ScreenAction::Consumed
            }
        }
    }
}

fn detail_lines(theme: &Theme, member: &Staff) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(member.name.clone(), theme.title_style()),
            Span::raw("  "),
            badge(theme, member.status),
        ]),
        Line::from(Span::styled(member.role.clone(), theme.muted_style())),
        Line::default(),
        field(theme, "Forest", member.forest.as_str()),
        field(theme, "Zone", member.zone.as_str()),
        field(theme, "Phone", member.phone.as_str()),
        field(theme, "Email", member.email.as_str()),
        field(theme, "Experience", format!("{} years", member.experience_years)),
        field(theme, "Specialization", member.specialization.as_str()),
    ]
}

impl Screen for StaffScreen {
    fn id(&self) -> &ScreenId {
        &self.id
    }

    fn title(&self) -> &str {
        "Staff"
    }

    fn render(&self, frame: &mut Frame<'_>, ctx: &ScreenContext) {
        let theme = &ctx.theme;
        let layout = RegistryLayout::split(ctx.area);
        let stats = StaffStats::from_staff(self.registry.store().list());
        let cards = [
            ("Total Staff", stats.total),
            ("Active", stats.active),
            ("On Duty", stats.on_duty),
            ("Off Duty", stats.off_duty),
        ];
        for ((title, value), area) in cards.into_iter().zip(columns(layout.stats, 4)) {
            frame.render_widget(stat_card(theme, title, value.to_string()), area);
        }

        let view = self.registry.compose();
        frame.render_widget(
            search_bar(theme, self.registry.query(), self.searching, view.rows.len(), view.total),
            layout.search,
        );

        let list_block = panel("Staff Members", theme, ctx.focused && !self.searching);
        if view.rows.is_empty() {
            frame.render_widget(
                empty_detail(theme, "No staff members match the search", list_block),
                layout.list,
            );
        } else {
            let items: Vec<ListItem<'_>> = view
                .rows
                .iter()
                .map(|member| {
                    let selected = self.registry.selection().is_selected(&member.id);
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(member.name.as_str(), row_style(theme, selected)),
                            Span::raw(" "),
                            badge(theme, member.status),
                        ]),
                        Line::from(Span::styled(
                            format!("  {} · {}", member.role, member.forest),
                            theme.muted_style(),
                        )),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items).block(list_block), layout.list);
        }

        let detail_block = panel("Details", theme, false);
        match view.detail.selected() {
            Some(member) => frame.render_widget(
                Paragraph::new(detail_lines(theme, member))
                    .wrap(Wrap { trim: false })
                    .block(detail_block),
                layout.detail,
            ),
            None => frame.render_widget(
                empty_detail(theme, "Select a staff member to view details", detail_block),
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
            KeyCode::Delete => return self.remove_selected(),
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
            "/ search · ↑↓ select · Esc clear · Del remove"
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
