//! Small rendering helpers shared by the screens.

use forestguard_core::Category;
use forestguard_tui::Theme;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

/// Bordered panel with a padded title.
pub fn panel<'a>(title: impl Into<String>, theme: &Theme, focused: bool) -> Block<'a> {
    let border = if focused {
        theme.focus_border_style()
    } else {
        theme.border_style()
    };
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(Span::styled(format!(" {} ", title.into()), theme.title_style()))
}

/// Colored category badge, e.g. ` High `.
pub fn badge(theme: &Theme, category: impl Into<Category>) -> Span<'static> {
    let category = category.into();
    Span::styled(format!(" {} ", category.label()), theme.category_style(category))
}

/// `label: value` line for detail panes.
pub fn field(theme: &Theme, label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), theme.muted_style()),
        Span::raw(value.into()),
    ])
}

/// Placeholder shown when nothing is selected.
pub fn empty_detail<'a>(theme: &Theme, message: &'a str, block: Block<'a>) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(message, theme.muted_style())))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block)
}

/// One-line search box: `/ query` with a match count.
pub fn search_bar(
    theme: &Theme,
    query: &str,
    searching: bool,
    shown: usize,
    total: usize,
) -> Paragraph<'static> {
    let prompt_style = if searching {
        theme.title_style()
    } else {
        theme.muted_style()
    };
    let text = if query.is_empty() && !searching {
        Span::styled("press / to search", theme.muted_style())
    } else {
        Span::raw(query.to_owned())
    };
    let mut spans = vec![Span::styled(" / ", prompt_style), text];
    if searching {
        spans.push(Span::styled("▏", theme.title_style()));
    }
    spans.push(Span::styled(
        format!("   {shown} of {total}"),
        theme.muted_style(),
    ));
    Paragraph::new(Line::from(spans))
}

/// Headline number with a caption underneath.
pub fn stat_card<'a>(theme: &Theme, title: &'a str, value: String) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(theme.fg.to_ratatui())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(title, theme.muted_style())),
    ])
    .alignment(Alignment::Center)
    .block(Block::bordered().border_type(BorderType::Rounded).border_style(theme.border_style()))
}

/// Style for a list row.
pub fn row_style(theme: &Theme, selected: bool) -> Style {
    if selected {
        theme.highlight_style()
    } else {
        Style::default().fg(theme.fg.to_ratatui())
    }
}

/// Text gauge such as `█████████░ 95%`.
pub fn meter(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = (percent * width + 50) / 100;
    format!(
        "{}{} {percent}%",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

/// Split `area` into `n` equal columns.
pub fn columns(area: Rect, n: u16) -> Vec<Rect> {
    Layout::horizontal((0..n).map(|_| Constraint::Ratio(1, u32::from(n))))
        .split(area)
        .to_vec()
}

/// Areas of a searchable list screen.
#[derive(Debug, Clone, Copy)]
pub struct RegistryLayout {
    pub stats: Rect,
    pub search: Rect,
    pub list: Rect,
    pub detail: Rect,
}

impl RegistryLayout {
    /// Stat cards on top, then the search line, then list and detail side by side.
    pub fn split(area: Rect) -> Self {
        let [stats, search, body] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);
        let [list, detail] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body);
        Self {
            stats,
            search,
            list,
            detail,
        }
    }
}
