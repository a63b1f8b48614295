use ratatui::{prelude::*, widgets::*};

use crate::models::NoticeKind;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Renders a checkbox list with a highlighted row
pub fn render_check_list<'a>(
    items: &'a [(String, bool)], // label, selected
    title: &'a str,
    highlighted: usize,
    is_focused: bool,
) -> List<'a> {
    let items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, (label, checked))| {
            let style = if is_focused && i == highlighted {
                Style::default().fg(Color::Yellow).bold()
            } else if *checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            let prefix = if *checked { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", prefix, label)).style(style)
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    )
}

/// Notice severity color
pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Warning => Color::Yellow,
        NoticeKind::Error => Color::Red,
    }
}
