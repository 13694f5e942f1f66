use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::Location;
use crate::prayer_times::ScheduleSource;
use crate::tui::theme;

/// Location label plus any loading text or notices under it.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    location: &Location,
    source: Option<ScheduleSource>,
    loading: Option<&str>,
    notices: &[String],
) {
    let mut title = vec![
        Span::styled("📍 ", theme::gold()),
        Span::styled(location.label(), theme::bold()),
    ];
    if let Some(source) = source {
        title.push(Span::styled(format!("  ({})", source.label()), theme::dim()));
    }
    let mut lines = vec![Line::from(title)];

    if let Some(text) = loading {
        lines.push(Line::from(Span::styled(format!("⟳ {}", text), theme::teal())));
    }
    for notice in notices {
        lines.push(Line::from(Span::styled(format!("⚠ {}", notice), theme::red())));
    }

    let border_style = if notices.is_empty() {
        theme::border()
    } else {
        theme::red()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(theme::surface());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Rows needed to show `render`'s content without clipping.
pub fn height(loading: bool, notices: usize) -> u16 {
    3 + loading as u16 + notices as u16
}
