use chrono::NaiveDateTime;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::format::{format_clock, format_date};
use crate::utils::hijri::hijri_string;

pub fn render(frame: &mut Frame, area: Rect, now: NaiveDateTime, hijri_offset: i32) {
    let gregorian = format_date(now.date());
    let hijri = hijri_string(now.date(), hijri_offset).unwrap_or_default();

    let title_line = Line::from(vec![
        Span::styled("  مواقيت  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled(format_clock(now.time()), theme::bold()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(hijri, theme::teal()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(gregorian, theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(""), date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
