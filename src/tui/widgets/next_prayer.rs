use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{Countdown, NextPrayer};
use crate::tui::theme;
use crate::utils::format::format_time_12h;

pub fn render(frame: &mut Frame, area: Rect, next_prayer: Option<&(NextPrayer, Countdown)>) {
    let block = Block::default()
        .title(Span::styled(" الصلاة القادمة ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let content: Vec<Line> = match next_prayer {
        None => vec![
            Line::from(""),
            Line::from(Span::styled("--:--:--", theme::dim())),
        ],
        Some((next, countdown)) => {
            let when = if next.is_tomorrow { "غداً" } else { "اليوم" };
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    next.display_name,
                    theme::gold().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(format_time_12h(next.time), theme::bold()),
                    Span::styled(format!("  {}", when), theme::dim()),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    countdown.to_string(),
                    theme::teal().add_modifier(Modifier::BOLD),
                )),
            ]
        }
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
