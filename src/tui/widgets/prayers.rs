use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{PrayerSchedule, PrayerType};
use crate::tui::theme;
use crate::utils::format::{format_time_12h, pad_display};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    schedule: Option<&PrayerSchedule>,
    next: Option<PrayerType>,
) {
    let block = Block::default()
        .title(Span::styled(" أوقات الصلاة ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let items: Vec<ListItem> = PrayerType::ALL
        .iter()
        .map(|prayer| {
            let time_str = schedule
                .map(|s| format_time_12h(s.time(*prayer)))
                .unwrap_or_else(|| "--:--".to_string());

            let is_next = next == Some(*prayer);
            let marker = if is_next { "▶ " } else { "  " };

            let line = Line::from(vec![
                Span::raw(format!("  {}", marker)),
                Span::raw(pad_display(prayer.display_name(), 10)),
                Span::styled(pad_display(prayer.api_key(), 10), theme::dim()),
                Span::raw(time_str),
            ]);

            if is_next {
                ListItem::new(line).style(theme::next_row())
            } else {
                ListItem::new(line).style(theme::bold())
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
