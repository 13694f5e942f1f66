use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, has_notice: bool) {
    let mut hints = vec![("[l]", " تحديد الموقع  ")];
    if has_notice {
        hints.push(("[x]", " إخفاء التنبيه  "));
    }
    hints.push(("[?]", " مساعدة  "));
    hints.push(("[q]", " خروج"));

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
