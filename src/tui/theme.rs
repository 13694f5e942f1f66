use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 18, 24);
pub const SURFACE: Color = Color::Rgb(22, 28, 36);
pub const BORDER: Color = Color::Rgb(48, 60, 74);
pub const TEXT: Color = Color::Rgb(226, 222, 210);
pub const TEXT_DIM: Color = Color::Rgb(120, 132, 146);
pub const GOLD: Color = Color::Rgb(212, 175, 85);
pub const TEAL: Color = Color::Rgb(72, 160, 150);
pub const RED: Color = Color::Rgb(190, 86, 70);
pub const NEXT_BG: Color = Color::Rgb(40, 52, 44);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn teal() -> Style {
    Style::default().fg(TEAL)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Row of the upcoming prayer.
pub fn next_row() -> Style {
    Style::default()
        .fg(GOLD)
        .bg(NEXT_BG)
        .add_modifier(Modifier::BOLD)
}
