use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Lighten an RGB color towards white by `factor` (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn lighten_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let lr = (r as f32 + (255.0 - r as f32) * f).round().clamp(0.0, 255.0) as u8;
            let lg = (g as f32 + (255.0 - g as f32) * f).round().clamp(0.0, 255.0) as u8;
            let lb = (b as f32 + (255.0 - b as f32) * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(lr, lg, lb)
        }
        other => other,
    }
}

/// Named label styles a field can opt into via its `label_style` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    Primary,
    #[default]
    Secondary,
    Muted,
    Accent,
    Error,
}

impl LabelStyle {
    /// Resolves a selector; unknown or missing selectors use the secondary style.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("primary") => LabelStyle::Primary,
            Some("muted") => LabelStyle::Muted,
            Some("accent") => LabelStyle::Accent,
            Some("error") => LabelStyle::Error,
            _ => LabelStyle::Secondary,
        }
    }

    pub fn style<T: Theme + ?Sized>(&self, theme: &T) -> Style {
        match self {
            LabelStyle::Primary => theme.text_primary_style(),
            LabelStyle::Secondary => theme.text_secondary_style(),
            LabelStyle::Muted => theme.text_muted_style(),
            LabelStyle::Accent => theme.accent_emphasis_style(),
            LabelStyle::Error => theme.status_error(),
        }
    }
}
