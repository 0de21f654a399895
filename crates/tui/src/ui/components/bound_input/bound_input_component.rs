use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tracing::trace;
use unicode_width::UnicodeWidthChar;

use boundfield_types::Effect;

use super::filter::{Admission, KeyDisposition};
use super::state::BoundInputState;
use crate::ui::theme::theme_helpers as th;
use crate::ui::theme::{LabelStyle, Theme};

const MASK_CHAR: char = '•';

/// Routes terminal events into a [`BoundInputState`] and draws it.
///
/// Every accepted edit produces exactly one [`Effect::ValueChanged`].
#[derive(Debug, Default)]
pub struct BoundInputComponent {
    /// Field rectangle from the last render, used for pointer hit-testing.
    field_area: Rect,
}

impl BoundInputComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches any terminal event the widget cares about.
    pub fn handle_event(&mut self, state: &mut BoundInputState, event: &Event) -> Vec<Effect> {
        match event {
            Event::Key(key) => self.handle_key_events(state, *key),
            Event::Paste(text) => self.handle_paste(state, text),
            Event::Mouse(mouse) => self.handle_mouse_events(state, *mouse),
            Event::FocusGained => {
                state.on_focus();
                Vec::new()
            }
            Event::FocusLost => {
                state.on_blur();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn handle_key_events(&mut self, state: &mut BoundInputState, key: KeyEvent) -> Vec<Effect> {
        if !accepts_input(state) || key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        let buffer = state.buffer_mut();
        match key.code {
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Home => buffer.move_home(),
            KeyCode::End => buffer.move_end(),
            KeyCode::Backspace => {
                if buffer.backspace() {
                    return vec![state.commit()];
                }
            }
            KeyCode::Delete => {
                if buffer.delete() {
                    return vec![state.commit()];
                }
            }
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(character) if !character.is_control() => return insert_char(state, character),
            _ => {}
        }
        Vec::new()
    }

    /// Handles a multi-character insertion; control characters (newlines included) are dropped first.
    pub fn handle_paste(&mut self, state: &mut BoundInputState, text: &str) -> Vec<Effect> {
        if !accepts_input(state) {
            return Vec::new();
        }
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        match state.admit(&text) {
            Admission::Accepted(kept) => {
                state.buffer_mut().insert_str(&kept);
                vec![state.commit()]
            }
            Admission::Suppressed => {
                trace!(field = %state.name(), "paste suppressed by filter");
                Vec::new()
            }
        }
    }

    /// A left click inside the field focuses it and moves the cursor; outside it blurs.
    pub fn handle_mouse_events(&mut self, state: &mut BoundInputState, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let pos = Position {
            x: mouse.column,
            y: mouse.row,
        };
        if self.field_area.contains(pos) {
            state.on_focus();
            let cursor = position_from_column(state, self.field_area, mouse.column);
            state.buffer_mut().set_cursor(cursor);
        } else {
            state.on_blur();
        }
        Vec::new()
    }

    /// Draws the label line and the bordered field.
    pub fn render(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme, state: &BoundInputState) {
        let label_height = u16::from(state.label().is_some());
        let [label_area, field_area] = Layout::vertical([Constraint::Length(label_height), Constraint::Length(3)]).areas(rect);

        if let Some(label) = state.label() {
            let style = LabelStyle::from_selector(state.config().label_style.as_deref()).style(theme);
            frame.render_widget(Paragraph::new(Line::from(Span::styled(label.to_string(), style))), label_area);
        }

        let focused = state.is_focused();
        let block = th::block(theme, None, focused);
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);
        self.field_area = inner;

        let buffer = state.buffer();
        let (line, cursor_column) = if buffer.is_empty() {
            (Line::from(Span::styled(state.placeholder().to_string(), theme.text_muted_style())), 0)
        } else if state.field_type().is_masked() {
            let masked: String = buffer.input().chars().map(|_| MASK_CHAR).collect();
            let column = buffer.input()[..buffer.cursor()].chars().count();
            (Line::from(Span::styled(masked, theme.text_primary_style())), column)
        } else {
            (
                Line::from(Span::styled(buffer.input().to_string(), theme.text_primary_style())),
                buffer.cursor_columns(),
            )
        };

        // Scroll horizontally so the cursor stays inside the field.
        let visible = usize::from(inner.width.max(1));
        let offset = (cursor_column + 1).saturating_sub(visible);
        let offset = u16::try_from(offset).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(line).scroll((0, offset)), inner);

        if focused && inner.width > 0 && inner.height > 0 {
            let column = u16::try_from(cursor_column).unwrap_or(u16::MAX).saturating_sub(offset);
            frame.set_cursor_position((inner.x.saturating_add(column), inner.y));
        }
    }
}

fn accepts_input(state: &BoundInputState) -> bool {
    state.is_initialized() && state.is_focused()
}

fn insert_char(state: &mut BoundInputState, character: char) -> Vec<Effect> {
    if state.filter_key(character) == KeyDisposition::Suppress {
        trace!(field = %state.name(), %character, "keystroke suppressed by filter");
        return Vec::new();
    }
    state.buffer_mut().insert_char(character);
    vec![state.commit()]
}

fn position_from_column(state: &BoundInputState, area: Rect, column: u16) -> usize {
    let relative = usize::from(column.saturating_sub(area.x));
    let masked = state.field_type().is_masked();
    let text = state.buffer().input();
    let mut cumulative = 0usize;
    for (byte_index, ch) in text.char_indices() {
        if cumulative >= relative {
            return byte_index;
        }
        cumulative += if masked { 1 } else { ch.width().unwrap_or(1) };
    }
    text.len()
}
