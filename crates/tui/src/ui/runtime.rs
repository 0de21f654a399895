//! Runtime: terminal lifecycle and the event loop for a single bound field.
//!
//! Responsibilities
//! - Own the terminal lifecycle (alternate screen, raw mode, mouse, focus
//!   change and bracketed paste reporting).
//! - Initialize the widget against a host-owned [`FormControl`].
//! - Route events to the component, apply returned `Effect`s to the control
//!   and feed the transformed value back into the field.
//! - Finish on Enter (submit) or Esc / Ctrl-C (cancel). Enter is refused
//!   while a whole-value pattern is not fully matched.
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste, EnableFocusChange,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Layout, Rect},
    prelude::CrosstermBackend,
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, info, warn};

use boundfield_types::Effect;

use crate::ui::components::bound_input::{BoundInputComponent, BoundInputConfig, BoundInputState, FieldControl, FormControl};
use crate::ui::theme::{self, Theme};

type CrosstermTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

/// How the interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user pressed Enter; carries the last committed value.
    Submitted(String),
    Cancelled,
}

/// Runs one bound field interactively until it is submitted or cancelled.
pub fn run(config: BoundInputConfig) -> Result<Outcome> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, config);
    let restored = cleanup_terminal(&mut terminal);
    let outcome = outcome?;
    restored?;
    Ok(outcome)
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(terminal: &mut CrosstermTerminal, config: BoundInputConfig) -> Result<Outcome> {
    let theme = theme::load_from_env();
    let mut control = FormControl::new();
    let mut state = BoundInputState::new(config);
    state.init(&mut control)?;
    state.on_focus();
    let mut component = BoundInputComponent::new();

    loop {
        terminal.draw(|frame| draw(frame, &mut component, theme.as_ref(), &state))?;

        let event = event::read().context("failed to read terminal event")?;
        if let Event::Key(key) = &event
            && let Some(outcome) = session_key(*key, &state)
        {
            info!(field = %state.name(), ?outcome, "session finished");
            return Ok(outcome);
        }
        dispatch(&mut component, &mut state, &mut control, &event);
    }
}

/// Routes one event through the component and applies what it returns.
fn dispatch(component: &mut BoundInputComponent, state: &mut BoundInputState, control: &mut FormControl, event: &Event) {
    if matches!(event, Event::FocusLost) {
        control.mark_touched();
    }
    for effect in component.handle_event(state, event) {
        apply_effect(control, state, effect);
    }
}

/// Keys that end the session regardless of focus.
fn session_key(key: KeyEvent, state: &BoundInputState) -> Option<Outcome> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Enter if !state.is_complete() => {
            warn!(field = %state.name(), "value does not match the pattern yet; not submitting");
            None
        }
        KeyCode::Enter => Some(Outcome::Submitted(state.value().to_string())),
        KeyCode::Esc => Some(Outcome::Cancelled),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Outcome::Cancelled),
        _ => None,
    }
}

/// The host side of the data flow: committed values land in the control and
/// a value the transform changed is written back to the field.
fn apply_effect(control: &mut dyn FieldControl, state: &mut BoundInputState, effect: Effect) {
    match effect {
        Effect::ValueChanged(value) => {
            if state.field_type().is_masked() {
                debug!(field = %state.name(), "value changed");
            } else {
                debug!(field = %state.name(), %value, "value changed");
            }
            if state.buffer().input() != value {
                let cursor = state.buffer().cursor();
                state.set_value(value.clone());
                state.buffer_mut().set_cursor(cursor);
            }
            control.set_value(value);
        }
    }
}

fn draw(frame: &mut Frame, component: &mut BoundInputComponent, theme: &dyn Theme, state: &BoundInputState) {
    let [field_area, value_area, hint_area] = Layout::vertical([
        Constraint::Length(4), // label + field
        Constraint::Length(1), // committed value
        Constraint::Length(1), // hints
    ])
    .areas(frame.area());

    component.render(frame, field_area, theme, state);
    render_value_line(frame, value_area, theme, state);
    frame.render_widget(Paragraph::new(Line::from(hint_spans(theme))), hint_area);
}

fn render_value_line(frame: &mut Frame, area: Rect, theme: &dyn Theme, state: &BoundInputState) {
    if state.field_type().is_masked() {
        return;
    }
    let line = Line::from(vec![
        Span::styled("Value: ", theme.text_muted_style()),
        Span::styled(state.value().to_string(), theme.text_secondary_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn hint_spans(theme: &dyn Theme) -> Vec<Span<'static>> {
    [("Enter", " Submit  "), ("Esc", " Cancel")]
        .into_iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(key, theme.accent_emphasis_style()),
                Span::styled(label, theme.text_muted_style()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::bound_input::{KeyFilter, Transform};
    use boundfield_types::{FilterMode, TransformKind};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state(masked: bool) -> BoundInputState {
        let mut config = BoundInputConfig::new("name").expect("config").with_value("abc");
        if masked {
            config = config.with_field_type(boundfield_types::FieldType::Password);
        }
        let mut state = BoundInputState::new(config);
        state.init(&mut FormControl::new()).expect("init");
        state
    }

    #[test]
    fn enter_submits_committed_value_and_escape_cancels() {
        let state = state(false);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(session_key(enter, &state), Some(Outcome::Submitted("abc".to_string())));

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(session_key(esc, &state), Some(Outcome::Cancelled));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(session_key(ctrl_c, &state), Some(Outcome::Cancelled));

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(session_key(plain_c, &state), None);
    }

    #[test]
    fn effects_are_written_to_the_control() {
        let mut state = state(true);
        let mut control = FormControl::new();
        control.set_value("abc".to_string());

        apply_effect(&mut control, &mut state, Effect::ValueChanged("abcd".to_string()));

        assert_eq!(control.value(), "abcd");
        assert!(control.is_dirty());
    }

    #[test]
    fn transformed_value_is_fed_back_into_the_field() {
        let config = BoundInputConfig::new("code")
            .expect("config")
            .with_transform(Transform::from(TransformKind::Uppercase));
        let mut state = BoundInputState::new(config);
        let mut control = FormControl::new();
        state.init(&mut control).expect("init");
        state.on_focus();
        let mut component = BoundInputComponent::new();

        for c in ['a', 'b'] {
            dispatch(&mut component, &mut state, &mut control, &key(KeyCode::Char(c)));
        }

        assert_eq!(state.buffer().input(), "AB");
        assert_eq!(state.buffer().cursor(), 2);
        assert_eq!(state.value(), "AB");
        assert_eq!(control.value(), "AB");

        dispatch(&mut component, &mut state, &mut control, &key(KeyCode::Left));
        dispatch(&mut component, &mut state, &mut control, &key(KeyCode::Char('x')));
        assert_eq!(state.buffer().input(), "AXB");
        assert_eq!(state.buffer().cursor(), 2);
    }

    #[test]
    fn focus_lost_marks_the_control_touched() {
        let mut state = state(false);
        let mut control = FormControl::new();
        let mut component = BoundInputComponent::new();

        dispatch(&mut component, &mut state, &mut control, &Event::FocusLost);

        assert!(control.is_touched());
    }

    #[test]
    fn enter_waits_for_a_complete_whole_value() {
        let filter = KeyFilter::new("[0-9]{3}", FilterMode::WholeValue).expect("filter");
        let config = BoundInputConfig::new("pin").expect("config").with_filter(filter);
        let mut state = BoundInputState::new(config);
        let mut control = FormControl::new();
        state.init(&mut control).expect("init");
        state.on_focus();
        let mut component = BoundInputComponent::new();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        for c in ['1', '2'] {
            dispatch(&mut component, &mut state, &mut control, &key(KeyCode::Char(c)));
        }
        assert_eq!(session_key(enter, &state), None);

        dispatch(&mut component, &mut state, &mut control, &key(KeyCode::Char('3')));
        assert_eq!(session_key(enter, &state), Some(Outcome::Submitted("123".to_string())));
    }
}
