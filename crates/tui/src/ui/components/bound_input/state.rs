use boundfield_types::{Effect, FieldType};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, trace};

use super::config::BoundInputConfig;
use super::control::FieldControl;
use super::filter::{Admission, KeyDisposition};
use crate::error::BoundInputError;
use crate::ui::components::common::TextInputState;

/// Mutable state of a bound input: edit buffer, committed value and focus.
///
/// The buffer holds what the user typed. The committed value is the buffer
/// after the transform ran, and is what every [`Effect::ValueChanged`] carries.
#[derive(Debug, Clone)]
pub struct BoundInputState {
    config: BoundInputConfig,
    buffer: TextInputState,
    value: String,
    initialized: bool,
    /// Focus of the widget as a whole, returned from [`HasFocus::focus`].
    pub(crate) container_focus: FocusFlag,
    /// Focus of the editable text area; this is what `is_focused` reports.
    pub(crate) f_input: FocusFlag,
}

impl BoundInputState {
    pub fn new(config: BoundInputConfig) -> Self {
        Self {
            config,
            buffer: TextInputState::default(),
            value: String::new(),
            initialized: false,
            container_focus: FocusFlag::default(),
            f_input: FocusFlag::default(),
        }
    }

    pub fn config(&self) -> &BoundInputConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    pub fn field_type(&self) -> FieldType {
        self.config.field_type
    }

    /// The last committed (transformed) value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn buffer(&self) -> &TextInputState {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut TextInputState {
        &mut self.buffer
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Copies the configured value into `control` and loads it into the field.
    ///
    /// Must be called exactly once, after configuration and before the widget
    /// receives events.
    pub fn init(&mut self, control: &mut dyn FieldControl) -> Result<(), BoundInputError> {
        if self.initialized {
            return Err(BoundInputError::AlreadyInitialized(self.config.name.clone()));
        }
        control.set_value(self.config.value.clone());
        self.buffer.set_input(self.config.value.clone());
        self.value = self.config.value.clone();
        self.initialized = true;
        debug!(field = %self.config.name, "bound input initialized");
        Ok(())
    }

    /// Decides whether a typed character may be inserted at the cursor.
    pub fn filter_key(&self, c: char) -> KeyDisposition {
        let mut buf = [0u8; 4];
        match self.admit(c.encode_utf8(&mut buf)) {
            Admission::Accepted(_) => KeyDisposition::Accept,
            Admission::Suppressed => KeyDisposition::Suppress,
        }
    }

    /// Runs an insertion at the cursor through the configured filter.
    pub fn admit(&self, inserted: &str) -> Admission {
        match &self.config.filter {
            Some(filter) => filter.admit(self.buffer.input(), self.buffer.cursor(), inserted),
            None if inserted.is_empty() => Admission::Suppressed,
            None => Admission::Accepted(inserted.to_string()),
        }
    }

    /// Whether the buffer is a finished value for a whole-value pattern.
    ///
    /// Always true without a filter or in per-character mode.
    pub fn is_complete(&self) -> bool {
        self.config
            .filter
            .as_ref()
            .is_none_or(|filter| filter.is_complete(self.buffer.input()))
    }

    /// Commits `raw`: transforms it, stores it as the current value and returns
    /// the single notification for this commit.
    pub fn push_value(&mut self, raw: &str) -> Effect {
        self.value = match &self.config.transform {
            Some(transform) => transform.apply(raw),
            None => raw.to_string(),
        };
        if self.config.field_type.is_masked() {
            trace!(field = %self.config.name, "value committed");
        } else {
            trace!(field = %self.config.name, raw, value = %self.value, "value committed");
        }
        Effect::ValueChanged(self.value.clone())
    }

    /// Commits the current buffer contents.
    pub fn commit(&mut self) -> Effect {
        let raw = self.buffer.input().to_string();
        self.push_value(&raw)
    }

    /// Replaces buffer and value with a value coming from the host. Emits nothing.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.buffer.set_input(value.clone());
        self.value = value;
    }

    pub fn on_focus(&mut self) {
        self.f_input.set(true);
    }

    pub fn on_blur(&mut self) {
        self.f_input.set(false);
    }

    pub fn is_focused(&self) -> bool {
        self.f_input.get()
    }

    pub fn placeholder(&self) -> &str {
        self.config.placeholder()
    }

    pub fn set_placeholder<S: Into<String>>(&mut self, placeholder: Option<S>) {
        self.config.set_placeholder(placeholder);
    }
}

impl HasFocus for BoundInputState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.f_input);
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
