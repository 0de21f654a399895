//! # Boundfield TUI
//!
//! A labeled terminal text input bound to a host-owned form control.
//!
//! The widget mirrors a configured value into the control once, at
//! initialization. After that, edits flow outward only: typed or pasted text
//! passes an optional pattern filter, the accepted value passes an optional
//! transform, and the result is reported as an
//! [`Effect::ValueChanged`](boundfield_types::Effect). The host owns all
//! state and decides what to write back.
//!
//! ## Architecture
//!
//! - [`BoundInputState`] holds configuration, edit buffer, committed value and
//!   focus, and implements the commit/filter/focus operations.
//! - [`BoundInputComponent`] translates `crossterm` events into those
//!   operations and renders the field with `ratatui`.
//! - [`run`] drives a full-screen session for one field.

mod error;
mod ui;

pub use error::BoundInputError;
pub use ui::components::bound_input::{
    Admission, BoundInputComponent, BoundInputConfig, BoundInputState, FieldControl, FormControl, KeyDisposition, KeyFilter,
    Transform,
};
pub use ui::components::common::TextInputState;
pub use ui::runtime::{Outcome, run};
pub use ui::theme::{LabelStyle, NordTheme, NordThemeHighContrast, Theme, ThemeRoles};
