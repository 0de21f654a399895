//! Labeled text input bound to a host-owned form control.
//!
//! Flow of one edit: keystroke -> [`KeyFilter`] -> edit buffer -> optional
//! [`Transform`] -> [`Effect::ValueChanged`](boundfield_types::Effect).

mod bound_input_component;
mod config;
mod control;
mod filter;
mod state;
mod transform;

pub use bound_input_component::BoundInputComponent;
pub use config::BoundInputConfig;
pub use control::{FieldControl, FormControl};
pub use filter::{Admission, KeyDisposition, KeyFilter};
pub use state::BoundInputState;
pub use transform::Transform;
