//! Host-owned value containers the widget can be initialized against.
//!
//! The widget never keeps a reference to a control. It writes the configured
//! value once during `init`; afterwards values travel outward as
//! [`Effect::ValueChanged`](boundfield_types::Effect) and the host decides
//! what to write back.

/// A host-owned holder of a field's current value.
pub trait FieldControl {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: String);
}

/// Plain form control tracking the value plus `dirty`/`touched` state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormControl {
    value: String,
    writes: usize,
    touched: bool,
}

impl FormControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the value was written after its initial assignment.
    pub fn is_dirty(&self) -> bool {
        self.writes > 1
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Records that the user interacted with the field (typically on blur).
    pub fn mark_touched(&mut self) {
        self.touched = true;
    }
}

impl FieldControl for FormControl {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_is_not_dirty() {
        let mut control = FormControl::new();
        control.set_value("abc".to_string());
        assert_eq!(control.value(), "abc");
        assert!(!control.is_dirty());
        control.set_value("abcd".to_string());
        assert!(control.is_dirty());
        assert!(!control.is_touched());
        control.mark_touched();
        assert!(control.is_touched());
    }
}
