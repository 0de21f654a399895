use boundfield_types::{FieldDefinition, FieldType};

use super::filter::KeyFilter;
use super::transform::Transform;
use crate::error::BoundInputError;

/// Construction-time configuration of a bound input.
#[derive(Debug, Clone)]
pub struct BoundInputConfig {
    pub name: String,
    pub label: Option<String>,
    pub label_style: Option<String>,
    pub field_type: FieldType,
    /// Value copied into the control by `init`.
    pub value: String,
    pub filter: Option<KeyFilter>,
    pub transform: Option<Transform>,
    placeholder: String,
}

impl BoundInputConfig {
    pub fn new(name: impl Into<String>) -> Result<Self, BoundInputError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BoundInputError::MissingName);
        }
        Ok(Self {
            name,
            label: None,
            label_style: None,
            field_type: FieldType::Text,
            value: String::new(),
            filter: None,
            transform: None,
            placeholder: String::new(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_label_style(mut self, selector: impl Into<String>) -> Self {
        self.label_style = Some(selector.into());
        self
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_filter(mut self, filter: KeyFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Compiles `pattern` as a per-character filter.
    pub fn with_pattern(self, pattern: &str) -> Result<Self, BoundInputError> {
        Ok(self.with_filter(KeyFilter::new(pattern, Default::default())?))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_placeholder<S: Into<String>>(mut self, placeholder: Option<S>) -> Self {
        self.set_placeholder(placeholder);
        self
    }

    /// Stores the placeholder; a missing placeholder is kept as the empty string.
    pub fn set_placeholder<S: Into<String>>(&mut self, placeholder: Option<S>) {
        self.placeholder = placeholder.map(Into::into).unwrap_or_default();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl TryFrom<FieldDefinition> for BoundInputConfig {
    type Error = BoundInputError;

    fn try_from(definition: FieldDefinition) -> Result<Self, Self::Error> {
        let mut config = BoundInputConfig::new(definition.name)?
            .with_field_type(definition.field_type)
            .with_value(definition.value.unwrap_or_default())
            .with_placeholder(definition.placeholder);
        config.label = definition.label;
        config.label_style = definition.label_style;
        if let Some(pattern) = definition.pattern.as_deref() {
            config = config.with_filter(KeyFilter::new(pattern, definition.filter_mode)?);
        }
        if let Some(kind) = definition.transform {
            config = config.with_transform(Transform::from(kind));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundfield_types::{FilterMode, TransformKind};

    #[test]
    fn placeholder_is_never_missing() {
        let mut config = BoundInputConfig::new("name").expect("config");
        assert_eq!(config.placeholder(), "");
        config.set_placeholder(Some("Enter name"));
        assert_eq!(config.placeholder(), "Enter name");
        config.set_placeholder(None::<String>);
        assert_eq!(config.placeholder(), "");
        config.set_placeholder(Some(""));
        assert_eq!(config.placeholder(), "");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(BoundInputConfig::new("  "), Err(BoundInputError::MissingName)));
    }

    #[test]
    fn definition_compiles_pattern_and_transform() {
        let definition = FieldDefinition {
            name: "zip".to_string(),
            label: Some("ZIP".to_string()),
            value: Some("02".to_string()),
            pattern: Some("[0-9]{0,5}".to_string()),
            filter_mode: FilterMode::WholeValue,
            transform: Some(TransformKind::Trim),
            ..Default::default()
        };

        let config = BoundInputConfig::try_from(definition).expect("config");
        assert_eq!(config.label.as_deref(), Some("ZIP"));
        assert_eq!(config.value, "02");
        let filter = config.filter.as_ref().expect("filter");
        assert_eq!(filter.mode(), FilterMode::WholeValue);
        assert_eq!(filter.pattern(), "[0-9]{0,5}");
        assert_eq!(config.transform.as_ref().map(|t| t.apply(" 1 ")), Some("1".to_string()));
    }

    #[test]
    fn definition_with_bad_pattern_fails() {
        let definition = FieldDefinition {
            name: "zip".to_string(),
            pattern: Some("(".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            BoundInputConfig::try_from(definition),
            Err(BoundInputError::InvalidPattern { .. })
        ));
    }
}
