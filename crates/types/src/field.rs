//! Declarative description of a bound input field.
//!
//! These types are what a host writes in a YAML/JSON field file or builds in
//! code before handing the field over to the widget. They carry no behavior of
//! their own: pattern compilation and transform resolution happen when the
//! widget config is built from a [`FieldDefinition`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rendering hint for the field, mirroring the usual input `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Search,
    Url,
}

impl FieldType {
    /// Resolves a hint string, falling back to [`FieldType::Text`] for unknown hints.
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_ascii_lowercase().as_str() {
            "" | "text" => FieldType::Text,
            "password" => FieldType::Password,
            "email" => FieldType::Email,
            "number" => FieldType::Number,
            "tel" => FieldType::Tel,
            "search" => FieldType::Search,
            "url" => FieldType::Url,
            other => {
                debug!(hint = other, "unknown field type hint; rendering as text");
                FieldType::Text
            }
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Password => "password",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Tel => "tel",
            FieldType::Search => "search",
            FieldType::Url => "url",
        }
    }

    /// Whether the field content is hidden when rendered.
    pub const fn is_masked(&self) -> bool {
        matches!(self, FieldType::Password)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        FieldType::from_hint(&value)
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// How a configured pattern is applied to edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// Each inserted character is tested on its own; rejected characters are dropped.
    #[default]
    PerCharacter,
    /// The value after the edit must match the pattern as a whole.
    WholeValue,
}

/// Built-in transforms that can be referenced by name from a field file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    Uppercase,
    Lowercase,
    Trim,
    /// Keeps ASCII digits only.
    Digits,
}

impl TransformKind {
    pub fn apply(&self, value: &str) -> String {
        match self {
            TransformKind::Uppercase => value.to_uppercase(),
            TransformKind::Lowercase => value.to_lowercase(),
            TransformKind::Trim => value.trim().to_string(),
            TransformKind::Digits => value.chars().filter(char::is_ascii_digit).collect(),
        }
    }
}

/// Everything a host can say about one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field identifier used for form semantics.
    #[serde(default)]
    pub name: String,
    /// Text shown above the field.
    #[serde(default)]
    pub label: Option<String>,
    /// Style selector applied to the label (`primary`, `muted`, `accent`, ...).
    #[serde(default)]
    pub label_style: Option<String>,
    #[serde(rename = "type")]
    #[serde(default)]
    pub field_type: FieldType,
    /// Initial value copied into the bound control on init.
    #[serde(default)]
    pub value: Option<String>,
    /// Regular expression source used to filter edits.
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default)]
    pub transform: Option<TransformKind>,
    #[serde(default)]
    pub placeholder: Option<String>,
}
