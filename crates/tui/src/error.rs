use thiserror::Error;

/// Error surfaced when configuring or initializing a bound input.
#[derive(Debug, Error)]
pub enum BoundInputError {
    /// The filter pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// The pattern is valid but cannot drive whole-value filtering
    /// (for example it needs Unicode word boundaries or is too large).
    #[error("pattern '{pattern}' cannot be used for whole-value filtering: {source}")]
    UnsupportedWholeValuePattern {
        pattern: String,
        #[source]
        source: regex_automata::dfa::dense::BuildError,
    },
    /// A field must carry a non-empty name.
    #[error("field name is required")]
    MissingName,
    /// `init` was already called for this widget.
    #[error("bound input '{0}' is already initialized")]
    AlreadyInitialized(String),
}
