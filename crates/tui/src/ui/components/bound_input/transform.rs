use std::fmt;
use std::sync::Arc;

use boundfield_types::TransformKind;

/// Pure function applied to every committed value before it is published.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, value: &str) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

impl From<TransformKind> for Transform {
    fn from(kind: TransformKind) -> Self {
        Transform::new(move |value| kind.apply(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_and_builtins_apply() {
        let reverse = Transform::new(|value| value.chars().rev().collect());
        assert_eq!(reverse.apply("abc"), "cba");

        let upper = Transform::from(TransformKind::Uppercase);
        assert_eq!(upper.clone().apply("ab"), "AB");
        assert_eq!(format!("{upper:?}"), "Transform(..)");
    }
}
