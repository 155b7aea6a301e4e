use std::fmt::Display;

/// A reference to another binding, resolved later by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub key: String,
}

impl Variable {
    pub fn new(key: impl Into<String>) -> Self {
        Variable { key: key.into() }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}
