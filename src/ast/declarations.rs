use std::collections::HashMap;

use super::ast::Value;

/// Name of the synthetic call that `a + b + "c"` bindings desugar into.
pub const ADDITION: &str = "addition";

/// Function Declaration
///
/// A call such as `cc_library(name = "x", srcs)`. The same node stands for a
/// top-level target declaration and for a call used as a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Func {
    pub name: String,
    /// Name of the document the call was parsed from.
    pub file: String,
    pub line: u32,
    /// Column of the call's name token.
    pub position: u32,
    /// Named parameters; a repeated name keeps the last value.
    pub params: HashMap<String, Value>,
    /// Positional parameters in call-site order.
    pub anon_params: Vec<Value>,
}

impl Func {
    pub fn new(name: impl Into<String>, file: impl Into<String>, line: u32, position: u32) -> Self {
        Func {
            name: name.into(),
            file: file.into(),
            line,
            position,
            ..Default::default()
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn is_addition(&self) -> bool {
        self.name == ADDITION
    }
}
