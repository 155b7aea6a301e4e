use std::collections::HashMap;

use super::{declarations::Func, values::Variable};

/// Value Types
///
/// The kinds of value a binding or parameter can hold.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ValueType {
    String,
    Bool,
    Variable,
    Slice,
    Func,
}

/// A value in the declaration tree.
///
/// Bare words always become `Variable` references; only quoting produces
/// literal text. Slice elements are the raw text of their tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Variable(Variable),
    Slice(Vec<Value>),
    Func(Box<Func>),
}

impl Value {
    pub fn get_value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Variable(_) => ValueType::Variable,
            Value::Slice(_) => ValueType::Slice,
            Value::Func(_) => ValueType::Func,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Func> {
        match self {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Variable> for Value {
    fn from(value: Variable) -> Self {
        Value::Variable(value)
    }
}

impl From<Func> for Value {
    fn from(value: Func) -> Self {
        Value::Func(Box::new(value))
    }
}

/// The root of a parsed build file.
///
/// `vars` maps each binding to its value; `None` records a binding whose
/// right-hand side held no recognisable value (`name =` at end of input).
/// Later bindings of the same name overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    pub path: String,
    pub vars: HashMap<String, Option<Value>>,
    pub funcs: Vec<Func>,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        File {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Returns the value bound to `name`, if the binding exists and holds one.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name).and_then(Option::as_ref)
    }
}
