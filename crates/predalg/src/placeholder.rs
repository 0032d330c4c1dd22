use crate::value::Value;
use std::fmt::{self, Display};

///
/// Placeholder
///
/// Named parameter slot inside a symbolic predicate.
///
/// A placeholder is either unbound (a variable awaiting a runtime argument)
/// or carries a concrete value. Anonymous placeholders wrap plain values so
/// that mixed collections can be held uniformly.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Placeholder {
    name: Option<String>,
    value: Option<Value>,
}

impl Placeholder {
    /// Unbound named slot.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }

    /// Named slot already carrying its argument.
    #[must_use]
    pub fn bound(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// Anonymous wrapper around a plain value.
    #[must_use]
    pub fn of(value: impl Into<Value>) -> Self {
        Self {
            name: None,
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True while the slot has no argument.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        self.value.is_none()
    }

    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Project to the carried value; an unbound slot projects to `Value::Null`.
    #[must_use]
    pub fn get(&self) -> Value {
        self.value.clone().unwrap_or(Value::Null)
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.value) {
            (_, Some(value)) => write!(f, "{value}"),
            (Some(name), None) => f.write_str(name),
            (None, None) => f.write_str("null"),
        }
    }
}

impl From<Value> for Placeholder {
    fn from(value: Value) -> Self {
        Self::of(value)
    }
}
