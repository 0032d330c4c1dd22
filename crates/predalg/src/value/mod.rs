
use std::{
    fmt::{self, Display},
    hash::{DefaultHasher, Hash, Hasher},
};

///
/// Value
///
/// Dynamic runtime value tested by predicates.
///
/// Structural equality and hashing are identity semantics: floats compare
/// by canonical bit pattern and sets ignore element order, so a `Value`
/// can sit inside a cache key.
/// Comparison semantics used during evaluation live in the predicate
/// coercion layer.
///

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
    Set(Vec<Self>),
}

impl Value {
    /// Build a set-shaped value, keeping first occurrences in insertion order.
    #[must_use]
    pub fn set(items: impl IntoIterator<Item = Self>) -> Self {
        let mut unique: Vec<Self> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }

        Self::Set(unique)
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_))
    }

    /// Borrow the elements of a list or set.
    #[must_use]
    pub fn as_collection(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Short variant label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Set(_) => "set",
        }
    }

    const fn tag(&self) -> u8 {
        match self {
            Self::Null => 0x00,
            Self::Bool(_) => 0x01,
            Self::Int(_) => 0x02,
            Self::Float(_) => 0x03,
            Self::Text(_) => 0x04,
            Self::List(_) => 0x05,
            Self::Set(_) => 0x06,
        }
    }
}

/// Canonical float identity: all NaNs collapse, and -0.0 equals 0.0.
pub(crate) fn float_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

// First occurrence of each element; `Set` payloads built by hand may repeat.
fn distinct(items: &[Value]) -> impl Iterator<Item = &Value> {
    items
        .iter()
        .enumerate()
        .filter(|(idx, item)| !items[..*idx].contains(*item))
        .map(|(_, item)| item)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => {
                a.iter().all(|item| b.contains(item)) && b.iter().all(|item| a.contains(item))
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(f) => float_bits(*f).hash(state),
            Self::Text(s) => s.hash(state),
            Self::List(items) => items.hash(state),
            Self::Set(items) => {
                // Order- and duplicate-independent so that equal sets hash equally.
                let (count, combined) =
                    distinct(items).fold((0usize, 0u64), |(count, acc), item| {
                        let mut hasher = DefaultHasher::new();
                        item.hash(&mut hasher);
                        (count + 1, acc.wrapping_add(hasher.finish()))
                    });
                state.write_usize(count);
                state.write_u64(combined);
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Self::Set(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
        }
    }
}

/// Write items separated by `", "`.
pub(crate) fn write_joined<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }

    Ok(())
}

///
/// CONVERSIONS
///

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
