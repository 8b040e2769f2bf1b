// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values held in record slots.

use crate::record::RecordHandle;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value stored in a record slot.
///
/// `Null` doubles as the absent sentinel for constructor slots that were
/// never filled. Values are opaque to the record machinery beyond
/// equality, hashing, and rendering; nested records go through
/// [`RecordHandle`] so cyclic graphs stay expressible.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent sentinel.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Record(RecordHandle),
}

impl Value {
    /// Check if value is the absent sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as float.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as record handle.
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordHandle> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the value kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    /// Loose equality: integers compare equal to equal-valued floats.
    /// Cycle-protected through contained record handles.
    #[must_use]
    pub fn loose_eq(&self, other: &Value) -> bool {
        self.eq_with(other, false)
    }

    /// Strict equality: kinds must match exactly. This is the relation
    /// `Hash` agrees with, and what `PartialEq` delegates to.
    #[must_use]
    pub fn strict_eq(&self, other: &Value) -> bool {
        self.eq_with(other, true)
    }

    pub(crate) fn eq_with(&self, other: &Value, strict: bool) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) if !strict => {
                #[allow(clippy::cast_precision_loss)]
                {
                    (*a as f64) == *b
                }
            }
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_with(y, strict))
            }
            (Self::Record(a), Self::Record(b)) => a.eq_with(b, strict),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Null => state.write_u8(0),
            Self::Bool(v) => {
                state.write_u8(1);
                v.hash(state);
            }
            Self::Int(v) => {
                state.write_u8(2);
                v.hash(state);
            }
            Self::Float(v) => {
                state.write_u8(3);
                v.to_bits().hash(state);
            }
            Self::Str(v) => {
                state.write_u8(4);
                v.hash(state);
            }
            Self::List(vs) => {
                state.write_u8(5);
                state.write_usize(vs.len());
                for v in vs {
                    v.hash(state);
                }
            }
            Self::Record(h) => {
                state.write_u8(6);
                h.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("nil"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Str(v) => write!(f, "{:?}", v),
            Self::List(vs) => {
                f.write_str("[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            Self::Record(h) => write!(f, "{}", h),
        }
    }
}

// Conversion surface for host code.
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<RecordHandle> for Value {
    fn from(v: RecordHandle) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(v: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(42).as_int(), Some(42));
        assert_eq!(Value::from("joe").as_str(), Some("joe"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(2.5).as_float(), Some(2.5));
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(42).as_str(), None);
    }

    #[test]
    fn test_list_conversion() {
        let v = Value::from(vec![1, 2, 3]);
        let list = v.as_list().expect("list");
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].as_int(), Some(3));
    }

    #[test]
    fn test_loose_vs_strict_numeric() {
        let int = Value::from(1);
        let float = Value::from(1.0);
        assert!(int.loose_eq(&float));
        assert!(!int.strict_eq(&float));
        assert!(!int.loose_eq(&Value::from(1.5)));
    }

    #[test]
    fn test_strict_eq_matches_hash() {
        let a = Value::from(vec!["x", "y"]);
        let b = Value::from(vec!["x", "y"]);
        assert!(a.strict_eq(&b));
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_null_only_equals_null() {
        assert!(Value::Null.loose_eq(&Value::Null));
        assert!(!Value::Null.loose_eq(&Value::from(0)));
        assert!(!Value::Null.loose_eq(&Value::from(false)));
    }

    #[test]
    fn test_rendering() {
        assert_eq!(Value::Null.to_string(), "nil");
        assert_eq!(Value::from("joe").to_string(), "\"joe\"");
        assert_eq!(Value::from(12345).to_string(), "12345");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
    }
}
