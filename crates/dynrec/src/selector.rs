// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field selectors: by position or by member name.
//!
//! Host-facing access APIs accept integers, identifier-shaped text, or
//! already-built selectors interchangeably. The conversion boundary is
//! explicit: anything else is rejected with an error before any slot is
//! touched, never coerced.

use crate::descriptor::RecordType;
use crate::error::{RecordError, Result};
use crate::field::FieldName;
use crate::value::Value;

/// Addresses a single field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Positional selector. Negative positions index from the end
    /// (`-1` is the last field).
    Position(i64),
    /// By-name selector.
    Member(FieldName),
}

impl Selector {
    /// Convert a dynamic [`Value`] into a selector.
    ///
    /// Integers become positional selectors and identifier-shaped strings
    /// become member selectors; every other value kind is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(Self::Position(*i)),
            Value::Str(s) => FieldName::new(s.as_str()).map(Self::Member).map_err(|_| {
                RecordError::UnsupportedSelector(format!("string '{}' is not a member name", s))
            }),
            other => Err(RecordError::UnsupportedSelector(other.kind_name().to_string())),
        }
    }

    /// Resolve to a slot index against a type's field table.
    ///
    /// Positional bounds are `[-len, len - 1]`; overflow and underflow
    /// produce distinct errors, with the underflow offset reported after
    /// sign adjustment. Unknown members are a lookup failure, not a
    /// fallback to positional access.
    pub(crate) fn resolve(&self, ty: &RecordType) -> Result<usize> {
        let length = ty.len();
        match self {
            Self::Position(offset) => {
                let len = length as i64;
                let normalized = if *offset < 0 { offset + len } else { *offset };
                if *offset >= len {
                    Err(RecordError::OffsetTooLarge { offset: *offset, length })
                } else if normalized < 0 {
                    Err(RecordError::OffsetTooSmall { offset: normalized, length })
                } else {
                    Ok(normalized as usize)
                }
            }
            Self::Member(name) => {
                ty.field_index(name.as_str()).ok_or_else(|| RecordError::NoMember {
                    member: name.as_str().to_string(),
                    type_name: ty.name().unwrap_or("<anonymous>").to_string(),
                })
            }
        }
    }
}

/// Fallible conversion into a [`Selector`].
///
/// This is the single entry point the access APIs take; unsupported
/// selector kinds fail here, before bounds or membership are consulted.
pub trait IntoSelector {
    fn into_selector(self) -> Result<Selector>;
}

impl IntoSelector for Selector {
    fn into_selector(self) -> Result<Selector> {
        Ok(self)
    }
}

impl IntoSelector for i64 {
    fn into_selector(self) -> Result<Selector> {
        Ok(Selector::Position(self))
    }
}

impl IntoSelector for i32 {
    fn into_selector(self) -> Result<Selector> {
        Ok(Selector::Position(i64::from(self)))
    }
}

impl IntoSelector for usize {
    fn into_selector(self) -> Result<Selector> {
        Ok(Selector::Position(self as i64))
    }
}

impl IntoSelector for FieldName {
    fn into_selector(self) -> Result<Selector> {
        Ok(Selector::Member(self))
    }
}

impl IntoSelector for &FieldName {
    fn into_selector(self) -> Result<Selector> {
        Ok(Selector::Member(self.clone()))
    }
}

impl IntoSelector for &str {
    fn into_selector(self) -> Result<Selector> {
        FieldName::new(self).map(Selector::Member).map_err(|_| {
            RecordError::UnsupportedSelector(format!("string '{}' is not a member name", self))
        })
    }
}

impl IntoSelector for &Value {
    fn into_selector(self) -> Result<Selector> {
        Selector::from_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn three_fields() -> Arc<RecordType> {
        RecordType::define(Some("Point3"), &["x", "y", "z"]).expect("define")
    }

    #[test]
    fn test_positional_bounds() {
        let ty = three_fields();
        assert_eq!(Selector::Position(0).resolve(&ty), Ok(0));
        assert_eq!(Selector::Position(2).resolve(&ty), Ok(2));
        assert_eq!(Selector::Position(-1).resolve(&ty), Ok(2));
        assert_eq!(Selector::Position(-3).resolve(&ty), Ok(0));

        assert_eq!(
            Selector::Position(3).resolve(&ty),
            Err(RecordError::OffsetTooLarge { offset: 3, length: 3 })
        );
        // Underflow reports the normalized offset: -4 + 3 = -1.
        assert_eq!(
            Selector::Position(-4).resolve(&ty),
            Err(RecordError::OffsetTooSmall { offset: -1, length: 3 })
        );
    }

    #[test]
    fn test_member_resolution() {
        let ty = three_fields();
        let sel = "y".into_selector().expect("selector");
        assert_eq!(sel.resolve(&ty), Ok(1));

        let missing = "w".into_selector().expect("selector");
        assert_eq!(
            missing.resolve(&ty),
            Err(RecordError::NoMember {
                member: "w".into(),
                type_name: "Point3".into(),
            })
        );
    }

    #[test]
    fn test_from_value_boundary() {
        assert_eq!(Selector::from_value(&Value::from(1)), Ok(Selector::Position(1)));
        assert!(matches!(
            Selector::from_value(&Value::from("x")),
            Ok(Selector::Member(_))
        ));
        assert!(matches!(
            Selector::from_value(&Value::from(1.5)),
            Err(RecordError::UnsupportedSelector(kind)) if kind == "float"
        ));
        assert!(matches!(
            Selector::from_value(&Value::Null),
            Err(RecordError::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn test_text_selector_must_be_identifier_shaped() {
        assert!(matches!(
            "not a name".into_selector(),
            Err(RecordError::UnsupportedSelector(_))
        ));
    }
}
