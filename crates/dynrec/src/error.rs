// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for record definition and access.

use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised by record type definition and instance access.
///
/// All errors are raised synchronously at the point of detection; nothing
/// is swallowed or retried. Definition-time checks (field name validity)
/// and access-time checks (selector kind, bounds, membership) are
/// independent of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// More constructor values than the type has fields.
    TooManyValues { given: usize, capacity: usize },
    /// A field identifier is empty or not identifier-shaped.
    InvalidFieldName(String),
    /// A selector of a kind other than position or member name.
    UnsupportedSelector(String),
    /// A well-formed member selector that matches no field of the type.
    NoMember { member: String, type_name: String },
    /// A positive or zero offset at or past the field count.
    OffsetTooLarge { offset: i64, length: usize },
    /// A negative offset below `-length`. `offset` is the normalized
    /// (post sign-adjustment) index.
    OffsetTooSmall { offset: i64, length: usize },
    /// A pair-enumeration call with no consumer supplied.
    MissingConsumer(&'static str),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyValues { given, capacity } => {
                write!(f, "too many values for record: {} given, capacity {}", given, capacity)
            }
            Self::InvalidFieldName(name) => write!(f, "invalid field name: '{}'", name),
            Self::UnsupportedSelector(kind) => write!(f, "unsupported selector kind: {}", kind),
            Self::NoMember { member, type_name } => {
                write!(f, "no member '{}' in record {}", member, type_name)
            }
            Self::OffsetTooLarge { offset, length } => {
                write!(f, "offset {} too large for record (length {})", offset, length)
            }
            Self::OffsetTooSmall { offset, length } => {
                write!(f, "offset {} too small for record (length {})", offset, length)
            }
            Self::MissingConsumer(op) => write!(f, "{} called without a consumer", op),
        }
    }
}

impl std::error::Error for RecordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RecordError::TooManyValues { given: 5, capacity: 3 };
        assert_eq!(err.to_string(), "too many values for record: 5 given, capacity 3");

        let err = RecordError::OffsetTooSmall { offset: -1, length: 3 };
        assert_eq!(err.to_string(), "offset -1 too small for record (length 3)");

        let err = RecordError::NoMember {
            member: "zip".into(),
            type_name: "Customer".into(),
        };
        assert_eq!(err.to_string(), "no member 'zip' in record Customer");
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&RecordError::MissingConsumer("each_pair"));
    }
}
