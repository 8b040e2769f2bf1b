// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validated field identifiers.

use crate::error::{RecordError, Result};
use std::fmt;

/// A validated record field identifier.
///
/// A field name is non-empty, starts with an alphabetic character or `_`,
/// and continues with alphanumeric characters or `_`. Validation happens
/// once, at construction; a `FieldName` in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if Self::is_valid(&raw) {
            Ok(Self(raw))
        } else {
            Err(RecordError::InvalidFieldName(raw))
        }
    }

    /// The identifier as a display string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check identifier shape without allocating.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        let mut chars = raw.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_')
    }
}

/// Check whether a raw token is shaped like a type display name.
///
/// Display names lead with an uppercase letter; field identifiers in
/// definition argument lists conventionally do not. This drives the
/// overload rule in [`RecordType::define_from`](crate::RecordType::define_from).
pub(crate) fn is_display_name(raw: &str) -> bool {
    raw.chars().next().is_some_and(char::is_uppercase)
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FieldName {
    type Error = RecordError;

    fn try_from(raw: &str) -> Result<Self> {
        Self::new(raw)
    }
}
