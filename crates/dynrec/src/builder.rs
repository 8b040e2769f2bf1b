// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for record types.

use crate::descriptor::RecordType;
use crate::error::Result;
use std::sync::Arc;

/// Builder for [`RecordType`] descriptors.
///
/// Field names are collected as-is and validated in one pass at
/// [`build`](Self::build), so the builder chain itself stays infallible.
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: Option<String>,
    fields: Vec<String>,
}

impl RecordTypeBuilder {
    /// Start a named record type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Vec::new(),
        }
    }

    /// Start an anonymous record type.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            name: None,
            fields: Vec::new(),
        }
    }

    /// Append one field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Append several fields in order.
    #[must_use]
    pub fn fields<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Validate the collected field names and build the descriptor.
    pub fn build(self) -> Result<Arc<RecordType>> {
        RecordType::define(self.name.as_deref(), &self.fields)
    }
}
