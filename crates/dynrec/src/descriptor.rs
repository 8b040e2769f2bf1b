// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record type descriptors: the shape half of the record machinery.
//!
//! A [`RecordType`] is created once per distinct shape and shared by every
//! instance of that shape via `Arc`. The field table is immutable after
//! definition and is the single source of truth for positional order,
//! by-name lookup, and iteration order.

use crate::error::Result;
use crate::field::{is_display_name, FieldName};
use crate::record::Record;
use crate::registry::RecordRegistry;
use crate::selector::Selector;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable descriptor of a record shape.
#[derive(Debug)]
pub struct RecordType {
    /// Display name; `None` for anonymous shapes.
    name: Option<String>,
    /// Ordered field table. Order defines positional index and iteration.
    fields: Vec<FieldName>,
    /// Name-to-slot lookup, built once at definition time. With duplicate
    /// field names the later slot wins, so later accessors shadow earlier
    /// slots for by-name access.
    index: HashMap<String, usize>,
}

impl RecordType {
    /// Define a new record type from an ordered field name list.
    ///
    /// Every entry must be identifier-shaped; an invalid entry fails the
    /// whole definition rather than being skipped. Duplicate names are
    /// permitted (the later field shadows the earlier one for by-name
    /// access) and logged as a warning.
    pub fn define<S: AsRef<str>>(name: Option<&str>, fields: &[S]) -> Result<Arc<Self>> {
        let fields = fields
            .iter()
            .map(|raw| FieldName::new(raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut index = HashMap::with_capacity(fields.len());
        for (slot, field) in fields.iter().enumerate() {
            if let Some(shadowed) = index.insert(field.as_str().to_string(), slot) {
                log::warn!(
                    "[RecordType::define] duplicate field '{}' shadows slot {}",
                    field,
                    shadowed
                );
            }
        }

        log::debug!(
            "[RecordType::define] defined record type '{}' with {} fields",
            name.unwrap_or("<anonymous>"),
            fields.len()
        );

        Ok(Arc::new(Self {
            name: name.map(str::to_string),
            fields,
            index,
        }))
    }

    /// Define from a raw token list, resolving the name-or-field overload.
    ///
    /// If the first token is shaped like a display name (leading
    /// uppercase) it names the type; otherwise it is taken as the first
    /// field and the type is anonymous. This mirrors how dynamic hosts
    /// pass one flat argument list to the factory.
    pub fn define_from<S: AsRef<str>>(tokens: &[S]) -> Result<Arc<Self>> {
        match tokens.first() {
            Some(first) if is_display_name(first.as_ref()) => {
                let rest: Vec<&str> = tokens[1..].iter().map(AsRef::as_ref).collect();
                Self::define(Some(first.as_ref()), &rest)
            }
            _ => {
                let all: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
                Self::define(None, &all)
            }
        }
    }

    /// Define a named type and register it with an external registry.
    ///
    /// Namespace policy (conflicts, lookup) is the registry's concern;
    /// this only performs the single registration call.
    pub fn define_in<S: AsRef<str>>(
        name: &str,
        fields: &[S],
        registry: &mut dyn RecordRegistry,
    ) -> Result<Arc<Self>> {
        let ty = Self::define(Some(name), fields)?;
        registry.register(name, ty.clone());
        log::debug!("[RecordType::define_in] registered '{}'", name);
        Ok(ty)
    }

    /// Display name, if the type is not anonymous.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Ordered field table.
    #[must_use]
    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the type has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Slot index for a member name, honoring duplicate shadowing.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check whether a member name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Ordered member names as display strings.
    #[must_use]
    pub fn members(&self) -> Vec<&str> {
        self.fields.iter().map(FieldName::as_str).collect()
    }

    /// Concrete type identity: the same descriptor, or two named
    /// descriptors with the same display name. Anonymous shapes are only
    /// identical to themselves, regardless of field table.
    #[must_use]
    pub fn same_type(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        if Arc::ptr_eq(a, b) {
            return true;
        }
        matches!((a.name(), b.name()), (Some(x), Some(y)) if x == y)
    }
}

/// Generated per-field accessor: a thin handle delegating to indexed slot
/// storage. Equivalent to `get`/`set` with the member's name as selector;
/// never a separate copy of the data.
#[derive(Debug, Clone)]
pub struct FieldAccessor {
    ty: Arc<RecordType>,
    name: FieldName,
    slot: usize,
}

impl FieldAccessor {
    /// Accessor handle for one member of a type, or `None` if the member
    /// is unknown.
    pub fn new(ty: &Arc<RecordType>, name: &str) -> Option<Self> {
        let slot = ty.field_index(name)?;
        Some(Self {
            ty: ty.clone(),
            name: ty.fields[slot].clone(),
            slot,
        })
    }

    /// Accessor handles for every member of a type, in field order.
    ///
    /// With duplicate field names only the shadowing slot gets an
    /// accessor, matching by-name access.
    pub fn for_type(ty: &Arc<RecordType>) -> Vec<Self> {
        ty.fields
            .iter()
            .enumerate()
            .filter(|(slot, field)| ty.field_index(field.as_str()) == Some(*slot))
            .map(|(slot, field)| Self {
                ty: ty.clone(),
                name: field.clone(),
                slot,
            })
            .collect()
    }

    /// The member this accessor reads and writes.
    #[must_use]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Slot index within the owning type.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Read the member from a record.
    ///
    /// Fast path for records of the owning type; records of a different
    /// type fall back to by-name resolution so the error surface matches
    /// plain `get`.
    pub fn get<'r>(&self, record: &'r Record) -> Result<&'r Value> {
        if Arc::ptr_eq(record.ty(), &self.ty) {
            record.get(self.slot)
        } else {
            record.get(Selector::Member(self.name.clone()))
        }
    }

    /// Write the member of a record, returning the stored value.
    pub fn set<'r>(&self, record: &'r mut Record, value: Value) -> Result<&'r Value> {
        if Arc::ptr_eq(record.ty(), &self.ty) {
            record.set(self.slot, value)
        } else {
            record.set(Selector::Member(self.name.clone()), value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;

    #[test]
    fn test_define_preserves_order() {
        let ty = RecordType::define(Some("Customer"), &["name", "address", "zip"]).expect("define");
        assert_eq!(ty.name(), Some("Customer"));
        assert_eq!(ty.len(), 3);
        assert_eq!(ty.members(), vec!["name", "address", "zip"]);
        assert_eq!(ty.field_index("name"), Some(0));
        assert_eq!(ty.field_index("zip"), Some(2));
        assert_eq!(ty.field_index("phone"), None);
    }

    #[test]
    fn test_define_rejects_invalid_field() {
        let err = RecordType::define(Some("Bad"), &["ok", "not ok"]).unwrap_err();
        assert_eq!(err, RecordError::InvalidFieldName("not ok".into()));
    }

    #[test]
    fn test_define_anonymous() {
        let ty = RecordType::define(None, &["a", "b"]).expect("define");
        assert_eq!(ty.name(), None);
        assert_eq!(ty.len(), 2);
    }

    #[test]
    fn test_define_from_overload() {
        let named = RecordType::define_from(&["Customer", "name", "zip"]).expect("define");
        assert_eq!(named.name(), Some("Customer"));
        assert_eq!(named.members(), vec!["name", "zip"]);

        // First token is a field identifier: anonymous, token kept as field.
        let anon = RecordType::define_from(&["name", "zip"]).expect("define");
        assert_eq!(anon.name(), None);
        assert_eq!(anon.members(), vec!["name", "zip"]);
    }

    #[test]
    fn test_duplicate_fields_shadow() {
        let ty = RecordType::define(Some("Dup"), &["a", "b", "a"]).expect("define");
        assert_eq!(ty.len(), 3);
        // By-name access reaches the later slot.
        assert_eq!(ty.field_index("a"), Some(2));
        // Only the shadowing slot gets an accessor.
        let accessors = FieldAccessor::for_type(&ty);
        assert_eq!(accessors.len(), 2);
        assert_eq!(accessors[0].name().as_str(), "b");
        assert_eq!(accessors[1].name().as_str(), "a");
        assert_eq!(accessors[1].slot(), 2);
    }

    #[test]
    fn test_same_type_identity() {
        let a = RecordType::define(Some("Point"), &["x", "y"]).expect("define");
        let b = RecordType::define(Some("Point"), &["x", "y"]).expect("define");
        let c = RecordType::define(Some("Vector"), &["x", "y"]).expect("define");
        assert!(RecordType::same_type(&a, &a));
        assert!(RecordType::same_type(&a, &b));
        assert!(!RecordType::same_type(&a, &c));

        // Matching shape is not identity for anonymous types.
        let anon1 = RecordType::define(None, &["x", "y"]).expect("define");
        let anon2 = RecordType::define(None, &["x", "y"]).expect("define");
        assert!(RecordType::same_type(&anon1, &anon1));
        assert!(!RecordType::same_type(&anon1, &anon2));
    }
}
