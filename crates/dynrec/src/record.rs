// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record instances: slot storage plus the generated access protocol.

use crate::descriptor::RecordType;
use crate::error::{RecordError, Result};
use crate::field::FieldName;
use crate::guard::{self, Visit};
use crate::selector::IntoSelector;
use crate::value::Value;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// An instance of a record type: one value slot per field, positionally
/// aligned with the type's field table.
///
/// `slots.len() == ty.len()` holds from construction on. Trailing slots
/// not covered by constructor values hold [`Value::Null`].
#[derive(Debug, Clone)]
pub struct Record {
    ty: Arc<RecordType>,
    slots: Vec<Value>,
}

impl Record {
    /// Construct an instance from positional values.
    ///
    /// This is the only construction path. Fewer values than fields pads
    /// the tail with [`Value::Null`]; more values than fields is an error.
    pub fn new(ty: &Arc<RecordType>, mut values: Vec<Value>) -> Result<Self> {
        let capacity = ty.len();
        if values.len() > capacity {
            return Err(RecordError::TooManyValues {
                given: values.len(),
                capacity,
            });
        }
        values.resize(capacity, Value::Null);
        Ok(Self {
            ty: ty.clone(),
            slots: values,
        })
    }

    /// The shared type descriptor.
    #[must_use]
    pub fn ty(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Display name of the type, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.ty.name()
    }

    /// The fixed field count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the type has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ordered member names, from the type's field table.
    #[must_use]
    pub fn members(&self) -> Vec<&str> {
        self.ty.members()
    }

    /// Read one slot by selector.
    pub fn get(&self, selector: impl IntoSelector) -> Result<&Value> {
        let slot = selector.into_selector()?.resolve(&self.ty)?;
        Ok(&self.slots[slot])
    }

    /// Overwrite one slot by selector, returning the stored value.
    ///
    /// This is the only mutation entry point; generated accessors delegate
    /// to the same slot table.
    pub fn set(&mut self, selector: impl IntoSelector, value: Value) -> Result<&Value> {
        let slot = selector.into_selector()?.resolve(&self.ty)?;
        self.slots[slot] = value;
        Ok(&self.slots[slot])
    }

    /// Iterate field values in field order. Finite and restartable: each
    /// call yields a fresh iterator over the current slots.
    pub fn values(&self) -> std::slice::Iter<'_, Value> {
        self.slots.iter()
    }

    /// Iterate `(member, value)` pairs in field order.
    pub fn pairs(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.ty.fields().iter().zip(self.slots.iter())
    }

    /// Feed `(member, value)` pairs to a consumer, in field order.
    ///
    /// The host-facing form of pair enumeration: calling without a
    /// consumer is a control-flow error, never an implicit
    /// materialization. Rust callers with a closure in hand can use
    /// [`pairs`](Self::pairs) directly.
    pub fn each_pair(
        &self,
        consumer: Option<&mut dyn FnMut(&FieldName, &Value)>,
    ) -> Result<()> {
        let consumer = consumer.ok_or(RecordError::MissingConsumer("each_pair"))?;
        for (member, value) in self.pairs() {
            consumer(member, value);
        }
        Ok(())
    }

    /// Values for which the predicate holds, preserving field order.
    pub fn select<P: FnMut(&Value) -> bool>(&self, mut predicate: P) -> Vec<Value> {
        self.slots.iter().filter(|v| predicate(v)).cloned().collect()
    }

    /// Values at the requested positions, in request order.
    ///
    /// Unlike [`get`](Self::get), positions at or past the field count
    /// yield [`Value::Null`] instead of failing; positions below the
    /// negative bound still fail with the underflow index error. Spans
    /// are inclusive, with endpoints normalized independently.
    pub fn values_at(&self, specs: &[PositionSpec]) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        for spec in specs {
            match spec {
                PositionSpec::At(offset) => {
                    out.push(self.lenient_fetch(*offset)?);
                }
                PositionSpec::Span(start, end) => {
                    let start = self.normalize(*start)?;
                    let end = self.normalize(*end)?;
                    for position in start..=end {
                        out.push(self.fetch_or_null(position));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Consume the record, yielding its slots in field order.
    #[must_use]
    pub fn to_values(self) -> Vec<Value> {
        self.slots
    }

    /// Strict structural equality: type identity plus element-wise strict
    /// value equality. This is the relation [`Hash`] agrees with, used for
    /// hash-table membership; `==` is the looser general equality.
    #[must_use]
    pub fn structural_eq(&self, other: &Record) -> bool {
        self.eq_with(other, true)
    }

    pub(crate) fn eq_with(&self, other: &Record, strict: bool) -> bool {
        if !RecordType::same_type(&self.ty, &other.ty) {
            return false;
        }
        // Defensive: cannot differ for same-typed instances, but the
        // length check is part of the equality contract.
        if self.slots.len() != other.slots.len() {
            return false;
        }
        self.slots
            .iter()
            .zip(&other.slots)
            .all(|(a, b)| a.eq_with(b, strict))
    }

    fn normalize(&self, offset: i64) -> Result<i64> {
        let normalized = if offset < 0 {
            offset + self.slots.len() as i64
        } else {
            offset
        };
        if normalized < 0 {
            Err(RecordError::OffsetTooSmall {
                offset: normalized,
                length: self.slots.len(),
            })
        } else {
            Ok(normalized)
        }
    }

    fn lenient_fetch(&self, offset: i64) -> Result<Value> {
        let normalized = self.normalize(offset)?;
        Ok(self.fetch_or_null(normalized))
    }

    fn fetch_or_null(&self, position: i64) -> Value {
        usize::try_from(position)
            .ok()
            .and_then(|p| self.slots.get(p))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// General equality: type identity, then pairwise loose value equality in
/// field order, cycle-protected through contained record handles.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, false)
    }
}

/// Hash of the ordered value sequence. Field order matters; two
/// structurally-equal instances hash identically.
impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in &self.slots {
            value.hash(state);
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<record")?;
        if let Some(name) = self.ty.name() {
            write!(f, " {}", name)?;
        }
        for (i, (member, value)) in self.pairs().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}={}", member, value)?;
        }
        f.write_str(">")
    }
}

/// Shared, interiorly mutable reference to a record.
///
/// Handles carry pointer identity, which is what makes cyclic record
/// graphs both expressible and safe to compare, hash, and render: the
/// recursion guard keys on the handle's address. Locking discipline
/// follows the single-logical-call-stack model; concurrent use requires
/// external serialization.
#[derive(Clone)]
pub struct RecordHandle(Arc<RwLock<Record>>);

impl RecordHandle {
    /// Wrap a record in a shared handle.
    #[must_use]
    pub fn new(record: Record) -> Self {
        Self(Arc::new(RwLock::new(record)))
    }

    /// Read access to the record.
    pub fn read(&self) -> RwLockReadGuard<'_, Record> {
        self.0.read()
    }

    /// Write access to the record.
    pub fn write(&self) -> RwLockWriteGuard<'_, Record> {
        self.0.write()
    }

    /// Pointer identity: `true` if both handles refer to the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &RecordHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub(crate) fn eq_with(&self, other: &RecordHandle, strict: bool) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match guard::try_enter(Visit::compare(self.id(), other.id())) {
            // Revisiting a pair already under comparison on this stack:
            // treat as equal for this comparison instead of recursing.
            None => true,
            Some(_visit) => {
                let a = self.0.read_recursive();
                let b = other.0.read_recursive();
                a.eq_with(&b, strict)
            }
        }
    }
}

impl fmt::Debug for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordHandle({:#x})", self.id())
    }
}

impl PartialEq for RecordHandle {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, true)
    }
}

impl Hash for RecordHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match guard::try_enter(Visit::Hash(self.id())) {
            // Cycle: contribute a fixed marker instead of recursing.
            None => state.write_u64(0x9e37_79b9_7f4a_7c15),
            Some(_visit) => self.0.read_recursive().hash(state),
        }
    }
}

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match guard::try_enter(Visit::Render(self.id())) {
            // A render for this handle is already in progress up the
            // stack: emit the fixed cycle placeholder.
            None => {
                let record = self.0.read_recursive();
                match record.type_name() {
                    Some(name) => write!(f, "#<record {}:...>", name),
                    None => f.write_str("#<record:...>"),
                }
            }
            Some(_visit) => {
                let record = self.0.read_recursive();
                fmt::Display::fmt(&*record, f)
            }
        }
    }
}

impl From<Record> for RecordHandle {
    fn from(record: Record) -> Self {
        Self::new(record)
    }
}

/// One entry of a `values_at` request: a single position or an inclusive
/// span of positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSpec {
    At(i64),
    Span(i64, i64),
}

impl From<i64> for PositionSpec {
    fn from(offset: i64) -> Self {
        Self::At(offset)
    }
}

impl From<i32> for PositionSpec {
    fn from(offset: i32) -> Self {
        Self::At(i64::from(offset))
    }
}

impl From<RangeInclusive<i64>> for PositionSpec {
    fn from(span: RangeInclusive<i64>) -> Self {
        Self::Span(*span.start(), *span.end())
    }
}

impl From<RangeInclusive<i32>> for PositionSpec {
    fn from(span: RangeInclusive<i32>) -> Self {
        Self::Span(i64::from(*span.start()), i64::from(*span.end()))
    }
}
