// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dynrec - runtime record types
//!
//! A record type factory for shapes that are only known at run time:
//! given a name and an ordered field list, it synthesizes a first-class
//! record type whose instances carry exactly those fields, with generated
//! accessors, positional and by-name access, structural equality and
//! hashing, enumeration helpers, and cycle-safe rendering.
//!
//! # Features
//!
//! - **RecordType**: immutable shape descriptor (display name + ordered
//!   field table), defined once and shared by every instance
//! - **Record**: slot storage with positional, negative-index, and
//!   by-name access through one selector boundary
//! - **RecordHandle**: shared record references with pointer identity,
//!   making cyclic record graphs safe to compare, hash, and print
//! - **Registry seam**: named types are handed to a [`RecordRegistry`]
//!   collaborator; namespace policy stays outside the factory
//!
//! # Example
//!
//! ```rust
//! use dynrec::{Record, RecordType, Value};
//!
//! fn main() -> dynrec::Result<()> {
//!     // Synthesize a record type at runtime
//!     let customer = RecordType::define(Some("Customer"), &["name", "address", "zip"])?;
//!
//!     let mut joe = Record::new(
//!         &customer,
//!         vec![
//!             Value::from("Joe"),
//!             Value::from("123 Maple"),
//!             Value::from(12345),
//!         ],
//!     )?;
//!
//!     // Access by name, position, or negative position
//!     assert_eq!(joe.get("name")?.as_str(), Some("Joe"));
//!     assert_eq!(joe.get(0)?.as_str(), Some("Joe"));
//!     joe.set("zip", Value::from(90210))?;
//!     assert_eq!(joe.get(-1)?.as_int(), Some(90210));
//!
//!     assert_eq!(
//!         joe.to_string(),
//!         "#<record Customer name=\"Joe\", address=\"123 Maple\", zip=90210>"
//!     );
//!     Ok(())
//! }
//! ```

mod builder;
mod descriptor;
mod error;
mod field;
mod guard;
mod record;
mod registry;
mod selector;
mod value;

pub use builder::RecordTypeBuilder;
pub use descriptor::{FieldAccessor, RecordType};
pub use error::{RecordError, Result};
pub use field::FieldName;
pub use record::{PositionSpec, Record, RecordHandle};
pub use registry::{HashMapRecordRegistry, RecordRegistry, SharedRecordRegistry};
pub use selector::{IntoSelector, Selector};
pub use value::Value;
