// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registration collaborator.
//!
//! When a display name is supplied at definition time, the factory hands
//! the descriptor to a registry keyed by that name. Namespace policy
//! (lookup, conflicts) lives entirely on this side of the seam; the
//! factory only makes the single registration call.

use crate::descriptor::RecordType;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry that stores record type descriptors under display names.
pub trait RecordRegistry {
    /// Register a descriptor under `name`, replacing any previous entry.
    fn register(&mut self, name: &str, ty: Arc<RecordType>);

    /// Look up a descriptor by name.
    ///
    /// Returns `None` if the name is unknown.
    fn lookup(&self, name: &str) -> Option<Arc<RecordType>>;
}

/// Simple [`HashMap`]-backed [`RecordRegistry`].
///
/// Suitable for tests and single-threaded hosts. For shared namespaces
/// across threads, use [`SharedRecordRegistry`].
#[derive(Debug, Default)]
pub struct HashMapRecordRegistry {
    types: HashMap<String, Arc<RecordType>>,
}

impl HashMapRecordRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl RecordRegistry for HashMapRecordRegistry {
    fn register(&mut self, name: &str, ty: Arc<RecordType>) {
        if self.types.insert(name.to_string(), ty).is_some() {
            log::debug!("[HashMapRecordRegistry::register] replaced '{}'", name);
        }
    }

    fn lookup(&self, name: &str) -> Option<Arc<RecordType>> {
        self.types.get(name).cloned()
    }
}

/// Concurrent [`DashMap`]-backed [`RecordRegistry`] for hosts that define
/// and look up types from multiple threads.
#[derive(Debug, Default)]
pub struct SharedRecordRegistry {
    types: DashMap<String, Arc<RecordType>>,
}

impl SharedRecordRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register through a shared reference.
    pub fn register_shared(&self, name: &str, ty: Arc<RecordType>) {
        if self.types.insert(name.to_string(), ty).is_some() {
            log::debug!("[SharedRecordRegistry::register] replaced '{}'", name);
        }
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl RecordRegistry for SharedRecordRegistry {
    fn register(&mut self, name: &str, ty: Arc<RecordType>) {
        self.register_shared(name, ty);
    }

    fn lookup(&self, name: &str) -> Option<Arc<RecordType>> {
        self.types.get(name).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = HashMapRecordRegistry::new();
        assert!(registry.is_empty());

        let ty = RecordType::define(Some("Customer"), &["name", "zip"]).expect("define");
        registry.register("Customer", ty.clone());

        assert_eq!(registry.len(), 1);
        let found = registry.lookup("Customer").expect("lookup");
        assert!(Arc::ptr_eq(&found, &ty));
        assert!(registry.lookup("Vendor").is_none());
    }

    #[test]
    fn test_redefinition_replaces() {
        let mut registry = HashMapRecordRegistry::new();
        let v1 = RecordType::define(Some("Point"), &["x", "y"]).expect("define");
        let v2 = RecordType::define(Some("Point"), &["x", "y", "z"]).expect("define");

        registry.register("Point", v1);
        registry.register("Point", v2.clone());

        assert_eq!(registry.len(), 1);
        let found = registry.lookup("Point").expect("lookup");
        assert!(Arc::ptr_eq(&found, &v2));
    }

    #[test]
    fn test_shared_registry_across_threads() {
        let registry = Arc::new(SharedRecordRegistry::new());
        let ty = RecordType::define(Some("Reading"), &["sensor", "value"]).expect("define");

        let writer = {
            let registry = registry.clone();
            let ty = ty.clone();
            std::thread::spawn(move || registry.register_shared("Reading", ty))
        };
        writer.join().expect("join");

        let found = registry.lookup("Reading").expect("lookup");
        assert!(Arc::ptr_eq(&found, &ty));
    }

    #[test]
    fn test_define_in_registers() {
        let mut registry = HashMapRecordRegistry::new();
        let ty =
            RecordType::define_in("Customer", &["name", "zip"], &mut registry).expect("define");
        let found = registry.lookup("Customer").expect("lookup");
        assert!(Arc::ptr_eq(&found, &ty));
    }
}
