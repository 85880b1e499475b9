// Path: crates/api/src/services/access.rs

//! Read-only access to shared platform services.

use crate::identity::RegistrationView;
use crate::services::BlockchainService;
use canvass_types::service_configs::Capabilities;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A read-only, type-safe service locator.
#[derive(Clone, Default)]
pub struct ServiceDirectory {
    /// Services ordered by `id()`, for deterministic iteration.
    ordered: Vec<Arc<dyn BlockchainService>>,
    /// A map for type-based lookups.
    by_type: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl fmt::Debug for ServiceDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDirectory")
            .field("services", &self.ordered.iter().map(|s| s.id()).collect::<Vec<_>>())
            .finish()
    }
}

impl ServiceDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service. A service of the same concrete type replaces the earlier one.
    pub fn with_service<T: BlockchainService>(mut self, service: Arc<T>) -> Self {
        let type_id = TypeId::of::<T>();
        if self.by_type.contains_key(&type_id) {
            self.ordered.retain(|s| s.as_any().type_id() != type_id);
        }
        self.by_type.insert(type_id, service.clone());
        self.ordered.push(service);
        // Sort by unique service ID for deterministic ordering.
        self.ordered.sort_by(|a, b| a.id().cmp(b.id()));
        self
    }

    /// Gets a service by its concrete type.
    pub fn get<T: BlockchainService>(&self) -> Option<Arc<T>> {
        self.by_type
            .get(&TypeId::of::<T>())
            .and_then(|svc| Arc::downcast(svc.clone()).ok())
    }

    /// Gets a service by its `id()`.
    pub fn by_id(&self, id: &str) -> Option<&Arc<dyn BlockchainService>> {
        self.ordered.iter().find(|s| s.id() == id)
    }

    /// Returns the first service, in deterministic order, that answers registration queries.
    pub fn registration_view(&self) -> Option<&dyn RegistrationView> {
        self.ordered
            .iter()
            .filter(|s| s.capabilities().contains(Capabilities::REGISTRATION_VIEW))
            .find_map(|s| s.as_registration_view())
    }

    /// Returns an iterator over all stored services in a deterministic order.
    pub fn services(&self) -> impl Iterator<Item = &Arc<dyn BlockchainService>> {
        self.ordered.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;

    impl BlockchainService for Alpha {
        fn id(&self) -> &str {
            "alpha"
        }
        fn abi_version(&self) -> u32 {
            1
        }
        fn state_schema(&self) -> &str {
            "v1"
        }
        fn capabilities(&self) -> Capabilities {
            Capabilities::empty()
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl BlockchainService for Beta {
        fn id(&self) -> &str {
            "beta"
        }
        fn abi_version(&self) -> u32 {
            1
        }
        fn state_schema(&self) -> &str {
            "v1"
        }
        fn capabilities(&self) -> Capabilities {
            // Claims the role but cannot be downcast to it.
            Capabilities::REGISTRATION_VIEW
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_lookup_by_type_and_order() {
        let dir = ServiceDirectory::new()
            .with_service(Arc::new(Beta))
            .with_service(Arc::new(Alpha));

        let ids: Vec<_> = dir.services().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
        assert!(dir.get::<Alpha>().is_some());
        assert!(dir.by_id("beta").is_some());
        assert!(dir.registration_view().is_none());
    }

    #[test]
    fn test_replacing_a_service_keeps_one_entry() {
        let dir = ServiceDirectory::new()
            .with_service(Arc::new(Alpha))
            .with_service(Arc::new(Alpha));
        assert_eq!(dir.services().count(), 1);
    }
}
