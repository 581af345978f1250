use std::sync::Arc;

use dashmap::DashMap;

use crate::descriptor::{Scope, TypeDescriptor};

/// Metadata record used to construct a bean on demand: the discovered type
/// descriptor plus the resolved scope. Immutable once registered.
pub(crate) struct BeanDefinition {
    descriptor: TypeDescriptor,
    scope: Scope,
}

impl BeanDefinition {
    pub(crate) fn new(descriptor: TypeDescriptor) -> Self {
        let scope = descriptor.scope().unwrap_or(Scope::Singleton);
        Self { descriptor, scope }
    }

    pub(crate) fn scope(&self) -> Scope {
        self.scope
    }

    pub(crate) fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}

/// Mapping from bean name to definition. Populated during the scan phase,
/// read-only afterwards. Reads must be safe from multiple threads since the
/// registry sits on the hot path of every prototype resolution.
#[derive(Default)]
pub(crate) struct DefinitionRegistry {
    definitions: DashMap<String, Arc<BeanDefinition>>,
}

impl DefinitionRegistry {
    /// Inserts or overwrites the definition for `name`. The only validation
    /// is that the name is non-empty; an empty name is logged and skipped.
    pub(crate) fn register(&self, name: String, definition: BeanDefinition) {
        if name.is_empty() {
            tracing::warn!(
                "Skipping definition with empty bean name for type {}",
                definition.descriptor().type_name()
            );
            return;
        }
        self.definitions.insert(name, Arc::new(definition));
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Arc<BeanDefinition>> {
        self.definitions.get(name).map(|entry| entry.value().clone())
    }

    /// Names of all singleton definitions, in unspecified order.
    pub(crate) fn singleton_names(&self) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|entry| entry.value().scope() == Scope::Singleton)
            .map(|entry| entry.key().clone())
            .collect()
    }
}
