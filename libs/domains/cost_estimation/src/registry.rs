use std::collections::BTreeMap;

use crate::error::CostResult;
use crate::models::Resource;
use crate::providers;
use crate::resource_data::ResourceData;
use crate::usage::UsageData;

/// Signature shared by every resource mapper
pub type ResourceFn = fn(&ResourceData, Option<&UsageData>) -> CostResult<Resource>;

/// Dispatch entry binding a resource type name to its mapper
#[derive(Clone, Copy)]
pub struct RegistryItem {
    /// Resource type, e.g. `aws_elasticsearch_domain`
    pub name: &'static str,
    pub provider: &'static str,
    pub mapper: ResourceFn,
}

impl std::fmt::Debug for RegistryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryItem")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .finish()
    }
}

/// Registry of resource mappers keyed by resource type
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    items: BTreeMap<&'static str, RegistryItem>,
}

impl ResourceRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Register a mapper, replacing any existing one for the same type
    pub fn register(&mut self, item: RegistryItem) {
        self.items.insert(item.name, item);
    }

    pub fn get(&self, resource_type: &str) -> Option<&RegistryItem> {
        self.items.get(resource_type)
    }

    pub fn is_supported(&self, resource_type: &str) -> bool {
        self.items.contains_key(resource_type)
    }

    /// Supported resource types in sorted order
    pub fn supported_types(&self) -> Vec<&'static str> {
        self.items.keys().copied().collect()
    }

    pub fn items(&self) -> impl Iterator<Item = &RegistryItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ResourceRegistry {
    /// Registry with every built-in mapper
    fn default() -> Self {
        let mut registry = Self::new();
        for item in providers::registry_items() {
            registry.register(item);
        }
        registry
    }
}
