//! Resource mappers grouped by cloud provider

pub mod aws;

use crate::registry::RegistryItem;

/// Registry items for every supported provider
pub fn registry_items() -> Vec<RegistryItem> {
    aws::registry_items()
}
