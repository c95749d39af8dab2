//! AWS resource mappers

pub mod elasticsearch_domain;

use crate::registry::RegistryItem;

pub use elasticsearch_domain::new_elasticsearch_domain;

pub const PROVIDER_AWS: &str = "aws";

/// Size in GB assumed for EBS-backed storage when no size is declared
pub const DEFAULT_VOLUME_SIZE: i64 = 8;

/// All AWS resource types this crate knows how to map
pub fn registry_items() -> Vec<RegistryItem> {
    vec![elasticsearch_domain::registry_item()]
}
