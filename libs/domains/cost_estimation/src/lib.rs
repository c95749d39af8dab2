//! Cost Estimation Domain
//!
//! Turns declared infrastructure resources into cost components: named line
//! items with a quantity plus the product and price filters a pricing catalog
//! needs to find a unit price. Catalog lookup and aggregation live elsewhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    Plan     │  ← Terraform JSON plan → ResourceData
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Per-resource dispatch, skips failing resources
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Registry   │  ← Resource type → mapper
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Providers  │  ← Mappers (aws_elasticsearch_domain, ...)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Resource, CostComponent, filters
//! └─────────────┘
//! ```

pub mod error;
pub mod models;
pub mod plan;
pub mod providers;
pub mod registry;
pub mod resource_data;
pub mod service;
pub mod usage;

// Re-export commonly used types
pub use error::{CostError, CostResult};
pub use models::{
    AttributeFilter, AttributeMatch, CloudProvider, CostComponent, PriceFilter, ProductFilter,
    PurchaseOption, Quantity, Resource,
};
pub use plan::{PlanOptions, parse_plan};
pub use registry::{RegistryItem, ResourceFn, ResourceRegistry};
pub use resource_data::{Attribute, ResourceData};
pub use service::{Breakdown, CostEstimationService, SkippedResource};
pub use usage::{UsageData, UsageFile};
