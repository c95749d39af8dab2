use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::CostError;
use crate::models::Resource;
use crate::registry::ResourceRegistry;
use crate::resource_data::ResourceData;
use crate::usage::UsageFile;

/// A resource that could not be mapped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedResource {
    pub address: String,
    pub reason: String,
}

/// Result of mapping a set of resources
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Successfully mapped resources, in input order
    pub resources: Vec<Resource>,
    /// Supported resources whose declaration could not be mapped
    pub skipped: Vec<SkippedResource>,
    /// Addresses of resources with no registered mapper
    pub unsupported: Vec<String>,
}

impl Breakdown {
    pub fn component_count(&self) -> usize {
        self.resources.iter().map(|r| r.cost_components.len()).sum()
    }
}

/// Service mapping resource declarations to cost components
#[derive(Debug, Clone, Default)]
pub struct CostEstimationService {
    registry: ResourceRegistry,
}

impl CostEstimationService {
    pub fn new(registry: ResourceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Map a single resource through its registered mapper
    pub fn map_resource(
        &self,
        data: &ResourceData,
        usage: Option<&UsageFile>,
    ) -> Result<Resource, CostError> {
        let item = self
            .registry
            .get(&data.resource_type)
            .ok_or_else(|| CostError::UnsupportedResource(data.resource_type.clone()))?;
        let usage = usage.and_then(|u| u.for_resource(&data.address));
        (item.mapper)(data, usage)
    }

    /// Map every resource. Failures affect only the failing resource.
    #[instrument(skip_all, fields(resources = resources.len()))]
    pub fn estimate(&self, resources: &[ResourceData], usage: Option<&UsageFile>) -> Breakdown {
        let mut breakdown = Breakdown::default();

        for data in resources {
            match self.map_resource(data, usage) {
                Ok(resource) => breakdown.resources.push(resource),
                Err(CostError::UnsupportedResource(resource_type)) => {
                    debug!(address = %data.address, resource_type = %resource_type, "No mapper for resource type");
                    breakdown.unsupported.push(data.address.clone());
                }
                Err(e) => {
                    warn!(address = %data.address, error = %e, "Skipping resource");
                    breakdown.skipped.push(SkippedResource {
                        address: data.address.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            mapped = breakdown.resources.len(),
            components = breakdown.component_count(),
            skipped = breakdown.skipped.len(),
            unsupported = breakdown.unsupported.len(),
            "Mapped resources to cost components"
        );
        breakdown
    }
}
