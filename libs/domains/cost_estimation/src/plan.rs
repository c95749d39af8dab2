//! Terraform plan loading
//!
//! Reads the JSON produced by `terraform show -json <planfile>` and flattens the
//! planned resources of the root module and all child modules into
//! [`ResourceData`] values ready for mapping.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::error::{CostError, CostResult};
use crate::resource_data::ResourceData;

#[derive(Debug, Deserialize)]
struct Plan {
    planned_values: Option<PlannedValues>,
    #[serde(default)]
    configuration: Configuration,
}

#[derive(Debug, Deserialize)]
struct PlannedValues {
    root_module: Module,
}

#[derive(Debug, Default, Deserialize)]
struct Module {
    #[serde(default)]
    resources: Vec<PlannedResource>,
    #[serde(default)]
    child_modules: Vec<Module>,
}

#[derive(Debug, Deserialize)]
struct PlannedResource {
    address: String,
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default)]
    values: Value,
}

fn default_mode() -> String {
    "managed".to_string()
}

#[derive(Debug, Default, Deserialize)]
struct Configuration {
    #[serde(default)]
    provider_config: HashMap<String, ProviderConfig>,
}

#[derive(Debug, Deserialize)]
struct ProviderConfig {
    #[serde(default)]
    expressions: HashMap<String, Expression>,
}

#[derive(Debug, Deserialize)]
struct Expression {
    constant_value: Option<Value>,
}

impl Configuration {
    /// Region hard-coded in the `aws` provider block, if any
    fn aws_region(&self) -> Option<&str> {
        self.provider_config
            .get("aws")?
            .expressions
            .get("region")?
            .constant_value
            .as_ref()?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

/// Options controlling how plan resources are turned into [`ResourceData`]
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Region used when neither the resource nor the provider block sets one
    pub default_region: Option<String>,
}

/// Parse a Terraform JSON plan into managed resource declarations.
///
/// Each resource's region is resolved from its own `region` attribute, then the
/// `aws` provider block, then [`PlanOptions::default_region`], and written back
/// into its values so mappers read it like any other attribute.
///
/// Only the constant `region` of the root, unaliased `aws` provider block is
/// consulted. Aliased providers (`aws.west`) and module-scoped providers
/// (`module.x:aws`) are ignored, so resources bound to them take the root
/// provider region or the default region unless they declare their own.
#[instrument(skip_all)]
pub fn parse_plan(json: &str, options: &PlanOptions) -> CostResult<Vec<ResourceData>> {
    let plan: Plan = serde_json::from_str(json)?;
    let planned = plan
        .planned_values
        .ok_or_else(|| CostError::InvalidPlan("missing planned_values".to_string()))?;

    let provider_region = plan.configuration.aws_region();
    let fallback_region = provider_region.or(options.default_region.as_deref());

    let mut resources = Vec::new();
    collect_resources(planned.root_module, fallback_region, &mut resources);

    debug!(count = resources.len(), "Loaded resources from plan");
    Ok(resources)
}

fn collect_resources(module: Module, region: Option<&str>, out: &mut Vec<ResourceData>) {
    for planned in module.resources {
        if planned.mode != "managed" {
            continue;
        }

        let mut data = ResourceData::new(planned.address, planned.resource_type, planned.values);
        if let Some(region) = region {
            if !data.get("region").exists() {
                data.set("region", Value::String(region.to_string()));
            }
        }
        out.push(data);
    }

    for child in module.child_modules {
        collect_resources(child, region, out);
    }
}
