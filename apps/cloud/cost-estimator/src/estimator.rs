//! Cost Estimator Service
//!
//! Loads a plan (and optional usage file) from disk and maps every resource
//! into cost components.

use domain_cost_estimation::{
    parse_plan, Breakdown, CostEstimationService, PlanOptions, ResourceRegistry, UsageFile,
};
use eyre::{Result, WrapErr};
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;

/// Main estimator service
pub struct CostEstimator {
    config: Config,
    service: CostEstimationService,
}

impl CostEstimator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            service: CostEstimationService::new(ResourceRegistry::default()),
        }
    }

    pub fn supported_types(&self) -> Vec<&'static str> {
        self.service.registry().supported_types()
    }

    /// Break a plan file down into cost components
    pub async fn breakdown(
        &self,
        plan_path: &Path,
        usage_path: Option<&Path>,
        region: Option<String>,
    ) -> Result<Breakdown> {
        let plan_json = tokio::fs::read_to_string(plan_path)
            .await
            .wrap_err_with(|| format!("Failed to read plan file {}", plan_path.display()))?;

        let usage = match usage_path {
            Some(path) => Some(load_usage(path).await?),
            None => None,
        };

        let options = PlanOptions {
            default_region: self.config.region_or_default(region),
        };
        debug!(?options, "Parsing plan");

        let resources = parse_plan(&plan_json, &options)
            .wrap_err_with(|| format!("Failed to parse plan file {}", plan_path.display()))?;
        info!(path = %plan_path.display(), resources = resources.len(), "Loaded plan");

        Ok(self.service.estimate(&resources, usage.as_ref()))
    }
}

async fn load_usage(path: &Path) -> Result<UsageFile> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read usage file {}", path.display()))?;
    let usage = UsageFile::from_yaml(&contents)
        .wrap_err_with(|| format!("Failed to parse usage file {}", path.display()))?;
    info!(path = %path.display(), resources = usage.len(), "Loaded usage file");
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::{Environment, LogFormat};
    use std::path::PathBuf;

    fn config(default_region: Option<&str>) -> Config {
        Config {
            environment: Environment::Development,
            log_format: LogFormat::Compact,
            default_region: default_region.map(str::to_string),
        }
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cost-estimator-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const PLAN: &str = r#"{
        "planned_values": {"root_module": {"resources": [{
            "address": "aws_elasticsearch_domain.search",
            "mode": "managed",
            "type": "aws_elasticsearch_domain",
            "values": {
                "cluster_config": [{"instance_type": "r5.large.elasticsearch", "instance_count": 2}]
            }
        }]}}
    }"#;

    #[tokio::test]
    async fn test_breakdown_uses_default_region() {
        let plan = write_temp("plan-default-region.json", PLAN);
        let estimator = CostEstimator::new(config(Some("eu-west-2")));

        let breakdown = estimator.breakdown(&plan, None, None).await.unwrap();

        assert_eq!(breakdown.resources.len(), 1);
        assert_eq!(
            breakdown.resources[0].cost_components[0].product_filter.region,
            "eu-west-2"
        );
        std::fs::remove_file(plan).ok();
    }

    #[tokio::test]
    async fn test_breakdown_without_region_skips_resource() {
        let plan = write_temp("plan-no-region.json", PLAN);
        let estimator = CostEstimator::new(config(None));

        let breakdown = estimator.breakdown(&plan, None, None).await.unwrap();

        assert!(breakdown.resources.is_empty());
        assert_eq!(breakdown.skipped.len(), 1);
        assert!(breakdown.skipped[0].reason.contains("region"));
        std::fs::remove_file(plan).ok();
    }

    #[tokio::test]
    async fn test_breakdown_with_usage_file() {
        let plan = write_temp("plan-usage.json", PLAN);
        let usage = write_temp(
            "usage.yml",
            "version: 0.1\nresource_usage:\n  aws_elasticsearch_domain.search: {}\n",
        );
        let estimator = CostEstimator::new(config(None));

        let breakdown = estimator
            .breakdown(&plan, Some(&usage), Some("us-east-1".to_string()))
            .await
            .unwrap();

        assert_eq!(breakdown.resources.len(), 1);
        std::fs::remove_file(plan).ok();
        std::fs::remove_file(usage).ok();
    }

    #[tokio::test]
    async fn test_missing_plan_file_is_an_error() {
        let estimator = CostEstimator::new(config(None));
        let err = estimator
            .breakdown(Path::new("/nonexistent/plan.json"), None, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read plan file"));
    }

    #[test]
    fn test_supported_types() {
        let estimator = CostEstimator::new(config(None));
        assert!(estimator.supported_types().contains(&"aws_elasticsearch_domain"));
    }
}
