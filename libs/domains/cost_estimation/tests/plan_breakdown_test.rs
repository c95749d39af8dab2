//! End-to-end tests: Terraform plan JSON in, cost components out

use domain_cost_estimation::*;
use rust_decimal::Decimal;

const PLAN: &str = r#"{
  "format_version": "1.2",
  "terraform_version": "1.6.6",
  "planned_values": {
    "root_module": {
      "resources": [
        {
          "address": "aws_elasticsearch_domain.basic",
          "mode": "managed",
          "type": "aws_elasticsearch_domain",
          "name": "basic",
          "provider_name": "registry.terraform.io/hashicorp/aws",
          "values": {
            "domain_name": "basic",
            "elasticsearch_version": "7.10",
            "cluster_config": [
              {
                "instance_type": "m4.large.elasticsearch",
                "instance_count": 3,
                "dedicated_master_enabled": false,
                "warm_enabled": false
              }
            ],
            "ebs_options": []
          }
        },
        {
          "address": "aws_elasticsearch_domain.provisioned",
          "mode": "managed",
          "type": "aws_elasticsearch_domain",
          "name": "provisioned",
          "values": {
            "cluster_config": [
              {
                "instance_type": "c5.xlarge.elasticsearch",
                "instance_count": 2,
                "dedicated_master_enabled": true,
                "dedicated_master_type": "m4.large.elasticsearch",
                "dedicated_master_count": 2,
                "warm_enabled": true,
                "warm_type": "ultrawarm1.medium.elasticsearch",
                "warm_count": 1
              }
            ],
            "ebs_options": [
              {"ebs_enabled": true, "volume_type": "io1", "volume_size": 100, "iops": -10}
            ]
          }
        },
        {
          "address": "aws_s3_bucket.snapshots",
          "mode": "managed",
          "type": "aws_s3_bucket",
          "name": "snapshots",
          "values": {"bucket": "snapshots"}
        }
      ],
      "child_modules": [
        {
          "address": "module.search",
          "resources": [
            {
              "address": "module.search.aws_elasticsearch_domain.this",
              "mode": "managed",
              "type": "aws_elasticsearch_domain",
              "name": "this",
              "values": {"cluster_config": []}
            }
          ]
        }
      ]
    }
  },
  "configuration": {
    "provider_config": {
      "aws": {"name": "aws", "expressions": {"region": {"constant_value": "us-east-1"}}}
    }
  }
}"#;

const USAGE: &str = r#"
version: 0.1
resource_usage:
  aws_elasticsearch_domain.basic:
    monthly_snapshot_gb: 25
"#;

fn breakdown() -> Breakdown {
    let resources = parse_plan(PLAN, &PlanOptions::default()).unwrap();
    let usage = UsageFile::from_yaml(USAGE).unwrap();
    CostEstimationService::default().estimate(&resources, Some(&usage))
}

fn component<'a>(resource: &'a Resource, name: &str) -> &'a CostComponent {
    resource
        .cost_components
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("{} has no component '{}'", resource.name, name))
}

#[test]
fn test_plan_breakdown_groups_results() {
    let breakdown = breakdown();

    let mapped: Vec<_> = breakdown.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        mapped,
        vec!["aws_elasticsearch_domain.basic", "aws_elasticsearch_domain.provisioned"]
    );
    assert_eq!(breakdown.unsupported, vec!["aws_s3_bucket.snapshots".to_string()]);
    assert_eq!(breakdown.skipped.len(), 1);
    assert_eq!(
        breakdown.skipped[0].address,
        "module.search.aws_elasticsearch_domain.this"
    );
}

#[test]
fn test_basic_domain_uses_defaults() {
    let breakdown = breakdown();
    let basic = &breakdown.resources[0];

    assert_eq!(basic.cost_components.len(), 2);
    let instance = component(basic, "Instance (on-demand, m4.large.elasticsearch)");
    assert_eq!(instance.hourly_quantity(), Some(Decimal::from(3)));
    assert_eq!(instance.product_filter.region, "us-east-1");

    let storage = component(basic, "Storage (gp2)");
    assert_eq!(storage.monthly_quantity(), Some(Decimal::from(8)));
}

#[test]
fn test_provisioned_domain_has_every_component() {
    let breakdown = breakdown();
    let provisioned = &breakdown.resources[1];

    let names: Vec<_> = provisioned
        .cost_components
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Instance (on-demand, c5.xlarge.elasticsearch)",
            "Storage (io1)",
            "Storage IOPS (io1)",
            "Dedicated Master Instance (on-demand, m4.large.elasticsearch)",
            "Ultrawarm Instance (on-demand, ultrawarm1.medium.elasticsearch)",
        ]
    );

    let iops = component(provisioned, "Storage IOPS (io1)");
    assert_eq!(iops.monthly_quantity(), Some(Decimal::ONE));
    assert_eq!(
        component(provisioned, "Storage (io1)").monthly_quantity(),
        Some(Decimal::from(100))
    );
}

#[test]
fn test_breakdown_json_shape() {
    let value = serde_json::to_value(breakdown()).unwrap();
    let component = &value["resources"][1]["costComponents"][2];

    assert_eq!(component["unit"], "IOPS-months");
    assert_eq!(component["monthlyQuantity"], "1");
    assert_eq!(component["productFilter"]["service"], "AmazonES");
    assert_eq!(component["productFilter"]["vendorName"], "aws");
    assert_eq!(component["priceFilter"]["purchaseOption"], "on_demand");
}
