//! `aws_elasticsearch_domain`: instance hours for data, dedicated master and
//! UltraWarm nodes plus EBS storage (and provisioned IOPS for io1 volumes).

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::{debug, instrument};

use super::{DEFAULT_VOLUME_SIZE, PROVIDER_AWS};
use crate::error::CostResult;
use crate::models::{AttributeFilter, CostComponent, ProductFilter, Resource};
use crate::registry::RegistryItem;
use crate::resource_data::{Attribute, ResourceData};
use crate::usage::UsageData;

pub const RESOURCE_TYPE: &str = "aws_elasticsearch_domain";

const SERVICE: &str = "AmazonES";
const INSTANCE_FAMILY: &str = "Elastic Search Instance";
const VOLUME_FAMILY: &str = "Elastic Search Volume";
const DEFAULT_VOLUME_TYPE: &str = "gp2";

pub fn registry_item() -> RegistryItem {
    RegistryItem {
        name: RESOURCE_TYPE,
        provider: PROVIDER_AWS,
        mapper: new_elasticsearch_domain,
    }
}

/// Pricing catalog `storageMedia` label for an EBS volume type.
/// Unknown types are priced as gp2.
pub fn storage_media(volume_type: &str) -> &'static str {
    match volume_type {
        "gp2" => "GP2",
        "io1" => "PIOPS-Storage",
        "standard" => "Magnetic",
        _ => DEFAULT_VOLUME_TYPE,
    }
}

/// Node group billed per instance-hour
struct NodeGroup<'a> {
    label: &'static str,
    instance_type: &'a str,
    count: i64,
}

struct EbsVolume<'a> {
    volume_type: &'a str,
    size_gb: Decimal,
    iops: Decimal,
}

#[instrument(skip_all, fields(address = %data.address))]
pub fn new_elasticsearch_domain(
    data: &ResourceData,
    _usage: Option<&UsageData>,
) -> CostResult<Resource> {
    let region = data.get("region").required_str()?;

    let cluster_config = data.get("cluster_config");
    let cluster = cluster_config
        .block()?
        .ok_or_else(|| cluster_config.missing())?;

    let data_nodes = node_group(&cluster, "Instance", "instance_type", "instance_count")?;
    let mut optional_nodes = Vec::new();
    if cluster.get("dedicated_master_enabled").bool_or(false)? {
        optional_nodes.push(node_group(
            &cluster,
            "Dedicated Master Instance",
            "dedicated_master_type",
            "dedicated_master_count",
        )?);
    }
    if cluster.get("warm_enabled").bool_or(false)? {
        optional_nodes.push(node_group(
            &cluster,
            "Ultrawarm Instance",
            "warm_type",
            "warm_count",
        )?);
    }

    let ebs = ebs_volume(data)?;
    debug!(
        region,
        volume_type = ebs.volume_type,
        optional_nodes = optional_nodes.len(),
        "Resolved Elasticsearch domain configuration"
    );

    let mut cost_components = vec![instance_component(region, &data_nodes)];

    cost_components.push(CostComponent::monthly(
        format!("Storage ({})", ebs.volume_type),
        "GB-months",
        ebs.size_gb,
        ProductFilter::aws(
            region,
            SERVICE,
            VOLUME_FAMILY,
            vec![
                AttributeFilter::regex("usagetype", "/ES.+-Storage/"),
                AttributeFilter::value("storageMedia", storage_media(ebs.volume_type)),
            ],
        ),
    ));

    if ebs.volume_type == "io1" {
        cost_components.push(CostComponent::monthly(
            format!("Storage IOPS ({})", ebs.volume_type),
            "IOPS-months",
            ebs.iops,
            ProductFilter::aws(
                region,
                SERVICE,
                VOLUME_FAMILY,
                vec![
                    AttributeFilter::regex("usagetype", "/ES:PIOPS/"),
                    AttributeFilter::value("storageMedia", "PIOPS"),
                ],
            ),
        ));
    }

    cost_components.extend(
        optional_nodes
            .iter()
            .map(|group| instance_component(region, group)),
    );

    Ok(Resource {
        name: data.address.clone(),
        resource_type: data.resource_type.clone(),
        cost_components,
    })
}

fn node_group<'a>(
    cluster: &Attribute<'a>,
    label: &'static str,
    type_key: &str,
    count_key: &str,
) -> CostResult<NodeGroup<'a>> {
    let instance_type = cluster.get(type_key).required_str()?;
    let count_attr = cluster.get(count_key);
    let count = count_attr.required_i64()?;
    if count < 0 {
        return Err(count_attr.malformed("a non-negative integer"));
    }

    Ok(NodeGroup {
        label,
        instance_type,
        count,
    })
}

fn ebs_volume(data: &ResourceData) -> CostResult<EbsVolume<'_>> {
    let Some(ebs) = data.get("ebs_options").block()? else {
        return Ok(EbsVolume {
            volume_type: DEFAULT_VOLUME_TYPE,
            size_gb: Decimal::from(DEFAULT_VOLUME_SIZE),
            iops: Decimal::ONE,
        });
    };

    let size_gb = match decimal(&ebs.get("volume_size"))? {
        Some(size) if size.is_sign_negative() => {
            return Err(ebs.get("volume_size").malformed("a non-negative number"));
        }
        Some(size) => size,
        None => Decimal::from(DEFAULT_VOLUME_SIZE),
    };

    let volume_type = ebs.get("volume_type").as_str()?.unwrap_or(DEFAULT_VOLUME_TYPE);

    let iops = decimal(&ebs.get("iops"))?
        .unwrap_or(Decimal::ONE)
        .max(Decimal::ONE);

    Ok(EbsVolume {
        volume_type,
        size_gb,
        iops,
    })
}

fn decimal(attr: &Attribute<'_>) -> CostResult<Option<Decimal>> {
    match attr.as_f64()? {
        None => Ok(None),
        Some(value) => Decimal::from_f64(value)
            .map(|d| Some(d.normalize()))
            .ok_or_else(|| attr.malformed("a number in decimal range")),
    }
}

fn instance_component(region: &str, group: &NodeGroup<'_>) -> CostComponent {
    CostComponent::hourly(
        format!("{} (on-demand, {})", group.label, group.instance_type),
        "hours",
        Decimal::from(group.count),
        ProductFilter::aws(
            region,
            SERVICE,
            INSTANCE_FAMILY,
            vec![
                AttributeFilter::regex("usagetype", "/ESInstance/"),
                AttributeFilter::value("instanceType", group.instance_type),
            ],
        ),
    )
}
