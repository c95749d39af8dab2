//! Report rendering

use clap::ValueEnum;
use domain_cost_estimation::{AttributeMatch, Breakdown, CostComponent, Quantity};
use eyre::Result;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn render(breakdown: &Breakdown, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(breakdown)?),
        OutputFormat::Table => Ok(render_table(breakdown)),
    }
}

fn render_table(breakdown: &Breakdown) -> String {
    let mut out = String::new();

    for resource in &breakdown.resources {
        let _ = writeln!(out, "{}", resource.name);
        let name_width = resource
            .cost_components
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);

        for component in &resource.cost_components {
            let _ = writeln!(
                out,
                "  {:<name_width$}  {:>10} {:<12} {}",
                component.name,
                component.quantity.amount(),
                unit_label(component),
                filter_summary(component),
            );
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{} resources mapped, {} cost components",
        breakdown.resources.len(),
        breakdown.component_count()
    );

    if !breakdown.skipped.is_empty() {
        let _ = writeln!(out, "\n{} resources skipped:", breakdown.skipped.len());
        for skipped in &breakdown.skipped {
            let _ = writeln!(out, "  {}: {}", skipped.address, skipped.reason);
        }
    }

    if !breakdown.unsupported.is_empty() {
        let _ = writeln!(
            out,
            "\n{} resources not supported:",
            breakdown.unsupported.len()
        );
        for address in &breakdown.unsupported {
            let _ = writeln!(out, "  {}", address);
        }
    }

    out
}

fn unit_label(component: &CostComponent) -> String {
    match component.quantity {
        Quantity::Hourly(_) => format!("{}/hr", component.unit),
        Quantity::Monthly(_) => format!("{}/mo", component.unit),
    }
}

fn filter_summary(component: &CostComponent) -> String {
    let filter = &component.product_filter;
    let attributes: Vec<String> = filter
        .attribute_filters
        .iter()
        .map(|f| match &f.matcher {
            AttributeMatch::Value(v) => format!("{}={}", f.key, v),
            AttributeMatch::ValueRegex(r) => format!("{}~{}", f.key, r),
        })
        .collect();

    format!(
        "[{} {} {} \"{}\" {}; {}]",
        filter.vendor_name,
        filter.region,
        filter.service,
        filter.product_family,
        attributes.join(" "),
        component.price_filter.purchase_option
    )
}
