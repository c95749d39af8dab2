use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Cloud vendor as named in the pricing catalog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CloudProvider {
    #[default]
    Aws,
}

/// Purchase option used to narrow catalog prices after product matching
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PurchaseOption {
    #[default]
    OnDemand,
}

/// How an attribute filter compares against a catalog attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeMatch {
    /// Exact match
    Value(String),
    /// Regex match, written slash-delimited (e.g. `/ESInstance/`)
    ValueRegex(String),
}

/// A single key constraint on catalog product attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub key: String,
    #[serde(flatten)]
    pub matcher: AttributeMatch,
}

impl AttributeFilter {
    pub fn value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            matcher: AttributeMatch::Value(value.into()),
        }
    }

    pub fn regex(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            matcher: AttributeMatch::ValueRegex(pattern.into()),
        }
    }
}

/// Constraints selecting one product in the pricing catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub vendor_name: CloudProvider,
    pub region: String,
    pub service: String,
    pub product_family: String,
    pub attribute_filters: Vec<AttributeFilter>,
}

impl ProductFilter {
    pub fn aws(
        region: &str,
        service: &str,
        product_family: &str,
        attribute_filters: Vec<AttributeFilter>,
    ) -> Self {
        Self {
            vendor_name: CloudProvider::Aws,
            region: region.to_string(),
            service: service.to_string(),
            product_family: product_family.to_string(),
            attribute_filters,
        }
    }

    /// Look up the matcher for an attribute key
    pub fn attribute(&self, key: &str) -> Option<&AttributeMatch> {
        self.attribute_filters
            .iter()
            .find(|f| f.key == key)
            .map(|f| &f.matcher)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    pub purchase_option: PurchaseOption,
}

impl PriceFilter {
    pub fn on_demand() -> Self {
        Self {
            purchase_option: PurchaseOption::OnDemand,
        }
    }
}

/// Billed quantity; a component is priced either per hour or per month, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "hourlyQuantity")]
    Hourly(Decimal),
    #[serde(rename = "monthlyQuantity")]
    Monthly(Decimal),
}

impl Quantity {
    pub fn amount(&self) -> Decimal {
        match self {
            Quantity::Hourly(q) | Quantity::Monthly(q) => *q,
        }
    }
}

/// One priced line item of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    /// Display name, e.g. "Instance (on-demand, m4.large.elasticsearch)"
    pub name: String,
    /// Unit label, e.g. "hours" or "GB-months"
    pub unit: String,
    pub unit_multiplier: u32,
    #[serde(flatten)]
    pub quantity: Quantity,
    pub product_filter: ProductFilter,
    pub price_filter: PriceFilter,
}

impl CostComponent {
    /// On-demand component billed per hour
    pub fn hourly(
        name: impl Into<String>,
        unit: &str,
        quantity: Decimal,
        product_filter: ProductFilter,
    ) -> Self {
        Self::new(name.into(), unit, Quantity::Hourly(quantity), product_filter)
    }

    /// On-demand component billed per month
    pub fn monthly(
        name: impl Into<String>,
        unit: &str,
        quantity: Decimal,
        product_filter: ProductFilter,
    ) -> Self {
        Self::new(name.into(), unit, Quantity::Monthly(quantity), product_filter)
    }

    fn new(name: String, unit: &str, quantity: Quantity, product_filter: ProductFilter) -> Self {
        Self {
            name,
            unit: unit.to_string(),
            unit_multiplier: 1,
            quantity,
            product_filter,
            price_filter: PriceFilter::on_demand(),
        }
    }

    pub fn hourly_quantity(&self) -> Option<Decimal> {
        match self.quantity {
            Quantity::Hourly(q) => Some(q),
            Quantity::Monthly(_) => None,
        }
    }

    pub fn monthly_quantity(&self) -> Option<Decimal> {
        match self.quantity {
            Quantity::Monthly(q) => Some(q),
            Quantity::Hourly(_) => None,
        }
    }
}

/// A mapped resource: its address plus the cost components handed to pricing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    pub resource_type: String,
    pub cost_components: Vec<CostComponent>,
}
