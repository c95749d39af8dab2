//! Usage overrides for resources whose cost depends on runtime behaviour.
//!
//! Usage files are YAML:
//!
//! ```yaml
//! version: 0.1
//! resource_usage:
//!   aws_elasticsearch_domain.logs:
//!     monthly_snapshot_gb: 50
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::CostResult;

/// Usage values declared for a single resource
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct UsageData {
    values: Map<String, Value>,
}

impl UsageData {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parsed usage file, keyed by resource address
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageFile {
    /// Written as either `0.1` or `"0.1"`
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub resource_usage: HashMap<String, UsageData>,
}

impl UsageFile {
    pub fn from_yaml(contents: &str) -> CostResult<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn version(&self) -> Option<String> {
        match self.version.as_ref()? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn for_resource(&self, address: &str) -> Option<&UsageData> {
        self.resource_usage.get(address)
    }

    pub fn len(&self) -> usize {
        self.resource_usage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_usage.is_empty()
    }
}
