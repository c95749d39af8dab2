//! Read-only view over a declared resource's attribute tree.
//!
//! Attributes are addressed by dotted paths where numeric segments index into
//! arrays (`cluster_config.0.instance_type`). JSON `null` is treated the same
//! as an absent attribute, since plans render unset optional arguments as null.

use serde_json::Value;

use crate::error::{CostError, CostResult};

/// A single resource declaration as handed to a resource mapper
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceData {
    /// Resource address, e.g. `module.search.aws_elasticsearch_domain.logs`
    pub address: String,
    /// Resource type, e.g. `aws_elasticsearch_domain`
    pub resource_type: String,
    values: Value,
}

impl ResourceData {
    pub fn new(address: impl Into<String>, resource_type: impl Into<String>, values: Value) -> Self {
        Self {
            address: address.into(),
            resource_type: resource_type.into(),
            values,
        }
    }

    pub fn values(&self) -> &Value {
        &self.values
    }

    /// Set a top-level attribute. No-op if the values are not an object.
    pub fn set(&mut self, key: &str, value: Value) {
        if let Value::Object(map) = &mut self.values {
            map.insert(key.to_string(), value);
        }
    }

    pub fn get(&self, path: &str) -> Attribute<'_> {
        Attribute {
            address: &self.address,
            path: path.to_string(),
            value: lookup(&self.values, path),
        }
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

/// Attribute at a path, remembering where it came from for error reporting
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    address: &'a str,
    path: String,
    value: Option<&'a Value>,
}

impl<'a> Attribute<'a> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// Navigate to a nested attribute
    pub fn get(&self, path: &str) -> Attribute<'a> {
        Attribute {
            address: self.address,
            path: format!("{}.{}", self.path, path),
            value: self.value.and_then(|v| lookup(v, path)),
        }
    }

    /// Elements of an array-of-subtree attribute. Absent means empty.
    pub fn array(&self) -> CostResult<Vec<Attribute<'a>>> {
        match self.value {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, item)| Attribute {
                    address: self.address,
                    path: format!("{}.{}", self.path, i),
                    value: if item.is_null() { None } else { Some(item) },
                })
                .collect()),
            Some(_) => Err(self.malformed("a list of blocks")),
        }
    }

    /// A singleton nested block, written either as a one-element list or as an object.
    /// Returns `None` when the block is absent or the list is empty.
    pub fn block(&self) -> CostResult<Option<Attribute<'a>>> {
        match self.value {
            Some(Value::Object(_)) => Ok(Some(self.clone())),
            _ => Ok(self.array()?.into_iter().next().filter(Attribute::exists)),
        }
    }

    pub fn as_str(&self) -> CostResult<Option<&'a str>> {
        match self.value {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.malformed("a string")),
        }
    }

    /// Integer value; whole floats and numeric strings are accepted
    pub fn as_i64(&self) -> CostResult<Option<i64>> {
        match self.value {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Some(i)),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| Some(f as i64))
                    .ok_or_else(|| self.malformed("an integer")),
            },
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| self.malformed("an integer")),
            Some(_) => Err(self.malformed("an integer")),
        }
    }

    /// Numeric value; numeric strings are accepted
    pub fn as_f64(&self) -> CostResult<Option<f64>> {
        match self.value {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| self.malformed("a number")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Some)
                .ok_or_else(|| self.malformed("a number")),
            Some(_) => Err(self.malformed("a number")),
        }
    }

    pub fn as_bool(&self) -> CostResult<Option<bool>> {
        match self.value {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) if s == "true" || s == "false" => Ok(Some(s == "true")),
            Some(_) => Err(self.malformed("a boolean")),
        }
    }

    /// Non-empty string, or a missing-field error
    pub fn required_str(&self) -> CostResult<&'a str> {
        match self.as_str()? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(self.missing()),
        }
    }

    pub fn required_i64(&self) -> CostResult<i64> {
        self.as_i64()?.ok_or_else(|| self.missing())
    }

    pub fn bool_or(&self, default: bool) -> CostResult<bool> {
        Ok(self.as_bool()?.unwrap_or(default))
    }

    pub fn missing(&self) -> CostError {
        CostError::missing(self.address, &self.path)
    }

    pub fn malformed(&self, expected: &'static str) -> CostError {
        CostError::malformed(self.address, &self.path, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> ResourceData {
        ResourceData::new(
            "aws_elasticsearch_domain.example",
            "aws_elasticsearch_domain",
            json!({
                "region": "eu-west-1",
                "domain_name": null,
                "cluster_config": [{
                    "instance_type": "r5.large.elasticsearch",
                    "instance_count": 3,
                    "warm_count": "2",
                    "dedicated_master_enabled": true
                }],
                "ebs_options": [],
                "encrypt_at_rest": {"enabled": false}
            }),
        )
    }

    #[test]
    fn test_dotted_and_indexed_paths() {
        let data = data();
        assert_eq!(data.get("region").as_str().unwrap(), Some("eu-west-1"));
        assert_eq!(
            data.get("cluster_config.0.instance_type").required_str().unwrap(),
            "r5.large.elasticsearch"
        );
        assert_eq!(data.get("cluster_config.0.instance_count").required_i64().unwrap(), 3);
        assert!(!data.get("cluster_config.1.instance_type").exists());
    }

    #[test]
    fn test_null_is_absent() {
        let data = data();
        assert!(!data.get("domain_name").exists());
        assert_eq!(data.get("domain_name").as_str().unwrap(), None);
    }

    #[test]
    fn test_block_access() {
        let data = data();
        let cluster = data.get("cluster_config").block().unwrap().unwrap();
        assert_eq!(cluster.path(), "cluster_config.0");
        assert!(cluster.get("dedicated_master_enabled").bool_or(false).unwrap());
        assert_eq!(cluster.get("warm_count").as_i64().unwrap(), Some(2));

        assert!(data.get("ebs_options").block().unwrap().is_none());
        assert!(data.get("snapshot_options").block().unwrap().is_none());

        let encrypt = data.get("encrypt_at_rest").block().unwrap().unwrap();
        assert!(!encrypt.get("enabled").bool_or(true).unwrap());
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let data = data();
        let err = data.get("cluster_config.0.instance_type").as_i64().unwrap_err();
        match err {
            CostError::MalformedValue { path, expected, .. } => {
                assert_eq!(path, "cluster_config.0.instance_type");
                assert_eq!(expected, "an integer");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            data.get("region").block(),
            Err(CostError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_required_empty_string_is_missing() {
        let data = ResourceData::new("a.b", "a", json!({"region": ""}));
        assert!(matches!(
            data.get("region").required_str(),
            Err(CostError::MissingField { .. })
        ));
    }

    #[test]
    fn test_set_injects_top_level_value() {
        let mut data = ResourceData::new("a.b", "a", json!({}));
        data.set("region", json!("us-west-2"));
        assert_eq!(data.get("region").required_str().unwrap(), "us-west-2");
    }
}
