use thiserror::Error;

/// Result type for cost estimation operations
pub type CostResult<T> = Result<T, CostError>;

/// Errors that can occur while turning resource declarations into cost components
#[derive(Debug, Error)]
pub enum CostError {
    /// A required attribute is absent (or an empty string)
    #[error("{address}: missing required attribute '{path}'")]
    MissingField { address: String, path: String },

    /// An attribute is present but holds the wrong type of value
    #[error("{address}: attribute '{path}' should be {expected}")]
    MalformedValue {
        address: String,
        path: String,
        expected: &'static str,
    },

    /// No mapper is registered for the resource type
    #[error("Unsupported resource type: {0}")]
    UnsupportedResource(String),

    /// The plan document does not have the expected shape
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// The usage file does not have the expected shape
    #[error("Invalid usage file: {0}")]
    InvalidUsage(#[from] serde_yaml::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CostError {
    pub fn missing(address: &str, path: &str) -> Self {
        CostError::MissingField {
            address: address.to_string(),
            path: path.to_string(),
        }
    }

    pub fn malformed(address: &str, path: &str, expected: &'static str) -> Self {
        CostError::MalformedValue {
            address: address.to_string(),
            path: path.to_string(),
            expected,
        }
    }

    /// Whether this error only affects a single resource and the run can continue
    pub fn is_resource_level(&self) -> bool {
        matches!(
            self,
            CostError::MissingField { .. }
                | CostError::MalformedValue { .. }
                | CostError::UnsupportedResource(_)
        )
    }
}
