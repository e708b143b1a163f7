//! YAML parsing (YAML text → structured-object dispatcher)

use crate::common::object::ObjectDispatcher;
use crate::error::DispatchError;

/// Parse YAML text into a dispatcher over the same value tree JSON produces.
pub fn parse_yaml(text: &str) -> Result<ObjectDispatcher, DispatchError> {
    let value: serde_json::Value =
        serde_yaml::from_str(text).map_err(|e| DispatchError::Parse(e.to_string()))?;
    Ok(ObjectDispatcher::new(value))
}
