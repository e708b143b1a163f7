//! JSON parsing (JSON text → structured-object dispatcher)

use crate::common::object::ObjectDispatcher;
use crate::error::DispatchError;

/// Parse JSON text into a dispatcher over its value tree.
pub fn parse_json(text: &str) -> Result<ObjectDispatcher, DispatchError> {
    let value = serde_json::from_str(text).map_err(|e| DispatchError::Parse(e.to_string()))?;
    Ok(ObjectDispatcher::new(value))
}
