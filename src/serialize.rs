//! [`Node`] → YAML serialization.

use crate::error::SerializeError;
use crate::types::Node;

/// Serialize a validation tree to YAML in the format read by
/// [`parse`](crate::parse::parse).
pub fn serialize(node: &Node) -> Result<String, SerializeError> {
    let value = serde_json::to_value(node).map_err(|e| SerializeError {
        message: format!("failed to convert validation tree to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}
