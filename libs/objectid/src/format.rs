//! Schema-layer boundary.
//!
//! Validators that describe untrusted JSON treat ObjectId as an opaque
//! string format. This module is the whole surface they need.

use serde_json::Value;

use crate::object_id::ObjectId;

/// Name under which the ObjectId string format is registered.
pub const FORMAT_NAME: &str = "objectId";

/// Returns true if `value` is a JSON string holding a valid ObjectId.
pub fn is_object_id_value(value: &Value) -> bool {
    value.as_str().is_some_and(ObjectId::is_valid_str)
}
