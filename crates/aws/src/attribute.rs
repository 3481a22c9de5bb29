//! Conversion between JSON values and `DynamoDB` attribute values.
//!
//! Encoding follows the document-client conventions: `null` → `NULL`,
//! booleans → `BOOL`, numbers → `N`, strings → `S`, arrays → `L` and
//! objects → `M`. Binary attributes are not produced and are rejected on read.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::error::AwsError;

/// A `DynamoDB` item.
pub type Item = HashMap<String, AttributeValue>;

/// Encode a JSON value as an attribute value.
pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), to_attribute(v)))
                .collect(),
        ),
    }
}

/// Decode an attribute value back into JSON.
pub fn from_attribute(attr: &AttributeValue) -> Result<Value, AwsError> {
    Ok(match attr {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(from_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
                .collect::<Result<Map<_, _>, AwsError>>()?,
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => {
            return Err(AwsError::InvalidItem(format!(
                "unsupported attribute type: {other:?}"
            )));
        }
    })
}

fn parse_number(raw: &str) -> Result<Number, AwsError> {
    serde_json::from_str(raw).map_err(|e| AwsError::InvalidItem(format!("invalid number '{raw}': {e}")))
}

/// Encode a serialisable struct as an item. It must serialise to a JSON object.
pub fn to_item<T: Serialize>(value: &T) -> Result<Item, AwsError> {
    match serde_json::to_value(value).map_err(|e| AwsError::InvalidItem(e.to_string()))? {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), to_attribute(v))).collect()),
        other => Err(AwsError::InvalidItem(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Decode an item into a deserialisable struct.
pub fn from_item<T: DeserializeOwned>(item: &Item) -> Result<T, AwsError> {
    let map = item
        .iter()
        .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
        .collect::<Result<Map<_, _>, AwsError>>()?;
    serde_json::from_value(Value::Object(map)).map_err(|e| AwsError::InvalidItem(e.to_string()))
}
