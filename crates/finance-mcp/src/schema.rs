//! JSON Schema helpers for tool input definitions

use serde_json::{Map, Value, json};

/// Create a JSON Schema object type
///
/// # Arguments
///
/// * `properties` - Map of property names to their schemas
/// * `required` - List of required property names
///
/// # Example
///
/// ```
/// use finance_mcp::schema::{object, string};
/// use serde_json::json;
///
/// let schema = object(
///     json!({ "ticker": string(Some("Stock ticker symbol")) }),
///     &["ticker"],
/// );
/// assert_eq!(schema["required"][0], "ticker");
/// ```
pub fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Schema for a tool that takes no arguments
pub fn empty_object() -> Value {
    json!({
        "type": "object",
        "properties": {},
    })
}

/// Create a JSON Schema string type
pub fn string(description: Option<&str>) -> Value {
    if let Some(d) = description {
        json!({
            "type": "string",
            "description": d,
        })
    } else {
        json!({"type": "string"})
    }
}

/// Check that a value has the JSON type named by `schema["type"]`
///
/// Schemas without a type constraint accept anything.
pub fn validate_basic(value: &Value, schema: &Value) -> bool {
    let schema_type = match schema.get("type") {
        Some(Value::String(t)) => t.as_str(),
        _ => return true,
    };

    match schema_type {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

/// Validate tool arguments against an object schema
///
/// Checks that every required property is present and that each supplied
/// property declared in the schema has the right JSON type. Returns the
/// first problem found.
pub fn validate_arguments(arguments: &Value, schema: &Value) -> Result<(), String> {
    let empty = Map::new();
    let args = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => return Err(format!("arguments must be an object, got {other}")),
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if args.get(name).is_none_or(Value::is_null) {
                return Err(format!("missing required argument '{name}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, value) in args {
            if let Some(prop_schema) = properties.get(name) {
                if !validate_basic(value, prop_schema) {
                    let expected = prop_schema
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or("value");
                    return Err(format!("argument '{name}' must be a {expected}"));
                }
            }
        }
    }

    Ok(())
}
