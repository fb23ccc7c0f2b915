//! Argument normalization.
//!
//! Tool arguments arrive as loosely-shaped JSON from LLM clients. This pass
//! rewrites them into the canonical shape the handlers deserialize, driven
//! entirely by the [`Parameter`](crate::catalog::Parameter) table of the
//! called tool: alias keys are folded into their canonical names, coordinate
//! objects are collapsed to `"longitude;latitude"` strings, defaults are
//! filled in, and required/range/enum/datetime checks run before any
//! upstream request is made.

use crate::catalog::{ParamType, Parameter, ToolDefinition};
use crate::error::{Result, TransitError};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Datetime layout accepted by the timetable API (`20240101T143000`).
pub const DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A location argument: either already a `"longitude;latitude"` string (or a
/// place id, or free text), or an object with coordinate members.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Text(String),
    Object {
        #[serde(alias = "lng")]
        longitude: f64,
        #[serde(alias = "lat")]
        latitude: f64,
    },
}

impl CoordinateInput {
    /// Canonical query form understood by the journey planner.
    pub fn into_query(self) -> String {
        match self {
            CoordinateInput::Text(text) => text,
            CoordinateInput::Object {
                longitude,
                latitude,
            } => format!("{longitude};{latitude}"),
        }
    }
}

/// Normalizes raw `tools/call` arguments against a tool definition.
///
/// Returns the canonical argument object handlers deserialize from. All
/// failures are tool-tier errors; nothing here touches the network.
pub fn normalize(tool: &ToolDefinition, arguments: Option<Value>) -> Result<Map<String, Value>> {
    let mut args = match arguments {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(TransitError::invalid_argument(format!(
                "arguments must be an object, got {}",
                type_name(&other)
            )))
        }
    };

    for param in &tool.parameters {
        resolve_aliases(&mut args, param);
        if param.coordinate {
            coerce_coordinate(&mut args, param)?;
        }
    }

    for param in &tool.parameters {
        apply_default(&mut args, param);
    }

    for param in &tool.parameters {
        check_required(&args, param)?;
        if let Some(value) = present(&args, param.name) {
            check_range(value, param)?;
            check_allowed(value, param)?;
            check_datetime(value, param)?;
        }
    }

    Ok(args)
}

/// Copies the first non-null alias value into the canonical key, then drops
/// every alias key. An explicit canonical value always wins over aliases.
fn resolve_aliases(args: &mut Map<String, Value>, param: &Parameter) {
    for alias in param.aliases {
        let canonical_set = matches!(args.get(param.name), Some(v) if !v.is_null());
        let alias_value = args.remove(*alias);
        if !canonical_set {
            if let Some(value) = alias_value {
                if !value.is_null() {
                    args.insert(param.name.to_string(), value);
                }
            }
        }
    }
}

/// Collapses `{longitude, latitude}` objects (and their `lng`/`lat`
/// spellings) into the `"longitude;latitude"` string form. Strings pass
/// through untouched; they may be place ids or free-text addresses.
fn coerce_coordinate(args: &mut Map<String, Value>, param: &Parameter) -> Result<()> {
    let Some(value) = args.get(param.name) else {
        return Ok(());
    };
    if value.is_null() {
        return Ok(());
    }
    let input: CoordinateInput = serde_json::from_value(value.clone()).map_err(|_| {
        TransitError::invalid_argument(format!(
            "{} must be a string or an object with longitude/latitude",
            param.name
        ))
    })?;
    args.insert(param.name.to_string(), Value::String(input.into_query()));
    Ok(())
}

/// Fills the declared default when the key is absent or null. Explicit
/// falsy values (0, "", false) are caller intent and survive.
fn apply_default(args: &mut Map<String, Value>, param: &Parameter) {
    let Some(default) = &param.default else {
        return;
    };
    let missing = match args.get(param.name) {
        None => true,
        Some(Value::Null) => true,
        Some(_) => false,
    };
    if missing {
        args.insert(param.name.to_string(), default.clone());
    }
}

fn check_required(args: &Map<String, Value>, param: &Parameter) -> Result<()> {
    if param.required && present(args, param.name).is_none() {
        return Err(TransitError::MissingArgument(param.name.to_string()));
    }
    Ok(())
}

fn check_range(value: &Value, param: &Parameter) -> Result<()> {
    let Some(range) = param.range else {
        return Ok(());
    };
    match value.as_f64() {
        Some(n) if n >= range.min && n <= range.max => Ok(()),
        _ => Err(TransitError::invalid_argument(range.message)),
    }
}

fn check_allowed(value: &Value, param: &Parameter) -> Result<()> {
    let Some(allowed) = param.allowed else {
        return Ok(());
    };
    match (param.kind, value) {
        (ParamType::StringArray, Value::Array(entries)) => {
            for entry in entries {
                let text = entry.as_str().ok_or_else(|| {
                    TransitError::invalid_argument(format!(
                        "{} must be an array of strings",
                        param.name
                    ))
                })?;
                check_one_allowed(text, allowed, param.name)?;
            }
            Ok(())
        }
        (ParamType::StringArray, _) => Err(TransitError::invalid_argument(format!(
            "{} must be an array of strings",
            param.name
        ))),
        (_, Value::String(text)) => check_one_allowed(text, allowed, param.name),
        _ => Err(TransitError::invalid_argument(format!(
            "Invalid value for {}: expected one of {}",
            param.name,
            allowed.join(", ")
        ))),
    }
}

fn check_one_allowed(value: &str, allowed: &[&str], name: &str) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(TransitError::invalid_argument(format!(
            "Invalid value for {name}: '{value}'. Valid values: {}",
            allowed.join(", ")
        )))
    }
}

fn check_datetime(value: &Value, param: &Parameter) -> Result<()> {
    if !param.datetime {
        return Ok(());
    }
    let text = value.as_str().ok_or_else(|| {
        TransitError::invalid_argument(format!("{} must be a string", param.name))
    })?;
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).map_err(|_| {
        TransitError::invalid_argument(format!(
            "Invalid datetime format: '{text}'. Expected YYYYMMDDTHHMMSS (e.g. 20240101T143000)"
        ))
    })?;
    Ok(())
}

fn present<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
