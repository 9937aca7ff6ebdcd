//! Schema-driven argument validation.
//!
//! A tool's parameter struct derives `JsonSchema`; the generated schema is
//! compiled once into a [`jsonschema::Validator`] when the tool is
//! registered. A call's raw arguments are checked against it (collecting every
//! violation, not only the first) and then deserialized into the typed struct.
//! Unknown keys are dropped by serde during that second step. Top-level keys
//! set to `null` are treated as absent before validation.

use jsonschema::{Draft, Validator, error::ValidationErrorKind};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{FieldViolation, ToolError};

/// Compiled validator for one tool's parameter schema.
pub struct ParamValidator {
    validator: Validator,
}

impl std::fmt::Debug for ParamValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamValidator").finish_non_exhaustive()
    }
}

impl ParamValidator {
    /// Compile a JSON schema (as produced by `schemars`).
    pub fn compile(schema: &Value) -> Result<Self, ToolError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| ToolError::internal(format!("invalid parameter schema: {}", e)))?;
        Ok(Self { validator })
    }

    /// Check raw arguments, returning every violation found.
    pub fn check(&self, arguments: &Value) -> Result<(), ToolError> {
        let violations: Vec<FieldViolation> = self
            .validator
            .iter_errors(arguments)
            .map(|err| {
                let field = match &err.kind {
                    ValidationErrorKind::Required { property } => match property.as_str() {
                        Some(name) => join_field(&err.instance_path.to_string(), name),
                        None => property.to_string(),
                    },
                    _ => pointer_to_field(&err.instance_path.to_string()),
                };
                let message = match &err.kind {
                    ValidationErrorKind::Required { .. } => "is required".to_string(),
                    _ => err.to_string(),
                };
                FieldViolation::new(field, message)
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ToolError::Validation(violations))
        }
    }

    /// Validate and parse arguments into a typed parameter struct.
    pub fn parse<P: DeserializeOwned>(&self, arguments: Value) -> Result<P, ToolError> {
        let arguments = drop_null_keys(arguments);
        self.check(&arguments)?;
        serde_json::from_value(arguments).map_err(|e| ToolError::invalid_field("", e.to_string()))
    }
}

/// Remove top-level keys whose value is `null`.
fn drop_null_keys(arguments: Value) -> Value {
    match arguments {
        Value::Object(mut map) => {
            map.retain(|_, value| !value.is_null());
            Value::Object(map)
        }
        other => other,
    }
}

/// Turn a JSON pointer (`/projects/0/role`) into a dotted path (`projects.0.role`).
fn pointer_to_field(pointer: &str) -> String {
    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

fn join_field(parent_pointer: &str, name: &str) -> String {
    let parent = pointer_to_field(parent_pointer);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
