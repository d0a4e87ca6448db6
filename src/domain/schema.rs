use std::sync::LazyLock;

use jsonschema::Validator;
use schemars::schema_for;
use serde_json::Value;

use super::ListItem;

static LIST_VALIDATOR: LazyLock<Result<Validator, String>> = LazyLock::new(|| {
    jsonschema::validator_for(&list_schema()).map_err(|err| err.to_string())
});

/// JSON Schema of a persisted repeater field (an array of [`ListItem`]).
pub fn list_schema() -> Value {
    let schema = schema_for!(Vec<ListItem>);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

/// Check a raw field value against [`list_schema`].
///
/// Returns one message per violation, prefixed with the offending instance
/// path (`<root>` for the value itself).
pub fn check_list_document(value: &Value) -> Result<(), Vec<String>> {
    let validator = LIST_VALIDATOR.as_ref().map_err(|err| vec![err.clone()])?;
    let issues = validator
        .iter_errors(value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect::<Vec<_>>();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
