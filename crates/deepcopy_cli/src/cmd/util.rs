use deepcopy::reflect::{Result, Value};
use serde::Serialize;

/// Print a JSON payload to stdout, pretty unless `compact`.
pub(crate) fn emit_json<T: Serialize>(payload: &T, compact: bool) -> Result<()> {
	let text = if compact {
		serde_json::to_string(payload)?
	} else {
		serde_json::to_string_pretty(payload)?
	};
	println!("{text}");
	Ok(())
}

/// Render a map key as a path segment: `.name` for text keys, `[key]` otherwise.
pub(crate) fn key_segment(key: &Value) -> String {
	match key {
		Value::String(text) => format!(".{text}"),
		Value::I64(value) => format!("[{value}]"),
		Value::U64(value) => format!("[{value}]"),
		Value::Bool(value) => format!("[{value}]"),
		other => format!("[<{}>]", other.kind_str()),
	}
}

/// Whether a value is the absent state of its shape.
pub(crate) fn is_absent(value: &Value) -> bool {
	matches!(value, Value::Ptr(None) | Value::Interface(None) | Value::Slice(None) | Value::Map(None))
}
