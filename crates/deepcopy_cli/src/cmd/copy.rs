use std::path::PathBuf;

use deepcopy::reflect::{CopyOptions, JsonDocument, MapValue, ReflectError, Result, TypeTable, Value, copy_with, deep_equal, from_json, to_json};
use tracing::info;

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub compact: bool,
}

/// Deep copy a document and print the copy once it is verified.
///
/// The copy must be deep-equal to the source, and its encoding must decode
/// back to a deep-equal value. Numbers are compared by value, so `1.0` in the
/// document may print as `1`. The copy is then emptied in place, and the
/// source must still encode as it did before.
pub fn run(args: Args) -> Result<()> {
	let Args { file, max_depth, compact } = args;

	let doc = JsonDocument::open(&file)?;
	let mut types = TypeTable::new();
	let (json_types, source) = doc.to_value(&mut types)?;
	let copied = copy_with(&types, &source, &CopyOptions { max_depth })?;

	if !deep_equal(&source, &copied) {
		return Err(ReflectError::VerifyFailed {
			reason: "copy is not deep-equal to its source",
		});
	}
	let output = to_json(&types, &copied)?;
	if !deep_equal(&source, &from_json(&json_types, &output)?) {
		return Err(ReflectError::VerifyFailed {
			reason: "copy encodes differently from its source",
		});
	}

	let before = to_json(&types, &source)?;
	let mut node = copied.into_node().ok_or(ReflectError::InvalidValue)?;
	let cleared = scrub(node.value_mut());
	if to_json(&types, &source)? != before {
		return Err(ReflectError::VerifyFailed {
			reason: "source changed when the copy was mutated",
		});
	}

	info!(file = %file.display(), compression = doc.compression.as_str(), cleared, "copy verified");
	emit_json(&output, compact)
}

/// Empty every present slice and map reachable from `value`, returning how many were cleared.
fn scrub(value: &mut Value) -> usize {
	match value {
		Value::Interface(Some(node)) => scrub(node.value_mut()),
		Value::Ptr(Some(ptr)) => ptr.update(scrub),
		Value::Array(items) | Value::Struct(items) => items.iter_mut().map(scrub).sum(),
		Value::Slice(Some(items)) => {
			let nested = items.iter_mut().map(scrub).sum::<usize>();
			items.clear();
			nested + 1
		}
		Value::Map(Some(map)) => {
			let nested = map.iter_mut().map(|(_, item)| scrub(item)).sum::<usize>();
			*map = MapValue::new();
			nested + 1
		}
		_ => 0,
	}
}
