use std::path::PathBuf;

use deepcopy::reflect::{JsonDocument, Kind, Result, Shape, TypeId, TypeTable, Value};

use crate::cmd::util::{emit_json, is_absent, key_segment};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// List every node of a document with its type and shape category.
///
/// Interface boxes are transparent: a filled box is listed as the node it holds.
pub fn run(args: Args) -> Result<()> {
	let Args { file: path, json } = args;

	let doc = JsonDocument::open(&path)?;
	let mut types = TypeTable::new();
	let (_, value) = doc.to_value(&mut types)?;

	let mut rows = Vec::new();
	if let Some(node) = value.node() {
		collect_rows(&types, node.ty(), node.value(), "$".to_owned(), &mut rows)?;
	}

	if json {
		let payload = ShapeJson {
			path: path.display().to_string(),
			compression: doc.compression.as_str(),
			nodes: rows,
		};
		return emit_json(&payload, false);
	}

	println!("path: {}", path.display());
	println!("compression: {}", doc.compression.as_str());
	println!("nodes: {}", rows.len());
	println!("path\ttype\tshape\tabsent");
	for row in &rows {
		println!("{}\t{}\t{}\t{}", row.path, row.type_name, row.shape.as_str(), row.absent);
	}

	Ok(())
}

fn collect_rows(types: &TypeTable, ty: TypeId, value: &Value, path: String, rows: &mut Vec<NodeRow>) -> Result<()> {
	if let Value::Interface(Some(node)) = value {
		return collect_rows(types, node.ty(), node.value(), path, rows);
	}

	rows.push(NodeRow {
		path: path.clone(),
		type_name: types.type_name(ty),
		shape: Shape::classify(types, ty)?,
		absent: is_absent(value),
	});

	match (types.kind(ty)?, value) {
		(Kind::Ptr(elem), Value::Ptr(Some(ptr))) => ptr.with(|target| collect_rows(types, *elem, target, format!("(*{path})"), rows)),
		(Kind::Array { elem, .. }, Value::Array(items)) | (Kind::Slice(elem), Value::Slice(Some(items))) => {
			for (idx, item) in items.iter().enumerate() {
				collect_rows(types, *elem, item, format!("{path}[{idx}]"), rows)?;
			}
			Ok(())
		}
		(Kind::Map { value: elem, .. }, Value::Map(Some(map))) => {
			let mut entries = map.iter().map(|(key, item)| (key_segment(key), item)).collect::<Vec<_>>();
			entries.sort_by(|a, b| a.0.cmp(&b.0));
			for (segment, item) in entries {
				collect_rows(types, *elem, item, format!("{path}{segment}"), rows)?;
			}
			Ok(())
		}
		(Kind::Struct(fields), Value::Struct(items)) => {
			for (field, item) in fields.iter().zip(items) {
				collect_rows(types, field.ty, item, format!("{path}.{}", field.name), rows)?;
			}
			Ok(())
		}
		_ => Ok(()),
	}
}

#[derive(serde::Serialize)]
struct ShapeJson {
	path: String,
	compression: &'static str,
	nodes: Vec<NodeRow>,
}

#[derive(serde::Serialize)]
struct NodeRow {
	path: String,
	#[serde(rename = "type")]
	type_name: String,
	shape: Shape,
	absent: bool,
}
