use deepcopy::reflect::{Result, Shape, TypeId, TypeTable};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// List the built-in type table with each type's kind and shape.
pub fn run(args: Args) -> Result<()> {
	let types = TypeTable::new();

	let mut rows = Vec::with_capacity(types.len());
	for (id, desc) in types.iter() {
		rows.push(TypeRow {
			id,
			name: types.type_name(id),
			kind: desc.kind.as_str(),
			shape: Shape::classify(&types, id)?,
			comparable: types.is_comparable(id)?,
			primitive: types.is_primitive(id)?,
		});
	}

	if args.json {
		return emit_json(&TypesJson { types: rows }, false);
	}

	println!("types: {}", rows.len());
	println!("id\tname\tkind\tshape\tcomparable\tprimitive");
	for row in &rows {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}",
			row.id.index(),
			row.name,
			row.kind,
			row.shape.as_str(),
			row.comparable,
			row.primitive
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct TypesJson {
	types: Vec<TypeRow>,
}

#[derive(serde::Serialize)]
struct TypeRow {
	id: TypeId,
	name: String,
	kind: &'static str,
	shape: Shape,
	comparable: bool,
	primitive: bool,
}
