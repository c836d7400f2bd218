use tracing::{debug, trace};

use crate::reflect::{Any, Field, Kind, MapKey, MapValue, Node, Pointer, ReflectError, Result, Shape, TypeId, TypeTable, Value};

/// Runtime limits for deep copying.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
	/// Maximum recursion depth; `None` recurses as deep as the graph goes.
	pub max_depth: Option<u32>,
}

impl CopyOptions {
	/// Preset that reports [`ReflectError::DepthExceeded`] instead of recursing past `max_depth`.
	pub fn bounded(max_depth: u32) -> Self {
		Self { max_depth: Some(max_depth) }
	}
}

/// Deep copy a value held by a generic handle.
///
/// The result has the same type as the input; nothing reachable through
/// pointers, interface boxes, slices, maps, arrays or records is shared with
/// the source. Scalars, time instants, functions and channels are shared.
/// Unexported record fields are left at their zero value.
///
/// # Panics
///
/// Panics when the handle is nil or the value contains a `uintptr` or
/// `unsafe.Pointer`. Use [`try_copy`] to get those conditions as errors.
pub fn copy(types: &TypeTable, value: &Any) -> Any {
	match try_copy(types, value) {
		Ok(copied) => copied,
		Err(err) => panic!("deepcopy: {err}"),
	}
}

/// Deep copy with default options, reporting abort conditions as errors.
pub fn try_copy(types: &TypeTable, value: &Any) -> Result<Any> {
	copy_with(types, value, &CopyOptions::default())
}

/// Deep copy with explicit options. An error carries no partial result.
pub fn copy_with(types: &TypeTable, value: &Any, opt: &CopyOptions) -> Result<Any> {
	let node = value.node().ok_or(ReflectError::InvalidValue)?;
	copy_node_with(types, node, opt).map(Any::new)
}

/// Deep copy a typed node with default options.
pub fn copy_node(types: &TypeTable, node: &Node) -> Result<Node> {
	copy_node_with(types, node, &CopyOptions::default())
}

fn copy_node_with(types: &TypeTable, node: &Node, opt: &CopyOptions) -> Result<Node> {
	let shape = Shape::classify(types, node.ty())?;
	debug!(type_name = %types.type_name(node.ty()), shape = shape.as_str(), max_depth = ?opt.max_depth, "deep copy start");

	let copier = Copier { types, opt };
	let value = copier.copy_value(node.ty(), node.value(), 0)?;

	debug!(type_name = %types.type_name(node.ty()), shape = shape.as_str(), "deep copy done");
	Ok(Node::from_parts(node.ty(), value))
}

struct Copier<'a> {
	types: &'a TypeTable,
	opt: &'a CopyOptions,
}

impl Copier<'_> {
	fn copy_value(&self, ty: TypeId, value: &Value, depth: u32) -> Result<Value> {
		if let Some(max_depth) = self.opt.max_depth.filter(|max| depth >= *max) {
			return Err(ReflectError::DepthExceeded { max_depth });
		}

		let kind = self.types.kind(ty)?;
		match (Shape::classify(self.types, ty)?, kind, value) {
			(Shape::Primitive | Shape::OpaqueScalar, kind, value) if kind.admits(value) => Ok(value.clone()),
			(Shape::Reference, Kind::Ptr(elem), Value::Ptr(ptr)) => self.copy_pointer(*elem, ptr.as_ref(), depth),
			(Shape::PolymorphicBox, _, Value::Interface(node)) => self.copy_interface(node.as_deref(), depth),
			(Shape::FixedSequence, Kind::Array { elem, len }, Value::Array(items)) => self.copy_array(ty, *elem, *len, items, depth),
			(Shape::GrowableSequence, Kind::Slice(elem), Value::Slice(items)) => self.copy_slice(*elem, items.as_ref(), depth),
			(Shape::AssociativeContainer, Kind::Map { key, value: elem }, Value::Map(map)) => self.copy_map(*key, *elem, map.as_ref(), depth),
			(Shape::CompositeRecord, Kind::Struct(fields), Value::Struct(items)) => self.copy_struct(ty, fields, items, depth),
			(Shape::Unsupported, kind, _) => Err(ReflectError::UnsupportedShape {
				type_name: self.types.type_name(ty),
				kind: kind.as_str(),
			}),
			(_, kind, value) => Err(ReflectError::KindMismatch {
				type_name: self.types.type_name(ty),
				expected: kind.as_str(),
				got: value.kind_str(),
			}),
		}
	}

	fn copy_pointer(&self, elem: TypeId, ptr: Option<&Pointer>, depth: u32) -> Result<Value> {
		let Some(ptr) = ptr else {
			return Ok(Value::Ptr(None));
		};
		let target = ptr.with(|target| self.copy_value(elem, target, depth + 1))?;
		Ok(Value::ptr(target))
	}

	fn copy_interface(&self, node: Option<&Node>, depth: u32) -> Result<Value> {
		let Some(node) = node else {
			return Ok(Value::Interface(None));
		};
		// the boxed value is copied by its own runtime type, not the interface's
		let inner = self.copy_value(node.ty(), node.value(), depth + 1)?;
		Ok(Value::boxed(Node::from_parts(node.ty(), inner)))
	}

	fn copy_array(&self, ty: TypeId, elem: TypeId, len: usize, items: &[Value], depth: u32) -> Result<Value> {
		if items.len() != len {
			return Err(ReflectError::ArrayLenMismatch {
				type_name: self.types.type_name(ty),
				expected: len,
				got: items.len(),
			});
		}

		let mut out = Vec::with_capacity(len);
		for item in items {
			out.push(self.copy_value(elem, item, depth + 1)?);
		}
		Ok(Value::Array(out))
	}

	fn copy_slice(&self, elem: TypeId, items: Option<&Vec<Value>>, depth: u32) -> Result<Value> {
		let Some(items) = items else {
			return Ok(Value::Slice(None));
		};

		let mut out = Vec::with_capacity(items.capacity());
		for item in items {
			out.push(self.copy_value(elem, item, depth + 1)?);
		}
		Ok(Value::Slice(Some(out)))
	}

	fn copy_map(&self, key_ty: TypeId, value_ty: TypeId, map: Option<&MapValue>, depth: u32) -> Result<Value> {
		let Some(map) = map else {
			return Ok(Value::Map(None));
		};

		let mut out = MapValue::with_capacity(map.len());
		for (key, value) in map.iter() {
			let key = MapKey::new(self.copy_value(key_ty, key, depth + 1)?)?;
			let value = self.copy_value(value_ty, value, depth + 1)?;
			out.insert_key(key, value);
		}
		Ok(Value::Map(Some(out)))
	}

	fn copy_struct(&self, ty: TypeId, fields: &[Field], items: &[Value], depth: u32) -> Result<Value> {
		if items.len() != fields.len() {
			return Err(ReflectError::FieldCountMismatch {
				type_name: self.types.type_name(ty),
				expected: fields.len(),
				got: items.len(),
			});
		}

		let mut out = fields.iter().map(|field| self.types.zero(field.ty)).collect::<Result<Vec<_>>>()?;
		for (slot, (field, item)) in out.iter_mut().zip(fields.iter().zip(items)) {
			if !field.exported {
				trace!(record = %self.types.type_name(ty), field = %field.name, "unexported field left zero");
				continue;
			}
			if item.is_zero() {
				continue;
			}
			*slot = self.copy_value(field.ty, item, depth + 1)?;
		}
		Ok(Value::Struct(out))
	}
}
