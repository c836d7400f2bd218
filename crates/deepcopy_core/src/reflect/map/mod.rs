use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::reflect::{ChanHandle, Pointer, ReflectError, Result, Value};

/// Map key with Go comparison semantics.
///
/// Pointers and channels compare by identity, arrays and records field by
/// field, interface boxes by concrete type and value, floats by value with
/// `-0.0 == 0.0`. Slices, maps and functions are rejected at construction.
#[derive(Debug, Clone)]
pub struct MapKey(Value);

impl MapKey {
	/// Wrap a comparable value.
	pub fn new(value: Value) -> Result<Self> {
		ensure_comparable(&value)?;
		Ok(Self(value))
	}

	/// Key payload.
	pub fn value(&self) -> &Value {
		&self.0
	}
}

impl PartialEq for MapKey {
	fn eq(&self, other: &Self) -> bool {
		key_eq(&self.0, &other.0)
	}
}

impl Eq for MapKey {}

impl Hash for MapKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		key_hash(&self.0, state);
	}
}

/// Entries of a present map.
#[derive(Debug, Clone, Default)]
pub struct MapValue {
	entries: HashMap<MapKey, Value>,
}

impl MapValue {
	/// Empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty map with room for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: HashMap::with_capacity(capacity),
		}
	}

	/// Insert an entry, returning the replaced value.
	pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
		Ok(self.insert_key(MapKey::new(key)?, value))
	}

	/// Insert an entry under an already validated key.
	pub fn insert_key(&mut self, key: MapKey, value: Value) -> Option<Value> {
		self.entries.insert(key, value)
	}

	/// Look up a value by key.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries.get(&MapKey(key.clone()))
	}

	/// Mutably look up a value by key.
	pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
		self.entries.get_mut(&MapKey(key.clone()))
	}

	/// Remove an entry by key.
	pub fn remove(&mut self, key: &Value) -> Option<Value> {
		self.entries.remove(&MapKey(key.clone()))
	}

	/// Entry count.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
		self.entries.iter().map(|(key, value)| (&key.0, value))
	}

	/// Iterate entries with mutable values in unspecified order.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Value, &mut Value)> {
		self.entries.iter_mut().map(|(key, value)| (&key.0, value))
	}
}

fn ensure_comparable(value: &Value) -> Result<()> {
	match value {
		Value::Slice(_) | Value::Map(_) | Value::Func(_) => Err(ReflectError::NotComparable {
			type_name: value.kind_str().to_owned(),
		}),
		Value::Interface(Some(node)) => ensure_comparable(node.value()),
		Value::Array(items) | Value::Struct(items) => items.iter().try_for_each(ensure_comparable),
		_ => Ok(()),
	}
}

fn key_eq(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Bool(x), Value::Bool(y)) => x == y,
		(Value::I64(x), Value::I64(y)) => x == y,
		(Value::U64(x), Value::U64(y)) => x == y,
		(Value::F32(x), Value::F32(y)) => f32_bits(*x) == f32_bits(*y),
		(Value::F64(x), Value::F64(y)) => f64_bits(*x) == f64_bits(*y),
		(Value::Complex(xr, xi), Value::Complex(yr, yi)) => f64_bits(*xr) == f64_bits(*yr) && f64_bits(*xi) == f64_bits(*yi),
		(Value::String(x), Value::String(y)) => x == y,
		(Value::Addr(x), Value::Addr(y)) => x == y,
		(Value::Time(x), Value::Time(y)) => x == y,
		(Value::Chan(x), Value::Chan(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => x.same(y),
			_ => false,
		},
		(Value::Ptr(x), Value::Ptr(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => x.same(y),
			_ => false,
		},
		(Value::Interface(x), Value::Interface(y)) => match (x, y) {
			(None, None) => true,
			(Some(x), Some(y)) => x.ty() == y.ty() && key_eq(x.value(), y.value()),
			_ => false,
		},
		(Value::Array(x), Value::Array(y)) | (Value::Struct(x), Value::Struct(y)) => {
			x.len() == y.len() && x.iter().zip(y).all(|(x, y)| key_eq(x, y))
		}
		_ => false,
	}
}

fn key_hash<H: Hasher>(value: &Value, state: &mut H) {
	std::mem::discriminant(value).hash(state);
	match value {
		Value::Bool(value) => value.hash(state),
		Value::I64(value) => value.hash(state),
		Value::U64(value) => value.hash(state),
		Value::F32(value) => f32_bits(*value).hash(state),
		Value::F64(value) => f64_bits(*value).hash(state),
		Value::Complex(re, im) => {
			f64_bits(*re).hash(state);
			f64_bits(*im).hash(state);
		}
		Value::String(value) => value.hash(state),
		Value::Addr(value) => value.hash(state),
		Value::Time(value) => value.hash(state),
		Value::Chan(value) => value.as_ref().map(ChanHandle::addr).hash(state),
		Value::Ptr(value) => value.as_ref().map(Pointer::addr).hash(state),
		Value::Interface(Some(node)) => {
			node.ty().hash(state);
			key_hash(node.value(), state);
		}
		Value::Array(items) | Value::Struct(items) => {
			items.len().hash(state);
			for item in items {
				key_hash(item, state);
			}
		}
		Value::Interface(None) | Value::Func(_) | Value::Slice(_) | Value::Map(_) => {}
	}
}

fn f32_bits(value: f32) -> u32 {
	if value == 0.0 { 0 } else { value.to_bits() }
}

fn f64_bits(value: f64) -> u64 {
	if value == 0.0 { 0 } else { value.to_bits() }
}

#[cfg(test)]
mod tests;
