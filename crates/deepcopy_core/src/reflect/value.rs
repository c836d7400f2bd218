use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::reflect::{ChanHandle, FuncHandle, MapValue, Node};

/// Dynamic value tree interpreted against a [`crate::reflect::TypeTable`] entry.
///
/// `Clone` behaves like assignment: pointer cells and handles stay shared, so a
/// clone is a shallow copy. Use [`crate::reflect::copy`] for an independent one.
#[derive(Debug, Clone)]
pub enum Value {
	/// Boolean.
	Bool(bool),
	/// Any signed integer kind.
	I64(i64),
	/// Any unsigned integer kind.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// Complex number as `(re, im)`.
	Complex(f64, f64),
	/// Immutable text.
	String(Arc<str>),
	/// Raw address payload of `uintptr` and `unsafe.Pointer`.
	Addr(usize),
	/// Instant in time.
	Time(DateTime<Utc>),
	/// Function value; `None` is the nil function.
	Func(Option<FuncHandle>),
	/// Channel handle; `None` is the nil channel.
	Chan(Option<ChanHandle>),
	/// Pointer; `None` is the nil pointer.
	Ptr(Option<Pointer>),
	/// Interface box holding a concrete typed node; `None` is the empty box.
	Interface(Option<Box<Node>>),
	/// Fixed-length array.
	Array(Vec<Value>),
	/// Growable sequence; `None` is the absent (nil) slice.
	Slice(Option<Vec<Value>>),
	/// Associative container; `None` is the absent (nil) map.
	Map(Option<MapValue>),
	/// Record fields in declaration order.
	Struct(Vec<Value>),
}

impl Value {
	/// String value.
	pub fn string(text: &str) -> Self {
		Self::String(Arc::from(text))
	}

	/// Non-nil pointer to a fresh cell holding `value`.
	pub fn ptr(value: Value) -> Self {
		Self::Ptr(Some(Pointer::new(value)))
	}

	/// Interface box holding `node`.
	pub fn boxed(node: Node) -> Self {
		Self::Interface(Some(Box::new(node)))
	}

	/// Present slice holding `items`.
	pub fn slice(items: Vec<Value>) -> Self {
		Self::Slice(Some(items))
	}

	/// Present map holding `map`.
	pub fn map(map: MapValue) -> Self {
		Self::Map(Some(map))
	}

	/// Stable lowercase label of the variant.
	pub fn kind_str(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::I64(_) => "int",
			Self::U64(_) => "uint",
			Self::F32(_) => "float32",
			Self::F64(_) => "float64",
			Self::Complex(_, _) => "complex",
			Self::String(_) => "string",
			Self::Addr(_) => "addr",
			Self::Time(_) => "time",
			Self::Func(_) => "func",
			Self::Chan(_) => "chan",
			Self::Ptr(_) => "ptr",
			Self::Interface(_) => "interface",
			Self::Array(_) => "array",
			Self::Slice(_) => "slice",
			Self::Map(_) => "map",
			Self::Struct(_) => "struct",
		}
	}

	/// Whether the value equals the zero value of its type.
	///
	/// Floats are zero only when their bit pattern is zero, so `-0.0` is not.
	/// A present-but-empty slice or map is not zero.
	pub fn is_zero(&self) -> bool {
		match self {
			Self::Bool(value) => !value,
			Self::I64(value) => *value == 0,
			Self::U64(value) => *value == 0,
			Self::F32(value) => value.to_bits() == 0,
			Self::F64(value) => value.to_bits() == 0,
			Self::Complex(re, im) => re.to_bits() == 0 && im.to_bits() == 0,
			Self::String(value) => value.is_empty(),
			Self::Addr(value) => *value == 0,
			Self::Time(value) => *value == DateTime::<Utc>::default(),
			Self::Func(value) => value.is_none(),
			Self::Chan(value) => value.is_none(),
			Self::Ptr(value) => value.is_none(),
			Self::Interface(value) => value.is_none(),
			Self::Slice(value) => value.is_none(),
			Self::Map(value) => value.is_none(),
			Self::Array(items) | Self::Struct(items) => items.iter().all(Value::is_zero),
		}
	}

	/// Pointer cell if this is a non-nil pointer.
	pub fn as_ptr(&self) -> Option<&Pointer> {
		match self {
			Self::Ptr(Some(ptr)) => Some(ptr),
			_ => None,
		}
	}

	/// Boxed node if this is a non-empty interface.
	pub fn as_boxed(&self) -> Option<&Node> {
		match self {
			Self::Interface(Some(node)) => Some(node.as_ref()),
			_ => None,
		}
	}

	/// Text if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text.as_ref()),
			_ => None,
		}
	}

	/// Elements of an array, a record, or a present slice.
	pub fn items(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) | Self::Struct(items) | Self::Slice(Some(items)) => Some(items.as_slice()),
			_ => None,
		}
	}

	/// Mutable elements of an array, a record, or a present slice.
	pub fn items_mut(&mut self) -> Option<&mut Vec<Value>> {
		match self {
			Self::Array(items) | Self::Struct(items) | Self::Slice(Some(items)) => Some(items),
			_ => None,
		}
	}

	/// Entries of a present map.
	pub fn as_map(&self) -> Option<&MapValue> {
		match self {
			Self::Map(Some(map)) => Some(map),
			_ => None,
		}
	}

	/// Mutable entries of a present map.
	pub fn as_map_mut(&mut self) -> Option<&mut MapValue> {
		match self {
			Self::Map(Some(map)) => Some(map),
			_ => None,
		}
	}
}

/// Shared mutable storage cell addressed by [`Value::Ptr`].
///
/// Cloning the pointer aliases the cell; identity is the cell address.
#[derive(Clone)]
pub struct Pointer(Arc<RwLock<Value>>);

impl Pointer {
	/// Allocate a new cell.
	pub fn new(value: Value) -> Self {
		Self(Arc::new(RwLock::new(value)))
	}

	/// Shallow clone of the pointee.
	pub fn load(&self) -> Value {
		self.with(Value::clone)
	}

	/// Replace the pointee.
	pub fn store(&self, value: Value) {
		*self.0.write() = value;
	}

	/// Borrow the pointee.
	pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
		// recursive read: a graph may reach this cell again while it is borrowed
		let guard = self.0.read_recursive();
		f(&guard)
	}

	/// Mutably borrow the pointee.
	pub fn update<R>(&self, f: impl FnOnce(&mut Value) -> R) -> R {
		let mut guard = self.0.write();
		f(&mut guard)
	}

	/// Cell address, stable for the lifetime of the allocation.
	pub fn addr(&self) -> usize {
		Arc::as_ptr(&self.0) as *const () as usize
	}

	/// Whether both pointers address the same cell.
	pub fn same(&self, other: &Pointer) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for Pointer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Pointer(0x{:x})", self.addr())
	}
}
