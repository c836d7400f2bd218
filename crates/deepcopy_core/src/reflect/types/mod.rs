use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reflect::{ReflectError, Result, Value};

/// Index of a type descriptor inside a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(u32);

impl TypeId {
	/// `bool`.
	pub const BOOL: Self = Self(0);
	/// `int`.
	pub const INT: Self = Self(1);
	/// `int8`.
	pub const INT8: Self = Self(2);
	/// `int16`.
	pub const INT16: Self = Self(3);
	/// `int32` (also `rune`).
	pub const INT32: Self = Self(4);
	/// `int64`.
	pub const INT64: Self = Self(5);
	/// `uint`.
	pub const UINT: Self = Self(6);
	/// `uint8` (also `byte`).
	pub const UINT8: Self = Self(7);
	/// `uint16`.
	pub const UINT16: Self = Self(8);
	/// `uint32`.
	pub const UINT32: Self = Self(9);
	/// `uint64`.
	pub const UINT64: Self = Self(10);
	/// `uintptr`.
	pub const UINTPTR: Self = Self(11);
	/// `float32`.
	pub const FLOAT32: Self = Self(12);
	/// `float64`.
	pub const FLOAT64: Self = Self(13);
	/// `complex64`.
	pub const COMPLEX64: Self = Self(14);
	/// `complex128`.
	pub const COMPLEX128: Self = Self(15);
	/// `string`.
	pub const STRING: Self = Self(16);
	/// `unsafe.Pointer`.
	pub const UNSAFE_POINTER: Self = Self(17);
	/// `time.Time`, the canonical instant type.
	pub const TIME: Self = Self(18);
	/// The empty interface `interface {}`.
	pub const ANY: Self = Self(19);
	/// The `error` interface.
	pub const ERROR: Self = Self(20);
	/// `sync.Mutex`, a record whose state is entirely unexported.
	pub const MUTEX: Self = Self(21);
	/// `sync.RWMutex`, a record whose state is entirely unexported.
	pub const RW_MUTEX: Self = Self(22);

	/// Raw table index.
	pub fn index(self) -> u32 {
		self.0
	}
}

/// Structural kind of a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Boolean.
	Bool,
	/// Platform-sized signed integer.
	Int,
	/// 8-bit signed integer.
	Int8,
	/// 16-bit signed integer.
	Int16,
	/// 32-bit signed integer.
	Int32,
	/// 64-bit signed integer.
	Int64,
	/// Platform-sized unsigned integer.
	Uint,
	/// 8-bit unsigned integer.
	Uint8,
	/// 16-bit unsigned integer.
	Uint16,
	/// 32-bit unsigned integer.
	Uint32,
	/// 64-bit unsigned integer.
	Uint64,
	/// Integer wide enough to hold a raw address.
	Uintptr,
	/// 32-bit float.
	Float32,
	/// 64-bit float.
	Float64,
	/// Complex number with 32-bit parts.
	Complex64,
	/// Complex number with 64-bit parts.
	Complex128,
	/// Immutable text.
	String,
	/// Raw memory address.
	UnsafePointer,
	/// Instant in time.
	Time,
	/// Function value.
	Func {
		/// Rendered signature, e.g. `func(int) string`.
		signature: Box<str>,
	},
	/// Channel of the given element type.
	Chan(TypeId),
	/// Interface box with a runtime-resolved concrete type.
	Interface,
	/// Optional pointer to the given element type.
	Ptr(TypeId),
	/// Fixed-length array.
	Array {
		/// Element type.
		elem: TypeId,
		/// Element count.
		len: usize,
	},
	/// Growable sequence of the given element type.
	Slice(TypeId),
	/// Associative container.
	Map {
		/// Key type.
		key: TypeId,
		/// Value type.
		value: TypeId,
	},
	/// Record with named fields in declaration order.
	Struct(Vec<Field>),
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Int8 => "int8",
			Self::Int16 => "int16",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::Uint => "uint",
			Self::Uint8 => "uint8",
			Self::Uint16 => "uint16",
			Self::Uint32 => "uint32",
			Self::Uint64 => "uint64",
			Self::Uintptr => "uintptr",
			Self::Float32 => "float32",
			Self::Float64 => "float64",
			Self::Complex64 => "complex64",
			Self::Complex128 => "complex128",
			Self::String => "string",
			Self::UnsafePointer => "unsafe.Pointer",
			Self::Time => "time",
			Self::Func { .. } => "func",
			Self::Chan(_) => "chan",
			Self::Interface => "interface",
			Self::Ptr(_) => "ptr",
			Self::Array { .. } => "array",
			Self::Slice(_) => "slice",
			Self::Map { .. } => "map",
			Self::Struct(_) => "struct",
		}
	}

	/// Whether the value variant matches this kind, without looking at children.
	pub fn admits(&self, value: &Value) -> bool {
		matches!(
			(self, value),
			(Self::Bool, Value::Bool(_))
				| (Self::Int | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64, Value::I64(_))
				| (Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64, Value::U64(_))
				| (Self::Uintptr | Self::UnsafePointer, Value::Addr(_))
				| (Self::Float32, Value::F32(_))
				| (Self::Float64, Value::F64(_))
				| (Self::Complex64 | Self::Complex128, Value::Complex(_, _))
				| (Self::String, Value::String(_))
				| (Self::Time, Value::Time(_))
				| (Self::Func { .. }, Value::Func(_))
				| (Self::Chan(_), Value::Chan(_))
				| (Self::Interface, Value::Interface(_))
				| (Self::Ptr(_), Value::Ptr(_))
				| (Self::Array { .. }, Value::Array(_))
				| (Self::Slice(_), Value::Slice(_))
				| (Self::Map { .. }, Value::Map(_))
				| (Self::Struct(_), Value::Struct(_))
		)
	}
}

/// One record field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
	/// Field name.
	pub name: Box<str>,
	/// Field type.
	pub ty: TypeId,
	/// Whether generic code may read and write the field.
	pub exported: bool,
}

impl Field {
	/// Field visible to generic code.
	pub fn exported(name: &str, ty: TypeId) -> Self {
		Self {
			name: name.into(),
			ty,
			exported: true,
		}
	}

	/// Field hidden from generic code.
	pub fn unexported(name: &str, ty: TypeId) -> Self {
		Self {
			name: name.into(),
			ty,
			exported: false,
		}
	}
}

/// One type table entry.
#[derive(Debug, Clone)]
pub struct TypeDesc {
	/// Declared name for named types; `None` for type literals.
	pub name: Option<Box<str>>,
	/// Structural kind.
	pub kind: Kind,
	defined: bool,
}

impl TypeDesc {
	/// Whether a declared record has received its field list.
	pub fn is_defined(&self) -> bool {
		self.defined
	}
}

/// Runtime type table: built-in types at fixed ids plus user registrations.
///
/// Type literals (`*T`, `[]T`, `map[K]V`, ...) are interned, so structurally
/// identical literals share one id. Named types are unique per name.
#[derive(Debug, Clone)]
pub struct TypeTable {
	descs: Vec<TypeDesc>,
	by_name: HashMap<Box<str>, TypeId>,
	interned: HashMap<Kind, TypeId>,
}

impl Default for TypeTable {
	fn default() -> Self {
		Self::new()
	}
}

impl TypeTable {
	/// Build a table holding the built-in types.
	pub fn new() -> Self {
		let mut table = Self {
			descs: Vec::new(),
			by_name: HashMap::new(),
			interned: HashMap::new(),
		};

		for (name, kind) in builtin_kinds() {
			let id = TypeId(table.descs.len() as u32);
			match name {
				Some(name) => {
					table.by_name.insert(name.into(), id);
				}
				None => {
					table.interned.insert(kind.clone(), id);
				}
			}
			table.descs.push(TypeDesc {
				name: name.map(Into::into),
				kind,
				defined: true,
			});
		}

		table.by_name.insert("byte".into(), TypeId::UINT8);
		table.by_name.insert("rune".into(), TypeId::INT32);
		table
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.descs.len()
	}

	/// Whether the table is empty (never true for [`TypeTable::new`]).
	pub fn is_empty(&self) -> bool {
		self.descs.is_empty()
	}

	/// Iterate `(id, desc)` pairs in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDesc)> {
		self.descs.iter().enumerate().map(|(idx, desc)| (TypeId(idx as u32), desc))
	}

	/// Look up a descriptor by id.
	pub fn desc(&self, id: TypeId) -> Result<&TypeDesc> {
		self.descs.get(id.0 as usize).ok_or(ReflectError::TypeIndexOutOfRange {
			idx: id.0,
			max: self.descs.len().saturating_sub(1) as u32,
		})
	}

	/// Look up a kind by id.
	pub fn kind(&self, id: TypeId) -> Result<&Kind> {
		self.desc(id).map(|desc| &desc.kind)
	}

	/// Look up a named type.
	pub fn lookup(&self, name: &str) -> Option<TypeId> {
		self.by_name.get(name).copied()
	}

	/// Intern `*elem`.
	pub fn ptr_to(&mut self, elem: TypeId) -> Result<TypeId> {
		self.desc(elem)?;
		Ok(self.intern(Kind::Ptr(elem)))
	}

	/// Intern `[]elem`.
	pub fn slice_of(&mut self, elem: TypeId) -> Result<TypeId> {
		self.desc(elem)?;
		Ok(self.intern(Kind::Slice(elem)))
	}

	/// Intern `[len]elem`.
	pub fn array_of(&mut self, elem: TypeId, len: usize) -> Result<TypeId> {
		self.require_defined(elem)?;
		Ok(self.intern(Kind::Array { elem, len }))
	}

	/// Intern `chan elem`.
	pub fn chan_of(&mut self, elem: TypeId) -> Result<TypeId> {
		self.desc(elem)?;
		Ok(self.intern(Kind::Chan(elem)))
	}

	/// Intern a function type by its rendered signature.
	pub fn func_of(&mut self, signature: &str) -> TypeId {
		self.intern(Kind::Func { signature: signature.into() })
	}

	/// Intern `map[key]value`; the key type must be comparable.
	pub fn map_of(&mut self, key: TypeId, value: TypeId) -> Result<TypeId> {
		if !self.is_comparable(key)? {
			return Err(ReflectError::NotComparable { type_name: self.type_name(key) });
		}
		self.desc(value)?;
		Ok(self.intern(Kind::Map { key, value }))
	}

	/// Register a named interface type.
	pub fn interface(&mut self, name: &str) -> Result<TypeId> {
		self.insert_named(name, Kind::Interface, true)
	}

	/// Register a named record whose fields are supplied later by [`TypeTable::define_struct`].
	pub fn declare_struct(&mut self, name: &str) -> Result<TypeId> {
		self.insert_named(name, Kind::Struct(Vec::new()), false)
	}

	/// Supply the field list of a declared record.
	pub fn define_struct(&mut self, id: TypeId, fields: Vec<Field>) -> Result<()> {
		let desc = self.desc(id)?;
		if desc.defined || !matches!(desc.kind, Kind::Struct(_)) {
			return Err(ReflectError::TypeAlreadyDefined { name: self.type_name(id) });
		}
		for field in &fields {
			if field.ty == id || self.contains_by_value(field.ty, id)? {
				return Err(ReflectError::InvalidRecursiveType { name: self.type_name(id) });
			}
		}

		let desc = &mut self.descs[id.0 as usize];
		desc.kind = Kind::Struct(fields);
		desc.defined = true;
		Ok(())
	}

	/// Register and define a named record in one step.
	pub fn structure(&mut self, name: &str, fields: Vec<Field>) -> Result<TypeId> {
		let id = self.declare_struct(name)?;
		self.define_struct(id, fields)?;
		Ok(id)
	}

	/// Intern an unnamed record literal.
	pub fn anonymous_struct(&mut self, fields: Vec<Field>) -> Result<TypeId> {
		for field in &fields {
			self.require_defined(field.ty)?;
		}
		Ok(self.intern(Kind::Struct(fields)))
	}

	/// Register a distinct named type sharing the kind of `underlying`.
	pub fn named(&mut self, name: &str, underlying: TypeId) -> Result<TypeId> {
		self.require_defined(underlying)?;
		let kind = self.desc(underlying)?.kind.clone();
		self.insert_named(name, kind, true)
	}

	/// Zero value for a type: false, 0, "", nil pointers/slices/maps/boxes, zeroed records.
	pub fn zero(&self, id: TypeId) -> Result<Value> {
		let desc = self.desc(id)?;
		let value = match &desc.kind {
			Kind::Bool => Value::Bool(false),
			Kind::Int | Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64 => Value::I64(0),
			Kind::Uint | Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64 => Value::U64(0),
			Kind::Uintptr | Kind::UnsafePointer => Value::Addr(0),
			Kind::Float32 => Value::F32(0.0),
			Kind::Float64 => Value::F64(0.0),
			Kind::Complex64 | Kind::Complex128 => Value::Complex(0.0, 0.0),
			Kind::String => Value::String(Arc::from("")),
			Kind::Time => Value::Time(DateTime::<Utc>::default()),
			Kind::Func { .. } => Value::Func(None),
			Kind::Chan(_) => Value::Chan(None),
			Kind::Interface => Value::Interface(None),
			Kind::Ptr(_) => Value::Ptr(None),
			Kind::Array { elem, len } => {
				let item = self.zero(*elem)?;
				Value::Array(vec![item; *len])
			}
			Kind::Slice(_) => Value::Slice(None),
			Kind::Map { .. } => Value::Map(None),
			Kind::Struct(fields) => {
				if !desc.defined {
					return Err(ReflectError::TypeNotDefined { name: self.type_name(id) });
				}
				Value::Struct(fields.iter().map(|field| self.zero(field.ty)).collect::<Result<Vec<_>>>()?)
			}
		};
		Ok(value)
	}

	/// Whether values of the type can be compared with `==` and used as map keys.
	pub fn is_comparable(&self, id: TypeId) -> Result<bool> {
		let desc = self.desc(id)?;
		match &desc.kind {
			Kind::Slice(_) | Kind::Map { .. } | Kind::Func { .. } => Ok(false),
			Kind::Array { elem, .. } => self.is_comparable(*elem),
			Kind::Struct(fields) => {
				if !desc.defined {
					return Err(ReflectError::TypeNotDefined { name: self.type_name(id) });
				}
				for field in fields {
					if !self.is_comparable(field.ty)? {
						return Ok(false);
					}
				}
				Ok(true)
			}
			_ => Ok(true),
		}
	}

	/// Whether the type holds no reference-like storage, so a plain value copy
	/// already yields an independent duplicate.
	pub fn is_primitive(&self, id: TypeId) -> Result<bool> {
		let desc = self.desc(id)?;
		match &desc.kind {
			Kind::Bool
			| Kind::Int
			| Kind::Int8
			| Kind::Int16
			| Kind::Int32
			| Kind::Int64
			| Kind::Uint
			| Kind::Uint8
			| Kind::Uint16
			| Kind::Uint32
			| Kind::Uint64
			| Kind::Float32
			| Kind::Float64
			| Kind::Complex64
			| Kind::Complex128
			| Kind::String
			| Kind::Func { .. }
			| Kind::Chan(_) => Ok(true),
			Kind::Struct(fields) => {
				for field in fields {
					if !self.is_primitive(field.ty)? {
						return Ok(false);
					}
				}
				Ok(true)
			}
			_ => Ok(false),
		}
	}

	/// Check that a value conforms to a type. Pointer targets are not followed.
	pub fn check(&self, id: TypeId, value: &Value) -> Result<()> {
		let desc = self.desc(id)?;
		if !desc.kind.admits(value) {
			return Err(ReflectError::KindMismatch {
				type_name: self.type_name(id),
				expected: desc.kind.as_str(),
				got: value.kind_str(),
			});
		}

		match (&desc.kind, value) {
			(Kind::Interface, Value::Interface(Some(node))) => self.check(node.ty(), node.value()),
			(Kind::Array { elem, len }, Value::Array(items)) => {
				if items.len() != *len {
					return Err(ReflectError::ArrayLenMismatch {
						type_name: self.type_name(id),
						expected: *len,
						got: items.len(),
					});
				}
				items.iter().try_for_each(|item| self.check(*elem, item))
			}
			(Kind::Slice(elem), Value::Slice(Some(items))) => items.iter().try_for_each(|item| self.check(*elem, item)),
			(Kind::Map { key, value: elem }, Value::Map(Some(map))) => map.iter().try_for_each(|(k, v)| {
				self.check(*key, k)?;
				self.check(*elem, v)
			}),
			(Kind::Struct(fields), Value::Struct(items)) => {
				if !desc.defined {
					return Err(ReflectError::TypeNotDefined { name: self.type_name(id) });
				}
				if items.len() != fields.len() {
					return Err(ReflectError::FieldCountMismatch {
						type_name: self.type_name(id),
						expected: fields.len(),
						got: items.len(),
					});
				}
				fields.iter().zip(items).try_for_each(|(field, item)| self.check(field.ty, item))
			}
			_ => Ok(()),
		}
	}

	/// Render a type the way Go prints it, e.g. `*main.T` or `map[string]interface {}`.
	pub fn type_name(&self, id: TypeId) -> String {
		let Ok(desc) = self.desc(id) else {
			return "<invalid>".to_owned();
		};
		if let Some(name) = &desc.name {
			return name.to_string();
		}

		match &desc.kind {
			Kind::Ptr(elem) => format!("*{}", self.type_name(*elem)),
			Kind::Slice(elem) => format!("[]{}", self.type_name(*elem)),
			Kind::Array { elem, len } => format!("[{len}]{}", self.type_name(*elem)),
			Kind::Chan(elem) => format!("chan {}", self.type_name(*elem)),
			Kind::Map { key, value } => format!("map[{}]{}", self.type_name(*key), self.type_name(*value)),
			Kind::Func { signature } => signature.to_string(),
			Kind::Interface => "interface {}".to_owned(),
			Kind::Struct(fields) if fields.is_empty() => "struct {}".to_owned(),
			Kind::Struct(fields) => {
				let body = fields
					.iter()
					.map(|field| format!("{} {}", field.name, self.type_name(field.ty)))
					.collect::<Vec<_>>()
					.join("; ");
				format!("struct {{ {body} }}")
			}
			other => other.as_str().to_owned(),
		}
	}

	fn require_defined(&self, id: TypeId) -> Result<()> {
		if !self.desc(id)?.defined {
			return Err(ReflectError::TypeNotDefined { name: self.type_name(id) });
		}
		Ok(())
	}

	fn contains_by_value(&self, id: TypeId, target: TypeId) -> Result<bool> {
		match &self.desc(id)?.kind {
			Kind::Array { elem, .. } => Ok(*elem == target || self.contains_by_value(*elem, target)?),
			Kind::Struct(fields) => {
				for field in fields {
					if field.ty == target || self.contains_by_value(field.ty, target)? {
						return Ok(true);
					}
				}
				Ok(false)
			}
			_ => Ok(false),
		}
	}

	fn insert_named(&mut self, name: &str, kind: Kind, defined: bool) -> Result<TypeId> {
		if self.by_name.contains_key(name) {
			return Err(ReflectError::DuplicateTypeName { name: name.to_owned() });
		}
		let id = TypeId(self.descs.len() as u32);
		self.by_name.insert(name.into(), id);
		self.descs.push(TypeDesc {
			name: Some(name.into()),
			kind,
			defined,
		});
		Ok(id)
	}

	fn intern(&mut self, kind: Kind) -> TypeId {
		if let Some(id) = self.interned.get(&kind) {
			return *id;
		}
		let id = TypeId(self.descs.len() as u32);
		self.interned.insert(kind.clone(), id);
		self.descs.push(TypeDesc {
			name: None,
			kind,
			defined: true,
		});
		id
	}
}

fn builtin_kinds() -> Vec<(Option<&'static str>, Kind)> {
	vec![
		(Some("bool"), Kind::Bool),
		(Some("int"), Kind::Int),
		(Some("int8"), Kind::Int8),
		(Some("int16"), Kind::Int16),
		(Some("int32"), Kind::Int32),
		(Some("int64"), Kind::Int64),
		(Some("uint"), Kind::Uint),
		(Some("uint8"), Kind::Uint8),
		(Some("uint16"), Kind::Uint16),
		(Some("uint32"), Kind::Uint32),
		(Some("uint64"), Kind::Uint64),
		(Some("uintptr"), Kind::Uintptr),
		(Some("float32"), Kind::Float32),
		(Some("float64"), Kind::Float64),
		(Some("complex64"), Kind::Complex64),
		(Some("complex128"), Kind::Complex128),
		(Some("string"), Kind::String),
		(Some("unsafe.Pointer"), Kind::UnsafePointer),
		(Some("time.Time"), Kind::Time),
		(None, Kind::Interface),
		(Some("error"), Kind::Interface),
		(
			Some("sync.Mutex"),
			Kind::Struct(vec![Field::unexported("state", TypeId::INT32), Field::unexported("sema", TypeId::UINT32)]),
		),
		(
			Some("sync.RWMutex"),
			Kind::Struct(vec![
				Field::unexported("w", TypeId::MUTEX),
				Field::unexported("writerSem", TypeId::UINT32),
				Field::unexported("readerSem", TypeId::UINT32),
				Field::unexported("readerCount", TypeId::INT32),
				Field::unexported("readerWait", TypeId::INT32),
			]),
		),
	]
}
