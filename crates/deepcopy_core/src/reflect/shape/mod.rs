use serde::Serialize;

use crate::reflect::{Kind, Result, TypeId, TypeTable};

/// How a node's children are organized, which decides how it is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
	/// Numeric, boolean or text scalar, copied by value.
	Primitive,
	/// Optional single-ownership indirection.
	Reference,
	/// Interface box with a runtime-resolved concrete type.
	PolymorphicBox,
	/// Array with a statically fixed length.
	FixedSequence,
	/// Slice that may be absent.
	GrowableSequence,
	/// Map that may be absent.
	AssociativeContainer,
	/// Record with named, individually visible fields.
	CompositeRecord,
	/// Indivisible value shared as-is: time instants, functions, channels.
	OpaqueScalar,
	/// Raw addresses and platform handles; copying them is rejected.
	Unsupported,
}

impl Shape {
	/// Classify a type. Every type of kind time is opaque, named time types included.
	pub fn classify(types: &TypeTable, ty: TypeId) -> Result<Self> {
		if ty == TypeId::TIME {
			return Ok(Self::OpaqueScalar);
		}
		Ok(Self::of_kind(types.kind(ty)?))
	}

	/// Classify a kind.
	pub fn of_kind(kind: &Kind) -> Self {
		match kind {
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
			| Kind::String => Self::Primitive,
			Kind::Time | Kind::Func { .. } | Kind::Chan(_) => Self::OpaqueScalar,
			Kind::Ptr(_) => Self::Reference,
			Kind::Interface => Self::PolymorphicBox,
			Kind::Array { .. } => Self::FixedSequence,
			Kind::Slice(_) => Self::GrowableSequence,
			Kind::Map { .. } => Self::AssociativeContainer,
			Kind::Struct(_) => Self::CompositeRecord,
			Kind::Uintptr | Kind::UnsafePointer => Self::Unsupported,
		}
	}

	/// Stable snake_case label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Primitive => "primitive",
			Self::Reference => "reference",
			Self::PolymorphicBox => "polymorphic_box",
			Self::FixedSequence => "fixed_sequence",
			Self::GrowableSequence => "growable_sequence",
			Self::AssociativeContainer => "associative_container",
			Self::CompositeRecord => "composite_record",
			Self::OpaqueScalar => "opaque_scalar",
			Self::Unsupported => "unsupported",
		}
	}

	/// Whether values of this shape may be absent rather than empty.
	pub fn has_absent_state(self) -> bool {
		matches!(self, Self::Reference | Self::PolymorphicBox | Self::GrowableSequence | Self::AssociativeContainer)
	}
}
