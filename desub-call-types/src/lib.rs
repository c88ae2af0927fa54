// Copyright 2019-2021 Parity Technologies (UK) Ltd.
// This file is part of substrate-desub.
//
// substrate-desub is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. //
// substrate-desub is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with substrate-desub.  If not, see <http://www.gnu.org/licenses/>.


//! Type descriptors for metadata-driven call decoding.
//!
//! Argument types of a runtime call are only known by name at runtime.
//! [`regex::parse`] turns those names into [`RustTypeMarker`]s, and a
//! [`TypeDetective`] resolves the names that carry no structure of their own
//! (`Balance`, `BlockNumber`, ...). Decoded values are represented as a
//! [`SubstrateType`], which encodes back into the SCALE bytes it came from.

#![forbid(unsafe_code)]

mod address;
pub mod regex;
mod substrate_types;
pub mod util;

use std::fmt;

pub use self::address::MultiAddress;
pub use self::substrate_types::{FieldValue, NestedCall, SetValue, SubstrateType, VariantValue};

/// Resolves type names that the parser could not break down any further.
pub trait TypeDetective: dyn_clone::DynClone + fmt::Debug + Send + Sync {
	/// Get the type marker declared under `ty`, looking in `module` first.
	fn get(&self, module: &str, ty: &str) -> Option<&RustTypeMarker>;

	/// An alternative definition of `ty`, tried when decoding with the
	/// definition returned from [`TypeDetective::get`] fails.
	fn try_fallback(&self, module: &str, ty: &str) -> Option<&RustTypeMarker>;
}

dyn_clone::clone_trait_object!(TypeDetective);

/// Structure of a type as far as SCALE is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RustTypeMarker {
	/// A name that has to be looked up with a [`TypeDetective`].
	TypePointer(String),

	/// Named fields, decoded in order.
	Struct(Vec<StructField>),

	/// Bit flags stored in a single byte.
	Set(Vec<SetField>),

	/// Anonymous fields, decoded in order.
	Tuple(Vec<RustTypeMarker>),

	/// Variants are selected by the index of the first encoded byte.
	Enum(Vec<EnumField>),

	/// Fixed size array. No length prefix is encoded.
	Array {
		/// size of the array
		size: usize,
		/// type of each element
		ty: Box<RustTypeMarker>,
	},

	/// Containers from the standard library, and `Compact`.
	Std(CommonTypes),

	/// `Outer<Inner>` where only the outer type determines the encoding.
	Generic(Box<RustTypeMarker>, Box<RustTypeMarker>),

	U8,
	U16,
	U32,
	U64,
	U128,

	I8,
	I16,
	I32,
	I64,
	I128,

	Bool,

	/// Nothing is encoded.
	Null,
}

impl RustTypeMarker {
	/// Shorthand for a type pointer.
	pub fn pointer<S: Into<String>>(name: S) -> Self {
		RustTypeMarker::TypePointer(name.into())
	}

	pub fn is_u8(&self) -> bool {
		matches!(self, RustTypeMarker::U8)
	}
}

impl fmt::Display for RustTypeMarker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RustTypeMarker::TypePointer(t) => write!(f, "{}", t),
			RustTypeMarker::Struct(fields) => {
				write!(f, "{{ ")?;
				for (i, field) in fields.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}: {}", field.name, field.ty)?;
				}
				write!(f, " }}")
			}
			RustTypeMarker::Set(fields) => {
				let names = fields.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
				write!(f, "set[{}]", names.join(" | "))
			}
			RustTypeMarker::Tuple(types) => {
				let types = types.iter().map(|t| t.to_string()).collect::<Vec<_>>();
				write!(f, "({})", types.join(", "))
			}
			RustTypeMarker::Enum(variants) => {
				let names = variants.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();
				write!(f, "enum[{}]", names.join(", "))
			}
			RustTypeMarker::Array { size, ty } => write!(f, "[{}; {}]", ty, size),
			RustTypeMarker::Std(t) => write!(f, "{}", t),
			RustTypeMarker::Generic(outer, inner) => write!(f, "{}<{}>", outer, inner),
			RustTypeMarker::U8 => write!(f, "u8"),
			RustTypeMarker::U16 => write!(f, "u16"),
			RustTypeMarker::U32 => write!(f, "u32"),
			RustTypeMarker::U64 => write!(f, "u64"),
			RustTypeMarker::U128 => write!(f, "u128"),
			RustTypeMarker::I8 => write!(f, "i8"),
			RustTypeMarker::I16 => write!(f, "i16"),
			RustTypeMarker::I32 => write!(f, "i32"),
			RustTypeMarker::I64 => write!(f, "i64"),
			RustTypeMarker::I128 => write!(f, "i128"),
			RustTypeMarker::Bool => write!(f, "bool"),
			RustTypeMarker::Null => write!(f, "()"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CommonTypes {
	#[display(fmt = "Vec<{}>", _0)]
	Vec(Box<RustTypeMarker>),
	#[display(fmt = "Option<{}>", _0)]
	Option(Box<RustTypeMarker>),
	#[display(fmt = "Result<{}, {}>", _0, _1)]
	Result(Box<RustTypeMarker>, Box<RustTypeMarker>),
	#[display(fmt = "Compact<{}>", _0)]
	Compact(Box<RustTypeMarker>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
	pub name: String,
	pub ty: RustTypeMarker,
}

impl StructField {
	pub fn new<S: Into<String>>(name: S, ty: RustTypeMarker) -> Self {
		Self { name: name.into(), ty }
	}
}

/// A variant of an enum. Unit variants carry no value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumField {
	pub name: String,
	pub value: Option<RustTypeMarker>,
}

impl EnumField {
	pub fn new<S: Into<String>>(name: S, value: Option<RustTypeMarker>) -> Self {
		Self { name: name.into(), value }
	}
}

/// A named flag of a set; `num` is the bit mask of the flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetField {
	pub name: String,
	pub num: u8,
}

impl SetField {
	pub fn new<S: Into<String>>(name: S, num: u8) -> Self {
		Self { name: name.into(), num }
	}
}
