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


//! Values decoded according to a [`RustTypeMarker`](crate::RustTypeMarker).
//!
//! Every value keeps enough information (variant indices, set bits, compact
//! markers) to be encoded back into the exact bytes it was decoded from.

use crate::{
	util::{as_hex, as_ss58, bytes_as_hex, fields_as_map, to_bytes},
	MultiAddress,
};
use codec::{Compact, Encode, Output};
use serde::{Serialize, Serializer};
use sp_core::{
	crypto::AccountId32,
	H160, H256, H512,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubstrateType {
	#[serde(serialize_with = "bytes_as_hex")]
	H160(H160),
	#[serde(serialize_with = "bytes_as_hex")]
	H256(H256),
	#[serde(serialize_with = "bytes_as_hex")]
	H512(H512),

	#[serde(serialize_with = "as_ss58")]
	AccountId(AccountId32),

	Address(MultiAddress),

	/// Length prefixed bytes.
	#[serde(serialize_with = "bytes_as_hex")]
	Bytes(Vec<u8>),

	/// Length prefixed UTF-8 string.
	Text(String),

	/// A call nested inside the arguments of another call.
	Call(NestedCall),

	/// Length prefixed sequence (`Vec<T>`).
	#[serde(serialize_with = "as_hex")]
	Sequence(Vec<SubstrateType>),

	/// Fixed number of values without a length prefix (arrays and tuples).
	#[serde(serialize_with = "as_hex")]
	Composite(Vec<SubstrateType>),

	#[serde(serialize_with = "fields_as_map")]
	Struct(Vec<FieldValue>),

	Enum(VariantValue),

	Set(SetValue),

	Option(Box<Option<SubstrateType>>),

	Result(Box<Result<SubstrateType, SubstrateType>>),

	/// A number in compact encoding.
	Compact(Box<SubstrateType>),

	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	U128(u128),

	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	I128(i128),

	Bool(bool),

	Null,
}

impl SubstrateType {
	/// Wrap an unsigned number in its compact form. Other values are returned as is.
	pub fn compact(self) -> SubstrateType {
		match self {
			n @ (SubstrateType::U8(_)
			| SubstrateType::U16(_)
			| SubstrateType::U32(_)
			| SubstrateType::U64(_)
			| SubstrateType::U128(_)) => SubstrateType::Compact(Box::new(n)),
			other => other,
		}
	}
}

impl Encode for SubstrateType {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		match self {
			SubstrateType::H160(v) => dest.write(v.as_bytes()),
			SubstrateType::H256(v) => dest.write(v.as_bytes()),
			SubstrateType::H512(v) => dest.write(v.as_bytes()),
			SubstrateType::AccountId(v) => v.encode_to(dest),
			SubstrateType::Address(v) => v.encode_to(dest),
			SubstrateType::Bytes(v) => v.encode_to(dest),
			SubstrateType::Text(v) => v.encode_to(dest),
			SubstrateType::Call(v) => v.encode_to(dest),
			SubstrateType::Sequence(v) => {
				Compact(v.len() as u32).encode_to(dest);
				v.iter().for_each(|e| e.encode_to(dest));
			}
			SubstrateType::Composite(v) => v.iter().for_each(|e| e.encode_to(dest)),
			SubstrateType::Struct(fields) => fields.iter().for_each(|f| f.value.encode_to(dest)),
			SubstrateType::Enum(v) => {
				dest.push_byte(v.index);
				if let Some(value) = &v.value {
					value.encode_to(dest);
				}
			}
			SubstrateType::Set(v) => dest.push_byte(v.bits),
			SubstrateType::Option(v) => match v.as_ref() {
				None => dest.push_byte(0),
				Some(v) => {
					dest.push_byte(1);
					v.encode_to(dest);
				}
			},
			SubstrateType::Result(v) => match v.as_ref() {
				Ok(v) => {
					dest.push_byte(0);
					v.encode_to(dest);
				}
				Err(e) => {
					dest.push_byte(1);
					e.encode_to(dest);
				}
			},
			SubstrateType::Compact(v) => match v.as_ref() {
				SubstrateType::U8(n) => Compact(*n).encode_to(dest),
				SubstrateType::U16(n) => Compact(*n).encode_to(dest),
				SubstrateType::U32(n) => Compact(*n).encode_to(dest),
				SubstrateType::U64(n) => Compact(*n).encode_to(dest),
				SubstrateType::U128(n) => Compact(*n).encode_to(dest),
				other => other.encode_to(dest),
			},
			SubstrateType::U8(v) => v.encode_to(dest),
			SubstrateType::U16(v) => v.encode_to(dest),
			SubstrateType::U32(v) => v.encode_to(dest),
			SubstrateType::U64(v) => v.encode_to(dest),
			SubstrateType::U128(v) => v.encode_to(dest),
			SubstrateType::I8(v) => v.encode_to(dest),
			SubstrateType::I16(v) => v.encode_to(dest),
			SubstrateType::I32(v) => v.encode_to(dest),
			SubstrateType::I64(v) => v.encode_to(dest),
			SubstrateType::I128(v) => v.encode_to(dest),
			SubstrateType::Bool(v) => v.encode_to(dest),
			SubstrateType::Null => (),
		}
	}
}

impl fmt::Display for SubstrateType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SubstrateType::H160(v) => write!(f, "{:#x}", v),
			SubstrateType::H256(v) => write!(f, "{:#x}", v),
			SubstrateType::H512(v) => write!(f, "{:#x}", v),
			SubstrateType::AccountId(v) => write!(f, "{}", v),
			SubstrateType::Address(v) => write!(f, "{}", v),
			SubstrateType::Bytes(v) => write!(f, "0x{}", hex::encode(v)),
			SubstrateType::Text(v) => write!(f, "{}", v),
			SubstrateType::Call(v) => write!(f, "{}", v),
			SubstrateType::Sequence(v) | SubstrateType::Composite(v) => match to_bytes(v) {
				Some(bytes) => write!(f, "0x{}", hex::encode(bytes)),
				None => {
					let elements = v.iter().map(|e| e.to_string()).collect::<Vec<_>>();
					write!(f, "[{}]", elements.join(", "))
				}
			},
			SubstrateType::Struct(fields) => {
				let fields = fields.iter().map(|e| e.to_string()).collect::<Vec<_>>();
				write!(f, "{{ {} }}", fields.join(", "))
			}
			SubstrateType::Enum(v) => write!(f, "{}", v),
			SubstrateType::Set(v) => write!(f, "{}", v.names.join(" | ")),
			SubstrateType::Option(v) => match v.as_ref() {
				Some(v) => write!(f, "Some({})", v),
				None => write!(f, "None"),
			},
			SubstrateType::Result(v) => match v.as_ref() {
				Ok(v) => write!(f, "Ok({})", v),
				Err(e) => write!(f, "Err({})", e),
			},
			SubstrateType::Compact(v) => write!(f, "{}", v),
			SubstrateType::U8(v) => write!(f, "{}", v),
			SubstrateType::U16(v) => write!(f, "{}", v),
			SubstrateType::U32(v) => write!(f, "{}", v),
			SubstrateType::U64(v) => write!(f, "{}", v),
			SubstrateType::U128(v) => write!(f, "{}", v),
			SubstrateType::I8(v) => write!(f, "{}", v),
			SubstrateType::I16(v) => write!(f, "{}", v),
			SubstrateType::I32(v) => write!(f, "{}", v),
			SubstrateType::I64(v) => write!(f, "{}", v),
			SubstrateType::I128(v) => write!(f, "{}", v),
			SubstrateType::Bool(v) => write!(f, "{}", v),
			SubstrateType::Null => write!(f, "()"),
		}
	}
}

/// A named value, either a struct field or a call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
	pub name: String,
	pub value: SubstrateType,
}

impl FieldValue {
	pub fn new<S: Into<String>>(name: S, value: SubstrateType) -> Self {
		Self { name: name.into(), value }
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.name, self.value)
	}
}

/// The variant of an enum that was decoded, with the index it was encoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantValue {
	pub name: String,
	pub index: u8,
	pub value: Option<Box<SubstrateType>>,
}

impl VariantValue {
	pub fn new<S: Into<String>>(name: S, index: u8, value: Option<SubstrateType>) -> Self {
		Self { name: name.into(), index, value: value.map(Box::new) }
	}
}

// unit variants serialize as their name, others as `{ name: value }`
impl Serialize for VariantValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match &self.value {
			None => serializer.serialize_str(&self.name),
			Some(value) => {
				use serde::ser::SerializeMap;
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry(&self.name, value)?;
				map.end()
			}
		}
	}
}

impl fmt::Display for VariantValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.value {
			Some(v) => write!(f, "{}({})", self.name, v),
			None => write!(f, "{}", self.name),
		}
	}
}

/// Flags of a set, together with the raw byte they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValue {
	pub bits: u8,
	pub names: Vec<String>,
}

impl SetValue {
	pub fn new(bits: u8, names: Vec<String>) -> Self {
		Self { bits, names }
	}
}

impl Serialize for SetValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.names.iter())
	}
}

/// A call that is itself an argument, i.e. of `sudo` or `utility.batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedCall {
	#[serde(serialize_with = "bytes_as_hex")]
	pub call_index: [u8; 2],
	pub section: String,
	pub method: String,
	#[serde(serialize_with = "fields_as_map")]
	pub args: Vec<FieldValue>,
}

impl Encode for NestedCall {
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		dest.write(&self.call_index);
		self.args.iter().for_each(|a| a.value.encode_to(dest));
	}
}

impl fmt::Display for NestedCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let args = self.args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
		write!(f, "{}.{}({})", self.section, self.method, args.join(", "))
	}
}

macro_rules! impl_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for SubstrateType {
				fn from(val: $ty) -> SubstrateType {
					SubstrateType::$variant(val)
				}
			}
		)*
	};
}

impl_from!(
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	u128 => U128,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	i128 => I128,
	bool => Bool,
	String => Text,
	AccountId32 => AccountId,
	MultiAddress => Address,
	H160 => H160,
	H256 => H256,
	H512 => H512,
);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_encode_compact_numbers() {
		let value = SubstrateType::U128(1_000).compact();
		assert_eq!(value.encode(), Compact(1_000u128).encode());
		// signed numbers are never compact
		assert_eq!(SubstrateType::I32(-1).compact(), SubstrateType::I32(-1));
	}

	#[test]
	fn should_encode_sequences_and_composites() {
		let seq = SubstrateType::Sequence(vec![1u16.into(), 2u16.into()]);
		assert_eq!(seq.encode(), vec![1u16, 2u16].encode());

		let composite = SubstrateType::Composite(vec![1u8.into(), 2u8.into(), 3u8.into()]);
		assert_eq!(composite.encode(), vec![1, 2, 3]);
	}

	#[test]
	fn should_encode_enums_options_and_results() {
		let variant = SubstrateType::Enum(VariantValue::new("Account", 3, Some(SubstrateType::U32(7))));
		assert_eq!(variant.encode(), vec![3, 7, 0, 0, 0]);

		let unit = SubstrateType::Enum(VariantValue::new("Staked", 0, None));
		assert_eq!(unit.encode(), vec![0]);

		let some = SubstrateType::Option(Box::new(Some(SubstrateType::U8(9))));
		assert_eq!(some.encode(), vec![1, 9]);
		assert_eq!(SubstrateType::Option(Box::new(None)).encode(), vec![0]);

		let err = SubstrateType::Result(Box::new(Err(SubstrateType::U8(2))));
		assert_eq!(err.encode(), vec![1, 2]);
	}

	#[test]
	fn should_encode_nested_call() {
		let call = SubstrateType::Call(NestedCall {
			call_index: [0, 1],
			section: "system".into(),
			method: "remark".into(),
			args: vec![FieldValue::new("remark", SubstrateType::Bytes(vec![0xaa]))],
		});
		assert_eq!(call.encode(), vec![0, 1, 4, 0xaa]);
	}

	#[test]
	fn should_serialize_values() {
		let account = AccountId32::new([0; 32]);
		let value = SubstrateType::Struct(vec![
			FieldValue::new("who", SubstrateType::AccountId(account.clone())),
			FieldValue::new("amount", SubstrateType::U128(10).compact()),
			FieldValue::new("status", SubstrateType::Enum(VariantValue::new("Free", 0, None))),
		]);
		let json = serde_json::to_value(&value).unwrap();
		assert_eq!(json["who"], serde_json::Value::String(account.to_string()));
		assert_eq!(json["amount"], serde_json::json!(10));
		assert_eq!(json["status"], serde_json::json!("Free"));

		let set = SubstrateType::Set(SetValue::new(0b101, vec!["Transfer".into(), "Fee".into()]));
		assert_eq!(serde_json::to_value(&set).unwrap(), serde_json::json!(["Transfer", "Fee"]));
	}
}
