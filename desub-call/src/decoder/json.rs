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


//! Conversion of JSON arguments into values, following the decode plan.

use super::{
	scale::{DecodeState, MAX_DEPTH},
	CallDecoder,
};
use crate::{resolve_args_def, util, ArgsDef, CallIndex, Error};
use desub_call_types::{
	util::decode_hex, CommonTypes, FieldValue, MultiAddress, NestedCall, RustTypeMarker, SetValue, SubstrateType,
	VariantValue,
};
use serde_json::{Map, Value};
use sp_core::{
	crypto::{AccountId32, Ss58Codec},
	H160, H256, H512,
};
use std::convert::TryFrom;

fn json_err(ty: &impl ToString, value: &Value) -> Error {
	Error::Json { ty: ty.to_string(), value: value.to_string() }
}

impl CallDecoder {
	/// Convert the arguments of a call from JSON, either an object keyed by
	/// argument name or an array in declaration order.
	pub(super) fn args_from_json(&self, module: &str, args_def: &ArgsDef, args: &Value) -> Result<Vec<FieldValue>, Error> {
		self.fields_from_json(module, args_def, args, 0)
	}

	fn fields_from_json(
		&self,
		module: &str,
		args_def: &ArgsDef,
		args: &Value,
		depth: usize,
	) -> Result<Vec<FieldValue>, Error> {
		match args {
			Value::Object(obj) => args_def
				.iter()
				.map(|(name, ty)| {
					let value = obj.get(name).ok_or_else(|| Error::MissingArgument(name.into()))?;
					Ok(FieldValue::new(name, self.value_from_json(module, ty, value, false, depth)?))
				})
				.collect(),
			Value::Array(arr) => args_def
				.iter()
				.enumerate()
				.map(|(i, (name, ty))| {
					let value = arr.get(i).ok_or_else(|| Error::MissingArgument(name.into()))?;
					Ok(FieldValue::new(name, self.value_from_json(module, ty, value, false, depth)?))
				})
				.collect(),
			Value::Null if args_def.is_empty() => Ok(Vec::new()),
			other => Err(Error::DecodeShape(other.to_string())),
		}
	}

	fn value_from_json(
		&self,
		module: &str,
		ty: &RustTypeMarker,
		value: &Value,
		is_compact: bool,
		depth: usize,
	) -> Result<SubstrateType, Error> {
		if depth >= MAX_DEPTH {
			return Err(Error::DepthLimit(MAX_DEPTH));
		}
		self.marker_from_json(module, ty, value, is_compact, depth + 1)
	}

	fn marker_from_json(
		&self,
		module: &str,
		ty: &RustTypeMarker,
		value: &Value,
		is_compact: bool,
		depth: usize,
	) -> Result<SubstrateType, Error> {
		let converted = match ty {
			RustTypeMarker::TypePointer(name) => {
				if let Some(v) = self.sub_type_from_json(module, name, value, depth)? {
					return Ok(v);
				}
				let new_type = self
					.types
					.get(module, name)
					.ok_or_else(|| Error::NameResolution { module: module.to_string(), ty: name.clone() })?;
				match self.value_from_json(module, new_type, value, is_compact, depth) {
					Err(e) if !matches!(e, Error::DepthLimit(_)) => match self.types.try_fallback(module, name) {
						Some(fallback) => self.value_from_json(module, fallback, value, is_compact, depth)?,
						None => return Err(e),
					},
					ok => ok?,
				}
			}
			RustTypeMarker::Struct(fields) => match value {
				Value::Object(obj) => SubstrateType::Struct(
					fields
						.iter()
						.map(|f| {
							let v = obj.get(&f.name).ok_or_else(|| json_err(ty, value))?;
							Ok(FieldValue::new(f.name.as_str(), self.value_from_json(module, &f.ty, v, is_compact, depth)?))
						})
						.collect::<Result<_, Error>>()?,
				),
				Value::Array(arr) if arr.len() == fields.len() => SubstrateType::Struct(
					fields
						.iter()
						.zip(arr)
						.map(|(f, v)| {
							Ok(FieldValue::new(f.name.as_str(), self.value_from_json(module, &f.ty, v, is_compact, depth)?))
						})
						.collect::<Result<_, Error>>()?,
				),
				_ => return Err(json_err(ty, value)),
			},
			RustTypeMarker::Set(fields) => {
				let bits = match value {
					Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()).ok_or_else(|| json_err(ty, value))?,
					Value::Array(names) => names.iter().try_fold(0u8, |bits, name| {
						let field = name
							.as_str()
							.and_then(|name| fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)))
							.ok_or_else(|| json_err(ty, value))?;
						Ok::<_, Error>(bits | field.num)
					})?,
					_ => return Err(json_err(ty, value)),
				};
				let names = fields.iter().filter(|f| f.num & bits != 0).map(|f| f.name.clone()).collect();
				SubstrateType::Set(SetValue::new(bits, names))
			}
			RustTypeMarker::Tuple(types) => match value {
				Value::Array(arr) if arr.len() == types.len() => SubstrateType::Composite(
					types
						.iter()
						.zip(arr)
						.map(|(t, v)| self.value_from_json(module, t, v, false, depth))
						.collect::<Result<_, Error>>()?,
				),
				_ => return Err(json_err(ty, value)),
			},
			RustTypeMarker::Enum(variants) => {
				let (name, inner) = match value {
					Value::String(name) => (name.as_str(), None),
					Value::Object(obj) if obj.len() == 1 => {
						let (name, inner) = obj.iter().next().ok_or_else(|| json_err(ty, value))?;
						(name.as_str(), Some(inner))
					}
					_ => return Err(json_err(ty, value)),
				};
				let (index, variant) = variants
					.iter()
					.enumerate()
					.find(|(_, v)| v.name.eq_ignore_ascii_case(name))
					.ok_or_else(|| json_err(ty, value))?;
				let index = u8::try_from(index).map_err(|_| json_err(ty, value))?;
				let inner = match (&variant.value, inner) {
					(None, None) | (None, Some(Value::Null)) => None,
					(Some(t), Some(v)) => Some(self.value_from_json(module, t, v, false, depth)?),
					(Some(RustTypeMarker::Null), None) => Some(SubstrateType::Null),
					_ => return Err(json_err(ty, value)),
				};
				SubstrateType::Enum(VariantValue::new(variant.name.as_str(), index, inner))
			}
			RustTypeMarker::Array { size, ty: inner } => {
				let values = match value {
					Value::String(s) if inner.is_u8() => {
						decode_hex(s).ok_or_else(|| json_err(ty, value))?.into_iter().map(SubstrateType::U8).collect()
					}
					Value::Array(arr) => arr
						.iter()
						.map(|v| self.value_from_json(module, inner, v, false, depth))
						.collect::<Result<Vec<_>, Error>>()?,
					_ => return Err(json_err(ty, value)),
				};
				if values.len() != *size {
					return Err(json_err(ty, value));
				}
				SubstrateType::Composite(values)
			}
			RustTypeMarker::Std(v) => match v {
				CommonTypes::Vec(inner) => match value {
					Value::String(s) if inner.is_u8() => SubstrateType::Sequence(
						decode_hex(s).ok_or_else(|| json_err(ty, value))?.into_iter().map(SubstrateType::U8).collect(),
					),
					Value::Array(arr) => SubstrateType::Sequence(
						arr.iter().map(|v| self.value_from_json(module, inner, v, false, depth)).collect::<Result<_, Error>>()?,
					),
					_ => return Err(json_err(ty, value)),
				},
				CommonTypes::Option(inner) => match value {
					Value::Null => SubstrateType::Option(Box::new(None)),
					v => SubstrateType::Option(Box::new(Some(self.value_from_json(module, inner, v, false, depth)?))),
				},
				CommonTypes::Result(ok, err) => match value {
					Value::Object(obj) if obj.len() == 1 => match (obj.get("Ok"), obj.get("Err")) {
						(Some(v), _) => SubstrateType::Result(Box::new(Ok(self.value_from_json(module, ok, v, false, depth)?))),
						(_, Some(v)) => SubstrateType::Result(Box::new(Err(self.value_from_json(module, err, v, false, depth)?))),
						_ => return Err(json_err(ty, value)),
					},
					_ => return Err(json_err(ty, value)),
				},
				CommonTypes::Compact(inner) => self.value_from_json(module, inner, value, true, depth)?,
			},
			RustTypeMarker::Generic(outer, _) => self.value_from_json(module, outer, value, is_compact, depth)?,
			RustTypeMarker::U8 => unsigned_from_json::<u8>(ty, value, is_compact)?,
			RustTypeMarker::U16 => unsigned_from_json::<u16>(ty, value, is_compact)?,
			RustTypeMarker::U32 => unsigned_from_json::<u32>(ty, value, is_compact)?,
			RustTypeMarker::U64 => unsigned_from_json::<u64>(ty, value, is_compact)?,
			RustTypeMarker::U128 => unsigned_from_json::<u128>(ty, value, is_compact)?,
			RustTypeMarker::I8 => signed_from_json::<i8>(ty, value, is_compact)?,
			RustTypeMarker::I16 => signed_from_json::<i16>(ty, value, is_compact)?,
			RustTypeMarker::I32 => signed_from_json::<i32>(ty, value, is_compact)?,
			RustTypeMarker::I64 => signed_from_json::<i64>(ty, value, is_compact)?,
			RustTypeMarker::I128 => signed_from_json::<i128>(ty, value, is_compact)?,
			RustTypeMarker::Bool => SubstrateType::Bool(value.as_bool().ok_or_else(|| json_err(ty, value))?),
			RustTypeMarker::Null => match value {
				Value::Null => SubstrateType::Null,
				_ => return Err(json_err(ty, value)),
			},
		};
		Ok(converted)
	}

	/// JSON forms of the types that have no type definition.
	fn sub_type_from_json(
		&self,
		module: &str,
		ty: &str,
		value: &Value,
		depth: usize,
	) -> Result<Option<SubstrateType>, Error> {
		let converted = match ty {
			"AccountId" | "AccountId32" | "GenericAccountId" => {
				SubstrateType::AccountId(account_from_json(value).ok_or_else(|| json_err(&ty, value))?)
			}
			"MultiAddress" | "GenericMultiAddress" => {
				SubstrateType::Address(address_from_json(value).ok_or_else(|| json_err(&ty, value))?)
			}
			"H160" => SubstrateType::H160(fixed_from_json(value).map(H160).ok_or_else(|| json_err(&ty, value))?),
			"H256" => SubstrateType::H256(fixed_from_json(value).map(H256).ok_or_else(|| json_err(&ty, value))?),
			"H512" => SubstrateType::H512(fixed_from_json(value).map(H512).ok_or_else(|| json_err(&ty, value))?),
			"Bytes" => SubstrateType::Bytes(bytes_from_json(value).ok_or_else(|| json_err(&ty, value))?),
			"Text" | "String" | "Str" => {
				SubstrateType::Text(value.as_str().map(ToString::to_string).ok_or_else(|| json_err(&ty, value))?)
			}
			"Call" | "GenericCall" | "RuntimeCall" => self.call_from_json(module, value, depth)?,
			"Data" => data_from_json(value).ok_or_else(|| json_err(&ty, value))?,
			_ => return Ok(None),
		};
		Ok(Some(converted))
	}

	/// A nested call, structured or as hex.
	fn call_from_json(&self, module: &str, value: &Value, depth: usize) -> Result<SubstrateType, Error> {
		match value {
			Value::String(hex) => {
				let bytes = decode_hex(hex).ok_or_else(|| json_err(&"Call", value))?;
				let mut state = DecodeState::at_depth(module, &bytes, depth);
				self.decode_nested_call(&mut state)
			}
			Value::Object(obj) => {
				let (call_index, args) = structured_call(obj).ok_or_else(|| json_err(&"Call", value))?;
				let call_index = CallIndex::from_json(call_index)?;
				let function = self.registry.find(&call_index).ok_or(Error::UnknownNestedCall(call_index))?;
				let args_def = resolve_args_def(Some(function.meta().as_ref()));
				let args = self.fields_from_json(function.section(), &args_def, args, depth)?;
				Ok(SubstrateType::Call(NestedCall {
					call_index: *call_index.as_bytes(),
					section: function.section().to_string(),
					method: util::method_name(function.meta().name()),
					args,
				}))
			}
			_ => Err(json_err(&"Call", value)),
		}
	}
}

fn structured_call(obj: &Map<String, Value>) -> Option<(&Value, &Value)> {
	Some((obj.get("callIndex")?, obj.get("args")?))
}

/// Numbers are JSON numbers or decimal strings, for values beyond the range of JSON numbers.
fn unsigned_from_json<T>(ty: &RustTypeMarker, value: &Value, is_compact: bool) -> Result<SubstrateType, Error>
where
	T: TryFrom<u128> + Into<SubstrateType>,
{
	let n = match value {
		Value::Number(n) => n.as_u64().map(u128::from),
		Value::String(s) => s.parse::<u128>().ok(),
		_ => None,
	};
	let n: SubstrateType = n.and_then(|n| T::try_from(n).ok()).ok_or_else(|| json_err(ty, value))?.into();
	Ok(if is_compact { n.compact() } else { n })
}

fn signed_from_json<T>(ty: &RustTypeMarker, value: &Value, is_compact: bool) -> Result<SubstrateType, Error>
where
	T: TryFrom<i128> + Into<SubstrateType>,
{
	if is_compact {
		return Err(Error::from("Signed integers cannot be compact"));
	}
	let n = match value {
		Value::Number(n) => n.as_i64().map(i128::from),
		Value::String(s) => s.parse::<i128>().ok(),
		_ => None,
	};
	Ok(n.and_then(|n| T::try_from(n).ok()).ok_or_else(|| json_err(ty, value))?.into())
}

fn fixed_from_json<const N: usize>(value: &Value) -> Option<[u8; N]> {
	let bytes = decode_hex(value.as_str()?)?;
	<[u8; N]>::try_from(bytes).ok()
}

fn account_from_json(value: &Value) -> Option<AccountId32> {
	let s = value.as_str()?;
	if s.starts_with("0x") {
		fixed_from_json::<32>(value).map(AccountId32::new)
	} else {
		AccountId32::from_ss58check(s).ok()
	}
}

fn address_from_json(value: &Value) -> Option<MultiAddress> {
	match value {
		Value::String(_) => account_from_json(value)
			.map(MultiAddress::Id)
			.or_else(|| fixed_from_json::<20>(value).map(MultiAddress::Address20)),
		Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).map(MultiAddress::Index),
		Value::Object(obj) if obj.len() == 1 => {
			let (variant, inner) = obj.iter().next()?;
			match variant.as_str() {
				"Id" => account_from_json(inner).map(MultiAddress::Id),
				"Index" => address_from_json(inner).filter(|a| matches!(a, MultiAddress::Index(_))),
				"Raw" => decode_hex(inner.as_str()?).map(MultiAddress::Raw),
				"Address32" => fixed_from_json(inner).map(MultiAddress::Address32),
				"Address20" => fixed_from_json(inner).map(MultiAddress::Address20),
				_ => None,
			}
		}
		_ => None,
	}
}

/// Hex, a UTF-8 string or an array of bytes.
fn bytes_from_json(value: &Value) -> Option<Vec<u8>> {
	match value {
		Value::String(s) if s.starts_with("0x") => decode_hex(s),
		Value::String(s) => Some(s.as_bytes().to_vec()),
		Value::Array(arr) => arr.iter().map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok())).collect(),
		_ => None,
	}
}

fn data_from_json(value: &Value) -> Option<SubstrateType> {
	const HASHES: [&str; 4] = ["BlakeTwo256", "Sha256", "Keccak256", "ShaThree256"];
	let variant = match value {
		Value::Null => VariantValue::new("None", 0, None),
		Value::String(s) if s == "None" => VariantValue::new("None", 0, None),
		Value::Object(obj) if obj.len() == 1 => {
			let (name, inner) = obj.iter().next()?;
			if name == "Raw" {
				let raw = bytes_from_json(inner).filter(|b| b.len() <= 32)?;
				let index = raw.len() as u8 + 1;
				VariantValue::new("Raw", index, Some(SubstrateType::Composite(raw.into_iter().map(SubstrateType::U8).collect())))
			} else {
				let pos = HASHES.iter().position(|h| h == name)?;
				let hash = fixed_from_json(inner).map(H256)?;
				VariantValue::new(HASHES[pos], 34 + pos as u8, Some(SubstrateType::H256(hash)))
			}
		}
		_ => return None,
	};
	Some(SubstrateType::Enum(variant))
}
