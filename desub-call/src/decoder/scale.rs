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


//! SCALE decoding of arguments, driven by [`RustTypeMarker`]s.

use super::CallDecoder;
use crate::{resolve_args_def, util, ArgsDef, CallIndex, Error};
use codec::{Compact, Decode};
use desub_call_types::{
	CommonTypes, FieldValue, MultiAddress, NestedCall, RustTypeMarker, SetValue, SubstrateType, VariantValue,
};
use sp_core::{crypto::AccountId32, H160, H256, H512};

/// Levels of types and nested calls a single decode may go through.
pub(super) const MAX_DEPTH: usize = 128;
/// Elements a sequence may claim when they take up no input.
const MAX_EMPTY_ELEMENTS: usize = 1 << 16;

/// Remaining input of a decode, and the module whose types are in use.
pub(super) struct DecodeState<'a> {
	module: String,
	data: &'a [u8],
	depth: usize,
}

impl<'a> DecodeState<'a> {
	pub(super) fn new(module: &str, data: &'a [u8]) -> Self {
		Self::at_depth(module, data, 0)
	}

	/// State of a decode that starts `depth` levels down.
	pub(super) fn at_depth(module: &str, data: &'a [u8], depth: usize) -> Self {
		Self { module: module.to_string(), data, depth }
	}

	fn decode<T: Decode>(&mut self) -> Result<T, Error> {
		Ok(T::decode(&mut self.data)?)
	}

	fn read_byte(&mut self) -> Result<u8, Error> {
		self.decode::<u8>()
	}

	fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, Error> {
		if self.data.len() < len {
			return Err(Error::Codec("Not enough data to fill buffer".into()));
		}
		let (bytes, rest) = self.data.split_at(len);
		self.data = rest;
		Ok(bytes.to_vec())
	}

	/// Length prefix of a sequence.
	fn scale_length(&mut self) -> Result<usize, Error> {
		let len: Compact<u32> = self.decode()?;
		Ok(len.0 as usize)
	}

	pub(super) fn remaining(&self) -> usize {
		self.data.len()
	}
}

impl CallDecoder {
	/// Decode the arguments of a call from their SCALE encoding.
	pub(super) fn decode_args(&self, module: &str, args_def: &ArgsDef, data: &[u8]) -> Result<Vec<FieldValue>, Error> {
		let mut state = DecodeState::new(module, data);
		let args = self.decode_fields(&mut state, args_def)?;
		if state.remaining() > 0 {
			log::warn!("{} bytes left over after decoding arguments in module `{}`", state.remaining(), module);
		}
		Ok(args)
	}

	fn decode_fields(&self, state: &mut DecodeState, args_def: &ArgsDef) -> Result<Vec<FieldValue>, Error> {
		args_def
			.iter()
			.map(|(name, ty)| {
				log::trace!("Decoding argument {} as {}", name, ty);
				Ok(FieldValue::new(name, self.decode_single(state, ty, false)?))
			})
			.collect()
	}

	fn decode_single(&self, state: &mut DecodeState, ty: &RustTypeMarker, is_compact: bool) -> Result<SubstrateType, Error> {
		if state.depth >= MAX_DEPTH {
			return Err(Error::DepthLimit(MAX_DEPTH));
		}
		state.depth += 1;
		let value = self.decode_marker(state, ty, is_compact);
		state.depth -= 1;
		value
	}

	fn decode_marker(&self, state: &mut DecodeState, ty: &RustTypeMarker, is_compact: bool) -> Result<SubstrateType, Error> {
		let ty = match ty {
			RustTypeMarker::TypePointer(v) => {
				log::trace!("Resolving: {}", v);

				if let Some(t) = self.decode_sub_type(state, v, is_compact)? {
					t
				} else {
					let new_type = self
						.types
						.get(&state.module, v)
						.ok_or_else(|| Error::NameResolution { module: state.module.clone(), ty: v.clone() })?;
					log::trace!("Resolved {}", new_type);
					let saved = state.data;
					match self.decode_single(state, new_type, is_compact) {
						Err(e) if !matches!(e, Error::DepthLimit(_)) => match self.types.try_fallback(&state.module, v) {
							Some(fallback) => {
								log::trace!("Falling back to type: {}", fallback);
								state.data = saved;
								self.decode_single(state, fallback, is_compact)?
							}
							None => return Err(e),
						},
						resolved => resolved?,
					}
				}
			}
			RustTypeMarker::Struct(fields) => {
				// a compact struct is a wrapper around a single number
				let fields = fields
					.iter()
					.map(|f| Ok(FieldValue::new(f.name.as_str(), self.decode_single(state, &f.ty, is_compact)?)))
					.collect::<Result<Vec<_>, Error>>()?;
				SubstrateType::Struct(fields)
			}
			RustTypeMarker::Set(fields) => {
				let bits = state.read_byte()?;
				let names = fields.iter().filter(|f| f.num & bits != 0).map(|f| f.name.clone()).collect();
				SubstrateType::Set(SetValue::new(bits, names))
			}
			RustTypeMarker::Tuple(types) => {
				let values =
					types.iter().map(|t| self.decode_single(state, t, false)).collect::<Result<Vec<_>, Error>>()?;
				SubstrateType::Composite(values)
			}
			RustTypeMarker::Enum(variants) => {
				let index = state.read_byte()?;
				let variant = variants
					.get(index as usize)
					.ok_or_else(|| Error::InvalidVariant { index, ty: ty.to_string() })?;
				let value = variant.value.as_ref().map(|v| self.decode_single(state, v, false)).transpose()?;
				SubstrateType::Enum(VariantValue::new(variant.name.as_str(), index, value))
			}
			RustTypeMarker::Array { size, ty } => {
				let values = (0..*size).map(|_| self.decode_single(state, ty, false)).collect::<Result<Vec<_>, Error>>()?;
				SubstrateType::Composite(values)
			}
			RustTypeMarker::Std(v) => match v {
				CommonTypes::Vec(v) => {
					let length = state.scale_length()?;
					log::trace!("Vec of length {}", length);
					let mut values = Vec::new();
					for _ in 0..length {
						let before = state.remaining();
						values.push(self.decode_single(state, v, false)?);
						if before == state.remaining() && length > MAX_EMPTY_ELEMENTS {
							return Err(Error::SequenceLength { len: length, ty: v.to_string() });
						}
					}
					SubstrateType::Sequence(values)
				}
				CommonTypes::Option(v) => match state.read_byte()? {
					0x00 => SubstrateType::Option(Box::new(None)),
					0x01 => SubstrateType::Option(Box::new(Some(self.decode_single(state, v, false)?))),
					index => return Err(Error::InvalidVariant { index, ty: ty.to_string() }),
				},
				CommonTypes::Result(v, e) => match state.read_byte()? {
					0x00 => SubstrateType::Result(Box::new(Ok(self.decode_single(state, v, false)?))),
					0x01 => SubstrateType::Result(Box::new(Err(self.decode_single(state, e, false)?))),
					index => return Err(Error::InvalidVariant { index, ty: ty.to_string() }),
				},
				CommonTypes::Compact(v) => self.decode_single(state, v, true)?,
			},
			RustTypeMarker::Generic(outer, _) => self.decode_single(state, outer, is_compact)?,
			RustTypeMarker::U8 => decode_unsigned::<u8>(state, is_compact)?,
			RustTypeMarker::U16 => decode_unsigned::<u16>(state, is_compact)?,
			RustTypeMarker::U32 => decode_unsigned::<u32>(state, is_compact)?,
			RustTypeMarker::U64 => decode_unsigned::<u64>(state, is_compact)?,
			RustTypeMarker::U128 => decode_unsigned::<u128>(state, is_compact)?,
			RustTypeMarker::I8 => decode_signed::<i8>(state, is_compact)?,
			RustTypeMarker::I16 => decode_signed::<i16>(state, is_compact)?,
			RustTypeMarker::I32 => decode_signed::<i32>(state, is_compact)?,
			RustTypeMarker::I64 => decode_signed::<i64>(state, is_compact)?,
			RustTypeMarker::I128 => decode_signed::<i128>(state, is_compact)?,
			RustTypeMarker::Bool => SubstrateType::Bool(state.decode()?),
			RustTypeMarker::Null => SubstrateType::Null,
		};
		Ok(ty)
	}

	/// Types decoded without the help of type definitions.
	fn decode_sub_type(&self, state: &mut DecodeState, ty: &str, is_compact: bool) -> Result<Option<SubstrateType>, Error> {
		let value = match ty {
			"AccountId" | "AccountId32" | "GenericAccountId" => SubstrateType::AccountId(state.decode::<AccountId32>()?),
			"MultiAddress" | "GenericMultiAddress" => SubstrateType::Address(state.decode::<MultiAddress>()?),
			"H160" => SubstrateType::H160(state.decode::<H160>()?),
			"H256" => SubstrateType::H256(state.decode::<H256>()?),
			"H512" => SubstrateType::H512(state.decode::<H512>()?),
			"Bytes" => SubstrateType::Bytes(state.decode::<Vec<u8>>()?),
			"Text" | "String" | "Str" => SubstrateType::Text(state.decode::<String>()?),
			"Call" | "GenericCall" | "RuntimeCall" => self.decode_nested_call(state)?,
			"Data" => decode_identity_data(state)?,
			_ => return Ok(None),
		};
		if is_compact {
			log::warn!("{} cannot be compact, decoded it as is", ty);
		}
		Ok(Some(value))
	}

	pub(super) fn decode_nested_call(&self, state: &mut DecodeState) -> Result<SubstrateType, Error> {
		let call_index: CallIndex = state.decode()?;
		let function = self.registry.find(&call_index).ok_or(Error::UnknownNestedCall(call_index))?;
		log::trace!("Nested call {}.{}", function.section(), function.method());
		let args_def = resolve_args_def(Some(function.meta().as_ref()));

		let module = std::mem::replace(&mut state.module, function.section().to_string());
		let args = self.decode_fields(state, &args_def);
		state.module = module;

		Ok(SubstrateType::Call(NestedCall {
			call_index: *call_index.as_bytes(),
			section: function.section().to_string(),
			method: util::method_name(function.meta().name()),
			args: args?,
		}))
	}
}

fn decode_unsigned<T>(state: &mut DecodeState, is_compact: bool) -> Result<SubstrateType, Error>
where
	T: Decode + Into<SubstrateType>,
	Compact<T>: Decode,
{
	if is_compact {
		let n: Compact<T> = state.decode()?;
		let n: SubstrateType = n.0.into();
		Ok(n.compact())
	} else {
		Ok(state.decode::<T>()?.into())
	}
}

fn decode_signed<T>(state: &mut DecodeState, is_compact: bool) -> Result<SubstrateType, Error>
where
	T: Decode + Into<SubstrateType>,
{
	if is_compact {
		return Err(Error::from("Signed integers cannot be compact"));
	}
	Ok(state.decode::<T>()?.into())
}

/// `Data` of the identity pallet: `None`, up to 32 raw bytes, or one of four hashes.
/// The length of raw data is encoded in its variant index.
fn decode_identity_data(state: &mut DecodeState) -> Result<SubstrateType, Error> {
	let index = state.read_byte()?;
	let variant = match index {
		0 => VariantValue::new("None", index, None),
		1..=33 => {
			let bytes = state.read_bytes(index as usize - 1)?;
			let bytes = bytes.into_iter().map(SubstrateType::U8).collect();
			VariantValue::new("Raw", index, Some(SubstrateType::Composite(bytes)))
		}
		34..=37 => {
			let name = match index {
				34 => "BlakeTwo256",
				35 => "Sha256",
				36 => "Keccak256",
				_ => "ShaThree256",
			};
			VariantValue::new(name, index, Some(SubstrateType::H256(state.decode()?)))
		}
		_ => return Err(Error::InvalidVariant { index, ty: "Data".into() }),
	};
	Ok(SubstrateType::Enum(variant))
}
