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


//! Dispatch of the accepted call shapes and decoding of their arguments.
//!
//! A call is either hex, raw bytes, or already structured (a [`GenericCall`]
//! or JSON). Whatever the shape, the first step normalizes it into a
//! [`DecodedMethod`]: the call index, the metadata of the function and its
//! decode plan. The arguments are decoded from that bundle afterwards.

mod json;
mod scale;

use crate::{resolve_args_def, ArgsDef, CallIndex, CallRegistry, Error, FunctionMetadata, GenericCall};
use desub_call_types::{util::decode_hex, FieldValue, TypeDetective};
use serde_json::Value;
use std::{convert::TryFrom, sync::Arc};

/// A call in one of the shapes the decoder accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum CallInput {
	/// `0x` prefixed hex of the call index followed by the encoded arguments.
	Hex(String),
	/// The call index followed by the encoded arguments.
	Bytes(Vec<u8>),
	/// A call that is already decoded.
	Call(GenericCall),
	/// `{ "callIndex": .., "args": .. }`, args either by name or in order.
	Json(Value),
}

impl CallInput {
	/// Pick the shape of a JSON value.
	///
	/// Strings are hex, arrays of numbers are bytes, and objects need a
	/// `callIndex` and `args`. Anything else is an [`Error::DecodeShape`].
	pub fn from_json(value: Value) -> Result<Self, Error> {
		let is_structured =
			matches!(&value, Value::Object(o) if o.contains_key("callIndex") && o.contains_key("args"));
		match value {
			Value::String(s) => Ok(CallInput::Hex(s)),
			Value::Array(ref arr) => arr
				.iter()
				.map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
				.collect::<Option<Vec<u8>>>()
				.map(CallInput::Bytes)
				.ok_or_else(|| Error::DecodeShape(value.to_string())),
			Value::Object(_) if is_structured => Ok(CallInput::Json(value)),
			other => Err(Error::DecodeShape(other.to_string())),
		}
	}
}

impl From<&str> for CallInput {
	fn from(hex: &str) -> Self {
		CallInput::Hex(hex.to_string())
	}
}

impl From<String> for CallInput {
	fn from(hex: String) -> Self {
		CallInput::Hex(hex)
	}
}

impl From<Vec<u8>> for CallInput {
	fn from(bytes: Vec<u8>) -> Self {
		CallInput::Bytes(bytes)
	}
}

impl From<&[u8]> for CallInput {
	fn from(bytes: &[u8]) -> Self {
		CallInput::Bytes(bytes.to_vec())
	}
}

impl From<GenericCall> for CallInput {
	fn from(call: GenericCall) -> Self {
		CallInput::Call(call)
	}
}

/// Arguments of a call before they are turned into values.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArgs {
	/// SCALE encoded arguments.
	Encoded(Vec<u8>),
	/// Decoded arguments, by name.
	Decoded(Vec<FieldValue>),
	/// JSON arguments, an object by name or an array in order.
	Json(Value),
}

/// A call with its function resolved but its arguments not yet decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMethod {
	pub args: RawArgs,
	pub call_index: CallIndex,
	pub args_def: ArgsDef,
	pub meta: Option<Arc<FunctionMetadata>>,
}

impl DecodedMethod {
	fn new(args: RawArgs, call_index: CallIndex, meta: Option<Arc<FunctionMetadata>>) -> Self {
		let args_def = resolve_args_def(meta.as_deref());
		Self { args, call_index, args_def, meta }
	}
}

/// Decodes calls against the functions of a [`CallRegistry`].
#[derive(Debug)]
pub struct CallDecoder {
	registry: Arc<CallRegistry>,
	types: Box<dyn TypeDetective>,
}

impl Clone for CallDecoder {
	fn clone(&self) -> Self {
		Self { registry: self.registry.clone(), types: dyn_clone::clone_box(&*self.types) }
	}
}

impl CallDecoder {
	/// Create a new decoder for the functions of `registry`, with `types` to resolve type names.
	pub fn new(registry: Arc<CallRegistry>, types: impl TypeDetective + 'static) -> Self {
		Self { registry, types: Box::new(types) }
	}

	pub fn registry(&self) -> &Arc<CallRegistry> {
		&self.registry
	}

	/// Resolve the call index, metadata and decode plan of a call.
	///
	/// `meta` takes priority over the metadata registered for the call index.
	/// An unknown call index is not an error: the metadata is `None` and the
	/// decode plan is empty.
	pub fn decode_method(&self, input: CallInput, meta: Option<Arc<FunctionMetadata>>) -> Result<DecodedMethod, Error> {
		match input {
			CallInput::Hex(hex) => {
				log::trace!("Decoding call from hex {}", hex);
				let bytes = decode_hex(&hex).ok_or_else(|| Error::DecodeShape(format!("`{}` (not hex)", hex)))?;
				self.decode_method(CallInput::Bytes(bytes), meta)
			}
			CallInput::Bytes(bytes) => {
				if bytes.len() < 2 {
					return Err(Error::MalformedCallIndex(bytes.len()));
				}
				let (index, args) = bytes.split_at(2);
				let call_index = CallIndex::try_from(index)?;
				let meta = self.resolve_meta(&call_index, meta);
				Ok(DecodedMethod::new(RawArgs::Encoded(args.to_vec()), call_index, meta))
			}
			CallInput::Call(call) => {
				let (call_index, args, _) = call.into_parts();
				let meta = self.resolve_meta(&call_index, meta);
				Ok(DecodedMethod::new(RawArgs::Decoded(args), call_index, meta))
			}
			CallInput::Json(value) => {
				let (call_index, args) = match value {
					Value::Object(mut obj) => match (obj.remove("callIndex"), obj.remove("args")) {
						(Some(call_index), Some(args)) => (CallIndex::from_json(&call_index)?, args),
						_ => return Err(Error::DecodeShape(Value::Object(obj).to_string())),
					},
					other => return Err(Error::DecodeShape(other.to_string())),
				};
				let meta = self.resolve_meta(&call_index, meta);
				Ok(DecodedMethod::new(RawArgs::Json(args), call_index, meta))
			}
		}
	}

	/// Decode a call into a [`GenericCall`].
	pub fn decode_call(&self, input: CallInput, meta: Option<Arc<FunctionMetadata>>) -> Result<GenericCall, Error> {
		let DecodedMethod { args, call_index, args_def, meta } = self.decode_method(input, meta)?;
		let module = meta.as_ref().map(|m| m.section().to_string()).unwrap_or_default();
		log::debug!("Decoding arguments of {} in module `{}`", call_index, module);

		let args = match args {
			RawArgs::Encoded(bytes) => self.decode_args(&module, &args_def, &bytes)?,
			RawArgs::Decoded(values) => take_by_name(&args_def, values)?,
			RawArgs::Json(json) => self.args_from_json(&module, &args_def, &json)?,
		};
		Ok(GenericCall::new(call_index, args, meta))
	}

	fn resolve_meta(&self, call_index: &CallIndex, meta: Option<Arc<FunctionMetadata>>) -> Option<Arc<FunctionMetadata>> {
		meta.or_else(|| {
			let found = self.registry.find(call_index).map(|f| f.meta().clone());
			if found.is_none() {
				log::debug!("No function registered at {}", call_index);
			}
			found
		})
	}
}

/// Order already decoded values after the decode plan.
fn take_by_name(args_def: &ArgsDef, mut values: Vec<FieldValue>) -> Result<Vec<FieldValue>, Error> {
	args_def
		.names()
		.map(|name| {
			let pos = values.iter().position(|v| v.name == name).ok_or_else(|| Error::MissingArgument(name.into()))?;
			Ok(values.swap_remove(pos))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_suite;
	use desub_call_types::{MultiAddress, SubstrateType};
	use sp_core::crypto::AccountId32;

	fn decoder() -> CallDecoder {
		let registry = Arc::new(CallRegistry::new());
		registry.inject(test_suite::all_modules());
		CallDecoder::new(registry, test_suite::TestTypes::new())
	}

	fn transfer_bytes() -> Vec<u8> {
		let mut bytes = vec![4, 0];
		bytes.push(0);
		bytes.extend_from_slice(&[7; 32]);
		// compact 1_000
		bytes.extend_from_slice(&[0xa1, 0x0f]);
		bytes
	}

	#[test]
	fn should_dispatch_on_bytes() {
		let method = decoder().decode_method(CallInput::Bytes(transfer_bytes()), None).unwrap();
		assert_eq!(method.call_index, CallIndex::new(4, 0));
		assert_eq!(method.args, RawArgs::Encoded(transfer_bytes()[2..].to_vec()));
		assert_eq!(method.args_def.names().collect::<Vec<_>>(), vec!["dest", "value"]);
		assert_eq!(method.meta.unwrap().name(), "transfer");
	}

	#[test]
	fn should_treat_hex_like_bytes() {
		let decoder = decoder();
		let hex = format!("0x{}", hex::encode(transfer_bytes()));
		let from_hex = decoder.decode_method(CallInput::Hex(hex), None).unwrap();
		let from_bytes = decoder.decode_method(CallInput::Bytes(transfer_bytes()), None).unwrap();
		assert_eq!(from_hex, from_bytes);
	}

	#[test]
	fn should_reject_bad_shapes() {
		let decoder = decoder();
		assert!(matches!(decoder.decode_method("0400".into(), None), Err(Error::DecodeShape(_))));
		assert!(matches!(decoder.decode_method("0xnothex".into(), None), Err(Error::DecodeShape(_))));
		assert!(matches!(decoder.decode_method(vec![4u8].into(), None), Err(Error::MalformedCallIndex(1))));
		assert!(matches!(CallInput::from_json(serde_json::json!(4)), Err(Error::DecodeShape(_))));
		assert!(matches!(CallInput::from_json(serde_json::json!({ "args": [] })), Err(Error::DecodeShape(_))));
		assert!(matches!(CallInput::from_json(serde_json::json!(["a"])), Err(Error::DecodeShape(_))));
	}

	#[test]
	fn should_pick_shape_of_json() {
		assert_eq!(CallInput::from_json(serde_json::json!("0x0400")).unwrap(), CallInput::Hex("0x0400".into()));
		assert_eq!(CallInput::from_json(serde_json::json!([4, 0])).unwrap(), CallInput::Bytes(vec![4, 0]));
		let structured = serde_json::json!({ "callIndex": [4, 0], "args": {} });
		assert_eq!(CallInput::from_json(structured.clone()).unwrap(), CallInput::Json(structured));
	}

	#[test]
	fn should_ignore_bytes_after_the_last_argument() {
		let mut bytes = transfer_bytes();
		bytes.push(0xff);
		let call = decoder().decode_call(bytes.into(), None).unwrap();
		assert_eq!(call.args().len(), 2);
		assert_eq!(call.data(), transfer_bytes()[2..].to_vec());
	}

	#[test]
	fn should_degrade_unknown_calls() {
		let call = decoder().decode_call(vec![99u8, 99, 1, 2, 3].into(), None).unwrap();
		assert!(call.meta().is_none());
		assert!(call.args().is_empty());
		assert!(call.args_def().is_empty());
		assert!(!call.has_origin());
	}

	#[test]
	fn should_prefer_supplied_metadata() {
		let meta = Arc::new(FunctionMetadata::new(
			"remark",
			"system",
			vec![crate::FunctionArgumentMetadata::new("remark", "Bytes")],
		));
		let call = decoder().decode_call(vec![4u8, 0, 4, 0xff].into(), Some(meta.clone())).unwrap();
		assert_eq!(call.meta(), Some(&meta));
		assert_eq!(call.arg("remark"), Some(&SubstrateType::Bytes(vec![0xff])));
	}

	#[test]
	fn should_take_decoded_args_by_name() {
		let decoder = decoder();
		let call = decoder.decode_call(transfer_bytes().into(), None).unwrap();
		let mut args = call.arguments().to_vec();
		args.reverse();
		let reordered = GenericCall::new(*call.call_index(), args, None);
		let call_again = decoder.decode_call(reordered.into(), None).unwrap();
		assert_eq!(call_again, call);

		let missing = GenericCall::new(
			CallIndex::new(4, 0),
			vec![FieldValue::new("dest", MultiAddress::Id(AccountId32::new([7; 32])).into())],
			None,
		);
		assert!(matches!(decoder.decode_call(missing.into(), None), Err(Error::MissingArgument(name)) if name == "value"));
	}
}
