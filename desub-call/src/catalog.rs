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


//! Catalogs of the functions of a runtime, ready to be injected into a
//! [`CallRegistry`](crate::CallRegistry).
//!
//! Functions are read either from SCALE encoded runtime metadata (V12 and
//! V13) or from a JSON document of the form
//!
//! ```json
//! { "modules": [{ "name": "Balances", "index": 4, "calls": [{ "name": "transfer", "args": [] }] }] }
//! ```
//!
//! The call index of a function is the index of its module followed by the
//! position of the function within the module.

mod json;
mod legacy;

use crate::{util, CallFunction, CallIndex, FunctionMetadata, Methods, ModulesWithMethods};
use codec::Decode;
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED};
use std::convert::TryFrom;

pub use self::json::{CatalogModule, JsonCatalog};

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
	#[error(transparent)]
	Decode(#[from] codec::Error),
	#[error("Metadata Version {0} not supported")]
	NotSupported(u32),
	#[error("Expected Decoded")]
	ExpectedDecoded,
	#[error("Invalid metadata prefix 0x{0:08x}")]
	InvalidPrefix(u32),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	#[error("Module {0} has more calls than fit a call index")]
	TooManyCalls(String),
}

/// Read the functions of SCALE encoded [`RuntimeMetadataPrefixed`].
pub fn from_bytes(mut bytes: &[u8]) -> Result<ModulesWithMethods, MetadataError> {
	let metadata = RuntimeMetadataPrefixed::decode(&mut bytes)?;
	if metadata.0 != META_RESERVED {
		return Err(MetadataError::InvalidPrefix(metadata.0));
	}
	from_runtime_metadata(metadata.1)
}

pub fn from_runtime_metadata(metadata: RuntimeMetadata) -> Result<ModulesWithMethods, MetadataError> {
	log::debug!("Reading calls of metadata V{}", metadata.version());
	match metadata {
		RuntimeMetadata::V12(meta) => legacy::from_v12(meta),
		RuntimeMetadata::V13(meta) => legacy::from_v13(meta),
		_ => Err(MetadataError::NotSupported(metadata.version())),
	}
}

/// Read the functions of a JSON catalog.
pub fn from_json(json: &str) -> Result<ModulesWithMethods, MetadataError> {
	let catalog: JsonCatalog = serde_json::from_str(json)?;
	catalog.into_modules()
}

/// Index the functions of module `name`, which sits at `index`.
fn module_methods(name: &str, index: u8, functions: Vec<FunctionMetadata>) -> Result<Methods, MetadataError> {
	let section = util::section_name(name);
	functions
		.into_iter()
		.enumerate()
		.map(|(i, meta)| {
			let i = u8::try_from(i).map_err(|_| MetadataError::TooManyCalls(name.to_string()))?;
			let meta = meta.in_section(section.as_str());
			log::trace!("{}.{} at [{}, {}]", section, meta.name(), index, i);
			Ok((meta.name().to_string(), CallFunction::from_meta(CallIndex::new(index, i), meta)))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::Encode;
	use frame_metadata::{decode_different::DecodeDifferent, v11};

	#[test]
	fn should_reject_unsupported_versions() {
		let metadata = v11::RuntimeMetadataV11 {
			modules: DecodeDifferent::Decoded(Vec::new()),
			extrinsic: v11::ExtrinsicMetadata { version: 4, signed_extensions: Vec::new() },
		};
		let bytes = RuntimeMetadataPrefixed(META_RESERVED, RuntimeMetadata::V11(metadata)).encode();
		assert!(matches!(from_bytes(&bytes), Err(MetadataError::NotSupported(11))));
	}

	#[test]
	fn should_reject_garbage() {
		assert!(matches!(from_bytes(&[1, 2, 3]), Err(MetadataError::Decode(_))));
	}

	#[test]
	fn should_index_methods_in_order() {
		let functions = vec![FunctionMetadata::new("transfer", "", vec![]), FunctionMetadata::new("set_balance", "", vec![])];
		let methods = module_methods("Balances", 4, functions).unwrap();
		assert_eq!(methods["transfer"].call_index(), CallIndex::new(4, 0));
		assert_eq!(methods["set_balance"].call_index(), CallIndex::new(4, 1));
		assert_eq!(methods["set_balance"].section(), "balances");
		assert_eq!(methods["set_balance"].method(), "setBalance");
	}
}
