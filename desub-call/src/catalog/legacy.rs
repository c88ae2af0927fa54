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


use super::{module_methods, MetadataError};
use crate::{FunctionArgumentMetadata, FunctionMetadata, ModulesWithMethods};
use frame_metadata::{decode_different::DecodeDifferent, v12, v13};
use std::collections::HashMap;

fn convert<B: 'static, O: 'static>(dd: DecodeDifferent<B, O>) -> Result<O, MetadataError> {
	match dd {
		DecodeDifferent::Decoded(value) => Ok(value),
		_ => Err(MetadataError::ExpectedDecoded),
	}
}

macro_rules! from_legacy {
	($fn_name:ident, $version:ident, $metadata:ident) => {
		pub(super) fn $fn_name(metadata: $version::$metadata) -> Result<ModulesWithMethods, MetadataError> {
			let mut modules = HashMap::new();
			for module in convert(metadata.modules)?.into_iter() {
				let name = convert(module.name)?;
				let calls = match module.calls {
					Some(calls) => convert(calls)?,
					None => continue,
				};
				let functions = calls
					.into_iter()
					.map(|call| {
						let arguments = convert(call.arguments)?
							.into_iter()
							.map(|arg| Ok(FunctionArgumentMetadata::new(convert(arg.name)?, convert(arg.ty)?)))
							.collect::<Result<Vec<_>, MetadataError>>()?;
						let documentation = convert(call.documentation)?;
						Ok(FunctionMetadata::new(convert(call.name)?, "", arguments).with_documentation(documentation))
					})
					.collect::<Result<Vec<_>, MetadataError>>()?;
				let methods = module_methods(&name, module.index, functions)?;
				modules.insert(name, methods);
			}
			Ok(modules)
		}
	};
}

from_legacy!(from_v12, v12, RuntimeMetadataV12);
from_legacy!(from_v13, v13, RuntimeMetadataV13);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{catalog, CallIndex};
	use codec::Encode;
	use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED};

	fn transfer() -> v13::FunctionMetadata {
		v13::FunctionMetadata {
			name: DecodeDifferent::Decoded("transfer".into()),
			arguments: DecodeDifferent::Decoded(vec![
				v13::FunctionArgumentMetadata {
					name: DecodeDifferent::Decoded("dest".into()),
					ty: DecodeDifferent::Decoded("<T::Lookup as StaticLookup>::Source".into()),
				},
				v13::FunctionArgumentMetadata {
					name: DecodeDifferent::Decoded("value".into()),
					ty: DecodeDifferent::Decoded("Compact<T::Balance>".into()),
				},
			]),
			documentation: DecodeDifferent::Decoded(vec![" Transfer some liquid free balance.".into()]),
		}
	}

	fn module(name: &str, index: u8, calls: Option<Vec<v13::FunctionMetadata>>) -> v13::ModuleMetadata {
		v13::ModuleMetadata {
			name: DecodeDifferent::Decoded(name.into()),
			storage: None,
			calls: calls.map(DecodeDifferent::Decoded),
			event: None,
			constants: DecodeDifferent::Decoded(Vec::new()),
			errors: DecodeDifferent::Decoded(Vec::new()),
			index,
		}
	}

	fn metadata() -> v13::RuntimeMetadataV13 {
		v13::RuntimeMetadataV13 {
			modules: DecodeDifferent::Decoded(vec![
				module("System", 0, Some(Vec::new())),
				module("Timestamp", 3, None),
				module("Balances", 4, Some(vec![transfer()])),
			]),
			extrinsic: v13::ExtrinsicMetadata { version: 4, signed_extensions: Vec::new() },
		}
	}

	#[test]
	fn should_read_calls_of_v13() {
		let encoded = RuntimeMetadataPrefixed(META_RESERVED, RuntimeMetadata::V13(metadata())).encode();
		let modules = catalog::from_bytes(&encoded).unwrap();
		assert!(!modules.contains_key("Timestamp"));
		assert!(modules["System"].is_empty());

		let transfer = &modules["Balances"]["transfer"];
		assert_eq!(transfer.call_index(), CallIndex::new(4, 0));
		assert_eq!(transfer.section(), "balances");
		assert_eq!(transfer.meta().arguments()[1].ty, "Compact<T::Balance>");
		assert_eq!(transfer.meta().documentation(), &[" Transfer some liquid free balance.".to_string()]);
	}

	#[test]
	fn should_reject_wrong_prefix() {
		let encoded = RuntimeMetadataPrefixed(0x1234, RuntimeMetadata::V13(metadata())).encode();
		assert!(matches!(catalog::from_bytes(&encoded), Err(MetadataError::InvalidPrefix(0x1234))));
	}

	#[test]
	fn should_expect_decoded_metadata() {
		let mut meta = metadata();
		meta.modules = DecodeDifferent::Encode(&[]);
		assert!(matches!(from_v13(meta), Err(MetadataError::ExpectedDecoded)));
	}
}
