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
use crate::{FunctionMetadata, ModulesWithMethods};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, convert::TryFrom};

/// Functions of a runtime as a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsonCatalog {
	pub modules: Vec<CatalogModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogModule {
	pub name: String,
	/// Index of the module in the call enum. Without it, the module is
	/// indexed by its position among the modules that have calls.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub index: Option<u8>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub calls: Option<Vec<FunctionMetadata>>,
}

impl JsonCatalog {
	pub fn into_modules(self) -> Result<ModulesWithMethods, MetadataError> {
		let mut modules = HashMap::new();
		let mut position = 0usize;
		for module in self.modules.into_iter() {
			let calls = match module.calls {
				Some(calls) => calls,
				None => continue,
			};
			let index = match module.index {
				Some(index) => index,
				None => u8::try_from(position).map_err(|_| MetadataError::TooManyCalls(module.name.clone()))?,
			};
			position += 1;
			let methods = module_methods(&module.name, index, calls)?;
			modules.insert(module.name, methods);
		}
		Ok(modules)
	}
}
