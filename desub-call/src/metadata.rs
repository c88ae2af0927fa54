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


use crate::{util, CallIndex};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};

/// Methods of one module, by method name.
pub type Methods = HashMap<String, CallFunction>;
/// Methods of every module, by module name.
pub type ModulesWithMethods = HashMap<String, Methods>;

/// Metadata of a dispatchable function.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionMetadata {
	name: String,
	#[serde(default)]
	section: String,
	#[serde(default, alias = "args")]
	arguments: Vec<FunctionArgumentMetadata>,
	#[serde(default, alias = "docs")]
	documentation: Vec<String>,
}

impl FunctionMetadata {
	pub fn new<N: Into<String>, S: Into<String>>(name: N, section: S, arguments: Vec<FunctionArgumentMetadata>) -> Self {
		Self { name: name.into(), section: section.into(), arguments, documentation: Vec::new() }
	}

	pub fn with_documentation(mut self, documentation: Vec<String>) -> Self {
		self.documentation = documentation;
		self
	}

	pub(crate) fn in_section<S: Into<String>>(mut self, section: S) -> Self {
		self.section = section.into();
		self
	}

	/// Name of the function as declared in the runtime, i.e `transfer_keep_alive`.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn section(&self) -> &str {
		&self.section
	}

	/// All declared arguments, including `Origin` if there is one.
	pub fn arguments(&self) -> &[FunctionArgumentMetadata] {
		&self.arguments
	}

	pub fn documentation(&self) -> &[String] {
		&self.documentation
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArgumentMetadata {
	pub name: String,
	/// Declared type name, i.e `Compact<T::Balance>`
	#[serde(rename = "type")]
	pub ty: String,
}

impl FunctionArgumentMetadata {
	pub fn new<N: Into<String>, T: Into<String>>(name: N, ty: T) -> Self {
		Self { name: name.into(), ty: ty.into() }
	}
}

/// An entry of the [`CallRegistry`](crate::CallRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFunction {
	call_index: CallIndex,
	meta: Arc<FunctionMetadata>,
	method: String,
	section: String,
}

impl CallFunction {
	pub fn new<M, S>(call_index: CallIndex, meta: Arc<FunctionMetadata>, method: M, section: S) -> Self
	where
		M: Into<String>,
		S: Into<String>,
	{
		Self { call_index, meta, method: method.into(), section: section.into() }
	}

	/// Describe `meta` at `call_index`, naming it after the metadata.
	pub fn from_meta(call_index: CallIndex, meta: FunctionMetadata) -> Self {
		let method = util::method_name(meta.name());
		let section = meta.section().to_string();
		Self::new(call_index, Arc::new(meta), method, section)
	}

	pub fn call_index(&self) -> CallIndex {
		self.call_index
	}

	pub fn meta(&self) -> &Arc<FunctionMetadata> {
		&self.meta
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	pub fn section(&self) -> &str {
		&self.section
	}
}
