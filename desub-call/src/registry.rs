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


use crate::{CallFunction, CallIndex, ModulesWithMethods};
use parking_lot::RwLock;
use std::{
	collections::{HashMap, HashSet},
	sync::Arc,
};

/// Functions of the runtime by call index.
///
/// Shared behind an `Arc` by every decoder of a session. Entries are only
/// ever replaced by a later [`CallRegistry::inject`].
#[derive(Debug, Default)]
pub struct CallRegistry {
	functions: RwLock<HashMap<CallIndex, Arc<CallFunction>>>,
}

impl CallRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register every function of `modules`, replacing entries with the same call index.
	/// Entries that `modules` does not mention are kept.
	///
	/// Modules are applied in order of their names, and methods in order of theirs,
	/// so when two functions of one injection share a call index the last one wins.
	pub fn inject(&self, modules: ModulesWithMethods) {
		let mut modules: Vec<_> = modules
			.into_iter()
			.map(|(module, methods)| {
				let mut methods: Vec<_> = methods.into_iter().collect();
				methods.sort_by(|a, b| a.0.cmp(&b.0));
				(module, methods)
			})
			.collect();
		modules.sort_by(|a, b| a.0.cmp(&b.0));

		let mut functions = self.functions.write();
		let mut injected = HashSet::new();
		for (module, methods) in modules {
			for (method, function) in methods {
				let call_index = function.call_index();
				log::trace!("Injecting {}.{} at {}", module, method, call_index);
				if !injected.insert(call_index) {
					log::warn!("{}.{} replaces another function injected at {}", module, method, call_index);
				}
				functions.insert(call_index, Arc::new(function));
			}
		}
		log::debug!("Injected {} functions, {} registered", injected.len(), functions.len());
	}

	/// The function registered at `call_index`, `None` if it is unknown.
	pub fn find(&self, call_index: &CallIndex) -> Option<Arc<CallFunction>> {
		self.functions.read().get(call_index).cloned()
	}

	pub fn len(&self) -> usize {
		self.functions.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.functions.read().is_empty()
	}

	/// Forget every function, i.e when switching to another chain.
	pub fn clear(&self) {
		self.functions.write().clear();
	}
}
