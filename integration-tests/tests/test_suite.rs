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


use desub_call::{catalog, CallDecoder, CallRegistry, TypeResolver};
use std::sync::Arc;

pub const CATALOG: &str = include_str!("../data/catalog.json");

pub fn init() {
	let _ = pretty_env_logger::try_init();
}

pub fn registry() -> Arc<CallRegistry> {
	let registry = Arc::new(CallRegistry::new());
	registry.inject(catalog::from_json(CATALOG).expect("catalog should be valid JSON"));
	registry
}

pub fn decoder() -> CallDecoder {
	CallDecoder::new(registry(), TypeResolver::default())
}

/// `balances.transfer` to the account of `[7; 32]`, 1_000 units.
pub fn transfer() -> Vec<u8> {
	let mut call = vec![4, 0, 0];
	call.extend_from_slice(&[7; 32]);
	// compact 1_000
	call.extend_from_slice(&[0xa1, 0x0f]);
	call
}
