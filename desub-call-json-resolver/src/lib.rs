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


//! A [`TypeDetective`](desub_call_types::TypeDetective) backed by polkadot-js
//! style JSON type definitions.

#![forbid(unsafe_code)]

mod error;
mod modules;
mod resolver;

pub use self::error::Error;
pub use self::modules::{ModuleTypes, Modules};
pub use self::resolver::{Builder, TypeResolver};

pub type Result<T, E = Error> = std::result::Result<T, E>;
