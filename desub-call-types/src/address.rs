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


use crate::util::{as_ss58, bytes_as_hex};
use codec::{Decode, Encode};
use serde::Serialize;
use sp_core::crypto::AccountId32;
use std::fmt;

/// Address of an account as the runtime accepts it in calls.
///
/// Encodes the same way as `sp_runtime::MultiAddress<AccountId32, u32>`.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize)]
pub enum MultiAddress {
	/// An account id.
	Id(#[serde(serialize_with = "as_ss58")] AccountId32),
	/// An index into the accounts registry.
	Index(#[codec(compact)] u32),
	/// Raw bytes of some unknown address format.
	Raw(#[serde(serialize_with = "bytes_as_hex")] Vec<u8>),
	/// A 32-byte address.
	Address32(#[serde(serialize_with = "bytes_as_hex")] [u8; 32]),
	/// A 20-byte address, for instance Ethereum style.
	Address20(#[serde(serialize_with = "bytes_as_hex")] [u8; 20]),
}

impl From<AccountId32> for MultiAddress {
	fn from(account: AccountId32) -> Self {
		MultiAddress::Id(account)
	}
}

impl fmt::Display for MultiAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MultiAddress::Id(id) => write!(f, "{}", id),
			MultiAddress::Index(i) => write!(f, "{}", i),
			MultiAddress::Raw(bytes) => write!(f, "0x{}", hex::encode(bytes)),
			MultiAddress::Address32(bytes) => write!(f, "0x{}", hex::encode(bytes)),
			MultiAddress::Address20(bytes) => write!(f, "0x{}", hex::encode(bytes)),
		}
	}
}
