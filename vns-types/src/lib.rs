#![cfg_attr(not(feature = "std"), no_std)]

//! Shared data types for the vns naming registry pallets.
//!
//! Kept deliberately thin: these are the types that cross pallet
//! boundaries (`vns-core` <-> `vns-resolvers`, and eventually an outer
//! runtime/RPC layer), so none of them may depend on a specific pallet's
//! `Config`.

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{pallet_prelude::RuntimeDebug, traits::ConstU32, BoundedVec};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// 32-byte node identifier of a position in the name tree.
///
/// The root node is 32 zero bytes. `H256` already carries the
/// `Encode`/`Decode`/`MaxEncodedLen` impls every pallet needs.
pub type DomainHash = sp_core::H256;

/// Maximum length, in bytes, of a label or an NFT metadata blob.
pub type MaxLabelLen = ConstU32<256>;

/// The data a registry attaches to a node on top of what the NFT layer
/// already tracks (owner, per-token approval). Stored as the `TokenData`
/// of the underlying NFT entry, exactly the way the registry pallet
/// layers its own fields on top of the generic NFT pallet's `owner` and
/// `metadata`.
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[derive(Encode, Decode, PartialEq, Eq, RuntimeDebug, Clone, Default, TypeInfo, MaxEncodedLen)]
pub struct Record<Moment> {
    /// Application id of the resolver presently serving this node, 0 if
    /// none has been set.
    pub resolver: u64,
    /// Client-suggested cache TTL, seconds.
    pub ttl: u64,
    /// Block-time the underlying NFT was minted.
    pub registration_date: Moment,
    /// Raw label bytes this node was minted for (empty for the root).
    pub label: BoundedVec<u8, MaxLabelLen>,
}

/// A pre-registration bid tracked by the RSVP engine.
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[derive(Encode, Decode, PartialEq, Eq, RuntimeDebug, Clone, TypeInfo, MaxEncodedLen)]
pub struct Reservation<AccountId, Balance> {
    pub owner: AccountId,
    pub length: u16,
    pub price: Balance,
    pub name: BoundedVec<u8, MaxLabelLen>,
}

/// Collapsed `Ownable`/`Stakeable`/`Upgradeable`/`Deployable` mixin: one
/// administration record per contract instead of one per inherited
/// mixin. See `vns-core::admin`.
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[derive(Encode, Decode, PartialEq, Eq, RuntimeDebug, Clone, TypeInfo, MaxEncodedLen)]
pub struct AdminInfo<AccountId> {
    pub owner: AccountId,
    pub upgrader: AccountId,
    pub delegate: AccountId,
    pub updatable: bool,
    pub contract_version: u32,
    pub deployment_version: u32,
    pub stakeable: bool,
}

#[test]
fn record_defaults_to_zero_resolver() {
    let record: Record<u64> = Record::default();
    assert_eq!(record.resolver, 0);
    assert_eq!(record.ttl, 0);
}
