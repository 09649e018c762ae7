#![cfg_attr(not(feature = "std"), no_std)]

//! # Versioned resolver
//!
//! An attribute store keyed by `(version, node[, suffix])`. `node`'s
//! version starts at 0 and is bumped by `clear_records`, which
//! logically invalidates every entry written under the old version
//! without touching storage — reads for the new version simply fall
//! through to defaults until it's repopulated. Every write is gated on
//! `RegistryChecker::check_node_useable`, which is how this pallet asks
//! the Registry "is `who` still this node's owner" without depending on
//! `vns-core` directly.
//!
//! ### Module functions
//!
//! - `set_addr` / `set_address` - default-coin / multi-coin address records
//! - `set_text` - arbitrary key/value text records
//! - `set_name` - reverse (node -> name) record
//! - `clear_records` - bump a node's version, invalidating prior entries

extern crate alloc;

pub use pallet::*;

mod traits;
pub use traits::RegistryChecker;

pub mod keys;

#[cfg(feature = "runtime-benchmarks")]
pub mod benchmarks;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_std::vec::Vec;
    use vns_types::{DomainHash, MaxLabelLen};

    pub type TextValue = BoundedVec<u8, MaxLabelLen>;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type WeightInfo: WeightInfo;

        type RegistryChecker: RegistryChecker<Hash = DomainHash, AccountId = Self::AccountId>;
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T>(_);

    /// `node -> current version`. Defaults to 0; every `clear_records`
    /// bumps it by one.
    #[pallet::storage]
    pub type RecordVersions<T: Config> = StorageMap<_, Twox64Concat, DomainHash, u64, ValueQuery>;

    /// Default-coin address, keyed `(version, node)`.
    #[pallet::storage]
    pub type Addresses<T: Config> =
        StorageDoubleMap<_, Twox64Concat, u64, Twox64Concat, DomainHash, T::AccountId>;

    /// Multi-coin address, keyed `(version, node, coin_type)`.
    #[pallet::storage]
    pub type CoinAddresses<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Twox64Concat, u64>,
            NMapKey<Twox64Concat, DomainHash>,
            NMapKey<Twox64Concat, u64>,
        ),
        T::AccountId,
    >;

    /// Text record, keyed `(version, node, 22-byte key)`.
    #[pallet::storage]
    pub type Texts<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Twox64Concat, u64>,
            NMapKey<Twox64Concat, DomainHash>,
            NMapKey<Twox64Concat, [u8; 22]>,
        ),
        TextValue,
    >;

    /// Reverse (node -> human name) record, keyed `(version, node)`.
    #[pallet::storage]
    pub type Names<T: Config> =
        StorageDoubleMap<_, Twox64Concat, u64, Twox64Concat, DomainHash, TextValue>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        AddrChanged { node: DomainHash, addr: T::AccountId },
        AddressChanged { node: DomainHash, coin_type: u64, addr: T::AccountId },
        TextChanged { node: DomainHash, key: [u8; 22], value: TextValue },
        NameChanged { node: DomainHash, name: TextValue },
        VersionChanged { node: DomainHash, new_version: u64 },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// `RegistryChecker::check_node_useable` refused this caller.
        InvalidPermission,
        /// Value exceeds the 256-byte cap.
        ValueTooLong,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_addr())]
        pub fn set_addr(origin: OriginFor<T>, node: DomainHash, addr: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(
                T::RegistryChecker::check_node_useable(node, &who),
                Error::<T>::InvalidPermission
            );

            let version = RecordVersions::<T>::get(node);
            Addresses::<T>::insert(version, node, addr.clone());
            Self::deposit_event(Event::AddrChanged { node, addr });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_address())]
        pub fn set_address(
            origin: OriginFor<T>,
            node: DomainHash,
            coin_type: u64,
            addr: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(
                T::RegistryChecker::check_node_useable(node, &who),
                Error::<T>::InvalidPermission
            );

            let version = RecordVersions::<T>::get(node);
            CoinAddresses::<T>::insert((version, node, coin_type), addr.clone());
            Self::deposit_event(Event::AddressChanged { node, coin_type, addr });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_text(value.len() as u32))]
        pub fn set_text(
            origin: OriginFor<T>,
            node: DomainHash,
            key: [u8; 22],
            value: Vec<u8>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(
                T::RegistryChecker::check_node_useable(node, &who),
                Error::<T>::InvalidPermission
            );
            let value: TextValue = value.try_into().map_err(|_| Error::<T>::ValueTooLong)?;

            let version = RecordVersions::<T>::get(node);
            Texts::<T>::insert((version, node, key), value.clone());
            Self::deposit_event(Event::TextChanged { node, key, value });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_name(name.len() as u32))]
        pub fn set_name(origin: OriginFor<T>, node: DomainHash, name: Vec<u8>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(
                T::RegistryChecker::check_node_useable(node, &who),
                Error::<T>::InvalidPermission
            );
            let name: TextValue = name.try_into().map_err(|_| Error::<T>::ValueTooLong)?;

            let version = RecordVersions::<T>::get(node);
            Names::<T>::insert(version, node, name.clone());
            Self::deposit_event(Event::NameChanged { node, name });
            Ok(())
        }

        /// Bump `node`'s version, logically invalidating every record
        /// written under the old one. Old rows are left as orphans —
        /// they become unreachable once the version counter advances,
        /// not deleted.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::clear_records())]
        pub fn clear_records(origin: OriginFor<T>, node: DomainHash) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(
                T::RegistryChecker::check_node_useable(node, &who),
                Error::<T>::InvalidPermission
            );

            let new_version = RecordVersions::<T>::mutate(node, |v| {
                *v += 1;
                *v
            });
            Self::deposit_event(Event::VersionChanged { node, new_version });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        /// `getAddr`: default-coin address at `node`'s current version,
        /// `None` if never set (or cleared since).
        pub fn addr_of(node: DomainHash) -> Option<T::AccountId> {
            Addresses::<T>::get(RecordVersions::<T>::get(node), node)
        }

        /// `getAddress`: multi-coin address at `node`'s current version.
        pub fn address_of(node: DomainHash, coin_type: u64) -> Option<T::AccountId> {
            CoinAddresses::<T>::get((RecordVersions::<T>::get(node), node, coin_type))
        }

        /// `getText`: value of `key` at `node`'s current version.
        pub fn text_of(node: DomainHash, key: [u8; 22]) -> Option<TextValue> {
            Texts::<T>::get((RecordVersions::<T>::get(node), node, key))
        }

        /// `getName`: reverse name at `node`'s current version.
        pub fn name_of(node: DomainHash) -> Option<TextValue> {
            Names::<T>::get(RecordVersions::<T>::get(node), node)
        }
    }
}

use frame_support::dispatch::Weight;

pub trait WeightInfo {
    fn set_addr() -> Weight;
    fn set_address() -> Weight;
    fn set_text(value_len: u32) -> Weight;
    fn set_name(name_len: u32) -> Weight;
    fn clear_records() -> Weight;
}

impl WeightInfo for () {
    fn set_addr() -> Weight {
        Weight::zero()
    }
    fn set_address() -> Weight {
        Weight::zero()
    }
    fn set_text(_value_len: u32) -> Weight {
        Weight::zero()
    }
    fn set_name(_name_len: u32) -> Weight {
        Weight::zero()
    }
    fn clear_records() -> Weight {
        Weight::zero()
    }
}
