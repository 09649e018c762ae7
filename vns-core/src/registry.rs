//! # Registry
//!
//! The record tree: for every node, who owns it, which resolver serves
//! it and its TTL. Ownership is backed by the generic NFT ledger in
//! `nft`; this pallet layers the naming-specific fields (resolver, ttl,
//! per-node approval) and authorization rules on top of it, and is the
//! only pallet a Registrar ever needs to call to mint, transfer or burn
//! a name.
//!
//! ### Module functions
//!
//! - `set_record` / `set_subnode_record` - overwrite a node's full record
//! - `set_subnode_owner` - mint (or reassign) ownership of a subnode
//! - `set_resolver` / `set_owner` / `set_ttl` - update one field
//! - `set_approval_for_all` / `approve` - delegate authority over nodes
//! - `burn` - destroy a node, releasing its lease bookkeeping
//! - `set_official` - change the official treasury account (manager only)

pub use pallet::*;
use sp_runtime::DispatchError;
use sp_std::vec::Vec;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use crate::{hashing, nft, traits::Registrar};
    use frame_support::pallet_prelude::*;
    use frame_support::traits::EnsureOrigin;
    use frame_system::{ensure_signed, pallet_prelude::*};
    use vns_types::{DomainHash, Record};
    use sp_runtime::traits::{StaticLookup, Zero};

    #[pallet::config]
    pub trait Config:
        frame_system::Config
        + crate::nft::Config<ClassData = (), TokenId = DomainHash, TokenData = Record<Self::Moment>>
    {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type WeightInfo: WeightInfo;

        type Registrar: Registrar<AccountId = Self::AccountId, Hash = DomainHash>;

        type ResolverId: Parameter + Default + MaxEncodedLen + Into<u64> + From<u64>;

        type Moment: Parameter + Default + Copy + MaxEncodedLen + sp_runtime::traits::UniqueSaturatedInto<u64>;

        type ManagerOrigin: EnsureOrigin<Self::RuntimeOrigin, Success = Self::AccountId>;
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T>(_);

    /// The treasury / fee-sink account every Registrar pays into.
    #[pallet::storage]
    pub type Official<T: Config> = StorageValue<_, T::AccountId>;

    /// `(owner, operator) -> ()` if `operator` may act for `owner` on
    /// every node `owner` controls.
    #[pallet::storage]
    pub type OperatorApprovals<T: Config> =
        StorageDoubleMap<_, Twox64Concat, T::AccountId, Twox64Concat, T::AccountId, (), ValueQuery>;

    /// `node -> approved`, the single per-node delegate set by `approve`.
    #[pallet::storage]
    pub type Approved<T: Config> = StorageMap<_, Twox64Concat, DomainHash, T::AccountId>;

    #[pallet::genesis_config]
    pub struct GenesisConfig<T: Config> {
        pub official: Option<T::AccountId>,
        pub operators: Vec<(T::AccountId, T::AccountId)>,
    }

    #[cfg(feature = "std")]
    impl<T: Config> Default for GenesisConfig<T> {
        fn default() -> Self {
            GenesisConfig {
                official: None,
                operators: Vec::with_capacity(0),
            }
        }
    }

    #[pallet::genesis_build]
    impl<T: Config> GenesisBuild<T> for GenesisConfig<T> {
        fn build(&self) {
            if let Some(official) = &self.official {
                Official::<T>::put(official);
            }
            for (owner, operator) in self.operators.iter() {
                OperatorApprovals::<T>::insert(owner, operator, ());
            }
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A node changed owner, via `setRecord`, `setSubnodeOwner` or
        /// `setOwner`.
        Transfer { node: DomainHash, owner: T::AccountId },
        /// A node's subnode was minted or reassigned.
        NewOwner {
            node: DomainHash,
            label: DomainHash,
            owner: T::AccountId,
        },
        /// A node's resolver changed.
        NewResolver { node: DomainHash, resolver: T::ResolverId },
        /// A node's TTL changed.
        NewTTL { node: DomainHash, ttl: u64 },
        /// An operator was added or removed for `owner`.
        ApprovalForAll {
            owner: T::AccountId,
            operator: T::AccountId,
            approved: bool,
        },
        /// A node was burned.
        Burned { node: DomainHash, owner: T::AccountId, caller: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the owner, an approved operator, nor the
        /// per-node approved account.
        NoPermission,
        /// No record exists for this node.
        NotExist,
        /// `setSubnodeOwner` returned a node that does not match the
        /// caller's locally computed hash.
        SubnodeMismatch,
        /// ERC721: approval to current owner.
        ApprovalFailure,
        /// Official account has not been set yet.
        OfficialNotInitiated,
    }

    impl<T: Config> Pallet<T> {
        /// `only_owner(node)`.
        pub fn only_owner(caller: &T::AccountId, node: DomainHash) -> DispatchResult {
            let owner = Self::owner_of(node).ok_or(Error::<T>::NotExist)?;
            ensure!(*caller == owner, Error::<T>::NoPermission);
            Ok(())
        }

        /// `authorized(node)`: owner, operator, or the per-node approved
        /// account.
        pub fn authorized(caller: &T::AccountId, node: DomainHash) -> DispatchResult {
            let owner = Self::owner_of(node).ok_or(Error::<T>::NotExist)?;
            ensure!(
                *caller == owner
                    || OperatorApprovals::<T>::contains_key(&owner, caller)
                    || Approved::<T>::get(node).as_ref() == Some(caller),
                Error::<T>::NoPermission
            );
            Ok(())
        }

        /// `ownerOf`. `None` for a record that does not exist.
        pub fn owner_of(node: DomainHash) -> Option<T::AccountId> {
            nft::Pallet::<T>::tokens(T::ClassId::zero(), node).map(|t| t.owner)
        }

        /// `recordExists(node) == owner(node) != zero`.
        pub fn record_exists(node: DomainHash) -> bool {
            Self::owner_of(node).is_some()
        }

        pub fn resolver_of(node: DomainHash) -> T::ResolverId {
            nft::Pallet::<T>::tokens(T::ClassId::zero(), node)
                .map(|t| T::ResolverId::from(t.data.resolver))
                .unwrap_or_default()
        }

        pub fn ttl_of(node: DomainHash) -> u64 {
            nft::Pallet::<T>::tokens(T::ClassId::zero(), node)
                .map(|t| t.data.ttl)
                .unwrap_or_default()
        }

        pub fn is_approved_for_all(owner: &T::AccountId, operator: &T::AccountId) -> bool {
            OperatorApprovals::<T>::contains_key(owner, operator)
        }

        pub fn get_approved(node: DomainHash) -> Option<T::AccountId> {
            Approved::<T>::get(node)
        }

        /// Write `resolver`/`ttl` onto an already-minted node, emitting
        /// `NewResolver`/`NewTTL` only when a field actually changes.
        fn write_resolver_ttl(
            node: DomainHash,
            resolver: Option<T::ResolverId>,
            ttl: Option<u64>,
        ) -> DispatchResult {
            nft::Tokens::<T>::try_mutate(T::ClassId::zero(), node, |maybe_info| -> DispatchResult {
                let info = maybe_info.as_mut().ok_or(Error::<T>::NotExist)?;
                if let Some(resolver) = resolver {
                    let resolver_raw: u64 = resolver.clone().into();
                    if info.data.resolver != resolver_raw {
                        info.data.resolver = resolver_raw;
                        Self::deposit_event(Event::<T>::NewResolver { node, resolver });
                    }
                }
                if let Some(ttl) = ttl {
                    if info.data.ttl != ttl {
                        info.data.ttl = ttl;
                        Self::deposit_event(Event::<T>::NewTTL { node, ttl });
                    }
                }
                Ok(())
            })
        }

        /// Mint (first write) or reassign ownership of `node`'s
        /// `label` subnode, calling `do_payments` with the previous
        /// owner (if any) before the new owner is recorded. Computes
        /// the subnode itself from `node`/`label` rather than trusting
        /// a caller-supplied hash, and returns it so the Registrar can
        /// assert it against its own locally computed value. Used by
        /// every Registrar instance for `register`/`mint_subname`.
        #[cfg_attr(not(feature = "runtime-benchmarks"), frame_support::require_transactional)]
        pub(crate) fn do_mint_subname(
            owner: &T::AccountId,
            node: DomainHash,
            label: Vec<u8>,
            to: T::AccountId,
            do_payments: impl FnOnce(Option<&T::AccountId>) -> DispatchResult,
        ) -> Result<DomainHash, DispatchError> {
            ensure!(Self::record_exists(node), Error::<T>::NotExist);
            Self::authorized(owner, node)?;

            let label_node = hashing::subnode(node, &label);

            if let Some(info) = nft::Tokens::<T>::get(T::ClassId::zero(), label_node) {
                let from = info.owner;
                do_payments(Some(&from))?;
                nft::Pallet::<T>::transfer(&from, &to, (T::ClassId::zero(), label_node))?;
            } else {
                do_payments(None)?;
                let data = Record {
                    resolver: 0,
                    ttl: 0,
                    registration_date: Default::default(),
                    label: label
                        .try_into()
                        .unwrap_or_else(|_: Vec<u8>| Default::default()),
                };
                nft::Pallet::<T>::mint(&to, (T::ClassId::zero(), label_node), Vec::new(), data)?;
            }

            Self::deposit_event(Event::<T>::NewOwner {
                node,
                label: label_node,
                owner: to,
            });

            Ok(label_node)
        }

        #[cfg_attr(not(feature = "runtime-benchmarks"), frame_support::require_transactional)]
        pub fn do_transfer(from: &T::AccountId, to: &T::AccountId, node: DomainHash) -> DispatchResult {
            ensure!(T::Registrar::transferable(node), Error::<T>::NoPermission);
            T::Registrar::check_expires_useable(node)?;
            Self::authorized(from, node)?;
            let owner = Self::owner_of(node).ok_or(Error::<T>::NotExist)?;
            nft::Pallet::<T>::transfer(&owner, to, (T::ClassId::zero(), node))?;
            Approved::<T>::remove(node);

            Self::deposit_event(Event::<T>::Transfer {
                node,
                owner: to.clone(),
            });

            Ok(())
        }

        pub(crate) fn do_burn(caller: T::AccountId, node: DomainHash) -> DispatchResult {
            let owner = Self::owner_of(node).ok_or(Error::<T>::NotExist)?;
            Self::authorized(&caller, node)?;

            T::Registrar::clear_registrar_info(node, &owner)?;
            nft::Pallet::<T>::burn(&owner, (T::ClassId::zero(), node))?;
            Approved::<T>::remove(node);

            Self::deposit_event(Event::<T>::Burned { node, owner, caller });
            Ok(())
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Overwrite a node's owner, resolver and TTL in one call.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_record())]
        pub fn set_record(
            origin: OriginFor<T>,
            node: DomainHash,
            owner: <T::Lookup as StaticLookup>::Source,
            resolver: T::ResolverId,
            ttl: u64,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let owner = T::Lookup::lookup(owner)?;
            Self::only_owner(&caller, node)?;

            let current_owner = Self::owner_of(node).ok_or(Error::<T>::NotExist)?;
            nft::Pallet::<T>::transfer(&current_owner, &owner, (T::ClassId::zero(), node))?;
            Self::deposit_event(Event::<T>::Transfer { node, owner: owner.clone() });

            Self::write_resolver_ttl(node, Some(resolver), Some(ttl))?;
            Ok(())
        }

        /// `setSubnodeRecord`: mint/reassign the subnode, then stamp its
        /// resolver and TTL.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_subnode_record())]
        pub fn set_subnode_record(
            origin: OriginFor<T>,
            node: DomainHash,
            label: Vec<u8>,
            owner: <T::Lookup as StaticLookup>::Source,
            resolver: T::ResolverId,
            ttl: u64,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let owner = T::Lookup::lookup(owner)?;
            Self::only_owner(&caller, node)?;

            let label_node = Self::do_mint_subname(&caller, node, label, owner, |_| Ok(()))?;
            Self::write_resolver_ttl(label_node, Some(resolver), Some(ttl))?;
            Ok(())
        }

        /// `setSubnodeOwner`: the cross-pallet entry point every
        /// Registrar calls. Returns the Registry-computed subnode so the
        /// caller can assert it against its own locally computed hash.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_subnode_owner())]
        pub fn set_subnode_owner(
            origin: OriginFor<T>,
            node: DomainHash,
            label: Vec<u8>,
            owner: <T::Lookup as StaticLookup>::Source,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let owner = T::Lookup::lookup(owner)?;
            Self::authorized(&caller, node)?;

            Self::do_mint_subname(&caller, node, label, owner, |_| Ok(()))?;
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_resolver())]
        pub fn set_resolver(origin: OriginFor<T>, node: DomainHash, resolver: T::ResolverId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::authorized(&caller, node)?;
            Self::write_resolver_ttl(node, Some(resolver), None)
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_owner())]
        pub fn set_owner(
            origin: OriginFor<T>,
            node: DomainHash,
            owner: <T::Lookup as StaticLookup>::Source,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let owner = T::Lookup::lookup(owner)?;
            Self::do_transfer(&caller, &owner, node)
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_ttl())]
        pub fn set_ttl(origin: OriginFor<T>, node: DomainHash, ttl: u64) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::authorized(&caller, node)?;
            Self::write_resolver_ttl(node, None, Some(ttl))
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::set_approval_for_all())]
        pub fn set_approval_for_all(
            origin: OriginFor<T>,
            operator: <T::Lookup as StaticLookup>::Source,
            approved: bool,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let operator = T::Lookup::lookup(operator)?;

            OperatorApprovals::<T>::mutate_exists(&caller, &operator, |flag| {
                if approved {
                    flag.replace(())
                } else {
                    flag.take()
                }
            });
            Self::deposit_event(Event::ApprovalForAll {
                owner: caller,
                operator,
                approved,
            });
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(
            origin: OriginFor<T>,
            to: T::AccountId,
            node: DomainHash,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let owner = Self::owner_of(node).ok_or(Error::<T>::NotExist)?;
            ensure!(to != owner, Error::<T>::ApprovalFailure);
            Self::only_owner(&caller, node)?;

            Approved::<T>::insert(node, to);
            Ok(())
        }

        /// Release a node, returning any lease bookkeeping to the
        /// registrar that minted it.
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, node: DomainHash) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_burn(caller, node)
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::set_official())]
        pub fn set_official(origin: OriginFor<T>, official: T::AccountId) -> DispatchResult {
            let _who = T::ManagerOrigin::ensure_origin(origin)?;
            Official::<T>::put(official);
            Ok(())
        }
    }
}

use frame_support::dispatch::{DispatchResult, Weight};
use vns_types::DomainHash;

pub trait WeightInfo {
    fn set_record() -> Weight;
    fn set_subnode_record() -> Weight;
    fn set_subnode_owner() -> Weight;
    fn set_resolver() -> Weight;
    fn set_owner() -> Weight;
    fn set_ttl() -> Weight;
    fn set_approval_for_all() -> Weight;
    fn approve() -> Weight;
    fn burn() -> Weight;
    fn set_official() -> Weight;
}

impl WeightInfo for () {
    fn set_record() -> Weight {
        Weight::zero()
    }
    fn set_subnode_record() -> Weight {
        Weight::zero()
    }
    fn set_subnode_owner() -> Weight {
        Weight::zero()
    }
    fn set_resolver() -> Weight {
        Weight::zero()
    }
    fn set_owner() -> Weight {
        Weight::zero()
    }
    fn set_ttl() -> Weight {
        Weight::zero()
    }
    fn set_approval_for_all() -> Weight {
        Weight::zero()
    }
    fn approve() -> Weight {
        Weight::zero()
    }
    fn burn() -> Weight {
        Weight::zero()
    }
    fn set_official() -> Weight {
        Weight::zero()
    }
}

impl<T: pallet::Config> crate::traits::NFT<T::AccountId> for pallet::Pallet<T> {
    type ClassId = T::ClassId;
    type TokenId = T::TokenId;

    fn balance(who: &T::AccountId) -> u64 {
        crate::nft::TokensByOwner::<T>::iter_prefix((who,)).count() as u64
    }

    fn owner(token: (Self::ClassId, Self::TokenId)) -> Option<T::AccountId> {
        crate::nft::Pallet::<T>::tokens(token.0, token.1).map(|t| t.owner)
    }

    fn transfer(from: &T::AccountId, to: &T::AccountId, token: (Self::ClassId, Self::TokenId)) -> DispatchResult {
        use sp_runtime::traits::Zero;
        frame_support::ensure!(token.0 == T::ClassId::zero(), pallet::Error::<T>::NotExist);
        pallet::Pallet::<T>::do_transfer(from, to, token.1)
    }
}

impl<T: pallet::Config> crate::traits::Registry for pallet::Pallet<T> {
    type AccountId = T::AccountId;
    type Hash = DomainHash;

    #[cfg_attr(not(feature = "runtime-benchmarks"), frame_support::require_transactional)]
    fn mint_subname(
        node_owner: &Self::AccountId,
        node: DomainHash,
        label_node: DomainHash,
        label: Vec<u8>,
        to: Self::AccountId,
        do_payments: impl FnOnce(Option<&T::AccountId>) -> DispatchResult,
    ) -> Result<DomainHash, DispatchError> {
        let minted = pallet::Pallet::<T>::do_mint_subname(node_owner, node, label, to, do_payments)?;
        frame_support::ensure!(minted == label_node, pallet::Error::<T>::SubnodeMismatch);
        Ok(minted)
    }

    fn available(caller: &Self::AccountId, node: DomainHash) -> DispatchResult {
        pallet::Pallet::<T>::authorized(caller, node)
    }

    fn transfer(from: &Self::AccountId, to: &Self::AccountId, node: DomainHash) -> DispatchResult {
        pallet::Pallet::<T>::do_transfer(from, to, node)
    }

    fn owner_of(node: DomainHash) -> Option<Self::AccountId> {
        pallet::Pallet::<T>::owner_of(node)
    }

    fn burn(caller: &Self::AccountId, node: DomainHash) -> DispatchResult {
        pallet::Pallet::<T>::do_burn(caller.clone(), node)
    }
}

impl<T: pallet::Config> crate::traits::Official for pallet::Pallet<T> {
    type AccountId = T::AccountId;

    fn get_official_account() -> Result<Self::AccountId, DispatchError> {
        pallet::Official::<T>::get().ok_or_else(|| pallet::Error::<T>::OfficialNotInitiated.into())
    }
}
