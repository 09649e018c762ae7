//! # Registrar
//!
//! The policy layer in front of the Registry: validates a raw name,
//! prices it, charges for it, and tracks its lease (if it has one).
//! One FRAME pallet, instantiated once per registrar kind via FRAME's
//! `Instance` mechanism, so R-Domain/R-Reverse/R-Collection/R-Staking
//! share this module's storage layout and dispatch plumbing while each
//! supplies its own `NameValidator`/`Pricing`/`Lease`/`Transferable` —
//! the same "shared pallet body, per-instance `Config` parameters"
//! idiom this corpus otherwise reaches for `Get`-driven policy
//! injection to express.
//!
//! ### Module functions
//!
//! - `register` - mint a new name, paying for its initial lease
//! - `renew` - extend a leasable name's expiry
//! - `reclaim` - re-assert Registry ownership from the NFT owner
//!
//! ## Mint guard / expired-name reuse
//!
//! The underlying NFT ledger refuses to mint a token id that was ever
//! minted before (`nft::mint`'s `AlreadyMinted` guard) — a name whose
//! lease lapsed cannot simply be re-minted. `register` resolves this by
//! burning the stale NFT itself, inside the same transaction, before
//! minting the new one, rather than requiring a separate
//! `reclaimExpiredName` call.

pub use pallet::*;

/// One calendar year, in seconds. Every leasable duration must be a
/// multiple of this.
pub const BASE_PERIOD_SECONDS: u64 = 365 * 24 * 3600;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use crate::traits::{IsRegistrarOpen, LeasePolicy, NameValidator, Official, PriceOracle, Registry};
    use frame_support::{
        pallet_prelude::*,
        traits::{EnsureOrigin, Get},
    };
    use frame_system::{ensure_signed, pallet_prelude::*};
    use sp_runtime::traits::{AtLeast32BitUnsigned, CheckedAdd, MaybeSerializeDeserialize, UniqueSaturatedInto};
    use sp_runtime::ArithmeticError;
    use sp_std::vec::Vec;
    use vns_types::DomainHash;

    #[pallet::config]
    pub trait Config<I: 'static = ()>: frame_system::Config {
        type RuntimeEvent: From<Event<Self, I>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type Moment: Parameter
            + Member
            + AtLeast32BitUnsigned
            + Default
            + Copy
            + MaxEncodedLen
            + MaybeSerializeDeserialize
            + UniqueSaturatedInto<u64>
            + From<u64>;

        type NowProvider: frame_support::traits::UnixTime;

        /// How far past `expires` a lease may still be renewed, and how
        /// long after that before the node is registrable again.
        #[pallet::constant]
        type GracePeriod: Get<Self::Moment>;

        /// The node this instance mints subnodes of.
        #[pallet::constant]
        type RootNode: Get<DomainHash>;

        type NameValidator: NameValidator<Self::AccountId>;
        type Lease: LeasePolicy;
        /// `false` for soulbound registrars.
        type Transferable: Get<bool>;

        type Pricing: PriceOracle<Duration = Self::Moment>;

        type Registry: Registry<AccountId = Self::AccountId, Hash = DomainHash>;
        type Official: Official<AccountId = Self::AccountId>;
        type Currency: frame_support::traits::Currency<Self::AccountId, Balance = <Self::Pricing as PriceOracle>::Balance>;
        type ManagerOrigin: EnsureOrigin<Self::RuntimeOrigin, Success = Self::AccountId>;
        type IsOpen: IsRegistrarOpen;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T, I = ()>(_);

    /// `node -> expiry`. For a non-leasable instance this is just a
    /// "has this ever been registered" marker stamped with the
    /// registration moment; it never advances and is never consulted
    /// for a grace period.
    #[pallet::storage]
    pub type Expires<T: Config<I>, I: 'static = ()> =
        StorageMap<_, Twox64Concat, DomainHash, T::Moment>;

    #[pallet::genesis_config]
    pub struct GenesisConfig<T: Config<I>, I: 'static = ()> {
        pub expires: Vec<(DomainHash, T::Moment)>,
    }

    #[cfg(feature = "std")]
    impl<T: Config<I>, I: 'static> Default for GenesisConfig<T, I> {
        fn default() -> Self {
            Self { expires: Vec::new() }
        }
    }

    #[pallet::genesis_build]
    impl<T: Config<I>, I: 'static> GenesisBuild<T, I> for GenesisConfig<T, I> {
        fn build(&self) {
            for (node, expiry) in self.expires.iter() {
                Expires::<T, I>::insert(node, expiry);
            }
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config<I>, I: 'static = ()> {
        NameRegistered {
            name: Vec<u8>,
            node: DomainHash,
            owner: T::AccountId,
            expires: T::Moment,
        },
        NameRenewed {
            name: Vec<u8>,
            node: DomainHash,
            expires: T::Moment,
        },
        NameReclaimed { node: DomainHash, owner: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T, I = ()> {
        /// `NameValidator::validate` rejected this name for this
        /// instance's policy.
        InvalidName,
        /// Leasable instance: `duration` isn't a multiple of
        /// `BASE_PERIOD_SECONDS`, or is zero.
        InvalidDuration,
        /// The name is still within its lease (or, for a non-leasable
        /// instance, has already been registered once).
        Occupied,
        /// The name has never been registered, or its lease has fully
        /// lapsed past the grace period.
        NotRegistered,
        /// Renewal attempted after the grace period elapsed.
        NotRenewable,
        RegistrarClosed,
    }

    #[pallet::call]
    impl<T: Config<I>, I: 'static> Pallet<T, I> {
        /// Validate, price, pay for and mint `name` to `owner` for
        /// `duration`. Implicitly burns a stale NFT first if the name
        /// lapsed past its grace period.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::register(name.len() as u32))]
        #[frame_support::transactional]
        pub fn register(
            origin: OriginFor<T>,
            name: Vec<u8>,
            owner: T::AccountId,
            duration: T::Moment,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            ensure!(T::IsOpen::is_open(), Error::<T, I>::RegistrarClosed);

            let (label, label_len) =
                T::NameValidator::validate(&caller, &name).ok_or(Error::<T, I>::InvalidName)?;

            let root = T::RootNode::get();
            let node = crate::hashing::subnode(root, &label);

            let now = Self::now();
            let expires = if T::Lease::leasable() {
                let duration_secs: u64 = duration.unique_saturated_into();
                ensure!(
                    duration_secs >= BASE_PERIOD_SECONDS && duration_secs % BASE_PERIOD_SECONDS == 0,
                    Error::<T, I>::InvalidDuration
                );
                Self::check_registrable(node)?;
                let base = match Expires::<T, I>::get(node) {
                    Some(prev) if prev > now => prev,
                    _ => now,
                };
                base.checked_add(&duration).ok_or(ArithmeticError::Overflow)?
            } else {
                ensure!(!Expires::<T, I>::contains_key(node), Error::<T, I>::Occupied);
                now
            };

            // Mint guard: burn a stale NFT from a lapsed lease before
            // re-minting.
            if T::Lease::leasable() {
                if let Some(stale_owner) = T::Registry::owner_of(node) {
                    T::Registry::burn(&stale_owner, node)?;
                }
            }

            let price = T::Pricing::register_price(label_len, duration);
            let official = T::Official::get_official_account()?;

            // `node` is our own locally computed subnode; the Registry
            // independently computes the same hash from `root`/`label`
            // and asserts the two agree before minting.
            T::Registry::mint_subname(
                &official,
                root,
                node,
                label,
                owner.clone(),
                |_prev_owner| -> DispatchResult {
                    if let Some(price) = price {
                        T::Currency::transfer(
                            &caller,
                            &official,
                            price,
                            frame_support::traits::ExistenceRequirement::AllowDeath,
                        )?;
                    }
                    Ok(())
                },
            )?;

            Expires::<T, I>::insert(node, expires);
            Self::deposit_event(Event::NameRegistered {
                name,
                node,
                owner,
                expires,
            });
            Ok(())
        }

        /// Extend a leasable name's expiry. Callable by anyone, not
        /// just the owner — renewal is a public good.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::renew(name.len() as u32))]
        #[frame_support::transactional]
        pub fn renew(origin: OriginFor<T>, name: Vec<u8>, duration: T::Moment) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            ensure!(T::IsOpen::is_open(), Error::<T, I>::RegistrarClosed);
            ensure!(T::Lease::leasable(), Error::<T, I>::NotRegistered);

            let (label, label_len) =
                T::NameValidator::validate(&caller, &name).ok_or(Error::<T, I>::InvalidName)?;
            let node = crate::hashing::subnode(T::RootNode::get(), &label);

            Expires::<T, I>::try_mutate(node, |maybe_expires| -> DispatchResult {
                let expires = maybe_expires.as_mut().ok_or(Error::<T, I>::NotRegistered)?;
                let now = Self::now();
                let grace = T::GracePeriod::get();
                ensure!(now < *expires + grace, Error::<T, I>::NotRenewable);

                let new_expires = expires.checked_add(&duration).ok_or(ArithmeticError::Overflow)?;

                if let Some(price) = T::Pricing::renew_price(label_len, duration) {
                    T::Currency::transfer(
                        &caller,
                        &T::Official::get_official_account()?,
                        price,
                        frame_support::traits::ExistenceRequirement::AllowDeath,
                    )?;
                }

                *expires = new_expires;
                Self::deposit_event(Event::NameRenewed {
                    name: name.clone(),
                    node,
                    expires: new_expires,
                });
                Ok(())
            })
        }

        /// Re-assert Registry ownership of `name` from its current NFT
        /// owner, repairing Registry state after an off-tree change.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::reclaim(name.len() as u32))]
        pub fn reclaim(origin: OriginFor<T>, name: Vec<u8>) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let (label, _) = T::NameValidator::validate(&caller, &name).ok_or(Error::<T, I>::InvalidName)?;
            let root = T::RootNode::get();
            let node = crate::hashing::subnode(root, &label);

            ensure!(T::Registry::owner_of(node) == Some(caller.clone()), Error::<T, I>::NotRegistered);

            // `root` is owned by the official account, not by `caller` —
            // same node_owner `register` passes to `mint_subname`.
            let official = T::Official::get_official_account()?;
            T::Registry::mint_subname(&official, root, node, label, caller.clone(), |_| Ok(()))?;
            Self::deposit_event(Event::NameReclaimed { node, owner: caller });
            Ok(())
        }
    }

    impl<T: Config<I>, I: 'static> Pallet<T, I> {
        pub(crate) fn now() -> T::Moment {
            T::Moment::from(T::NowProvider::now().as_secs())
        }

        pub(crate) fn check_registrable(node: DomainHash) -> DispatchResult {
            match Expires::<T, I>::get(node) {
                None => Ok(()),
                Some(expires) => {
                    let now = Self::now();
                    ensure!(now >= expires + T::GracePeriod::get(), Error::<T, I>::Occupied);
                    Ok(())
                }
            }
        }

        /// ARC-72 `ownerOf` override (§9 expirable-NFT asymmetry): once
        /// a leasable name lapses past expiry, its application account
        /// answers `ownerOf` instead of the stale NFT record, without
        /// the underlying token being burned yet.
        pub fn arc72_owner_of(node: DomainHash, registrar_account: &T::AccountId) -> Option<T::AccountId> {
            if T::Lease::reclaim_after_expiry() {
                if let Some(expires) = Expires::<T, I>::get(node) {
                    if Self::now() > expires {
                        return Some(registrar_account.clone());
                    }
                }
            }
            T::Registry::owner_of(node)
        }
    }
}

use frame_support::dispatch::{DispatchResult, Weight};

pub trait WeightInfo {
    fn register(len: u32) -> Weight;
    fn renew(len: u32) -> Weight;
    fn reclaim(len: u32) -> Weight;
}

impl WeightInfo for () {
    fn register(_len: u32) -> Weight {
        Weight::zero()
    }
    fn renew(_len: u32) -> Weight {
        Weight::zero()
    }
    fn reclaim(_len: u32) -> Weight {
        Weight::zero()
    }
}

impl<T: pallet::Config<I>, I: 'static> crate::traits::Registrar for pallet::Pallet<T, I> {
    type Hash = vns_types::DomainHash;
    type AccountId = T::AccountId;

    fn check_expires_registrable(node: Self::Hash) -> DispatchResult {
        pallet::Pallet::<T, I>::check_registrable(node)
    }

    fn check_expires_renewable(node: Self::Hash) -> DispatchResult {
        match pallet::Expires::<T, I>::get(node) {
            None => Ok(()),
            Some(expires) => {
                let now = pallet::Pallet::<T, I>::now();
                frame_support::ensure!(
                    now < expires + <T as pallet::Config<I>>::GracePeriod::get(),
                    pallet::Error::<T, I>::NotRenewable
                );
                Ok(())
            }
        }
    }

    fn check_expires_useable(node: Self::Hash) -> DispatchResult {
        if !<T as pallet::Config<I>>::Lease::leasable() {
            // Non-leasable instances stamp `Expires` with the
            // registration instant, not a real expiry: existence alone
            // means "still registered".
            return Ok(());
        }
        match pallet::Expires::<T, I>::get(node) {
            None => Ok(()),
            Some(expires) => {
                let now = pallet::Pallet::<T, I>::now();
                frame_support::ensure!(now < expires, pallet::Error::<T, I>::NotRegistered);
                Ok(())
            }
        }
    }

    fn clear_registrar_info(node: Self::Hash, _owner: &Self::AccountId) -> DispatchResult {
        pallet::Expires::<T, I>::remove(node);
        Ok(())
    }

    fn basenode() -> Self::Hash {
        <T as pallet::Config<I>>::RootNode::get()
    }

    fn owns(node: Self::Hash) -> bool {
        pallet::Expires::<T, I>::contains_key(node)
    }

    fn transferable(_node: Self::Hash) -> bool {
        <T as pallet::Config<I>>::Transferable::get()
    }
}
