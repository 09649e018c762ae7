//! # Admin
//!
//! A single collapsed `Ownable`/`Upgradeable`/`Stakeable`/`Deployable`
//! mixin record, the way a contract author would bundle four small
//! access-control mixins into one struct rather than inherit from four
//! separate base contracts. One record per runtime: there is exactly
//! one administered surface (this crate's pallets), so unlike
//! `registry::Official` there is no need for a map.

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use vns_types::AdminInfo;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type WeightInfo: super::WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T>(_);

    #[pallet::storage]
    pub type Admin<T: Config> = StorageValue<_, AdminInfo<T::AccountId>>;

    #[pallet::genesis_config]
    pub struct GenesisConfig<T: Config> {
        pub owner: T::AccountId,
        pub upgrader: T::AccountId,
        pub delegate: T::AccountId,
    }

    #[cfg(feature = "std")]
    impl<T: Config> Default for GenesisConfig<T> {
        fn default() -> Self {
            panic!("admin pallet genesis requires an explicit owner/upgrader/delegate")
        }
    }

    #[pallet::genesis_build]
    impl<T: Config> GenesisBuild<T> for GenesisConfig<T> {
        fn build(&self) {
            Admin::<T>::put(AdminInfo {
                owner: self.owner.clone(),
                upgrader: self.upgrader.clone(),
                delegate: self.delegate.clone(),
                updatable: true,
                contract_version: 1,
                deployment_version: 1,
                stakeable: false,
            });
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        OwnerChanged { new_owner: T::AccountId },
        UpgraderChanged { new_upgrader: T::AccountId },
        DelegateChanged { new_delegate: T::AccountId },
        UpdatableChanged { updatable: bool },
        StakeableChanged { stakeable: bool },
        /// Bumped by `note_upgrade`: a migration ran against this
        /// crate's storage.
        Upgraded { contract_version: u32 },
        /// Bumped by `note_deployment`: a fresh copy of this pallet set
        /// was deployed onto a new parachain/sibling.
        Deployed { deployment_version: u32 },
    }

    #[pallet::error]
    pub enum Error<T> {
        NotInitialized,
        NoPermission,
        NotUpdatable,
    }

    impl<T: Config> Pallet<T> {
        fn mutate_as_owner(
            caller: &T::AccountId,
            f: impl FnOnce(&mut AdminInfo<T::AccountId>) -> DispatchResult,
        ) -> DispatchResult {
            Admin::<T>::try_mutate(|maybe_info| -> DispatchResult {
                let info = maybe_info.as_mut().ok_or(Error::<T>::NotInitialized)?;
                ensure!(info.owner == *caller, Error::<T>::NoPermission);
                f(info)
            })
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_owner())]
        pub fn set_owner(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::mutate_as_owner(&caller, |info| {
                info.owner = new_owner.clone();
                Self::deposit_event(Event::OwnerChanged { new_owner });
                Ok(())
            })
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_upgrader())]
        pub fn set_upgrader(origin: OriginFor<T>, new_upgrader: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::mutate_as_owner(&caller, |info| {
                info.upgrader = new_upgrader.clone();
                Self::deposit_event(Event::UpgraderChanged { new_upgrader });
                Ok(())
            })
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_delegate())]
        pub fn set_delegate(origin: OriginFor<T>, new_delegate: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::mutate_as_owner(&caller, |info| {
                info.delegate = new_delegate.clone();
                Self::deposit_event(Event::DelegateChanged { new_delegate });
                Ok(())
            })
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_updatable())]
        pub fn set_updatable(origin: OriginFor<T>, updatable: bool) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::mutate_as_owner(&caller, |info| {
                info.updatable = updatable;
                Self::deposit_event(Event::UpdatableChanged { updatable });
                Ok(())
            })
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_stakeable())]
        pub fn set_stakeable(origin: OriginFor<T>, stakeable: bool) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::mutate_as_owner(&caller, |info| {
                info.stakeable = stakeable;
                Self::deposit_event(Event::StakeableChanged { stakeable });
                Ok(())
            })
        }

        /// Called by the upgrader after a storage migration lands.
        /// Refuses when `updatable` has been turned off.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::note_upgrade())]
        pub fn note_upgrade(origin: OriginFor<T>) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Admin::<T>::try_mutate(|maybe_info| -> DispatchResult {
                let info = maybe_info.as_mut().ok_or(Error::<T>::NotInitialized)?;
                ensure!(info.upgrader == caller, Error::<T>::NoPermission);
                ensure!(info.updatable, Error::<T>::NotUpdatable);
                info.contract_version = info.contract_version.saturating_add(1);
                Self::deposit_event(Event::Upgraded {
                    contract_version: info.contract_version,
                });
                Ok(())
            })
        }

        /// Called by the delegate after redeploying this pallet set
        /// onto another chain.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::note_deployment())]
        pub fn note_deployment(origin: OriginFor<T>) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Admin::<T>::try_mutate(|maybe_info| -> DispatchResult {
                let info = maybe_info.as_mut().ok_or(Error::<T>::NotInitialized)?;
                ensure!(info.delegate == caller, Error::<T>::NoPermission);
                info.deployment_version = info.deployment_version.saturating_add(1);
                Self::deposit_event(Event::Deployed {
                    deployment_version: info.deployment_version,
                });
                Ok(())
            })
        }
    }
}

use frame_support::dispatch::Weight;

impl<T: pallet::Config> crate::traits::Administration<T::AccountId> for pallet::Pallet<T> {
    fn owner() -> Option<T::AccountId> {
        pallet::Admin::<T>::get().map(|info| info.owner)
    }

    fn is_owner(who: &T::AccountId) -> bool {
        pallet::Admin::<T>::get().map(|info| info.owner == *who).unwrap_or(false)
    }

    fn is_upgrader(who: &T::AccountId) -> bool {
        pallet::Admin::<T>::get()
            .map(|info| info.upgrader == *who)
            .unwrap_or(false)
    }

    fn is_delegate(who: &T::AccountId) -> bool {
        pallet::Admin::<T>::get()
            .map(|info| info.delegate == *who)
            .unwrap_or(false)
    }
}

pub trait WeightInfo {
    fn set_owner() -> Weight;
    fn set_upgrader() -> Weight;
    fn set_delegate() -> Weight;
    fn set_updatable() -> Weight;
    fn set_stakeable() -> Weight;
    fn note_upgrade() -> Weight;
    fn note_deployment() -> Weight;
}

impl WeightInfo for () {
    fn set_owner() -> Weight {
        Weight::zero()
    }
    fn set_upgrader() -> Weight {
        Weight::zero()
    }
    fn set_delegate() -> Weight {
        Weight::zero()
    }
    fn set_updatable() -> Weight {
        Weight::zero()
    }
    fn set_stakeable() -> Weight {
        Weight::zero()
    }
    fn note_upgrade() -> Weight {
        Weight::zero()
    }
    fn note_deployment() -> Weight {
        Weight::zero()
    }
}
