//! # Non Fungible Token
//!
//! Generic class/token ledger underlying the registry's ARC-72 surface.
//! A "class" only ever exists as `ClassId::zero()` here — the Registry
//! never creates a second class — but the pallet keeps the same
//! class/token split the upstream nft module uses, so the storage
//! layout generalizes if a future registry ever wants more than one.
//!
//! ### Module functions
//!
//! - `create_class` - create an NFT class
//! - `transfer` - transfer an NFT to another account
//! - `mint` - mint an NFT, assigning it the next enumeration index
//! - `burn` - burn an NFT
//! - `destroy_class` - destroy an NFT class

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{ensure, pallet_prelude::*, traits::Get, BoundedVec, Parameter};
use scale_info::TypeInfo;
use sp_runtime::{
    traits::{AtLeast32BitUnsigned, CheckedAdd, CheckedSub, MaybeSerializeDeserialize, Member, One, Zero},
    ArithmeticError, DispatchError, DispatchResult, RuntimeDebug,
};
use sp_std::vec::Vec;

/// Class info.
#[derive(Encode, Decode, Clone, Eq, PartialEq, MaxEncodedLen, RuntimeDebug, TypeInfo)]
pub struct ClassInfo<TotalId, AccountId, Data, ClassMetadataOf> {
    pub metadata: ClassMetadataOf,
    pub total_issuance: TotalId,
    pub owner: AccountId,
    pub data: Data,
}

/// Token info.
#[derive(Encode, Decode, Clone, Eq, PartialEq, MaxEncodedLen, RuntimeDebug, TypeInfo)]
pub struct TokenInfo<AccountId, Data, TokenMetadataOf> {
    pub metadata: TokenMetadataOf,
    pub owner: AccountId,
    pub data: Data,
}

pub use module::*;

#[frame_support::pallet]
pub mod module {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type ClassId: Parameter + Member + AtLeast32BitUnsigned + Default + Copy;
        type TotalId: Parameter
            + Member
            + AtLeast32BitUnsigned
            + Default
            + Copy
            + MaybeSerializeDeserialize;
        type TokenId: Parameter + Member + Default + Copy + MaybeSerializeDeserialize;
        type ClassData: Parameter + Member + MaybeSerializeDeserialize;
        type TokenData: Parameter + Member + MaybeSerializeDeserialize;
        type MaxClassMetadata: Get<u32>;
        type MaxTokenMetadata: Get<u32>;
    }

    pub type ClassMetadataOf<T> = BoundedVec<u8, <T as Config>::MaxClassMetadata>;
    pub type TokenMetadataOf<T> = BoundedVec<u8, <T as Config>::MaxTokenMetadata>;
    pub type ClassInfoOf<T> = ClassInfo<
        <T as Config>::TotalId,
        <T as frame_system::Config>::AccountId,
        <T as Config>::ClassData,
        ClassMetadataOf<T>,
    >;
    pub type TokenInfoOf<T> = TokenInfo<
        <T as frame_system::Config>::AccountId,
        <T as Config>::TokenData,
        TokenMetadataOf<T>,
    >;
    pub type GenesisTokenData<T> = (
        <T as frame_system::Config>::AccountId,
        Vec<u8>,
        <T as Config>::TokenData,
        <T as Config>::TokenId,
    );
    pub type GenesisTokens<T> = (
        <T as frame_system::Config>::AccountId,
        Vec<u8>,
        <T as Config>::ClassData,
        Vec<GenesisTokenData<T>>,
    );

    #[pallet::error]
    pub enum Error<T> {
        NoAvailableClassId,
        TokenNotFound,
        ClassNotFound,
        NoPermission,
        CannotDestroyClass,
        MaxMetadataExceeded,
        /// This token was already minted once — names are never reissued
        /// a fresh index (ARC-72 "minted once" guard).
        AlreadyMinted,
    }

    #[pallet::storage]
    #[pallet::getter(fn next_class_id)]
    pub type NextClassId<T: Config> = StorageValue<_, T::ClassId, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn classes)]
    pub type Classes<T: Config> = StorageMap<_, Twox64Concat, T::ClassId, ClassInfoOf<T>>;

    #[pallet::storage]
    #[pallet::getter(fn tokens)]
    pub type Tokens<T: Config> =
        StorageDoubleMap<_, Twox64Concat, T::ClassId, Twox64Concat, T::TokenId, TokenInfoOf<T>>;

    #[pallet::storage]
    pub type TokensByOwner<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, T::ClassId>,
            NMapKey<Blake2_128Concat, T::TokenId>,
        ),
        (),
        ValueQuery,
    >;

    /// Next free, 1-based enumeration index per class. `0` means "no
    /// such NFT".
    #[pallet::storage]
    pub type NextIndex<T: Config> = StorageMap<_, Twox64Concat, T::ClassId, u64, ValueQuery>;

    /// `(class, index) -> token_id`, for ARC-72 `tokenByIndex`. Indices
    /// are never recycled, but a burned token's entry is removed, so the
    /// map may contain holes below `NextIndex`.
    #[pallet::storage]
    pub type TokenByIndex<T: Config> =
        StorageDoubleMap<_, Twox64Concat, T::ClassId, Twox64Concat, u64, T::TokenId>;

    /// `(class, token_id) -> index`, the reverse of `TokenByIndex`.
    #[pallet::storage]
    pub type IndexOfToken<T: Config> =
        StorageDoubleMap<_, Twox64Concat, T::ClassId, Twox64Concat, T::TokenId, u64>;

    #[pallet::genesis_config]
    pub struct GenesisConfig<T: Config> {
        pub tokens: Vec<GenesisTokens<T>>,
    }

    #[cfg(feature = "std")]
    impl<T: Config> Default for GenesisConfig<T> {
        fn default() -> Self {
            GenesisConfig { tokens: vec![] }
        }
    }

    #[pallet::genesis_build]
    impl<T: Config> GenesisBuild<T> for GenesisConfig<T> {
        fn build(&self) {
            self.tokens.iter().for_each(|token_class| {
                let class_id = Pallet::<T>::create_class(
                    &token_class.0,
                    token_class.1.to_vec(),
                    token_class.2.clone(),
                )
                .expect("Create class cannot fail while building genesis");
                for (account_id, token_metadata, token_data, token_id) in &token_class.3 {
                    Pallet::<T>::mint(
                        account_id,
                        (class_id, *token_id),
                        token_metadata.to_vec(),
                        token_data.clone(),
                    )
                    .expect("Token mint cannot fail during genesis");
                }
            })
        }
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    #[pallet::without_storage_info]
    pub struct Pallet<T>(_);

    #[pallet::hooks]
    impl<T: Config> Hooks<T::BlockNumber> for Pallet<T> {}

    #[pallet::call]
    impl<T: Config> Pallet<T> {}
}

/// ARC-73 interface identifiers this NFT ledger answers for. See
/// `supports_interface`.
pub const IFACE_SUPPORTS_INTERFACE: [u8; 4] = [0x4e, 0x22, 0xa3, 0xba];
pub const IFACE_ARC72_CORE: [u8; 4] = [0x53, 0xf0, 0x2a, 0x40];
pub const IFACE_ARC72_METADATA: [u8; 4] = [0xc3, 0xc1, 0xfc, 0x00];
pub const IFACE_ARC72_TRANSFER_MGMT: [u8; 4] = [0xb9, 0xc6, 0xf6, 0x96];
pub const IFACE_ARC72_ENUMERATION: [u8; 4] = [0xa5, 0x7d, 0x46, 0x79];

/// `false` for every unknown selector, including the `ffffffff` probe.
pub fn supports_interface(selector: [u8; 4]) -> bool {
    matches!(
        selector,
        IFACE_SUPPORTS_INTERFACE
            | IFACE_ARC72_CORE
            | IFACE_ARC72_METADATA
            | IFACE_ARC72_TRANSFER_MGMT
            | IFACE_ARC72_ENUMERATION
    )
}

impl<T: Config> Pallet<T> {
    pub fn create_class(
        owner: &T::AccountId,
        metadata: Vec<u8>,
        data: T::ClassData,
    ) -> Result<T::ClassId, DispatchError> {
        let bounded_metadata: BoundedVec<u8, T::MaxClassMetadata> = metadata
            .try_into()
            .map_err(|_| Error::<T>::MaxMetadataExceeded)?;

        let class_id = NextClassId::<T>::try_mutate(|id| -> Result<T::ClassId, DispatchError> {
            let current_id = *id;
            *id = id
                .checked_add(&One::one())
                .ok_or(Error::<T>::NoAvailableClassId)?;
            Ok(current_id)
        })?;

        let info = ClassInfo {
            metadata: bounded_metadata,
            total_issuance: Default::default(),
            owner: owner.clone(),
            data,
        };
        Classes::<T>::insert(class_id, info);

        Ok(class_id)
    }

    pub fn transfer(
        from: &T::AccountId,
        to: &T::AccountId,
        token: (T::ClassId, T::TokenId),
    ) -> DispatchResult {
        Tokens::<T>::try_mutate(token.0, token.1, |token_info| -> DispatchResult {
            let info = token_info.as_mut().ok_or(Error::<T>::TokenNotFound)?;
            ensure!(info.owner == *from, Error::<T>::NoPermission);
            if from == to {
                return Ok(());
            }

            info.owner = to.clone();

            TokensByOwner::<T>::remove((from, token.0, token.1));
            TokensByOwner::<T>::insert((to, token.0, token.1), ());

            Ok(())
        })
    }

    /// Mint `token` to `owner`, assigning it the next enumeration index.
    /// Errs if this exact `(class, token_id)` was ever minted before —
    /// the ARC-72 "minted once" guard, i.e. `index != 0`.
    pub fn mint(
        owner: &T::AccountId,
        token: (T::ClassId, T::TokenId),
        metadata: Vec<u8>,
        data: T::TokenData,
    ) -> Result<(), DispatchError> {
        let (class_id, token_id) = token;
        ensure!(
            !Tokens::<T>::contains_key(class_id, token_id),
            Error::<T>::AlreadyMinted
        );

        let bounded_metadata: BoundedVec<u8, T::MaxTokenMetadata> = metadata
            .try_into()
            .map_err(|_| Error::<T>::MaxMetadataExceeded)?;

        Classes::<T>::try_mutate(class_id, |class_info| -> DispatchResult {
            let info = class_info.as_mut().ok_or(Error::<T>::ClassNotFound)?;
            info.total_issuance = info
                .total_issuance
                .checked_add(&One::one())
                .ok_or(ArithmeticError::Overflow)?;
            Ok(())
        })?;

        let token_info = TokenInfo {
            metadata: bounded_metadata,
            owner: owner.clone(),
            data,
        };
        Tokens::<T>::insert(class_id, token_id, token_info);
        TokensByOwner::<T>::insert((owner, class_id, token_id), ());

        let index = NextIndex::<T>::mutate(class_id, |next| {
            *next += 1;
            *next
        });
        TokenByIndex::<T>::insert(class_id, index, token_id);
        IndexOfToken::<T>::insert(class_id, token_id, index);

        Ok(())
    }

    pub fn burn(owner: &T::AccountId, token: (T::ClassId, T::TokenId)) -> DispatchResult {
        Tokens::<T>::try_mutate_exists(token.0, token.1, |token_info| -> DispatchResult {
            let t = token_info.take().ok_or(Error::<T>::TokenNotFound)?;
            ensure!(t.owner == *owner, Error::<T>::NoPermission);

            Classes::<T>::try_mutate(token.0, |class_info| -> DispatchResult {
                let info = class_info.as_mut().ok_or(Error::<T>::ClassNotFound)?;
                info.total_issuance = info
                    .total_issuance
                    .checked_sub(&One::one())
                    .ok_or(ArithmeticError::Overflow)?;
                Ok(())
            })?;

            TokensByOwner::<T>::remove((owner, token.0, token.1));
            // The enumeration slot is a tombstone: indices are never
            // recycled, so `TokenByIndex`/`IndexOfToken` keep pointing at
            // the burned token rather than being cleared.

            Ok(())
        })
    }

    pub fn destroy_class(owner: &T::AccountId, class_id: T::ClassId) -> DispatchResult {
        Classes::<T>::try_mutate_exists(class_id, |class_info| -> DispatchResult {
            let info = class_info.take().ok_or(Error::<T>::ClassNotFound)?;
            ensure!(info.owner == *owner, Error::<T>::NoPermission);
            ensure!(
                info.total_issuance == Zero::zero(),
                Error::<T>::CannotDestroyClass
            );

            let _ = Tokens::<T>::clear_prefix(class_id, u32::MAX, None);

            Ok(())
        })
    }

    pub fn is_owner(account: &T::AccountId, token: (T::ClassId, T::TokenId)) -> bool {
        TokensByOwner::<T>::contains_key((account, token.0, token.1))
    }

    /// ARC-72 `tokenByIndex`.
    pub fn token_by_index(class_id: T::ClassId, index: u64) -> Option<T::TokenId> {
        TokenByIndex::<T>::get(class_id, index)
    }

    /// ARC-72 `totalSupply`.
    pub fn total_supply(class_id: T::ClassId) -> T::TotalId {
        Classes::<T>::get(class_id)
            .map(|c| c.total_issuance)
            .unwrap_or_default()
    }
}
