//! # RSVP
//!
//! Pre-registration monotonic-price auction for unminted names: every
//! bid on a node must strictly beat the last, one open reservation per
//! account at a time, and a beaten bid's payment is not refunded —
//! this is a bidding ledger, not an escrow.

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use crate::traits::Official;
    use frame_support::pallet_prelude::*;
    use frame_support::traits::{Currency, EnsureOrigin};
    use frame_system::{ensure_signed, pallet_prelude::*};
    use sp_std::vec::Vec;
    use vns_types::{DomainHash, MaxLabelLen, Reservation};

    type BalanceOf<T> =
        <<T as Config>::Currency as Currency<<T as frame_system::Config>::AccountId>>::Balance;
    type ReservationOf<T> = Reservation<<T as frame_system::Config>::AccountId, BalanceOf<T>>;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type Currency: Currency<Self::AccountId>;

        /// Where a winning bid's payment is transferred; retained even
        /// if the reservation is later released or outbid (§9 "RSVP
        /// refund semantics" — no refund).
        type Official: Official<AccountId = Self::AccountId>;

        type ManagerOrigin: EnsureOrigin<Self::RuntimeOrigin, Success = Self::AccountId>;

        type WeightInfo: super::WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T>(_);

    #[pallet::storage]
    pub type Reservations<T: Config> = StorageMap<_, Twox64Concat, DomainHash, ReservationOf<T>>;

    /// One open reservation per account: `account -> node`.
    #[pallet::storage]
    pub type AccountReservation<T: Config> = StorageMap<_, Twox64Concat, T::AccountId, DomainHash>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Emitted on both a successful bid and a release; `owner`/
        /// `price` are the zero account / zero balance on release.
        ReservationSet {
            node: DomainHash,
            owner: T::AccountId,
            name: Vec<u8>,
            length: u16,
            price: BalanceOf<T>,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller already has an open reservation elsewhere.
        AlreadyReserved,
        /// `name` exceeds the 256-byte cap.
        NameTooLong,
        /// `payment` did not strictly exceed the current bid.
        BidTooLow,
        /// Caller has no open reservation on this node.
        NotReserved,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Place a strictly higher bid on `node`. Refuses if the caller
        /// already holds a different open reservation.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::reserve())]
        pub fn reserve(
            origin: OriginFor<T>,
            node: DomainHash,
            name: Vec<u8>,
            length: u16,
            payment: BalanceOf<T>,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            ensure!(name.len() <= MaxLabelLen::get() as usize, Error::<T>::NameTooLong);
            ensure!(AccountReservation::<T>::get(&caller).is_none(), Error::<T>::AlreadyReserved);

            let current_price = Reservations::<T>::get(node).map(|r| r.price).unwrap_or_default();
            ensure!(payment > current_price, Error::<T>::BidTooLow);

            if let Some(previous) = Reservations::<T>::get(node) {
                AccountReservation::<T>::remove(&previous.owner);
            }

            // Payment is transferred immediately and is never refunded,
            // win or lose a later bid (§9 "RSVP refund semantics").
            T::Currency::transfer(
                &caller,
                &T::Official::get_official_account()?,
                payment,
                frame_support::traits::ExistenceRequirement::AllowDeath,
            )?;

            let bounded_name: BoundedVec<u8, MaxLabelLen> =
                name.clone().try_into().map_err(|_| Error::<T>::NameTooLong)?;

            Reservations::<T>::insert(
                node,
                ReservationOf::<T> {
                    owner: caller.clone(),
                    length,
                    price: payment,
                    name: bounded_name,
                },
            );
            AccountReservation::<T>::insert(&caller, node);

            Self::deposit_event(Event::ReservationSet {
                node,
                owner: caller,
                name,
                length,
                price: payment,
            });
            Ok(())
        }

        /// Release the caller's own reservation. No refund is issued —
        /// payment already went to this pallet's account on `reserve`.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::release())]
        pub fn release(origin: OriginFor<T>, node: DomainHash) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            let reservation = Reservations::<T>::get(node).ok_or(Error::<T>::NotReserved)?;
            ensure!(reservation.owner == caller, Error::<T>::NotReserved);

            Reservations::<T>::remove(node);
            AccountReservation::<T>::remove(&caller);

            Self::deposit_event(Event::ReservationSet {
                node,
                owner: Self::zero_account(),
                name: Vec::new(),
                length: 0,
                price: Default::default(),
            });
            Ok(())
        }

        /// Manager-only bootstrap: seed a reservation bypassing payment.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::admin_reserve())]
        pub fn admin_reserve(
            origin: OriginFor<T>,
            owner: T::AccountId,
            node: DomainHash,
            name: Vec<u8>,
            length: u16,
            price: BalanceOf<T>,
        ) -> DispatchResult {
            T::ManagerOrigin::ensure_origin(origin)?;
            ensure!(name.len() <= MaxLabelLen::get() as usize, Error::<T>::NameTooLong);

            if let Some(previous) = Reservations::<T>::get(node) {
                if previous.owner != owner {
                    AccountReservation::<T>::remove(&previous.owner);
                }
            }
            if let Some(existing_node) = AccountReservation::<T>::get(&owner) {
                if existing_node != node {
                    Reservations::<T>::remove(existing_node);
                }
            }

            let bounded_name: BoundedVec<u8, MaxLabelLen> =
                name.clone().try_into().map_err(|_| Error::<T>::NameTooLong)?;

            Reservations::<T>::insert(
                node,
                ReservationOf::<T> {
                    owner: owner.clone(),
                    length,
                    price,
                    name: bounded_name,
                },
            );
            AccountReservation::<T>::insert(&owner, node);

            Self::deposit_event(Event::ReservationSet {
                node,
                owner,
                name,
                length,
                price,
            });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        fn zero_account() -> T::AccountId {
            use codec::Decode;
            T::AccountId::decode(&mut sp_runtime::traits::TrailingZeroInput::zeroes())
                .expect("infinite length input; no invalid inputs for type; qed")
        }
    }
}

use frame_support::dispatch::Weight;

pub trait WeightInfo {
    fn reserve() -> Weight;
    fn release() -> Weight;
    fn admin_reserve() -> Weight;
}

impl WeightInfo for () {
    fn reserve() -> Weight {
        Weight::zero()
    }
    fn release() -> Weight {
        Weight::zero()
    }
    fn admin_reserve() -> Weight {
        Weight::zero()
    }
}
