//! # Price oracle
//!
//! Closed-form length pricing for the Registrar family: `price(len,
//! duration) = base_cost(len) * (duration / base_period)`, where
//! `base_cost` halves for every character past the first five and
//! `base_period` is a year. Only the per-unit price (`BasePrice`) and
//! the fiat/chain-token `ExchangeRate` are manager-settable state —
//! the halving schedule itself is a pure function, not a stored table,
//! unlike the upstream oracle's open 11-slot arrays.

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use super::WeightInfo;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type Balance: Parameter
            + Member
            + sp_runtime::traits::AtLeast32BitUnsigned
            + Default
            + Copy
            + MaxEncodedLen;

        type ManagerOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T>(_);

    /// Price, in `Balance`, of the cheapest (6+ character) name for one
    /// `base_period`. Every shorter length is a power-of-two multiple of
    /// this unit.
    #[pallet::storage]
    pub type BasePrice<T: Config> = StorageValue<_, T::Balance, ValueQuery>;

    /// Chain-token units per fiat unit, applied on top of `BasePrice`
    /// when a Registrar wants prices quoted in a stable unit.
    #[pallet::storage]
    pub type ExchangeRate<T: Config> = StorageValue<_, T::Balance, ValueQuery>;

    #[pallet::genesis_config]
    pub struct GenesisConfig<T: Config> {
        pub base_price: T::Balance,
        pub exchange_rate: T::Balance,
    }

    #[cfg(feature = "std")]
    impl<T: Config> Default for GenesisConfig<T> {
        fn default() -> Self {
            Self {
                base_price: Default::default(),
                exchange_rate: Default::default(),
            }
        }
    }

    #[pallet::genesis_build]
    impl<T: Config> GenesisBuild<T> for GenesisConfig<T> {
        fn build(&self) {
            BasePrice::<T>::put(self.base_price);
            ExchangeRate::<T>::put(self.exchange_rate);
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        BasePriceChanged { base_price: T::Balance },
        ExchangeRateChanged { exchange_rate: T::Balance },
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_base_price())]
        pub fn set_base_price(origin: OriginFor<T>, base_price: T::Balance) -> DispatchResult {
            T::ManagerOrigin::ensure_origin(origin)?;
            BasePrice::<T>::put(base_price);
            Self::deposit_event(Event::BasePriceChanged { base_price });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_exchange_rate())]
        pub fn set_exchange_rate(origin: OriginFor<T>, exchange_rate: T::Balance) -> DispatchResult {
            T::ManagerOrigin::ensure_origin(origin)?;
            ExchangeRate::<T>::put(exchange_rate);
            Self::deposit_event(Event::ExchangeRateChanged { exchange_rate });
            Ok(())
        }
    }
}

use frame_support::traits::EnsureOrigin;
use frame_support::{dispatch::Weight, pallet_prelude::MaxEncodedLen};
use sp_runtime::traits::{Saturating, UniqueSaturatedInto};

/// `base_cost(u, len)`: `u*32, u*16, u*8, u*4, u*2, u*1` for lengths
/// `1..=6+`. The multiplier halves per character up to length 6, where
/// it bottoms out.
fn length_multiplier(len: usize) -> u32 {
    match len {
        0 | 1 => 32,
        2 => 16,
        3 => 8,
        4 => 4,
        5 => 2,
        _ => 1,
    }
}

impl<T: pallet::Config> Pallet<T> {
    /// `base_cost(unit, len) = unit * length_multiplier(len)`.
    pub fn base_cost(len: usize) -> T::Balance {
        pallet::BasePrice::<T>::get().saturating_mul(length_multiplier(len).into())
    }
}

impl<T, Duration> crate::traits::PriceOracle for pallet::Pallet<T>
where
    T: pallet::Config,
    Duration: UniqueSaturatedInto<u64>,
{
    type Duration = Duration;
    type Balance = T::Balance;

    fn renew_price(name_len: usize, duration: Self::Duration) -> Option<T::Balance> {
        let duration: u64 = duration.unique_saturated_into();
        let periods = duration / crate::registrar::BASE_PERIOD_SECONDS;
        if periods == 0 {
            return None;
        }
        Some(Self::base_cost(name_len).saturating_mul(periods.into()))
    }

    fn register_price(name_len: usize, duration: Self::Duration) -> Option<T::Balance> {
        Self::renew_price(name_len, duration)
    }
}

pub trait WeightInfo {
    fn set_base_price() -> Weight;
    fn set_exchange_rate() -> Weight;
}

impl WeightInfo for () {
    fn set_base_price() -> Weight {
        Weight::zero()
    }
    fn set_exchange_rate() -> Weight {
        Weight::zero()
    }
}
