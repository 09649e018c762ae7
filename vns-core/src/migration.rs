//! Genesis-time seeding helpers, split out of the GenesisConfig builders
//! so a custom chain spec can seed state without going through a
//! `GenesisBuild` impl directly.

use core::marker::PhantomData;
use sp_std::vec::Vec;

use crate::{nft, origin, price_oracle, registry};
use vns_types::DomainHash;

pub struct Initialize<T>(PhantomData<T>);

impl<T> Initialize<T>
where
    T: registry::Config + nft::Config<ClassId = u32, TokenId = DomainHash>,
{
    pub fn initial_registry(official: T::AccountId, root_node: DomainHash) {
        registry::Official::<T>::put(&official);

        let class_id = nft::Pallet::<T>::create_class(&official, Default::default(), ())
            .expect("create_class cannot fail during genesis");

        nft::Pallet::<T>::mint(&official, (class_id, root_node), Default::default(), Default::default())
            .expect("mint cannot fail during genesis");
    }
}

impl<T: origin::Config> Initialize<T> {
    pub fn initial_origin(managers: Vec<T::AccountId>) {
        for manager in managers {
            origin::Origins::<T>::insert(manager, ());
        }
    }
}

impl<T: price_oracle::Config> Initialize<T> {
    pub fn initial_price_oracle(base_price: T::Balance, exchange_rate: T::Balance) {
        price_oracle::BasePrice::<T>::put(base_price);
        price_oracle::ExchangeRate::<T>::put(exchange_rate);
    }
}
