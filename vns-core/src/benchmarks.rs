//! Benchmarking setup for vns-core, one module per pallet.
#![cfg(feature = "runtime-benchmarks")]

use frame_benchmarking::{account, benchmarks, benchmarks_instance_pallet};
use frame_support::traits::{Currency, Get};
use frame_system::RawOrigin;
use sp_runtime::traits::StaticLookup;
use vns_types::DomainHash;

pub const SEED: u32 = 996;

pub fn account_to_source<T: frame_system::Config>(
    account: T::AccountId,
) -> <T::Lookup as StaticLookup>::Source {
    <T::Lookup as StaticLookup>::unlookup(account)
}

pub fn get_manager<T: crate::origin::Config>() -> T::AccountId {
    crate::origin::Origins::<T>::iter_keys()
        .next()
        .expect("mock genesis seeds at least one manager")
}

pub fn rich_caller<T, C>(idx: u32) -> T::AccountId
where
    T: frame_system::Config,
    C: Currency<T::AccountId>,
{
    let caller: T::AccountId = account("caller", idx, SEED);
    let _ = C::make_free_balance_be(&caller, 999_999_999_999_999u32.into());
    caller
}

mod registry {
    use super::*;
    #[cfg(test)]
    use crate::mock::Test;
    use crate::registry::{Call, Config, Pallet};

    fn minted_node<T: Config>(idx: u32) -> (T::AccountId, DomainHash) {
        let owner = account::<T::AccountId>("owner", idx, SEED);
        let node = DomainHash::from_low_u64_be(idx as u64 + 1);
        crate::nft::Pallet::<T>::mint(&owner, (T::ClassId::default(), node), Default::default(), Default::default())
            .expect("mint does not fail in benchmark setup");
        (owner, node)
    }

    benchmarks! {
        where_clause { where T: crate::origin::Config }

        set_resolver {
            let (owner, node) = minted_node::<T>(0);
        }: _(RawOrigin::Signed(owner), node, T::ResolverId::default())

        set_ttl {
            let (owner, node) = minted_node::<T>(1);
        }: _(RawOrigin::Signed(owner), node, 3600u64)

        set_approval_for_all {
            let owner = account::<T::AccountId>("owner", 2, SEED);
            let operator = account::<T::AccountId>("operator", 3, SEED);
        }: _(RawOrigin::Signed(owner.clone()), account_to_source::<T>(operator.clone()), true)
        verify {
            assert!(Pallet::<T>::is_approved_for_all(&owner, &operator));
        }

        approve {
            let (owner, node) = minted_node::<T>(4);
            let to = account::<T::AccountId>("to", 5, SEED);
        }: _(RawOrigin::Signed(owner), to, node)

        burn {
            let (owner, node) = minted_node::<T>(6);
        }: _(RawOrigin::Signed(owner), node)
        verify {
            assert!(!Pallet::<T>::record_exists(node));
        }

        set_official {
            let official = account::<T::AccountId>("official", 7, SEED);
        }: _(RawOrigin::Signed(get_manager::<T>()), official.clone())
        verify {
            assert_eq!(crate::registry::Official::<T>::get(), Some(official));
        }

        impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), Test);
    }
}

mod registrar {
    use super::*;
    #[cfg(test)]
    use crate::mock::Test;
    use crate::registrar::{Call, Config, Pallet, BASE_PERIOD_SECONDS};
    use frame_support::instances::Instance1;

    fn some_label(idx: u32) -> sp_std::vec::Vec<u8> {
        alloc::format!("bench{idx}").into_bytes()
    }

    benchmarks_instance_pallet! {
        register {
            let caller = rich_caller::<T, T::Currency>(8);
        }: _(RawOrigin::Signed(caller.clone()), some_label(0), caller, T::Moment::from(BASE_PERIOD_SECONDS))

        renew {
            let caller = rich_caller::<T, T::Currency>(8);
            Pallet::<T, I>::register(RawOrigin::Signed(caller.clone()).into(), some_label(1), caller.clone(), T::Moment::from(BASE_PERIOD_SECONDS))?;
        }: _(RawOrigin::Signed(caller), some_label(1), T::Moment::from(BASE_PERIOD_SECONDS))

        reclaim {
            let caller = rich_caller::<T, T::Currency>(8);
            Pallet::<T, I>::register(RawOrigin::Signed(caller.clone()).into(), some_label(2), caller.clone(), T::Moment::from(BASE_PERIOD_SECONDS))?;
        }: _(RawOrigin::Signed(caller), some_label(2))

        impl_benchmark_test_suite!(Pallet::<T, Instance1>, crate::mock::new_test_ext(), Test);
    }
}

mod rsvp {
    use super::*;
    #[cfg(test)]
    use crate::mock::Test;
    use crate::rsvp::{Call, Config, Pallet};

    benchmarks! {
        reserve {
            let caller = rich_caller::<T, T::Currency>(0);
            let node = DomainHash::from_low_u64_be(1);
        }: _(RawOrigin::Signed(caller), node, b"bench".to_vec(), 5u16, 100u32.into())

        release {
            let caller = rich_caller::<T, T::Currency>(0);
            let node = DomainHash::from_low_u64_be(1);
            Pallet::<T>::reserve(RawOrigin::Signed(caller.clone()).into(), node, b"bench".to_vec(), 5u16, 100u32.into())?;
        }: _(RawOrigin::Signed(caller), node)

        admin_reserve {
            let owner = account::<T::AccountId>("owner", 0, SEED);
            let node = DomainHash::from_low_u64_be(2);
        }: _(RawOrigin::Signed(get_manager::<T>()), owner, node, b"bench".to_vec(), 5u16, 100u32.into())

        impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), Test);
    }
}

mod price_oracle {
    use super::*;
    #[cfg(test)]
    use crate::mock::Test;
    use crate::price_oracle::{Call, Config, Pallet};

    benchmarks! {
        set_base_price {
        }: _(RawOrigin::Signed(get_manager::<T>()), 996u32.into())

        set_exchange_rate {
        }: _(RawOrigin::Signed(get_manager::<T>()), 1000u32.into())

        impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), Test);
    }
}

mod origin {
    use super::*;
    #[cfg(test)]
    use crate::mock::Test;
    use crate::origin::{Call, Config, Pallet};

    benchmarks! {
        set_registrar_open {
        }: _(RawOrigin::Signed(get_manager::<T>()), false)

        set_origin_true {
            let account = account::<T::AccountId>("account", 7, SEED);
        }: set_origin(RawOrigin::Signed(get_manager::<T>()), account_to_source::<T>(account), true)

        set_origin_false {
            let account = account::<T::AccountId>("account", 7, SEED);
            Pallet::<T>::set_origin(RawOrigin::Signed(get_manager::<T>()).into(), account_to_source::<T>(account.clone()), true)?;
        }: set_origin(RawOrigin::Signed(get_manager::<T>()), account_to_source::<T>(account), false)

        set_origin_for_root_true {
            let account = account::<T::AccountId>("account", 8, SEED);
        }: set_origin_for_root(RawOrigin::Root, account_to_source::<T>(account), true)

        set_origin_for_root_false {
            let account = account::<T::AccountId>("account", 8, SEED);
            Pallet::<T>::set_origin_for_root(RawOrigin::Root.into(), account_to_source::<T>(account.clone()), true)?;
        }: set_origin_for_root(RawOrigin::Root, account_to_source::<T>(account), false)

        impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), Test);
    }
}

mod admin {
    use super::*;
    #[cfg(test)]
    use crate::mock::Test;
    use crate::admin::{Call, Config, Pallet};

    fn owner_of<T: Config>() -> T::AccountId {
        crate::admin::Admin::<T>::get()
            .expect("admin pallet genesis seeds an owner")
            .owner
    }

    benchmarks! {
        set_owner {
            let new_owner = account::<T::AccountId>("new_owner", 0, SEED);
        }: _(RawOrigin::Signed(owner_of::<T>()), new_owner)

        set_upgrader {
            let new_upgrader = account::<T::AccountId>("new_upgrader", 1, SEED);
        }: _(RawOrigin::Signed(owner_of::<T>()), new_upgrader)

        set_delegate {
            let new_delegate = account::<T::AccountId>("new_delegate", 2, SEED);
        }: _(RawOrigin::Signed(owner_of::<T>()), new_delegate)

        set_updatable {
        }: _(RawOrigin::Signed(owner_of::<T>()), false)

        set_stakeable {
        }: _(RawOrigin::Signed(owner_of::<T>()), true)

        impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), Test);
    }
}
