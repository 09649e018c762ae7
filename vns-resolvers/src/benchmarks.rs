//! Benchmarking setup for vns-resolvers, exercised against a real
//! `vns-core` Registrar/Registry rather than a local mock (this crate
//! carries none), since a resolver write is only meaningful once a
//! node actually has an owner.
#![cfg(feature = "runtime-benchmarks")]

use crate::pallet::{Call, Config, Pallet};
use frame_benchmarking::{account, benchmarks};
use frame_support::instances::Instance1;
use frame_support::traits::{Currency, Get};
use frame_system::RawOrigin;
use sp_runtime::DispatchError;
use vns_types::DomainHash;

const SEED: u32 = 996;

fn registered_node<T>(idx: u32) -> Result<(T::AccountId, DomainHash), DispatchError>
where
    T: Config + vns_core::registrar::Config<Instance1> + vns_core::origin::Config,
{
    let owner: T::AccountId = account("owner", idx, SEED);
    let _ = <T as vns_core::registrar::Config<Instance1>>::Currency::make_free_balance_be(
        &owner,
        888_888_888_888u32.into(),
    );
    let label = alloc::format!("bench{idx}").into_bytes();
    vns_core::registrar::Pallet::<T, Instance1>::register(
        RawOrigin::Signed(owner.clone()).into(),
        label.clone(),
        owner.clone(),
        <T as vns_core::registrar::Config<Instance1>>::Moment::from(
            vns_core::registrar::BASE_PERIOD_SECONDS,
        ),
    )?;
    let node = vns_core::hashing::subnode(
        <T as vns_core::registrar::Config<Instance1>>::RootNode::get(),
        &label,
    );
    Ok((owner, node))
}

benchmarks! {
    where_clause {
        where
        T: vns_core::registrar::Config<Instance1> + vns_core::origin::Config,
    }

    set_addr {
        let (owner, node) = registered_node::<T>(0)?;
    }: _(RawOrigin::Signed(owner.clone()), node, owner)

    set_address {
        let (owner, node) = registered_node::<T>(1)?;
    }: _(RawOrigin::Signed(owner.clone()), node, 60u64, owner)

    set_text {
        let l in 0..256;
        let (owner, node) = registered_node::<T>(2)?;
        let value = sp_std::vec![7u8; l as usize];
    }: _(RawOrigin::Signed(owner), node, crate::keys::EMAIL, value)

    set_name {
        let l in 0..256;
        let (owner, node) = registered_node::<T>(3)?;
        let name = sp_std::vec![b'a'; l as usize];
    }: _(RawOrigin::Signed(owner), node, name)

    clear_records {
        let (owner, node) = registered_node::<T>(4)?;
        Pallet::<T>::set_addr(RawOrigin::Signed(owner.clone()).into(), node, owner.clone())?;
    }: _(RawOrigin::Signed(owner), node)
}
