use crate::registrars::{
    AggregateRegistrar, ApplicationAuthority, CollectionNameValidator, DomainNameValidator,
    FlatPricing, Leasable, NonLeasable, ReverseNameValidator, StakingNameValidator,
};
use frame_support::{instances::*, parameter_types};
use sp_core::H256;
use sp_runtime::{
    testing::Header,
    traits::{BlakeTwo256, IdentityLookup},
};
use vns_types::DomainHash;

pub type UncheckedExtrinsic = frame_system::mocking::MockUncheckedExtrinsic<Test>;
pub type Block = frame_system::mocking::MockBlock<Test>;
pub type Balance = u128;
pub type AccountId = u64;
pub type Moment = u64;

pub const DOMAIN_ROOT: DomainHash = H256([
    63, 206, 125, 19, 100, 168, 147, 226, 19, 188, 66, 18, 121, 43, 81, 127, 252, 136, 245, 177,
    59, 134, 200, 239, 156, 141, 57, 12, 58, 19, 112, 206,
]);
pub const REVERSE_ROOT: DomainHash = H256([
    40, 176, 66, 80, 226, 106, 137, 121, 141, 170, 194, 128, 195, 181, 31, 184, 186, 190, 216, 60,
    185, 180, 141, 134, 171, 252, 4, 74, 2, 250, 3, 144,
]);
pub const COLLECTION_ROOT: DomainHash = H256([1u8; 32]);
pub const STAKING_ROOT: DomainHash = H256([2u8; 32]);

frame_support::construct_runtime!(
    pub enum Test where
        Block = Block,
        NodeBlock = Block,
        UncheckedExtrinsic = UncheckedExtrinsic,
    {
        System: frame_system,
        Balances: pallet_balances,
        Timestamp: pallet_timestamp,
        ManagerOrigin: crate::origin,
        Admin: crate::admin,
        Nft: crate::nft,
        Registry: crate::registry,
        Rsvp: crate::rsvp,
        PriceOracle: crate::price_oracle,
        RegistrarDomain: crate::registrar::<Instance1>,
        RegistrarReverse: crate::registrar::<Instance2>,
        RegistrarCollection: crate::registrar::<Instance3>,
        RegistrarStaking: crate::registrar::<Instance4>,
        Resolvers: vns_resolvers,
    }
);

parameter_types! {
    pub const BlockHashCount: u64 = 250;
    pub const SS58Prefix: u8 = 42;
}

impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Index = u64;
    type BlockNumber = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = AccountId;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Header = Header;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = BlockHashCount;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = pallet_balances::AccountData<Balance>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = SS58Prefix;
    type OnSetCode = ();
    type MaxConsumers = frame_support::traits::ConstU32<16>;
}

parameter_types! {
    pub const ExistentialDeposit: Balance = 500;
    pub const MaxLocks: u32 = 50;
}

impl pallet_balances::Config for Test {
    type MaxLocks = MaxLocks;
    type MaxReserves = ();
    type ReserveIdentifier = [u8; 8];
    type Balance = Balance;
    type RuntimeEvent = RuntimeEvent;
    type DustRemoval = ();
    type ExistentialDeposit = ExistentialDeposit;
    type AccountStore = System;
    type WeightInfo = ();
}

parameter_types! {
    pub const MinimumPeriod: u64 = 3_000;
}

impl pallet_timestamp::Config for Test {
    type Moment = Moment;
    type OnTimestampSet = ();
    type MinimumPeriod = MinimumPeriod;
    type WeightInfo = ();
}

impl crate::origin::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

impl crate::admin::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

impl crate::rsvp::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type Official = crate::registry::Pallet<Test>;
    type ManagerOrigin = ManagerOrigin;
    type WeightInfo = ();
}

parameter_types! {
    pub const MaxMetadata: u32 = 64;
}

impl crate::nft::Config for Test {
    type ClassId = u32;
    type TotalId = u32;
    type TokenId = DomainHash;
    type ClassData = ();
    type TokenData = vns_types::Record<Moment>;
    type MaxClassMetadata = MaxMetadata;
    type MaxTokenMetadata = MaxMetadata;
}

pub type TestRegistrar = AggregateRegistrar<
    crate::registrar::Pallet<Test, Instance1>,
    crate::registrar::Pallet<Test, Instance2>,
    crate::registrar::Pallet<Test, Instance3>,
    crate::registrar::Pallet<Test, Instance4>,
>;

impl crate::registry::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
    type Registrar = TestRegistrar;
    type ResolverId = u64;
    type Moment = Moment;
    type ManagerOrigin = ManagerOrigin;
}

impl crate::price_oracle::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Balance = Balance;
    type ManagerOrigin = ManagerOrigin;
    type WeightInfo = ();
}

/// Test double for the foreign "application" pallet R-Collection/
/// R-Staking validate against: a pure function of `app_id` instead of
/// a real storage-backed registry, standing in for whatever pallet a
/// production runtime plugs in.
pub struct MockApplications;

impl ApplicationAuthority<AccountId> for MockApplications {
    fn creator(app_id: u64) -> Option<AccountId> {
        Some(app_id + 100)
    }

    fn owner(app_id: u64) -> Option<AccountId> {
        Some(app_id + 200)
    }

    fn account_of(app_id: u64) -> Option<AccountId> {
        Some(app_id + 1_000)
    }
}

parameter_types! {
    pub const DomainGracePeriod: Moment = 90 * 24 * 3_600;
    pub const NonLeasableGracePeriod: Moment = 0;
    pub const DomainTransferable: bool = true;
    pub const SoulboundTransferable: bool = false;
    pub const ReverseStorageCost: Balance = 10;
    pub const CollectionStorageCost: Balance = 10;
    pub const StakingStorageCost: Balance = 10;
}

impl crate::registrar::Config<Instance1> for Test {
    type RuntimeEvent = RuntimeEvent;
    type Moment = Moment;
    type NowProvider = Timestamp;
    type GracePeriod = DomainGracePeriod;
    type RootNode = DomainRootGet;
    type NameValidator = DomainNameValidator;
    type Lease = Leasable;
    type Transferable = DomainTransferable;
    type Pricing = crate::price_oracle::Pallet<Test>;
    type Registry = crate::registry::Pallet<Test>;
    type Official = crate::registry::Pallet<Test>;
    type Currency = Balances;
    type ManagerOrigin = ManagerOrigin;
    type IsOpen = crate::origin::Pallet<Test>;
    type WeightInfo = ();
}

impl crate::registrar::Config<Instance2> for Test {
    type RuntimeEvent = RuntimeEvent;
    type Moment = Moment;
    type NowProvider = Timestamp;
    type GracePeriod = NonLeasableGracePeriod;
    type RootNode = ReverseRootGet;
    type NameValidator = ReverseNameValidator<AccountId>;
    type Lease = NonLeasable;
    type Transferable = SoulboundTransferable;
    type Pricing = FlatPricing<Balance, ReverseStorageCost, Moment>;
    type Registry = crate::registry::Pallet<Test>;
    type Official = crate::registry::Pallet<Test>;
    type Currency = Balances;
    type ManagerOrigin = ManagerOrigin;
    type IsOpen = crate::origin::Pallet<Test>;
    type WeightInfo = ();
}

impl crate::registrar::Config<Instance3> for Test {
    type RuntimeEvent = RuntimeEvent;
    type Moment = Moment;
    type NowProvider = Timestamp;
    type GracePeriod = NonLeasableGracePeriod;
    type RootNode = CollectionRootGet;
    type NameValidator = CollectionNameValidator<MockApplications, AccountId>;
    type Lease = NonLeasable;
    type Transferable = SoulboundTransferable;
    type Pricing = FlatPricing<Balance, CollectionStorageCost, Moment>;
    type Registry = crate::registry::Pallet<Test>;
    type Official = crate::registry::Pallet<Test>;
    type Currency = Balances;
    type ManagerOrigin = ManagerOrigin;
    type IsOpen = crate::origin::Pallet<Test>;
    type WeightInfo = ();
}

impl crate::registrar::Config<Instance4> for Test {
    type RuntimeEvent = RuntimeEvent;
    type Moment = Moment;
    type NowProvider = Timestamp;
    type GracePeriod = NonLeasableGracePeriod;
    type RootNode = StakingRootGet;
    type NameValidator = StakingNameValidator<MockApplications, AccountId>;
    type Lease = NonLeasable;
    type Transferable = SoulboundTransferable;
    type Pricing = FlatPricing<Balance, StakingStorageCost, Moment>;
    type Registry = crate::registry::Pallet<Test>;
    type Official = crate::registry::Pallet<Test>;
    type Currency = Balances;
    type ManagerOrigin = ManagerOrigin;
    type IsOpen = crate::origin::Pallet<Test>;
    type WeightInfo = ();
}

pub struct DomainRootGet;
impl frame_support::traits::Get<DomainHash> for DomainRootGet {
    fn get() -> DomainHash {
        DOMAIN_ROOT
    }
}
pub struct ReverseRootGet;
impl frame_support::traits::Get<DomainHash> for ReverseRootGet {
    fn get() -> DomainHash {
        REVERSE_ROOT
    }
}
pub struct CollectionRootGet;
impl frame_support::traits::Get<DomainHash> for CollectionRootGet {
    fn get() -> DomainHash {
        COLLECTION_ROOT
    }
}
pub struct StakingRootGet;
impl frame_support::traits::Get<DomainHash> for StakingRootGet {
    fn get() -> DomainHash {
        STAKING_ROOT
    }
}

pub struct TestChecker;

impl vns_resolvers::RegistryChecker for TestChecker {
    type Hash = DomainHash;
    type AccountId = AccountId;

    fn check_node_useable(node: Self::Hash, owner: &Self::AccountId) -> bool {
        use crate::traits::Registrar as _;
        crate::registry::Pallet::<Test>::owner_of(node).as_ref() == Some(owner)
            && TestRegistrar::check_expires_useable(node).is_ok()
    }
}

impl vns_resolvers::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
    type RegistryChecker = TestChecker;
}

pub const OFFICIAL_ACCOUNT: AccountId = 0;
pub const MANAGER_ACCOUNT: AccountId = 1;
pub const UPGRADER_ACCOUNT: AccountId = 2;
pub const DELEGATE_ACCOUNT: AccountId = 3;

pub const ALICE: AccountId = 10;
pub const BOB: AccountId = 11;

pub const BASE: Balance = 1_000_000_000_000;

/// Build genesis storage according to the mock `Test` runtime: one
/// official-owned record tree with all four Registrar roots already
/// minted (a Registrar can only mint subnodes of an existing record),
/// a manager whitelist, and seed balances for the test accounts.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut storage = frame_system::GenesisConfig::default()
        .build_storage::<Test>()
        .unwrap();

    let registry_genesis = crate::registry::GenesisConfig::<Test> {
        official: Some(OFFICIAL_ACCOUNT),
        operators: Default::default(),
    };
    <crate::registry::GenesisConfig<Test> as frame_support::traits::GenesisBuild<Test>>::assimilate_storage(
        &registry_genesis,
        &mut storage,
    )
    .unwrap();

    let nft_genesis = crate::nft::GenesisConfig::<Test> {
        tokens: vec![(
            OFFICIAL_ACCOUNT,
            Default::default(),
            (),
            vec![
                (OFFICIAL_ACCOUNT, Default::default(), Default::default(), DOMAIN_ROOT),
                (OFFICIAL_ACCOUNT, Default::default(), Default::default(), REVERSE_ROOT),
                (OFFICIAL_ACCOUNT, Default::default(), Default::default(), COLLECTION_ROOT),
                (OFFICIAL_ACCOUNT, Default::default(), Default::default(), STAKING_ROOT),
            ],
        )],
    };
    <crate::nft::GenesisConfig<Test> as frame_support::traits::GenesisBuild<Test>>::assimilate_storage(
        &nft_genesis,
        &mut storage,
    )
    .unwrap();

    let origin_genesis = crate::origin::GenesisConfig::<Test> {
        origins: vec![OFFICIAL_ACCOUNT, MANAGER_ACCOUNT],
    };
    <crate::origin::GenesisConfig<Test> as frame_support::traits::GenesisBuild<Test>>::assimilate_storage(
        &origin_genesis,
        &mut storage,
    )
    .unwrap();

    let admin_genesis = crate::admin::GenesisConfig::<Test> {
        owner: OFFICIAL_ACCOUNT,
        upgrader: UPGRADER_ACCOUNT,
        delegate: DELEGATE_ACCOUNT,
    };
    <crate::admin::GenesisConfig<Test> as frame_support::traits::GenesisBuild<Test>>::assimilate_storage(
        &admin_genesis,
        &mut storage,
    )
    .unwrap();

    let price_oracle_genesis = crate::price_oracle::GenesisConfig::<Test> {
        base_price: 100,
        exchange_rate: BASE,
    };
    <crate::price_oracle::GenesisConfig<Test> as frame_support::traits::GenesisBuild<Test>>::assimilate_storage(
        &price_oracle_genesis,
        &mut storage,
    )
    .unwrap();

    let balances_genesis = pallet_balances::GenesisConfig::<Test> {
        balances: vec![(ALICE, 500 * BASE), (BOB, 500 * BASE)],
    };
    <pallet_balances::GenesisConfig<Test> as frame_support::traits::GenesisBuild<Test>>::assimilate_storage(
        &balances_genesis,
        &mut storage,
    )
    .unwrap();

    <crate::registrar::GenesisConfig<Test, Instance1> as frame_support::traits::GenesisBuild<Test, Instance1>>::assimilate_storage(
        &crate::registrar::GenesisConfig::<Test, Instance1> { expires: Default::default() },
        &mut storage,
    )
    .unwrap();
    <crate::registrar::GenesisConfig<Test, Instance2> as frame_support::traits::GenesisBuild<Test, Instance2>>::assimilate_storage(
        &crate::registrar::GenesisConfig::<Test, Instance2> { expires: Default::default() },
        &mut storage,
    )
    .unwrap();
    <crate::registrar::GenesisConfig<Test, Instance3> as frame_support::traits::GenesisBuild<Test, Instance3>>::assimilate_storage(
        &crate::registrar::GenesisConfig::<Test, Instance3> { expires: Default::default() },
        &mut storage,
    )
    .unwrap();
    <crate::registrar::GenesisConfig<Test, Instance4> as frame_support::traits::GenesisBuild<Test, Instance4>>::assimilate_storage(
        &crate::registrar::GenesisConfig::<Test, Instance4> { expires: Default::default() },
        &mut storage,
    )
    .unwrap();

    let mut ext: sp_io::TestExternalities = storage.into();
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Advance both the block number and the wall clock, one second per
/// block — leasable names are priced and expire in seconds, not
/// blocks, so tests that need time to pass drive it through here.
#[allow(dead_code)]
pub fn run_to_block(n: u64) {
    while System::block_number() < n {
        Timestamp::set_timestamp(Timestamp::get() + 1_000);
        System::set_block_number(System::block_number() + 1);
    }
}
