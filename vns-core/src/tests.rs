//! Integration tests driving the four Registrar instances, the Registry
//! and the RSVP auction through the mock runtime.

use crate::mock::*;
use crate::{price_oracle, registrar, registry, rsvp, traits};
use frame_support::instances::{Instance1, Instance2, Instance3};
use frame_support::{assert_noop, assert_ok, traits::Currency};
use sp_core::H256;

fn domain_node(label: &[u8]) -> H256 {
    crate::hashing::subnode(DOMAIN_ROOT, label)
}

fn reverse_node(who: &AccountId) -> H256 {
    use codec::Encode;
    crate::hashing::subnode(REVERSE_ROOT, &who.encode())
}

/// S1 — root registration round-trip: `register` mints the subnode,
/// assigns it to the requested owner, and stamps its expiry.
#[test]
fn register_mints_and_sets_expiry() {
    new_test_ext().execute_with(|| {
        let duration = registrar::BASE_PERIOD_SECONDS;
        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            ALICE,
            duration,
        ));

        let node = domain_node(b"alice");
        assert_eq!(Registry::owner_of(node), Some(ALICE));
        assert!(Nft::is_owner(&ALICE, (0, node)));
        assert_eq!(
            registrar::Expires::<Test, Instance1>::get(node),
            Some(duration)
        );
        assert!(System::events().iter().any(|record| matches!(
            &record.event,
            RuntimeEvent::RegistrarDomain(registrar::Event::NameRegistered { node: n, owner, .. })
                if *n == node && *owner == ALICE
        )));
    });
}

/// S2 — a Registry that returned the wrong subnode (argument order
/// swapped) must be rejected rather than silently trusted. Exercised
/// directly against the `Registry::mint_subname` commutativity check,
/// the same guard `register` relies on.
#[test]
fn subnode_hash_mismatch_is_rejected() {
    new_test_ext().execute_with(|| {
        let wrong_label_node = H256::repeat_byte(0xAA);
        let outcome = frame_support::storage::with_transaction(|| {
            frame_support::storage::TransactionOutcome::Rollback(
                <registry::Pallet<Test> as traits::Registry>::mint_subname(
                    &OFFICIAL_ACCOUNT,
                    DOMAIN_ROOT,
                    wrong_label_node,
                    b"bob".to_vec(),
                    BOB,
                    |_| Ok(()),
                ),
            )
        });
        assert_eq!(
            outcome,
            Ok(Err(registry::Error::<Test>::SubnodeMismatch.into()))
        );
    });
}

/// S3 — renewal within the grace period succeeds and extends the
/// previous expiry rather than resetting it from the current time.
#[test]
fn grace_period_renewal_extends_expiry() {
    new_test_ext().execute_with(|| {
        let duration = registrar::BASE_PERIOD_SECONDS;
        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            ALICE,
            duration,
        ));
        let node = domain_node(b"alice");
        let first_expiry = registrar::Expires::<Test, Instance1>::get(node).unwrap();

        // Thirty days past expiry: inside the 90-day grace period.
        Timestamp::set_timestamp((first_expiry + 30 * 24 * 3600) * 1_000);

        // Renewal is a public good: BOB pays, not the owner.
        assert_ok!(RegistrarDomain::renew(
            RuntimeOrigin::signed(BOB),
            b"alice".to_vec(),
            duration,
        ));
        assert_eq!(
            registrar::Expires::<Test, Instance1>::get(node),
            Some(first_expiry + duration)
        );
    });
}

/// S4 — uppercase and punctuation are rejected by R-Domain's charset.
#[test]
fn charset_rejection() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            RegistrarDomain::register(
                RuntimeOrigin::signed(ALICE),
                b"Alice!".to_vec(),
                ALICE,
                registrar::BASE_PERIOD_SECONDS,
            ),
            registrar::Error::<Test, Instance1>::InvalidName
        );
    });
}

/// S5 — length pricing matches the halving schedule: a 1-character
/// label costs 32x base for one period, a 6+-character label costs 1x
/// base per period.
#[test]
fn length_pricing_matches_schedule() {
    new_test_ext().execute_with(|| {
        assert_ok!(PriceOracle::set_base_price(
            RuntimeOrigin::signed(MANAGER_ACCOUNT),
            5_000_000,
        ));

        let one_char = <price_oracle::Pallet<Test> as traits::PriceOracle>::register_price(
            1,
            31_536_000u64,
        );
        assert_eq!(one_char, Some(160_000_000));

        let six_char = <price_oracle::Pallet<Test> as traits::PriceOracle>::register_price(
            6,
            63_072_000u64,
        );
        assert_eq!(six_char, Some(10_000_000));
    });
}

/// S6 — RSVP is a strictly monotonic auction: a higher bid displaces
/// the previous bidder's open reservation, and an account already
/// holding one open reservation cannot open a second.
#[test]
fn rsvp_monotonic_auction() {
    new_test_ext().execute_with(|| {
        let node = H256::repeat_byte(0x11);
        let other_node = H256::repeat_byte(0x22);

        assert_ok!(Rsvp::reserve(
            RuntimeOrigin::signed(ALICE),
            node,
            b"prize".to_vec(),
            5,
            100,
        ));
        assert_ok!(Rsvp::reserve(
            RuntimeOrigin::signed(BOB),
            node,
            b"prize".to_vec(),
            5,
            200,
        ));

        let reservation = rsvp::Reservations::<Test>::get(node).unwrap();
        assert_eq!(reservation.owner, BOB);
        assert_eq!(reservation.price, 200);
        assert_eq!(rsvp::AccountReservation::<Test>::get(ALICE), None);
        assert_eq!(rsvp::AccountReservation::<Test>::get(BOB), Some(node));

        assert_noop!(
            Rsvp::reserve(
                RuntimeOrigin::signed(BOB),
                other_node,
                b"other".to_vec(),
                5,
                500,
            ),
            rsvp::Error::<Test>::AlreadyReserved
        );

        // A bid that doesn't strictly beat the standing one is refused.
        assert_noop!(
            Rsvp::reserve(RuntimeOrigin::signed(ALICE), node, b"prize".to_vec(), 5, 200),
            rsvp::Error::<Test>::BidTooLow
        );
    });
}

/// R-Domain names may be freely transferred by their owner.
#[test]
fn domain_name_is_transferable_after_registration() {
    new_test_ext().execute_with(|| {
        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            ALICE,
            registrar::BASE_PERIOD_SECONDS,
        ));
        let node = domain_node(b"alice");
        assert_ok!(Registry::set_owner(RuntimeOrigin::signed(ALICE), node, BOB));
        assert_eq!(Registry::owner_of(node), Some(BOB));
    });
}

/// R-Reverse names are soulbound: the Registry refuses to transfer them
/// even at the request of their recorded owner.
#[test]
fn reverse_name_is_soulbound() {
    new_test_ext().execute_with(|| {
        use codec::Encode;
        assert_ok!(RegistrarReverse::register(
            RuntimeOrigin::signed(ALICE),
            ALICE.encode(),
            ALICE,
            0,
        ));
        let node = reverse_node(&ALICE);
        assert_eq!(Registry::owner_of(node), Some(ALICE));

        assert_noop!(
            Registry::set_owner(RuntimeOrigin::signed(ALICE), node, BOB),
            registry::Error::<Test>::NoPermission
        );
    });
}

/// Registering the same label under R-Reverse twice is refused — a
/// non-leasable name, once minted, stays occupied forever.
#[test]
fn reverse_name_cannot_be_registered_twice() {
    new_test_ext().execute_with(|| {
        use codec::Encode;
        assert_ok!(RegistrarReverse::register(
            RuntimeOrigin::signed(ALICE),
            ALICE.encode(),
            ALICE,
            0,
        ));
        assert_noop!(
            RegistrarReverse::register(RuntimeOrigin::signed(ALICE), ALICE.encode(), ALICE, 0),
            registrar::Error::<Test, Instance2>::Occupied
        );
    });
}

/// Past the grace period a lapsed leasable name can be re-registered by
/// a new owner; the stale NFT is implicitly burned first.
#[test]
fn expired_domain_name_can_be_re_registered_after_grace_period() {
    new_test_ext().execute_with(|| {
        let duration = registrar::BASE_PERIOD_SECONDS;
        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            ALICE,
            duration,
        ));
        let node = domain_node(b"alice");
        let first_expiry = registrar::Expires::<Test, Instance1>::get(node).unwrap();

        // Past expiry *and* past the 90-day grace period.
        Timestamp::set_timestamp((first_expiry + 91 * 24 * 3600) * 1_000);

        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(BOB),
            b"alice".to_vec(),
            BOB,
            duration,
        ));
        assert_eq!(Registry::owner_of(node), Some(BOB));
        assert!(!Nft::is_owner(&ALICE, (0, node)));
    });
}

/// R-Collection only lets an application's creator mint its name, and
/// the label that actually gets minted is the application's own
/// account, not the raw bytes the caller supplied.
#[test]
fn collection_name_requires_app_creator() {
    new_test_ext().execute_with(|| {
        let app_id: u64 = 7;
        let app_id_bytes = app_id.to_be_bytes().to_vec();

        assert_noop!(
            RegistrarCollection::register(
                RuntimeOrigin::signed(ALICE),
                app_id_bytes.clone(),
                ALICE,
                0,
            ),
            registrar::Error::<Test, Instance3>::InvalidName
        );

        let creator = app_id + 100;
        assert_ok!(RegistrarCollection::register(
            RuntimeOrigin::signed(creator),
            app_id_bytes,
            ALICE,
            0,
        ));

        use codec::Encode;
        let account = app_id + 1_000;
        let node = crate::hashing::subnode(COLLECTION_ROOT, &account.encode());
        assert_eq!(Registry::owner_of(node), Some(ALICE));
    });
}

/// R-Staking authorizes against the application's recorded `owner`,
/// not its creator.
#[test]
fn staking_name_requires_app_owner() {
    new_test_ext().execute_with(|| {
        let app_id: u64 = 3;
        let app_id_bytes = app_id.to_be_bytes().to_vec();
        let owner = app_id + 200;

        assert_ok!(RegistrarStaking::register(
            RuntimeOrigin::signed(owner),
            app_id_bytes,
            BOB,
            0,
        ));

        use codec::Encode;
        let account = app_id + 1_000;
        let node = crate::hashing::subnode(STAKING_ROOT, &account.encode());
        assert_eq!(Registry::owner_of(node), Some(BOB));
    });
}

/// The resolver's write guard tracks live ownership: the current owner
/// may write records, a stranger may not, and a buyer inherits write
/// access the moment the name changes hands.
#[test]
fn resolver_write_requires_current_owner() {
    new_test_ext().execute_with(|| {
        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            ALICE,
            registrar::BASE_PERIOD_SECONDS,
        ));
        let node = domain_node(b"alice");

        assert_noop!(
            Resolvers::set_addr(RuntimeOrigin::signed(BOB), node, BOB),
            vns_resolvers::Error::<Test>::InvalidPermission
        );

        assert_ok!(Resolvers::set_addr(RuntimeOrigin::signed(ALICE), node, ALICE));
        assert_eq!(Resolvers::addr_of(node), Some(ALICE));

        assert_ok!(Registry::set_owner(RuntimeOrigin::signed(ALICE), node, BOB));
        assert_ok!(Resolvers::set_addr(RuntimeOrigin::signed(BOB), node, BOB));
        assert_eq!(Resolvers::addr_of(node), Some(BOB));
    });
}

/// `clear_records` logically invalidates old entries by bumping the
/// node's version rather than deleting storage.
#[test]
fn resolver_clear_records_bumps_version() {
    new_test_ext().execute_with(|| {
        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            ALICE,
            registrar::BASE_PERIOD_SECONDS,
        ));
        let node = domain_node(b"alice");

        assert_ok!(Resolvers::set_text(
            RuntimeOrigin::signed(ALICE),
            node,
            vns_resolvers::keys::EMAIL,
            b"alice@example.com".to_vec(),
        ));
        assert!(Resolvers::text_of(node, vns_resolvers::keys::EMAIL).is_some());

        assert_ok!(Resolvers::clear_records(RuntimeOrigin::signed(ALICE), node));
        assert!(Resolvers::text_of(node, vns_resolvers::keys::EMAIL).is_none());

        assert_ok!(Resolvers::set_text(
            RuntimeOrigin::signed(ALICE),
            node,
            vns_resolvers::keys::EMAIL,
            b"new@example.com".to_vec(),
        ));
        assert_eq!(
            Resolvers::text_of(node, vns_resolvers::keys::EMAIL),
            Some(b"new@example.com".to_vec().try_into().unwrap())
        );
    });
}

/// Only the admin owner may rotate the delegate/upgrader accounts.
#[test]
fn admin_owner_can_rotate_delegate_and_non_owner_cannot() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            Admin::set_delegate(RuntimeOrigin::signed(ALICE), ALICE),
            crate::admin::Error::<Test>::NoPermission
        );

        assert_ok!(Admin::set_delegate(
            RuntimeOrigin::signed(OFFICIAL_ACCOUNT),
            ALICE,
        ));
        assert!(<crate::admin::Pallet<Test> as traits::Administration<AccountId>>::is_delegate(
            &ALICE
        ));
    });
}

/// Turning the global registrar switch off blocks every instance's
/// `register`, even one otherwise perfectly valid.
#[test]
fn registrar_closed_blocks_registration() {
    new_test_ext().execute_with(|| {
        assert_ok!(ManagerOrigin::set_registrar_open(
            RuntimeOrigin::signed(MANAGER_ACCOUNT),
            false,
        ));

        assert_noop!(
            RegistrarDomain::register(
                RuntimeOrigin::signed(ALICE),
                b"alice".to_vec(),
                ALICE,
                registrar::BASE_PERIOD_SECONDS,
            ),
            registrar::Error::<Test, Instance1>::RegistrarClosed
        );
    });
}

/// `register` charges the going price to the caller, not the intended
/// owner, and deposits it with the official account.
#[test]
fn register_charges_caller_and_pays_official() {
    new_test_ext().execute_with(|| {
        let before_caller = Balances::free_balance(ALICE);
        let before_official = Balances::free_balance(OFFICIAL_ACCOUNT);

        assert_ok!(RegistrarDomain::register(
            RuntimeOrigin::signed(ALICE),
            b"alice".to_vec(),
            BOB,
            registrar::BASE_PERIOD_SECONDS,
        ));

        let price = <price_oracle::Pallet<Test> as traits::PriceOracle>::register_price(
            5,
            registrar::BASE_PERIOD_SECONDS,
        )
        .unwrap();
        assert_eq!(Balances::free_balance(ALICE), before_caller - price);
        assert_eq!(
            Balances::free_balance(OFFICIAL_ACCOUNT),
            before_official + price
        );
        assert_eq!(Registry::owner_of(domain_node(b"alice")), Some(BOB));
    });
}
