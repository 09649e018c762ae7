//! Concrete policies for the four Registrar instances named in the
//! spec: R-Domain, R-Reverse, R-Collection, R-Staking. Each is a
//! zero-sized marker type implementing `NameValidator`/`LeasePolicy`,
//! plugged into one `registrar::Config<I>` per instance — the same
//! `Get`-driven policy injection `price_oracle.rs`/`origin.rs` already
//! lean on, just applied to name validation instead of a constant.

use crate::traits::{LeasePolicy, NameValidator};
use codec::Encode;
use sp_runtime::DispatchResult;
use sp_std::marker::PhantomData;
use sp_std::vec::Vec;

/// R-Domain: ASCII `[0-9a-z-]`, 1..=32 bytes. Leasable, length/duration
/// priced through `price_oracle`.
pub struct DomainNameValidator;

impl<AccountId> NameValidator<AccountId> for DomainNameValidator {
    fn validate(_caller: &AccountId, name: &[u8]) -> Option<(Vec<u8>, usize)> {
        if name.is_empty() || name.len() > 32 {
            return None;
        }
        if !name
            .iter()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'-'))
        {
            return None;
        }
        Some((name.to_vec(), name.len()))
    }
}

/// What R-Collection/R-Staking need from the foreign "application"
/// collaborator: who may register its name, and the account address
/// that becomes the minted label.
pub trait ApplicationAuthority<AccountId> {
    /// The application's creator (R-Collection's authorization check).
    fn creator(app_id: u64) -> Option<AccountId>;
    /// The `owner` key the application's own storage records
    /// (R-Staking's authorization check).
    fn owner(app_id: u64) -> Option<AccountId>;
    /// The application's account address — this, not the raw app id
    /// bytes, is what gets registered as the name.
    fn account_of(app_id: u64) -> Option<AccountId>;
}

/// R-Reverse: the label must equal the caller's own account id,
/// encoded canonically. Paired with `NonLeasable` — soulbound, no
/// expiry, no fee beyond the storage base.
pub struct ReverseNameValidator<AccountId>(PhantomData<AccountId>);

impl<AccountId: Encode + PartialEq> NameValidator<AccountId> for ReverseNameValidator<AccountId> {
    fn validate(caller: &AccountId, name: &[u8]) -> Option<(Vec<u8>, usize)> {
        if name == caller.encode().as_slice() {
            Some((name.to_vec(), name.len()))
        } else {
            None
        }
    }
}

/// R-Collection: `name`'s last 8 bytes are a big-endian `app_id`;
/// registrable only by that application's creator, and the label that
/// actually gets minted is the application's own account address.
pub struct CollectionNameValidator<App, AccountId>(PhantomData<(App, AccountId)>);

impl<AccountId, App> NameValidator<AccountId> for CollectionNameValidator<App, AccountId>
where
    AccountId: Encode + PartialEq,
    App: ApplicationAuthority<AccountId>,
{
    fn validate(caller: &AccountId, name: &[u8]) -> Option<(Vec<u8>, usize)> {
        if name.len() < 8 {
            return None;
        }
        let mut app_id_bytes = [0u8; 8];
        app_id_bytes.copy_from_slice(&name[name.len() - 8..]);
        let app_id = u64::from_be_bytes(app_id_bytes);

        let creator = App::creator(app_id)?;
        if creator != *caller {
            return None;
        }
        let account = App::account_of(app_id)?;
        let encoded = account.encode();
        let len = encoded.len();
        Some((encoded, len))
    }
}

/// R-Staking: like R-Collection, but authorization reads the foreign
/// application's recorded `owner` rather than its `creator`.
pub struct StakingNameValidator<App, AccountId>(PhantomData<(App, AccountId)>);

impl<AccountId, App> NameValidator<AccountId> for StakingNameValidator<App, AccountId>
where
    AccountId: Encode + PartialEq,
    App: ApplicationAuthority<AccountId>,
{
    fn validate(caller: &AccountId, name: &[u8]) -> Option<(Vec<u8>, usize)> {
        if name.len() < 8 {
            return None;
        }
        let mut app_id_bytes = [0u8; 8];
        app_id_bytes.copy_from_slice(&name[name.len() - 8..]);
        let app_id = u64::from_be_bytes(app_id_bytes);

        let owner = App::owner(app_id)?;
        if owner != *caller {
            return None;
        }
        let account = App::account_of(app_id)?;
        let encoded = account.encode();
        let len = encoded.len();
        Some((encoded, len))
    }
}

/// R-Domain: leases expire, and past expiry `arc72_ownerOf` returns the
/// registrar's own account (§9 "expirable-NFT asymmetry").
pub struct Leasable;

impl LeasePolicy for Leasable {
    fn leasable() -> bool {
        true
    }
}

/// R-Reverse/R-Collection/R-Staking: names never expire, so
/// `arc72_ownerOf` always answers with the recorded NFT owner.
pub struct NonLeasable;

impl LeasePolicy for NonLeasable {
    fn leasable() -> bool {
        false
    }
    fn reclaim_after_expiry() -> bool {
        false
    }
}

/// Flat, length/duration-independent "price" for the three
/// non-auctioned Registrar instances: just the protocol storage
/// deposit (spec §5 `mint_cost`), charged once at registration and
/// never again since these names have no lease to renew.
pub struct FlatPricing<Balance, StorageCost, Duration>(PhantomData<(Balance, StorageCost, Duration)>);

impl<Balance, StorageCost, Duration> crate::traits::PriceOracle for FlatPricing<Balance, StorageCost, Duration>
where
    Balance: Copy,
    StorageCost: frame_support::traits::Get<Balance>,
{
    type Duration = Duration;
    type Balance = Balance;

    fn renew_price(_name_len: usize, _duration: Duration) -> Option<Balance> {
        Some(StorageCost::get())
    }

    fn register_price(_name_len: usize, _duration: Duration) -> Option<Balance> {
        Some(StorageCost::get())
    }
}

/// A single Registry is shared by all four Registrar instances, each
/// rooted at a different subtree, but `registry::Config` only has room
/// for one `type Registrar`. This combines the four behind one
/// `Registrar` impl: a lease check passes only if every instance
/// passes it (at most one of the four ever has state for a given
/// node, since each mints into its own `Expires` map, so the other
/// three are no-ops), and `transferable`/`clear_registrar_info` route
/// to whichever instance's `owns` actually claims the node.
pub struct AggregateRegistrar<A, B, C, D>(PhantomData<(A, B, C, D)>);

impl<A, B, C, D> crate::traits::Registrar for AggregateRegistrar<A, B, C, D>
where
    A: crate::traits::Registrar,
    A::Hash: Copy,
    B: crate::traits::Registrar<Hash = A::Hash, AccountId = A::AccountId>,
    C: crate::traits::Registrar<Hash = A::Hash, AccountId = A::AccountId>,
    D: crate::traits::Registrar<Hash = A::Hash, AccountId = A::AccountId>,
{
    type Hash = A::Hash;
    type AccountId = A::AccountId;

    fn check_expires_registrable(node: Self::Hash) -> DispatchResult {
        A::check_expires_registrable(node)?;
        B::check_expires_registrable(node)?;
        C::check_expires_registrable(node)?;
        D::check_expires_registrable(node)?;
        Ok(())
    }

    fn check_expires_renewable(node: Self::Hash) -> DispatchResult {
        A::check_expires_renewable(node)?;
        B::check_expires_renewable(node)?;
        C::check_expires_renewable(node)?;
        D::check_expires_renewable(node)?;
        Ok(())
    }

    fn check_expires_useable(node: Self::Hash) -> DispatchResult {
        A::check_expires_useable(node)?;
        B::check_expires_useable(node)?;
        C::check_expires_useable(node)?;
        D::check_expires_useable(node)?;
        Ok(())
    }

    fn clear_registrar_info(
        node: Self::Hash,
        owner: &Self::AccountId,
    ) -> DispatchResult {
        A::clear_registrar_info(node, owner)?;
        B::clear_registrar_info(node, owner)?;
        C::clear_registrar_info(node, owner)?;
        D::clear_registrar_info(node, owner)?;
        Ok(())
    }

    fn basenode() -> Self::Hash {
        A::basenode()
    }

    fn owns(node: Self::Hash) -> bool {
        A::owns(node) || B::owns(node) || C::owns(node) || D::owns(node)
    }

    fn transferable(node: Self::Hash) -> bool {
        if A::owns(node) {
            A::transferable(node)
        } else if B::owns(node) {
            B::transferable(node)
        } else if C::owns(node) {
            C::transferable(node)
        } else if D::owns(node) {
            D::transferable(node)
        } else {
            true
        }
    }
}
