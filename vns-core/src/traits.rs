//! Collaborator traits shared between the Registrar family, the Registry,
//! the price oracle and the resolver pallet. Kept free of any single
//! pallet's `Config` so instances can depend on each other through thin
//! interfaces instead of concrete types.

use sp_runtime::{DispatchError, DispatchResult};
use sp_std::vec::Vec;

/// What a Registrar instance needs from the shared lease bookkeeping to
/// gate Registry/NFT operations (mint guard, transfer guard, burn
/// refund).
pub trait Registrar {
    type Hash;
    type AccountId;
    /// Err unless `node` is free to mint (unregistered, or expired past
    /// grace period for a leasable registrar; unconditionally free for
    /// non-leasable ones that have never minted it).
    fn check_expires_registrable(node: Self::Hash) -> DispatchResult;
    /// Err unless `node`'s lease can still be extended (strictly before
    /// `expires + grace_period`). Non-leasable registrars always allow
    /// this (there is nothing to renew).
    fn check_expires_renewable(node: Self::Hash) -> DispatchResult;
    /// Err unless `node`'s lease has not lapsed (strictly before
    /// `expires`). Used to gate transfers and subname minting.
    fn check_expires_useable(node: Self::Hash) -> DispatchResult;
    /// Drop all lease bookkeeping for `node`, e.g. on burn.
    fn clear_registrar_info(node: Self::Hash, owner: &Self::AccountId) -> DispatchResult;
    /// The node this registrar instance is rooted at.
    fn basenode() -> Self::Hash;
    /// `true` if `node` was ever registered through this instance.
    /// Lets a Registry that is shared by several Registrar instances
    /// (one per subtree) tell which one actually owns a given node.
    fn owns(node: Self::Hash) -> bool {
        let _ = node;
        true
    }
    /// `false` for soulbound registrars (R-Reverse/R-Collection/
    /// R-Staking): the Registry refuses `arc72_transferFrom`/`setOwner`
    /// on any node they minted.
    fn transferable(node: Self::Hash) -> bool {
        let _ = node;
        true
    }
}

/// High-level abstraction the Registrar family drives to mint, transfer
/// and authorize against the record tree.
pub trait Registry: NFT<Self::AccountId> {
    type AccountId;
    type Hash;

    /// Mints/reassigns `label_node` below `node` and returns the
    /// subnode the Registry itself computed from `node`/`label` — the
    /// caller asserts this against its own locally computed hash
    /// (ENS-style commutativity check: catches a Registry that hashes
    /// label/node in the wrong order).
    #[allow(clippy::too_many_arguments)]
    fn mint_subname(
        node_owner: &Self::AccountId,
        node: Self::Hash,
        label_node: Self::Hash,
        label: Vec<u8>,
        to: Self::AccountId,
        do_payments: impl FnOnce(Option<&Self::AccountId>) -> DispatchResult,
    ) -> Result<Self::Hash, DispatchError>;
    /// Err unless `caller` may operate on `node` (owner, operator, or
    /// per-node approved account).
    fn available(caller: &Self::AccountId, node: Self::Hash) -> DispatchResult;
    fn transfer(from: &Self::AccountId, to: &Self::AccountId, node: Self::Hash) -> DispatchResult;
    /// `ownerOf(node)`, `None` if the node was never minted.
    fn owner_of(node: Self::Hash) -> Option<Self::AccountId>;
    /// Release `node`, refunding lease bookkeeping to `caller`. Used by
    /// a Registrar to implicitly clear a stale NFT before re-minting an
    /// expired name.
    fn burn(caller: &Self::AccountId, node: Self::Hash) -> DispatchResult;
}

pub trait PriceOracle {
    type Duration;
    type Balance;
    /// Price to extend an existing lease by `duration`.
    fn renew_price(name_len: usize, duration: Self::Duration) -> Option<Self::Balance>;
    /// Price for a brand-new registration: `renew_price` plus any
    /// one-off registration surcharge.
    fn register_price(name_len: usize, duration: Self::Duration) -> Option<Self::Balance>;
}

/// Abstraction over the generic NFT ledger (`vns-core::nft`).
#[allow(clippy::upper_case_acronyms)]
pub trait NFT<AccountId> {
    type ClassId: Default + Copy;
    type TokenId: Default + Copy;

    fn balance(who: &AccountId) -> u64;
    fn owner(token: (Self::ClassId, Self::TokenId)) -> Option<AccountId>;
    fn transfer(
        from: &AccountId,
        to: &AccountId,
        token: (Self::ClassId, Self::TokenId),
    ) -> DispatchResult;
}

pub trait Official {
    type AccountId;

    fn get_official_account() -> Result<Self::AccountId, DispatchError>;
}

pub trait IsRegistrarOpen {
    fn is_open() -> bool;
}

/// Validates and normalizes a raw label for one Registrar instance's
/// policy (R-Domain's ASCII charset, R-Reverse's "label is my own
/// address", R-Collection's "label is an app id I created", ...).
///
/// Returns the canonical label bytes plus its length (used for pricing),
/// or `None` if the label is rejected.
pub trait NameValidator<AccountId> {
    fn validate(caller: &AccountId, name: &[u8]) -> Option<(Vec<u8>, usize)>;
}

/// Whether a Registrar instance's names expire and what its NFT transfer
/// policy is once they do.
pub trait LeasePolicy {
    /// `false` for soulbound registrars (R-Reverse/R-Collection/
    /// R-Staking) — such names never expire and `arc72_ownerOf` always
    /// returns the recorded owner.
    fn leasable() -> bool;
    /// Past expiry, `arc72_ownerOf` returns the registrar's own account
    /// instead of the stale recorded owner. Only meaningful when
    /// `leasable()` is true.
    fn reclaim_after_expiry() -> bool {
        Self::leasable()
    }
}

/// Collapsed `Ownable`/`Stakeable`/`Upgradeable` surface, see
/// `vns-core::admin`.
pub trait Administration<AccountId> {
    fn owner() -> Option<AccountId>;
    fn is_owner(who: &AccountId) -> bool;
    fn is_upgrader(who: &AccountId) -> bool;
    fn is_delegate(who: &AccountId) -> bool;
}
