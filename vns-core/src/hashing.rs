//! # Namehash
//!
//! The one-level hashing protocol shared by the Registry and every
//! Registrar: `node = SHA256(root ++ SHA256(label))`. Unlike ENS's
//! recursive namehash, a node here is always computed from its
//! *immediate* parent and a single label — there is no walk up a
//! dot-separated name.

use vns_types::DomainHash;
use sp_io::hashing::sha2_256;

/// `SHA256(label)`, the inner hash a Registrar needs independently of the
/// final subnode (e.g. to build a `NewOwner` event payload before the
/// Registry confirms the subnode).
pub fn label_hash(label: &[u8]) -> DomainHash {
    DomainHash::from(sha2_256(label))
}

/// `SHA256(root ++ SHA256(label))`.
///
/// Registrars compute this locally and assert it against the value the
/// Registry returns from `setSubnodeOwner` — the commutativity check
/// that catches swapped label/node arguments without either side having
/// to trust the other.
pub fn subnode(root: DomainHash, label: &[u8]) -> DomainHash {
    subnode_from_label_hash(root, label_hash(label))
}

/// As [`subnode`], but taking an already-hashed label.
pub fn subnode_from_label_hash(root: DomainHash, label_hash: DomainHash) -> DomainHash {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(root.as_bytes());
    buf[32..].copy_from_slice(label_hash.as_bytes());
    DomainHash::from(sha2_256(&buf))
}
