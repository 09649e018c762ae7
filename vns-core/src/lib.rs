#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod admin;
#[cfg(feature = "runtime-benchmarks")]
pub mod benchmarks;
pub mod hashing;
pub mod migration;
#[cfg(test)]
pub mod mock;
pub mod nft;
pub mod origin;
pub mod price_oracle;
pub mod registrar;
pub mod registrars;
pub mod registry;
pub mod rsvp;
pub mod traits;

#[cfg(test)]
pub(crate) mod tests;
