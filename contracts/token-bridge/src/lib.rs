//! Token Bridge Contract - Guardian-Attested Cross-Chain Token Transfers
//!
//! This contract applies attestations certified by the guardian core
//! contract: it mints wrapped representations of foreign tokens, releases
//! custodied native tokens and registers foreign chains and assets. Every
//! attestation is applied at most once.
//!
//! # Outbound Flow
//! 1. User sends a cw20 to this contract with `InitiateTransfer`, or attaches bank coins
//!    to `InitiateTransferDenom`
//! 2. Native tokens stay in custody, wrapped tokens are burned
//! 3. The Transfer payload is posted through the core contract
//!
//! # Inbound Flow
//! 1. Guardians sign the Transfer and the core contract records it
//! 2. Anyone calls `CompleteTransfer*` with the attestation body
//! 3. The bridge checks emitter, chain, asset and accounts, then releases or
//!    mints and records the claim
//!
//! # Amounts
//! Wire amounts carry at most 8 decimals. Tokens with more decimals are
//! truncated when they leave and scaled back up when they return.

pub mod address;
pub mod attestation;
pub mod claim;
pub mod contract;
pub mod derive;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
pub mod normalize;
pub mod payload;
mod query;
pub mod registry;
pub mod state;

pub use crate::address::UniversalAddress;
pub use crate::derive::derive_wrapped_address;
pub use crate::error::ContractError;
pub use crate::hash::keccak256;
pub use crate::normalize::{denormalize_amount, normalize_amount};
