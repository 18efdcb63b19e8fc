//! Execute handlers for the token bridge contract.
//!
//! Handlers are organized by flow:
//! - `outbound` - cw20 Receive hook, tokens leaving through the bridge
//! - `inbound` - Transfer and TransferWithPayload completion
//! - `attest` - AttestToken, AssetMeta and the wrapped mint init hook
//! - `governance` - SubmitAttestation, RegisterChain, UpgradeContract and
//!   the legacy emitter migration

mod attest;
mod governance;
mod inbound;
mod outbound;

pub use attest::*;
pub use governance::*;
pub use inbound::*;
pub use outbound::*;
