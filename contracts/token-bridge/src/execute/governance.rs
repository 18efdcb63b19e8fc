//! Attestation submission and governance handlers.
//!
//! `SubmitAttestation` routes AssetMeta attestations to the asset registry
//! and governance packets to the actions below. Governance packets must come
//! from the configured governance emitter and target this chain or every
//! chain.

use cosmwasm_std::{to_json_binary, Binary, DepsMut, Env, MessageInfo, Response, WasmMsg};

use crate::attestation::{verify_attestation, ParsedAttestation};
use crate::claim::{claim, claim_in};
use crate::error::ContractError;
use crate::execute::attest::apply_asset_meta;
use crate::hash::bytes32_to_hex;
use crate::msg::MigrateMsg;
use crate::payload::{
    is_governance_payload, BridgeMessage, GovernanceAction, GovernancePacket, TokenBridgeMessage,
};
use crate::registry::{register_emitter, verify_emitter};
use crate::state::{Config, CONFIG, LEGACY_EMITTERS, REGISTERED_EMITTERS, SECURED_EMITTERS};

/// Execute handler for AssetMeta and governance attestations
pub fn execute_submit_attestation(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    attestation: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let parsed = verify_attestation(deps.as_ref(), &config, &attestation)?;
    if is_governance_payload(&parsed.payload) {
        require_governance_emitter(&config, &parsed)?;
    }

    match parsed.message()? {
        BridgeMessage::Governance(packet) => {
            let response = apply_governance(deps, env, &config, &parsed, packet)?;
            Ok(response.add_attribute("sequence", parsed.sequence.to_string()))
        }
        BridgeMessage::TokenBridge(TokenBridgeMessage::AssetMeta(meta)) => {
            verify_emitter(deps.storage, &parsed)?;
            apply_asset_meta(deps, env, &config, &parsed, meta)
        }
        BridgeMessage::TokenBridge(_) => Err(ContractError::InvalidTokenBridgePayload),
    }
}

/// Governance packets are only accepted from the governance emitter
fn require_governance_emitter(
    config: &Config,
    parsed: &ParsedAttestation,
) -> Result<(), ContractError> {
    if !parsed.is_governance(config) {
        return Err(ContractError::InvalidTokenBridgeVaa {
            chain: parsed.emitter_chain,
        });
    }
    Ok(())
}

/// Target chain check of every governance packet
fn check_governance_chain(config: &Config, packet: &GovernancePacket) -> Result<(), ContractError> {
    if packet.chain != 0 && packet.chain != config.chain_id {
        return Err(ContractError::InvalidGovernanceChain {
            chain: packet.chain,
        });
    }
    Ok(())
}

fn apply_governance(
    deps: DepsMut,
    env: Env,
    config: &Config,
    parsed: &ParsedAttestation,
    packet: GovernancePacket,
) -> Result<Response, ContractError> {
    check_governance_chain(config, &packet)?;

    let response = match packet.action {
        GovernanceAction::RegisterChain { chain, emitter } => {
            if chain == 0 || chain == config.chain_id {
                return Err(ContractError::InvalidForeignChain { chain });
            }
            register_emitter(deps.storage, chain, emitter)?;

            Response::new()
                .add_attribute("method", "register_chain")
                .add_attribute("chain", chain.to_string())
                .add_attribute("emitter", bytes32_to_hex(&emitter))
        }
        GovernanceAction::UpgradeContract { new_contract } => {
            let new_code_id = code_id_from_bytes32(&new_contract)?;

            Response::new()
                .add_message(WasmMsg::Migrate {
                    contract_addr: env.contract.address.to_string(),
                    new_code_id,
                    msg: to_json_binary(&MigrateMsg {})?,
                })
                .add_attribute("method", "upgrade_contract")
                .add_attribute("new_code_id", new_code_id.to_string())
        }
    };

    claim(deps.storage, parsed, env.block.height)?;

    Ok(response)
}

/// Code id carried in the low 8 bytes of an UpgradeContract target
fn code_id_from_bytes32(bytes: &[u8; 32]) -> Result<u64, ContractError> {
    if bytes[..24].iter().any(|b| *b != 0) {
        return Err(ContractError::malformed(
            "upgrade target does not fit a code id",
        ));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[24..]);
    Ok(u64::from_be_bytes(low))
}

/// Execute handler for copying a legacy emitter slot into the registry
pub fn execute_secure_registered_emitter(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    attestation: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let parsed = verify_attestation(deps.as_ref(), &config, &attestation)?;
    if is_governance_payload(&parsed.payload) {
        require_governance_emitter(&config, &parsed)?;
    }

    let packet = match parsed.message()? {
        BridgeMessage::Governance(packet) => packet,
        BridgeMessage::TokenBridge(_) => return Err(ContractError::InvalidTokenBridgePayload),
    };
    check_governance_chain(&config, &packet)?;
    let (chain, emitter) = match packet.action {
        GovernanceAction::RegisterChain { chain, emitter } => (chain, emitter),
        GovernanceAction::UpgradeContract { .. } => {
            return Err(ContractError::InvalidTokenBridgePayload)
        }
    };

    let legacy = LEGACY_EMITTERS
        .may_load(deps.storage, chain)?
        .ok_or(ContractError::LegacyEmitterNotFound { chain })?;
    if legacy != emitter {
        return Err(ContractError::InvalidLegacyEmitter);
    }

    claim_in(
        deps.storage,
        &SECURED_EMITTERS,
        parsed.emitter_chain,
        &parsed.emitter_address,
        parsed.sequence,
        env.block.height,
    )?;
    register_emitter(deps.storage, chain, legacy)?;

    let secured = REGISTERED_EMITTERS.load(deps.storage, chain)?;
    if secured != legacy {
        return Err(ContractError::LegacyEmitterMismatch);
    }

    Ok(Response::new()
        .add_attribute("method", "secure_registered_emitter")
        .add_attribute("chain", chain.to_string())
        .add_attribute("emitter", bytes32_to_hex(&secured))
        .add_attribute("sender", info.sender))
}
