//! Token Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_attest_denom, execute_attest_token, execute_complete_transfer_native,
    execute_complete_transfer_with_payload_native, execute_complete_transfer_with_payload_wrapped,
    execute_complete_transfer_wrapped, execute_initiate_transfer_denom,
    execute_initiate_transfer_denom_with_payload, execute_receive, execute_register_wrapped_mint,
    execute_secure_registered_emitter, execute_submit_attestation,
};
use crate::hash::bytes32_to_hex;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_denom_address, query_derive_wrapped_address, query_display_metadata,
    query_is_claimed, query_locked_balance, query_locked_denom, query_registered_emitter,
    query_transfer_info, query_wrapped_asset, query_wrapped_registry,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let core_bridge = deps.api.addr_validate(&msg.core_bridge)?;
    let gov_address: [u8; 32] =
        msg.gov_address
            .as_slice()
            .try_into()
            .map_err(|_| ContractError::InvalidAddress {
                reason: format!(
                    "gov_address must be exactly 32 bytes, got {}",
                    msg.gov_address.len()
                ),
            })?;

    let config = Config {
        core_bridge,
        chain_id: msg.chain_id,
        gov_chain: msg.gov_chain,
        gov_address,
        wrapped_asset_code_id: msg.wrapped_asset_code_id,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("core_bridge", config.core_bridge)
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute("gov_chain", config.gov_chain.to_string())
        .add_attribute("gov_address", bytes32_to_hex(&config.gov_address))
        .add_attribute(
            "wrapped_asset_code_id",
            config.wrapped_asset_code_id.to_string(),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),
        ExecuteMsg::AttestToken { token, nonce } => {
            execute_attest_token(deps, env, info, token, nonce)
        }
        ExecuteMsg::InitiateTransferDenom {
            recipient_chain,
            recipient,
            fee,
            nonce,
        } => execute_initiate_transfer_denom(
            deps,
            env,
            info,
            recipient_chain,
            recipient,
            fee,
            nonce,
        ),
        ExecuteMsg::InitiateTransferDenomWithPayload {
            recipient_chain,
            recipient,
            nonce,
            payload,
        } => execute_initiate_transfer_denom_with_payload(
            deps,
            env,
            info,
            recipient_chain,
            recipient,
            nonce,
            payload,
        ),
        ExecuteMsg::AttestDenom { denom, nonce } => {
            execute_attest_denom(deps, env, info, denom, nonce)
        }

        // Inbound transfers
        ExecuteMsg::CompleteTransferNative {
            attestation,
            mint,
            recipient_token,
            recipient,
        } => execute_complete_transfer_native(
            deps,
            env,
            info,
            attestation,
            mint,
            recipient_token,
            recipient,
        ),
        ExecuteMsg::CompleteTransferWrapped {
            attestation,
            mint,
            recipient_token,
            recipient,
        } => execute_complete_transfer_wrapped(
            deps,
            env,
            info,
            attestation,
            mint,
            recipient_token,
            recipient,
        ),
        ExecuteMsg::CompleteTransferWithPayloadNative {
            attestation,
            mint,
            dst_token,
        } => execute_complete_transfer_with_payload_native(
            deps,
            env,
            info,
            attestation,
            mint,
            dst_token,
        ),
        ExecuteMsg::CompleteTransferWithPayloadWrapped {
            attestation,
            mint,
            dst_token,
        } => execute_complete_transfer_with_payload_wrapped(
            deps,
            env,
            info,
            attestation,
            mint,
            dst_token,
        ),

        // Registry & governance
        ExecuteMsg::SubmitAttestation { attestation } => {
            execute_submit_attestation(deps, env, info, attestation)
        }
        ExecuteMsg::RegisterWrappedMint { key } => {
            execute_register_wrapped_mint(deps, env, info, key)
        }
        ExecuteMsg::SecureRegisteredEmitter { attestation } => {
            execute_secure_registered_emitter(deps, env, info, attestation)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::RegisteredEmitter { chain } => {
            to_json_binary(&query_registered_emitter(deps, chain)?)
        }
        QueryMsg::IsClaimed {
            emitter_chain,
            emitter_address,
            sequence,
        } => to_json_binary(&query_is_claimed(
            deps,
            emitter_chain,
            emitter_address,
            sequence,
        )?),
        QueryMsg::WrappedRegistry { chain, address } => {
            to_json_binary(&query_wrapped_registry(deps, chain, address)?)
        }
        QueryMsg::WrappedAsset { mint } => to_json_binary(&query_wrapped_asset(deps, mint)?),
        QueryMsg::DisplayMetadata { chain, address } => {
            to_json_binary(&query_display_metadata(deps, chain, address)?)
        }
        QueryMsg::DeriveWrappedAddress { chain, address } => {
            to_json_binary(&query_derive_wrapped_address(chain, address)?)
        }
        QueryMsg::TransferInfo { attestation } => {
            to_json_binary(&query_transfer_info(attestation)?)
        }
        QueryMsg::LockedBalance { token } => to_json_binary(&query_locked_balance(deps, token)?),
        QueryMsg::LockedDenom { denom } => to_json_binary(&query_locked_denom(deps, denom)?),
        QueryMsg::DenomAddress { denom } => to_json_binary(&query_denom_address(deps, denom)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
