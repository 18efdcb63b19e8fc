//! Asset attestation handlers.
//!
//! Outbound, `AttestToken` publishes the metadata of a native cw20 and
//! `AttestDenom` that of a bank denom. Inbound,
//! an AssetMeta attestation creates the wrapped asset for a foreign token or
//! refreshes its display metadata. A new wrapped cw20 reports its own address
//! back through `RegisterWrappedMint` from its init hook.

use cosmwasm_std::{to_json_binary, Binary, DepsMut, Env, MessageInfo, Response, WasmMsg};

use common::{
    InitHook, WrappedAssetInfoResponse, WrappedExecuteMsg, WrappedInstantiateMsg, WrappedQueryMsg,
};

use crate::address::UniversalAddress;
use crate::attestation::ParsedAttestation;
use crate::claim::{claim, is_claimed};
use crate::derive::derive_wrapped_address;
use crate::error::ContractError;
use crate::execute::outbound::post_message;
use crate::hash::bytes32_to_hex;
use crate::msg::ExecuteMsg;
use crate::normalize::wrapped_decimals;
use crate::payload::{bytes32_to_string, string_to_bytes32, AssetMeta};
use crate::registry::{
    denom_symbol, display_metadata, is_wrapped_mint, query_token_info, register_denom,
};
use crate::state::{
    Config, WrappedAsset, CONFIG, DENOM_DECIMALS, DISPLAY_METADATA, WRAPPED_ASSETS, WRAPPED_MINTS,
};

/// Execute handler for publishing the metadata of a native cw20
pub fn execute_attest_token(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    nonce: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token)?;
    if is_wrapped_mint(deps.storage, &token) {
        return Err(ContractError::WrappedAsset);
    }

    let token_info = query_token_info(deps.as_ref(), &token)?;
    let token_address = UniversalAddress::from_addr(deps.api, &token)?;
    let meta = AssetMeta {
        token_address: token_address.0,
        token_chain: config.chain_id,
        decimals: token_info.decimals,
        symbol: string_to_bytes32(&token_info.symbol),
        name: string_to_bytes32(&token_info.name),
    };

    Ok(Response::new()
        .add_message(post_message(&config, meta.serialize(), nonce)?)
        .add_attribute("method", "attest_token")
        .add_attribute("sender", info.sender)
        .add_attribute("token", token)
        .add_attribute("token_address", token_address.to_hex())
        .add_attribute("decimals", token_info.decimals.to_string())
        .add_attribute("nonce", nonce.to_string()))
}

/// Execute handler for publishing the metadata of a bank denom
pub fn execute_attest_denom(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    denom: String,
    nonce: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token_address = register_denom(deps.storage, &denom)?;

    let symbol = denom_symbol(&denom);
    let meta = AssetMeta {
        token_address,
        token_chain: config.chain_id,
        decimals: DENOM_DECIMALS,
        symbol: string_to_bytes32(&symbol),
        name: string_to_bytes32(&symbol),
    };

    Ok(Response::new()
        .add_message(post_message(&config, meta.serialize(), nonce)?)
        .add_attribute("method", "attest_denom")
        .add_attribute("sender", info.sender)
        .add_attribute("denom", denom)
        .add_attribute("token_address", bytes32_to_hex(&token_address))
        .add_attribute("decimals", DENOM_DECIMALS.to_string())
        .add_attribute("nonce", nonce.to_string()))
}

/// Apply an AssetMeta attestation: create the wrapped asset or refresh its metadata
pub fn apply_asset_meta(
    deps: DepsMut,
    env: Env,
    config: &Config,
    parsed: &ParsedAttestation,
    meta: AssetMeta,
) -> Result<Response, ContractError> {
    if meta.token_chain == config.chain_id {
        return Err(ContractError::NativeAsset);
    }
    // A replayed attestation is reported as such, not as stale metadata.
    if is_claimed(
        deps.storage,
        parsed.emitter_chain,
        &parsed.emitter_address,
        parsed.sequence,
    )? {
        return Err(ContractError::AlreadyClaimed);
    }

    let key = derive_wrapped_address(meta.token_chain, &meta.token_address);
    let metadata = display_metadata(
        meta.token_chain,
        &meta.token_address,
        meta.decimals,
        &bytes32_to_string(&meta.symbol),
        &bytes32_to_string(&meta.name),
    )?;

    let response = Response::new()
        .add_attribute("origin_chain", meta.token_chain.to_string())
        .add_attribute("origin_address", bytes32_to_hex(&meta.token_address))
        .add_attribute("wrapped_key", bytes32_to_hex(&key))
        .add_attribute("sequence", parsed.sequence.to_string());

    let response = match WRAPPED_ASSETS.may_load(deps.storage, &key)? {
        None => {
            let asset = WrappedAsset {
                origin_chain: meta.token_chain,
                origin_address: meta.token_address,
                decimals: wrapped_decimals(meta.decimals),
                mint: None,
                meta_sequence: parsed.sequence,
            };
            WRAPPED_ASSETS.save(deps.storage, &key, &asset)?;
            DISPLAY_METADATA.save(deps.storage, &key, &metadata)?;

            let hook = ExecuteMsg::RegisterWrappedMint {
                key: Binary::from(key.to_vec()),
            };
            let instantiate = WasmMsg::Instantiate {
                admin: Some(env.contract.address.to_string()),
                code_id: config.wrapped_asset_code_id,
                msg: to_json_binary(&WrappedInstantiateMsg {
                    name: metadata.name.clone(),
                    symbol: metadata.symbol.clone(),
                    asset_chain: meta.token_chain,
                    asset_address: Binary::from(meta.token_address.to_vec()),
                    decimals: asset.decimals,
                    initial_balances: vec![],
                    init_hook: Some(InitHook {
                        contract_addr: env.contract.address.to_string(),
                        msg: to_json_binary(&hook)?,
                    }),
                })?,
                funds: vec![],
                label: format!("wrapped {} {}", meta.token_chain, bytes32_to_hex(&key)),
            };

            response
                .add_message(instantiate)
                .add_attribute("method", "create_wrapped")
                .add_attribute("decimals", asset.decimals.to_string())
        }
        Some(mut asset) => {
            if parsed.sequence <= asset.meta_sequence {
                return Err(ContractError::StaleAssetMeta {
                    sequence: parsed.sequence,
                    registered: asset.meta_sequence,
                });
            }
            // Decimals are fixed at creation; only the display record changes.
            asset.meta_sequence = parsed.sequence;
            WRAPPED_ASSETS.save(deps.storage, &key, &asset)?;
            DISPLAY_METADATA.save(deps.storage, &key, &metadata)?;

            let mut response = response
                .add_attribute("method", "update_wrapped")
                .add_attribute("decimals", asset.decimals.to_string());
            if let Some(mint) = &asset.mint {
                response = response.add_message(WasmMsg::Execute {
                    contract_addr: mint.to_string(),
                    msg: to_json_binary(&WrappedExecuteMsg::UpdateMetadata {
                        name: metadata.name.clone(),
                        symbol: metadata.symbol.clone(),
                    })?,
                    funds: vec![],
                });
            }
            response
        }
    };

    claim(deps.storage, parsed, env.block.height)?;

    Ok(response)
}

/// Execute handler for the init hook of a new wrapped cw20
pub fn execute_register_wrapped_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    key: Binary,
) -> Result<Response, ContractError> {
    let key: [u8; 32] = key
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidAddress {
            reason: format!("wrapped key must be 32 bytes, got {}", key.len()),
        })?;
    let mut asset = WRAPPED_ASSETS
        .may_load(deps.storage, &key)?
        .ok_or(ContractError::Unauthorized)?;
    if asset.mint.is_some() {
        return Err(ContractError::AssetAlreadyRegistered);
    }

    // The caller must be a wrapped cw20 created by this bridge for this origin.
    let provenance: WrappedAssetInfoResponse = deps
        .querier
        .query_wasm_smart(&info.sender, &WrappedQueryMsg::WrappedAssetInfo {})
        .map_err(|_| ContractError::Unauthorized)?;
    if provenance.bridge != env.contract.address
        || provenance.asset_chain != asset.origin_chain
        || provenance.asset_address.as_slice() != asset.origin_address.as_slice()
    {
        return Err(ContractError::Unauthorized);
    }

    asset.mint = Some(info.sender.clone());
    WRAPPED_ASSETS.save(deps.storage, &key, &asset)?;
    WRAPPED_MINTS.save(deps.storage, &info.sender, &key)?;

    Ok(Response::new()
        .add_attribute("method", "register_wrapped_mint")
        .add_attribute("mint", info.sender)
        .add_attribute("wrapped_key", bytes32_to_hex(&key))
        .add_attribute("origin_chain", asset.origin_chain.to_string()))
}
