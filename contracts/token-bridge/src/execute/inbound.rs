//! Inbound transfer handlers.
//!
//! Each handler applies one Transfer or TransferWithPayload attestation:
//! verify, resolve the asset, check every supplied account against what the
//! payload encodes, move the tokens and write the claim. Native releases come
//! out of custody, as cw20 transfers or bank sends; wrapped deliveries are
//! minted.

use cosmwasm_std::{
    coins, to_json_binary, Addr, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    Response, Storage, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::WrappedExecuteMsg;

use crate::address::UniversalAddress;
use crate::attestation::verify_attestation;
use crate::claim::claim;
use crate::derive::canonical_token_account;
use crate::error::ContractError;
use crate::normalize::{denormalize_amount, wire_to_u64};
use crate::payload::{BridgeMessage, TokenBridgeMessage, Transfer, TransferWithPayload};
use crate::registry::{is_wrapped_mint, native_decimals, resolve_asset, verify_emitter, Asset};
use crate::state::{Config, CONFIG, LOCKED_BALANCES, LOCKED_DENOMS};

/// Which asset kind an inbound message is allowed to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetKind {
    Native,
    Wrapped,
}

// ============================================================================
// Transfer
// ============================================================================

/// Execute handler for releasing native tokens of a Transfer
pub fn execute_complete_transfer_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    attestation: Binary,
    mint: String,
    recipient_token: String,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    complete_transfer(
        deps,
        env,
        info,
        AssetKind::Native,
        attestation,
        mint,
        recipient_token,
        recipient,
    )
}

/// Execute handler for minting wrapped tokens of a Transfer
pub fn execute_complete_transfer_wrapped(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    attestation: Binary,
    mint: String,
    recipient_token: String,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    complete_transfer(
        deps,
        env,
        info,
        AssetKind::Wrapped,
        attestation,
        mint,
        recipient_token,
        recipient,
    )
}

#[allow(clippy::too_many_arguments)]
fn complete_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: AssetKind,
    attestation: Binary,
    mint: String,
    recipient_token: String,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let parsed = verify_attestation(deps.as_ref(), &config, &attestation)?;
    verify_emitter(deps.storage, &parsed)?;

    let transfer: Transfer = match parsed.message()? {
        BridgeMessage::TokenBridge(TokenBridgeMessage::Transfer(transfer)) => transfer,
        _ => return Err(ContractError::InvalidTokenBridgePayload),
    };
    if transfer.recipient_chain != config.chain_id {
        return Err(ContractError::RecipientChainMismatch {
            chain: transfer.recipient_chain,
        });
    }

    let asset = resolve_inbound_asset(
        deps.as_ref(),
        &config,
        kind,
        transfer.token_chain,
        &transfer.token_address,
        &mint,
    )?;
    let local_id = asset.local_id();

    // The payload recipient must be a local account.
    let encoded = UniversalAddress(transfer.recipient)
        .to_addr(deps.api)
        .map_err(|_| ContractError::InvalidRecipient)?;
    let recipient_token = deps.api.addr_validate(&recipient_token)?;
    match recipient {
        Some(wallet) => {
            let wallet = deps.api.addr_validate(&wallet)?;
            if wallet != encoded || recipient_token != canonical_token_account(&wallet, local_id) {
                return Err(ContractError::InvalidRecipient);
            }
        }
        None => {
            if recipient_token != encoded {
                return Err(ContractError::InvalidRecipient);
            }
        }
    }
    if recipient_token.as_str() == local_id
        || recipient_token == env.contract.address
        || is_wrapped_mint(deps.storage, &recipient_token)
    {
        return Err(ContractError::NestedTokenAccount);
    }

    // Self-redemption takes the full amount whatever fee the payload encodes.
    let self_redeem = info.sender == recipient_token;
    let decimals = native_decimals(deps.as_ref(), &asset)?;
    let wire_amount = wire_to_u64(transfer.amount)?;
    let amount = local_amount(wire_amount, decimals)?;

    let mut response = Response::new()
        .add_attribute("method", method_name("complete_transfer", kind))
        .add_attribute("emitter_chain", parsed.emitter_chain.to_string())
        .add_attribute("sequence", parsed.sequence.to_string())
        .add_attribute("token", local_id)
        .add_attribute("recipient", recipient_token.as_str());

    if self_redeem {
        response = response
            .add_message(deliver(deps.storage, &asset, &recipient_token, amount)?)
            .add_attribute("amount", amount.to_string());
    } else {
        let wire_fee = wire_to_u64(transfer.fee)?;
        if wire_fee > wire_amount {
            return Err(ContractError::FeeExceedsAmount);
        }
        let fee = local_amount(wire_fee, decimals)?;
        let net = amount - fee;
        response = response
            .add_message(deliver(deps.storage, &asset, &recipient_token, net)?)
            .add_attribute("amount", net.to_string())
            .add_attribute("fee", fee.to_string())
            .add_attribute("relayer", info.sender.as_str());
        if fee > 0 {
            response = response.add_message(deliver(deps.storage, &asset, &info.sender, fee)?);
        }
    }

    claim(deps.storage, &parsed, env.block.height)?;

    Ok(response)
}

// ============================================================================
// Transfer With Payload
// ============================================================================

/// Execute handler for releasing native tokens of a TransferWithPayload
pub fn execute_complete_transfer_with_payload_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    attestation: Binary,
    mint: String,
    dst_token: String,
) -> Result<Response, ContractError> {
    complete_transfer_with_payload(
        deps,
        env,
        info,
        AssetKind::Native,
        attestation,
        mint,
        dst_token,
    )
}

/// Execute handler for minting wrapped tokens of a TransferWithPayload
pub fn execute_complete_transfer_with_payload_wrapped(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    attestation: Binary,
    mint: String,
    dst_token: String,
) -> Result<Response, ContractError> {
    complete_transfer_with_payload(
        deps,
        env,
        info,
        AssetKind::Wrapped,
        attestation,
        mint,
        dst_token,
    )
}

fn complete_transfer_with_payload(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: AssetKind,
    attestation: Binary,
    mint: String,
    dst_token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let parsed = verify_attestation(deps.as_ref(), &config, &attestation)?;
    verify_emitter(deps.storage, &parsed)?;

    let transfer: TransferWithPayload = match parsed.message()? {
        BridgeMessage::TokenBridge(TokenBridgeMessage::TransferWithPayload(transfer)) => transfer,
        _ => return Err(ContractError::InvalidTokenBridgePayload),
    };
    if transfer.redeemer_chain != config.chain_id {
        return Err(ContractError::RedeemerChainMismatch {
            chain: transfer.redeemer_chain,
        });
    }

    let asset = resolve_inbound_asset(
        deps.as_ref(),
        &config,
        kind,
        transfer.token_chain,
        &transfer.token_address,
        &mint,
    )?;

    let decimals = native_decimals(deps.as_ref(), &asset)?;
    let amount = local_amount(wire_to_u64(transfer.amount)?, decimals)?;

    // Only the redeemer can complete, and only into its own account.
    let redeemer = UniversalAddress(transfer.redeemer)
        .to_addr(deps.api)
        .map_err(|_| ContractError::InvalidProgramRedeemer)?;
    if info.sender != redeemer {
        return Err(ContractError::InvalidProgramRedeemer);
    }
    let dst_token = deps.api.addr_validate(&dst_token)?;
    if dst_token != canonical_token_account(&redeemer, asset.local_id()) {
        return Err(ContractError::ConstraintTokenOwner);
    }

    let delivery = deliver(deps.storage, &asset, &dst_token, amount)?;
    claim(deps.storage, &parsed, env.block.height)?;

    Ok(Response::new()
        .add_message(delivery)
        .add_attribute("method", method_name("complete_transfer_with_payload", kind))
        .add_attribute("emitter_chain", parsed.emitter_chain.to_string())
        .add_attribute("sequence", parsed.sequence.to_string())
        .add_attribute("token", asset.local_id())
        .add_attribute("redeemer", redeemer)
        .add_attribute("amount", amount.to_string())
        .add_attribute("sender", UniversalAddress(transfer.sender).to_hex()))
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the payload's asset, enforce the handler's asset kind and match
/// the caller-supplied mint (a cw20 address, or the denom of a bank asset)
fn resolve_inbound_asset(
    deps: Deps,
    config: &Config,
    kind: AssetKind,
    token_chain: u16,
    token_address: &[u8; 32],
    mint: &str,
) -> Result<Asset, ContractError> {
    let is_native = token_chain == config.chain_id;
    match kind {
        AssetKind::Native if !is_native => return Err(ContractError::WrappedAsset),
        AssetKind::Wrapped if is_native => return Err(ContractError::NativeAsset),
        _ => {}
    }

    let asset = resolve_asset(deps, config, token_chain, token_address)?;
    if asset.local_id() != mint {
        return Err(ContractError::InvalidMint);
    }
    Ok(asset)
}

/// Scale a wire amount to base units; wrapped amounts are already in them
fn local_amount(wire: u64, decimals: Option<u8>) -> Result<u64, ContractError> {
    match decimals {
        Some(decimals) => denormalize_amount(wire, decimals),
        None => Ok(wire),
    }
}

/// Debit `amount` from a custody ledger entry
fn release_custody(
    locked: Option<Uint128>,
    amount: Uint128,
    id: &str,
) -> Result<Uint128, ContractError> {
    locked
        .unwrap_or_default()
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientLiquidity {
            token: id.to_string(),
        })
}

/// Move `amount` of the asset to `recipient`
fn deliver(
    storage: &mut dyn Storage,
    asset: &Asset,
    recipient: &Addr,
    amount: u64,
) -> Result<CosmosMsg, ContractError> {
    let amount = Uint128::from(amount);
    let msg: CosmosMsg = match asset {
        Asset::Native { token } => {
            LOCKED_BALANCES.update(storage, token, |locked| {
                release_custody(locked, amount, token.as_str())
            })?;
            WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: recipient.to_string(),
                    amount,
                })?,
                funds: vec![],
            }
            .into()
        }
        Asset::Bank { denom } => {
            LOCKED_DENOMS.update(storage, denom, |locked| {
                release_custody(locked, amount, denom)
            })?;
            BankMsg::Send {
                to_address: recipient.to_string(),
                amount: coins(amount.u128(), denom),
            }
            .into()
        }
        Asset::Wrapped { mint, .. } => WasmMsg::Execute {
            contract_addr: mint.to_string(),
            msg: to_json_binary(&WrappedExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }
        .into(),
    };
    Ok(msg)
}

fn method_name(base: &str, kind: AssetKind) -> String {
    match kind {
        AssetKind::Native => format!("{}_native", base),
        AssetKind::Wrapped => format!("{}_wrapped", base),
    }
}
