//! Outbound transfer handlers.
//!
//! cw20 tokens arrive through a cw20 `Send` to the bridge; bank coins are
//! attached to `InitiateTransferDenom*`. Native assets stay in the bridge's
//! balance as custody; wrapped tokens are burned. Either way the bridge then
//! posts a Transfer or TransferWithPayload through the core contract for
//! guardians to observe.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Coin, CosmosMsg, DepsMut, Env, MessageInfo,
    Response, StdResult, Uint128, Uint256, WasmMsg,
};
use cw20::Cw20ReceiveMsg;

use common::{CoreExecuteMsg, WrappedExecuteMsg};

use crate::address::UniversalAddress;
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::normalize::{native_to_u64, normalize_amount, truncate_dust};
use crate::payload::{Transfer, TransferWithPayload};
use crate::registry::{query_token_info, register_denom, resolve_mint, Asset};
use crate::state::{Config, CONFIG, DENOM_DECIMALS, LOCKED_BALANCES, LOCKED_DENOMS};

/// Origin and wire amounts of tokens leaving through the bridge
struct OutboundLeg {
    /// cw20 address or bank denom that was taken in
    token: String,
    token_chain: u16,
    token_address: [u8; 32],
    amount: u64,
    fee: u64,
    messages: Vec<CosmosMsg>,
}

// ============================================================================
// Entry Points
// ============================================================================

/// Execute handler for cw20 tokens sent to the bridge
pub fn execute_receive(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let token = info.sender;
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;

    match receive_msg {
        ReceiveMsg::InitiateTransfer {
            recipient_chain,
            recipient,
            fee,
            nonce,
        } => {
            let recipient = parse_target(&config, recipient_chain, &recipient)?;
            let leg = take_tokens(deps, &config, &token, cw20_msg.amount, fee)?;
            initiate_transfer(&config, &sender, leg, recipient_chain, recipient, nonce)
        }
        ReceiveMsg::InitiateTransferWithPayload {
            recipient_chain,
            recipient,
            nonce,
            payload,
        } => {
            let redeemer = parse_target(&config, recipient_chain, &recipient)?;
            let sender_address = UniversalAddress::from_addr(deps.api, &sender)?;
            let leg = take_tokens(deps, &config, &token, cw20_msg.amount, Uint128::zero())?;
            initiate_transfer_with_payload(
                &config,
                &sender,
                sender_address,
                leg,
                recipient_chain,
                redeemer,
                nonce,
                payload,
            )
        }
    }
}

/// Execute handler for bank coins attached to a transfer
pub fn execute_initiate_transfer_denom(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient_chain: u16,
    recipient: Binary,
    fee: Uint128,
    nonce: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let recipient = parse_target(&config, recipient_chain, &recipient)?;
    let coin = sent_coin(&info)?;
    let leg = take_denom(deps, &config, &coin, fee)?;
    initiate_transfer(&config, &info.sender, leg, recipient_chain, recipient, nonce)
}

/// Execute handler for bank coins attached to a transfer with payload
pub fn execute_initiate_transfer_denom_with_payload(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient_chain: u16,
    recipient: Binary,
    nonce: u32,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let redeemer = parse_target(&config, recipient_chain, &recipient)?;
    let sender_address = UniversalAddress::from_addr(deps.api, &info.sender)?;
    let coin = sent_coin(&info)?;
    let leg = take_denom(deps, &config, &coin, Uint128::zero())?;
    initiate_transfer_with_payload(
        &config,
        &info.sender,
        sender_address,
        leg,
        recipient_chain,
        redeemer,
        nonce,
        payload,
    )
}

// ============================================================================
// Payloads
// ============================================================================

fn initiate_transfer(
    config: &Config,
    sender: &Addr,
    leg: OutboundLeg,
    recipient_chain: u16,
    recipient: UniversalAddress,
    nonce: u32,
) -> Result<Response, ContractError> {
    let transfer = Transfer {
        amount: Uint256::from(leg.amount),
        token_address: leg.token_address,
        token_chain: leg.token_chain,
        recipient: recipient.0,
        recipient_chain,
        fee: Uint256::from(leg.fee),
    };

    Ok(Response::new()
        .add_messages(leg.messages)
        .add_message(post_message(config, transfer.serialize(), nonce)?)
        .add_attribute("method", "initiate_transfer")
        .add_attribute("sender", sender.as_str())
        .add_attribute("token", leg.token)
        .add_attribute("token_chain", leg.token_chain.to_string())
        .add_attribute("token_address", UniversalAddress(leg.token_address).to_hex())
        .add_attribute("recipient_chain", recipient_chain.to_string())
        .add_attribute("recipient", recipient.to_hex())
        .add_attribute("amount", leg.amount.to_string())
        .add_attribute("fee", leg.fee.to_string())
        .add_attribute("nonce", nonce.to_string()))
}

#[allow(clippy::too_many_arguments)]
fn initiate_transfer_with_payload(
    config: &Config,
    sender: &Addr,
    sender_address: UniversalAddress,
    leg: OutboundLeg,
    recipient_chain: u16,
    redeemer: UniversalAddress,
    nonce: u32,
    payload: Binary,
) -> Result<Response, ContractError> {
    let transfer = TransferWithPayload {
        amount: Uint256::from(leg.amount),
        token_address: leg.token_address,
        token_chain: leg.token_chain,
        redeemer: redeemer.0,
        redeemer_chain: recipient_chain,
        sender: sender_address.0,
        payload: payload.to_vec(),
    };

    Ok(Response::new()
        .add_messages(leg.messages)
        .add_message(post_message(config, transfer.serialize(), nonce)?)
        .add_attribute("method", "initiate_transfer_with_payload")
        .add_attribute("sender", sender.as_str())
        .add_attribute("token", leg.token)
        .add_attribute("token_chain", leg.token_chain.to_string())
        .add_attribute("token_address", UniversalAddress(leg.token_address).to_hex())
        .add_attribute("recipient_chain", recipient_chain.to_string())
        .add_attribute("redeemer", redeemer.to_hex())
        .add_attribute("amount", leg.amount.to_string())
        .add_attribute("payload_len", payload.len().to_string())
        .add_attribute("nonce", nonce.to_string()))
}

fn parse_target(
    config: &Config,
    recipient_chain: u16,
    recipient: &Binary,
) -> Result<UniversalAddress, ContractError> {
    if recipient_chain == config.chain_id {
        return Err(ContractError::SameSourceAndTarget);
    }
    UniversalAddress::from_binary(recipient).map_err(|e| ContractError::InvalidAddress {
        reason: e.to_string(),
    })
}

// ============================================================================
// Custody
// ============================================================================

/// The single bank coin attached to a transfer
fn sent_coin(info: &MessageInfo) -> Result<Coin, ContractError> {
    match info.funds.as_slice() {
        [] => Err(ContractError::NoFundsSent),
        [coin] if coin.amount.is_zero() => Err(ContractError::NoFundsSent),
        [coin] => Ok(coin.clone()),
        _ => Err(ContractError::InvalidFunds {
            reason: "only one denom per transfer".to_string(),
        }),
    }
}

/// Native amount and fee on the wire, plus the share kept as custody
fn normalize_native(
    amount: Uint128,
    fee: Uint128,
    decimals: u8,
) -> Result<(u64, u64, Uint128), ContractError> {
    if fee > amount {
        return Err(ContractError::FeeExceedsAmount);
    }
    let raw_amount = native_to_u64(amount)?;
    let raw_fee = native_to_u64(fee)?;

    let wire_amount = normalize_amount(raw_amount, decimals);
    if wire_amount == 0 {
        return Err(ContractError::AmountTooLow);
    }
    let wire_fee = normalize_amount(raw_fee, decimals);

    // Dust below the wire precision stays in the balance but not in custody.
    let custody = Uint128::from(truncate_dust(raw_amount, decimals)?);
    Ok((wire_amount, wire_fee, custody))
}

/// Take custody of (native) or burn (wrapped) the received cw20 tokens
fn take_tokens(
    deps: DepsMut,
    config: &Config,
    token: &Addr,
    amount: Uint128,
    fee: Uint128,
) -> Result<OutboundLeg, ContractError> {
    match resolve_mint(deps.as_ref(), token)? {
        Asset::Wrapped { asset, mint, .. } => {
            if fee > amount {
                return Err(ContractError::FeeExceedsAmount);
            }
            let raw_amount = native_to_u64(amount)?;
            let raw_fee = native_to_u64(fee)?;
            if raw_amount == 0 {
                return Err(ContractError::AmountTooLow);
            }
            let burn = WasmMsg::Execute {
                contract_addr: mint.to_string(),
                msg: to_json_binary(&WrappedExecuteMsg::Burn { amount })?,
                funds: vec![],
            };

            Ok(OutboundLeg {
                token: mint.to_string(),
                token_chain: asset.origin_chain,
                token_address: asset.origin_address,
                amount: raw_amount,
                fee: raw_fee,
                messages: vec![burn.into()],
            })
        }
        // Any cw20 the bridge did not mint is native.
        _ => {
            let decimals = query_token_info(deps.as_ref(), token)?.decimals;
            let (wire_amount, wire_fee, custody) = normalize_native(amount, fee, decimals)?;
            LOCKED_BALANCES.update(deps.storage, token, |locked| -> StdResult<_> {
                Ok(locked.unwrap_or_default().checked_add(custody)?)
            })?;

            Ok(OutboundLeg {
                token: token.to_string(),
                token_chain: config.chain_id,
                token_address: UniversalAddress::from_addr(deps.api, token)?.0,
                amount: wire_amount,
                fee: wire_fee,
                messages: vec![],
            })
        }
    }
}

/// Take custody of attached bank coins
fn take_denom(
    deps: DepsMut,
    config: &Config,
    coin: &Coin,
    fee: Uint128,
) -> Result<OutboundLeg, ContractError> {
    let (wire_amount, wire_fee, custody) = normalize_native(coin.amount, fee, DENOM_DECIMALS)?;
    // Recorded so the return transfer resolves the denom from its address.
    let token_address = register_denom(deps.storage, &coin.denom)?;
    LOCKED_DENOMS.update(deps.storage, &coin.denom, |locked| -> StdResult<_> {
        Ok(locked.unwrap_or_default().checked_add(custody)?)
    })?;

    Ok(OutboundLeg {
        token: coin.denom.clone(),
        token_chain: config.chain_id,
        token_address,
        amount: wire_amount,
        fee: wire_fee,
        messages: vec![],
    })
}

/// Hand a payload to the core contract for publication
pub(crate) fn post_message(config: &Config, payload: Vec<u8>, nonce: u32) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.core_bridge.to_string(),
        msg: to_json_binary(&CoreExecuteMsg::PostMessage {
            message: Binary::from(payload),
            nonce,
        })?,
        funds: vec![],
    }
    .into())
}
