use cosmwasm_std::{
    entry_point, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20_base::allowances::{
    execute_burn_from, execute_decrease_allowance, execute_increase_allowance,
    execute_send_from, execute_transfer_from, query_allowance,
};
use cw20_base::contract::{
    execute_burn, execute_mint, execute_send, execute_transfer, query_balance, query_minter,
    query_token_info,
};
use cw20_base::state::{MinterData, TokenInfo, BALANCES, TOKEN_INFO};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, WrappedAssetInfoResponse};
use crate::state::{WrappedAssetInfo, CONTRACT_NAME, CONTRACT_VERSION, WRAPPED_ASSET_INFO};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.asset_address.len() != 32 {
        return Err(ContractError::InvalidAssetAddress {
            got: msg.asset_address.len(),
        });
    }

    // cw20-base's name/symbol validation is skipped: names come from other
    // chains and are already truncated by the bridge.
    let mut total_supply = Uint128::zero();
    for coin in &msg.initial_balances {
        let holder = deps.api.addr_validate(&coin.address)?;
        BALANCES.update(deps.storage, &holder, |balance| -> StdResult<_> {
            Ok(balance.unwrap_or_default().checked_add(coin.amount)?)
        })?;
        total_supply = total_supply
            .checked_add(coin.amount)
            .map_err(StdError::from)?;
    }

    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name.clone(),
            symbol: msg.symbol.clone(),
            decimals: msg.decimals,
            total_supply,
            mint: Some(MinterData {
                minter: info.sender.clone(),
                cap: None,
            }),
        },
    )?;

    WRAPPED_ASSET_INFO.save(
        deps.storage,
        &WrappedAssetInfo {
            asset_chain: msg.asset_chain,
            asset_address: msg.asset_address.clone(),
            bridge: info.sender.clone(),
        },
    )?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if let Some(hook) = msg.init_hook {
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: hook.contract_addr,
            msg: hook.msg,
            funds: vec![],
        }));
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "instantiate")
        .add_attribute("bridge", info.sender)
        .add_attribute("asset_chain", msg.asset_chain.to_string())
        .add_attribute("asset_address", hex::encode(msg.asset_address.as_slice()))
        .add_attribute("decimals", msg.decimals.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let res = match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)?
        }
        ExecuteMsg::Burn { amount } => execute_burn(deps, env, info, amount)?,
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => execute_send(deps, env, info, contract, amount, msg)?,
        ExecuteMsg::Mint { recipient, amount } => {
            execute_mint(deps, env, info, recipient, amount)?
        }
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => execute_increase_allowance(deps, env, info, spender, amount, expires)?,
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => execute_decrease_allowance(deps, env, info, spender, amount, expires)?,
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute_transfer_from(deps, env, info, owner, recipient, amount)?,
        ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        } => execute_send_from(deps, env, info, owner, contract, amount, msg)?,
        ExecuteMsg::BurnFrom { owner, amount } => execute_burn_from(deps, env, info, owner, amount)?,
        ExecuteMsg::UpdateMetadata { name, symbol } => {
            return execute_update_metadata(deps, info, name, symbol)
        }
    };
    Ok(res)
}

fn execute_update_metadata(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    symbol: String,
) -> Result<Response, ContractError> {
    let asset = WRAPPED_ASSET_INFO.load(deps.storage)?;
    if info.sender != asset.bridge {
        return Err(ContractError::Unauthorized);
    }

    TOKEN_INFO.update(deps.storage, |mut token| -> StdResult<_> {
        token.name = name.clone();
        token.symbol = symbol.clone();
        Ok(token)
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_metadata")
        .add_attribute("name", name)
        .add_attribute("symbol", symbol))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::WrappedAssetInfo {} => to_json_binary(&query_wrapped_asset_info(deps)?),
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Minter {} => to_json_binary(&query_minter(deps)?),
        QueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
    }
}

fn query_wrapped_asset_info(deps: Deps) -> StdResult<WrappedAssetInfoResponse> {
    let info = WRAPPED_ASSET_INFO.load(deps.storage)?;
    Ok(WrappedAssetInfoResponse {
        asset_chain: info.asset_chain,
        asset_address: info.asset_address,
        bridge: info.bridge,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
