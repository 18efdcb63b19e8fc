//! Wrapped asset behaviour under cw-multi-test: minting authority, cw20
//! transfers and burns, metadata refresh.

use cosmwasm_std::{Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, MinterResponse, TokenInfoResponse};
use cw_multi_test::{
    App, AppBuilder, AppResponse, BankKeeper, Contract, ContractWrapper, Executor,
    MockAddressGenerator, MockApiBech32, WasmKeeper,
};

use wrapped_asset::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, WrappedAssetInfoResponse};

fn contract_wrapped() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        wrapped_asset::contract::execute,
        wrapped_asset::contract::instantiate,
        wrapped_asset::contract::query,
    );
    Box::new(contract)
}

type WrappedApp = App<BankKeeper, MockApiBech32>;

struct Setup {
    app: WrappedApp,
    token: Addr,
    bridge: Addr,
    holder: Addr,
}

fn setup(decimals: u8) -> Setup {
    let mut app = AppBuilder::new()
        .with_api(MockApiBech32::new("terra"))
        .with_wasm(WasmKeeper::new().with_address_generator(MockAddressGenerator))
        .build(|_, _, _| {});
    let bridge = app.api().addr_make("bridge");
    let holder = app.api().addr_make("holder");

    let code_id = app.store_code(contract_wrapped());
    let token = app
        .instantiate_contract(
            code_id,
            bridge.clone(),
            &InstantiateMsg {
                name: "Dead beef. Moo.".to_string(),
                symbol: "DEADBEEF".to_string(),
                asset_chain: 2,
                asset_address: Binary::from([0xde; 32].to_vec()),
                decimals,
                initial_balances: vec![],
                init_hook: None,
            },
            &[],
            "wrapped",
            None,
        )
        .unwrap();

    Setup {
        app,
        token,
        bridge,
        holder,
    }
}

fn balance(setup: &Setup, owner: &Addr) -> Uint128 {
    let res: BalanceResponse = setup
        .app
        .wrap()
        .query_wasm_smart(
            &setup.token,
            &QueryMsg::Balance {
                address: owner.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn token_info(setup: &Setup) -> TokenInfoResponse {
    setup
        .app
        .wrap()
        .query_wasm_smart(&setup.token, &QueryMsg::TokenInfo {})
        .unwrap()
}

fn mint(setup: &mut Setup, sender: &Addr, amount: u128) -> anyhow::Result<AppResponse> {
    let holder = setup.holder.clone();
    setup.app.execute_contract(
        sender.clone(),
        setup.token.clone(),
        &ExecuteMsg::Mint {
            recipient: holder.to_string(),
            amount: Uint128::new(amount),
        },
        &[],
    )
}

#[test]
fn test_provenance_and_minter() {
    let setup = setup(8);

    let info: WrappedAssetInfoResponse = setup
        .app
        .wrap()
        .query_wasm_smart(&setup.token, &QueryMsg::WrappedAssetInfo {})
        .unwrap();
    assert_eq!(info.asset_chain, 2);
    assert_eq!(info.asset_address.as_slice(), &[0xde; 32]);
    assert_eq!(info.bridge, setup.bridge);

    let minter: Option<MinterResponse> = setup
        .app
        .wrap()
        .query_wasm_smart(&setup.token, &QueryMsg::Minter {})
        .unwrap();
    assert_eq!(minter.unwrap().minter, setup.bridge.to_string());
}

#[test]
fn test_only_bridge_mints() {
    let mut setup = setup(8);
    let bridge = setup.bridge.clone();
    let holder = setup.holder.clone();

    mint(&mut setup, &bridge, 1_000).unwrap();
    assert_eq!(balance(&setup, &holder), Uint128::new(1_000));

    assert!(mint(&mut setup, &holder, 1_000).is_err());
    assert_eq!(token_info(&setup).total_supply, Uint128::new(1_000));
}

#[test]
fn test_holder_transfers_and_burns() {
    let mut setup = setup(6);
    let bridge = setup.bridge.clone();
    let holder = setup.holder.clone();
    let other = setup.app.api().addr_make("other");
    mint(&mut setup, &bridge, 1_000).unwrap();

    setup
        .app
        .execute_contract(
            holder.clone(),
            setup.token.clone(),
            &ExecuteMsg::Transfer {
                recipient: other.to_string(),
                amount: Uint128::new(250),
            },
            &[],
        )
        .unwrap();
    setup
        .app
        .execute_contract(
            holder.clone(),
            setup.token.clone(),
            &ExecuteMsg::Burn {
                amount: Uint128::new(500),
            },
            &[],
        )
        .unwrap();

    assert_eq!(balance(&setup, &holder), Uint128::new(250));
    assert_eq!(balance(&setup, &other), Uint128::new(250));
    let info = token_info(&setup);
    assert_eq!(info.total_supply, Uint128::new(500));
    assert_eq!(info.decimals, 6);
}

#[test]
fn test_metadata_refresh_is_bridge_only() {
    let mut setup = setup(8);
    let bridge = setup.bridge.clone();
    let holder = setup.holder.clone();

    let update = ExecuteMsg::UpdateMetadata {
        name: "Beef, renamed".to_string(),
        symbol: "BEEF".to_string(),
    };
    let err = setup
        .app
        .execute_contract(holder, setup.token.clone(), &update, &[])
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        wrapped_asset::ContractError::Unauthorized.to_string()
    );

    setup
        .app
        .execute_contract(bridge, setup.token.clone(), &update, &[])
        .unwrap();
    let info = token_info(&setup);
    assert_eq!(info.name, "Beef, renamed");
    assert_eq!(info.symbol, "BEEF");
    assert_eq!(info.decimals, 8);
}
