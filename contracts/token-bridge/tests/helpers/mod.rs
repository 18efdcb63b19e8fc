//! Shared setup for the token bridge integration tests.
//!
//! The guardian core is replaced by a mock contract: tests certify attestation
//! bodies on it directly, and it records every outbound message the bridge
//! posts.

#![allow(dead_code)]

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult,
    Uint128, Uint256,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{
    App, AppBuilder, AppResponse, BankKeeper, Contract, ContractWrapper, Executor,
    MockAddressGenerator, MockApiBech32, WasmKeeper,
};
use cw_storage_plus::{Item, Map};

use common::PostedAttestationResponse;
use token_bridge::hash::keccak256;
use token_bridge::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, ReceiveMsg, WrappedRegistryResponse};
use token_bridge::payload::{
    string_to_bytes32, AssetMeta, GovernanceAction, GovernancePacket, Transfer,
};
use token_bridge::{ContractError, UniversalAddress};

pub type BridgeApp = App<BankKeeper, MockApiBech32>;

pub const THIS_CHAIN: u16 = 3;
pub const GOV_CHAIN: u16 = 1;
pub const GOV_ADDRESS: [u8; 32] = {
    let mut address = [0u8; 32];
    address[31] = 4;
    address
};
pub const FOREIGN_CHAIN: u16 = 2;
pub const FOREIGN_EMITTER: [u8; 32] = [0xe2; 32];

// ============================================================================
// Mock Core Contract
// ============================================================================

#[cw_serde]
pub enum MockCoreExecuteMsg {
    /// Same shape as the bridge's `PostMessage`
    PostMessage { message: Binary, nonce: u32 },
    /// Test hook: mark an attestation body as signed by guardians
    Certify { attestation: Binary },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum MockCoreQueryMsg {
    #[returns(PostedAttestationResponse)]
    PostedAttestation { hash: Binary },
    #[returns(Vec<PostedMessage>)]
    PostedMessages {},
}

#[cw_serde]
pub struct PostedMessage {
    pub sender: Addr,
    pub message: Binary,
    pub nonce: u32,
}

const CERTIFIED: Map<&[u8], bool> = Map::new("certified");
const MESSAGES: Item<Vec<PostedMessage>> = Item::new("messages");

fn core_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    MESSAGES.save(deps.storage, &vec![])?;
    Ok(Response::new())
}

fn core_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockCoreExecuteMsg,
) -> StdResult<Response> {
    match msg {
        MockCoreExecuteMsg::PostMessage { message, nonce } => {
            MESSAGES.update(deps.storage, |mut messages| -> StdResult<_> {
                messages.push(PostedMessage {
                    sender: info.sender,
                    message,
                    nonce,
                });
                Ok(messages)
            })?;
        }
        MockCoreExecuteMsg::Certify { attestation } => {
            CERTIFIED.save(deps.storage, &keccak256(attestation.as_slice()), &true)?;
        }
    }
    Ok(Response::new())
}

fn core_query(deps: Deps, _env: Env, msg: MockCoreQueryMsg) -> StdResult<Binary> {
    match msg {
        MockCoreQueryMsg::PostedAttestation { hash } => to_json_binary(&PostedAttestationResponse {
            posted: CERTIFIED.has(deps.storage, hash.as_slice()),
        }),
        MockCoreQueryMsg::PostedMessages {} => to_json_binary(&MESSAGES.load(deps.storage)?),
    }
}

// ============================================================================
// Contract Wrappers
// ============================================================================

pub fn contract_core() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(core_execute, core_instantiate, core_query))
}

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_bridge::contract::execute,
        token_bridge::contract::instantiate,
        token_bridge::contract::query,
    )
    .with_migrate(token_bridge::contract::migrate);
    Box::new(contract)
}

pub fn contract_wrapped() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        wrapped_asset::contract::execute,
        wrapped_asset::contract::instantiate,
        wrapped_asset::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Test Suite
// ============================================================================

pub struct Suite {
    pub app: BridgeApp,
    pub core: Addr,
    pub bridge: Addr,
    pub admin: Addr,
    pub user: Addr,
    pub relayer: Addr,
    pub bridge_code_id: u64,
    sequence: u64,
}

/// Bridge with the foreign chain's emitter registered
pub fn setup() -> Suite {
    let mut suite = setup_unregistered();
    suite.register_chain(FOREIGN_CHAIN, FOREIGN_EMITTER).unwrap();
    suite
}

/// Bridge with an empty emitter registry
pub fn setup_unregistered() -> Suite {
    let mut app = AppBuilder::new()
        .with_api(MockApiBech32::new("terra"))
        .with_wasm(WasmKeeper::new().with_address_generator(MockAddressGenerator))
        .build(|_, _, _| {});

    let admin = app.api().addr_make("admin");
    let user = app.api().addr_make("user");
    let relayer = app.api().addr_make("relayer");

    let core_code_id = app.store_code(contract_core());
    let bridge_code_id = app.store_code(contract_bridge());
    let wrapped_code_id = app.store_code(contract_wrapped());

    let core = app
        .instantiate_contract(core_code_id, admin.clone(), &Empty {}, &[], "core", None)
        .unwrap();

    let bridge = app
        .instantiate_contract(
            bridge_code_id,
            admin.clone(),
            &InstantiateMsg {
                core_bridge: core.to_string(),
                chain_id: THIS_CHAIN,
                gov_chain: GOV_CHAIN,
                gov_address: Binary::from(GOV_ADDRESS.to_vec()),
                wrapped_asset_code_id: wrapped_code_id,
            },
            &[],
            "token-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    Suite {
        app,
        core,
        bridge,
        admin,
        user,
        relayer,
        bridge_code_id,
        sequence: 0,
    }
}

impl Suite {
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Build an attestation body and certify it on the mock core
    pub fn attest(
        &mut self,
        emitter_chain: u16,
        emitter_address: [u8; 32],
        sequence: u64,
        payload: &[u8],
    ) -> Binary {
        let body = attestation_body(emitter_chain, emitter_address, sequence, payload);
        self.app
            .execute_contract(
                self.admin.clone(),
                self.core.clone(),
                &MockCoreExecuteMsg::Certify {
                    attestation: body.clone(),
                },
                &[],
            )
            .unwrap();
        body
    }

    /// Certified attestation from the registered foreign emitter
    pub fn foreign(&mut self, payload: &[u8]) -> Binary {
        let sequence = self.next_sequence();
        self.attest(FOREIGN_CHAIN, FOREIGN_EMITTER, sequence, payload)
    }

    /// Certified attestation from the governance emitter
    pub fn governance(&mut self, packet: &GovernancePacket) -> Binary {
        let sequence = self.next_sequence();
        self.attest(GOV_CHAIN, GOV_ADDRESS, sequence, &packet.serialize())
    }

    pub fn submit(&mut self, attestation: Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            self.bridge.clone(),
            &ExecuteMsg::SubmitAttestation { attestation },
            &[],
        )
    }

    pub fn register_chain(&mut self, chain: u16, emitter: [u8; 32]) -> anyhow::Result<AppResponse> {
        let attestation = self.governance(&GovernancePacket {
            chain: 0,
            action: GovernanceAction::RegisterChain { chain, emitter },
        });
        self.submit(attestation)
    }

    /// Apply an AssetMeta for a foreign token and return the wrapped mint
    pub fn create_wrapped(&mut self, origin_address: [u8; 32], decimals: u8) -> Addr {
        let meta = asset_meta(origin_address, decimals, "DEADBEEF", "Dead beef. Moo.");
        let attestation = self.foreign(&meta.serialize());
        self.submit(attestation).unwrap();
        self.wrapped_registry(FOREIGN_CHAIN, origin_address)
            .asset
            .and_then(|asset| asset.mint)
            .unwrap()
    }

    pub fn wrapped_registry(&self, chain: u16, address: [u8; 32]) -> WrappedRegistryResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::WrappedRegistry {
                    chain,
                    address: Binary::from(address.to_vec()),
                },
            )
            .unwrap()
    }

    /// Instantiate a native cw20 with the given balances
    pub fn create_native(&mut self, decimals: u8, balances: &[(&Addr, u128)]) -> Addr {
        let code_id = self.app.store_code(contract_cw20());
        let initial_balances = balances
            .iter()
            .map(|(address, amount)| Cw20Coin {
                address: address.to_string(),
                amount: Uint128::new(*amount),
            })
            .collect();
        self.app
            .instantiate_contract(
                code_id,
                self.admin.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: "Native Token".to_string(),
                    symbol: "NATV".to_string(),
                    decimals,
                    initial_balances,
                    mint: None,
                    marketing: None,
                },
                &[],
                "native",
                None,
            )
            .unwrap()
    }

    /// Seed custody by sending `amount` out through the bridge
    pub fn send_out(
        &mut self,
        token: &Addr,
        sender: &Addr,
        amount: u128,
        msg: &ReceiveMsg,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Send {
                contract: self.bridge.to_string(),
                amount: Uint128::new(amount),
                msg: to_json_binary(msg).unwrap(),
            },
            &[],
        )
    }

    pub fn balance(&self, token: &Addr, owner: &Addr) -> u128 {
        let response: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: owner.to_string(),
                },
            )
            .unwrap();
        response.balance.u128()
    }

    pub fn posted_messages(&self) -> Vec<PostedMessage> {
        self.app
            .wrap()
            .query_wasm_smart(&self.core, &MockCoreQueryMsg::PostedMessages {})
            .unwrap()
    }

    pub fn universal(&self, addr: &Addr) -> [u8; 32] {
        UniversalAddress::from_addr(self.app.api(), addr).unwrap().0
    }
}

/// Assert that a transaction failed with `expected`, however deep the bridge call was
pub fn assert_bridge_error(result: anyhow::Result<AppResponse>, expected: ContractError) {
    let err = result.unwrap_err();
    assert_eq!(err.root_cause().to_string(), expected.to_string());
}

/// Whether any event of the transaction carries an attribute named `key`
pub fn has_attribute(response: &AppResponse, key: &str) -> bool {
    response
        .events
        .iter()
        .any(|event| event.attributes.iter().any(|attr| attr.key == key))
}

// ============================================================================
// Payload Builders
// ============================================================================

pub fn attestation_body(
    emitter_chain: u16,
    emitter_address: [u8; 32],
    sequence: u64,
    payload: &[u8],
) -> Binary {
    let mut body = Vec::with_capacity(51 + payload.len());
    body.extend_from_slice(&1_700_000_000u32.to_be_bytes());
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&emitter_chain.to_be_bytes());
    body.extend_from_slice(&emitter_address);
    body.extend_from_slice(&sequence.to_be_bytes());
    body.push(1);
    body.extend_from_slice(payload);
    Binary::from(body)
}

/// The 20-byte origin address `0xdeadbeef..` left padded to 32 bytes
pub fn deadbeef() -> [u8; 32] {
    let mut address = [0u8; 32];
    address[12..].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef].repeat(5));
    address
}

pub fn asset_meta(origin_address: [u8; 32], decimals: u8, symbol: &str, name: &str) -> AssetMeta {
    AssetMeta {
        token_address: origin_address,
        token_chain: FOREIGN_CHAIN,
        decimals,
        symbol: string_to_bytes32(symbol),
        name: string_to_bytes32(name),
    }
}

pub fn transfer(
    amount: u64,
    token_address: [u8; 32],
    token_chain: u16,
    recipient: [u8; 32],
    fee: u64,
) -> Transfer {
    Transfer {
        amount: Uint256::from(amount),
        token_address,
        token_chain,
        recipient,
        recipient_chain: THIS_CHAIN,
        fee: Uint256::from(fee),
    }
}
