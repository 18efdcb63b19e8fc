//! Outbound transfer tests: custody, burns and the posted payloads.

mod helpers;

use cosmwasm_std::{Addr, Binary, Uint128, Uint256};
use cw20::{Cw20QueryMsg, TokenInfoResponse};
use cw_multi_test::Executor;

use helpers::*;
use token_bridge::msg::{ExecuteMsg, LockedBalanceResponse, QueryMsg, ReceiveMsg};
use token_bridge::payload::{Transfer, TransferWithPayload};
use token_bridge::ContractError;

const TARGET: [u8; 32] = [0x7a; 32];

fn initiate(fee: u128, nonce: u32) -> ReceiveMsg {
    ReceiveMsg::InitiateTransfer {
        recipient_chain: FOREIGN_CHAIN,
        recipient: Binary::from(TARGET.to_vec()),
        fee: Uint128::new(fee),
        nonce,
    }
}

fn locked(suite: &Suite, token: &Addr) -> u128 {
    let res: LockedBalanceResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.bridge,
            &QueryMsg::LockedBalance {
                token: token.to_string(),
            },
        )
        .unwrap();
    res.amount.u128()
}

/// Wrapped mint with `amount` already delivered to the user
fn wrapped_with_balance(suite: &mut Suite, amount: u64) -> Addr {
    let mint = suite.create_wrapped(deadbeef(), 8);
    let user = suite.user.clone();
    let payload = transfer(amount, deadbeef(), FOREIGN_CHAIN, suite.universal(&user), 0);
    let attestation = suite.foreign(&payload.serialize());
    suite
        .app
        .execute_contract(
            user.clone(),
            suite.bridge.clone(),
            &ExecuteMsg::CompleteTransferWrapped {
                attestation,
                mint: mint.to_string(),
                recipient_token: user.to_string(),
                recipient: None,
            },
            &[],
        )
        .unwrap();
    mint
}

#[test]
fn test_native_outbound_posts_normalized_transfer() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(9, &[(&user, 2_000_000_000)]);

    suite
        .send_out(&token, &user, 1_234_567_891, &initiate(100_000_000, 7))
        .unwrap();

    let expected = Transfer {
        amount: Uint256::from(123_456_789u64),
        token_address: suite.universal(&token),
        token_chain: THIS_CHAIN,
        recipient: TARGET,
        recipient_chain: FOREIGN_CHAIN,
        fee: Uint256::from(10_000_000u64),
    };
    let posted = suite.posted_messages();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].sender, suite.bridge);
    assert_eq!(posted[0].nonce, 7);
    assert_eq!(posted[0].message.as_slice(), expected.serialize().as_slice());

    // The dust unit is held but not counted as custody.
    assert_eq!(suite.balance(&token, &suite.bridge), 1_234_567_891);
    assert_eq!(locked(&suite, &token), 1_234_567_890);
    assert_eq!(suite.balance(&token, &user), 765_432_109);
}

#[test]
fn test_native_round_trip_empties_custody() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(9, &[(&user, 1_234_567_891)]);
    suite
        .send_out(&token, &user, 1_234_567_891, &initiate(0, 0))
        .unwrap();

    let payload = transfer(
        123_456_789,
        suite.universal(&token),
        THIS_CHAIN,
        suite.universal(&user),
        0,
    );
    let attestation = suite.foreign(&payload.serialize());
    suite
        .app
        .execute_contract(
            user.clone(),
            suite.bridge.clone(),
            &ExecuteMsg::CompleteTransferNative {
                attestation,
                mint: token.to_string(),
                recipient_token: user.to_string(),
                recipient: None,
            },
            &[],
        )
        .unwrap();

    assert_eq!(suite.balance(&token, &user), 1_234_567_890);
    assert_eq!(locked(&suite, &token), 0);
}

#[test]
fn test_wrapped_outbound_burns() {
    let mut suite = setup();
    let mint = wrapped_with_balance(&mut suite, 700);
    let user = suite.user.clone();

    suite.send_out(&mint, &user, 300, &initiate(0, 3)).unwrap();

    let info: TokenInfoResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&mint, &Cw20QueryMsg::TokenInfo {})
        .unwrap();
    assert_eq!(info.total_supply, Uint128::new(400));
    assert_eq!(suite.balance(&mint, &user), 400);
    assert_eq!(suite.balance(&mint, &suite.bridge), 0);

    let expected = Transfer {
        amount: Uint256::from(300u64),
        token_address: deadbeef(),
        token_chain: FOREIGN_CHAIN,
        recipient: TARGET,
        recipient_chain: FOREIGN_CHAIN,
        fee: Uint256::zero(),
    };
    let posted = suite.posted_messages();
    assert_eq!(posted.last().unwrap().message.as_slice(), expected.serialize().as_slice());
}

#[test]
fn test_outbound_with_payload_records_sender() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(8, &[(&user, 5_000)]);

    suite
        .send_out(
            &token,
            &user,
            5_000,
            &ReceiveMsg::InitiateTransferWithPayload {
                recipient_chain: FOREIGN_CHAIN,
                recipient: Binary::from(TARGET.to_vec()),
                nonce: 11,
                payload: Binary::from(b"deposit".to_vec()),
            },
        )
        .unwrap();

    let expected = TransferWithPayload {
        amount: Uint256::from(5_000u64),
        token_address: suite.universal(&token),
        token_chain: THIS_CHAIN,
        redeemer: TARGET,
        redeemer_chain: FOREIGN_CHAIN,
        sender: suite.universal(&user),
        payload: b"deposit".to_vec(),
    };
    let posted = suite.posted_messages();
    assert_eq!(posted[0].nonce, 11);
    assert_eq!(posted[0].message.as_slice(), expected.serialize().as_slice());
    assert_eq!(locked(&suite, &token), 5_000);
}

#[test]
fn test_dust_only_amount_rejected() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(9, &[(&user, 1_000)]);

    let res = suite.send_out(&token, &user, 9, &initiate(0, 0));
    assert_bridge_error(res, ContractError::AmountTooLow);
    assert_eq!(suite.balance(&token, &user), 1_000);
    assert_eq!(locked(&suite, &token), 0);
}

#[test]
fn test_outbound_fee_greater_than_amount_rejected() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(8, &[(&user, 1_000)]);

    let res = suite.send_out(&token, &user, 100, &initiate(101, 0));
    assert_bridge_error(res, ContractError::FeeExceedsAmount);
}

#[test]
fn test_outbound_to_own_chain_rejected() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(8, &[(&user, 1_000)]);

    let msg = ReceiveMsg::InitiateTransfer {
        recipient_chain: THIS_CHAIN,
        recipient: Binary::from(TARGET.to_vec()),
        fee: Uint128::zero(),
        nonce: 0,
    };
    let res = suite.send_out(&token, &user, 100, &msg);
    assert_bridge_error(res, ContractError::SameSourceAndTarget);
}

#[test]
fn test_outbound_short_recipient_rejected() {
    let mut suite = setup();
    let user = suite.user.clone();
    let token = suite.create_native(8, &[(&user, 1_000)]);

    let msg = ReceiveMsg::InitiateTransfer {
        recipient_chain: FOREIGN_CHAIN,
        recipient: Binary::from(vec![0x7a; 20]),
        fee: Uint128::zero(),
        nonce: 0,
    };
    let err = suite.send_out(&token, &user, 100, &msg).unwrap_err();
    assert!(err.root_cause().to_string().starts_with("Invalid address"));
}
