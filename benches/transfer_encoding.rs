//! Encoding cost of a transfer: amount scaling, calldata, Solana message signing.
//! None of these should be noticeable next to an RPC round trip.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ethers::types::U256;
use my_wallet_tool::blockchain::solana::keypair_from_bytes;
use my_wallet_tool::core::abi::encode_erc20_transfer;
use my_wallet_tool::core::amount::to_base_units;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
#[allow(deprecated)]
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address;

fn bench_amount_scaling(c: &mut Criterion) {
    c.bench_function("to_base_units_18_decimals", |b| {
        b.iter(|| to_base_units(black_box("1234.567890123456789"), black_box(18)).expect("valid amount"));
    });
}

fn bench_erc20_calldata(c: &mut Criterion) {
    let amount = U256::from_dec_str("1000000000000000000").expect("valid u256");
    c.bench_function("encode_erc20_transfer", |b| {
        b.iter(|| {
            encode_erc20_transfer(black_box("0x742d35Cc6634C0532925a3b844Bc454e4438f44e"), black_box(amount))
                .expect("valid recipient")
        });
    });
}

#[allow(deprecated)]
fn bench_solana_messages(c: &mut Criterion) {
    let keypair = keypair_from_bytes(&[5u8; 32]).expect("seed");
    let sender = keypair.pubkey();
    let recipient = Pubkey::new_from_array([8; 32]);
    let mint = Pubkey::new_from_array([9; 32]);
    let blockhash = Hash::new_from_array([1; 32]);

    c.bench_function("solana_native_sign_serialize", |b| {
        b.iter(|| {
            let ix = system_instruction::transfer(&sender, black_box(&recipient), 100_000);
            let message = Message::new_with_blockhash(&[ix], Some(&sender), &blockhash);
            let mut tx = Transaction::new_unsigned(message);
            tx.try_sign(&[&keypair], blockhash).expect("signed");
            bincode::serialize(&tx).expect("bytes")
        });
    });

    c.bench_function("solana_ata_derivation", |b| {
        b.iter(|| get_associated_token_address(black_box(&recipient), black_box(&mint)));
    });

    let from_ata = get_associated_token_address(&sender, &mint);
    let to_ata = get_associated_token_address(&recipient, &mint);
    c.bench_function("solana_spl_message_compile", |b| {
        b.iter(|| {
            let ix = spl_token::instruction::transfer_checked(
                &spl_token::id(),
                &from_ata,
                &mint,
                &to_ata,
                &sender,
                &[],
                black_box(1_000_000),
                6,
            )
            .expect("instruction");
            Message::new_with_blockhash(&[ix], Some(&sender), &blockhash).serialize()
        });
    });
}

criterion_group!(benches, bench_amount_scaling, bench_erc20_calldata, bench_solana_messages);
criterion_main!(benches);
