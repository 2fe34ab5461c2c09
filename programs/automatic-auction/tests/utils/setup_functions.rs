//! Bank-backed test harness.
//!
//! These tests must run against the compiled program: `cargo test-bpf --features test-bpf`
//! (or `anchor test`). `cargo test-bpf` sets `BPF_OUT_DIR`, so `ProgramTest` loads
//! `automatic_auction.so` and `processor!` below is unused. Under plain `cargo test` the
//! native 1.9 CPI shim cannot serve the system-program CPI that Anchor's `init` issues,
//! so every test panics inside `initialize` with `MissingAccount`.

use anchor_lang::{InstructionData, ToAccountMetas};
use automatic_auction::{constant::*, errors::AuctionError};
use solana_program::{program_pack::Pack, pubkey::Pubkey, system_instruction, sysvar};
use solana_program_test::*;
use solana_sdk::{
    clock::Clock,
    instruction::{Instruction, InstructionError},
    signature::{Keypair, Signature, Signer},
    transaction::{Transaction, TransactionError},
    transport::TransportError,
};
use spl_associated_token_account::get_associated_token_address;

pub fn automatic_auction_program_test() -> ProgramTest {
    ProgramTest::new(
        "automatic_auction",
        automatic_auction::id(),
        processor!(automatic_auction::entry),
    )
}

pub fn config_pda() -> Pubkey {
    Pubkey::find_program_address(&[CONFIG.as_bytes()], &automatic_auction::id()).0
}

pub fn auction_pda(index: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[AUCTION.as_bytes(), &index.to_le_bytes()],
        &automatic_auction::id(),
    )
    .0
}

pub fn lot_vault_pda(auction: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[LOT_VAULT.as_bytes(), auction.as_ref()],
        &automatic_auction::id(),
    )
    .0
}

pub fn bid_vault_pda(auction: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[BID_VAULT.as_bytes(), auction.as_ref()],
        &automatic_auction::id(),
    )
    .0
}

/// Signs with the context payer plus `signers` and submits.
pub async fn process(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<Signature, TransportError> {
    let mut all_signers = vec![&context.payer];
    all_signers.extend_from_slice(signers);

    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers,
        context.last_blockhash,
    );
    let signature = tx.signatures[0];

    context.banks_client.process_transaction(tx).await?;
    Ok(signature)
}

pub fn assert_auction_error(result: Result<Signature, TransportError>, expected: AuctionError) {
    let code: u32 = expected.into();
    match result {
        Err(TransportError::TransactionError(TransactionError::InstructionError(
            _,
            InstructionError::Custom(actual),
        ))) => assert_eq!(actual, code),
        other => panic!("expected custom error {}, got {:?}", code, other),
    }
}

pub async fn funded_keypair(context: &mut ProgramTestContext, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    let ix = system_instruction::transfer(&context.payer.pubkey(), &keypair.pubkey(), lamports);
    process(context, &[ix], &[]).await.unwrap();
    keypair
}

pub async fn create_mint(context: &mut ProgramTestContext, decimals: u8) -> Pubkey {
    let mint = Keypair::new();
    let rent = context.banks_client.get_rent().await.unwrap();

    let instructions = [
        system_instruction::create_account(
            &context.payer.pubkey(),
            &mint.pubkey(),
            rent.minimum_balance(spl_token::state::Mint::LEN),
            spl_token::state::Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint(
            &spl_token::id(),
            &mint.pubkey(),
            &context.payer.pubkey(),
            None,
            decimals,
        )
        .unwrap(),
    ];

    process(context, &instructions, &[&mint]).await.unwrap();
    mint.pubkey()
}

/// Creates the wallet's associated token account and mints `amount` into it.
pub async fn create_funded_ata(
    context: &mut ProgramTestContext,
    wallet: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Pubkey {
    let ata = get_associated_token_address(wallet, mint);
    let mut instructions = vec![
        spl_associated_token_account::create_associated_token_account(
            &context.payer.pubkey(),
            wallet,
            mint,
        ),
    ];
    if amount > 0 {
        instructions.push(
            spl_token::instruction::mint_to(
                &spl_token::id(),
                mint,
                &ata,
                &context.payer.pubkey(),
                &[],
                amount,
            )
            .unwrap(),
        );
    }

    process(context, &instructions, &[]).await.unwrap();
    ata
}

/// Token account at a fresh keypair address, i.e. not an associated token account.
pub async fn create_token_account(
    context: &mut ProgramTestContext,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Pubkey {
    let account = Keypair::new();
    let rent = context.banks_client.get_rent().await.unwrap();

    let instructions = [
        system_instruction::create_account(
            &context.payer.pubkey(),
            &account.pubkey(),
            rent.minimum_balance(spl_token::state::Account::LEN),
            spl_token::state::Account::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_account(
            &spl_token::id(),
            &account.pubkey(),
            mint,
            owner,
        )
        .unwrap(),
    ];

    process(context, &instructions, &[&account]).await.unwrap();
    account.pubkey()
}

pub async fn transfer_tokens(
    context: &mut ProgramTestContext,
    from: &Pubkey,
    to: &Pubkey,
    owner: &Keypair,
    amount: u64,
) {
    let ix = spl_token::instruction::transfer(
        &spl_token::id(),
        from,
        to,
        &owner.pubkey(),
        &[],
        amount,
    )
    .unwrap();
    process(context, &[ix], &[owner]).await.unwrap();
}

/// Closes an empty token account, rent goes back to its owner.
pub async fn close_token_account(context: &mut ProgramTestContext, account: &Pubkey, owner: &Keypair) {
    let ix = spl_token::instruction::close_account(
        &spl_token::id(),
        account,
        &owner.pubkey(),
        &owner.pubkey(),
        &[],
    )
    .unwrap();
    process(context, &[ix], &[owner]).await.unwrap();
}

pub fn assert_anchor_error(
    result: Result<Signature, TransportError>,
    expected: anchor_lang::error::ErrorCode,
) {
    let code = expected as u32;
    match result {
        Err(TransportError::TransactionError(TransactionError::InstructionError(
            _,
            InstructionError::Custom(actual),
        ))) => assert_eq!(actual, code),
        other => panic!("expected anchor error {}, got {:?}", code, other),
    }
}

pub async fn token_balance(context: &mut ProgramTestContext, account: &Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(*account)
        .await
        .unwrap()
        .expect("token account missing");
    spl_token::state::Account::unpack(&account.data).unwrap().amount
}

pub async fn account_exists(context: &mut ProgramTestContext, account: &Pubkey) -> bool {
    context
        .banks_client
        .get_account(*account)
        .await
        .unwrap()
        .is_some()
}

pub async fn now(context: &mut ProgramTestContext) -> i64 {
    let clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp
}

/// Moves the bank clock so `end_time`s in the past become reachable.
pub async fn warp_to_timestamp(context: &mut ProgramTestContext, unix_timestamp: i64) {
    let mut clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    clock.unix_timestamp = unix_timestamp;
    context.set_sysvar(&clock);
}

pub fn initialize_ix(admin: &Pubkey) -> Instruction {
    Instruction {
        program_id: automatic_auction::id(),
        accounts: automatic_auction::accounts::Initialize {
            admin: *admin,
            config: config_pda(),
            system_program: solana_program::system_program::id(),
        }
        .to_account_metas(None),
        data: automatic_auction::instruction::Initialize {}.data(),
    }
}

pub fn create_auction_ix(
    index: u64,
    seller: &Pubkey,
    lot_mint: &Pubkey,
    payment_mint: &Pubkey,
    start_price: u64,
    end_time: i64,
    lot_amount: u64,
) -> Instruction {
    let auction = auction_pda(index);
    Instruction {
        program_id: automatic_auction::id(),
        accounts: automatic_auction::accounts::CreateAuction {
            seller: *seller,
            config: config_pda(),
            auction,
            lot_mint: *lot_mint,
            payment_mint: *payment_mint,
            seller_lot_account: get_associated_token_address(seller, lot_mint),
            lot_vault: lot_vault_pda(&auction),
            bid_vault: bid_vault_pda(&auction),
            system_program: solana_program::system_program::id(),
            token_program: spl_token::id(),
            rent: sysvar::rent::id(),
        }
        .to_account_metas(None),
        data: automatic_auction::instruction::CreateAuction {
            start_price,
            end_time,
            lot_amount,
        }
        .data(),
    }
}

pub fn bid_ix(
    auction: &Pubkey,
    bidder: &Pubkey,
    bidder_account: &Pubkey,
    payment_mint: &Pubkey,
    previous_bidder: &Pubkey,
    previous_bidder_account: &Pubkey,
    price: u64,
) -> Instruction {
    Instruction {
        program_id: automatic_auction::id(),
        accounts: automatic_auction::accounts::Bid {
            bidder: *bidder,
            auction: *auction,
            payment_mint: *payment_mint,
            bid_vault: bid_vault_pda(auction),
            bidder_account: *bidder_account,
            previous_bidder: *previous_bidder,
            previous_bidder_account: *previous_bidder_account,
            token_program: spl_token::id(),
            system_program: solana_program::system_program::id(),
            ata_program: spl_associated_token_account::id(),
            rent: sysvar::rent::id(),
        }
        .to_account_metas(None),
        data: automatic_auction::instruction::Bid { price }.data(),
    }
}

pub fn close_auction_ix(
    index: u64,
    payer: &Pubkey,
    seller: &Pubkey,
    lot_mint: &Pubkey,
    payment_mint: &Pubkey,
    lot_recipient: &Pubkey,
) -> Instruction {
    let auction = auction_pda(index);
    Instruction {
        program_id: automatic_auction::id(),
        accounts: automatic_auction::accounts::CloseAuction {
            payer: *payer,
            auction,
            seller: *seller,
            lot_mint: *lot_mint,
            payment_mint: *payment_mint,
            lot_vault: lot_vault_pda(&auction),
            bid_vault: bid_vault_pda(&auction),
            lot_recipient: *lot_recipient,
            lot_destination: get_associated_token_address(lot_recipient, lot_mint),
            seller_payment_account: get_associated_token_address(seller, payment_mint),
            token_program: spl_token::id(),
            system_program: solana_program::system_program::id(),
            ata_program: spl_associated_token_account::id(),
            rent: sysvar::rent::id(),
        }
        .to_account_metas(None),
        data: automatic_auction::instruction::CloseAuction {}.data(),
    }
}

pub fn cancel_auction_ix(
    index: u64,
    seller: &Pubkey,
    lot_mint: &Pubkey,
    payment_mint: &Pubkey,
) -> Instruction {
    let auction = auction_pda(index);
    Instruction {
        program_id: automatic_auction::id(),
        accounts: automatic_auction::accounts::CancelAuction {
            seller: *seller,
            auction,
            lot_vault: lot_vault_pda(&auction),
            bid_vault: bid_vault_pda(&auction),
            seller_lot_account: get_associated_token_address(seller, lot_mint),
            seller_payment_account: get_associated_token_address(seller, payment_mint),
            token_program: spl_token::id(),
        }
        .to_account_metas(None),
        data: automatic_auction::instruction::CancelAuction {}.data(),
    }
}
