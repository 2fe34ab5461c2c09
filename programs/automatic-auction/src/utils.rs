use crate::errors::AuctionError;
use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};
use arrayref::array_ref;
use solana_program::program_pack::IsInitialized;
use solana_program::{
    program::invoke_signed, program_memory::sol_memcmp, program_pack::Pack, pubkey::PUBKEY_BYTES,
};
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::Account as SplAccount;

// NOTE: Assertion
pub fn assert_keys_equal(key1: Pubkey, key2: Pubkey) -> Result<()> {
    if sol_memcmp(key1.as_ref(), key2.as_ref(), PUBKEY_BYTES) == 0 {
        Ok(())
    } else {
        err!(AuctionError::PublicKeyMismatch)
    }
}

pub fn assert_is_ata(ata: &AccountInfo, wallet: &Pubkey, mint: &Pubkey) -> Result<SplAccount> {
    assert_owned_by(ata, &spl_token::id())?;

    let ata_account: SplAccount = assert_initialized(ata)?;
    assert_keys_equal(ata_account.owner, *wallet)?;
    assert_keys_equal(ata_account.mint, *mint)?;
    assert_keys_equal(get_associated_token_address(wallet, mint), *ata.key)?;
    Ok(ata_account)
}

pub fn assert_owned_by(account: &AccountInfo, owner: &Pubkey) -> Result<()> {
    if account.owner != owner {
        err!(AuctionError::IncorrectOwner)
    } else {
        Ok(())
    }
}

pub fn assert_initialized<T: Pack + IsInitialized>(account_info: &AccountInfo) -> Result<T> {
    let account: T = T::unpack_unchecked(&account_info.data.borrow())?;

    if account.is_initialized() {
        Ok(account)
    } else {
        err!(AuctionError::UninitializedAccount)
    }
}

/// Checks a raw token account holds `mint` and belongs to `owner`.
pub fn assert_token_account(account: &AccountInfo, owner: &Pubkey, mint: &Pubkey) -> Result<()> {
    assert_owned_by(account, &spl_token::id())?;
    assert_keys_equal(get_mint_from_token_account(account)?, *mint)?;
    assert_keys_equal(get_owner_from_token_account(account)?, *owner)
}

// NOTE: util functions

/// ata = Associated Token Accounts
#[allow(clippy::too_many_arguments)]
pub fn make_ata<'info>(
    ata: AccountInfo<'info>,
    wallet: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    fee_payer: AccountInfo<'info>,
    ata_program: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    rent: AccountInfo<'info>,
) -> Result<()> {
    msg!("Create associated token account {}", ata.key);

    invoke_signed(
        &spl_associated_token_account::create_associated_token_account(
            fee_payer.key,
            wallet.key,
            mint.key,
        ),
        &[
            ata,
            wallet,
            mint,
            fee_payer,
            ata_program,
            system_program,
            rent,
            token_program,
        ],
        &[],
    )?;
    Ok(())
}

/// Moves `amount` out of a vault owned by the auction PDA.
pub fn transfer_from_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    destination: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to: destination,
                authority,
            },
            &[signer_seeds],
        ),
        amount,
    )
}

/// Closes an emptied vault, sending its rent to `destination`.
pub fn close_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    destination: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    token::close_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        CloseAccount {
            account: vault.to_account_info(),
            destination,
            authority,
        },
        &[signer_seeds],
    ))
}

/// Cheap method to just grab mint Pubkey from token account, instead of deserializing entire thing
pub fn get_mint_from_token_account(token_account_info: &AccountInfo) -> Result<Pubkey> {
    // get mint from token account from its structure [ mint(32), owner(32, ... )]
    let data = token_account_info.try_borrow_data()?;
    if data.len() < SplAccount::LEN {
        return err!(AuctionError::UninitializedAccount);
    }
    let mint_data = array_ref![data, 0, 32];
    Ok(Pubkey::new_from_array(*mint_data))
}

/// Same as [`get_mint_from_token_account`] for the owner field.
pub fn get_owner_from_token_account(token_account_info: &AccountInfo) -> Result<Pubkey> {
    let data = token_account_info.try_borrow_data()?;
    if data.len() < SplAccount::LEN {
        return err!(AuctionError::UninitializedAccount);
    }
    let owner_data = array_ref![data, 32, 32];
    Ok(Pubkey::new_from_array(*owner_data))
}
