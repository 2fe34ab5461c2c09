use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{
    constant::*,
    state::{Auction, AuctionStatus},
    utils::*,
};

#[derive(Accounts)]
pub struct CloseAuction<'info> {
    /// Whoever cranks the settlement; pays for missing destination accounts.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [AUCTION.as_bytes(), &auction.index.to_le_bytes()],
        bump = auction.bump,
        has_one = seller,
        has_one = lot_mint,
        has_one = payment_mint
    )]
    pub auction: Box<Account<'info, Auction>>,

    /// CHECK: Checked against auction.seller via has_one.
    /// Seller wallet, receives vault rent.
    #[account(mut)]
    pub seller: UncheckedAccount<'info>,

    pub lot_mint: Box<Account<'info, Mint>>,

    pub payment_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [LOT_VAULT.as_bytes(), auction.key().as_ref()],
        bump = auction.lot_vault_bump
    )]
    pub lot_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [BID_VAULT.as_bytes(), auction.key().as_ref()],
        bump = auction.bid_vault_bump
    )]
    pub bid_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: Validated in close_auction.
    /// Winner wallet, or the seller when nobody bid.
    pub lot_recipient: UncheckedAccount<'info>,

    /// CHECK: Validated in close_auction, created when empty.
    /// Associated token account of `lot_recipient` for the lot mint.
    #[account(mut)]
    pub lot_destination: UncheckedAccount<'info>,

    /// CHECK: Validated in close_auction, created when empty.
    /// Associated token account of the seller for the payment mint.
    #[account(mut)]
    pub seller_payment_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub ata_program: Program<'info, AssociatedToken>,
    pub rent: Sysvar<'info, Rent>,
}

/// Settles an auction whose end time has passed. Permissionless so any keeper can run it.
pub fn close_auction<'info>(ctx: Context<'_, '_, '_, 'info, CloseAuction<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.auction.validate_close(now)?;

    let auction = &ctx.accounts.auction;
    let lot_recipient = &ctx.accounts.lot_recipient;
    let lot_destination = &ctx.accounts.lot_destination;
    let seller_payment_account = &ctx.accounts.seller_payment_account;
    assert_keys_equal(lot_recipient.key(), auction.lot_recipient())?;

    // NOTE: either side may have closed its account since the auction started
    for (destination, wallet, mint) in [
        (
            lot_destination.to_account_info(),
            lot_recipient.to_account_info(),
            ctx.accounts.lot_mint.to_account_info(),
        ),
        (
            seller_payment_account.to_account_info(),
            ctx.accounts.seller.to_account_info(),
            ctx.accounts.payment_mint.to_account_info(),
        ),
    ] {
        if destination.data_is_empty() {
            make_ata(
                destination.clone(),
                wallet.clone(),
                mint.clone(),
                ctx.accounts.payer.to_account_info(),
                ctx.accounts.ata_program.to_account_info(),
                ctx.accounts.token_program.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
                ctx.accounts.rent.to_account_info(),
            )?;
        }

        assert_is_ata(&destination, wallet.key, mint.key)?;
    }

    let index = auction.index.to_le_bytes();
    let bump = [auction.bump];
    let auction_seeds = [AUCTION.as_bytes(), &index, &bump];

    let lot_balance = ctx.accounts.lot_vault.amount;
    let bid_balance = ctx.accounts.bid_vault.amount;

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.lot_vault,
        lot_destination.to_account_info(),
        auction.to_account_info(),
        &auction_seeds,
        lot_balance,
    )?;

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.bid_vault,
        seller_payment_account.to_account_info(),
        auction.to_account_info(),
        &auction_seeds,
        bid_balance,
    )?;

    for vault in [&ctx.accounts.lot_vault, &ctx.accounts.bid_vault] {
        close_vault(
            &ctx.accounts.token_program,
            vault,
            ctx.accounts.seller.to_account_info(),
            auction.to_account_info(),
            &auction_seeds,
        )?;
    }

    if auction.has_bid() {
        msg!(
            "Auction {} settled: {} wins at {}",
            auction.index,
            auction.bidder,
            auction.price
        );
    } else {
        msg!("Auction {} closed without bids", auction.index);
    }

    ctx.accounts.auction.status = AuctionStatus::Settled;

    Ok(())
}
