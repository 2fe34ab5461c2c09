use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constant::*,
    state::{Auction, AuctionStatus},
    utils::*,
};

#[derive(Accounts)]
pub struct CancelAuction<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        mut,
        seeds = [AUCTION.as_bytes(), &auction.index.to_le_bytes()],
        bump = auction.bump,
        has_one = seller
    )]
    pub auction: Box<Account<'info, Auction>>,

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

    /// CHECK: Validated in cancel_auction.
    /// Seller token account the lot is returned to.
    #[account(mut)]
    pub seller_lot_account: UncheckedAccount<'info>,

    /// CHECK: Validated in cancel_auction.
    /// Seller token account swept with anything left in the bid vault.
    #[account(mut)]
    pub seller_payment_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn cancel_auction<'info>(ctx: Context<'_, '_, '_, 'info, CancelAuction<'info>>) -> Result<()> {
    ctx.accounts.auction.validate_cancel()?;

    let auction = &ctx.accounts.auction;
    let seller_lot_account = &ctx.accounts.seller_lot_account;
    let seller_payment_account = &ctx.accounts.seller_payment_account;

    assert_token_account(
        &seller_lot_account.to_account_info(),
        &auction.seller,
        &auction.lot_mint,
    )?;
    assert_token_account(
        &seller_payment_account.to_account_info(),
        &auction.seller,
        &auction.payment_mint,
    )?;

    let index = auction.index.to_le_bytes();
    let bump = [auction.bump];
    let auction_seeds = [AUCTION.as_bytes(), &index, &bump];

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.lot_vault,
        seller_lot_account.to_account_info(),
        auction.to_account_info(),
        &auction_seeds,
        ctx.accounts.lot_vault.amount,
    )?;

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.bid_vault,
        seller_payment_account.to_account_info(),
        auction.to_account_info(),
        &auction_seeds,
        ctx.accounts.bid_vault.amount,
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

    msg!("Auction {} cancelled by seller", auction.index);

    ctx.accounts.auction.status = AuctionStatus::Cancelled;

    Ok(())
}
