use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

use crate::{constant::*, errors::AuctionError, state::Auction, utils::*};

#[derive(Accounts)]
pub struct Bid<'info> {
    /// Bidder wallet account, pays for the refund account if it has to be recreated.
    #[account(mut)]
    pub bidder: Signer<'info>,

    #[account(
        mut,
        seeds = [AUCTION.as_bytes(), &auction.index.to_le_bytes()],
        bump = auction.bump,
        has_one = payment_mint
    )]
    pub auction: Box<Account<'info, Auction>>,

    pub payment_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [BID_VAULT.as_bytes(), auction.key().as_ref()],
        bump = auction.bid_vault_bump
    )]
    pub bid_vault: Box<Account<'info, TokenAccount>>,

    /// Bidder associated token account, also where this bid is refunded once outbid.
    #[account(
        mut,
        constraint = bidder_account.mint == auction.payment_mint @ AuctionError::PublicKeyMismatch,
        constraint = bidder_account.owner == bidder.key() @ AuctionError::IncorrectOwner
    )]
    pub bidder_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Validated in bid when a previous bid exists, ignored otherwise.
    /// Wallet of the current highest bidder.
    pub previous_bidder: UncheckedAccount<'info>,

    /// CHECK: Validated in bid when a previous bid exists, created when empty.
    /// Refund destination of the current highest bidder.
    #[account(mut)]
    pub previous_bidder_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub ata_program: Program<'info, AssociatedToken>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn bid<'info>(ctx: Context<'_, '_, '_, 'info, Bid<'info>>, price: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.auction.validate_bid(price, now)?;

    let auction = &ctx.accounts.auction;
    let token_program = &ctx.accounts.token_program;

    assert_is_ata(
        &ctx.accounts.bidder_account.to_account_info(),
        &ctx.accounts.bidder.key(),
        &auction.payment_mint,
    )?;

    // NOTE: refund the bid being replaced
    if auction.has_bid() {
        let previous_bidder = &ctx.accounts.previous_bidder;
        let previous_bidder_account = &ctx.accounts.previous_bidder_account;
        assert_keys_equal(previous_bidder.key(), auction.bidder)?;
        assert_keys_equal(previous_bidder_account.key(), auction.bidder_account)?;

        // NOTE: the outbid bidder may have closed the account since bidding
        if previous_bidder_account.data_is_empty() {
            make_ata(
                previous_bidder_account.to_account_info(),
                previous_bidder.to_account_info(),
                ctx.accounts.payment_mint.to_account_info(),
                ctx.accounts.bidder.to_account_info(),
                ctx.accounts.ata_program.to_account_info(),
                token_program.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
                ctx.accounts.rent.to_account_info(),
            )?;
        }

        let index = auction.index.to_le_bytes();
        let bump = [auction.bump];
        let auction_seeds = [AUCTION.as_bytes(), &index, &bump];

        transfer_from_vault(
            token_program,
            &ctx.accounts.bid_vault,
            previous_bidder_account.to_account_info(),
            auction.to_account_info(),
            &auction_seeds,
            auction.price,
        )?;

        msg!("Refunded {} to {}", auction.price, auction.bidder);
    }

    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.bidder_account.to_account_info(),
                to: ctx.accounts.bid_vault.to_account_info(),
                authority: ctx.accounts.bidder.to_account_info(),
            },
        ),
        price,
    )?;

    let bidder = ctx.accounts.bidder.key();
    let bidder_account = ctx.accounts.bidder_account.key();
    let auction = &mut ctx.accounts.auction;
    auction.record_bid(bidder, bidder_account, price)?;

    msg!("Bid {} accepted from {}", price, bidder);

    Ok(())
}
