use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::{
    constant::*,
    errors::AuctionError,
    state::{Auction, AuctionStatus, Config},
};

#[derive(Accounts)]
pub struct CreateAuction<'info> {
    /// Seller wallet, pays for the auction and vault accounts.
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(mut, seeds = [CONFIG.as_bytes()], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    /// Auction PDA, seeded by the next auction index.
    #[account(
        init,
        payer = seller,
        space = AUCTION_SIZE,
        seeds = [AUCTION.as_bytes(), &config.auction_count.to_le_bytes()],
        bump
    )]
    pub auction: Box<Account<'info, Auction>>,

    pub lot_mint: Box<Account<'info, Mint>>,

    pub payment_mint: Box<Account<'info, Mint>>,

    /// Seller token account the lot is taken from.
    #[account(
        mut,
        constraint = seller_lot_account.mint == lot_mint.key() @ AuctionError::PublicKeyMismatch,
        constraint = seller_lot_account.owner == seller.key() @ AuctionError::IncorrectOwner
    )]
    pub seller_lot_account: Box<Account<'info, TokenAccount>>,

    /// Escrow for the lot while the auction runs.
    #[account(
        init,
        payer = seller,
        seeds = [LOT_VAULT.as_bytes(), auction.key().as_ref()],
        bump,
        token::mint = lot_mint,
        token::authority = auction
    )]
    pub lot_vault: Box<Account<'info, TokenAccount>>,

    /// Escrow for the highest bid.
    #[account(
        init,
        payer = seller,
        seeds = [BID_VAULT.as_bytes(), auction.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = auction
    )]
    pub bid_vault: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn create_auction<'info>(
    ctx: Context<'_, '_, '_, 'info, CreateAuction<'info>>,
    start_price: u64,
    end_time: i64,
    lot_amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    require!(lot_amount > 0, AuctionError::InvalidLotAmount);
    require!(end_time > now, AuctionError::EndTimeInPast);
    require!(
        ctx.accounts.lot_mint.key() != ctx.accounts.payment_mint.key(),
        AuctionError::MintsMustDiffer
    );

    // NOTE: escrow the lot before the auction goes live
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.seller_lot_account.to_account_info(),
                to: ctx.accounts.lot_vault.to_account_info(),
                authority: ctx.accounts.seller.to_account_info(),
            },
        ),
        lot_amount,
    )?;

    let index = ctx.accounts.config.next_index()?;

    let auction = &mut ctx.accounts.auction;
    auction.bump = *ctx
        .bumps
        .get("auction")
        .ok_or(AuctionError::BumpSeedNotInHashMap)?;
    auction.lot_vault_bump = *ctx
        .bumps
        .get("lot_vault")
        .ok_or(AuctionError::BumpSeedNotInHashMap)?;
    auction.bid_vault_bump = *ctx
        .bumps
        .get("bid_vault")
        .ok_or(AuctionError::BumpSeedNotInHashMap)?;
    auction.status = AuctionStatus::Ongoing;
    auction.index = index;
    auction.seller = ctx.accounts.seller.key();
    auction.lot_mint = ctx.accounts.lot_mint.key();
    auction.payment_mint = ctx.accounts.payment_mint.key();
    auction.lot_amount = lot_amount;
    auction.bidder = Pubkey::default();
    auction.bidder_account = Pubkey::default();
    auction.start_price = start_price;
    auction.price = start_price;
    auction.end_time = end_time;
    auction.bid_count = 0;

    msg!(
        "Auction {} created: {} lot tokens, start price {}, ends at {}",
        index,
        lot_amount,
        start_price,
        end_time
    );

    Ok(())
}
