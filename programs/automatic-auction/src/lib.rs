pub mod bid;
pub mod cancel_auction;
pub mod close_auction;
pub mod constant;
pub mod create_auction;
pub mod errors;
pub mod state;
mod utils;

pub use crate::bid::*;
pub use crate::cancel_auction::*;
pub use crate::close_auction::*;
pub use crate::create_auction::*;

use crate::constant::*;
use crate::state::*;

use anchor_lang::prelude::*;

declare_id!("HMmKpGJBCdmCp9XMv4YVrnYppr1c5Wi36ptVTXGfs75y");

#[program]
pub mod automatic_auction {
    use super::*;
    use crate::errors::AuctionError;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let config = &mut ctx.accounts.config;

        // NOTE: populate config struct fields
        config.bump = *ctx
            .bumps
            .get("config")
            .ok_or(AuctionError::BumpSeedNotInHashMap)?;
        config.admin = ctx.accounts.admin.key();
        config.auction_count = 0;

        msg!("Initialized with admin {}", config.admin);

        Ok(())
    }

    pub fn create_auction<'info>(
        ctx: Context<'_, '_, '_, 'info, CreateAuction<'info>>,
        start_price: u64,
        end_time: i64,
        lot_amount: u64,
    ) -> Result<()> {
        create_auction::create_auction(ctx, start_price, end_time, lot_amount)
    }

    pub fn bid<'info>(ctx: Context<'_, '_, '_, 'info, Bid<'info>>, price: u64) -> Result<()> {
        bid::bid(ctx, price)
    }

    pub fn close_auction<'info>(ctx: Context<'_, '_, '_, 'info, CloseAuction<'info>>) -> Result<()> {
        close_auction::close_auction(ctx)
    }

    pub fn cancel_auction<'info>(
        ctx: Context<'_, '_, '_, 'info, CancelAuction<'info>>,
    ) -> Result<()> {
        cancel_auction::cancel_auction(ctx)
    }
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the config account and becomes its admin.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Program config PDA
    #[account(init, seeds = [CONFIG.as_bytes()], bump, space = CONFIG_SIZE, payer = admin)]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}
