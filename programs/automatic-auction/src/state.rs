use anchor_lang::prelude::*;

use crate::errors::AuctionError;

/// Program-wide settings written once by `initialize`.
#[account]
pub struct Config {
    pub admin: Pubkey,
    pub auction_count: u64,
    pub bump: u8,
}

impl Config {
    /// Hands out the next auction index.
    pub fn next_index(&mut self) -> Result<u64> {
        let index = self.auction_count;
        self.auction_count = self
            .auction_count
            .checked_add(1)
            .ok_or(AuctionError::NumericalOverflow)?;
        Ok(index)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStatus {
    Ongoing,
    Settled,
    Cancelled,
}

impl Default for AuctionStatus {
    fn default() -> Self {
        AuctionStatus::Ongoing
    }
}

#[account]
#[derive(Default)]
pub struct Auction {
    pub bump: u8,
    pub lot_vault_bump: u8,
    pub bid_vault_bump: u8,
    pub status: AuctionStatus,
    pub index: u64,
    pub seller: Pubkey,
    pub lot_mint: Pubkey,
    pub payment_mint: Pubkey,
    pub lot_amount: u64,
    /// Highest bidder wallet, default key while nobody has bid.
    pub bidder: Pubkey,
    /// Token account the highest bid is refunded to when outbid.
    pub bidder_account: Pubkey,
    pub start_price: u64,
    pub price: u64,
    pub end_time: i64,
    pub bid_count: u32,
}

impl Auction {
    pub fn is_ongoing(&self) -> bool {
        self.status == AuctionStatus::Ongoing
    }

    pub fn has_bid(&self) -> bool {
        self.bidder != Pubkey::default()
    }

    /// Wallet that receives the lot on settlement.
    pub fn lot_recipient(&self) -> Pubkey {
        if self.has_bid() {
            self.bidder
        } else {
            self.seller
        }
    }

    pub fn validate_bid(&self, price: u64, now: i64) -> Result<()> {
        require!(self.is_ongoing(), AuctionError::AuctionEnded);
        require!(now < self.end_time, AuctionError::AuctionEnded);
        require!(price > self.price, AuctionError::BidPriceTooLow);
        Ok(())
    }

    pub fn validate_close(&self, now: i64) -> Result<()> {
        require!(self.is_ongoing(), AuctionError::AuctionEnded);
        require!(now >= self.end_time, AuctionError::AuctionStillRunning);
        Ok(())
    }

    pub fn validate_cancel(&self) -> Result<()> {
        require!(self.is_ongoing(), AuctionError::AuctionEnded);
        require!(!self.has_bid(), AuctionError::AuctionHasBids);
        Ok(())
    }

    pub fn record_bid(&mut self, bidder: Pubkey, bidder_account: Pubkey, price: u64) -> Result<()> {
        self.bid_count = self
            .bid_count
            .checked_add(1)
            .ok_or(AuctionError::NumericalOverflow)?;
        self.bidder = bidder;
        self.bidder_account = bidder_account;
        self.price = price;
        Ok(())
    }
}
