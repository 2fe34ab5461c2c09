use anchor_lang::prelude::*;

#[error_code]
pub enum AuctionError {
    #[msg("Bump seed not in hash map.")]
    BumpSeedNotInHashMap,

    #[msg("Public keys are not matched")]
    PublicKeyMismatch,

    #[msg("The given account is not an owner")]
    IncorrectOwner,

    #[msg("Cannot initialized the account")]
    UninitializedAccount,

    #[msg("Numerical overflow")]
    NumericalOverflow,

    #[msg("Your bid price is too low")]
    BidPriceTooLow,

    #[msg("Auction has already ended")]
    AuctionEnded,

    #[msg("Auction is still running")]
    AuctionStillRunning,

    #[msg("Auction already has bids")]
    AuctionHasBids,

    #[msg("End time must be in the future")]
    EndTimeInPast,

    #[msg("Lot amount must be greater than zero")]
    InvalidLotAmount,

    #[msg("Lot mint and payment mint must differ")]
    MintsMustDiffer,
}
