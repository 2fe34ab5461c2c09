pub const CONFIG: &str = "config";
pub const AUCTION: &str = "auction";
pub const LOT_VAULT: &str = "lot_vault";
pub const BID_VAULT: &str = "bid_vault";

pub const CONFIG_SIZE: usize = 8 + // discriminator
32 + // admin
8 + // auction_count
1; // bump

pub const AUCTION_SIZE: usize = 8 + // discriminator
1 + // bump
1 + // lot_vault_bump
1 + // bid_vault_bump
1 + // status
8 + // index
32 + // seller
32 + // lot_mint
32 + // payment_mint
8 + // lot_amount
32 + // bidder
32 + // bidder_account
8 + // start_price
8 + // price
8 + // end_time
4 + // bid_count
64; // padding
