pub mod admin_config;
pub mod custody;
pub mod deal;
pub mod stake_book;

pub use admin_config::*;
pub use custody::{AssetLedger, PoolLedger, TokenBalance};
pub use deal::*;
pub use stake_book::*;
