// Instructions module
//
// Admin:    initialize, update_admin_config, add_allowed_token, toggle_close
// Deals:    create_deal, update_deal, set_deal_price, update_deal_status
// Stakes:   deposit, commit_stake, withdraw, withdraw_over_amount, send_back
// Claim:    claim
// Custody:  open_pool, deposit_stake, withdraw_stake, encumber, sweep_pool
// Views:    check_deal_status, deal_info, get_deal_ids, get_bonus,
//           get_estimate_bonus, stake_info

pub mod add_allowed_token;
pub mod claim;
pub mod commit_stake;
pub mod create_deal;
pub mod deposit;
pub mod deposit_stake;
pub mod encumber;
pub mod initialize;
pub mod open_pool;
pub mod send_back;
pub mod set_deal_price;
pub mod sweep_pool;
pub mod toggle_close;
pub mod update_admin_config;
pub mod update_deal;
pub mod update_deal_status;
pub mod views;
pub mod withdraw;
pub mod withdraw_stake;

pub use add_allowed_token::*;
pub use claim::*;
pub use commit_stake::*;
pub use create_deal::*;
pub use deposit::*;
pub use deposit_stake::*;
pub use encumber::*;
pub use initialize::*;
pub use open_pool::*;
pub use send_back::*;
pub use set_deal_price::*;
pub use sweep_pool::*;
pub use toggle_close::*;
pub use update_admin_config::*;
pub use update_deal::*;
pub use update_deal_status::*;
pub use views::*;
pub use withdraw::*;
pub use withdraw_stake::*;
