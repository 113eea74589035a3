// Deal Vault Program
//
// Fundraising rounds ("deals") with a linearly declining early-participation
// bonus. Investors stake one SPL token per deal into pooled custody; the
// sponsor claims up to the max sale amount and the excess stays refundable.
//
// Instructions:
// - initialize / update_admin_config / add_allowed_token: program config
// - toggle_close: global halt, exits stay open
// - create_deal / update_deal / set_deal_price / update_deal_status: lifecycle
// - deposit / commit_stake / withdraw / withdraw_over_amount / send_back: stakes
// - claim: sponsor collects the capped proceeds
// - open_pool / deposit_stake / withdraw_stake / encumber / sweep_pool: raw custody
// - check_deal_status / deal_info / get_deal_ids / get_bonus /
//   get_estimate_bonus / stake_info: read-only views

use anchor_lang::prelude::*;

pub mod bonus;
pub mod constants;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::*;

declare_id!("GaarejNHft6ikEEPaTi71jaTsNnQxgq9g2xiBgSZj3Pr");

#[program]
pub mod deal_vault {
    use super::*;

    // ---------------------------------------------------------------- admin

    pub fn initialize(
        ctx: Context<Initialize>,
        controller: Pubkey,
        settlement_recipient: Pubkey,
    ) -> Result<()> {
        ctx.accounts
            .initialize(controller, settlement_recipient, &ctx.bumps)
    }

    pub fn update_admin_config(
        ctx: Context<UpdateAdminConfig>,
        controller: Option<Pubkey>,
        settlement_recipient: Option<Pubkey>,
    ) -> Result<()> {
        ctx.accounts
            .update_admin_config(controller, settlement_recipient)
    }

    pub fn add_allowed_token(ctx: Context<AddAllowedToken>) -> Result<()> {
        ctx.accounts.add_allowed_token()
    }

    pub fn toggle_close(ctx: Context<ToggleClose>) -> Result<()> {
        ctx.accounts.toggle_close()
    }

    // ---------------------------------------------------------------- deals

    pub fn create_deal(ctx: Context<CreateDeal>, deal_id: u64, params: DealParams) -> Result<()> {
        ctx.accounts.create_deal(deal_id, params, &ctx.bumps)
    }

    pub fn update_deal(ctx: Context<UpdateDeal>, params: DealParams) -> Result<()> {
        ctx.accounts.update_deal(params)
    }

    pub fn set_deal_price(ctx: Context<SetDealPrice>, price: u64) -> Result<()> {
        ctx.accounts.set_deal_price(price)
    }

    pub fn update_deal_status(ctx: Context<UpdateDealStatus>, target: DealStatus) -> Result<()> {
        ctx.accounts.update_deal_status(target)
    }

    pub fn check_deal_status(ctx: Context<ViewDeal>, target: DealStatus) -> Result<bool> {
        ctx.accounts.check_deal_status(target)
    }

    pub fn deal_info(ctx: Context<ViewDeal>) -> Result<DealInfo> {
        ctx.accounts.deal_info()
    }

    // Deals to filter are passed as remaining accounts
    pub fn get_deal_ids<'info>(
        ctx: Context<'_, '_, 'info, 'info, ListDeals<'info>>,
        filter: DealFilter,
    ) -> Result<Vec<u64>> {
        ctx.accounts.get_deal_ids(filter, ctx.remaining_accounts)
    }

    // --------------------------------------------------------------- stakes

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        ctx.accounts.deposit(amount, &ctx.bumps)
    }

    pub fn commit_stake(ctx: Context<CommitStake>, stake_index: u32) -> Result<()> {
        ctx.accounts.commit_stake(stake_index)
    }

    pub fn withdraw(ctx: Context<Withdraw>, stake_index: u32) -> Result<()> {
        ctx.accounts.withdraw(stake_index)
    }

    pub fn withdraw_over_amount(ctx: Context<Withdraw>, stake_index: u32) -> Result<()> {
        ctx.accounts.withdraw_over_amount(stake_index)
    }

    pub fn send_back(ctx: Context<SendBack>, stake_index: u32) -> Result<()> {
        ctx.accounts.send_back(stake_index)
    }

    pub fn get_bonus(ctx: Context<ViewStake>, stake_index: u32) -> Result<u64> {
        ctx.accounts.get_bonus(stake_index)
    }

    pub fn get_estimate_bonus(ctx: Context<ViewDeal>, amount: u64) -> Result<u64> {
        ctx.accounts.get_estimate_bonus(amount)
    }

    pub fn stake_info(ctx: Context<ViewStake>, stake_index: u32) -> Result<StakeInfo> {
        ctx.accounts.stake_info(stake_index)
    }

    // Investor TokenBalance rows are passed as remaining accounts
    pub fn claim<'info>(ctx: Context<'_, '_, 'info, 'info, Claim<'info>>) -> Result<()> {
        ctx.accounts.claim(ctx.remaining_accounts)
    }

    // -------------------------------------------------------------- custody

    pub fn open_pool(ctx: Context<OpenPool>, pool_key: Pubkey) -> Result<()> {
        ctx.accounts.open_pool(pool_key, &ctx.bumps)
    }

    pub fn deposit_stake(ctx: Context<DepositStake>, amount: u64) -> Result<()> {
        ctx.accounts.deposit_stake(amount, &ctx.bumps)
    }

    pub fn withdraw_stake(ctx: Context<WithdrawStake>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_stake(amount)
    }

    pub fn encumber(ctx: Context<Encumber>, amount: u64) -> Result<()> {
        ctx.accounts.encumber(amount)
    }

    // Encumbered TokenBalance rows are passed as remaining accounts
    pub fn sweep_pool<'info>(ctx: Context<'_, '_, 'info, 'info, SweepPool<'info>>) -> Result<()> {
        ctx.accounts.sweep_pool(ctx.remaining_accounts)
    }
}
