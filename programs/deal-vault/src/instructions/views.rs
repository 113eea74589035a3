// Read-only deal and stake queries, answered through return data

use anchor_lang::prelude::*;

use crate::{bonus::compute_bonus, constants::*, state::*};

#[derive(Accounts)]
pub struct ViewDeal<'info> {
    #[account(
        seeds = [DEAL_SEED, &deal.deal_id.to_le_bytes()],
        bump = deal.bump,
    )]
    pub deal: Box<Account<'info, Deal>>,
}

impl<'info> ViewDeal<'info> {
    pub fn check_deal_status(&self, target: DealStatus) -> Result<bool> {
        Ok(self.deal.status == target)
    }

    pub fn deal_info(&self) -> Result<DealInfo> {
        Ok(self.deal.info())
    }

    // Bonus a deposit of `amount` would get right now
    pub fn get_estimate_bonus(&self, amount: u64) -> Result<u64> {
        compute_bonus(&self.deal.bonus_curve, self.deal.total_staked, amount)
    }
}

#[derive(Accounts)]
pub struct ViewStake<'info> {
    #[account(
        seeds = [DEAL_SEED, &deal.deal_id.to_le_bytes()],
        bump = deal.bump,
    )]
    pub deal: Box<Account<'info, Deal>>,

    #[account(
        seeds = [STAKE_BOOK_SEED, deal.key().as_ref()],
        bump = deal.book_bump,
    )]
    pub stake_book: Box<Account<'info, StakeBook>>,
}

impl<'info> ViewStake<'info> {
    pub fn get_bonus(&self, stake_index: u32) -> Result<u64> {
        Ok(self.stake_book.get(stake_index)?.bonus_rate)
    }

    pub fn stake_info(&self, stake_index: u32) -> Result<StakeInfo> {
        Ok(self.stake_book.get(stake_index)?.info())
    }
}

// Deals to inspect are passed as remaining accounts
#[derive(Accounts)]
pub struct ListDeals<'info> {
    #[account(
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,
}

impl<'info> ListDeals<'info> {
    pub fn get_deal_ids(
        &self,
        filter: DealFilter,
        deals: &'info [AccountInfo<'info>],
    ) -> Result<Vec<u64>> {
        let mut ids = Vec::with_capacity(deals.len());

        for info in deals {
            let deal: Account<'info, Deal> = Account::try_from(info)?;
            if filter.matches(&deal) {
                ids.push(deal.deal_id);
            }
        }

        ids.sort_unstable();
        ids.dedup();

        Ok(ids)
    }
}
