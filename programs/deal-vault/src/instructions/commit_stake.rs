// Commit Stake Instruction
//
// Investor opts a stake into the round's binding commitment. The live
// amount is encumbered in custody and the stake can no longer be withdrawn
// freely. A committed stake also freezes the deal parameters.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct CommitStake<'info> {
    pub investor: Signer<'info>,

    #[account(
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Box<Account<'info, AdminConfig>>,

    #[account(
        mut,
        seeds = [DEAL_SEED, &deal.deal_id.to_le_bytes()],
        bump = deal.bump,
    )]
    pub deal: Box<Account<'info, Deal>>,

    #[account(
        mut,
        seeds = [STAKE_BOOK_SEED, deal.key().as_ref()],
        bump = deal.book_bump,
    )]
    pub stake_book: Box<Account<'info, StakeBook>>,

    #[account(
        mut,
        seeds = [POOL_LEDGER_SEED, deal.key().as_ref()],
        bump = pool_ledger.bump,
    )]
    pub pool_ledger: Box<Account<'info, PoolLedger>>,

    #[account(
        mut,
        seeds = [ASSET_LEDGER_SEED, deal.key().as_ref(), deal.staking_mint.as_ref()],
        bump = asset_ledger.bump,
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    #[account(
        mut,
        seeds = [
            TOKEN_BALANCE_SEED,
            deal.key().as_ref(),
            investor.key().as_ref(),
            deal.staking_mint.as_ref(),
        ],
        bump = token_balance.bump,
    )]
    pub token_balance: Box<Account<'info, TokenBalance>>,
}

impl<'info> CommitStake<'info> {
    pub fn commit_stake(&mut self, stake_index: u32) -> Result<()> {
        self.admin_config.assert_not_closed()?;

        require!(
            matches!(self.deal.status, DealStatus::Staking | DealStatus::Offering),
            DealVaultError::WrongState
        );

        let stake = self.stake_book.get_mut(stake_index)?;
        require_keys_eq!(stake.investor, self.investor.key(), DealVaultError::NoPermission);
        require!(!stake.committed, DealVaultError::WrongState);
        require!(stake.amount > 0, DealVaultError::InsufficientBalance);

        stake.committed = true;
        let amount = stake.amount;

        custody::encumber(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            &mut self.token_balance,
            amount,
        )?;

        self.deal.committed_count = self
            .deal
            .committed_count
            .checked_add(1)
            .ok_or(DealVaultError::Overflow)?;

        emit!(StakeCommitted {
            deal_id: self.deal.deal_id,
            stake_index,
            investor: self.investor.key(),
            amount,
        });

        msg!(
            "Deal {} stake {} committed: {}",
            self.deal.deal_id,
            stake_index,
            amount
        );

        Ok(())
    }
}
