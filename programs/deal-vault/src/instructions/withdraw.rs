// Withdraw Instructions
//
// withdraw:             investor takes back the whole live amount of a stake
// withdraw_over_amount: investor takes back only the part of a stake lying
//                       above the max sale amount, or all of it once the
//                       sponsor has claimed
//
// While the global halt is on, withdraw runs in any deal status and
// withdraw_over_amount runs for uncommitted stakes.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct Withdraw<'info> {
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
        seeds = [ASSET_LEDGER_SEED, deal.key().as_ref(), staking_mint.key().as_ref()],
        bump = asset_ledger.bump,
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    #[account(
        mut,
        seeds = [
            TOKEN_BALANCE_SEED,
            deal.key().as_ref(),
            investor.key().as_ref(),
            staking_mint.key().as_ref(),
        ],
        bump = token_balance.bump,
    )]
    pub token_balance: Box<Account<'info, TokenBalance>>,

    #[account(address = deal.staking_mint)]
    pub staking_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA owning the deal vault
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, deal.key().as_ref()],
        bump = deal.vault_authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = staking_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = investor,
    )]
    pub investor_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self, stake_index: u32) -> Result<()> {
        let closed = self.admin_config.closed;

        if !closed {
            require!(self.deal.accepts_withdrawals(), DealVaultError::WrongState);
        }

        let stake = self.stake_book.get_mut(stake_index)?;
        require_keys_eq!(stake.investor, self.investor.key(), DealVaultError::NoPermission);

        // A commitment is released only by the claim
        require!(!stake.committed, DealVaultError::WrongState);
        require!(stake.amount > 0, DealVaultError::InsufficientBalance);

        let amount = stake.amount;
        stake.amount = 0;

        self.pay_out(stake_index, amount, 0, WithdrawKind::Withdraw)
    }

    pub fn withdraw_over_amount(&mut self, stake_index: u32) -> Result<()> {
        // After the claim the cap is spent and the whole remainder is refund
        let refund = self.stake_book.refundable_amount(
            stake_index,
            self.deal.sale_limit.max_sale_amount,
            self.deal.claimed,
        )?;

        let closed = self.admin_config.closed;
        let stake = self.stake_book.get_mut(stake_index)?;
        require_keys_eq!(stake.investor, self.investor.key(), DealVaultError::NoPermission);
        require!(!closed || !stake.committed, DealVaultError::Closed);
        require!(refund > 0, DealVaultError::NothingToRefund);

        let released = if stake.committed { refund } else { 0 };
        stake.amount -= refund;

        self.pay_out(stake_index, refund, released, WithdrawKind::OverCap)
    }

    fn pay_out(
        &mut self,
        stake_index: u32,
        amount: u64,
        released: u64,
        kind: WithdrawKind,
    ) -> Result<()> {
        self.deal.remove_staked(amount)?;

        custody::debit(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            &mut self.token_balance,
            amount,
            released,
        )?;

        transfer_as_vault_authority(
            amount,
            &self.token_program.to_account_info(),
            &self.vault.to_account_info(),
            &self.investor_token.to_account_info(),
            &self.vault_authority.to_account_info(),
            &self.deal.key(),
            self.deal.vault_authority_bump,
        )?;

        emit!(StakeWithdrawn {
            deal_id: self.deal.deal_id,
            stake_index,
            investor: self.investor.key(),
            amount,
            kind,
        });

        msg!(
            "Deal {} stake {}: {} returned ({:?}), deal total {}",
            self.deal.deal_id,
            stake_index,
            amount,
            kind,
            self.deal.total_staked
        );

        Ok(())
    }
}
