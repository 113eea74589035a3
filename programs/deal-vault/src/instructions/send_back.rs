// Send Back Instruction
//
// Admin or sponsor refunds a stake of a Closed deal to its investor. Runs
// while the global halt is on since it only returns funds.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct SendBack<'info> {
    pub authority: Signer<'info>,

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

    /// CHECK: matched against the stake record
    pub investor: UncheckedAccount<'info>,

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

impl<'info> SendBack<'info> {
    pub fn send_back(&mut self, stake_index: u32) -> Result<()> {
        let caller = self.authority.key();
        require!(
            caller == self.admin_config.admin || caller == self.deal.sponsor,
            DealVaultError::NoPermission
        );
        require!(
            self.deal.status == DealStatus::Closed,
            DealVaultError::WrongState
        );

        let stake = self.stake_book.get_mut(stake_index)?;
        require_keys_eq!(
            stake.investor,
            self.investor.key(),
            DealVaultError::InvalidParameter
        );
        require!(stake.amount > 0, DealVaultError::InsufficientBalance);

        let amount = stake.amount;
        let released = if stake.committed { amount } else { 0 };
        stake.amount = 0;

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
            kind: WithdrawKind::SendBack,
        });

        msg!(
            "Deal {} stake {}: {} sent back to {} by {}",
            self.deal.deal_id,
            stake_index,
            amount,
            self.investor.key(),
            caller
        );

        Ok(())
    }
}
