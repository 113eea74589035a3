// Deposit Instruction
//
// Investor stakes the deal's token. The bonus rate is frozen from the deal
// total before this deposit, the stake is appended to the book, custody is
// credited and the tokens move into the deal vault. Deposits past the max
// sale amount are accepted and trimmed later by withdraw_over_amount / claim.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{
    bonus::compute_bonus, constants::*, errors::*, events::*, helpers::*, state::*,
};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
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

    // Grows by one record, rent paid by the investor
    #[account(
        mut,
        seeds = [STAKE_BOOK_SEED, deal.key().as_ref()],
        bump = deal.book_bump,
        realloc = stake_book.grown_space(),
        realloc::payer = investor,
        realloc::zero = false,
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
        init_if_needed,
        payer = investor,
        space = ANCHOR_DISCRIMINATOR + TokenBalance::INIT_SPACE,
        seeds = [
            TOKEN_BALANCE_SEED,
            deal.key().as_ref(),
            investor.key().as_ref(),
            staking_mint.key().as_ref(),
        ],
        bump,
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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, amount: u64, bumps: &DepositBumps) -> Result<()> {
        let investor = self.investor.key();
        let now = Clock::get()?.unix_timestamp;

        // 1. Global halt
        self.admin_config.assert_not_closed()?;

        // 2. Status window
        require!(self.deal.accepts_deposits(now)?, DealVaultError::WrongState);

        // 3. Lead investor goes first
        require!(
            !self.deal.lead_pending() || self.deal.is_lead(&investor),
            DealVaultError::LeadInvestorRequired
        );

        // 4. Amount and per-investor bounds
        require!(amount > 0, DealVaultError::AmountOutOfBounds);
        let investor_total = self.stake_book.live_total_of(&investor)?;
        self.deal.assert_stake_bounds(amount, investor_total)?;

        // 5. Funds available, checked up front so the error is ours
        require!(
            self.investor_token.amount >= amount,
            DealVaultError::AssetTransferFailed
        );

        // 6. Snapshot position and bonus, append the stake
        let position = self.deal.total_staked;
        let bonus_rate = compute_bonus(&self.deal.bonus_curve, position, amount)?;

        let stake_index = self.stake_book.push(StakeRecord {
            investor,
            amount,
            deposited: amount,
            position,
            bonus_rate,
            committed: false,
            deposited_at: now,
        })?;

        self.deal.add_staked(amount)?;

        if self.deal.is_lead(&investor) {
            self.deal.lead_staked = true;
        }

        if self.deal.status == DealStatus::NotDisplaying {
            self.deal.status = DealStatus::Staking;
            emit!(DealStatusChanged {
                deal_id: self.deal.deal_id,
                from: DealStatus::NotDisplaying,
                to: DealStatus::Staking,
            });
        }

        // 7. Custody
        if self.token_balance.is_new() {
            self.token_balance.pool_key = self.deal.key();
            self.token_balance.investor = investor;
            self.token_balance.mint = self.staking_mint.key();
            self.token_balance.bump = bumps.token_balance;
        }

        custody::credit(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            &mut self.token_balance,
            amount,
        )?;

        transfer_tokens(
            amount,
            &self.token_program.to_account_info(),
            &self.investor_token.to_account_info(),
            &self.vault.to_account_info(),
            &self.investor.to_account_info(),
        )?;

        emit!(StakeDeposited {
            deal_id: self.deal.deal_id,
            stake_index,
            investor,
            amount,
            position,
            bonus_rate,
        });

        msg!(
            "Deal {} stake {}: {} at position {}, bonus {}",
            self.deal.deal_id,
            stake_index,
            amount,
            position,
            bonus_rate
        );

        Ok(())
    }
}
