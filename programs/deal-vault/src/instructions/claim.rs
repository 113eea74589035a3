// Claim Instruction
//
// Sponsor collects min(total_staked, max_sale_amount) once the deal is in
// Claiming. Stakes are consumed earliest first; whatever lies above the cap
// stays on the stakes, released from any commitment, and is refunded through
// withdraw_over_amount afterwards.
//
// Remaining accounts: the TokenBalance row of every investor whose stake is
// consumed or committed, writable.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub sponsor: Signer<'info>,

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
        init_if_needed,
        payer = sponsor,
        associated_token::mint = staking_mint,
        associated_token::authority = sponsor,
    )]
    pub sponsor_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Claim<'info> {
    pub fn claim(&mut self, balances: &'info [AccountInfo<'info>]) -> Result<()> {
        // SECURITY CHECKS

        // 1. Global halt
        self.admin_config.assert_not_closed()?;

        // 2. Sponsor only
        self.deal.assert_is_sponsor(&self.sponsor.key())?;

        // 3. Claim window, once
        require!(
            self.deal.status == DealStatus::Claiming,
            DealVaultError::WrongState
        );
        require!(!self.deal.claimed, DealVaultError::WrongState);

        // 4. The round must have reached its minimum
        let total = self.deal.total_staked;
        require!(
            total >= self.deal.sale_limit.min_sale_amount,
            DealVaultError::AmountOutOfBounds
        );

        let amount = total.min(self.deal.sale_limit.max_sale_amount);
        require!(amount > 0, DealVaultError::InsufficientBalance);

        // 5. Load the investor balance rows
        let deal_key = self.deal.key();
        let mint = self.deal.staking_mint;
        let mut rows = load_balances(balances, &deal_key, &mint)?;

        // Consume stakes in arrival order. The claim fulfils every
        // commitment, so committed stakes are released in full and their
        // remainder becomes plain refund.
        let mut left = amount;
        let mut released_total: u64 = 0;
        let mut fulfilled: u32 = 0;

        for stake in self.stake_book.stakes.iter_mut() {
            if stake.amount == 0 {
                continue;
            }

            let slice = stake.amount.min(left);
            if slice == 0 && !stake.committed {
                continue;
            }

            let row = rows
                .iter_mut()
                .find(|row| row.investor == stake.investor)
                .ok_or(DealVaultError::MissingBalanceAccount)?;

            if stake.committed {
                custody::release_balance(row, stake.amount)?;
                released_total = released_total
                    .checked_add(stake.amount)
                    .ok_or(DealVaultError::Overflow)?;
                stake.committed = false;
                fulfilled += 1;
            }
            custody::debit_balance(row, slice, 0)?;

            stake.amount -= slice;
            left -= slice;
        }

        custody::debit_totals(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            amount,
            released_total,
        )?;

        for row in &rows {
            row.exit(&crate::ID)?;
        }

        self.deal.remove_staked(amount)?;
        self.deal.committed_count = self
            .deal
            .committed_count
            .checked_sub(fulfilled)
            .ok_or(DealVaultError::Underflow)?;
        self.deal.claimed = true;
        self.deal.total_claimed = amount;

        transfer_as_vault_authority(
            amount,
            &self.token_program.to_account_info(),
            &self.vault.to_account_info(),
            &self.sponsor_token.to_account_info(),
            &self.vault_authority.to_account_info(),
            &deal_key,
            self.deal.vault_authority_bump,
        )?;

        emit!(DealClaimed {
            deal_id: self.deal.deal_id,
            sponsor: self.sponsor.key(),
            amount,
            remaining_staked: self.deal.total_staked,
        });

        msg!(
            "Deal {} claimed {}, {} left refundable",
            self.deal.deal_id,
            amount,
            self.deal.total_staked
        );

        Ok(())
    }
}
