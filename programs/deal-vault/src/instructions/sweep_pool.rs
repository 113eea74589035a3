// Sweep Pool Instruction
//
// Controller moves every encumbered unit of one asset of a pool to the
// settlement recipient in a single transfer. Unencumbered balances stay
// withdrawable through withdraw_stake.
//
// Remaining accounts: every TokenBalance row of the pool and asset that
// carries an encumbrance, writable. The sweep fails unless they add up to
// the asset ledger's encumbered total.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct SweepPool<'info> {
    pub controller: Signer<'info>,

    #[account(
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Box<Account<'info, AdminConfig>>,

    #[account(
        mut,
        seeds = [POOL_LEDGER_SEED, pool_ledger.pool_key.as_ref()],
        bump = pool_ledger.bump,
    )]
    pub pool_ledger: Box<Account<'info, PoolLedger>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [ASSET_LEDGER_SEED, pool_ledger.pool_key.as_ref(), mint.key().as_ref()],
        bump = asset_ledger.bump,
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    /// CHECK: PDA owning the pool vaults
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, pool_ledger.pool_key.as_ref()],
        bump = pool_ledger.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = vault_authority,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        constraint = recipient_token.owner == admin_config.settlement_recipient
            @ DealVaultError::InvalidParameter,
    )]
    pub recipient_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> SweepPool<'info> {
    pub fn sweep_pool(&mut self, balances: &'info [AccountInfo<'info>]) -> Result<()> {
        self.admin_config.assert_not_closed()?;
        self.admin_config.assert_is_controller(&self.controller.key())?;
        self.pool_ledger.assert_controller_pool()?;

        let pool_key = self.pool_ledger.pool_key;
        let mint = self.mint.key();
        let mut rows = load_balances(balances, &pool_key, &mint)?;

        let mut swept: u64 = 0;
        for row in rows.iter_mut() {
            let encumbered = row.encumbered;
            custody::debit_balance(row, encumbered, encumbered)?;
            swept = swept
                .checked_add(encumbered)
                .ok_or(DealVaultError::Overflow)?;
        }

        require!(
            swept == self.asset_ledger.encumbered,
            DealVaultError::SweepIncomplete
        );
        require!(swept > 0, DealVaultError::InsufficientBalance);

        custody::debit_totals(&mut self.pool_ledger, &mut self.asset_ledger, swept, swept)?;

        for row in &rows {
            row.exit(&crate::ID)?;
        }

        transfer_as_vault_authority(
            swept,
            &self.token_program.to_account_info(),
            &self.vault.to_account_info(),
            &self.recipient_token.to_account_info(),
            &self.vault_authority.to_account_info(),
            &pool_key,
            self.pool_ledger.authority_bump,
        )?;

        emit!(PoolSwept {
            pool_key,
            mint,
            recipient: self.admin_config.settlement_recipient,
            amount: swept,
        });

        msg!(
            "Pool {}: {} swept to {}, {} still deposited",
            pool_key,
            swept,
            self.admin_config.settlement_recipient,
            self.pool_ledger.total_deposited
        );

        Ok(())
    }
}
