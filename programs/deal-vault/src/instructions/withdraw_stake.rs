// Withdraw Stake Instruction
//
// Controller returns unencumbered custody funds to their investor. Runs
// while the global halt is on.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct WithdrawStake<'info> {
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

    /// CHECK: owner of investor_token and of the balance row
    pub investor: UncheckedAccount<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [ASSET_LEDGER_SEED, pool_ledger.pool_key.as_ref(), mint.key().as_ref()],
        bump = asset_ledger.bump,
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    #[account(
        mut,
        seeds = [
            TOKEN_BALANCE_SEED,
            pool_ledger.pool_key.as_ref(),
            investor.key().as_ref(),
            mint.key().as_ref(),
        ],
        bump = token_balance.bump,
    )]
    pub token_balance: Box<Account<'info, TokenBalance>>,

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
        token::authority = investor,
    )]
    pub investor_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> WithdrawStake<'info> {
    pub fn withdraw_stake(&mut self, amount: u64) -> Result<()> {
        self.admin_config.assert_is_controller(&self.controller.key())?;
        self.pool_ledger.assert_controller_pool()?;

        require!(amount > 0, DealVaultError::InvalidParameter);
        require!(
            amount <= self.token_balance.unencumbered(),
            DealVaultError::InsufficientBalance
        );

        custody::debit(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            &mut self.token_balance,
            amount,
            0,
        )?;

        let pool_key = self.pool_ledger.pool_key;

        transfer_as_vault_authority(
            amount,
            &self.token_program.to_account_info(),
            &self.vault.to_account_info(),
            &self.investor_token.to_account_info(),
            &self.vault_authority.to_account_info(),
            &pool_key,
            self.pool_ledger.authority_bump,
        )?;

        emit!(CustodyWithdrawn {
            pool_key,
            investor: self.investor.key(),
            mint: self.mint.key(),
            amount,
        });

        msg!(
            "Pool {}: {} withdrawn for {}, balance {}",
            pool_key,
            amount,
            self.investor.key(),
            self.token_balance.amount
        );

        Ok(())
    }
}
