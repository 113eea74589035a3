// Deposit Stake Instruction
//
// Controller pulls an investor's tokens into a pool. The investor grants
// the allowance beforehand by approving the pool's vault authority as
// delegate on their token account.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, helpers::*, state::*};

#[derive(Accounts)]
pub struct DepositStake<'info> {
    #[account(mut)]
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

    /// CHECK: owner of investor_token, not required to sign
    pub investor: UncheckedAccount<'info>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = controller,
        space = ANCHOR_DISCRIMINATOR + AssetLedger::INIT_SPACE,
        seeds = [ASSET_LEDGER_SEED, pool_ledger.pool_key.as_ref(), mint.key().as_ref()],
        bump,
    )]
    pub asset_ledger: Box<Account<'info, AssetLedger>>,

    #[account(
        init_if_needed,
        payer = controller,
        space = ANCHOR_DISCRIMINATOR + TokenBalance::INIT_SPACE,
        seeds = [
            TOKEN_BALANCE_SEED,
            pool_ledger.pool_key.as_ref(),
            investor.key().as_ref(),
            mint.key().as_ref(),
        ],
        bump,
    )]
    pub token_balance: Box<Account<'info, TokenBalance>>,

    /// CHECK: PDA owning the pool vaults, delegate on investor_token
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, pool_ledger.pool_key.as_ref()],
        bump = pool_ledger.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = controller,
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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> DepositStake<'info> {
    pub fn deposit_stake(&mut self, amount: u64, bumps: &DepositStakeBumps) -> Result<()> {
        // SECURITY CHECKS

        // 1. Global halt
        self.admin_config.assert_not_closed()?;

        // 2. Controller only, and never on a deal pool
        self.admin_config.assert_is_controller(&self.controller.key())?;
        self.pool_ledger.assert_controller_pool()?;

        require!(amount > 0, DealVaultError::InvalidParameter);

        // 3. Balance and allowance, checked up front so the error is ours
        let allowance = match self.investor_token.delegate {
            COption::Some(delegate) if delegate == self.vault_authority.key() => {
                self.investor_token.delegated_amount
            }
            _ => 0,
        };
        require!(
            self.investor_token.amount >= amount && allowance >= amount,
            DealVaultError::AssetTransferFailed
        );

        let pool_key = self.pool_ledger.pool_key;

        if self.asset_ledger.pool_key == Pubkey::default() {
            self.asset_ledger.pool_key = pool_key;
            self.asset_ledger.mint = self.mint.key();
            self.asset_ledger.bump = bumps.asset_ledger;
        }

        if self.token_balance.is_new() {
            self.token_balance.pool_key = pool_key;
            self.token_balance.investor = self.investor.key();
            self.token_balance.mint = self.mint.key();
            self.token_balance.bump = bumps.token_balance;
        }

        custody::credit(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            &mut self.token_balance,
            amount,
        )?;

        transfer_as_vault_authority(
            amount,
            &self.token_program.to_account_info(),
            &self.investor_token.to_account_info(),
            &self.vault.to_account_info(),
            &self.vault_authority.to_account_info(),
            &pool_key,
            self.pool_ledger.authority_bump,
        )?;

        emit!(CustodyDeposited {
            pool_key,
            investor: self.investor.key(),
            mint: self.mint.key(),
            amount,
        });

        msg!(
            "Pool {}: {} deposited for {}, pool total {}",
            pool_key,
            amount,
            self.investor.key(),
            self.pool_ledger.total_deposited
        );

        Ok(())
    }
}
