// Encumber Instruction
//
// Earmarks part of an investor's unencumbered balance for the settlement
// recipient. Signed by the investor or by the controller acting for them.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct Encumber<'info> {
    pub authority: Signer<'info>,

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

    /// CHECK: owner of the balance row
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
}

impl<'info> Encumber<'info> {
    pub fn encumber(&mut self, amount: u64) -> Result<()> {
        self.admin_config.assert_not_closed()?;
        self.pool_ledger.assert_controller_pool()?;

        let caller = self.authority.key();
        require!(
            caller == self.investor.key() || caller == self.admin_config.controller,
            DealVaultError::NoPermission
        );
        require!(amount > 0, DealVaultError::InvalidParameter);

        custody::encumber(
            &mut self.pool_ledger,
            &mut self.asset_ledger,
            &mut self.token_balance,
            amount,
        )?;

        emit!(BalanceEncumbered {
            pool_key: self.pool_ledger.pool_key,
            investor: self.investor.key(),
            mint: self.mint.key(),
            amount,
        });

        msg!(
            "Pool {}: {} encumbered for {}, {} left free",
            self.pool_ledger.pool_key,
            amount,
            self.investor.key(),
            self.token_balance.unencumbered()
        );

        Ok(())
    }
}
