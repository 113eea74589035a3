// Open Pool Instruction
//
// Controller opens a custody pool under an arbitrary pool key. Deal pools
// are opened by create_deal and never through here.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
#[instruction(pool_key: Pubkey)]
pub struct OpenPool<'info> {
    #[account(mut)]
    pub controller: Signer<'info>,

    #[account(
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,

    #[account(
        init,
        payer = controller,
        space = ANCHOR_DISCRIMINATOR + PoolLedger::INIT_SPACE,
        seeds = [POOL_LEDGER_SEED, pool_key.as_ref()],
        bump,
    )]
    pub pool_ledger: Account<'info, PoolLedger>,

    /// CHECK: PDA owning the pool vaults
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, pool_key.as_ref()],
        bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> OpenPool<'info> {
    pub fn open_pool(&mut self, pool_key: Pubkey, bumps: &OpenPoolBumps) -> Result<()> {
        self.admin_config.assert_not_closed()?;
        self.admin_config.assert_is_controller(&self.controller.key())?;

        self.pool_ledger.set_inner(PoolLedger {
            pool_key,
            deal_managed: false,
            total_deposited: 0,
            total_encumbered: 0,
            authority_bump: bumps.vault_authority,
            bump: bumps.pool_ledger,
        });

        msg!("Pool opened: {}", pool_key);

        Ok(())
    }
}
