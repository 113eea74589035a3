// Initialize Instruction
//
// Creates the singleton AdminConfig. The signer becomes admin.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = ANCHOR_DISCRIMINATOR + AdminConfig::INIT_SPACE,
        seeds = [ADMIN_CONFIG_SEED],
        bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        controller: Pubkey,
        settlement_recipient: Pubkey,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        require!(controller != Pubkey::default(), DealVaultError::InvalidParameter);
        require!(
            settlement_recipient != Pubkey::default(),
            DealVaultError::InvalidParameter
        );

        self.admin_config.set_inner(AdminConfig {
            admin: self.admin.key(),
            controller,
            settlement_recipient,
            closed: false,
            deal_count: 0,
            allowed_tokens: [Pubkey::default(); MAX_ALLOWED_TOKENS],
            allowed_token_count: 0,
            bump: bumps.admin_config,
        });

        emit!(AdminInitialized {
            admin: self.admin.key(),
            controller,
            settlement_recipient,
        });

        msg!("Admin config initialized, admin: {}", self.admin.key());

        Ok(())
    }
}
