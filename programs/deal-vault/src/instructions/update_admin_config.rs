// Update Admin Config Instruction
//
// Admin replaces the custody controller and/or the settlement recipient.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, state::*};

#[derive(Accounts)]
pub struct UpdateAdminConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,
}

impl<'info> UpdateAdminConfig<'info> {
    pub fn update_admin_config(
        &mut self,
        controller: Option<Pubkey>,
        settlement_recipient: Option<Pubkey>,
    ) -> Result<()> {
        self.admin_config.assert_is_admin(&self.admin.key())?;

        if let Some(controller) = controller {
            require!(controller != Pubkey::default(), DealVaultError::InvalidParameter);
            self.admin_config.controller = controller;
            msg!("Controller set to {}", controller);
        }

        if let Some(recipient) = settlement_recipient {
            require!(recipient != Pubkey::default(), DealVaultError::InvalidParameter);
            self.admin_config.settlement_recipient = recipient;
            msg!("Settlement recipient set to {}", recipient);
        }

        Ok(())
    }
}
