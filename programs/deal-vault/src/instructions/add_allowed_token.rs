// Add Allowed Token Instruction
//
// Admin allow-lists a staking mint for new deals.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct AddAllowedToken<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,

    pub mint: Account<'info, Mint>,
}

impl<'info> AddAllowedToken<'info> {
    pub fn add_allowed_token(&mut self) -> Result<()> {
        self.admin_config.assert_is_admin(&self.admin.key())?;

        if self.admin_config.allow_token(self.mint.key())? {
            msg!("Token allowed: {}", self.mint.key());
        } else {
            msg!("Token already allowed: {}", self.mint.key());
        }

        Ok(())
    }
}
