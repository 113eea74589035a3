// Toggle Close Instruction
//
// Global halt switch. While closed every mutating instruction fails with
// Closed except the exits: withdraw, withdraw_over_amount on uncommitted
// stakes, send_back and withdraw_stake.

use anchor_lang::prelude::*;

use crate::{constants::*, events::*, state::*};

#[derive(Accounts)]
pub struct ToggleClose<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,
}

impl<'info> ToggleClose<'info> {
    pub fn toggle_close(&mut self) -> Result<()> {
        self.admin_config.assert_is_admin(&self.admin.key())?;

        self.admin_config.closed = !self.admin_config.closed;

        emit!(CloseToggled {
            admin: self.admin.key(),
            closed: self.admin_config.closed,
        });

        msg!("Closed: {}", self.admin_config.closed);

        Ok(())
    }
}
