// Update Deal Status Instruction
//
// Admin moves a deal to any of Staking, Offering, Delivering, Claiming or
// Closed, to advance a round or force-close it. Closed is terminal.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct UpdateDealStatus<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ADMIN_CONFIG_SEED],
        bump = admin_config.bump,
    )]
    pub admin_config: Account<'info, AdminConfig>,

    #[account(
        mut,
        seeds = [DEAL_SEED, &deal.deal_id.to_le_bytes()],
        bump = deal.bump,
    )]
    pub deal: Box<Account<'info, Deal>>,
}

impl<'info> UpdateDealStatus<'info> {
    pub fn update_deal_status(&mut self, target: DealStatus) -> Result<()> {
        self.admin_config.assert_not_closed()?;
        self.admin_config.assert_is_admin(&self.admin.key())?;

        require!(
            target != DealStatus::NotDisplaying,
            DealVaultError::InvalidParameter
        );
        require!(
            self.deal.status != DealStatus::Closed,
            DealVaultError::WrongState
        );

        let from = self.deal.status;
        self.deal.status = target;

        emit!(DealStatusChanged {
            deal_id: self.deal.deal_id,
            from,
            to: target,
        });

        msg!("Deal {} status {:?} -> {:?}", self.deal.deal_id, from, target);

        Ok(())
    }
}
