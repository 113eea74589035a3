// Update Deal Instruction
//
// Sponsor rewrites the deal parameters until the deal carries a commitment:
// the lead investor staked or any stake was committed. The staking mint is
// fixed at creation.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct UpdateDeal<'info> {
    pub sponsor: Signer<'info>,

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

impl<'info> UpdateDeal<'info> {
    pub fn update_deal(&mut self, params: DealParams) -> Result<()> {
        self.admin_config.assert_not_closed()?;
        self.deal.assert_is_sponsor(&self.sponsor.key())?;

        require!(!self.deal.has_commitment(), DealVaultError::StakeExists);
        require!(
            matches!(
                self.deal.status,
                DealStatus::NotDisplaying | DealStatus::Staking
            ),
            DealVaultError::WrongState
        );

        params.validate()?;

        self.deal.apply_params(params);
        self.deal.status = self.deal.opening_status();

        emit!(DealUpdated {
            deal_id: self.deal.deal_id,
            status: self.deal.status,
        });

        msg!("Deal {} updated, status {:?}", self.deal.deal_id, self.deal.status);

        Ok(())
    }
}
